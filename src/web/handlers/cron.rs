//! The guarded rollover trigger.
//!
//! Meant to be hit by an external scheduler. Guarded by a shared secret
//! rather than a user token; the comparison goes through SHA-256 digests
//! so it is independent of where the strings first differ.

use crate::core::rollover::{RolloverSummary, run_rollover};
use crate::errors::{Error, Result};
use crate::web::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use chrono::Utc;
use sha2::{Digest, Sha256};
use std::sync::Arc;

fn secrets_match(presented: &str, expected: &str) -> bool {
    Sha256::digest(presented.as_bytes()) == Sha256::digest(expected.as_bytes())
}

/// `POST /api/cron/rollover`
///
/// No body. Returns the summary counts of the pass.
pub async fn rollover(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<RolloverSummary>> {
    let presented = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .ok_or(Error::Unauthorized)?;
    if !secrets_match(presented, &state.config.cron_secret) {
        return Err(Error::Unauthorized);
    }

    let summary = run_rollover(
        &state.db,
        Arc::clone(&state.notifier),
        Utc::now().date_naive(),
        state.config.rollover_window_days,
    )
    .await?;
    Ok(Json(summary))
}
