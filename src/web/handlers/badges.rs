//! Badge handlers.

use crate::core::badge::{self, BADGES, BadgeSpec};
use crate::entities::UserBadgeModel;
use crate::errors::Result;
use crate::web::AppState;
use crate::web::extract::AuthUser;
use axum::Json;
use axum::extract::State;
use serde::Serialize;

/// Badges held plus the full catalog.
#[derive(Debug, Serialize)]
pub struct BadgeList {
    /// Badges the user has earned
    pub earned: Vec<UserBadgeModel>,
    /// Every badge the system can award
    pub catalog: &'static [BadgeSpec],
}

/// Codes newly awarded by a refresh.
#[derive(Debug, Serialize)]
pub struct RefreshResult {
    /// Badge codes awarded by this call
    pub awarded: Vec<&'static str>,
}

/// `GET /api/badges`
pub async fn list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<BadgeList>> {
    let earned = badge::list_badges(&state.db, user_id).await?;
    Ok(Json(BadgeList {
        earned,
        catalog: BADGES,
    }))
}

/// `POST /api/badges/refresh`
pub async fn refresh(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<RefreshResult>> {
    let awarded = badge::refresh_badges(&state.db, user_id).await?;
    Ok(Json(RefreshResult { awarded }))
}
