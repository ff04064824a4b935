//! Partner linking handlers.

use crate::core::couple::{self, CoupleSummary};
use crate::entities::UserModel;
use crate::errors::Result;
use crate::web::AppState;
use crate::web::extract::AuthUser;
use crate::web::handlers::transactions::MonthQuery;
use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use chrono::Utc;
use serde::Deserialize;

/// Body for the link request.
#[derive(Debug, Deserialize)]
pub struct LinkRequest {
    /// E-mail of the partner account to link with
    pub partner_email: String,
}

/// `POST /api/couple/link`
pub async fn link(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(body): Json<LinkRequest>,
) -> Result<Json<UserModel>> {
    couple::link_partner(&state.db, user_id, &body.partner_email)
        .await
        .map(Json)
}

/// `DELETE /api/couple/link`
pub async fn unlink(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<StatusCode> {
    couple::unlink_partner(&state.db, user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /api/couple/summary?month=2025-06-01`
pub async fn summary(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<MonthQuery>,
) -> Result<Json<CoupleSummary>> {
    let month = query.month.unwrap_or_else(|| Utc::now().date_naive());
    couple::couple_summary(&state.db, user_id, month)
        .await
        .map(Json)
}
