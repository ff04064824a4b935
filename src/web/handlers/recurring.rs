//! Recurring template handlers.

use crate::core::recurring::{self, NewRecurring};
use crate::entities::RecurringTransactionModel;
use crate::errors::Result;
use crate::web::AppState;
use crate::web::extract::AuthUser;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use chrono::Utc;
use serde::Deserialize;

/// `GET /api/recurring`
pub async fn list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<RecurringTransactionModel>>> {
    recurring::list_recurring(&state.db, user_id).await.map(Json)
}

/// `POST /api/recurring`
pub async fn create(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(input): Json<NewRecurring>,
) -> Result<(StatusCode, Json<RecurringTransactionModel>)> {
    let today = Utc::now().date_naive();
    let created = recurring::create_recurring(&state.db, user_id, input, today).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Body for toggling a template.
#[derive(Debug, Deserialize)]
pub struct SetActive {
    /// Desired active state
    pub active: bool,
}

/// `PATCH /api/recurring/{id}/active`
pub async fn set_active(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
    Json(body): Json<SetActive>,
) -> Result<Json<RecurringTransactionModel>> {
    recurring::set_recurring_active(&state.db, user_id, id, body.active)
        .await
        .map(Json)
}
