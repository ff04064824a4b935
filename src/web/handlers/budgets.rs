//! Budget handlers.

use crate::core::budget::{self, BudgetProgress, NewBudget};
use crate::entities::BudgetModel;
use crate::errors::Result;
use crate::web::AppState;
use crate::web::extract::AuthUser;
use crate::web::handlers::transactions::MonthQuery;
use axum::Json;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use chrono::Utc;

/// `GET /api/budgets?month=2025-06-01` - budgets with spending progress
pub async fn progress(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<BudgetProgress>>> {
    let month = query.month.unwrap_or_else(|| Utc::now().date_naive());
    budget::list_budget_progress(&state.db, user_id, month)
        .await
        .map(Json)
}

/// `POST /api/budgets` - create or update the (category, month) budget
pub async fn upsert(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(input): Json<NewBudget>,
) -> Result<(StatusCode, Json<BudgetModel>)> {
    let saved = budget::upsert_budget(&state.db, user_id, input).await?;
    Ok((StatusCode::CREATED, Json(saved)))
}
