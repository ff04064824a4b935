//! Ledger entry handlers.

use crate::core::transaction::{
    self, InstallmentPurchase, MonthlySummary, NewTransaction, TransactionUpdate,
};
use crate::entities::TransactionModel;
use crate::errors::Result;
use crate::web::AppState;
use crate::web::extract::AuthUser;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

/// Optional month filter; any day of the wanted month.
#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    /// Any date inside the month of interest, e.g. `2025-06-01`
    pub month: Option<NaiveDate>,
}

/// `GET /api/transactions?month=2025-06-01`
pub async fn list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<TransactionModel>>> {
    transaction::list_transactions(&state.db, user_id, query.month)
        .await
        .map(Json)
}

/// `POST /api/transactions`
pub async fn create(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(input): Json<NewTransaction>,
) -> Result<(StatusCode, Json<TransactionModel>)> {
    let created = transaction::create_transaction(&state.db, user_id, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `POST /api/transactions/installments`
pub async fn create_installments(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(input): Json<InstallmentPurchase>,
) -> Result<(StatusCode, Json<Vec<TransactionModel>>)> {
    let created = transaction::create_installment_purchase(&state.db, user_id, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /api/transactions/summary?month=2025-06-01`
pub async fn summary(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(query): Query<MonthQuery>,
) -> Result<Json<MonthlySummary>> {
    let month = query.month.unwrap_or_else(|| Utc::now().date_naive());
    transaction::monthly_summary(&state.db, user_id, month)
        .await
        .map(Json)
}

/// `PUT /api/transactions/{id}`
pub async fn update(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
    Json(changes): Json<TransactionUpdate>,
) -> Result<Json<TransactionModel>> {
    transaction::update_transaction(&state.db, user_id, id, changes)
        .await
        .map(Json)
}

/// `DELETE /api/transactions/{id}`
pub async fn remove(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    transaction::delete_transaction(&state.db, user_id, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
