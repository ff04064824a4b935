//! Credit card handlers.

use crate::core::credit_card::{self, NewCreditCard};
use crate::entities::CreditCardModel;
use crate::errors::Result;
use crate::web::AppState;
use crate::web::extract::AuthUser;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

/// `GET /api/cards`
pub async fn list(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<CreditCardModel>>> {
    credit_card::list_cards(&state.db, user_id).await.map(Json)
}

/// `POST /api/cards`
pub async fn create(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(input): Json<NewCreditCard>,
) -> Result<(StatusCode, Json<CreditCardModel>)> {
    let created = credit_card::create_card(&state.db, user_id, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
