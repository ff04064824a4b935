//! Registration and login handlers.

use crate::core::auth::{self, LoginInput, RegisterInput};
use crate::entities::UserModel;
use crate::errors::Result;
use crate::web::AppState;
use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use serde::Serialize;

/// Token plus the account it belongs to.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// Signed bearer token for subsequent requests
    pub token: String,
    /// The account (credentials omitted)
    pub user: UserModel,
}

/// `POST /api/auth/register`
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> Result<(StatusCode, Json<AuthResponse>)> {
    let (user, token) = auth::register(&state.db, &state.config, input).await?;
    Ok((StatusCode::CREATED, Json(AuthResponse { token, user })))
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> Result<Json<AuthResponse>> {
    let (user, token) = auth::login(&state.db, &state.config, input).await?;
    Ok(Json(AuthResponse { token, user }))
}
