//! Request extractors.

use crate::core::auth::verify_token;
use crate::errors::Error;
use crate::web::AppState;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use chrono::Utc;

/// The authenticated user's id, extracted from the `Authorization:
/// Bearer` header. Handlers that take this parameter are auth-guarded.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub i64);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(Error::Unauthorized)?;
        let token = header.strip_prefix("Bearer ").ok_or(Error::Unauthorized)?;

        let user_id = verify_token(
            &state.config.token_secret,
            token,
            Utc::now().timestamp(),
        )?;
        Ok(AuthUser(user_id))
    }
}
