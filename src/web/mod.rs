//! HTTP surface: application state, error mapping, and the server loop.

/// Request extractors (authenticated user)
pub mod extract;
/// Request handlers grouped by resource
pub mod handlers;
/// Route table
pub mod routes;

use crate::config::AppConfig;
use crate::errors::{Error, Result};
use crate::services::{Advisor, Notifier};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tracing::{error, info};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: DatabaseConnection,
    /// Immutable application configuration
    pub config: Arc<AppConfig>,
    /// Outbound bill-reminder delivery
    pub notifier: Arc<dyn Notifier>,
    /// Advice-chat completion
    pub advisor: Arc<dyn Advisor>,
}

impl AppState {
    /// Bundles the collaborators into one state value.
    pub fn new(
        db: DatabaseConnection,
        config: AppConfig,
        notifier: Arc<dyn Notifier>,
        advisor: Arc<dyn Advisor>,
    ) -> Self {
        Self {
            db,
            config: Arc::new(config),
            notifier,
            advisor,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::Validation { .. } | Error::InvalidAmount { .. } => StatusCode::BAD_REQUEST,
            Error::Unauthorized => StatusCode::UNAUTHORIZED,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Internal details stay in the log, not in the response body
        let message = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self, "request failed");
            "internal error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// Binds the configured address and serves until shutdown.
pub async fn run_server(state: AppState) -> Result<()> {
    let addr = state.config.bind_addr.clone();
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "duocash listening");
    axum::serve(listener, app).await?;
    Ok(())
}
