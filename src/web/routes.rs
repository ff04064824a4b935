//! Route table.

use crate::web::{AppState, handlers};
use axum::Router;
use axum::routing::{get, patch, post, put};

/// Builds the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .route(
            "/api/transactions",
            get(handlers::transactions::list).post(handlers::transactions::create),
        )
        .route(
            "/api/transactions/summary",
            get(handlers::transactions::summary),
        )
        .route(
            "/api/transactions/installments",
            post(handlers::transactions::create_installments),
        )
        .route(
            "/api/transactions/{id}",
            put(handlers::transactions::update).delete(handlers::transactions::remove),
        )
        .route(
            "/api/recurring",
            get(handlers::recurring::list).post(handlers::recurring::create),
        )
        .route(
            "/api/recurring/{id}/active",
            patch(handlers::recurring::set_active),
        )
        .route(
            "/api/cards",
            get(handlers::cards::list).post(handlers::cards::create),
        )
        .route(
            "/api/budgets",
            get(handlers::budgets::progress).post(handlers::budgets::upsert),
        )
        .route(
            "/api/couple/link",
            post(handlers::couple::link).delete(handlers::couple::unlink),
        )
        .route("/api/couple/summary", get(handlers::couple::summary))
        .route("/api/badges", get(handlers::badges::list))
        .route("/api/badges/refresh", post(handlers::badges::refresh))
        .route(
            "/api/chat",
            get(handlers::chat::history).post(handlers::chat::send),
        )
        .route("/api/cron/rollover", post(handlers::cron::rollover))
        .with_state(state)
}
