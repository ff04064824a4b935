//! Unified error types and result handling.
//!
//! One crate-wide error enum covering the three failure families the API
//! distinguishes: validation (caller fixable), authorization (token or
//! ownership), and internal (database or collaborator failure). The web
//! layer maps these onto HTTP statuses; ownership failures are deliberately
//! reported as `NotFound` so the API never confirms that another user's
//! record exists.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Bad input shape or range, reported back to the caller.
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable description of what was wrong with the input
        message: String,
    },

    /// Monetary amount outside the accepted range.
    #[error("Invalid amount: {amount_cents} cents")]
    InvalidAmount {
        /// The rejected amount, in integer cents
        amount_cents: i64,
    },

    /// The referenced record does not exist, or belongs to another user.
    #[error("{entity} not found")]
    NotFound {
        /// Entity kind, e.g. "transaction" or "credit card"
        entity: &'static str,
    },

    /// Missing, malformed, expired, or forged credentials.
    #[error("Unauthorized")]
    Unauthorized,

    /// Configuration problem detected at startup.
    #[error("Configuration error: {message}")]
    Config {
        /// What was missing or malformed
        message: String,
    },

    /// Database error from the storage layer.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Outbound notification delivery failure. Only surfaced by the
    /// notifier itself; rollover swallows it per recipient.
    #[error("Notification error: {message}")]
    Notification {
        /// Delivery failure description
        message: String,
    },

    /// Advice-model completion failure.
    #[error("Advisor error: {message}")]
    Advisor {
        /// Completion failure description
        message: String,
    },

    /// I/O error (listener binding, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error during configuration loading.
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

impl Error {
    /// Shorthand for a validation error with a formatted message.
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
