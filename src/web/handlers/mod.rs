//! Request handlers, grouped by resource.
//!
//! Handlers stay thin: extract, delegate to `core`, shape the response.
//! All validation and ownership enforcement lives in the core modules.

/// Registration and login
pub mod auth;
/// Badge listing and refresh
pub mod badges;
/// Budget upsert and progress
pub mod budgets;
/// Credit card registration
pub mod cards;
/// Advice chat
pub mod chat;
/// Partner linking and the couple view
pub mod couple;
/// The guarded rollover trigger
pub mod cron;
/// Recurring bill templates
pub mod recurring;
/// Ledger entries and installment purchases
pub mod transactions;

/// Liveness probe.
pub async fn health() -> &'static str {
    "ok"
}
