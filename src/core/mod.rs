//! Core business logic - framework-agnostic operations over the ledger.
//!
//! Everything here takes an explicit database connection (and, for the
//! rollover, an explicit "today") so it can be driven deterministically
//! from tests and from whatever outer surface hosts it.

/// Financial-advice chat: snapshot, prompt building, message flow
pub mod advice;
/// Registration, login, and signed session tokens
pub mod auth;
/// Badge rules and idempotent awarding
pub mod badge;
/// Monthly category budgets and progress
pub mod budget;
/// Partner linking and the combined couple view
pub mod couple;
/// Credit card registration and lookups
pub mod credit_card;
/// Calendar arithmetic with short-month clamping
pub mod dates;
/// Credit-purchase installment splitting
pub mod installment;
/// Integer-cent money helpers
pub mod money;
/// Recurring bill templates
pub mod recurring;
/// The periodic rollover pass
pub mod rollover;
/// Ledger entry CRUD and monthly summaries
pub mod transaction;
