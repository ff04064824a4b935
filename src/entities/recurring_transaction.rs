//! Recurring transaction entity - Template for a periodic monthly bill.
//!
//! A template is created when a user marks a transaction as recurring. The
//! rollover job materializes occurrences into concrete `transactions` rows
//! and advances `next_run`; templates are deactivated rather than deleted
//! so history stays explainable.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::transaction::TransactionKind;

/// Recurring transaction database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "recurring_transactions")]
pub struct Model {
    /// Unique identifier for the template
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the user who owns this template
    pub user_id: i64,
    /// Kind of the generated entries
    pub kind: TransactionKind,
    /// Amount in integer cents of each occurrence
    pub amount_cents: i64,
    /// Description copied onto generated entries
    pub description: String,
    /// Category copied onto generated entries
    pub category: String,
    /// Anchor day-of-month (1-31); short months clamp to their last day
    pub day_of_month: i32,
    /// Next date an occurrence is due
    pub next_run: Date,
    /// Inactive templates are skipped by the rollover job
    pub active: bool,
    /// When the template was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between RecurringTransaction and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each template belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
