//! Transaction entity - Represents all ledger entries in the system.
//!
//! Amounts are stored as integer cents (`amount_cents`) so installment
//! groups and summaries never accumulate floating-point drift. Entries
//! created by the recurring-bill rollover are future-dated with
//! `is_paid = false`; installment purchases share an `installment_group`
//! identifier and carry their 1-based `installment_number`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Kind of ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in (salary, refunds)
    #[sea_orm(string_value = "income")]
    Income,
    /// Money going out (bills, purchases)
    #[sea_orm(string_value = "expense")]
    Expense,
    /// Money moved into investments
    #[sea_orm(string_value = "investment")]
    Investment,
}

/// Transaction database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "transactions")]
pub struct Model {
    /// Unique identifier for the transaction
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the user who owns this entry
    pub user_id: i64,
    /// Income, expense, or investment
    pub kind: TransactionKind,
    /// Amount in integer cents, always positive
    pub amount_cents: i64,
    /// Human-readable description of the entry
    pub description: String,
    /// Free-form category label, e.g. "groceries"
    pub category: String,
    /// Effective date of the entry
    pub date: Date,
    /// Whether the entry has actually been paid/settled. Rollover
    /// projections start out unpaid.
    pub is_paid: bool,
    /// Shared identifier linking all installments of one purchase
    pub installment_group: Option<String>,
    /// 1-based position within the installment group
    pub installment_number: Option<i32>,
    /// Credit card the purchase was made on, if any
    pub credit_card_id: Option<i64>,
    /// When the row was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Transaction and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each transaction belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    /// Credit purchases reference the card they were made on
    #[sea_orm(
        belongs_to = "super::credit_card::Entity",
        from = "Column::CreditCardId",
        to = "super::credit_card::Column::Id"
    )]
    CreditCard,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::credit_card::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CreditCard.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
