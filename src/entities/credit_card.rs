//! Credit card entity - Closing/due day pair used for billing-cycle math.
//!
//! Only `closing_day` affects computation: a purchase on or after it posts
//! to the next cycle, shifting the whole installment schedule one month.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Credit card database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "credit_cards")]
pub struct Model {
    /// Unique identifier for the card
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the user who owns this card
    pub user_id: i64,
    /// Display name, e.g. "Nubank"
    pub name: String,
    /// Statement closing day (1-31)
    pub closing_day: i32,
    /// Payment due day (1-31)
    pub due_day: i32,
    /// Optional card limit in integer cents
    pub limit_cents: Option<i64>,
    /// When the card was registered
    pub created_at: DateTimeUtc,
}

/// Defines relationships between CreditCard and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each card belongs to one user
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    /// Purchases made on this card
    #[sea_orm(has_many = "super::transaction::Entity")]
    Transaction,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::transaction::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Transaction.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
