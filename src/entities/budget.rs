//! Budget entity - Monthly spending limit for one category.
//!
//! `month` is normalized to the first day of the month. Uniqueness per
//! (user, category, month) is enforced by the upsert in `core::budget`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Budget database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "budgets")]
pub struct Model {
    /// Unique identifier for the budget row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the user who owns this budget
    pub user_id: i64,
    /// Category the limit applies to
    pub category: String,
    /// First day of the month this budget covers
    pub month: Date,
    /// Spending limit in integer cents
    pub limit_cents: i64,
    /// When the budget was created
    pub created_at: DateTimeUtc,
}

/// Defines relationships between Budget and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each budget belongs to one user
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
