//! User badge entity - An awarded gamification badge.
//!
//! `code` identifies the badge rule (see `core::badge`). A user holds each
//! badge at most once; the refresh pass is idempotent.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User badge database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "user_badges")]
pub struct Model {
    /// Unique identifier for the award row
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the user holding the badge
    pub user_id: i64,
    /// Stable badge code, e.g. "first-steps"
    pub code: String,
    /// When the badge was awarded
    pub awarded_at: DateTimeUtc,
}

/// Defines relationships between UserBadge and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each badge award belongs to one user
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
