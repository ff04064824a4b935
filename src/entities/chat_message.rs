//! Chat message entity - One turn of the financial-advice conversation.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Chat message database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "chat_messages")]
pub struct Model {
    /// Unique identifier for the message
    #[sea_orm(primary_key)]
    pub id: i64,
    /// ID of the user this conversation belongs to
    pub user_id: i64,
    /// `"user"` or `"assistant"`
    pub role: String,
    /// Message body
    #[sea_orm(column_type = "Text")]
    pub content: String,
    /// When the message was stored
    pub created_at: DateTimeUtc,
}

/// Defines relationships between ChatMessage and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each message belongs to one user
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
