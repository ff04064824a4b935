//! User entity - An account holder, optionally linked to a partner.
//!
//! `partner_id` is a self-reference; linking is always symmetric (both rows
//! point at each other) and maintained atomically by `core::couple`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// User database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    /// Unique identifier for the user
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Display name
    pub name: String,
    /// Login e-mail, unique across accounts
    #[sea_orm(unique)]
    pub email: String,
    /// Salted SHA-256 digest of the password, base64url encoded
    #[serde(skip_serializing)]
    pub password_digest: String,
    /// Per-user random salt
    #[serde(skip_serializing)]
    pub password_salt: String,
    /// Linked partner's user id, if the couple link is established
    pub partner_id: Option<i64>,
    /// When the account was created
    pub created_at: DateTimeUtc,
}

/// User has no owning side of any relation; children point back at it.
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
