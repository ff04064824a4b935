//! Database connection and table creation using SeaORM.
//!
//! Tables are generated straight from the entity definitions with
//! `Schema::create_table_from_entity`, so the schema always matches the
//! Rust structs without hand-written SQL.

use crate::entities::{
    Budget, ChatMessage, CreditCard, RecurringTransaction, Transaction, User, UserBadge,
};
use crate::errors::Result;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Connects to the database at `database_url`.
pub async fn create_connection(database_url: &str) -> Result<DatabaseConnection> {
    Database::connect(database_url).await.map_err(Into::into)
}

/// Creates all tables from the entity definitions. Idempotent: existing
/// tables are left untouched.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut statements = vec![
        schema.create_table_from_entity(User),
        schema.create_table_from_entity(Transaction),
        schema.create_table_from_entity(RecurringTransaction),
        schema.create_table_from_entity(CreditCard),
        schema.create_table_from_entity(Budget),
        schema.create_table_from_entity(ChatMessage),
        schema.create_table_from_entity(UserBadge),
    ];
    for statement in &mut statements {
        statement.if_not_exists();
        db.execute(builder.build(statement)).await?;
    }

    Ok(())
}
