//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod budget;
pub mod chat_message;
pub mod credit_card;
pub mod recurring_transaction;
pub mod transaction;
pub mod user;
pub mod user_badge;

// Re-export specific types to avoid conflicts
pub use budget::{Column as BudgetColumn, Entity as Budget, Model as BudgetModel};
pub use chat_message::{
    Column as ChatMessageColumn, Entity as ChatMessage, Model as ChatMessageModel,
};
pub use credit_card::{Column as CreditCardColumn, Entity as CreditCard, Model as CreditCardModel};
pub use recurring_transaction::{
    Column as RecurringTransactionColumn, Entity as RecurringTransaction,
    Model as RecurringTransactionModel,
};
pub use transaction::{
    Column as TransactionColumn, Entity as Transaction, Model as TransactionModel, TransactionKind,
};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
pub use user_badge::{Column as UserBadgeColumn, Entity as UserBadge, Model as UserBadgeModel};
