//! Shared test utilities.
//!
//! Common helpers for setting up in-memory test databases, creating test
//! entities with sensible defaults, and test doubles for the notifier and
//! advisor seams.

use crate::{
    entities::{
        CreditCardModel, RecurringTransactionModel, TransactionKind, TransactionModel, UserModel,
        credit_card, recurring_transaction, transaction, user,
    },
    errors::{Error, Result},
    services::{Advisor, BillReminder, Notifier},
};
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};
use std::sync::{Arc, Mutex};

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Creates a test user. The name is derived from the e-mail local part;
/// credentials are fixed test values.
pub async fn create_test_user(db: &DatabaseConnection, email: &str) -> Result<UserModel> {
    let name = email.split('@').next().unwrap_or("user").to_string();
    user::ActiveModel {
        name: Set(name),
        email: Set(email.to_string()),
        password_digest: Set("test-digest".to_string()),
        password_salt: Set("test-salt".to_string()),
        partner_id: Set(None),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Creates a test credit card for `user_id` with the given closing day.
pub async fn create_test_card(
    db: &DatabaseConnection,
    user_id: i64,
    closing_day: i32,
) -> Result<CreditCardModel> {
    credit_card::ActiveModel {
        user_id: Set(user_id),
        name: Set("Test Card".to_string()),
        closing_day: Set(closing_day),
        due_day: Set((closing_day % 28) + 1),
        limit_cents: Set(None),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Creates an active test recurring template.
pub async fn create_test_recurring(
    db: &DatabaseConnection,
    user_id: i64,
    amount_cents: i64,
    day_of_month: i32,
    next_run: NaiveDate,
) -> Result<RecurringTransactionModel> {
    recurring_transaction::ActiveModel {
        user_id: Set(user_id),
        kind: Set(TransactionKind::Expense),
        amount_cents: Set(amount_cents),
        description: Set("Internet".to_string()),
        category: Set("utilities".to_string()),
        day_of_month: Set(day_of_month),
        next_run: Set(next_run),
        active: Set(true),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Creates a paid test transaction with the given kind/amount/category.
pub async fn create_test_transaction(
    db: &DatabaseConnection,
    user_id: i64,
    kind: TransactionKind,
    amount_cents: i64,
    category: &str,
    date: NaiveDate,
) -> Result<TransactionModel> {
    transaction::ActiveModel {
        user_id: Set(user_id),
        kind: Set(kind),
        amount_cents: Set(amount_cents),
        description: Set("Test transaction".to_string()),
        category: Set(category.to_string()),
        date: Set(date),
        is_paid: Set(true),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Notifier double that records (recipient, batch size) per delivery and
/// can be configured to fail every attempt.
#[derive(Clone)]
pub struct RecordingNotifier {
    log: Arc<Mutex<Vec<(String, usize)>>>,
    fail: bool,
}

impl RecordingNotifier {
    /// A notifier whose deliveries all succeed.
    pub fn succeeding() -> Self {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
            fail: false,
        }
    }

    /// A notifier whose deliveries all fail (after recording the attempt).
    pub fn failing() -> Self {
        Self {
            log: Arc::new(Mutex::new(Vec::new())),
            fail: true,
        }
    }

    /// This notifier as the trait object the rollover expects, sharing
    /// the same delivery log.
    pub fn clone_arc(&self) -> Arc<dyn Notifier> {
        Arc::new(self.clone())
    }

    /// Recorded deliveries as (recipient, reminder count), sorted for
    /// stable assertions.
    pub fn deliveries(&self) -> Vec<(String, usize)> {
        let mut log = self.log.lock().expect("notifier log poisoned").clone();
        log.sort();
        log
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send_bill_reminders(
        &self,
        recipient: &str,
        reminders: &[BillReminder],
    ) -> Result<()> {
        self.log
            .lock()
            .expect("notifier log poisoned")
            .push((recipient.to_string(), reminders.len()));
        if self.fail {
            return Err(Error::Notification {
                message: format!("injected failure for {recipient}"),
            });
        }
        Ok(())
    }
}

/// Advisor double that always replies with a fixed string.
pub struct CannedAdvisor(pub &'static str);

#[async_trait]
impl Advisor for CannedAdvisor {
    async fn complete(&self, _prompt: &str) -> Result<String> {
        Ok(self.0.to_string())
    }
}
