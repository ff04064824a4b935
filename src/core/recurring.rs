//! Recurring bill templates.
//!
//! A template stores the anchor day-of-month and the next date it is due;
//! the rollover pass (`core::rollover`) is the only thing that advances
//! `next_run`. Templates are switched inactive instead of deleted.

use crate::core::dates::upcoming_anchor;
use crate::core::money::validate_amount;
use crate::entities::{RecurringTransaction, TransactionKind, recurring_transaction};
use crate::errors::{Error, Result};
use chrono::{NaiveDate, Utc};
use sea_orm::{DatabaseConnection, QueryOrder, Set, prelude::*};
use serde::Deserialize;

/// Input for creating a recurring template.
#[derive(Debug, Clone, Deserialize)]
pub struct NewRecurring {
    /// Kind of the generated entries
    pub kind: TransactionKind,
    /// Amount in integer cents of each occurrence
    pub amount_cents: i64,
    /// Description copied onto generated entries
    pub description: String,
    /// Category copied onto generated entries
    pub category: String,
    /// Anchor day-of-month (1-31)
    pub day_of_month: i32,
}

/// Creates a template for `user_id`. Its first `next_run` is the first
/// occurrence of the anchor day on or after `today`.
///
/// # Errors
/// Rejects non-positive amounts, empty text fields, and anchor days
/// outside 1-31.
pub async fn create_recurring(
    db: &DatabaseConnection,
    user_id: i64,
    input: NewRecurring,
    today: NaiveDate,
) -> Result<recurring_transaction::Model> {
    validate_amount(input.amount_cents)?;
    if !(1..=31).contains(&input.day_of_month) {
        return Err(Error::validation(format!(
            "day of month must be between 1 and 31, got {}",
            input.day_of_month
        )));
    }
    let description = input.description.trim();
    let category = input.category.trim();
    if description.is_empty() || category.is_empty() {
        return Err(Error::validation(
            "description and category must not be empty",
        ));
    }

    let next_run = upcoming_anchor(today, input.day_of_month as u32);

    recurring_transaction::ActiveModel {
        user_id: Set(user_id),
        kind: Set(input.kind),
        amount_cents: Set(input.amount_cents),
        description: Set(description.to_string()),
        category: Set(category.to_string()),
        day_of_month: Set(input.day_of_month),
        next_run: Set(next_run),
        active: Set(true),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// All templates belonging to `user_id`, active first, then by next run.
pub async fn list_recurring(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Vec<recurring_transaction::Model>> {
    RecurringTransaction::find()
        .filter(recurring_transaction::Column::UserId.eq(user_id))
        .order_by_desc(recurring_transaction::Column::Active)
        .order_by_asc(recurring_transaction::Column::NextRun)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Activates or deactivates one owned template.
pub async fn set_recurring_active(
    db: &DatabaseConnection,
    user_id: i64,
    template_id: i64,
    active: bool,
) -> Result<recurring_transaction::Model> {
    let template = RecurringTransaction::find_by_id(template_id)
        .one(db)
        .await?
        .filter(|t| t.user_id == user_id)
        .ok_or(Error::NotFound {
            entity: "recurring transaction",
        })?;

    let mut model: recurring_transaction::ActiveModel = template.into();
    model.active = Set(active);
    model.update(db).await.map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn input(day_of_month: i32) -> NewRecurring {
        NewRecurring {
            kind: TransactionKind::Expense,
            amount_cents: 9_990,
            description: "Internet".to_string(),
            category: "utilities".to_string(),
            day_of_month,
        }
    }

    #[tokio::test]
    async fn test_create_recurring_derives_next_run() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = create_test_user(&db, "ana@example.com").await?;

        // Anchor still ahead this month
        let tpl = create_recurring(&db, owner.id, input(20), d(2025, 6, 10)).await?;
        assert_eq!(tpl.next_run, d(2025, 6, 20));
        assert!(tpl.active);

        // Anchor already passed: next month
        let tpl = create_recurring(&db, owner.id, input(5), d(2025, 6, 10)).await?;
        assert_eq!(tpl.next_run, d(2025, 7, 5));

        // Day-31 anchor clamps in June
        let tpl = create_recurring(&db, owner.id, input(31), d(2025, 6, 10)).await?;
        assert_eq!(tpl.next_run, d(2025, 6, 30));
        Ok(())
    }

    #[tokio::test]
    async fn test_create_recurring_validates() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = create_test_user(&db, "ana@example.com").await?;

        assert!(create_recurring(&db, owner.id, input(0), d(2025, 6, 10)).await.is_err());
        assert!(create_recurring(&db, owner.id, input(32), d(2025, 6, 10)).await.is_err());

        let mut bad = input(10);
        bad.amount_cents = 0;
        assert!(create_recurring(&db, owner.id, bad, d(2025, 6, 10)).await.is_err());
        Ok(())
    }

    #[tokio::test]
    async fn test_deactivate_requires_ownership() -> Result<()> {
        let db = setup_test_db().await?;
        let ana = create_test_user(&db, "ana@example.com").await?;
        let bia = create_test_user(&db, "bia@example.com").await?;
        let tpl = create_test_recurring(&db, ana.id, 9_990, 15, d(2025, 6, 15)).await?;

        assert!(matches!(
            set_recurring_active(&db, bia.id, tpl.id, false).await,
            Err(Error::NotFound { .. })
        ));

        let off = set_recurring_active(&db, ana.id, tpl.id, false).await?;
        assert!(!off.active);
        let on = set_recurring_active(&db, ana.id, tpl.id, true).await?;
        assert!(on.active);
        Ok(())
    }
}
