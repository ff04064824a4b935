//! Monthly category budgets and progress.
//!
//! One budget row per (user, category, month); `upsert_budget` keeps that
//! uniqueness. Progress compares the limit against the month's expense
//! total for the category.

use crate::core::dates::{month_start, next_month_start};
use crate::core::money::validate_amount;
use crate::entities::{Budget, Transaction, TransactionKind, budget, transaction};
use crate::errors::{Error, Result};
use chrono::{NaiveDate, Utc};
use sea_orm::{DatabaseConnection, QueryOrder, Set, prelude::*};
use serde::{Deserialize, Serialize};

/// Input for setting a budget.
#[derive(Debug, Clone, Deserialize)]
pub struct NewBudget {
    /// Category the limit applies to
    pub category: String,
    /// Any day of the month the budget covers
    pub month: NaiveDate,
    /// Spending limit in integer cents
    pub limit_cents: i64,
}

/// One budget with its spending progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetProgress {
    /// Category label
    pub category: String,
    /// First day of the covered month
    pub month: NaiveDate,
    /// Limit in integer cents
    pub limit_cents: i64,
    /// Expense total in the category so far
    pub spent_cents: i64,
    /// Limit minus spent; negative when over budget
    pub remaining_cents: i64,
    /// Whether spending exceeded the limit
    pub over_budget: bool,
}

/// Creates or updates the budget for (category, month).
///
/// # Errors
/// Rejects non-positive limits and empty categories.
pub async fn upsert_budget(
    db: &DatabaseConnection,
    user_id: i64,
    input: NewBudget,
) -> Result<budget::Model> {
    validate_amount(input.limit_cents)?;
    let category = input.category.trim().to_string();
    if category.is_empty() {
        return Err(Error::validation("category must not be empty"));
    }
    let month = month_start(input.month);

    let existing = Budget::find()
        .filter(budget::Column::UserId.eq(user_id))
        .filter(budget::Column::Category.eq(category.clone()))
        .filter(budget::Column::Month.eq(month))
        .one(db)
        .await?;

    match existing {
        Some(found) => {
            let mut model: budget::ActiveModel = found.into();
            model.limit_cents = Set(input.limit_cents);
            model.update(db).await.map_err(Into::into)
        }
        None => budget::ActiveModel {
            user_id: Set(user_id),
            category: Set(category),
            month: Set(month),
            limit_cents: Set(input.limit_cents),
            created_at: Set(Utc::now()),
            ..Default::default()
        }
        .insert(db)
        .await
        .map_err(Into::into),
    }
}

/// All budgets of `user_id` for the month containing `month`, each with
/// its spending progress, ordered by category.
pub async fn list_budget_progress(
    db: &DatabaseConnection,
    user_id: i64,
    month: NaiveDate,
) -> Result<Vec<BudgetProgress>> {
    let start = month_start(month);
    let end = next_month_start(month);

    let budgets = Budget::find()
        .filter(budget::Column::UserId.eq(user_id))
        .filter(budget::Column::Month.eq(start))
        .order_by_asc(budget::Column::Category)
        .all(db)
        .await?;

    let expenses = Transaction::find()
        .filter(transaction::Column::UserId.eq(user_id))
        .filter(transaction::Column::Kind.eq(TransactionKind::Expense))
        .filter(transaction::Column::Date.gte(start))
        .filter(transaction::Column::Date.lt(end))
        .all(db)
        .await?;

    let mut spent_by_category: std::collections::HashMap<&str, i64> =
        std::collections::HashMap::new();
    for expense in &expenses {
        *spent_by_category.entry(expense.category.as_str()).or_default() += expense.amount_cents;
    }

    Ok(budgets
        .into_iter()
        .map(|b| {
            let spent_cents = spent_by_category.get(b.category.as_str()).copied().unwrap_or(0);
            BudgetProgress {
                month: b.month,
                limit_cents: b.limit_cents,
                spent_cents,
                remaining_cents: b.limit_cents - spent_cents,
                over_budget: spent_cents > b.limit_cents,
                category: b.category,
            }
        })
        .collect())
}
