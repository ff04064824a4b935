//! Ledger entry operations: CRUD, installment purchases, and monthly
//! summaries.
//!
//! Every operation takes the acting user's id and enforces ownership
//! before any mutation; records belonging to someone else are reported as
//! not found. Installment groups are created in a single database
//! transaction so the "amounts sum to the original total" invariant can
//! never be observed half-written.

use crate::core::installment;
use crate::core::money::validate_amount;
use crate::core::{credit_card, dates};
use crate::entities::{Transaction, TransactionKind, transaction};
use crate::errors::{Error, Result};
use chrono::{NaiveDate, Utc};
use sea_orm::{DatabaseConnection, QueryOrder, Set, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Input for creating a single ledger entry.
#[derive(Debug, Clone, Deserialize)]
pub struct NewTransaction {
    /// Income, expense, or investment
    pub kind: TransactionKind,
    /// Amount in integer cents, positive
    pub amount_cents: i64,
    /// Description of the entry
    pub description: String,
    /// Category label
    pub category: String,
    /// Effective date
    pub date: NaiveDate,
    /// Whether the entry is already settled; defaults to true
    #[serde(default = "default_true")]
    pub is_paid: bool,
    /// Card the purchase was made on, if any
    pub credit_card_id: Option<i64>,
}

fn default_true() -> bool {
    true
}

/// Partial update for an existing entry; absent fields are unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionUpdate {
    /// New amount in cents
    pub amount_cents: Option<i64>,
    /// New description
    pub description: Option<String>,
    /// New category
    pub category: Option<String>,
    /// New effective date
    pub date: Option<NaiveDate>,
    /// New paid flag
    pub is_paid: Option<bool>,
}

/// Input for an installment purchase.
#[derive(Debug, Clone, Deserialize)]
pub struct InstallmentPurchase {
    /// Total purchase amount in integer cents
    pub total_cents: i64,
    /// Number of installments, at least 2
    pub installments: u32,
    /// Purchase description; entries get a "(i/n)" suffix
    pub description: String,
    /// Category label
    pub category: String,
    /// Date of the purchase
    pub purchase_date: NaiveDate,
    /// Card the purchase was made on; its closing day may shift the
    /// whole schedule one month forward
    pub credit_card_id: Option<i64>,
}

/// Spending total for one category in a month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySpend {
    /// Category label
    pub category: String,
    /// Expense total in integer cents
    pub spent_cents: i64,
}

/// Aggregated view of one user's month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthlySummary {
    /// First day of the summarized month
    pub month: NaiveDate,
    /// Income total in integer cents
    pub income_cents: i64,
    /// Expense total in integer cents
    pub expense_cents: i64,
    /// Investment total in integer cents
    pub investment_cents: i64,
    /// Expense totals per category, highest first
    pub by_category: Vec<CategorySpend>,
}

fn validate_text(label: &str, value: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(format!("{label} must not be empty")));
    }
    Ok(trimmed.to_string())
}

/// Creates a single ledger entry for `user_id`.
///
/// # Errors
/// Rejects non-positive amounts and empty description/category; a
/// referenced card must exist and belong to the user.
pub async fn create_transaction(
    db: &DatabaseConnection,
    user_id: i64,
    input: NewTransaction,
) -> Result<transaction::Model> {
    validate_amount(input.amount_cents)?;
    let description = validate_text("description", &input.description)?;
    let category = validate_text("category", &input.category)?;

    if let Some(card_id) = input.credit_card_id {
        credit_card::card_for_user(db, user_id, card_id).await?;
    }

    transaction::ActiveModel {
        user_id: Set(user_id),
        kind: Set(input.kind),
        amount_cents: Set(input.amount_cents),
        description: Set(description),
        category: Set(category),
        date: Set(input.date),
        is_paid: Set(input.is_paid),
        credit_card_id: Set(input.credit_card_id),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Creates all entries of one installment purchase atomically.
///
/// Amounts follow [`installment::split_amount`] (the remainder lands on
/// the last installment) and dates follow the purchase-day anchor, shifted
/// one month when bought on/after the card's closing day. All entries
/// share a generated group id and carry their 1-based position.
pub async fn create_installment_purchase(
    db: &DatabaseConnection,
    user_id: i64,
    input: InstallmentPurchase,
) -> Result<Vec<transaction::Model>> {
    let description = validate_text("description", &input.description)?;
    let category = validate_text("category", &input.category)?;

    let closing_day = match input.credit_card_id {
        Some(card_id) => {
            let card = credit_card::card_for_user(db, user_id, card_id).await?;
            Some(card.closing_day as u32)
        }
        None => None,
    };

    let schedule = installment::build_schedule(
        input.total_cents,
        input.installments,
        input.purchase_date,
        closing_day,
    )?;

    let group = Uuid::new_v4().to_string();
    let now = Utc::now();
    let total = schedule.len();

    let txn = db.begin().await?;
    let mut created = Vec::with_capacity(total);
    for part in schedule {
        let model = transaction::ActiveModel {
            user_id: Set(user_id),
            kind: Set(TransactionKind::Expense),
            amount_cents: Set(part.amount_cents),
            description: Set(format!("{description} ({}/{total})", part.number)),
            category: Set(category.clone()),
            date: Set(part.date),
            is_paid: Set(false),
            installment_group: Set(Some(group.clone())),
            installment_number: Set(Some(part.number as i32)),
            credit_card_id: Set(input.credit_card_id),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        created.push(model);
    }
    txn.commit().await?;

    Ok(created)
}

/// Fetches one entry, enforcing ownership.
pub async fn get_transaction(
    db: &DatabaseConnection,
    user_id: i64,
    transaction_id: i64,
) -> Result<transaction::Model> {
    Transaction::find_by_id(transaction_id)
        .one(db)
        .await?
        .filter(|t| t.user_id == user_id)
        .ok_or(Error::NotFound {
            entity: "transaction",
        })
}

/// Lists entries for `user_id`, newest first, optionally restricted to
/// the month containing `month`.
pub async fn list_transactions(
    db: &DatabaseConnection,
    user_id: i64,
    month: Option<NaiveDate>,
) -> Result<Vec<transaction::Model>> {
    let mut query = Transaction::find().filter(transaction::Column::UserId.eq(user_id));

    if let Some(any_day) = month {
        let start = dates::month_start(any_day);
        let end = dates::next_month_start(any_day);
        query = query
            .filter(transaction::Column::Date.gte(start))
            .filter(transaction::Column::Date.lt(end));
    }

    query
        .order_by_desc(transaction::Column::Date)
        .order_by_desc(transaction::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Applies a partial update to one owned entry.
pub async fn update_transaction(
    db: &DatabaseConnection,
    user_id: i64,
    transaction_id: i64,
    changes: TransactionUpdate,
) -> Result<transaction::Model> {
    let existing = get_transaction(db, user_id, transaction_id).await?;

    // An empty patch would otherwise produce an UPDATE with no columns
    if changes.amount_cents.is_none()
        && changes.description.is_none()
        && changes.category.is_none()
        && changes.date.is_none()
        && changes.is_paid.is_none()
    {
        return Ok(existing);
    }

    let mut active: transaction::ActiveModel = existing.into();

    if let Some(amount) = changes.amount_cents {
        validate_amount(amount)?;
        active.amount_cents = Set(amount);
    }
    if let Some(description) = changes.description {
        active.description = Set(validate_text("description", &description)?);
    }
    if let Some(category) = changes.category {
        active.category = Set(validate_text("category", &category)?);
    }
    if let Some(date) = changes.date {
        active.date = Set(date);
    }
    if let Some(is_paid) = changes.is_paid {
        active.is_paid = Set(is_paid);
    }

    active.update(db).await.map_err(Into::into)
}

/// Deletes one owned entry.
pub async fn delete_transaction(
    db: &DatabaseConnection,
    user_id: i64,
    transaction_id: i64,
) -> Result<()> {
    let existing = get_transaction(db, user_id, transaction_id).await?;
    existing.delete(db).await?;
    Ok(())
}

/// Builds the monthly summary for `user_id` over the month containing
/// `month`. Category totals cover expenses only.
pub async fn monthly_summary(
    db: &DatabaseConnection,
    user_id: i64,
    month: NaiveDate,
) -> Result<MonthlySummary> {
    let entries = list_transactions(db, user_id, Some(month)).await?;

    let mut summary = MonthlySummary {
        month: dates::month_start(month),
        income_cents: 0,
        expense_cents: 0,
        investment_cents: 0,
        by_category: Vec::new(),
    };

    let mut per_category: std::collections::HashMap<String, i64> = std::collections::HashMap::new();
    for entry in entries {
        match entry.kind {
            TransactionKind::Income => summary.income_cents += entry.amount_cents,
            TransactionKind::Expense => {
                summary.expense_cents += entry.amount_cents;
                *per_category.entry(entry.category).or_default() += entry.amount_cents;
            }
            TransactionKind::Investment => summary.investment_cents += entry.amount_cents,
        }
    }

    summary.by_category = per_category
        .into_iter()
        .map(|(category, spent_cents)| CategorySpend {
            category,
            spent_cents,
        })
        .collect();
    summary
        .by_category
        .sort_by(|a, b| b.spent_cents.cmp(&a.spent_cents).then(a.category.cmp(&b.category)));

    Ok(summary)
}
