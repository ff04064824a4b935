//! Partner linking and the combined couple view.
//!
//! A link is always symmetric: both user rows point at each other and are
//! updated in one database transaction, so there is never a half-linked
//! pair. The couple summary stacks both partners' monthly summaries.

use crate::core::transaction::{MonthlySummary, monthly_summary};
use crate::entities::{User, user};
use crate::errors::{Error, Result};
use chrono::NaiveDate;
use sea_orm::{DatabaseConnection, Set, TransactionTrait, prelude::*};
use serde::Serialize;

/// Both partners' summaries plus combined totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoupleSummary {
    /// The requesting user's summary
    pub mine: MonthlySummary,
    /// The linked partner's summary
    pub partner: MonthlySummary,
    /// Combined income in integer cents
    pub combined_income_cents: i64,
    /// Combined expenses in integer cents
    pub combined_expense_cents: i64,
    /// Combined investments in integer cents
    pub combined_investment_cents: i64,
}

async fn find_user(db: &DatabaseConnection, user_id: i64) -> Result<user::Model> {
    User::find_by_id(user_id)
        .one(db)
        .await?
        .ok_or(Error::NotFound { entity: "user" })
}

/// Links `user_id` with the account registered under `partner_email`.
/// Both rows are updated atomically.
///
/// # Errors
/// Rejects self-linking and accounts that are already linked; an unknown
/// e-mail is reported as not found.
pub async fn link_partner(
    db: &DatabaseConnection,
    user_id: i64,
    partner_email: &str,
) -> Result<user::Model> {
    let me = find_user(db, user_id).await?;
    let partner = User::find()
        .filter(user::Column::Email.eq(partner_email.trim()))
        .one(db)
        .await?
        .ok_or(Error::NotFound { entity: "user" })?;

    if partner.id == me.id {
        return Err(Error::validation("cannot link an account to itself"));
    }
    if me.partner_id.is_some() {
        return Err(Error::validation("your account is already linked"));
    }
    if partner.partner_id.is_some() {
        return Err(Error::validation("that account is already linked"));
    }

    let txn = db.begin().await?;
    let partner_id = partner.id;

    let mut mine: user::ActiveModel = me.into();
    mine.partner_id = Set(Some(partner_id));
    let linked = mine.update(&txn).await?;

    let mut theirs: user::ActiveModel = partner.into();
    theirs.partner_id = Set(Some(user_id));
    theirs.update(&txn).await?;

    txn.commit().await?;
    Ok(linked)
}

/// Removes the link on both sides atomically.
pub async fn unlink_partner(db: &DatabaseConnection, user_id: i64) -> Result<()> {
    let me = find_user(db, user_id).await?;
    let Some(partner_id) = me.partner_id else {
        return Err(Error::NotFound { entity: "partner" });
    };
    let partner = find_user(db, partner_id).await?;

    let txn = db.begin().await?;

    let mut mine: user::ActiveModel = me.into();
    mine.partner_id = Set(None);
    mine.update(&txn).await?;

    let mut theirs: user::ActiveModel = partner.into();
    theirs.partner_id = Set(None);
    theirs.update(&txn).await?;

    txn.commit().await?;
    Ok(())
}

/// The combined monthly view for a linked couple.
///
/// # Errors
/// Not found when no partner is linked.
pub async fn couple_summary(
    db: &DatabaseConnection,
    user_id: i64,
    month: NaiveDate,
) -> Result<CoupleSummary> {
    let me = find_user(db, user_id).await?;
    let Some(partner_id) = me.partner_id else {
        return Err(Error::NotFound { entity: "partner" });
    };

    let mine = monthly_summary(db, user_id, month).await?;
    let partner = monthly_summary(db, partner_id, month).await?;

    Ok(CoupleSummary {
        combined_income_cents: mine.income_cents + partner.income_cents,
        combined_expense_cents: mine.expense_cents + partner.expense_cents,
        combined_investment_cents: mine.investment_cents + partner.investment_cents,
        mine,
        partner,
    })
}
