//! Credit card registration and lookups.
//!
//! Cards only matter to the computation through their closing day, which
//! decides whether a credit purchase posts to the current or next billing
//! cycle.

use crate::entities::{CreditCard, credit_card};
use crate::errors::{Error, Result};
use chrono::Utc;
use sea_orm::{DatabaseConnection, QueryOrder, Set, prelude::*};
use serde::Deserialize;

/// Input for registering a card.
#[derive(Debug, Clone, Deserialize)]
pub struct NewCreditCard {
    /// Display name
    pub name: String,
    /// Statement closing day (1-31)
    pub closing_day: i32,
    /// Payment due day (1-31)
    pub due_day: i32,
    /// Optional limit in integer cents
    pub limit_cents: Option<i64>,
}

fn validate_day(label: &str, day: i32) -> Result<()> {
    if !(1..=31).contains(&day) {
        return Err(Error::validation(format!(
            "{label} must be between 1 and 31, got {day}"
        )));
    }
    Ok(())
}

/// Registers a card for `user_id`.
///
/// # Errors
/// Rejects closing/due days outside 1-31 and empty names.
pub async fn create_card(
    db: &DatabaseConnection,
    user_id: i64,
    input: NewCreditCard,
) -> Result<credit_card::Model> {
    let name = input.name.trim();
    if name.is_empty() {
        return Err(Error::validation("card name must not be empty"));
    }
    validate_day("closing day", input.closing_day)?;
    validate_day("due day", input.due_day)?;
    if let Some(limit) = input.limit_cents {
        if limit <= 0 {
            return Err(Error::InvalidAmount {
                amount_cents: limit,
            });
        }
    }

    credit_card::ActiveModel {
        user_id: Set(user_id),
        name: Set(name.to_string()),
        closing_day: Set(input.closing_day),
        due_day: Set(input.due_day),
        limit_cents: Set(input.limit_cents),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// All cards belonging to `user_id`, ordered by name.
pub async fn list_cards(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Vec<credit_card::Model>> {
    CreditCard::find()
        .filter(credit_card::Column::UserId.eq(user_id))
        .order_by_asc(credit_card::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Fetches one card, enforcing ownership. A card that exists but belongs
/// to another user is reported as not found.
pub async fn card_for_user(
    db: &DatabaseConnection,
    user_id: i64,
    card_id: i64,
) -> Result<credit_card::Model> {
    CreditCard::find_by_id(card_id)
        .one(db)
        .await?
        .filter(|card| card.user_id == user_id)
        .ok_or(Error::NotFound {
            entity: "credit card",
        })
}
