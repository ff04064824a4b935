//! Badge rules and idempotent awarding.
//!
//! Each badge is a predicate over the user's data. `refresh_badges`
//! evaluates all rules, awards what is newly earned, and reports only the
//! new awards; re-running it never duplicates a badge. Badges are never
//! revoked, even if the underlying condition stops holding.

use crate::entities::{
    Budget, RecurringTransaction, Transaction, User, UserBadge, budget, recurring_transaction,
    transaction, user, user_badge,
};
use crate::errors::Result;
use chrono::Utc;
use sea_orm::{DatabaseConnection, PaginatorTrait, QueryOrder, Set, prelude::*};
use serde::Serialize;

/// A badge definition: stable code plus display copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BadgeSpec {
    /// Stable identifier stored in the database
    pub code: &'static str,
    /// Display title
    pub title: &'static str,
    /// What the badge rewards
    pub description: &'static str,
}

/// Every badge the system can award.
pub const BADGES: &[BadgeSpec] = &[
    BadgeSpec {
        code: "first-steps",
        title: "Primeiros Passos",
        description: "Registered the first transaction",
    },
    BadgeSpec {
        code: "ledger-keeper",
        title: "Caderninho em Dia",
        description: "Registered ten transactions",
    },
    BadgeSpec {
        code: "planner",
        title: "Planejadora",
        description: "Set the first monthly budget",
    },
    BadgeSpec {
        code: "autopilot",
        title: "Piloto Automático",
        description: "Created the first recurring bill",
    },
    BadgeSpec {
        code: "better-together",
        title: "Melhor a Dois",
        description: "Linked a partner account",
    },
    BadgeSpec {
        code: "slicer",
        title: "Parcelado Sem Medo",
        description: "Split the first installment purchase",
    },
];

async fn rule_holds(db: &DatabaseConnection, user_id: i64, code: &str) -> Result<bool> {
    let holds = match code {
        "first-steps" => {
            Transaction::find()
                .filter(transaction::Column::UserId.eq(user_id))
                .count(db)
                .await?
                >= 1
        }
        "ledger-keeper" => {
            Transaction::find()
                .filter(transaction::Column::UserId.eq(user_id))
                .count(db)
                .await?
                >= 10
        }
        "planner" => {
            Budget::find()
                .filter(budget::Column::UserId.eq(user_id))
                .count(db)
                .await?
                >= 1
        }
        "autopilot" => {
            RecurringTransaction::find()
                .filter(recurring_transaction::Column::UserId.eq(user_id))
                .count(db)
                .await?
                >= 1
        }
        "better-together" => User::find_by_id(user_id)
            .one(db)
            .await?
            .and_then(|u| u.partner_id)
            .is_some(),
        "slicer" => {
            Transaction::find()
                .filter(transaction::Column::UserId.eq(user_id))
                .filter(transaction::Column::InstallmentGroup.is_not_null())
                .count(db)
                .await?
                >= 1
        }
        _ => false,
    };
    Ok(holds)
}

/// Badges the user currently holds, in award order.
pub async fn list_badges(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Vec<user_badge::Model>> {
    UserBadge::find()
        .filter(user_badge::Column::UserId.eq(user_id))
        .order_by_asc(user_badge::Column::AwardedAt)
        .order_by_asc(user_badge::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Evaluates every badge rule and awards what is missing. Returns the
/// codes awarded by THIS call; already-held badges are skipped.
pub async fn refresh_badges(db: &DatabaseConnection, user_id: i64) -> Result<Vec<&'static str>> {
    let held: Vec<String> = list_badges(db, user_id)
        .await?
        .into_iter()
        .map(|b| b.code)
        .collect();

    let mut awarded = Vec::new();
    for spec in BADGES {
        if held.iter().any(|code| code == spec.code) {
            continue;
        }
        if rule_holds(db, user_id, spec.code).await? {
            user_badge::ActiveModel {
                user_id: Set(user_id),
                code: Set(spec.code.to_string()),
                awarded_at: Set(Utc::now()),
                ..Default::default()
            }
            .insert(db)
            .await?;
            awarded.push(spec.code);
        }
    }
    Ok(awarded)
}
