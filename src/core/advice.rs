//! Financial-advice chat.
//!
//! The prompt sent to the advice model is built deterministically from the
//! user's monthly snapshot (summary totals plus budget progress), so the
//! same ledger always produces the same prompt. Both sides of every
//! exchange are stored as chat history.

use crate::core::budget::{BudgetProgress, list_budget_progress};
use crate::core::money::format_brl;
use crate::core::transaction::{MonthlySummary, monthly_summary};
use crate::entities::{ChatMessage, chat_message};
use crate::errors::{Error, Result};
use crate::services::Advisor;
use chrono::{NaiveDate, Utc};
use sea_orm::{DatabaseConnection, QueryOrder, Set, prelude::*};
use std::fmt::Write as _;
use std::sync::Arc;

/// Role stored for messages written by the user.
pub const ROLE_USER: &str = "user";
/// Role stored for advisor replies.
pub const ROLE_ASSISTANT: &str = "assistant";

/// Everything the prompt is rendered from.
#[derive(Debug, Clone)]
pub struct FinancialSnapshot {
    /// The month's aggregate totals
    pub summary: MonthlySummary,
    /// Budget progress for the same month
    pub budgets: Vec<BudgetProgress>,
}

/// Loads the snapshot for the month containing `month`.
pub async fn build_snapshot(
    db: &DatabaseConnection,
    user_id: i64,
    month: NaiveDate,
) -> Result<FinancialSnapshot> {
    Ok(FinancialSnapshot {
        summary: monthly_summary(db, user_id, month).await?,
        budgets: list_budget_progress(db, user_id, month).await?,
    })
}

/// Renders the advice prompt: snapshot bullet lines followed by the
/// user's question.
#[must_use]
pub fn build_prompt(snapshot: &FinancialSnapshot, question: &str) -> String {
    let mut prompt = String::from(
        "Você é um consultor financeiro de um casal. Contexto do mês:\n",
    );
    let summary = &snapshot.summary;
    let _ = writeln!(prompt, "- receitas: {}", format_brl(summary.income_cents));
    let _ = writeln!(prompt, "- despesas: {}", format_brl(summary.expense_cents));
    let _ = writeln!(
        prompt,
        "- investimentos: {}",
        format_brl(summary.investment_cents)
    );
    for spend in &summary.by_category {
        let _ = writeln!(
            prompt,
            "- gasto em {}: {}",
            spend.category,
            format_brl(spend.spent_cents)
        );
    }
    for budget in &snapshot.budgets {
        let status = if budget.over_budget {
            "estourado"
        } else {
            "dentro do limite"
        };
        let _ = writeln!(
            prompt,
            "- orçamento de {}: {} de {} ({status})",
            budget.category,
            format_brl(budget.spent_cents),
            format_brl(budget.limit_cents)
        );
    }
    let _ = write!(prompt, "\nPergunta: {question}");
    prompt
}

/// Handles one chat turn: stores the user message, asks the advisor, and
/// stores and returns the reply.
///
/// # Errors
/// Rejects empty messages; advisor failures surface as internal errors
/// after the user message was stored (history keeps the question).
pub async fn send_message(
    db: &DatabaseConnection,
    advisor: Arc<dyn Advisor>,
    user_id: i64,
    content: &str,
    today: NaiveDate,
) -> Result<chat_message::Model> {
    let content = content.trim();
    if content.is_empty() {
        return Err(Error::validation("message must not be empty"));
    }

    chat_message::ActiveModel {
        user_id: Set(user_id),
        role: Set(ROLE_USER.to_string()),
        content: Set(content.to_string()),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let snapshot = build_snapshot(db, user_id, today).await?;
    let prompt = build_prompt(&snapshot, content);
    let reply = advisor.complete(&prompt).await?;

    chat_message::ActiveModel {
        user_id: Set(user_id),
        role: Set(ROLE_ASSISTANT.to_string()),
        content: Set(reply),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(Into::into)
}

/// Full conversation for `user_id`, oldest first.
pub async fn history(
    db: &DatabaseConnection,
    user_id: i64,
) -> Result<Vec<chat_message::Model>> {
    ChatMessage::find()
        .filter(chat_message::Column::UserId.eq(user_id))
        .order_by_asc(chat_message::Column::CreatedAt)
        .order_by_asc(chat_message::Column::Id)
        .all(db)
        .await
        .map_err(Into::into)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::budget::{NewBudget, upsert_budget};
    use crate::entities::TransactionKind;
    use crate::test_utils::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[tokio::test]
    async fn test_prompt_is_deterministic_and_complete() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = create_test_user(&db, "ana@example.com").await?;
        create_test_transaction(&db, owner.id, TransactionKind::Income, 500_000, "salary", d(2025, 6, 5)).await?;
        create_test_transaction(&db, owner.id, TransactionKind::Expense, 120_000, "rent", d(2025, 6, 5)).await?;
        upsert_budget(
            &db,
            owner.id,
            NewBudget {
                category: "rent".to_string(),
                month: d(2025, 6, 1),
                limit_cents: 100_000,
            },
        )
        .await?;

        let snapshot = build_snapshot(&db, owner.id, d(2025, 6, 1)).await?;
        let prompt = build_prompt(&snapshot, "como reduzir gastos?");

        assert!(prompt.contains("- receitas: R$ 5.000,00"));
        assert!(prompt.contains("- despesas: R$ 1.200,00"));
        assert!(prompt.contains("- gasto em rent: R$ 1.200,00"));
        assert!(prompt.contains("estourado"));
        assert!(prompt.ends_with("Pergunta: como reduzir gastos?"));

        // Same ledger, same prompt
        let snapshot2 = build_snapshot(&db, owner.id, d(2025, 6, 1)).await?;
        assert_eq!(prompt, build_prompt(&snapshot2, "como reduzir gastos?"));
        Ok(())
    }

    #[tokio::test]
    async fn test_send_message_stores_both_turns() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = create_test_user(&db, "ana@example.com").await?;
        let advisor = Arc::new(CannedAdvisor("Guardem 10% todo mês."));

        let reply =
            send_message(&db, advisor, owner.id, "como investir?", d(2025, 6, 1)).await?;
        assert_eq!(reply.role, ROLE_ASSISTANT);
        assert_eq!(reply.content, "Guardem 10% todo mês.");

        let turns = history(&db, owner.id).await?;
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].role, ROLE_USER);
        assert_eq!(turns[0].content, "como investir?");
        assert_eq!(turns[1].role, ROLE_ASSISTANT);
        Ok(())
    }

    #[tokio::test]
    async fn test_send_message_rejects_empty() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = create_test_user(&db, "ana@example.com").await?;
        let advisor = Arc::new(CannedAdvisor("..."));

        assert!(send_message(&db, advisor, owner.id, "   ", d(2025, 6, 1))
            .await
            .is_err());
        assert!(history(&db, owner.id).await?.is_empty());
        Ok(())
    }
}
