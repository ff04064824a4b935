//! Collaborator seams: outbound notification and advice completion.
//!
//! The email-delivery and AI-completion services are external black boxes.
//! They enter the application as trait objects so the core logic stays
//! testable offline; the default implementations here log reminders via
//! `tracing` and render deterministic advice prose. Swapping in real
//! clients means implementing these two traits, nothing else changes.

use crate::core::money::format_brl;
use crate::errors::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::info;

/// One upcoming bill, as carried in a reminder notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillReminder {
    /// Bill description, e.g. "Internet"
    pub description: String,
    /// Bill amount in integer cents
    pub amount_cents: i64,
    /// Date the bill is due
    pub due_date: NaiveDate,
}

/// Outbound notification delivery.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends one recipient their list of upcoming bills. Failures are the
    /// caller's to isolate; the rollover pass never propagates them.
    async fn send_bill_reminders(&self, recipient: &str, reminders: &[BillReminder])
        -> Result<()>;
}

/// Default notifier: logs the reminder instead of delivering it.
#[derive(Debug, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_bill_reminders(
        &self,
        recipient: &str,
        reminders: &[BillReminder],
    ) -> Result<()> {
        for reminder in reminders {
            info!(
                recipient,
                description = %reminder.description,
                amount = %format_brl(reminder.amount_cents),
                due = %reminder.due_date,
                "bill reminder"
            );
        }
        Ok(())
    }
}

/// Generative text completion for the advice chat.
#[async_trait]
pub trait Advisor: Send + Sync {
    /// Produces advice prose for a fully built prompt.
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// Default advisor: renders deterministic prose from the snapshot lines
/// already present in the prompt. Keeps the chat functional offline.
#[derive(Debug, Default)]
pub struct TemplateAdvisor;

#[async_trait]
impl Advisor for TemplateAdvisor {
    async fn complete(&self, prompt: &str) -> Result<String> {
        // The prompt ends with the user's question; echo the snapshot
        // section back as a plain recommendation.
        let snapshot: Vec<&str> = prompt
            .lines()
            .filter(|line| line.starts_with("- "))
            .collect();

        let mut reply = String::from(
            "Aqui está um resumo da situação financeira de vocês:\n",
        );
        for line in &snapshot {
            reply.push_str(line);
            reply.push('\n');
        }
        reply.push_str(
            "Mantenham os gastos por categoria dentro dos limites definidos \
             e revisem as contas recorrentes todo mês.",
        );
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_log_notifier_always_succeeds() {
        let notifier = LogNotifier;
        let reminders = vec![BillReminder {
            description: "Internet".to_string(),
            amount_cents: 9_990,
            due_date: NaiveDate::from_ymd_opt(2025, 7, 5).unwrap(),
        }];
        assert!(notifier
            .send_bill_reminders("ana@example.com", &reminders)
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_template_advisor_echoes_snapshot() {
        let advisor = TemplateAdvisor;
        let prompt = "Contexto:\n- receitas: R$ 5.000,00\n- despesas: R$ 3.200,00\n\nPergunta: como estamos?";
        let reply = advisor.complete(prompt).await.unwrap();
        assert!(reply.contains("R$ 5.000,00"));
        assert!(reply.contains("R$ 3.200,00"));
    }
}
