//! The periodic recurring-bill rollover pass.
//!
//! Planning is a pure function over the loaded templates and an explicit
//! "today", so every date decision is deterministic under test. Execution
//! persists all projected entries and template pointer updates in ONE
//! database transaction, then fans out per-recipient bill reminders as
//! independent tasks: delivery failures are logged and swallowed, they
//! never roll back the write or block other recipients.

use crate::core::dates::next_month_anchored;
use crate::entities::{
    RecurringTransaction, RecurringTransactionModel, TransactionKind, User, recurring_transaction,
    transaction, user,
};
use crate::errors::Result;
use crate::services::{BillReminder, Notifier};
use chrono::{Days, NaiveDate, Utc};
use sea_orm::{DatabaseConnection, Set, TransactionTrait, prelude::*};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// Upper bound on occurrences materialized per template in one pass.
/// Protects against runaway loops on misconfigured templates (e.g. a
/// `next_run` years in the past).
pub const ITERATION_CAP: u32 = 12;

/// One occurrence a template projects into the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedEntry {
    /// Template that produced this occurrence
    pub template_id: i64,
    /// Owner of the generated entry
    pub user_id: i64,
    /// Kind copied from the template
    pub kind: TransactionKind,
    /// Amount in integer cents
    pub amount_cents: i64,
    /// Description copied from the template
    pub description: String,
    /// Category copied from the template
    pub category: String,
    /// Date of the occurrence
    pub date: NaiveDate,
}

/// A template's advanced `next_run` pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemplateAdvance {
    /// Template to update
    pub template_id: i64,
    /// New next-run date, first occurrence past the window
    pub next_run: NaiveDate,
}

/// Everything one rollover pass intends to write.
#[derive(Debug, Default)]
pub struct RolloverPlan {
    /// Ledger entries to create, all unpaid and future/current dated
    pub entries: Vec<ProjectedEntry>,
    /// Pointer updates, one per template that produced entries
    pub advances: Vec<TemplateAdvance>,
}

/// Summary counts reported back to the trigger caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct RolloverSummary {
    /// Number of ledger entries created
    pub created: usize,
    /// Number of recipients a reminder delivery was attempted for
    pub notified: usize,
}

/// Plans one rollover pass. Pure: takes "today" explicitly and touches no
/// clock or database.
///
/// For each active template whose `next_run` falls inside the lookahead
/// window, occurrences are emitted month by month (snapped to the anchor
/// day, clamped in short months) until the cursor leaves the window or
/// [`ITERATION_CAP`] is reached. The template's pointer advances to the
/// first date past the last emitted occurrence.
#[must_use]
pub fn plan_rollover(
    templates: &[RecurringTransactionModel],
    today: NaiveDate,
    window_days: u32,
) -> RolloverPlan {
    let limit = today
        .checked_add_days(Days::new(u64::from(window_days)))
        .unwrap_or(today);

    let mut plan = RolloverPlan::default();
    for template in templates {
        if !template.active || template.next_run > limit {
            continue;
        }

        let anchor_day = template.day_of_month.clamp(1, 31) as u32;
        let mut cursor = template.next_run;
        let mut iterations = 0u32;

        while cursor <= limit && iterations < ITERATION_CAP {
            plan.entries.push(ProjectedEntry {
                template_id: template.id,
                user_id: template.user_id,
                kind: template.kind,
                amount_cents: template.amount_cents,
                description: template.description.clone(),
                category: template.category.clone(),
                date: cursor,
            });
            cursor = next_month_anchored(cursor, anchor_day);
            iterations += 1;
        }

        if iterations > 0 {
            plan.advances.push(TemplateAdvance {
                template_id: template.id,
                next_run: cursor,
            });
        }
    }
    plan
}

/// Runs one rollover pass: loads due templates, persists the plan in a
/// single transaction, then attempts reminder delivery per recipient.
///
/// When zero templates are due, no write occurs at all and the summary
/// reports zeros.
///
/// # Errors
/// Any load or persistence error aborts the whole pass; the transaction
/// guarantees no partial write. Notification failures are NOT errors.
pub async fn run_rollover(
    db: &DatabaseConnection,
    notifier: Arc<dyn Notifier>,
    today: NaiveDate,
    window_days: u32,
) -> Result<RolloverSummary> {
    let limit = today
        .checked_add_days(Days::new(u64::from(window_days)))
        .unwrap_or(today);

    let templates = RecurringTransaction::find()
        .filter(recurring_transaction::Column::Active.eq(true))
        .filter(recurring_transaction::Column::NextRun.lte(limit))
        .all(db)
        .await?;

    if templates.is_empty() {
        info!(%today, "rollover: no templates due");
        return Ok(RolloverSummary::default());
    }

    let plan = plan_rollover(&templates, today, window_days);

    // All generated entries and pointer updates land atomically
    let txn = db.begin().await?;
    let now = Utc::now();
    for entry in &plan.entries {
        transaction::ActiveModel {
            user_id: Set(entry.user_id),
            kind: Set(entry.kind),
            amount_cents: Set(entry.amount_cents),
            description: Set(entry.description.clone()),
            category: Set(entry.category.clone()),
            date: Set(entry.date),
            is_paid: Set(false),
            created_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
    }
    let by_id: HashMap<i64, &RecurringTransactionModel> =
        templates.iter().map(|t| (t.id, t)).collect();
    for advance in &plan.advances {
        if let Some(template) = by_id.get(&advance.template_id) {
            let mut active: recurring_transaction::ActiveModel = (*template).clone().into();
            active.next_run = Set(advance.next_run);
            active.update(&txn).await?;
        }
    }
    txn.commit().await?;

    let notified = notify_upcoming_bills(db, notifier, &plan).await?;

    let summary = RolloverSummary {
        created: plan.entries.len(),
        notified,
    };
    info!(
        created = summary.created,
        notified = summary.notified,
        %today,
        "rollover pass complete"
    );
    Ok(summary)
}

/// Fans reminders out per recipient and waits for all attempts. Each
/// recipient's failure is logged and ignored; the count of attempts is
/// returned.
async fn notify_upcoming_bills(
    db: &DatabaseConnection,
    notifier: Arc<dyn Notifier>,
    plan: &RolloverPlan,
) -> Result<usize> {
    let mut per_user: HashMap<i64, Vec<BillReminder>> = HashMap::new();
    for entry in &plan.entries {
        per_user.entry(entry.user_id).or_default().push(BillReminder {
            description: entry.description.clone(),
            amount_cents: entry.amount_cents,
            due_date: entry.date,
        });
    }
    if per_user.is_empty() {
        return Ok(0);
    }

    let user_ids: Vec<i64> = per_user.keys().copied().collect();
    let users = User::find()
        .filter(user::Column::Id.is_in(user_ids))
        .all(db)
        .await?;

    let mut tasks = JoinSet::new();
    let mut attempted = 0usize;
    for recipient in users {
        if let Some(reminders) = per_user.remove(&recipient.id) {
            let notifier = Arc::clone(&notifier);
            let email = recipient.email;
            attempted += 1;
            tasks.spawn(async move {
                let outcome = notifier.send_bill_reminders(&email, &reminders).await;
                (email, outcome)
            });
        }
    }

    // Wait for all; a dropped reminder is not escalated
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((_, Ok(()))) => {}
            Ok((email, Err(err))) => {
                warn!(recipient = %email, error = %err, "bill reminder delivery failed");
            }
            Err(join_err) => {
                warn!(error = %join_err, "bill reminder task panicked");
            }
        }
    }

    Ok(attempted)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::test_utils::*;
    use sea_orm::EntityTrait;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn template(id: i64, next_run: NaiveDate, day_of_month: i32) -> RecurringTransactionModel {
        RecurringTransactionModel {
            id,
            user_id: 1,
            kind: TransactionKind::Expense,
            amount_cents: 9_990,
            description: "Internet".to_string(),
            category: "utilities".to_string(),
            day_of_month,
            next_run,
            active: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_plan_outside_window_is_untouched() {
        let today = d(2025, 6, 10);
        // Due 8 days out, window is 7: nothing happens
        let templates = vec![template(1, d(2025, 6, 18), 18)];
        let plan = plan_rollover(&templates, today, 7);
        assert!(plan.entries.is_empty());
        assert!(plan.advances.is_empty());
    }

    #[test]
    fn test_plan_single_occurrence_advances_past_window() {
        let today = d(2025, 6, 10);
        let templates = vec![template(1, d(2025, 6, 15), 15)];
        let plan = plan_rollover(&templates, today, 7);

        assert_eq!(plan.entries.len(), 1);
        assert_eq!(plan.entries[0].date, d(2025, 6, 15));
        assert_eq!(plan.advances, vec![TemplateAdvance {
            template_id: 1,
            next_run: d(2025, 7, 15),
        }]);
    }

    #[test]
    fn test_plan_overdue_template_catches_up() {
        // Three months behind: occurrences for Mar, Apr, May, Jun all fall
        // inside the window; created count equals iterations executed
        let today = d(2025, 6, 10);
        let templates = vec![template(1, d(2025, 3, 12), 12)];
        let plan = plan_rollover(&templates, today, 7);

        let dates: Vec<NaiveDate> = plan.entries.iter().map(|e| e.date).collect();
        assert_eq!(
            dates,
            vec![d(2025, 3, 12), d(2025, 4, 12), d(2025, 5, 12), d(2025, 6, 12)]
        );
        assert_eq!(plan.advances[0].next_run, d(2025, 7, 12));
    }

    #[test]
    fn test_plan_iteration_cap() {
        // Two years behind: the pass materializes at most 12 occurrences
        let today = d(2025, 6, 10);
        let templates = vec![template(1, d(2023, 6, 1), 1)];
        let plan = plan_rollover(&templates, today, 7);

        assert_eq!(plan.entries.len(), ITERATION_CAP as usize);
        assert_eq!(plan.entries.last().unwrap().date, d(2024, 5, 1));
        // Pointer parks after the last emitted occurrence; the next pass
        // continues the catch-up
        assert_eq!(plan.advances[0].next_run, d(2024, 6, 1));
    }

    #[test]
    fn test_plan_clamps_short_months() {
        // Day-31 anchor: Jan 31 -> Feb 28 -> Mar 31 -> Apr 30
        let today = d(2025, 1, 31);
        let templates = vec![template(1, d(2025, 1, 31), 31)];
        let plan = plan_rollover(&templates, today, 7);
        assert_eq!(plan.entries.len(), 1);
        assert_eq!(plan.advances[0].next_run, d(2025, 2, 28));

        let plan2 = plan_rollover(&[template(1, d(2025, 2, 28), 31)], d(2025, 2, 25), 7);
        assert_eq!(plan2.advances[0].next_run, d(2025, 3, 31));
    }

    #[test]
    fn test_plan_skips_inactive() {
        let today = d(2025, 6, 10);
        let mut inactive = template(1, d(2025, 6, 11), 11);
        inactive.active = false;
        let plan = plan_rollover(&[inactive], today, 7);
        assert!(plan.entries.is_empty());
    }

    #[tokio::test]
    async fn test_run_rollover_persists_atomically() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = create_test_user(&db, "ana@example.com").await?;
        let tpl =
            create_test_recurring(&db, owner.id, 9_990, 15, d(2025, 6, 15)).await?;

        let notifier = RecordingNotifier::succeeding();
        let summary =
            run_rollover(&db, notifier.clone_arc(), d(2025, 6, 10), 7).await?;

        assert_eq!(summary, RolloverSummary { created: 1, notified: 1 });

        // Entry landed unpaid on the projected date
        let entries = crate::entities::Transaction::find().all(&db).await?;
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].date, d(2025, 6, 15));
        assert!(!entries[0].is_paid);
        assert_eq!(entries[0].amount_cents, 9_990);

        // Pointer advanced past the window
        let updated = RecurringTransaction::find_by_id(tpl.id)
            .one(&db)
            .await?
            .unwrap();
        assert_eq!(updated.next_run, d(2025, 7, 15));

        // The recipient got exactly one reminder batch
        assert_eq!(notifier.deliveries(), vec![("ana@example.com".to_string(), 1)]);
        Ok(())
    }

    #[tokio::test]
    async fn test_run_rollover_nothing_due_writes_nothing() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = create_test_user(&db, "ana@example.com").await?;
        let tpl =
            create_test_recurring(&db, owner.id, 9_990, 25, d(2025, 6, 25)).await?;

        let notifier = RecordingNotifier::succeeding();
        let summary =
            run_rollover(&db, notifier.clone_arc(), d(2025, 6, 10), 7).await?;

        assert_eq!(summary, RolloverSummary::default());
        assert!(crate::entities::Transaction::find().all(&db).await?.is_empty());
        let untouched = RecurringTransaction::find_by_id(tpl.id)
            .one(&db)
            .await?
            .unwrap();
        assert_eq!(untouched.next_run, d(2025, 6, 25));
        assert!(notifier.deliveries().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_run_rollover_notifier_failure_is_isolated() -> Result<()> {
        let db = setup_test_db().await?;
        let ana = create_test_user(&db, "ana@example.com").await?;
        let bia = create_test_user(&db, "bia@example.com").await?;
        create_test_recurring(&db, ana.id, 5_000, 12, d(2025, 6, 12)).await?;
        create_test_recurring(&db, bia.id, 7_000, 13, d(2025, 6, 13)).await?;

        // Every delivery fails; the pass still succeeds and still counts
        // both attempts, and the database write stands
        let notifier = RecordingNotifier::failing();
        let summary =
            run_rollover(&db, notifier.clone_arc(), d(2025, 6, 10), 7).await?;

        assert_eq!(summary, RolloverSummary { created: 2, notified: 2 });
        assert_eq!(crate::entities::Transaction::find().all(&db).await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_run_rollover_groups_reminders_per_recipient() -> Result<()> {
        let db = setup_test_db().await?;
        let owner = create_test_user(&db, "ana@example.com").await?;
        create_test_recurring(&db, owner.id, 5_000, 11, d(2025, 6, 11)).await?;
        create_test_recurring(&db, owner.id, 7_000, 14, d(2025, 6, 14)).await?;

        let notifier = RecordingNotifier::succeeding();
        let summary =
            run_rollover(&db, notifier.clone_arc(), d(2025, 6, 10), 7).await?;

        // Two entries, one recipient, one delivery with two bills
        assert_eq!(summary, RolloverSummary { created: 2, notified: 1 });
        assert_eq!(notifier.deliveries(), vec![("ana@example.com".to_string(), 2)]);
        Ok(())
    }
}
