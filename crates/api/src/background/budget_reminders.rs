//! Monthly budget review reminders.
//!
//! On every tick the job finds active budgets whose reminder time has passed
//! and moves each reminder one month past the current time. The move is a
//! compare-and-set on the stored reminder, so two instances sharing a
//! database never advance the same budget twice for one due date.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use takeoff_core::budget::next_reminder_after;
use takeoff_core::types::Timestamp;
use takeoff_db::{BudgetStore, StoreError};
use tokio_util::sync::CancellationToken;

/// Run the reminder loop until `cancel` is triggered.
///
/// The first check happens immediately on start.
pub async fn run(budgets: Arc<dyn BudgetStore>, interval: Duration, cancel: CancellationToken) {
    tracing::info!(
        interval_secs = interval.as_secs(),
        "Budget reminder job started"
    );

    let mut interval = tokio::time::interval(interval);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Budget reminder job stopping");
                break;
            }
            _ = interval.tick() => {
                match process_due_reminders(budgets.as_ref(), Utc::now()).await {
                    Ok(0) => tracing::debug!("Budget reminders: nothing due"),
                    Ok(sent) => tracing::info!(sent, "Budget reminders: processed due budgets"),
                    Err(e) => tracing::error!(error = %e, "Budget reminders: check failed"),
                }
            }
        }
    }
}

/// Advance every reminder due at `now`. Returns how many this call advanced.
///
/// A budget whose reminder was moved by another writer in the meantime is
/// skipped.
pub async fn process_due_reminders(
    budgets: &dyn BudgetStore,
    now: Timestamp,
) -> Result<usize, StoreError> {
    let due = budgets.list_due(now).await?;
    let next = next_reminder_after(now);
    let mut advanced = 0;

    for budget in due {
        if budgets
            .advance_reminder(budget.id, budget.next_update_reminder, next)
            .await?
        {
            tracing::info!(
                id = budget.id,
                project = %budget.project_name,
                due = %budget.next_update_reminder,
                next = %next,
                "Budget review reminder due",
            );
            advanced += 1;
        } else {
            tracing::debug!(id = budget.id, "Budget reminder already advanced elsewhere");
        }
    }

    Ok(advanced)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use takeoff_core::budget::{BudgetStatus, TotalBudget};
    use takeoff_db::models::budget::{CreateBudget, UpdateBudget};
    use takeoff_db::MemoryStore;

    use super::*;

    fn at(year: i32, month: u32, day: u32) -> Timestamp {
        Utc.with_ymd_and_hms(year, month, day, 9, 0, 0).unwrap()
    }

    fn budget(name: &str) -> CreateBudget {
        CreateBudget {
            project_name: name.to_string(),
            total_budget: TotalBudget {
                amount: 500_000.0,
                currency: "INR".to_string(),
            },
            monthly_allocation: Vec::new(),
            categories: Vec::new(),
        }
    }

    #[tokio::test]
    async fn due_budget_is_advanced_once() {
        let store = MemoryStore::new();
        let created = store.create(&budget("Tower A"), at(2026, 3, 1)).await.unwrap();

        let now = at(2026, 4, 2);
        assert_eq!(process_due_reminders(&store, now).await.unwrap(), 1);
        assert_eq!(process_due_reminders(&store, now).await.unwrap(), 0);

        let stored = BudgetStore::find_by_id(&store, created.id).await.unwrap().unwrap();
        assert_eq!(stored.next_update_reminder, at(2026, 5, 2));
    }

    #[tokio::test]
    async fn future_and_archived_budgets_are_left_alone() {
        let store = MemoryStore::new();
        store.create(&budget("Not yet"), at(2026, 3, 20)).await.unwrap();
        let archived = store.create(&budget("Closed"), at(2026, 1, 1)).await.unwrap();
        let update = UpdateBudget {
            status: Some(BudgetStatus::Archived),
            ..UpdateBudget::default()
        };
        store.update(archived.id, &update, at(2026, 1, 2)).await.unwrap();

        assert_eq!(process_due_reminders(&store, at(2026, 4, 2)).await.unwrap(), 0);
    }
}
