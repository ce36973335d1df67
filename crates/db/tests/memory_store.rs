//! Behaviour of the in-memory store, which backs the API tests and
//! database-less development.

use chrono::{Duration, TimeZone, Utc};
use serde_json::json;
use takeoff_core::budget::{BudgetStatus, TotalBudget};
use takeoff_core::structural::ElementKind;
use takeoff_db::models::budget::{CreateBudget, UpdateBudget};
use takeoff_db::models::calculation::NewCalculation;
use takeoff_db::models::earthwork::NewEarthwork;
use takeoff_db::{BudgetStore, CalculationStore, EarthworkStore, MemoryStore};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn calculation(kind: ElementKind, n: i64) -> NewCalculation {
    NewCalculation {
        element_type: kind,
        input: json!({ "type": kind.as_str(), "n": n }),
        result: json!({ "n": n }),
    }
}

fn new_budget(name: &str) -> CreateBudget {
    CreateBudget {
        project_name: name.to_string(),
        total_budget: TotalBudget {
            amount: 1_000_000.0,
            currency: "INR".to_string(),
        },
        monthly_allocation: Vec::new(),
        categories: Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Calculations
// ---------------------------------------------------------------------------

#[tokio::test]
async fn history_is_newest_first_and_capped() {
    let store = MemoryStore::new();
    let calcs: &dyn CalculationStore = &store;
    for n in 0..15 {
        calcs.insert(calculation(ElementKind::Beam, n)).await.unwrap();
    }

    let recent = calcs.list_recent(None, 10).await.unwrap();
    assert_eq!(recent.len(), 10);
    let ns: Vec<i64> = recent.iter().map(|r| r.result["n"].as_i64().unwrap()).collect();
    assert_eq!(ns, (5..15).rev().collect::<Vec<_>>());
}

#[tokio::test]
async fn history_filters_by_element_type() {
    let store = MemoryStore::new();
    let calcs: &dyn CalculationStore = &store;
    calcs.insert(calculation(ElementKind::Beam, 1)).await.unwrap();
    calcs.insert(calculation(ElementKind::Column, 2)).await.unwrap();
    calcs.insert(calculation(ElementKind::Beam, 3)).await.unwrap();

    let beams = calcs.list_recent(Some(ElementKind::Beam), 10).await.unwrap();
    assert_eq!(beams.len(), 2);
    assert!(beams.iter().all(|r| r.element_type == ElementKind::Beam));
    assert_eq!(calcs.list_recent(Some(ElementKind::Slab), 10).await.unwrap(), vec![]);
}

#[tokio::test]
async fn find_by_id_respects_element_type() {
    let store = MemoryStore::new();
    let calcs: &dyn CalculationStore = &store;
    let beam = calcs.insert(calculation(ElementKind::Beam, 1)).await.unwrap();

    let found = calcs.find_by_id(beam.id, None).await.unwrap().unwrap();
    assert_eq!(found, beam);
    assert!(calcs
        .find_by_id(beam.id, Some(ElementKind::Beam))
        .await
        .unwrap()
        .is_some());
    assert!(calcs
        .find_by_id(beam.id, Some(ElementKind::Column))
        .await
        .unwrap()
        .is_none());
    assert!(calcs.find_by_id(9_999, None).await.unwrap().is_none());
}

// ---------------------------------------------------------------------------
// Budgets
// ---------------------------------------------------------------------------

#[tokio::test]
async fn create_schedules_first_reminder_a_month_out() {
    let store = MemoryStore::new();
    let budgets: &dyn BudgetStore = &store;
    let now = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();

    let budget = budgets.create(&new_budget("Tower A"), now).await.unwrap();
    assert_eq!(budget.status, BudgetStatus::Active);
    assert_eq!(
        budget.next_update_reminder,
        Utc.with_ymd_and_hms(2026, 4, 10, 12, 0, 0).unwrap()
    );
    assert_eq!(budget.last_updated, now);
    assert_eq!(budgets.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn partial_update_keeps_absent_fields() {
    let store = MemoryStore::new();
    let budgets: &dyn BudgetStore = &store;
    let now = Utc::now();
    let created = budgets.create(&new_budget("Tower A"), now).await.unwrap();

    let later = now + Duration::minutes(5);
    let changes = UpdateBudget {
        status: Some(BudgetStatus::Archived),
        ..Default::default()
    };
    let updated = budgets.update(created.id, &changes, later).await.unwrap().unwrap();

    assert_eq!(updated.project_name, "Tower A");
    assert_eq!(updated.total_budget, created.total_budget);
    assert_eq!(updated.status, BudgetStatus::Archived);
    assert_eq!(updated.last_updated, later);
    assert!(budgets.update(9_999, &changes, later).await.unwrap().is_none());
}

#[tokio::test]
async fn advance_reminder_is_compare_and_set() {
    let store = MemoryStore::new();
    let budgets: &dyn BudgetStore = &store;
    let now = Utc::now();
    let budget = budgets.create(&new_budget("Tower A"), now).await.unwrap();

    let due_at = budget.next_update_reminder;
    let next = due_at + Duration::days(31);
    assert!(budgets.advance_reminder(budget.id, due_at, next).await.unwrap());
    // A second delivery still holding the old value loses.
    assert!(!budgets.advance_reminder(budget.id, due_at, next).await.unwrap());

    let stored = budgets.find_by_id(budget.id).await.unwrap().unwrap();
    assert_eq!(stored.next_update_reminder, next);
}

#[tokio::test]
async fn list_due_skips_future_and_archived() {
    let store = MemoryStore::new();
    let budgets: &dyn BudgetStore = &store;
    let created_at = Utc.with_ymd_and_hms(2026, 1, 5, 0, 0, 0).unwrap();
    let due = budgets.create(&new_budget("Due"), created_at).await.unwrap();
    let archived = budgets.create(&new_budget("Archived"), created_at).await.unwrap();
    budgets
        .update(
            archived.id,
            &UpdateBudget {
                status: Some(BudgetStatus::Archived),
                ..Default::default()
            },
            created_at,
        )
        .await
        .unwrap();
    budgets
        .create(&new_budget("Future"), created_at + Duration::days(60))
        .await
        .unwrap();

    let now = Utc.with_ymd_and_hms(2026, 2, 20, 0, 0, 0).unwrap();
    let listed = budgets.list_due(now).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, due.id);
}

// ---------------------------------------------------------------------------
// Earthworks
// ---------------------------------------------------------------------------

#[tokio::test]
async fn earthworks_list_newest_first() {
    let store = MemoryStore::new();
    let earthworks: &dyn EarthworkStore = &store;
    for section in ["Basement", "Footings"] {
        earthworks
            .insert(NewEarthwork {
                project_section: section.to_string(),
                input: json!({}),
                result: json!({}),
            })
            .await
            .unwrap();
    }

    let listed = earthworks.list().await.unwrap();
    assert_eq!(listed[0].project_section, "Footings");
    assert_eq!(listed[1].project_section, "Basement");
    assert!(earthworks.find_by_id(listed[1].id).await.unwrap().is_some());
}
