use async_trait::async_trait;
use chrono::Utc;
use takeoff_core::budget::{is_reminder_due, next_reminder_after, BudgetStatus};
use takeoff_core::structural::ElementKind;
use takeoff_core::types::{DbId, Timestamp};
use tokio::sync::RwLock;

use super::{BudgetStore, CalculationStore, EarthworkStore, StoreError};
use crate::models::budget::{Budget, CreateBudget, UpdateBudget};
use crate::models::calculation::{CalculationRecord, NewCalculation};
use crate::models::earthwork::{Earthwork, NewEarthwork};

#[derive(Debug, Default)]
struct Tables {
    next_id: DbId,
    calculations: Vec<CalculationRecord>,
    budgets: Vec<Budget>,
    earthworks: Vec<Earthwork>,
}

impl Tables {
    fn allocate_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }
}

/// In-process store. Records are kept in insertion order, so iterating in
/// reverse yields newest first. Ids are shared across tables.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CalculationStore for MemoryStore {
    async fn insert(&self, new: NewCalculation) -> Result<CalculationRecord, StoreError> {
        let mut tables = self.tables.write().await;
        let record = CalculationRecord {
            id: tables.allocate_id(),
            element_type: new.element_type,
            input: new.input,
            result: new.result,
            created_at: Utc::now(),
        };
        tables.calculations.push(record.clone());
        Ok(record)
    }

    async fn list_recent(
        &self,
        kind: Option<ElementKind>,
        limit: i64,
    ) -> Result<Vec<CalculationRecord>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .calculations
            .iter()
            .rev()
            .filter(|r| kind.map_or(true, |k| r.element_type == k))
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect())
    }

    async fn find_by_id(
        &self,
        id: DbId,
        kind: Option<ElementKind>,
    ) -> Result<Option<CalculationRecord>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .calculations
            .iter()
            .find(|r| r.id == id && kind.map_or(true, |k| r.element_type == k))
            .cloned())
    }
}

#[async_trait]
impl BudgetStore for MemoryStore {
    async fn create(&self, dto: &CreateBudget, now: Timestamp) -> Result<Budget, StoreError> {
        let mut tables = self.tables.write().await;
        let budget = Budget {
            id: tables.allocate_id(),
            project_name: dto.project_name.trim().to_string(),
            total_budget: dto.total_budget.clone(),
            monthly_allocation: dto.allocations(),
            categories: dto.categories.clone(),
            status: BudgetStatus::Active,
            next_update_reminder: next_reminder_after(now),
            last_updated: now,
            created_at: now,
        };
        tables.budgets.push(budget.clone());
        Ok(budget)
    }

    async fn list(&self) -> Result<Vec<Budget>, StoreError> {
        Ok(self.tables.read().await.budgets.clone())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Budget>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.budgets.iter().find(|b| b.id == id).cloned())
    }

    async fn update(
        &self,
        id: DbId,
        dto: &UpdateBudget,
        now: Timestamp,
    ) -> Result<Option<Budget>, StoreError> {
        let mut tables = self.tables.write().await;
        let Some(budget) = tables.budgets.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        dto.apply_to(budget, now);
        Ok(Some(budget.clone()))
    }

    async fn list_due(&self, now: Timestamp) -> Result<Vec<Budget>, StoreError> {
        let tables = self.tables.read().await;
        let mut due: Vec<Budget> = tables
            .budgets
            .iter()
            .filter(|b| is_reminder_due(b.status, b.next_update_reminder, now))
            .cloned()
            .collect();
        due.sort_by_key(|b| (b.next_update_reminder, b.id));
        Ok(due)
    }

    async fn advance_reminder(
        &self,
        id: DbId,
        expected: Timestamp,
        next: Timestamp,
    ) -> Result<bool, StoreError> {
        let mut tables = self.tables.write().await;
        match tables
            .budgets
            .iter_mut()
            .find(|b| b.id == id && b.next_update_reminder == expected)
        {
            Some(budget) => {
                budget.next_update_reminder = next;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl EarthworkStore for MemoryStore {
    async fn insert(&self, new: NewEarthwork) -> Result<Earthwork, StoreError> {
        let mut tables = self.tables.write().await;
        let record = Earthwork {
            id: tables.allocate_id(),
            project_section: new.project_section,
            input: new.input,
            result: new.result,
            created_at: Utc::now(),
        };
        tables.earthworks.push(record.clone());
        Ok(record)
    }

    async fn list(&self) -> Result<Vec<Earthwork>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.earthworks.iter().rev().cloned().collect())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Earthwork>, StoreError> {
        let tables = self.tables.read().await;
        Ok(tables.earthworks.iter().find(|e| e.id == id).cloned())
    }
}
