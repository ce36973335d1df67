//! Budget models and DTOs.
//!
//! Allocations and categories are stored as JSONB arrays on the budget row;
//! the total amount and currency are plain columns so they can be queried.

use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use takeoff_core::budget::{
    check_allocations, check_categories, check_project_name, check_total, BudgetCategory,
    BudgetStatus, MonthlyAllocation, TotalBudget,
};
use takeoff_core::error::CoreError;
use takeoff_core::types::{DbId, Timestamp};
use takeoff_core::validation::Validate;

// ---------------------------------------------------------------------------
// Entity structs
// ---------------------------------------------------------------------------

/// A row from the `budgets` table.
#[derive(Debug, Clone, FromRow)]
pub struct BudgetRow {
    pub id: DbId,
    pub project_name: String,
    pub total_amount: f64,
    pub currency: String,
    pub monthly_allocation: Json<Vec<MonthlyAllocation>>,
    pub categories: Json<Vec<BudgetCategory>>,
    pub status: String,
    pub next_update_reminder: Timestamp,
    pub last_updated: Timestamp,
    pub created_at: Timestamp,
}

/// A budget as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    pub id: DbId,
    pub project_name: String,
    pub total_budget: TotalBudget,
    pub monthly_allocation: Vec<MonthlyAllocation>,
    pub categories: Vec<BudgetCategory>,
    pub status: BudgetStatus,
    pub next_update_reminder: Timestamp,
    pub last_updated: Timestamp,
    pub created_at: Timestamp,
}

impl From<BudgetRow> for Budget {
    fn from(row: BudgetRow) -> Self {
        Self {
            id: row.id,
            project_name: row.project_name,
            total_budget: TotalBudget {
                amount: row.total_amount,
                currency: row.currency,
            },
            monthly_allocation: row.monthly_allocation.0,
            categories: row.categories.0,
            status: BudgetStatus::from_db(&row.status),
            next_update_reminder: row.next_update_reminder,
            last_updated: row.last_updated,
            created_at: row.created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// DTO for creating a budget. The first reminder is derived, never supplied.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBudget {
    pub project_name: String,
    pub total_budget: TotalBudget,
    #[serde(default)]
    pub monthly_allocation: Vec<MonthlyAllocation>,
    #[serde(default)]
    pub categories: Vec<BudgetCategory>,
}

impl CreateBudget {
    /// Allocations with their variance recomputed.
    pub fn allocations(&self) -> Vec<MonthlyAllocation> {
        derive_variances(&self.monthly_allocation)
    }
}

impl Validate for CreateBudget {
    fn validate(&self) -> Result<(), CoreError> {
        check_project_name(&self.project_name)?;
        check_total(&self.total_budget)?;
        check_allocations(&self.monthly_allocation)?;
        check_categories(&self.categories)
    }
}

/// DTO for partially updating a budget. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBudget {
    pub project_name: Option<String>,
    pub total_budget: Option<TotalBudget>,
    pub monthly_allocation: Option<Vec<MonthlyAllocation>>,
    pub categories: Option<Vec<BudgetCategory>>,
    pub status: Option<BudgetStatus>,
    pub next_update_reminder: Option<Timestamp>,
}

impl UpdateBudget {
    pub fn allocations(&self) -> Option<Vec<MonthlyAllocation>> {
        self.monthly_allocation.as_deref().map(derive_variances)
    }

    /// Apply the present fields to an in-memory budget.
    pub fn apply_to(&self, budget: &mut Budget, now: Timestamp) {
        if let Some(name) = &self.project_name {
            budget.project_name = name.trim().to_string();
        }
        if let Some(total) = &self.total_budget {
            budget.total_budget = total.clone();
        }
        if let Some(allocations) = self.allocations() {
            budget.monthly_allocation = allocations;
        }
        if let Some(categories) = &self.categories {
            budget.categories = categories.clone();
        }
        if let Some(status) = self.status {
            budget.status = status;
        }
        if let Some(reminder) = self.next_update_reminder {
            budget.next_update_reminder = reminder;
        }
        budget.last_updated = now;
    }
}

impl Validate for UpdateBudget {
    fn validate(&self) -> Result<(), CoreError> {
        if let Some(name) = &self.project_name {
            check_project_name(name)?;
        }
        if let Some(total) = &self.total_budget {
            check_total(total)?;
        }
        if let Some(allocations) = &self.monthly_allocation {
            check_allocations(allocations)?;
        }
        if let Some(categories) = &self.categories {
            check_categories(categories)?;
        }
        Ok(())
    }
}

fn derive_variances(allocations: &[MonthlyAllocation]) -> Vec<MonthlyAllocation> {
    allocations
        .iter()
        .cloned()
        .map(MonthlyAllocation::with_derived_variance)
        .collect()
}
