//! Project budget domain: allocation shapes, validation rules and the
//! monthly review reminder arithmetic.

use chrono::{DateTime, Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Timestamp;
use crate::validation::{require_non_empty, require_non_negative, require_positive};

/// Currency applied when a budget omits one.
pub const DEFAULT_CURRENCY: &str = "INR";

/// Months between two budget review reminders.
pub const REMINDER_INTERVAL_MONTHS: u32 = 1;

// ---------------------------------------------------------------------------
// Statuses
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    #[default]
    Active,
    Archived,
}

impl BudgetStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Archived => "archived",
        }
    }

    /// Parse the stored column value. Unknown values read as archived so
    /// they never trigger reminders.
    pub fn from_db(value: &str) -> Self {
        match value {
            "active" => Self::Active,
            _ => Self::Archived,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AllocationStatus {
    #[default]
    Planned,
    InProgress,
    Completed,
}

// ---------------------------------------------------------------------------
// Budget parts
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TotalBudget {
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyAllocation {
    pub month: NaiveDate,
    pub planned_amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_amount: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variance: Option<f64>,
    #[serde(default)]
    pub status: AllocationStatus,
}

impl MonthlyAllocation {
    /// Recompute `variance` as actual minus planned. Without an actual
    /// amount there is no variance.
    pub fn with_derived_variance(mut self) -> Self {
        self.variance = self.actual_amount.map(|actual| actual - self.planned_amount);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetCategory {
    pub name: String,
    pub allocation: f64,
    #[serde(default)]
    pub spent: f64,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

pub fn check_project_name(name: &str) -> Result<(), CoreError> {
    require_non_empty("projectName", name)
}

pub fn check_total(total: &TotalBudget) -> Result<(), CoreError> {
    require_positive("totalBudget.amount", total.amount)?;
    require_non_empty("totalBudget.currency", &total.currency)
}

pub fn check_allocations(allocations: &[MonthlyAllocation]) -> Result<(), CoreError> {
    for (i, allocation) in allocations.iter().enumerate() {
        require_non_negative(
            &format!("monthlyAllocation[{i}].plannedAmount"),
            allocation.planned_amount,
        )?;
        if let Some(actual) = allocation.actual_amount {
            require_non_negative(&format!("monthlyAllocation[{i}].actualAmount"), actual)?;
        }
    }
    Ok(())
}

pub fn check_categories(categories: &[BudgetCategory]) -> Result<(), CoreError> {
    for (i, category) in categories.iter().enumerate() {
        require_non_empty(&format!("categories[{i}].name"), &category.name)?;
        require_non_negative(&format!("categories[{i}].allocation"), category.allocation)?;
        require_non_negative(&format!("categories[{i}].spent"), category.spent)?;
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Reminders
// ---------------------------------------------------------------------------

/// The reminder following `now`: one calendar month later, clamped to the
/// last day of a shorter month (Jan 31 -> Feb 28).
pub fn next_reminder_after(now: Timestamp) -> Timestamp {
    now.checked_add_months(Months::new(REMINDER_INTERVAL_MONTHS))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Whether an active budget's reminder should fire at `now`.
pub fn is_reminder_due(status: BudgetStatus, next_reminder: Timestamp, now: Timestamp) -> bool {
    status == BudgetStatus::Active && next_reminder <= now
}
