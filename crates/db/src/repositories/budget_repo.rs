//! Repository for the `budgets` table.
//!
//! Partial updates use `COALESCE` so absent DTO fields keep their stored
//! values. Reminder advancement is a compare-and-set on the previously
//! observed `next_update_reminder`.

use sqlx::types::Json;
use sqlx::PgPool;
use takeoff_core::budget::{next_reminder_after, BudgetStatus};
use takeoff_core::types::{DbId, Timestamp};

use crate::models::budget::{BudgetRow, CreateBudget, UpdateBudget};

/// Column list for `budgets` queries.
const COLUMNS: &str = "\
    id, project_name, total_amount, currency, monthly_allocation, categories, \
    status, next_update_reminder, last_updated, created_at";

/// Provides data access for project budgets.
pub struct BudgetRepo;

impl BudgetRepo {
    /// Create a budget whose first reminder falls one month after `now`.
    pub async fn create(
        pool: &PgPool,
        dto: &CreateBudget,
        now: Timestamp,
    ) -> Result<BudgetRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO budgets \
                 (project_name, total_amount, currency, monthly_allocation, categories, \
                  status, next_update_reminder, last_updated, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BudgetRow>(&query)
            .bind(dto.project_name.trim())
            .bind(dto.total_budget.amount)
            .bind(&dto.total_budget.currency)
            .bind(Json(dto.allocations()))
            .bind(Json(&dto.categories))
            .bind(BudgetStatus::Active.as_str())
            .bind(next_reminder_after(now))
            .bind(now)
            .fetch_one(pool)
            .await
    }

    /// List all budgets in creation order.
    pub async fn list(pool: &PgPool) -> Result<Vec<BudgetRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM budgets ORDER BY id");
        sqlx::query_as::<_, BudgetRow>(&query).fetch_all(pool).await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<BudgetRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM budgets WHERE id = $1");
        sqlx::query_as::<_, BudgetRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Partially update a budget. Returns `None` if it does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        dto: &UpdateBudget,
        now: Timestamp,
    ) -> Result<Option<BudgetRow>, sqlx::Error> {
        let query = format!(
            "UPDATE budgets SET \
                 project_name = COALESCE($2, project_name), \
                 total_amount = COALESCE($3, total_amount), \
                 currency = COALESCE($4, currency), \
                 monthly_allocation = COALESCE($5, monthly_allocation), \
                 categories = COALESCE($6, categories), \
                 status = COALESCE($7, status), \
                 next_update_reminder = COALESCE($8, next_update_reminder), \
                 last_updated = $9 \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let total = dto.total_budget.as_ref();
        sqlx::query_as::<_, BudgetRow>(&query)
            .bind(id)
            .bind(dto.project_name.as_deref().map(str::trim))
            .bind(total.map(|t| t.amount))
            .bind(total.map(|t| t.currency.as_str()))
            .bind(dto.allocations().map(Json))
            .bind(dto.categories.as_ref().map(Json))
            .bind(dto.status.map(BudgetStatus::as_str))
            .bind(dto.next_update_reminder)
            .bind(now)
            .fetch_optional(pool)
            .await
    }

    /// Active budgets whose reminder is at or before `now`, oldest due first.
    pub async fn list_due(pool: &PgPool, now: Timestamp) -> Result<Vec<BudgetRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM budgets \
             WHERE status = 'active' AND next_update_reminder <= $1 \
             ORDER BY next_update_reminder, id"
        );
        sqlx::query_as::<_, BudgetRow>(&query)
            .bind(now)
            .fetch_all(pool)
            .await
    }

    /// Move the reminder from `expected` to `next`. Returns `false` when the
    /// stored reminder no longer equals `expected`.
    pub async fn advance_reminder(
        pool: &PgPool,
        id: DbId,
        expected: Timestamp,
        next: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE budgets SET next_update_reminder = $3 \
             WHERE id = $1 AND next_update_reminder = $2",
        )
        .bind(id)
        .bind(expected)
        .bind(next)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() == 1)
    }
}
