//! Injectable persistence interfaces.
//!
//! Handlers and background tasks depend on these traits only. [`PgStore`]
//! delegates to the repositories; [`MemoryStore`] keeps everything in
//! process for tests and database-less development.

mod memory;
mod postgres;

use async_trait::async_trait;
use takeoff_core::structural::ElementKind;
use takeoff_core::types::{DbId, Timestamp};

use crate::models::budget::{Budget, CreateBudget, UpdateBudget};
use crate::models::calculation::{CalculationRecord, NewCalculation};
use crate::models::earthwork::{Earthwork, NewEarthwork};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Document encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("Invalid row {id} in {table}: {reason}")]
    InvalidRow {
        table: &'static str,
        id: DbId,
        reason: String,
    },
}

/// Stored structural calculations.
#[async_trait]
pub trait CalculationStore: Send + Sync {
    async fn insert(&self, new: NewCalculation) -> Result<CalculationRecord, StoreError>;

    /// At most `limit` records, newest first. `None` spans every element type.
    async fn list_recent(
        &self,
        kind: Option<ElementKind>,
        limit: i64,
    ) -> Result<Vec<CalculationRecord>, StoreError>;

    async fn find_by_id(
        &self,
        id: DbId,
        kind: Option<ElementKind>,
    ) -> Result<Option<CalculationRecord>, StoreError>;
}

/// Project budgets and their review reminders.
#[async_trait]
pub trait BudgetStore: Send + Sync {
    async fn create(&self, dto: &CreateBudget, now: Timestamp) -> Result<Budget, StoreError>;

    async fn list(&self) -> Result<Vec<Budget>, StoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Budget>, StoreError>;

    async fn update(
        &self,
        id: DbId,
        dto: &UpdateBudget,
        now: Timestamp,
    ) -> Result<Option<Budget>, StoreError>;

    /// Active budgets whose reminder is due at `now`.
    async fn list_due(&self, now: Timestamp) -> Result<Vec<Budget>, StoreError>;

    /// Compare-and-set the reminder. `false` means another writer moved it first.
    async fn advance_reminder(
        &self,
        id: DbId,
        expected: Timestamp,
        next: Timestamp,
    ) -> Result<bool, StoreError>;
}

/// Stored earthwork calculations.
#[async_trait]
pub trait EarthworkStore: Send + Sync {
    async fn insert(&self, new: NewEarthwork) -> Result<Earthwork, StoreError>;

    /// Every record, newest first.
    async fn list(&self) -> Result<Vec<Earthwork>, StoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Earthwork>, StoreError>;
}
