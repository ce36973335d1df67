use async_trait::async_trait;
use takeoff_core::structural::ElementKind;
use takeoff_core::types::{DbId, Timestamp};

use super::{BudgetStore, CalculationStore, EarthworkStore, StoreError};
use crate::models::budget::{Budget, CreateBudget, UpdateBudget};
use crate::models::calculation::{CalculationRecord, NewCalculation};
use crate::models::earthwork::{Earthwork, NewEarthwork};
use crate::repositories::{BudgetRepo, CalculationRepo, EarthworkRepo};
use crate::DbPool;

/// PostgreSQL-backed store.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CalculationStore for PgStore {
    async fn insert(&self, new: NewCalculation) -> Result<CalculationRecord, StoreError> {
        CalculationRepo::insert(&self.pool, &new).await?.try_into()
    }

    async fn list_recent(
        &self,
        kind: Option<ElementKind>,
        limit: i64,
    ) -> Result<Vec<CalculationRecord>, StoreError> {
        CalculationRepo::list_recent(&self.pool, kind, limit)
            .await?
            .into_iter()
            .map(CalculationRecord::try_from)
            .collect()
    }

    async fn find_by_id(
        &self,
        id: DbId,
        kind: Option<ElementKind>,
    ) -> Result<Option<CalculationRecord>, StoreError> {
        CalculationRepo::find_by_id(&self.pool, id, kind)
            .await?
            .map(CalculationRecord::try_from)
            .transpose()
    }
}

#[async_trait]
impl BudgetStore for PgStore {
    async fn create(&self, dto: &CreateBudget, now: Timestamp) -> Result<Budget, StoreError> {
        Ok(BudgetRepo::create(&self.pool, dto, now).await?.into())
    }

    async fn list(&self) -> Result<Vec<Budget>, StoreError> {
        let rows = BudgetRepo::list(&self.pool).await?;
        Ok(rows.into_iter().map(Budget::from).collect())
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Budget>, StoreError> {
        Ok(BudgetRepo::find_by_id(&self.pool, id).await?.map(Budget::from))
    }

    async fn update(
        &self,
        id: DbId,
        dto: &UpdateBudget,
        now: Timestamp,
    ) -> Result<Option<Budget>, StoreError> {
        Ok(BudgetRepo::update(&self.pool, id, dto, now)
            .await?
            .map(Budget::from))
    }

    async fn list_due(&self, now: Timestamp) -> Result<Vec<Budget>, StoreError> {
        let rows = BudgetRepo::list_due(&self.pool, now).await?;
        Ok(rows.into_iter().map(Budget::from).collect())
    }

    async fn advance_reminder(
        &self,
        id: DbId,
        expected: Timestamp,
        next: Timestamp,
    ) -> Result<bool, StoreError> {
        Ok(BudgetRepo::advance_reminder(&self.pool, id, expected, next).await?)
    }
}

#[async_trait]
impl EarthworkStore for PgStore {
    async fn insert(&self, new: NewEarthwork) -> Result<Earthwork, StoreError> {
        Ok(EarthworkRepo::insert(&self.pool, &new).await?)
    }

    async fn list(&self) -> Result<Vec<Earthwork>, StoreError> {
        Ok(EarthworkRepo::list(&self.pool).await?)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Earthwork>, StoreError> {
        Ok(EarthworkRepo::find_by_id(&self.pool, id).await?)
    }
}
