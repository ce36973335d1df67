//! Repository for the `calculations` table.

use sqlx::PgPool;
use takeoff_core::structural::ElementKind;
use takeoff_core::types::DbId;

use crate::models::calculation::{CalculationRow, NewCalculation};

/// Column list for `calculations` queries.
const COLUMNS: &str = "id, element_type, input, result, created_at";

/// Provides data access for stored structural calculations.
pub struct CalculationRepo;

impl CalculationRepo {
    /// Insert a calculation, returning the stored row.
    pub async fn insert(pool: &PgPool, new: &NewCalculation) -> Result<CalculationRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO calculations (element_type, input, result) \
             VALUES ($1, $2, $3) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, CalculationRow>(&query)
            .bind(new.element_type.as_str())
            .bind(&new.input)
            .bind(&new.result)
            .fetch_one(pool)
            .await
    }

    /// The `limit` most recent calculations, newest first, optionally
    /// restricted to one element type.
    pub async fn list_recent(
        pool: &PgPool,
        kind: Option<ElementKind>,
        limit: i64,
    ) -> Result<Vec<CalculationRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM calculations \
             WHERE ($1::TEXT IS NULL OR element_type = $1) \
             ORDER BY created_at DESC, id DESC \
             LIMIT $2"
        );
        sqlx::query_as::<_, CalculationRow>(&query)
            .bind(kind.map(ElementKind::as_str))
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    /// Find a calculation by id. With `kind` set, a record of another
    /// element type is treated as absent.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        kind: Option<ElementKind>,
    ) -> Result<Option<CalculationRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM calculations \
             WHERE id = $1 AND ($2::TEXT IS NULL OR element_type = $2)"
        );
        sqlx::query_as::<_, CalculationRow>(&query)
            .bind(id)
            .bind(kind.map(ElementKind::as_str))
            .fetch_optional(pool)
            .await
    }
}
