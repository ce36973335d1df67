//! Structural calculation records.

use serde::Serialize;
use sqlx::FromRow;
use takeoff_core::structural::{ElementKind, StructuralInput, StructuralResult};
use takeoff_core::types::{DbId, Timestamp};

use crate::store::StoreError;

// ---------------------------------------------------------------------------
// Entity structs
// ---------------------------------------------------------------------------

/// A row from the `calculations` table.
#[derive(Debug, Clone, FromRow)]
pub struct CalculationRow {
    pub id: DbId,
    pub element_type: String,
    pub input: serde_json::Value,
    pub result: serde_json::Value,
    pub created_at: Timestamp,
}

/// A stored calculation as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationRecord {
    pub id: DbId,
    pub element_type: ElementKind,
    pub input: serde_json::Value,
    pub result: serde_json::Value,
    pub created_at: Timestamp,
}

impl TryFrom<CalculationRow> for CalculationRecord {
    type Error = StoreError;

    fn try_from(row: CalculationRow) -> Result<Self, Self::Error> {
        let element_type = row
            .element_type
            .parse()
            .map_err(|_| StoreError::InvalidRow {
                table: "calculations",
                id: row.id,
                reason: format!("unknown element_type '{}'", row.element_type),
            })?;
        Ok(Self {
            id: row.id,
            element_type,
            input: row.input,
            result: row.result,
            created_at: row.created_at,
        })
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// A calculation ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCalculation {
    pub element_type: ElementKind,
    pub input: serde_json::Value,
    pub result: serde_json::Value,
}

impl NewCalculation {
    /// Encode a request and the report computed from it. The input keeps its
    /// `type` tag so it can be replayed through the combined endpoint.
    pub fn from_outcome(
        input: &StructuralInput,
        result: &StructuralResult,
    ) -> Result<Self, StoreError> {
        Ok(Self {
            element_type: input.kind(),
            input: serde_json::to_value(input)?,
            result: serde_json::to_value(result)?,
        })
    }
}
