//! Earthwork quantity records.

use serde::Serialize;
use sqlx::FromRow;
use takeoff_core::earthwork::{EarthworkInput, EarthworkResult};
use takeoff_core::types::{DbId, Timestamp};

use crate::store::StoreError;

/// A row from the `earthworks` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Earthwork {
    pub id: DbId,
    pub project_section: String,
    pub input: serde_json::Value,
    pub result: serde_json::Value,
    pub created_at: Timestamp,
}

/// An earthwork calculation ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEarthwork {
    pub project_section: String,
    pub input: serde_json::Value,
    pub result: serde_json::Value,
}

impl NewEarthwork {
    pub fn from_outcome(input: &EarthworkInput, result: &EarthworkResult) -> Result<Self, StoreError> {
        Ok(Self {
            project_section: input.project_section.trim().to_string(),
            input: serde_json::to_value(input)?,
            result: serde_json::to_value(result)?,
        })
    }
}
