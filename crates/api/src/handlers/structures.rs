//! Handlers for the structural element calculators.
//!
//! Every calculation is validated, computed, stored and returned with its
//! new id. The per-element handlers are generic over the request shape and
//! restrict history and lookup to their own element type.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde::de::DeserializeOwned;
use takeoff_core::error::CoreError;
use takeoff_core::structural::{ElementInput, StructuralInput, HISTORY_LIMIT};
use takeoff_core::types::DbId;
use takeoff_db::models::calculation::{CalculationRecord, NewCalculation};

use crate::error::AppResult;
use crate::response::{CalculationResponse, DataResponse};
use crate::state::AppState;

/// Validate, compute and store one calculation.
async fn run_calculation(
    state: &AppState,
    input: StructuralInput,
) -> AppResult<Json<DataResponse<CalculationResponse>>> {
    let result = input.calculate()?;
    let new = NewCalculation::from_outcome(&input, &result)?;
    let record = state.calculations.insert(new).await?;

    tracing::info!(
        id = record.id,
        element = %record.element_type,
        concrete_m3 = result.concrete_volume(),
        steel_kg = result.total_steel_weight(),
        "Calculation stored",
    );

    Ok(Json(DataResponse {
        data: CalculationResponse {
            id: record.id,
            element_type: record.element_type,
            result,
        },
    }))
}

// ---------------------------------------------------------------------------
// Combined endpoints
// ---------------------------------------------------------------------------

/// POST /api/v1/structures/calculate
///
/// Body is tagged by `"type"`: beam, column, footing or slab.
pub async fn calculate(
    State(state): State<AppState>,
    payload: Result<Json<StructuralInput>, JsonRejection>,
) -> AppResult<Json<DataResponse<CalculationResponse>>> {
    let Json(input) = payload?;
    run_calculation(&state, input).await
}

/// GET /api/v1/structures/history
pub async fn history(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CalculationRecord>>>> {
    let records = state.calculations.list_recent(None, HISTORY_LIMIT).await?;
    Ok(Json(DataResponse { data: records }))
}

/// GET /api/v1/structures/calculation/{id}
pub async fn get_calculation(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CalculationRecord>>> {
    let record = state
        .calculations
        .find_by_id(id, None)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Calculation",
            id,
        })?;
    Ok(Json(DataResponse { data: record }))
}

// ---------------------------------------------------------------------------
// Per-element endpoints
// ---------------------------------------------------------------------------

/// POST /api/v1/{element}/calculate
pub async fn calculate_element<I>(
    State(state): State<AppState>,
    payload: Result<Json<I>, JsonRejection>,
) -> AppResult<Json<DataResponse<CalculationResponse>>>
where
    I: ElementInput + DeserializeOwned,
{
    let Json(input) = payload?;
    run_calculation(&state, input.into()).await
}

/// GET /api/v1/{element}/history
pub async fn element_history<I: ElementInput>(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<CalculationRecord>>>> {
    let records = state
        .calculations
        .list_recent(Some(I::KIND), HISTORY_LIMIT)
        .await?;
    Ok(Json(DataResponse { data: records }))
}

/// GET /api/v1/{element}/calculation/{id}
///
/// A record of another element type is reported as not found.
pub async fn get_element_calculation<I: ElementInput>(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<CalculationRecord>>> {
    let record = state
        .calculations
        .find_by_id(id, Some(I::KIND))
        .await?
        .ok_or(CoreError::NotFound {
            entity: I::KIND.entity_name(),
            id,
        })?;
    Ok(Json(DataResponse { data: record }))
}
