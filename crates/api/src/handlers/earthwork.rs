//! Handlers for excavation volume and cost estimates.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use takeoff_core::earthwork::{calculate_earthwork, EarthworkInput};
use takeoff_core::error::CoreError;
use takeoff_core::types::DbId;
use takeoff_core::validation::Validate;
use takeoff_db::models::earthwork::{Earthwork, NewEarthwork};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/earthworks/calculate
pub async fn calculate(
    State(state): State<AppState>,
    payload: Result<Json<EarthworkInput>, JsonRejection>,
) -> AppResult<Json<DataResponse<Earthwork>>> {
    let Json(input) = payload?;
    input.validate()?;

    let result = calculate_earthwork(&input);
    let new = NewEarthwork::from_outcome(&input, &result)?;
    let record = state.earthworks.insert(new).await?;

    tracing::info!(
        id = record.id,
        section = %record.project_section,
        final_volume_m3 = result.calculations.final_volume,
        "Earthwork stored",
    );

    Ok(Json(DataResponse { data: record }))
}

/// GET /api/v1/earthworks
pub async fn list(State(state): State<AppState>) -> AppResult<Json<DataResponse<Vec<Earthwork>>>> {
    let records = state.earthworks.list().await?;
    Ok(Json(DataResponse { data: records }))
}

/// GET /api/v1/earthworks/{id}
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Earthwork>>> {
    let record = state
        .earthworks
        .find_by_id(id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Earthwork",
            id,
        })?;
    Ok(Json(DataResponse { data: record }))
}
