//! Handlers for project budgets.
//!
//! New budgets get their first review reminder one month after creation.
//! Updates are partial; omitted fields keep their stored values.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use takeoff_core::error::CoreError;
use takeoff_core::types::DbId;
use takeoff_core::validation::Validate;
use takeoff_db::models::budget::{Budget, CreateBudget, UpdateBudget};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Collection
// ---------------------------------------------------------------------------

/// POST /api/v1/budgets
pub async fn create_budget(
    State(state): State<AppState>,
    payload: Result<Json<CreateBudget>, JsonRejection>,
) -> AppResult<impl IntoResponse> {
    let Json(dto) = payload?;
    dto.validate()?;

    let budget = state.budgets.create(&dto, Utc::now()).await?;

    tracing::info!(
        id = budget.id,
        project = %budget.project_name,
        next_reminder = %budget.next_update_reminder,
        "Budget created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: budget })))
}

/// GET /api/v1/budgets
pub async fn list_budgets(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Budget>>>> {
    let budgets = state.budgets.list().await?;
    Ok(Json(DataResponse { data: budgets }))
}

// ---------------------------------------------------------------------------
// Single budget
// ---------------------------------------------------------------------------

/// GET /api/v1/budgets/{id}
pub async fn get_budget(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Budget>>> {
    let budget = state
        .budgets
        .find_by_id(id)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Budget",
            id,
        })?;
    Ok(Json(DataResponse { data: budget }))
}

/// PUT /api/v1/budgets/{id}
pub async fn update_budget(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    payload: Result<Json<UpdateBudget>, JsonRejection>,
) -> AppResult<Json<DataResponse<Budget>>> {
    let Json(dto) = payload?;
    dto.validate()?;

    let budget = state
        .budgets
        .update(id, &dto, Utc::now())
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Budget",
            id,
        })?;

    tracing::info!(id, project = %budget.project_name, "Budget updated");

    Ok(Json(DataResponse { data: budget }))
}
