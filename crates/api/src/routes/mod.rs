pub mod boq;
pub mod budgets;
pub mod earthwork;
pub mod health;
pub mod structures;

use axum::Router;
use takeoff_core::structural::{BeamInput, ColumnInput, FootingInput, SlabInput};

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /structures/calculate                 calculate any element (POST, tagged by "type")
/// /structures/history                   10 most recent calculations of any type
/// /structures/calculation/{id}          one calculation of any type
///
/// /beam/calculate                       calculate a beam (POST)
/// /beam/history                         10 most recent beams
/// /beam/calculation/{id}                one beam calculation
/// /column/...                           same three routes per element
/// /footing/...
/// /slab/...
///
/// /earthworks/calculate                 calculate and store excavation (POST)
/// /earthworks                           list, newest first
/// /earthworks/{id}                      get
///
/// /budgets                              list, create
/// /budgets/{id}                         get, partial update (PUT)
///
/// /boq/upload                           convert an uploaded CSV or workbook (POST, multipart)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/structures", structures::router())
        .nest("/beam", structures::element_router::<BeamInput>())
        .nest("/column", structures::element_router::<ColumnInput>())
        .nest("/footing", structures::element_router::<FootingInput>())
        .nest("/slab", structures::element_router::<SlabInput>())
        .nest("/earthworks", earthwork::router())
        .nest("/budgets", budgets::router())
        .nest("/boq", boq::router())
}
