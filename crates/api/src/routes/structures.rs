//! Route definitions for the structural element calculators.
//!
//! Two routers are provided:
//! - `router()` for the combined endpoints mounted at `/structures`
//! - `element_router::<I>()` for one element type, mounted at `/beam`,
//!   `/column`, `/footing` and `/slab`

use axum::routing::{get, post};
use axum::Router;
use serde::de::DeserializeOwned;
use takeoff_core::structural::ElementInput;

use crate::handlers::structures;
use crate::state::AppState;

/// Combined routes mounted at `/structures`.
///
/// ```text
/// POST /calculate          -> calculate
/// GET  /history            -> history
/// GET  /calculation/{id}   -> get_calculation
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/calculate", post(structures::calculate))
        .route("/history", get(structures::history))
        .route("/calculation/{id}", get(structures::get_calculation))
}

/// Per-element routes. History and lookup only see records of `I::KIND`.
///
/// ```text
/// POST /calculate          -> calculate_element
/// GET  /history            -> element_history
/// GET  /calculation/{id}   -> get_element_calculation
/// ```
pub fn element_router<I>() -> Router<AppState>
where
    I: ElementInput + DeserializeOwned,
{
    Router::new()
        .route("/calculate", post(structures::calculate_element::<I>))
        .route("/history", get(structures::element_history::<I>))
        .route(
            "/calculation/{id}",
            get(structures::get_element_calculation::<I>),
        )
}
