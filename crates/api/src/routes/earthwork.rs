use axum::routing::{get, post};
use axum::Router;

use crate::handlers::earthwork;
use crate::state::AppState;

/// Earthwork routes mounted at `/earthworks`.
///
/// ```text
/// POST /calculate   -> calculate
/// GET  /            -> list
/// GET  /{id}        -> get
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/calculate", post(earthwork::calculate))
        .route("/", get(earthwork::list))
        .route("/{id}", get(earthwork::get))
}
