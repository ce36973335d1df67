use axum::routing::post;
use axum::Router;

use crate::handlers::boq;
use crate::state::AppState;

/// BOQ routes mounted at `/boq`.
///
/// ```text
/// POST /upload   -> upload_boq (multipart, field "boqFile", CSV or workbook)
/// ```
///
/// The body limit comes from `ServerConfig::max_upload_bytes`, applied in
/// [`crate::router::build_app_router`].
pub fn router() -> Router<AppState> {
    Router::new().route("/upload", post(boq::upload_boq))
}
