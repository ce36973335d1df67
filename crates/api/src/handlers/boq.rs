//! Handler for bill-of-quantities uploads.
//!
//! The sheet is converted in memory and returned; nothing is stored.

use axum::extract::multipart::MultipartRejection;
use axum::extract::Multipart;
use axum::Json;
use takeoff_core::boq::{BoqFormat, BoqSheet};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;

/// Multipart field carrying the sheet.
pub const UPLOAD_FIELD: &str = "boqFile";

/// POST /api/v1/boq/upload
///
/// Expects a CSV sheet or a workbook in the `boqFile` field. Other fields
/// are ignored.
pub async fn upload_boq(
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<DataResponse<BoqSheet>>> {
    let mut multipart = multipart?;
    let mut upload = None;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_owned);
        let bytes = field.bytes().await?;
        upload = Some((file_name, bytes));
    }

    let (file_name, bytes) =
        upload.ok_or_else(|| AppError::BadRequest("No file uploaded".to_string()))?;

    let format = BoqFormat::detect(file_name.as_deref(), &bytes);
    let sheet = format.parse(&bytes)?;

    tracing::info!(
        file = file_name.as_deref().unwrap_or("<unnamed>"),
        size = bytes.len(),
        ?format,
        rows = sheet.summary.total_rows,
        converted = sheet.summary.converted_rows,
        warnings = sheet.summary.warnings,
        "BOQ sheet converted",
    );

    Ok(Json(DataResponse { data: sheet }))
}
