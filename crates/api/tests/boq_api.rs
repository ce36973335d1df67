//! HTTP-level tests for BOQ uploads.

mod common;

use axum::http::StatusCode;
use common::{body_json, post_raw};

const BOUNDARY: &str = "takeoff-test-boundary";

const WORKBOOK: &[u8] = include_bytes!("../../core/tests/fixtures/boq.xlsx");

/// Build a multipart body with one file field.
fn multipart_body(field: &str, file_name: &str, contents: &str) -> Vec<u8> {
    multipart_file(field, file_name, "text/csv", contents.as_bytes())
}

fn multipart_file(field: &str, file_name: &str, mime: &str, contents: &[u8]) -> Vec<u8> {
    let mut body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"{field}\"; filename=\"{file_name}\"\r\n\
         Content-Type: {mime}\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{BOUNDARY}--\r\n").as_bytes());
    body
}

fn content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}

#[tokio::test]
async fn uploaded_sheet_is_converted() {
    let app = common::build_test_app(common::test_state());
    let body = multipart_body(
        "boqFile",
        "boq.csv",
        "Description,Unit,Quantity\nExcavation,cft,10\nCement,bags,12.5\nSand,xyz,4\n",
    );

    let response = post_raw(app, "/api/v1/boq/upload", &content_type(), body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["rows"].as_array().unwrap().len(), 3);
    assert_eq!(data["rows"][0]["convertedQuantity"], 0.28);
    assert_eq!(data["rows"][0]["standardUnit"], "m³");
    assert_eq!(data["rows"][1]["convertedQuantity"], 625.0);
    assert_eq!(data["rows"][2]["converted"], false);
    assert_eq!(data["summary"]["totalRows"], 3);
    assert_eq!(data["summary"]["convertedRows"], 2);
    assert_eq!(data["summary"]["warnings"], 1);
}

#[tokio::test]
async fn uploaded_workbook_is_converted() {
    let app = common::build_test_app(common::test_state());
    let body = multipart_file(
        "boqFile",
        "boq.xlsx",
        "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        WORKBOOK,
    );

    let response = post_raw(app, "/api/v1/boq/upload", &content_type(), body).await;

    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["rows"][0]["description"], "Excavation");
    assert_eq!(data["rows"][0]["convertedQuantity"], 0.28);
    assert_eq!(data["rows"][1]["standardUnit"], "kg");
    assert_eq!(data["summary"]["totalRows"], 3);
    assert_eq!(data["summary"]["convertedRows"], 2);
}

#[tokio::test]
async fn upload_without_file_field_is_bad_request() {
    let app = common::build_test_app(common::test_state());
    let body = multipart_body("notes", "notes.csv", "quantity\n1\n");

    let response = post_raw(app, "/api/v1/boq/upload", &content_type(), body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "No file uploaded");
}

#[tokio::test]
async fn sheet_over_upload_limit_is_rejected_with_413() {
    let config = takeoff_api::config::ServerConfig {
        max_upload_bytes: 512,
        ..common::test_config()
    };
    let app = common::build_test_app_with(common::test_state(), config);
    let sheet = format!("quantity,unit\n{}", "12.5,cft\n".repeat(200));
    let body = multipart_body("boqFile", "big.csv", &sheet);

    let response = post_raw(app, "/api/v1/boq/upload", &content_type(), body).await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body_json(response).await["code"], "PAYLOAD_TOO_LARGE");
}

#[tokio::test]
async fn non_multipart_request_is_bad_request() {
    let app = common::build_test_app(common::test_state());
    let response = post_raw(app, "/api/v1/boq/upload", "text/plain", b"quantity\n1\n".to_vec()).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
