//! Tests for `AppError` -> HTTP response mapping.
//!
//! These call `IntoResponse` directly on `AppError` values; no HTTP server
//! or database is involved.

use axum::response::IntoResponse;
use cinedex_api::error::AppError;
use cinedex_core::error::{CoreError, FieldErrors};
use http_body_util::BodyExt;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (axum::http::StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::NotFound {
        entity: "Movie",
        id: 42,
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(json["error"], "Movie with id 42 not found");
}

#[tokio::test]
async fn field_validation_includes_field_map() {
    let mut fields = FieldErrors::new();
    fields.insert("actors".into(), vec!["No actor with 7 pk".into()]);
    let err = AppError::Core(CoreError::FieldValidation(fields));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["fields"]["actors"][0], "No actor with 7 pk");
}

#[tokio::test]
async fn invalid_filter_value_returns_400() {
    let err = AppError::Core(CoreError::InvalidFilterValue {
        param: "year".into(),
        value: "soon".into(),
    });

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "INVALID_FILTER_VALUE");
    assert!(json["error"].as_str().unwrap().contains("year"));
}

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("invalid field value".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["code"], "BAD_REQUEST");
    assert_eq!(json["error"], "invalid field value");
}

#[tokio::test]
async fn row_not_found_returns_404() {
    let err = AppError::from(sqlx::Error::RowNotFound);

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn unique_violation_on_title_is_a_field_error() {
    let err = AppError::Core(CoreError::field("title", "movie with this title already exists."));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert_eq!(json["fields"]["title"][0], "movie with this title already exists.");
}

#[tokio::test]
async fn pool_timeout_returns_500_and_sanitizes_message() {
    let err = AppError::from(sqlx::Error::PoolTimedOut);

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(json["error"], "An internal error occurred");
}

#[tokio::test]
async fn configuration_error_does_not_leak_detail() {
    let err = AppError::from(sqlx::Error::Configuration(
        "password=hunter2 host=10.0.0.5".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, axum::http::StatusCode::INTERNAL_SERVER_ERROR);
    assert!(
        !json.to_string().contains("hunter2"),
        "Internal error response must not leak sensitive details"
    );
}
