//! Request extractors that report rejections through [`AppError`].

use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use cinedex_core::error::CoreError;
use cinedex_core::filter::QueryParams;
use cinedex_core::pagination::{Envelope, PageLinks, PageRequest};
use serde::de::DeserializeOwned;
use serde_path_to_error::Segment;

use crate::config::ServerConfig;
use crate::error::AppError;

/// JSON body extractor that reports rejections in the standard error shape
/// instead of axum's plain-text 415/422.
///
/// A body that is not JSON, or not an object, is a `400 BAD_REQUEST`. A
/// missing or mistyped field is a field validation error on that field.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppJson<T>(pub T);

impl<T, S> FromRequest<S> for AppJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<serde_json::Value>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        serde_path_to_error::deserialize(body)
            .map(AppJson)
            .map_err(payload_error)
    }
}

/// Attribute a deserialization failure to the top-level field it came from.
fn payload_error(err: serde_path_to_error::Error<serde_json::Error>) -> AppError {
    let message = err.inner().to_string();
    let field = match err.path().iter().next() {
        Some(Segment::Map { key }) => Some(key.clone()),
        _ => missing_field(&message).map(str::to_string),
    };
    match field {
        Some(field) => CoreError::field(&field, field_message(&message)).into(),
        None => AppError::BadRequest(message),
    }
}

fn missing_field(message: &str) -> Option<&str> {
    message.strip_prefix("missing field `")?.split('`').next()
}

/// Rephrase a serde message in the catalog's field-error wording.
fn field_message(message: &str) -> String {
    const INTEGERS: [&str; 4] = ["expected i32", "expected i64", "expected u32", "expected u64"];

    if message.starts_with("missing field") {
        "This field is required.".into()
    } else if message.starts_with("invalid type: null") {
        "This field may not be null.".into()
    } else if INTEGERS.iter().any(|expected| message.contains(expected)) {
        "A valid integer is required.".into()
    } else if message.contains("expected a string") {
        "Not a valid string.".into()
    } else if message.contains("expected a sequence") {
        "Expected a list of items.".into()
    } else if let Some(rest) = message.strip_prefix("unknown variant `") {
        let value = rest.split('`').next().unwrap_or_default();
        format!("\"{value}\" is not a valid choice.")
    } else {
        message.to_string()
    }
}

/// The parts of a list request needed to filter, paginate and link.
#[derive(Debug, Clone)]
pub struct ListQuery {
    /// Request path, e.g. `/movies/`.
    pub path: String,
    /// Every query parameter, recognized or not.
    pub params: QueryParams,
}

impl<S> FromRequestParts<S> for ListQuery
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<QueryParams>::try_from_uri(&parts.uri)
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(ListQuery {
            path: parts.uri.path().to_string(),
            params,
        })
    }
}

impl ListQuery {
    /// Resolve `page` and `page_size` against the configured limits.
    pub fn page_request(&self, config: &ServerConfig) -> Result<PageRequest, CoreError> {
        PageRequest::from_params(&self.params, config.page)
    }

    /// Wrap one page of results in the list envelope.
    pub fn envelope<T>(
        &self,
        config: &ServerConfig,
        results: Vec<T>,
        total: i64,
        request: PageRequest,
    ) -> Envelope<T> {
        let links = PageLinks::new(config.public_base_url.as_deref(), &self.path, &self.params);
        Envelope::new(results, total, request, &links)
    }
}
