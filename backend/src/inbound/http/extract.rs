//! Extractor configuration turning framework rejections into JSON:API errors.
//!
//! Actix answers malformed bodies and unparsable path segments with plain
//! text by default. These configs route those failures through [`ApiError`]
//! so every `/api/**` response keeps the same envelope.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, HttpResponse, web};
use tracing::debug;

use super::api_key::AuthenticatedClient;
use super::error::ApiError;

/// JSON body error mapping.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error)
}

/// Path segment error mapping.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(path_error)
}

/// Query string error mapping.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error)
}

fn json_error(error: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(path = req.path(), %error, "rejecting request body");
    match error {
        JsonPayloadError::ContentType => ApiError::unsupported_media_type().into(),
        _ => ApiError::invalid_json().into(),
    }
}

fn path_error(error: PathError, req: &HttpRequest) -> actix_web::Error {
    debug!(path = req.path(), %error, "rejecting path parameter");
    match req.match_info().iter().next() {
        Some((name, value)) => ApiError::type_mismatch(name, value).into(),
        None => ApiError::type_mismatch("id", req.path()).into(),
    }
}

fn query_error(error: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(path = req.path(), %error, "rejecting query string");
    ApiError::new(
        actix_web::http::StatusCode::BAD_REQUEST,
        "BAD_REQUEST",
        "Bad Request",
        "The query string is malformed",
    )
    .into()
}

/// Fallback for unmatched routes.
///
/// `/api/**` stays behind the API key, so an unauthenticated probe of an
/// unknown API path sees `401` rather than learning which routes exist.
pub async fn not_found(req: HttpRequest) -> Result<HttpResponse, ApiError> {
    if req.path().starts_with("/api/") {
        AuthenticatedClient::require(&req)?;
    }
    Err(ApiError::not_found("The requested resource was not found"))
}
