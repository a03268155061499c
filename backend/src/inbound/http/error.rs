//! HTTP adapter mapping for domain errors.
//!
//! Domain errors stay HTTP-agnostic; this module turns them (and framework
//! failures such as malformed bodies) into JSON:API error documents with the
//! right status code. Internal and dependency failures are logged and
//! replaced with generic text on the wire.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use tracing::error;

use crate::domain::{Error, ErrorCode, TraceId};

use super::json_api::{ErrorDocument, ErrorSource, JsonApiError, json_api_response};

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// How validation failures are labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationStyle {
    /// `BAD_REQUEST` / "Bad Request".
    BadRequest,
    /// `VALIDATION_ERROR` / "Validation Failed".
    ValidationFailed,
}

/// A single JSON:API error plus its HTTP status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    body: JsonApiError,
}

impl ApiError {
    /// Build an error with no source.
    pub fn new(
        status: StatusCode,
        code: impl Into<String>,
        title: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            status,
            body: JsonApiError {
                id: TraceId::current().map(|id| id.to_string()),
                status: status.as_u16().to_string(),
                code: code.into(),
                title: title.into(),
                detail: detail.into(),
                source: None,
            },
        }
    }

    /// Point at an attribute of the request document.
    #[must_use]
    pub fn with_pointer(mut self, pointer: impl Into<String>) -> Self {
        self.body.source = Some(ErrorSource {
            pointer: Some(pointer.into()),
            parameter: None,
        });
        self
    }

    /// Name the offending path or query parameter.
    #[must_use]
    pub fn with_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.body.source = Some(ErrorSource {
            pointer: None,
            parameter: Some(parameter.into()),
        });
        self
    }

    /// Translate a domain error using the given validation labelling.
    pub fn from_domain(error: Error, style: ValidationStyle) -> Self {
        let mapped = match error.code() {
            ErrorCode::InvalidRequest => {
                let (code, title) = match style {
                    ValidationStyle::BadRequest => ("BAD_REQUEST", "Bad Request"),
                    ValidationStyle::ValidationFailed => ("VALIDATION_ERROR", "Validation Failed"),
                };
                Self::new(StatusCode::BAD_REQUEST, code, title, error.message())
            }
            ErrorCode::ServiceUnavailable => {
                error!(
                    trace_id = error.trace_id(),
                    error = %error,
                    "dependency unavailable"
                );
                Self::new(
                    StatusCode::SERVICE_UNAVAILABLE,
                    "SERVICE_UNAVAILABLE",
                    "Service Unavailable",
                    "A required service is temporarily unavailable",
                )
            }
            ErrorCode::InternalError => {
                error!(
                    trace_id = error.trace_id(),
                    error = %error,
                    "internal error"
                );
                Self::internal()
            }
        };

        let mapped = match error.field() {
            Some(field) => mapped.with_pointer(format!("/data/attributes/{field}")),
            None => mapped,
        };
        match error.trace_id() {
            Some(id) => mapped.with_id(id),
            None => mapped,
        }
    }

    fn with_id(mut self, id: &str) -> Self {
        self.body.id = Some(id.to_owned());
        self
    }

    /// `401` for a missing or wrong API key.
    pub fn unauthorized(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, "UNAUTHORIZED", "Unauthorized", detail)
    }

    /// `404` with a structured body.
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            "RESOURCE_NOT_FOUND",
            "Resource Not Found",
            detail,
        )
    }

    /// `415` for POST/PUT bodies that are not JSON:API.
    #[must_use]
    pub fn unsupported_media_type() -> Self {
        Self::new(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "INVALID_CONTENT_TYPE",
            "Unsupported Media Type",
            "Content-Type must be 'application/vnd.api+json' for JSON:API requests",
        )
    }

    /// `400` for a body that cannot be parsed.
    #[must_use]
    pub fn invalid_json() -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "INVALID_JSON",
            "Invalid JSON",
            "The request body contains invalid JSON",
        )
    }

    /// `400` for a path or query parameter of the wrong type.
    pub fn type_mismatch(parameter: &str, value: &str) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            "TYPE_MISMATCH",
            "Type Mismatch",
            format!("Invalid value '{value}' for parameter '{parameter}'"),
        )
        .with_parameter(parameter)
    }

    /// `500` with redacted detail.
    #[must_use]
    pub fn internal() -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            "INTERNAL_ERROR",
            "Internal Server Error",
            "An unexpected error occurred",
        )
    }

    /// The error object that will be rendered.
    #[must_use]
    pub const fn body(&self) -> &JsonApiError {
        &self.body
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        Self::from_domain(error, ValidationStyle::BadRequest)
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}: {}", self.body.status, self.body.code, self.body.detail)
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        json_api_response(
            self.status,
            &ErrorDocument {
                errors: vec![self.body.clone()],
            },
        )
    }
}
