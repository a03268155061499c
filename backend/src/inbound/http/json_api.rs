//! JSON:API document envelope.
//!
//! ```text
//! {"data": {...}, "links": {"self": "..."}, "meta": {"version": "1.0"}}
//! {"errors": [{"status": "400", "code": "BAD_REQUEST", ...}]}
//! ```
//!
//! Absent members are omitted. Success bodies are [`JsonApiDocument`]s and
//! failures are [`ErrorDocument`]s, so a response never mixes the two.

use std::collections::BTreeMap;

use actix_web::HttpResponse;
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

/// Media type required on JSON:API requests and used on every API response.
pub const JSON_API_MEDIA_TYPE: &str = "application/vnd.api+json";

/// `Content-Type` header value for JSON:API responses.
pub fn json_api_content_type() -> ContentType {
    ContentType(mime_json_api())
}

fn mime_json_api() -> actix_web::mime::Mime {
    JSON_API_MEDIA_TYPE
        .parse()
        .unwrap_or(actix_web::mime::APPLICATION_JSON)
}

/// Relation name to URL map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct Links(BTreeMap<String, String>);

impl Links {
    /// Empty link set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a link.
    #[must_use]
    pub fn with(mut self, rel: impl Into<String>, href: impl Into<String>) -> Self {
        self.0.insert(rel.into(), href.into());
        self
    }

    /// Look up a link by relation name.
    #[must_use]
    pub fn get(&self, rel: &str) -> Option<&str> {
        self.0.get(rel).map(String::as_str)
    }
}

/// Free-form document metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct Meta(BTreeMap<String, Value>);

impl Meta {
    /// Empty metadata.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Look up an entry.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

/// Location of the input that caused an error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorSource {
    /// JSON pointer into the request document, e.g. `/data/attributes/price`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pointer: Option<String>,
    /// Name of the offending path or query parameter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameter: Option<String>,
}

/// JSON:API error object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct JsonApiError {
    /// Trace identifier of the failed request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// HTTP status code as a string.
    #[schema(example = "400")]
    pub status: String,
    /// Stable application error code.
    #[schema(example = "VALIDATION_ERROR")]
    pub code: String,
    #[schema(example = "Validation Failed")]
    pub title: String,
    #[schema(example = "Product price cannot be negative")]
    pub detail: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<ErrorSource>,
}

/// Top-level JSON:API document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct JsonApiDocument<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,
}

impl<T> Default for JsonApiDocument<T> {
    fn default() -> Self {
        Self {
            data: None,
            links: None,
            meta: None,
        }
    }
}

impl<T> JsonApiDocument<T> {
    /// Document carrying primary data.
    pub fn data(data: T) -> Self {
        Self {
            data: Some(data),
            ..Self::default()
        }
    }

    /// Attach links.
    #[must_use]
    pub fn with_links(mut self, links: Links) -> Self {
        self.links = Some(links);
        self
    }

    /// Attach metadata; empty metadata is dropped.
    #[must_use]
    pub fn with_meta(mut self, meta: Meta) -> Self {
        self.meta = (meta != Meta::default()).then_some(meta);
        self
    }
}

/// Top-level error document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorDocument {
    pub errors: Vec<JsonApiError>,
}

/// Build a response whose body is `body` rendered as JSON:API.
pub fn json_api_response<B: Serialize>(status: StatusCode, body: &B) -> HttpResponse {
    HttpResponse::build(status)
        .insert_header(json_api_content_type())
        .json(body)
}
