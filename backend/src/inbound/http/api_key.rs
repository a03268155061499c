//! Static API key authentication.
//!
//! [`ApiKeyAuth`] inspects `X-API-Key` on every request. A matching key
//! attaches an [`ApiPrincipal`] to the request extensions; anything else
//! passes through untouched. Handlers that require authentication take an
//! [`AuthenticatedClient`] argument, which rejects with `401` when no
//! principal is present.
//!
//! The configured secret is hashed once at start-up and only the SHA-256
//! digest is retained.

use std::sync::Arc;
use std::task::{Context, Poll};

use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::HeaderValue;
use actix_web::{Error, FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{Ready, ready};
use sha2::{Digest, Sha256};
use tracing::debug;
use zeroize::Zeroizing;

use super::error::ApiError;

/// Request header carrying the shared secret.
pub const API_KEY_HEADER: &str = "X-API-Key";

const FINGERPRINT_BYTES: usize = 8;

/// SHA-256 digest of the configured API key.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKeyDigest([u8; 32]);

impl ApiKeyDigest {
    /// Hash the raw secret; the plaintext is wiped when `secret` drops.
    #[must_use]
    pub fn from_secret(secret: &Zeroizing<String>) -> Self {
        Self(Sha256::digest(secret.as_bytes()).into())
    }

    /// Whether `candidate` hashes to the configured digest.
    ///
    /// Digests are compared in full so timing does not depend on where the
    /// first mismatching byte sits.
    #[must_use]
    pub fn matches(&self, candidate: &[u8]) -> bool {
        let digest: [u8; 32] = Sha256::digest(candidate).into();
        digest
            .iter()
            .zip(self.0.iter())
            .fold(0_u8, |acc, (a, b)| acc | (a ^ b))
            == 0
    }

    /// Short hex identifier safe to log.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        hex::encode(self.0.get(..FINGERPRINT_BYTES).unwrap_or_default())
    }
}

impl std::fmt::Debug for ApiKeyDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ApiKeyDigest")
            .field(&self.fingerprint())
            .finish()
    }
}

/// Identity attached to requests that presented the right key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiPrincipal {
    /// The single shared-secret client.
    ApiClient,
}

impl ApiPrincipal {
    /// Principal name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ApiClient => "api-client",
        }
    }
}

/// Middleware resolving the API key into a request-scoped principal.
///
/// ```
/// use actix_web::App;
/// use product_api::inbound::http::api_key::{ApiKeyAuth, ApiKeyDigest};
/// use zeroize::Zeroizing;
///
/// let digest = ApiKeyDigest::from_secret(&Zeroizing::new("s3cret".to_owned()));
/// let _app = App::new().wrap(ApiKeyAuth::new(digest));
/// ```
#[derive(Clone)]
pub struct ApiKeyAuth {
    digest: Arc<ApiKeyDigest>,
}

impl ApiKeyAuth {
    /// Authenticate against `digest`.
    #[must_use]
    pub fn new(digest: ApiKeyDigest) -> Self {
        Self {
            digest: Arc::new(digest),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ApiKeyAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = ApiKeyAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ApiKeyAuthMiddleware {
            service,
            digest: Arc::clone(&self.digest),
        }))
    }
}

/// Service wrapper produced by [`ApiKeyAuth`].
pub struct ApiKeyAuthMiddleware<S> {
    service: S,
    digest: Arc<ApiKeyDigest>,
}

impl<S, B> Service<ServiceRequest> for ApiKeyAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = S::Future;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let presented = req.headers().get(API_KEY_HEADER);
        if let Some(principal) = resolve_principal(&self.digest, presented) {
            req.extensions_mut().insert(principal);
        }
        self.service.call(req)
    }
}

/// Principal for a presented key, or `None` when absent or wrong.
fn resolve_principal(
    digest: &ApiKeyDigest,
    presented: Option<&HeaderValue>,
) -> Option<ApiPrincipal> {
    presented
        .filter(|value| digest.matches(value.as_bytes()))
        .map(|_| ApiPrincipal::ApiClient)
}

/// Principal resolved for the current request, if any.
pub fn principal(req: &HttpRequest) -> Option<ApiPrincipal> {
    req.extensions().get::<ApiPrincipal>().copied()
}

/// Extractor that requires an authenticated principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedClient(pub ApiPrincipal);

impl AuthenticatedClient {
    /// Require a principal on `req`, failing with `401`.
    pub fn require(req: &HttpRequest) -> Result<Self, ApiError> {
        principal(req).map(Self).ok_or_else(|| {
            debug!(path = req.path(), "request rejected without a valid API key");
            ApiError::unauthorized("A valid X-API-Key header is required")
        })
    }
}

impl FromRequest for AuthenticatedClient {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::require(req))
    }
}
