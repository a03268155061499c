//! JSON:API media type enforcement.
//!
//! `POST` and `PUT` requests under `/api/` must declare
//! `Content-Type: application/vnd.api+json`. Anything else is answered with
//! `415 INVALID_CONTENT_TYPE` before routing, authentication or body parsing.

use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::Method;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{Error, ResponseError};
use futures_util::future::{Either, LocalBoxFuture, Ready, ready};
use tracing::debug;

use super::error::ApiError;
use super::json_api::JSON_API_MEDIA_TYPE;

const API_PREFIX: &str = "/api/";

/// Whether a request with this method, path and `Content-Type` is refused.
fn rejects(method: &Method, path: &str, content_type: Option<&str>) -> bool {
    let has_body = method == Method::POST || method == Method::PUT;
    if !has_body || !path.starts_with(API_PREFIX) {
        return false;
    }
    !content_type.is_some_and(|value| value.trim_start().starts_with(JSON_API_MEDIA_TYPE))
}

/// Middleware rejecting non JSON:API request bodies.
#[derive(Clone, Copy, Default)]
pub struct JsonApiContentType;

impl<S, B> Transform<S, ServiceRequest> for JsonApiContentType
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JsonApiContentTypeMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JsonApiContentTypeMiddleware { service }))
    }
}

/// Service wrapper produced by [`JsonApiContentType`].
pub struct JsonApiContentTypeMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for JsonApiContentTypeMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = Either<
        LocalBoxFuture<'static, Result<Self::Response, Self::Error>>,
        Ready<Result<Self::Response, Self::Error>>,
    >;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok());
        if rejects(req.method(), req.path(), content_type) {
            debug!(
                method = %req.method(),
                path = req.path(),
                content_type = content_type.unwrap_or("<none>"),
                "rejecting non JSON:API request body"
            );
            let response = ApiError::unsupported_media_type().error_response();
            return Either::Right(ready(Ok(req
                .into_response(response)
                .map_into_right_body())));
        }

        let fut = self.service.call(req);
        Either::Left(Box::pin(async move {
            let res = fut.await?;
            Ok(res.map_into_left_body())
        }))
    }
}
