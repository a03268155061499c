//! HTTP inbound adapter exposing the product API.
//!
//! Middleware order, outermost first:
//!
//! 1. [`Trace`]: trace id, `trace-id` header, completion log.
//! 2. [`JsonApiContentType`]: `415` for non JSON:API bodies.
//! 3. [`ApiKeyAuth`]: resolves `X-API-Key` into a request principal.
//!
//! Handlers then demand a principal through [`api_key::AuthenticatedClient`].

use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};

use crate::middleware::Trace;

pub mod api_key;
pub mod connectivity;
pub mod content_type;
pub mod error;
pub mod extract;
pub mod health;
pub mod json_api;
pub mod products;
pub mod state;

pub use error::ApiResult;

use api_key::{ApiKeyAuth, ApiKeyDigest};
use content_type::JsonApiContentType;
use health::HealthState;
use state::HttpState;

/// Register every route and extractor config.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(extract::json_config())
        .app_data(extract::path_config())
        .app_data(extract::query_config())
        .service(health::health)
        .service(health::ready)
        .service(health::live)
        .configure(connectivity::configure)
        .configure(products::v1::configure)
        .configure(products::v2::configure)
        .configure(products::legacy::configure);
}

/// Shared state needed to assemble the application.
#[derive(Clone)]
pub struct AppDependencies {
    pub health: web::Data<HealthState>,
    pub state: web::Data<HttpState>,
    pub api_key: ApiKeyDigest,
}

/// Assemble the application with middleware, routes and the JSON:API 404
/// fallback.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<EitherBody<BoxBody>>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health,
        state,
        api_key,
    } = deps;

    App::new()
        .app_data(health)
        .app_data(state)
        .wrap(ApiKeyAuth::new(api_key))
        .wrap(JsonApiContentType)
        .wrap(Trace)
        .configure(configure)
        .default_service(web::to(extract::not_found))
}
