//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;

use state_builders::build_http_state;

use actix_web::dev::Server;
use actix_web::{HttpServer, web};
use tracing::info;

#[cfg(debug_assertions)]
use product_api::doc::ApiDoc;
use product_api::inbound::http::health::HealthState;
use product_api::inbound::http::{AppDependencies, build_app};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

/// Construct an Actix HTTP server from the provided health state and
/// configuration.
///
/// Readiness flips to up once the listener is bound. Liveness fails as soon
/// as Ctrl-C starts the graceful drain.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let deps = AppDependencies {
        health: health_state.clone(),
        state: web::Data::new(build_http_state(&config)),
        api_key: config.api_key,
    };

    let server = HttpServer::new(move || {
        let app = build_app(deps.clone());

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    fail_liveness_on_shutdown(health_state);
    info!(bind_addr = %config.bind_addr, "product API listening");
    Ok(server)
}

fn fail_liveness_on_shutdown(health_state: web::Data<HealthState>) {
    actix_web::rt::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            health_state.mark_unhealthy();
            info!("shutdown requested, draining connections");
        }
    });
}
