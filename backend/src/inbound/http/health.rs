//! Actuator probes for orchestration and load balancers.
//!
//! `/actuator/health` aggregates readiness and liveness; the two probe
//! endpoints report each flag on its own. None of them require the API key.

use std::sync::atomic::{AtomicBool, Ordering};

use actix_web::{HttpResponse, get, http::header, web};
use serde::Serialize;
use utoipa::ToSchema;

/// Shared readiness and liveness flags.
pub struct HealthState {
    ready: AtomicBool,
    live: AtomicBool,
}

impl Default for HealthState {
    fn default() -> Self {
        Self {
            ready: AtomicBool::new(false),
            live: AtomicBool::new(true),
        }
    }
}

impl HealthState {
    /// Not ready, but live.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark the service as ready to take traffic.
    pub fn mark_ready(&self) {
        self.ready.store(true, Ordering::Release);
    }

    /// Fail liveness checks, e.g. while draining for shutdown.
    pub fn mark_unhealthy(&self) {
        self.live.store(false, Ordering::Release);
    }

    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Acquire)
    }

    pub fn is_alive(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }
}

/// Probe outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProbeStatus {
    Up,
    Down,
}

/// Body returned by every actuator endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct HealthBody {
    pub status: ProbeStatus,
}

fn probe_response(probe_ok: bool) -> HttpResponse {
    let (mut response, status) = if probe_ok {
        (HttpResponse::Ok(), ProbeStatus::Up)
    } else {
        (HttpResponse::ServiceUnavailable(), ProbeStatus::Down)
    };
    response
        .insert_header((header::CACHE_CONTROL, "no-store"))
        .json(HealthBody { status })
}

/// Aggregate health: `UP` only when the server is both ready and alive.
#[utoipa::path(
    get,
    path = "/actuator/health",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Service is up", body = HealthBody),
        (status = 503, description = "Service is down", body = HealthBody)
    )
)]
#[get("/actuator/health")]
pub async fn health(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.is_ready() && state.is_alive())
}

/// Readiness probe.
#[utoipa::path(
    get,
    path = "/actuator/health/ready",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is ready to handle traffic", body = HealthBody),
        (status = 503, description = "Server is not ready", body = HealthBody)
    )
)]
#[get("/actuator/health/ready")]
pub async fn ready(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.is_ready())
}

/// Liveness probe. Reports 503 once [`HealthState::mark_unhealthy`] is called.
#[utoipa::path(
    get,
    path = "/actuator/health/live",
    tags = ["health"],
    security([]),
    responses(
        (status = 200, description = "Server is alive", body = HealthBody),
        (status = 503, description = "Server is shutting down", body = HealthBody)
    )
)]
#[get("/actuator/health/live")]
pub async fn live(state: web::Data<HealthState>) -> HttpResponse {
    probe_response(state.is_alive())
}

#[cfg(test)]
mod tests {
    //! Probe status coverage.

    use actix_web::http::StatusCode;
    use actix_web::{App, test as actix_test};
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;

    async fn probe(state: web::Data<HealthState>, uri: &str) -> (StatusCode, Value) {
        let app = actix_test::init_service(
            App::new()
                .app_data(state)
                .service(health)
                .service(ready)
                .service(live),
        )
        .await;
        let res = actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request()).await;
        assert_eq!(
            res.headers()
                .get(header::CACHE_CONTROL)
                .and_then(|v| v.to_str().ok()),
            Some("no-store")
        );
        let status = res.status();
        (status, actix_test::read_body_json(res).await)
    }

    #[rstest]
    #[case("/actuator/health", StatusCode::SERVICE_UNAVAILABLE, "DOWN")]
    #[case("/actuator/health/ready", StatusCode::SERVICE_UNAVAILABLE, "DOWN")]
    #[case("/actuator/health/live", StatusCode::OK, "UP")]
    #[actix_web::test]
    async fn fresh_state_is_live_but_not_ready(
        #[case] uri: &str,
        #[case] expected: StatusCode,
        #[case] status: &str,
    ) {
        let (code, body) = probe(web::Data::new(HealthState::new()), uri).await;
        assert_eq!(code, expected);
        assert_eq!(body, json!({"status": status}));
    }

    #[rstest]
    #[actix_web::test]
    async fn ready_state_reports_up() {
        let state = web::Data::new(HealthState::new());
        state.mark_ready();
        let (code, body) = probe(state, "/actuator/health").await;
        assert_eq!(code, StatusCode::OK);
        assert_eq!(body, json!({"status": "UP"}));
    }

    #[rstest]
    #[actix_web::test]
    async fn draining_state_fails_aggregate_and_liveness() {
        let state = web::Data::new(HealthState::new());
        state.mark_ready();
        state.mark_unhealthy();
        let (aggregate, _) = probe(state.clone(), "/actuator/health").await;
        let (liveness, _) = probe(state, "/actuator/health/live").await;
        assert_eq!(aggregate, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(liveness, StatusCode::SERVICE_UNAVAILABLE);
    }
}
