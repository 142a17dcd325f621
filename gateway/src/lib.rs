//! # chiops-gateway: HTTP API gateway for fleet operations
//!
//! `chiops-gateway` is the single public entry point of the fleet-operations platform. It exposes
//! REST endpoints for administrators, drivers, vehicles, routes, vehicle assignments, invitation
//! codes and route problems, and forwards every request to the backend service that owns the
//! resource.
//!
//! ## Request Flow
//!
//! Each route maps to exactly one call on a backend client ([`clients`]). The handler checks the
//! shape of its input, makes the call, and returns the result. When the backend answers with an
//! error, the gateway keeps the error kind and rewords the message with what it was doing:
//!
//! ```text
//! DELETE /driver/delete/ABC123
//!   -> drivers service: 400 {"message": "curp not found"}
//!   <- 400 {"status": 400, "error": "Bad Request",
//!           "message": "Bad request when deleting driver: curp not found"}
//! ```
//!
//! Requests that match no route get a 404 (`Endpoint <path> not found`); requests whose path
//! exists under another method get a 405 (`Method <METHOD> not allowed for <path>`).
//!
//! The one transformation the gateway performs itself is on vehicle creation: the uploaded image
//! is checked and base64-encoded ([`services::VehicleImageEncodingService`]) before the vehicle is
//! submitted.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use chiops_gateway::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = chiops_gateway::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     chiops_gateway::telemetry::init_telemetry(config.enable_otel_export)?;
//!
//!     Application::new(config)?
//!         .serve(async {
//!             tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!         })
//!         .await
//! }
//! ```
//!
//! ## Configuration
//!
//! See the [`config`] module for configuration options.

pub mod api;
pub mod clients;
pub mod config;
pub mod errors;
mod openapi;
pub mod services;
pub mod telemetry;

#[cfg(test)]
pub mod test_utils;

use crate::api::handlers::{
    administrators, auth, drivers, fallback, invitation_codes, problems, routes, vehicle_assignments, vehicles,
};
use crate::clients::Clients;
use crate::config::CorsOrigin;
use crate::openapi::ApiDoc;
use crate::services::VehicleImageEncodingService;
use axum::extract::DefaultBodyLimit;
use axum::http::{HeaderValue, Method, header};
use axum::{
    Router,
    routing::{delete, get, post, put},
};
use axum_prometheus::PrometheusMetricLayer;
use bon::Builder;
pub use config::Config;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, info, instrument};
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable};

/// Application state shared across all request handlers.
///
/// Cloned per request; everything inside is either immutable configuration or `Arc`-shared.
///
/// ```ignore
/// let state = AppState::builder()
///     .config(config)
///     .clients(clients)
///     .vehicle_images(vehicle_images)
///     .build();
/// ```
#[derive(Clone, Builder)]
pub struct AppState {
    pub config: Config,
    pub clients: Clients,
    pub vehicle_images: VehicleImageEncodingService,
}

fn create_cors_layer(config: &Config) -> anyhow::Result<CorsLayer> {
    let cors_config = &config.cors;

    let allow_origin = if cors_config.allowed_origins.iter().any(|o| matches!(o, CorsOrigin::Wildcard)) {
        AllowOrigin::any()
    } else {
        let mut origins = Vec::new();
        for origin in &cors_config.allowed_origins {
            if let CorsOrigin::Url(url) = origin {
                origins.push(url.origin().ascii_serialization().parse::<HeaderValue>()?);
            }
        }
        AllowOrigin::list(origins)
    };

    let mut cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(cors_config.allow_credentials)
        .expose_headers([header::AUTHORIZATION, header::LOCATION]);

    if let Some(max_age) = cors_config.max_age {
        cors = cors.max_age(std::time::Duration::from_secs(max_age));
    }

    Ok(cors)
}

/// Build the application router with every endpoint and middleware.
///
/// Besides the API routes this adds `/healthz`, the API reference at `/docs`, Prometheus metrics
/// at `/internal/metrics` when enabled, the 404/405 fallbacks, CORS and request tracing.
///
/// # Errors
///
/// Returns an error if the CORS configuration cannot be turned into header values.
#[instrument(skip_all)]
pub fn build_router(state: AppState) -> anyhow::Result<Router> {
    let body_limit = state.config.limits.max_request_body_size;

    let api_routes = Router::new()
        // Administrators
        .route("/admin/register", post(administrators::create_administrator))
        .route("/admin/login", post(administrators::sign_in_administrator))
        .route("/admin/get/{email}", post(administrators::find_administrator_by_email))
        .route("/admin/delete/{email}", delete(administrators::delete_administrator_by_email))
        .route("/admin/update", put(administrators::update_administrator))
        .route("/admin/getall", get(administrators::get_administrator_list))
        // Authentication
        .route("/auth/login", post(auth::login))
        .route("/auth/register", post(auth::register))
        // Drivers
        .route("/driver/create", post(drivers::create_driver))
        .route("/driver/update", put(drivers::update_driver))
        .route("/driver/delete/{curp}", delete(drivers::delete_driver))
        .route("/driver/get/{curp}", get(drivers::get_driver_by_curp))
        .route("/driver/getall", get(drivers::get_all_drivers))
        // Invitation codes
        .route("/code/get/{code}", get(invitation_codes::find_by_code))
        .route("/code/generate", get(invitation_codes::generate_invitation_code))
        .route("/code/delete/{code}", delete(invitation_codes::delete_by_code))
        .route("/code/use/{code}", post(invitation_codes::mark_as_used))
        // Route problems
        .route("/route/problem/assign", post(problems::assign_problem))
        .route("/route/problem/update", put(problems::update_problem))
        .route("/route/problem/delete/{vin}", delete(problems::delete_problem))
        .route("/route/problem/get/{vin}", get(problems::get_problem))
        // Routes
        .route("/route/create", post(routes::create_route))
        .route("/route/update", put(routes::update_route))
        .route("/route/delete/{vin}", delete(routes::delete_route))
        .route("/route/getall", get(routes::get_all_routes))
        .route("/route/get/{vin}", get(routes::get_route_by_vin))
        // Vehicle assignments
        .route("/vehicle/assignment/status/{status}", get(vehicle_assignments::find_by_status))
        .route("/vehicle/assignment/history", get(vehicle_assignments::assignments_history))
        .route("/vehicle/assignment/vin/{vin}", get(vehicle_assignments::find_by_vin))
        .route("/vehicle/assignment/assign", post(vehicle_assignments::assign_vehicle_to_driver))
        .route("/vehicle/assignment/release", post(vehicle_assignments::release_vehicle_from_driver))
        .route("/vehicle/assignment/change", put(vehicle_assignments::change_driver))
        // Vehicles
        .route(
            "/vehicle/create",
            post(vehicles::create_vehicle).layer(DefaultBodyLimit::max(body_limit)),
        )
        .route("/vehicle/update", put(vehicles::update_vehicle))
        .route("/vehicle/delete/{vin}", delete(vehicles::delete_vehicle))
        .route("/vehicle/get/{vin}", get(vehicles::get_vehicle_by_vin))
        .route("/vehicle/model/{model}", get(vehicles::get_all_vehicles_by_model))
        .route("/vehicle/getall", get(vehicles::get_all_vehicles))
        .route("/vehicle/view/{filename}", get(vehicles::view_image))
        .with_state(state.clone());

    let mut router = Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .merge(api_routes)
        .merge(Scalar::with_url("/docs", ApiDoc::openapi()));

    // Add Prometheus metrics if enabled
    if state.config.enable_metrics {
        let (prometheus_layer, metric_handle) = PrometheusMetricLayer::pair();
        router = router
            .route("/internal/metrics", get(|| async move { metric_handle.render() }))
            .layer(prometheus_layer);
    }

    // Fallbacks go last: the 405 fallback only covers routes registered before it
    let router = router
        .fallback(fallback::not_found)
        .method_not_allowed_fallback(fallback::method_not_allowed);

    // Tracing wraps CORS so rejected preflights are still logged
    let router = router.layer(
        ServiceBuilder::new()
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                    .on_request(DefaultOnRequest::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            .layer(create_cors_layer(&state.config)?),
    );

    Ok(router)
}

/// The gateway: configuration plus the router built from it.
pub struct Application {
    router: Router,
    config: Config,
}

impl Application {
    /// Build the backend clients and the router for `config`.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let clients = Clients::from_config(&config.services)?;
        let vehicle_images = VehicleImageEncodingService::new(clients.vehicles.clone(), config.limits.max_image_size);

        for (service, endpoint) in config.services.endpoints() {
            info!(service, url = %endpoint.url, timeout = ?endpoint.timeout, "Configured backend service");
        }

        let state = AppState::builder()
            .config(config.clone())
            .clients(clients)
            .vehicle_images(vehicle_images)
            .build();
        let router = build_router(state)?;

        Ok(Self { router, config })
    }

    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!(
            "Gateway listening on http://{}, available at http://localhost:{}",
            bind_addr, self.config.port
        );

        // Run the server with graceful shutdown
        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        // Shutdown telemetry
        info!("Shutting down telemetry...");
        telemetry::shutdown_telemetry();

        Ok(())
    }
}
