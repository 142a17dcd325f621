//! Test utilities: a full gateway wired to a single mock backend.

use crate::config::{Config, ServiceEndpoint, ServicesConfig};
use crate::errors::ErrorResponse;
use axum::http::StatusCode;
use axum_test::{TestResponse, TestServer};
use std::time::Duration;
use wiremock::MockServer;

/// Config whose every backend service points at `backend_uri`.
///
/// Metrics stay off: the Prometheus recorder is process-global and can only be installed once.
pub fn create_test_config(backend_uri: &str) -> Config {
    let endpoint = ServiceEndpoint {
        url: backend_uri.parse().expect("mock server URI is a valid URL"),
        timeout: Duration::from_secs(5),
    };

    Config {
        host: "127.0.0.1".to_string(),
        port: 0,
        services: ServicesConfig {
            administrators: endpoint.clone(),
            auth: endpoint.clone(),
            drivers: endpoint.clone(),
            invitation_codes: endpoint.clone(),
            problems: endpoint.clone(),
            routes: endpoint.clone(),
            vehicle_assignments: endpoint.clone(),
            vehicles: endpoint,
        },
        enable_metrics: false,
        ..Default::default()
    }
}

/// Starts a mock backend and a gateway in front of it.
pub async fn create_test_app() -> (TestServer, MockServer) {
    let backend = MockServer::start().await;
    let server = crate::Application::new(create_test_config(&backend.uri()))
        .expect("Failed to create application")
        .into_test_server();
    (server, backend)
}

/// Asserts the response is a gateway error with the given status and message.
pub fn assert_error(response: &TestResponse, status: StatusCode, message: &str) {
    response.assert_status(status);
    let body: ErrorResponse = response.json();
    assert_eq!(body.status, status.as_u16());
    assert_eq!(body.message, message);
}
