//! HTTP clients for the backend services.
//!
//! Each backend service has a trait describing its operations (for example [`DriverClient`]) and
//! a `*Reqwest` implementation that calls the service over HTTP. Handlers only see the traits, via
//! the [`Clients`] bundle held in [`crate::AppState`].
//!
//! Every client forwards to the same method and relative path that the gateway exposes, on the
//! base URL configured for its service. Non-success responses are classified here:
//!
//! - 4xx becomes [`Error::BadRequest`] carrying the service's message
//! - 5xx becomes [`Error::InternalServer`] carrying the service's message
//! - transport failures and undecodable bodies become [`Error::Other`]

pub mod administrators;
pub mod auth;
pub mod drivers;
pub mod invitation_codes;
pub mod problems;
pub mod routes;
pub mod vehicle_assignments;
pub mod vehicles;

pub use administrators::{AdministratorClient, AdministratorClientReqwest};
pub use auth::{AuthClient, AuthClientReqwest};
pub use drivers::{DriverClient, DriverClientReqwest};
pub use invitation_codes::{InvitationCodeClient, InvitationCodeClientReqwest};
pub use problems::{ProblemClient, ProblemClientReqwest};
pub use routes::{RouteClient, RouteClientReqwest};
pub use vehicle_assignments::{VehicleAssignmentClient, VehicleAssignmentClientReqwest};
pub use vehicles::{VehicleClient, VehicleClientReqwest};

use crate::config::{ServiceEndpoint, ServicesConfig};
use crate::errors::{Error, Result};
use anyhow::Context;
use axum::{
    body::Body,
    http::{HeaderMap, Method, StatusCode, header},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use reqwest::{Client, RequestBuilder};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::sync::{Arc, Once};
use tracing::{debug, instrument};
use url::Url;

/// All backend clients, shared by every request handler.
#[derive(Clone)]
pub struct Clients {
    pub administrators: Arc<dyn AdministratorClient>,
    pub auth: Arc<dyn AuthClient>,
    pub drivers: Arc<dyn DriverClient>,
    pub invitation_codes: Arc<dyn InvitationCodeClient>,
    pub problems: Arc<dyn ProblemClient>,
    pub routes: Arc<dyn RouteClient>,
    pub vehicle_assignments: Arc<dyn VehicleAssignmentClient>,
    pub vehicles: Arc<dyn VehicleClient>,
}

impl Clients {
    /// Build the HTTP clients for every configured service.
    pub fn from_config(services: &ServicesConfig) -> anyhow::Result<Self> {
        Ok(Self {
            administrators: Arc::new(AdministratorClientReqwest::new(DownstreamClient::new(
                "administrators",
                &services.administrators,
            )?)),
            auth: Arc::new(AuthClientReqwest::new(DownstreamClient::new("auth", &services.auth)?)),
            drivers: Arc::new(DriverClientReqwest::new(DownstreamClient::new("drivers", &services.drivers)?)),
            invitation_codes: Arc::new(InvitationCodeClientReqwest::new(DownstreamClient::new(
                "invitation_codes",
                &services.invitation_codes,
            )?)),
            problems: Arc::new(ProblemClientReqwest::new(DownstreamClient::new("problems", &services.problems)?)),
            routes: Arc::new(RouteClientReqwest::new(DownstreamClient::new("routes", &services.routes)?)),
            vehicle_assignments: Arc::new(VehicleAssignmentClientReqwest::new(DownstreamClient::new(
                "vehicle_assignments",
                &services.vehicle_assignments,
            )?)),
            vehicles: Arc::new(VehicleClientReqwest::new(DownstreamClient::new("vehicles", &services.vehicles)?)),
        })
    }
}

static CRYPTO_PROVIDER: Once = Once::new();

/// reqwest is built without a bundled rustls provider, so one has to be installed process-wide
/// before the first client is constructed. `main` does the same; whichever runs first wins.
fn ensure_crypto_provider() {
    CRYPTO_PROVIDER.call_once(|| {
        let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
    });
}

/// Thin reqwest wrapper bound to one backend service.
#[derive(Debug, Clone)]
pub struct DownstreamClient {
    service: &'static str,
    base_url: Url,
    client: Client,
}

impl DownstreamClient {
    pub fn new(service: &'static str, endpoint: &ServiceEndpoint) -> anyhow::Result<Self> {
        ensure_crypto_provider();
        let client = Client::builder()
            .timeout(endpoint.timeout)
            .build()
            .with_context(|| format!("Failed to create HTTP client for {service} service"))?;

        Ok(Self {
            service,
            base_url: endpoint.url.clone(),
            client,
        })
    }

    pub fn service(&self) -> &'static str {
        self.service
    }

    /// Appends `segments` to the base URL, percent-encoding each one as a single path segment.
    pub(crate) fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Base URL for {} service cannot be a base: {}", self.service, self.base_url))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let url = self.url(segments)?;
        debug!(service = self.service, %method, %url, "Calling backend service");
        Ok(self.client.request(method, url))
    }

    /// Sends the request and turns non-success statuses into gateway errors.
    async fn dispatch(&self, request: RequestBuilder) -> Result<reqwest::Response> {
        let response = request
            .send()
            .await
            .with_context(|| format!("Request to {} service failed", self.service))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(service = self.service, %status, "Backend service returned an error");
        Err(classify_error(status, &body))
    }

    async fn decode<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let body = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read response body from {} service", self.service))?;

        serde_json::from_slice(&body)
            .with_context(|| format!("Failed to decode response body from {} service", self.service))
            .map_err(Error::from)
    }

    /// Request without a body, decoding a JSON response.
    #[instrument(skip(self), fields(service = self.service), err)]
    pub async fn fetch<T: DeserializeOwned>(&self, method: Method, segments: &[&str]) -> Result<T> {
        let response = self.dispatch(self.request(method, segments)?).await?;
        self.decode(response).await
    }

    /// Request with a JSON body, decoding a JSON response.
    #[instrument(skip(self, body), fields(service = self.service), err)]
    pub async fn send<B, T>(&self, method: Method, segments: &[&str], body: &B) -> Result<T>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.dispatch(self.request(method, segments)?.json(body)).await?;
        self.decode(response).await
    }

    /// Request without a body whose response body is ignored.
    #[instrument(skip(self), fields(service = self.service), err)]
    pub async fn execute(&self, method: Method, segments: &[&str]) -> Result<()> {
        self.dispatch(self.request(method, segments)?).await?;
        Ok(())
    }

    /// Request whose successful response is handed back verbatim.
    #[instrument(skip(self, body), fields(service = self.service), err)]
    pub async fn forward<B>(&self, method: Method, segments: &[&str], body: Option<&B>) -> Result<ForwardedResponse>
    where
        B: Serialize + Sync + ?Sized,
    {
        let mut request = self.request(method, segments)?;
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = self.dispatch(request).await?;
        ForwardedResponse::read(self.service, response).await
    }
}

/// Error body shapes returned by the backend services.
#[derive(Debug, Default, Deserialize)]
struct DownstreamErrorBody {
    message: Option<String>,
    #[serde(rename = "_embedded")]
    embedded: Option<EmbeddedErrors>,
}

#[derive(Debug, Deserialize)]
struct EmbeddedErrors {
    #[serde(default)]
    errors: Vec<EmbeddedError>,
}

#[derive(Debug, Deserialize)]
struct EmbeddedError {
    message: Option<String>,
}

/// Picks the most specific message a backend service sent back.
fn downstream_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<DownstreamErrorBody>(body) {
        let embedded = parsed
            .embedded
            .and_then(|e| e.errors.into_iter().find_map(|e| e.message))
            .filter(|m| !m.trim().is_empty());
        let top_level = parsed.message.filter(|m| !m.trim().is_empty());

        // Framework-style bodies put a generic reason at the top and the detail in `_embedded`
        if let Some(message) = embedded.or(top_level) {
            return message;
        }
    }

    let text = body.trim();
    if text.is_empty() || text.starts_with('{') {
        status.canonical_reason().unwrap_or("Unknown error").to_string()
    } else {
        text.to_string()
    }
}

/// Maps a non-success backend response onto the gateway error taxonomy.
pub(crate) fn classify_error(status: StatusCode, body: &str) -> Error {
    let message = downstream_message(status, body);
    if status.is_client_error() {
        Error::BadRequest { message }
    } else if status.is_server_error() {
        Error::InternalServer { message }
    } else {
        Error::Other(anyhow::anyhow!("Unexpected status {status} from backend service: {message}"))
    }
}

/// Headers that describe a single connection and must not be copied onto our own response.
const HOP_BY_HOP_HEADERS: [header::HeaderName; 7] = [
    header::CONNECTION,
    header::CONTENT_LENGTH,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
];

/// A backend response passed through to the caller unchanged.
#[derive(Debug, Clone)]
pub struct ForwardedResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl ForwardedResponse {
    async fn read(service: &str, response: reqwest::Response) -> Result<Self> {
        let status = response.status();
        let mut headers = response.headers().clone();
        for name in &HOP_BY_HOP_HEADERS {
            headers.remove(name);
        }
        headers.remove("keep-alive");
        headers.remove(header::UPGRADE);

        let body = response
            .bytes()
            .await
            .with_context(|| format!("Failed to read response body from {service} service"))?;

        Ok(Self { status, headers, body })
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok())
    }
}

impl IntoResponse for ForwardedResponse {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}
