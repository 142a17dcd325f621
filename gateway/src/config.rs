//! Application configuration management.
//!
//! Configuration is loaded from a YAML file with environment variable overrides. The configuration
//! file path defaults to `config.yaml` but can be specified via `-f` flag or `CHIOPS_CONFIG`
//! environment variable.
//!
//! ## Loading Priority
//!
//! Configuration sources are merged in the following order (later sources override earlier ones):
//!
//! 1. **YAML config file** - Base configuration (default: `config.yaml`)
//! 2. **Environment variables** - Variables prefixed with `CHIOPS_` override YAML values
//!
//! For nested config values, use double underscores in environment variables. For example,
//! `CHIOPS_SERVICES__DRIVERS__URL=http://drivers:8080` sets the `services.drivers.url` field.
//!
//! ## Usage
//!
//! ```no_run
//! use clap::Parser;
//! use chiops_gateway::config::{Args, Config};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let args = Args::parse();
//! let config = Config::load(&args)?;
//!
//! println!("Gateway will bind to {}:{}", config.host, config.port);
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration Structure
//!
//! - **Server**: `host`, `port` - HTTP server binding configuration
//! - **Services**: `services.<name>.url`, `services.<name>.timeout` - One entry per backend service
//! - **Security**: `cors` - CORS settings for browser clients
//! - **Limits**: `limits.max_image_size`, `limits.max_request_body_size` - Upload limits
//! - **Features**: `enable_metrics`, `enable_otel_export` - Optional feature toggles
//!
//! ## Environment Variable Examples
//!
//! ```bash
//! # Override server port
//! CHIOPS_PORT=8080
//!
//! # Point the vehicle client at another host
//! CHIOPS_SERVICES__VEHICLES__URL="http://vehicles.internal:8080"
//!
//! # Give the route service more time
//! CHIOPS_SERVICES__ROUTES__TIMEOUT=1m
//! ```

use clap::Parser;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::errors::Error;

/// Simple CLI args - just for specifying config file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "CHIOPS_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Validate configuration and exit without starting the server.
    #[arg(long)]
    pub validate: bool,
}

/// Main application configuration.
///
/// All fields have defaults suitable for running every backend service on localhost.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP server host to bind to (e.g., "0.0.0.0" for all interfaces)
    pub host: String,
    /// HTTP server port to bind to
    pub port: u16,
    /// Backend services the gateway forwards to
    pub services: ServicesConfig,
    /// CORS configuration for browser clients
    pub cors: CorsConfig,
    /// Upload limits
    pub limits: LimitsConfig,
    /// Enable Prometheus metrics endpoint at `/internal/metrics`
    pub enable_metrics: bool,
    /// Enable OpenTelemetry OTLP export for distributed tracing
    pub enable_otel_export: bool,
}

/// Location of a single backend service.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceEndpoint {
    /// Base URL; request paths are appended to it
    pub url: Url,
    /// Per-request timeout
    #[serde(with = "humantime_serde", default = "ServiceEndpoint::default_timeout")]
    pub timeout: Duration,
}

impl ServiceEndpoint {
    fn default_timeout() -> Duration {
        Duration::from_secs(30)
    }

    fn localhost(port: u16) -> Self {
        Self {
            url: Url::parse(&format!("http://localhost:{port}")).expect("static localhost URL is valid"),
            timeout: Self::default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServicesConfig {
    pub administrators: ServiceEndpoint,
    pub auth: ServiceEndpoint,
    pub drivers: ServiceEndpoint,
    pub invitation_codes: ServiceEndpoint,
    pub problems: ServiceEndpoint,
    pub routes: ServiceEndpoint,
    pub vehicle_assignments: ServiceEndpoint,
    pub vehicles: ServiceEndpoint,
}

impl ServicesConfig {
    /// All endpoints paired with their service name, in a stable order.
    pub fn endpoints(&self) -> [(&'static str, &ServiceEndpoint); 8] {
        [
            ("administrators", &self.administrators),
            ("auth", &self.auth),
            ("drivers", &self.drivers),
            ("invitation_codes", &self.invitation_codes),
            ("problems", &self.problems),
            ("routes", &self.routes),
            ("vehicle_assignments", &self.vehicle_assignments),
            ("vehicles", &self.vehicles),
        ]
    }
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            administrators: ServiceEndpoint::localhost(8081),
            auth: ServiceEndpoint::localhost(8082),
            drivers: ServiceEndpoint::localhost(8083),
            invitation_codes: ServiceEndpoint::localhost(8084),
            problems: ServiceEndpoint::localhost(8085),
            routes: ServiceEndpoint::localhost(8086),
            vehicle_assignments: ServiceEndpoint::localhost(8087),
            vehicles: ServiceEndpoint::localhost(8088),
        }
    }
}

/// CORS (Cross-Origin Resource Sharing) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsConfig {
    /// Allowed origins for CORS requests
    pub allowed_origins: Vec<CorsOrigin>,
    /// Allow credentials (cookies) in CORS requests
    pub allow_credentials: bool,
    /// Cache preflight requests for this many seconds
    pub max_age: Option<u64>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![CorsOrigin::Wildcard],
            allow_credentials: false,
            max_age: Some(3600),
        }
    }
}

/// CORS origin specification.
///
/// Can be either a wildcard (`*`) to allow all origins, or a specific URL.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CorsOrigin {
    /// Allow all origins (`*`)
    #[serde(deserialize_with = "parse_wildcard")]
    Wildcard,
    /// Specific origin URL (e.g., `https://fleet.example.com`)
    #[serde(deserialize_with = "parse_url")]
    Url(Url),
}

fn parse_wildcard<'de, D>(deserializer: D) -> Result<(), D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    if s == "*" {
        Ok(())
    } else {
        Err(serde::de::Error::custom("Expected '*'"))
    }
}

fn parse_url<'de, D>(deserializer: D) -> Result<Url, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    Url::parse(&s).map_err(serde::de::Error::custom)
}

/// Upload limits for vehicle creation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsConfig {
    /// Largest accepted vehicle image, in bytes
    pub max_image_size: usize,
    /// Largest accepted multipart body on `/vehicle/create`, in bytes
    pub max_request_body_size: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_image_size: 5 * 1024 * 1024,         // 5 MB
            max_request_body_size: 6 * 1024 * 1024, // image plus the vehicle part
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            services: ServicesConfig::default(),
            cors: CorsConfig::default(),
            limits: LimitsConfig::default(),
            enable_metrics: true,
            enable_otel_export: false,
        }
    }
}

impl Config {
    #[allow(clippy::result_large_err)]
    pub fn load(args: &Args) -> Result<Self, figment::Error> {
        let config: Self = Self::figment(args).extract()?;
        config.validate().map_err(|e| figment::Error::from(e.to_string()))?;
        Ok(config)
    }

    /// Validate the configuration for consistency and required fields
    pub fn validate(&self) -> Result<(), Error> {
        for (name, endpoint) in self.services.endpoints() {
            if endpoint.timeout.is_zero() {
                return Err(Error::InternalServer {
                    message: format!("Config validation: services.{name}.timeout must be greater than zero"),
                });
            }
            if endpoint.url.cannot_be_a_base() {
                return Err(Error::InternalServer {
                    message: format!("Config validation: services.{name}.url ({}) is not a valid base URL", endpoint.url),
                });
            }
        }

        if self.cors.allowed_origins.is_empty() {
            return Err(Error::InternalServer {
                message: "Config validation: CORS allowed_origins cannot be empty. Add at least one allowed origin.".to_string(),
            });
        }

        // Validate that wildcard is not used with credentials
        let has_wildcard = self.cors.allowed_origins.iter().any(|origin| matches!(origin, CorsOrigin::Wildcard));
        if has_wildcard && self.cors.allow_credentials {
            return Err(Error::InternalServer {
                message: "Config validation: CORS cannot use wildcard origin '*' with allow_credentials=true. Specify explicit origins."
                    .to_string(),
            });
        }

        if self.limits.max_image_size == 0 || self.limits.max_request_body_size == 0 {
            return Err(Error::InternalServer {
                message: "Config validation: limits.max_image_size and limits.max_request_body_size must be positive".to_string(),
            });
        }

        if self.limits.max_image_size > self.limits.max_request_body_size {
            return Err(Error::InternalServer {
                message: format!(
                    "Config validation: max_image_size ({}) cannot be greater than max_request_body_size ({})",
                    self.limits.max_image_size, self.limits.max_request_body_size
                ),
            });
        }

        Ok(())
    }

    pub fn figment(args: &Args) -> Figment {
        Figment::new()
            // Load base config file
            .merge(Yaml::file(&args.config))
            // Environment variables can still override specific values. CHIOPS_CONFIG names the
            // file itself and is not a config key.
            .merge(Env::prefixed("CHIOPS_").ignore(&["config"]).split("__"))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
