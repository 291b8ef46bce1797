use std::env;
use std::net::{AddrParseError, SocketAddr};
use thiserror::Error;

/// URL for accessing the PostgreSQL database. When unset, todos are kept in memory only.
pub const DB_URL: &str = "DATABASE_URL";
/// Socket address the HTTP server binds to, such as `0.0.0.0:8080`
pub const LISTEN_ADDRESS: &str = "LISTEN_ADDRESS";
/// Log level configuration for the application. For formatting info, see [tracing_subscriber's documentation](https://docs.rs/tracing-subscriber/latest/tracing_subscriber/filter/struct.EnvFilter.html)
pub const LOG_LEVEL: &str = "LOG_LEVEL";

/// OpenTelemetry span export URL. Should be http://localhost:4317 by default, as the service should
/// have an OpenTelemetry collector sidecar which directs metrics to the correct place
pub const OTEL_SPAN_EXPORT_URL: &str = "OTEL_SPAN_EXPORT_URL";
/// OpenTelemetry metrics export URL. Should be http://localhost:4317 by default, as the service should
/// have an OpenTelemetry collector sidecar which directs metrics to the correct place
pub const OTEL_METRIC_EXPORT_URL: &str = "OTEL_METRIC_EXPORT_URL";

/// URL for accessing PostgreSQL during database integration tests (should not contain a database name in the path)
pub const TEST_DB_URL: &str = "TEST_DB_URL";

const DEFAULT_LISTEN_ADDRESS: ([u8; 4], u16) = ([0, 0, 0, 0], 8080);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{variable} must be a socket address like 0.0.0.0:8080, got {value:?}")]
    InvalidAddress {
        variable: &'static str,
        value: String,
        #[source]
        cause: AddrParseError,
    },
}

/// Where OpenTelemetry data gets shipped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtelEndpoints {
    pub spans: String,
    pub metrics: String,
}

/// Startup configuration, read once from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_url: Option<String>,
    pub listen_address: SocketAddr,
    /// Only present when both export URLs are configured
    pub otel_endpoints: Option<OtelEndpoints>,
}

impl AppConfig {
    pub fn from_env() -> Result<AppConfig, ConfigError> {
        Self::from_lookup(|variable| env::var(variable).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<AppConfig, ConfigError> {
        // Blank values count as unset
        let read = |variable: &str| lookup(variable).filter(|value| !value.trim().is_empty());

        let listen_address = match read(LISTEN_ADDRESS) {
            Some(value) => value
                .parse()
                .map_err(|cause| ConfigError::InvalidAddress {
                    variable: LISTEN_ADDRESS,
                    value,
                    cause,
                })?,
            None => SocketAddr::from(DEFAULT_LISTEN_ADDRESS),
        };

        let otel_endpoints = match (read(OTEL_SPAN_EXPORT_URL), read(OTEL_METRIC_EXPORT_URL)) {
            (Some(spans), Some(metrics)) => Some(OtelEndpoints { spans, metrics }),
            _ => None,
        };

        Ok(AppConfig {
            db_url: read(DB_URL),
            listen_address,
            otel_endpoints,
        })
    }
}
