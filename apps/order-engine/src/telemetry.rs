//! OpenTelemetry Tracing Setup
//!
//! Initializes tracing with an optional OTLP exporter.
//!
//! # Configuration
//!
//! - `OTEL_EXPORTER_OTLP_ENDPOINT`: OTLP gRPC endpoint (default: `http://localhost:4317`)
//! - `OTEL_ENABLED`: Set to `false` to disable OTEL tracing (uses console only)
//! - `OTEL_SERVICE_NAME`: Service name for traces (default: `order-engine`)
//!
//! # Usage
//!
//! ```rust,ignore
//! use order_engine::telemetry::init_telemetry;
//!
//! #[tokio::main]
//! async fn main() {
//!     let _guard = init_telemetry();
//!     // ... application code
//! }
//! ```

use opentelemetry::trace::TracerProvider;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

/// Telemetry settings resolved from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Whether the OTLP exporter is enabled.
    pub enabled: bool,
    /// OTLP gRPC endpoint.
    pub otlp_endpoint: String,
    /// Service name attached to exported spans.
    pub service_name: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            otlp_endpoint: "http://localhost:4317".to_string(),
            service_name: "order-engine".to_string(),
        }
    }
}

impl TelemetryConfig {
    /// Resolve the configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            enabled: std::env::var("OTEL_ENABLED")
                .map(|v| v != "false")
                .unwrap_or(defaults.enabled),
            otlp_endpoint: std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
                .unwrap_or(defaults.otlp_endpoint),
            service_name: std::env::var("OTEL_SERVICE_NAME").unwrap_or(defaults.service_name),
        }
    }
}

/// Guard that shuts down the tracer provider on drop.
pub struct TelemetryGuard {
    provider: Option<SdkTracerProvider>,
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take() {
            if let Err(e) = provider.shutdown() {
                eprintln!("Error shutting down tracer provider: {e:?}");
            }
        }
    }
}

/// Initialize tracing from environment variables.
///
/// Returns a guard that will shut down the tracer provider when dropped.
///
/// # Panics
///
/// Panics if tracing subscriber initialization fails.
#[must_use]
pub fn init_telemetry() -> TelemetryGuard {
    init_telemetry_with_config(TelemetryConfig::from_env())
}

/// Initialize tracing with an explicit configuration.
///
/// Returns a guard that will shut down the tracer provider when dropped.
///
/// # Panics
///
/// Panics if tracing subscriber initialization fails.
#[must_use]
pub fn init_telemetry_with_config(config: TelemetryConfig) -> TelemetryGuard {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if !config.enabled {
        // Console-only tracing
        tracing_subscriber::fmt().with_env_filter(env_filter).init();

        tracing::info!("OpenTelemetry disabled (OTEL_ENABLED=false), using console logging only");
        return TelemetryGuard { provider: None };
    }

    // Build OTLP exporter
    let exporter = match opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&config.otlp_endpoint)
        .build()
    {
        Ok(exp) => exp,
        Err(e) => {
            eprintln!("Failed to create OTLP exporter: {e:?}, falling back to console logging");
            tracing_subscriber::fmt().with_env_filter(env_filter).init();
            return TelemetryGuard { provider: None };
        }
    };

    let provider = SdkTracerProvider::builder()
        .with_simple_exporter(exporter)
        .build();

    let tracer = provider.tracer(config.service_name.clone());

    let otel_layer = tracing_opentelemetry::layer().with_tracer(tracer);
    let fmt_layer = tracing_subscriber::fmt::layer();

    Registry::default()
        .with(env_filter)
        .with(fmt_layer)
        .with(otel_layer)
        .init();

    tracing::info!(
        service_name = %config.service_name,
        endpoint = %config.otlp_endpoint,
        "OpenTelemetry initialized"
    );

    TelemetryGuard {
        provider: Some(provider),
    }
}
