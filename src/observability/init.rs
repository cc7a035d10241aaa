//! Tracing subscriber setup.

use super::exporter;
use super::otlp_json::SCOPE_NAME;
use crate::infrastructure::data_dir;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use std::sync::OnceLock;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Name of the trace file inside the data directory.
pub const TRACE_FILE: &str = "provider-directory-otlp.json";

static INSTALLED: OnceLock<bool> = OnceLock::new();

/// Installs the global subscriber with file-based OTLP export.
///
/// The filter comes from `RUST_LOG` when set, otherwise from
/// `config.trace_level` (default `"info"`). Only the first call does any
/// work; later calls report the first call's outcome.
///
/// # Returns
///
/// `true` if tracing is active. Failure to create the data directory or to
/// install the subscriber leaves tracing off; it is never fatal.
///
/// # Example
///
/// ```rust,no_run
/// use provider_directory::observability::init_tracing;
/// use provider_directory::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) -> bool {
    *INSTALLED.get_or_init(|| install(config))
}

fn install(config: &Config) -> bool {
    let dir = data_dir();
    if std::fs::create_dir_all(&dir).is_err() {
        return false;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = config.trace_level.as_deref().unwrap_or("info");
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
    });

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SCOPE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = exporter::tracer_provider(dir.join(TRACE_FILE), resource);
    let tracer = provider.tracer(SCOPE_NAME);

    tracing_subscriber::registry()
        .with(filter)
        .with(OpenTelemetryLayer::new(tracer))
        .try_init()
        .is_ok()
}
