//! Subscriber setup.

use super::exporter::{file_tracer_provider, SERVICE_NAME};
use super::rotating_file::RotationPolicy;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File the plugin and its worker export spans to, inside the data dir.
pub const TRACE_FILE: &str = "cinescout-otlp.json";

/// Default filter when `trace_level` is not configured.
pub const DEFAULT_TRACE_LEVEL: &str = "info";

/// Installs the global subscriber: an `EnvFilter` built from
/// `config.trace_level` feeding an OpenTelemetry layer that writes OTLP/JSON
/// to [`TRACE_FILE`].
///
/// Tracing is best effort. If the data directory cannot be created, or a
/// subscriber is already installed, this does nothing.
///
/// ```rust
/// use cinescout::observability::init_tracing;
/// use cinescout::Config;
///
/// let config = Config {
///     trace_level: Some("cinescout=debug".to_string()),
///     ..Config::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or(DEFAULT_TRACE_LEVEL);

    let data_dir = crate::infrastructure::paths::get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![KeyValue::new("service.name", SERVICE_NAME)]);
    let provider = file_tracer_provider(data_dir.join(TRACE_FILE), RotationPolicy::default(), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer)
        .try_init();
}
