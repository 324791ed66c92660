//! Tracing with file-based OpenTelemetry export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK → FileSpanExporter → cinescout-otlp.json
//! ```
//!
//! Spans are written as OTLP/JSON lines to the plugin data directory
//! (`~/.local/share/zellij/cinescout/cinescout-otlp.json` on the host). The
//! file rotates at 10 MB and keeps 3 numbered backups. The worker thread
//! installs its own subscriber against the same file and links its spans to
//! the plugin's via the trace context carried in worker messages.
//!
//! The filter comes from the `trace_level` plugin option (an `EnvFilter`
//! directive such as `debug` or `cinescout::app=trace`), defaulting to
//! `info`.

mod exporter;
mod init;
mod otlp_json;
mod rotating_file;

pub use init::{init_tracing, DEFAULT_TRACE_LEVEL, TRACE_FILE};
