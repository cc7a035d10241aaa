//! OpenTelemetry-based observability with file-based trace export.
//!
//! Spans recorded with `tracing` are exported through the OpenTelemetry SDK to
//! an OTLP-JSON file, one document per exported batch:
//!
//! ```text
//! tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → RotatingFile
//! ```
//!
//! - **Location**: `<data_dir>/provider-directory-otlp.json`
//! - **Rotation**: at 10 MiB, keeping 3 timestamped backups
//! - **Level**: `RUST_LOG` if set, else `Config::trace_level`, else `info`
//!
//! Tracing is optional: if the data directory cannot be created the directory
//! runs without it.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - `exporter`: File-backed `SpanExporter` and tracer provider
//! - `otlp_json`: OTLP JSON encoding of span batches
//! - `rotating_file`: Size-rotated append-only file

mod exporter;
mod init;
mod otlp_json;
mod rotating_file;

pub use init::init_tracing;
