#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Telemetry primitives for the exporter.
//!
//! Layout: `init.rs` (tracing subscriber setup), `context.rs` (process-wide span guard),
//! `metrics.rs` (Prometheus-backed torrent series), `error.rs` (telemetry failures).

pub mod context;
pub mod error;
pub mod init;
pub mod metrics;

pub use context::GlobalContextGuard;
pub use error::{Result, TelemetryError};
pub use init::{DEFAULT_LOG_LEVEL, LogFormat, LoggingConfig, build_sha, init_logging};
pub use metrics::{CONTENT_TYPE, DEFAULT_NAMESPACE, TorrentMetrics};
