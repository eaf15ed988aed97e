//! # Design
//!
//! - Centralize exporter-level errors for bootstrap and serving.
//! - Keep error messages constant while carrying context fields for debugging.
//! - Poll failures never surface here; the poll loop logs and swallows them.

use std::io;
use std::net::SocketAddr;

use thiserror::Error;

/// Result alias for application operations.
pub type AppResult<T> = Result<T, AppError>;

/// Application-level error type.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration operations failed.
    #[error("configuration operation failed")]
    Config {
        /// Operation identifier.
        operation: &'static str,
        /// Source configuration error.
        source: seedgauge_config::ConfigError,
    },
    /// Telemetry operations failed.
    #[error("telemetry operation failed")]
    Telemetry {
        /// Operation identifier.
        operation: &'static str,
        /// Source telemetry error.
        source: seedgauge_telemetry::TelemetryError,
    },
    /// The scrape listener could not be bound.
    #[error("failed to bind scrape listener")]
    Bind {
        /// Address that was requested.
        addr: SocketAddr,
        /// Source IO error.
        source: io::Error,
    },
    /// The scrape server stopped with an error.
    #[error("scrape server failed")]
    Serve {
        /// Source IO error.
        source: io::Error,
    },
}

impl AppError {
    pub(crate) const fn config(
        operation: &'static str,
        source: seedgauge_config::ConfigError,
    ) -> Self {
        Self::Config { operation, source }
    }

    pub(crate) const fn telemetry(
        operation: &'static str,
        source: seedgauge_telemetry::TelemetryError,
    ) -> Self {
        Self::Telemetry { operation, source }
    }
}
