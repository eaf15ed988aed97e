//! Telemetry failures.

use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::string::FromUtf8Error;

use prometheus::Error as PrometheusError;
use tracing_subscriber::util::TryInitError;

/// Result alias for telemetry operations.
pub type Result<T> = std::result::Result<T, TelemetryError>;

/// Errors raised while installing logging or producing the exposition.
#[derive(Debug)]
pub enum TelemetryError {
    /// A global tracing subscriber was already installed.
    SubscriberInstall {
        /// Underlying tracing subscriber error.
        source: TryInitError,
    },
    /// A series could not be defined, usually because of an invalid namespace.
    SeriesDefinition {
        /// Series name without namespace.
        series: &'static str,
        /// Underlying Prometheus error.
        source: PrometheusError,
    },
    /// A series clashed with one already in the registry.
    SeriesRegistration {
        /// Series name without namespace.
        series: &'static str,
        /// Underlying Prometheus error.
        source: PrometheusError,
    },
    /// The text encoder rejected the gathered families.
    Exposition {
        /// Underlying Prometheus error.
        source: PrometheusError,
    },
    /// The encoded exposition was not UTF-8.
    ExpositionUtf8 {
        /// Underlying conversion error.
        source: FromUtf8Error,
    },
}

impl Display for TelemetryError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::SubscriberInstall { .. } => "failed to install tracing subscriber",
            Self::SeriesDefinition { .. } => "invalid torrent series definition",
            Self::SeriesRegistration { .. } => "failed to register torrent series",
            Self::Exposition { .. } => "failed to encode metrics exposition",
            Self::ExpositionUtf8 { .. } => "metrics exposition was not valid utf-8",
        };
        formatter.write_str(message)
    }
}

impl Error for TelemetryError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::SubscriberInstall { source } => Some(source),
            Self::SeriesDefinition { source, .. }
            | Self::SeriesRegistration { source, .. }
            | Self::Exposition { source } => Some(source),
            Self::ExpositionUtf8 { source } => Some(source),
        }
    }
}
