//! Typed exporter configuration.

use std::net::SocketAddr;
use std::time::Duration;

use crate::defaults;

/// Settings consumed by the poll loop and the scrape endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExporterConfig {
    /// Delay between the end of one poll attempt and the start of the next.
    pub poll_interval: Duration,
    /// Upper bound on a single snapshot request.
    pub poll_timeout: Duration,
    /// Log every individual metric update.
    pub verbose: bool,
    /// Address the scrape endpoint binds to.
    pub listen_addr: SocketAddr,
    /// Prefix applied to every exported series name.
    pub namespace: String,
    /// Logging preferences.
    pub logging: LogSettings,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            poll_interval: defaults::POLL_INTERVAL,
            poll_timeout: defaults::POLL_INTERVAL,
            verbose: false,
            listen_addr: defaults::LISTEN_ADDR,
            namespace: defaults::METRIC_NAMESPACE.to_string(),
            logging: LogSettings::default(),
        }
    }
}

/// Logging preferences resolved from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Filter directive handed to the tracing subscriber.
    pub level: String,
    /// Output format name (`json` or `pretty`); `None` lets the build decide.
    pub format: Option<String>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            format: None,
        }
    }
}
