//! Environment-driven configuration loading.
//!
//! # Design
//! - Every setting is optional; unset variables fall back to `defaults.rs`.
//! - Lookups go through a closure so tests never touch the process environment.
//! - Validation failures name the offending variable and carry the raw value.

use std::net::SocketAddr;
use std::time::Duration;

use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::model::{ExporterConfig, LogSettings};

const POLL_SECONDS: &str = "SEEDGAUGE_POLL_SECONDS";
const POLL_TIMEOUT_SECONDS: &str = "SEEDGAUGE_POLL_TIMEOUT_SECONDS";
const VERBOSE: &str = "SEEDGAUGE_VERBOSE";
const LISTEN_ADDR: &str = "SEEDGAUGE_LISTEN_ADDR";
const METRIC_NAMESPACE: &str = "SEEDGAUGE_METRIC_NAMESPACE";
const LOG_LEVEL: &str = "SEEDGAUGE_LOG_LEVEL";
const LOG_FORMAT: &str = "SEEDGAUGE_LOG_FORMAT";

impl ExporterConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] when a variable is set to an unusable value.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidField`] when a value is set but cannot be used.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let value = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        let poll_interval = value(POLL_SECONDS)
            .map(|raw| parse_seconds(POLL_SECONDS, &raw))
            .transpose()?
            .unwrap_or(defaults.poll_interval);
        let poll_timeout = value(POLL_TIMEOUT_SECONDS)
            .map(|raw| parse_seconds(POLL_TIMEOUT_SECONDS, &raw))
            .transpose()?
            .unwrap_or(poll_interval);
        let verbose = value(VERBOSE)
            .map(|raw| parse_bool(VERBOSE, &raw))
            .transpose()?
            .unwrap_or(defaults.verbose);
        let listen_addr = value(LISTEN_ADDR)
            .map(|raw| parse_socket_addr(LISTEN_ADDR, &raw))
            .transpose()?
            .unwrap_or(defaults.listen_addr);
        // An explicitly empty namespace is meaningful (no prefix), so it bypasses `value`.
        let namespace = match lookup(METRIC_NAMESPACE) {
            Some(raw) => validate_namespace(METRIC_NAMESPACE, raw.trim())?,
            None => defaults.namespace,
        };
        let level = value(LOG_LEVEL).unwrap_or(defaults.logging.level);
        let format = value(LOG_FORMAT)
            .map(|raw| parse_log_format(LOG_FORMAT, &raw))
            .transpose()?;

        let config = Self {
            poll_interval,
            poll_timeout,
            verbose,
            listen_addr,
            namespace,
            logging: LogSettings { level, format },
        };
        debug!(
            poll_interval_secs = config.poll_interval.as_secs(),
            poll_timeout_secs = config.poll_timeout.as_secs(),
            verbose = config.verbose,
            listen_addr = %config.listen_addr,
            namespace = %config.namespace,
            "exporter configuration loaded"
        );
        Ok(config)
    }
}

fn parse_seconds(field: &'static str, raw: &str) -> ConfigResult<Duration> {
    let seconds = raw
        .parse::<u64>()
        .map_err(|_| ConfigError::invalid(field, raw, "not_an_integer"))?;
    if seconds == 0 {
        return Err(ConfigError::invalid(field, raw, "zero"));
    }
    Ok(Duration::from_secs(seconds))
}

fn parse_bool(field: &'static str, raw: &str) -> ConfigResult<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::invalid(field, raw, "not_a_bool")),
    }
}

fn parse_socket_addr(field: &'static str, raw: &str) -> ConfigResult<SocketAddr> {
    let addr = raw
        .parse::<SocketAddr>()
        .map_err(|_| ConfigError::invalid(field, raw, "not_a_socket_addr"))?;
    if addr.port() == 0 {
        return Err(ConfigError::invalid(field, raw, "zero_port"));
    }
    Ok(addr)
}

fn parse_log_format(field: &'static str, raw: &str) -> ConfigResult<String> {
    let normalized = raw.to_ascii_lowercase();
    match normalized.as_str() {
        "json" | "pretty" => Ok(normalized),
        _ => Err(ConfigError::invalid(field, raw, "unknown_log_format")),
    }
}

/// Metric name prefixes follow `[a-zA-Z_:][a-zA-Z0-9_:]*`; empty disables the prefix.
fn validate_namespace(field: &'static str, raw: &str) -> ConfigResult<String> {
    let mut chars = raw.chars();
    let valid = chars.next().is_none_or(|first| {
        (first.is_ascii_alphabetic() || matches!(first, '_' | ':'))
            && chars.all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | ':'))
    });
    if valid {
        Ok(raw.to_string())
    } else {
        Err(ConfigError::invalid(field, raw, "invalid_metric_namespace"))
    }
}
