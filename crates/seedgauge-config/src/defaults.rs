//! Fallback values applied when the environment leaves a setting unset.
//!
//! # Design
//! - Values mirror the long-standing exporter defaults so existing scrape configs keep working.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

/// Seconds between two polls of the torrent client.
pub const POLL_INTERVAL: Duration = Duration::from_secs(10);
/// Listener for the scrape endpoint.
pub const LISTEN_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8091);
/// Prefix applied to every exported series.
pub const METRIC_NAMESPACE: &str = "utorrent";
/// Log directive used when neither the environment nor `RUST_LOG` provide one.
pub const LOG_LEVEL: &str = "info";
