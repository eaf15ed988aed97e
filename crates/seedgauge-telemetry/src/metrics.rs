//! Prometheus-backed sink for per-torrent series.
//!
//! # Design
//! - One labelled collector per catalogue entry, registered on a private registry.
//! - Byte counters are integer counters; every other series is a float gauge.
//! - Prometheus counters only move forward. A negative increment is logged and dropped,
//!   leaving the exposed total where it was.

use std::collections::HashMap;
use std::sync::Arc;

use prometheus::core::Collector;
use prometheus::{Encoder, GaugeVec, IntCounterVec, Opts, Registry, TextEncoder};
use seedgauge_core::model::LABEL_NAMES;
use seedgauge_core::{MetricKind, MetricSink, TorrentLabels, TorrentMetric};
use tracing::warn;

use crate::error::{Result, TelemetryError};

/// Namespace prepended to every series name unless configured otherwise.
pub const DEFAULT_NAMESPACE: &str = "utorrent";
/// Content type of the output produced by [`TorrentMetrics::render`].
pub const CONTENT_TYPE: &str = prometheus::TEXT_FORMAT;

/// Prometheus registry holding the torrent series.
#[derive(Clone)]
pub struct TorrentMetrics {
    inner: Arc<TorrentMetricsInner>,
}

struct TorrentMetricsInner {
    registry: Registry,
    counters: HashMap<TorrentMetric, IntCounterVec>,
    gauges: HashMap<TorrentMetric, GaugeVec>,
}

impl TorrentMetrics {
    /// Register every torrent series under `namespace` (empty for no prefix).
    ///
    /// # Errors
    ///
    /// Returns an error if a collector cannot be built (for example, because the
    /// namespace is not a valid metric name prefix) or registered.
    pub fn new(namespace: &str) -> Result<Self> {
        let registry = Registry::new();
        let mut counters = HashMap::new();
        let mut gauges = HashMap::new();

        for metric in TorrentMetric::ALL {
            let series = metric.name();
            let opts = Opts::new(series, metric.help()).namespace(namespace);
            match metric.kind() {
                MetricKind::Counter => {
                    let vec = register(&registry, series, IntCounterVec::new(opts, &LABEL_NAMES))?;
                    counters.insert(metric, vec);
                }
                MetricKind::Gauge => {
                    let vec = register(&registry, series, GaugeVec::new(opts, &LABEL_NAMES))?;
                    gauges.insert(metric, vec);
                }
            }
        }

        Ok(Self {
            inner: Arc::new(TorrentMetricsInner {
                registry,
                counters,
                gauges,
            }),
        })
    }

    /// Render the registry using the Prometheus text exposition format.
    ///
    /// # Errors
    ///
    /// Returns an error if the metrics cannot be encoded or if the encoded
    /// buffer is not valid UTF-8.
    pub fn render(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.inner.registry.gather();
        let mut buffer = Vec::new();
        encoder
            .encode(&metric_families, &mut buffer)
            .map_err(|source| TelemetryError::Exposition { source })?;
        String::from_utf8(buffer).map_err(|source| TelemetryError::ExpositionUtf8 { source })
    }
}

fn register<C>(
    registry: &Registry,
    series: &'static str,
    built: prometheus::Result<C>,
) -> Result<C>
where
    C: Collector + Clone + 'static,
{
    let collector = built.map_err(|source| TelemetryError::SeriesDefinition { series, source })?;
    registry
        .register(Box::new(collector.clone()))
        .map_err(|source| TelemetryError::SeriesRegistration { series, source })?;
    Ok(collector)
}

impl MetricSink for TorrentMetrics {
    fn increment(&self, metric: TorrentMetric, labels: &TorrentLabels, delta: i64) {
        let Some(counter) = self.inner.counters.get(&metric) else {
            warn!(metric = metric.name(), "increment requested for a non-counter series");
            return;
        };
        if let Ok(step) = u64::try_from(delta) {
            counter.with_label_values(&labels.values()).inc_by(step);
        } else {
            warn!(
                metric = metric.name(),
                torrent = %labels.torrent,
                hash = %labels.hash,
                delta,
                "dropping negative counter increment"
            );
        }
    }

    fn set(&self, metric: TorrentMetric, labels: &TorrentLabels, value: f64) {
        let Some(gauge) = self.inner.gauges.get(&metric) else {
            warn!(metric = metric.name(), "set requested for a non-gauge series");
            return;
        };
        gauge.with_label_values(&labels.values()).set(value);
    }
}
