//! Conversion of one poll snapshot into counter increments and gauge updates.
//!
//! # Design
//! - Counter series are derived from cumulative totals: the increment is the difference to
//!   the previously stored total. First sightings only seed the store.
//! - Differences are not clamped. A total that moves backwards yields a negative increment
//!   and it is handed to the sink unchanged.
//! - Gauges are written every poll regardless of prior state.

use tracing::info;

use crate::model::{TorrentLabels, TorrentMetric, TorrentSnapshot};
use crate::service::MetricSink;
use crate::store::{CounterStore, CounterTotals};

/// Summary of a single reconciliation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Torrent records processed.
    pub torrents: usize,
    /// Records whose identity had no stored totals yet.
    pub first_sightings: usize,
    /// Counter increments handed to the sink.
    pub counter_increments: usize,
    /// Gauge updates handed to the sink.
    pub gauges_set: usize,
}

/// Stateless reconciliation step; the counter store is supplied by the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct Reconciler {
    verbose: bool,
}

impl Reconciler {
    /// Build a reconciler; `verbose` logs every individual metric update.
    #[must_use]
    pub const fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    /// Apply one snapshot to `store` and emit the resulting operations into `sink`.
    pub fn reconcile<K>(
        &self,
        store: &mut CounterStore,
        sink: &K,
        torrents: &[TorrentSnapshot],
    ) -> ReconcileReport
    where
        K: MetricSink + ?Sized,
    {
        let mut report = ReconcileReport::default();
        for torrent in torrents {
            self.reconcile_torrent(store, sink, torrent, &mut report);
        }
        report.torrents = torrents.len();
        report
    }

    fn reconcile_torrent<K>(
        self,
        store: &mut CounterStore,
        sink: &K,
        torrent: &TorrentSnapshot,
        report: &mut ReconcileReport,
    ) where
        K: MetricSink + ?Sized,
    {
        let labels = torrent.labels();
        let emitter = Emitter {
            sink,
            labels: &labels,
            verbose: self.verbose,
        };

        match store.get(&torrent.hash) {
            Some(prior) => {
                emitter.increment(
                    TorrentMetric::BytesDownloaded,
                    signed_delta(torrent.downloaded, prior.downloaded),
                );
                emitter.increment(
                    TorrentMetric::BytesUploaded,
                    signed_delta(torrent.uploaded, prior.uploaded),
                );
                report.counter_increments += 2;
            }
            None => report.first_sightings += 1,
        }
        store.set(
            &torrent.hash,
            CounterTotals::new(torrent.downloaded, torrent.uploaded),
        );

        let gauges = gauge_values(torrent);
        for (metric, value) in gauges {
            emitter.set(metric, value);
        }
        report.gauges_set += gauges.len();
    }
}

struct Emitter<'a, K: ?Sized> {
    sink: &'a K,
    labels: &'a TorrentLabels,
    verbose: bool,
}

impl<K> Emitter<'_, K>
where
    K: MetricSink + ?Sized,
{
    fn increment(&self, metric: TorrentMetric, delta: i64) {
        self.sink.increment(metric, self.labels, delta);
        if self.verbose {
            info!(
                metric = metric.name(),
                torrent = %self.labels.torrent,
                hash = %self.labels.hash,
                delta,
                "counter increased"
            );
        }
    }

    fn set(&self, metric: TorrentMetric, value: f64) {
        self.sink.set(metric, self.labels, value);
        if self.verbose {
            info!(
                metric = metric.name(),
                torrent = %self.labels.torrent,
                hash = %self.labels.hash,
                value,
                "gauge set"
            );
        }
    }
}

#[allow(clippy::cast_precision_loss)]
fn gauge_values(torrent: &TorrentSnapshot) -> [(TorrentMetric, f64); 11] {
    [
        (TorrentMetric::DownloadSpeed, torrent.download_speed as f64),
        (TorrentMetric::UploadSpeed, torrent.upload_speed as f64),
        (TorrentMetric::TotalSize, torrent.size as f64),
        (TorrentMetric::RemainingSize, torrent.remaining as f64),
        (TorrentMetric::Available, torrent.availability_ratio()),
        (
            TorrentMetric::PeersConnected,
            f64::from(torrent.peers_connected),
        ),
        (TorrentMetric::PeersInSwarm, f64::from(torrent.peers_in_swarm)),
        (
            TorrentMetric::SeedsConnected,
            f64::from(torrent.seeds_connected),
        ),
        (TorrentMetric::SeedsInSwarm, f64::from(torrent.seeds_in_swarm)),
        (TorrentMetric::Ratio, torrent.ratio),
        (TorrentMetric::Progress, torrent.progress_value()),
    ]
}

/// `current - prior` as a signed value, saturating at the `i64` bounds.
fn signed_delta(current: u64, prior: u64) -> i64 {
    let delta = i128::from(current) - i128::from(prior);
    let clamped = delta.clamp(i128::from(i64::MIN), i128::from(i64::MAX));
    i64::try_from(clamped).unwrap_or_default()
}
