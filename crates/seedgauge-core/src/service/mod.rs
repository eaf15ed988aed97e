//! Collaborator contracts at both ends of the reconciliation loop.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::SnapshotResult;
use crate::model::{SnapshotList, TorrentLabels, TorrentMetric};

/// Upstream torrent client queried once per poll.
#[async_trait]
pub trait SnapshotSource: Send + Sync {
    /// Fetch the current torrent list.
    ///
    /// # Errors
    ///
    /// Returns a [`SnapshotError`](crate::SnapshotError) describing why no list could be produced.
    async fn list_torrents(&self) -> SnapshotResult<SnapshotList>;
}

#[async_trait]
impl<T> SnapshotSource for Arc<T>
where
    T: SnapshotSource + ?Sized,
{
    async fn list_torrents(&self) -> SnapshotResult<SnapshotList> {
        (**self).list_torrents().await
    }
}

/// Destination for labelled counter increments and gauge updates.
///
/// Implementations must tolerate concurrent readers (scrapes) while the poll loop writes.
pub trait MetricSink: Send + Sync {
    /// Advance a counter series by `delta`; the delta is passed through unclamped.
    fn increment(&self, metric: TorrentMetric, labels: &TorrentLabels, delta: i64);

    /// Overwrite a gauge series with an absolute value.
    fn set(&self, metric: TorrentMetric, labels: &TorrentLabels, value: f64);
}

impl<T> MetricSink for Arc<T>
where
    T: MetricSink + ?Sized,
{
    fn increment(&self, metric: TorrentMetric, labels: &TorrentLabels, delta: i64) {
        (**self).increment(metric, labels, delta);
    }

    fn set(&self, metric: TorrentMetric, labels: &TorrentLabels, value: f64) {
        (**self).set(metric, labels, value);
    }
}
