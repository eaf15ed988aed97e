//! In-memory collaborators for exercising the poll loop without a torrent client.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use seedgauge_core::{
    MetricSink, SnapshotList, SnapshotResult, SnapshotSource, TorrentLabels, TorrentMetric,
    TorrentSnapshot,
};

fn locked<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Source that replays a queue of canned poll results.
///
/// Once the queue is drained every further call answers `Ok(None)`.
#[derive(Debug, Default)]
pub struct ScriptedSource {
    script: Mutex<VecDeque<SnapshotResult<SnapshotList>>>,
    calls: AtomicUsize,
    delay: Option<Duration>,
}

impl ScriptedSource {
    /// Queue `results` in call order.
    #[must_use]
    pub fn new(results: impl IntoIterator<Item = SnapshotResult<SnapshotList>>) -> Self {
        Self {
            script: Mutex::new(results.into_iter().collect()),
            calls: AtomicUsize::new(0),
            delay: None,
        }
    }

    /// Sleep for `delay` before answering each call.
    #[must_use]
    pub const fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Append a successful poll carrying `torrents`.
    pub fn push_torrents(&self, torrents: Vec<TorrentSnapshot>) {
        self.push(Ok(Some(torrents)));
    }

    /// Append an arbitrary poll result.
    pub fn push(&self, result: SnapshotResult<SnapshotList>) {
        locked(&self.script).push_back(result);
    }

    /// Number of calls that have started, including ones that were cancelled.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Results still waiting to be served.
    #[must_use]
    pub fn remaining(&self) -> usize {
        locked(&self.script).len()
    }
}

#[async_trait]
impl SnapshotSource for ScriptedSource {
    async fn list_torrents(&self) -> SnapshotResult<SnapshotList> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        locked(&self.script).pop_front().unwrap_or(Ok(None))
    }
}

/// Single call observed by [`RecordingSink`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedOp {
    /// Counter increment.
    Increment {
        /// Target series.
        metric: TorrentMetric,
        /// Series labels.
        labels: TorrentLabels,
        /// Delta exactly as handed to the sink.
        delta: i64,
    },
    /// Gauge overwrite.
    Set {
        /// Target series.
        metric: TorrentMetric,
        /// Series labels.
        labels: TorrentLabels,
        /// Value exactly as handed to the sink.
        value: f64,
    },
}

/// Sink that records every call in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    ops: Mutex<Vec<RecordedOp>>,
}

impl RecordingSink {
    /// Create an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every recorded call.
    #[must_use]
    pub fn ops(&self) -> Vec<RecordedOp> {
        locked(&self.ops).clone()
    }

    /// Drain the recorded calls.
    #[must_use]
    pub fn take(&self) -> Vec<RecordedOp> {
        std::mem::take(&mut *locked(&self.ops))
    }

    /// Counter increments as `(metric, hash, delta)` triples.
    #[must_use]
    pub fn increments(&self) -> Vec<(TorrentMetric, String, i64)> {
        locked(&self.ops)
            .iter()
            .filter_map(|op| match op {
                RecordedOp::Increment {
                    metric,
                    labels,
                    delta,
                } => Some((*metric, labels.hash.clone(), *delta)),
                RecordedOp::Set { .. } => None,
            })
            .collect()
    }

    /// Most recent value set on the gauge `metric` for torrent `hash`.
    #[must_use]
    pub fn last_gauge(&self, metric: TorrentMetric, hash: &str) -> Option<f64> {
        locked(&self.ops).iter().rev().find_map(|op| match op {
            RecordedOp::Set {
                metric: recorded,
                labels,
                value,
            } if *recorded == metric && labels.hash == hash => Some(*value),
            _ => None,
        })
    }
}

impl MetricSink for RecordingSink {
    fn increment(&self, metric: TorrentMetric, labels: &TorrentLabels, delta: i64) {
        locked(&self.ops).push(RecordedOp::Increment {
            metric,
            labels: labels.clone(),
            delta,
        });
    }

    fn set(&self, metric: TorrentMetric, labels: &TorrentLabels, value: f64) {
        locked(&self.ops).push(RecordedOp::Set {
            metric,
            labels: labels.clone(),
            value,
        });
    }
}
