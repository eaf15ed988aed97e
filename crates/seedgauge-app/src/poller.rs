//! Periodic poll loop.
//!
//! # Design
//! - The poller owns the counter store, so there is exactly one writer.
//! - Every upstream failure is logged and swallowed. A failed cycle touches neither the
//!   store nor the sink, which keeps the exposed series at their last good values.
//! - The loop sleeps the full interval after every attempt, successful or not.

use std::error::Error;
use std::time::Duration;

use seedgauge_config::ExporterConfig;
use seedgauge_core::{
    CounterStore, MetricSink, ReconcileReport, Reconciler, SnapshotError, SnapshotSource,
};
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info, warn};

/// Timing and verbosity knobs for the loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    /// Sleep between the end of one attempt and the start of the next.
    pub interval: Duration,
    /// Upper bound on a single upstream call.
    pub timeout: Duration,
    /// Log poll starts and every metric update at `info`.
    pub verbose: bool,
}

impl PollSettings {
    /// Extract the loop settings from the exporter configuration.
    #[must_use]
    pub const fn from_config(config: &ExporterConfig) -> Self {
        Self {
            interval: config.poll_interval,
            timeout: config.poll_timeout,
            verbose: config.verbose,
        }
    }
}

/// Result of a single poll attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// A torrent list was fetched and applied.
    Reconciled(ReconcileReport),
    /// The client answered without a torrent list; nothing was updated.
    Empty,
    /// The client rejected the credentials.
    AuthenticationFailed,
    /// Any other failure; `message` is what was logged.
    Failed {
        /// Rendered failure, including the source chain.
        message: String,
    },
}

/// Drives the fetch/reconcile cycle against one source and one sink.
pub struct Poller<S, K> {
    source: S,
    sink: K,
    store: CounterStore,
    reconciler: Reconciler,
    settings: PollSettings,
}

impl<S, K> Poller<S, K>
where
    S: SnapshotSource,
    K: MetricSink,
{
    /// Build a poller with an empty counter store.
    pub fn new(source: S, sink: K, settings: PollSettings) -> Self {
        Self {
            source,
            sink,
            store: CounterStore::new(),
            reconciler: Reconciler::new(settings.verbose),
            settings,
        }
    }

    /// Previously observed cumulative totals.
    pub const fn store(&self) -> &CounterStore {
        &self.store
    }

    /// Sink receiving the metric operations.
    pub const fn sink(&self) -> &K {
        &self.sink
    }

    /// Run one fetch/reconcile attempt.
    pub async fn poll_once(&mut self) -> PollOutcome {
        if self.settings.verbose {
            info!("polling torrent client");
        }

        let fetched = match timeout(self.settings.timeout, self.source.list_torrents()).await {
            Ok(result) => result,
            Err(elapsed) => Err(SnapshotError::transport(elapsed)),
        };

        match fetched {
            Ok(Some(torrents)) => {
                let report = self
                    .reconciler
                    .reconcile(&mut self.store, &self.sink, &torrents);
                debug!(
                    torrents = report.torrents,
                    first_sightings = report.first_sightings,
                    counter_increments = report.counter_increments,
                    gauges_set = report.gauges_set,
                    "poll reconciled"
                );
                PollOutcome::Reconciled(report)
            }
            Ok(None) => {
                debug!("torrent client returned no torrent list");
                PollOutcome::Empty
            }
            Err(err) => report_failure(&err),
        }
    }

    /// Poll forever, sleeping the configured interval after each attempt.
    pub async fn run(&mut self) {
        info!(
            interval_secs = self.settings.interval.as_secs(),
            timeout_secs = self.settings.timeout.as_secs(),
            "poll loop started"
        );
        loop {
            self.poll_once().await;
            sleep(self.settings.interval).await;
        }
    }
}

fn report_failure(err: &SnapshotError) -> PollOutcome {
    match err {
        SnapshotError::AuthenticationFailed => {
            warn!("failed to connect to torrent client: invalid login credentials");
            PollOutcome::AuthenticationFailed
        }
        SnapshotError::Application { message } => {
            warn!(message = %message, "torrent client reported an error");
            PollOutcome::Failed {
                message: message.clone(),
            }
        }
        SnapshotError::Transport { .. } | SnapshotError::Unexpected { .. } => {
            let message = error_chain(err);
            error!(kind = err.kind(), error = %message, "torrent client poll failed");
            PollOutcome::Failed { message }
        }
    }
}

fn error_chain(err: &dyn Error) -> String {
    let mut rendered = err.to_string();
    let mut current = err.source();
    while let Some(cause) = current {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        current = cause.source();
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use seedgauge_core::{CounterTotals, TorrentMetric};
    use seedgauge_test_support::{RecordingSink, ScriptedSource, torrent};
    use std::io;

    fn settings() -> PollSettings {
        PollSettings::from_config(&ExporterConfig::default())
    }

    fn poller(source: ScriptedSource) -> Poller<ScriptedSource, RecordingSink> {
        Poller::new(source, RecordingSink::new(), settings())
    }

    #[test]
    fn settings_follow_configuration() {
        let config = ExporterConfig {
            poll_interval: Duration::from_secs(30),
            poll_timeout: Duration::from_secs(4),
            verbose: true,
            ..ExporterConfig::default()
        };
        assert_eq!(
            PollSettings::from_config(&config),
            PollSettings {
                interval: Duration::from_secs(30),
                timeout: Duration::from_secs(4),
                verbose: true,
            }
        );
    }

    #[tokio::test]
    async fn first_poll_seeds_store_without_increments() {
        let source = ScriptedSource::new([Ok(Some(vec![
            torrent("AA", "Demo").totals(1_000, 200).build(),
        ]))]);
        let mut poller = poller(source);

        let outcome = poller.poll_once().await;
        assert!(matches!(
            outcome,
            PollOutcome::Reconciled(ReconcileReport {
                torrents: 1,
                first_sightings: 1,
                counter_increments: 0,
                ..
            })
        ));
        assert!(poller.sink().increments().is_empty());
        assert_eq!(poller.store().get("AA"), Some(CounterTotals::new(1_000, 200)));
    }

    #[tokio::test]
    async fn second_poll_emits_differences() {
        let source = ScriptedSource::new([
            Ok(Some(vec![torrent("AA", "Demo").totals(1_000, 200).build()])),
            Ok(Some(vec![torrent("AA", "Demo").totals(1_500, 250).build()])),
        ]);
        let mut poller = poller(source);
        poller.poll_once().await;
        poller.poll_once().await;

        assert_eq!(
            poller.sink().increments(),
            vec![
                (TorrentMetric::BytesDownloaded, "AA".to_string(), 500),
                (TorrentMetric::BytesUploaded, "AA".to_string(), 50),
            ]
        );
        assert_eq!(poller.store().get("AA"), Some(CounterTotals::new(1_500, 250)));
    }

    #[tokio::test]
    async fn transport_failure_changes_nothing() {
        let source = ScriptedSource::new([
            Ok(Some(vec![torrent("AA", "Demo").totals(1_500, 250).build()])),
            Err(SnapshotError::transport(io::Error::new(
                io::ErrorKind::ConnectionRefused,
                "connection refused",
            ))),
        ]);
        let mut poller = poller(source);
        poller.poll_once().await;
        let ops_before = poller.sink().ops();

        let outcome = poller.poll_once().await;
        match outcome {
            PollOutcome::Failed { message } => {
                assert!(message.contains("connection refused"), "{message}");
            }
            other => panic!("unexpected outcome {other:?}"),
        }
        assert_eq!(poller.sink().ops(), ops_before);
        assert_eq!(poller.store().get("AA"), Some(CounterTotals::new(1_500, 250)));
    }

    #[tokio::test]
    async fn authentication_failure_is_classified() {
        let mut poller = poller(ScriptedSource::new([Err(
            SnapshotError::AuthenticationFailed,
        )]));
        assert_eq!(poller.poll_once().await, PollOutcome::AuthenticationFailed);
        assert!(poller.sink().ops().is_empty());
        assert!(poller.store().is_empty());
    }

    #[tokio::test]
    async fn application_error_carries_upstream_message() {
        let mut poller = poller(ScriptedSource::new([Err(SnapshotError::application(
            "token expired",
        ))]));
        assert_eq!(
            poller.poll_once().await,
            PollOutcome::Failed {
                message: "token expired".to_string()
            }
        );
        assert!(poller.sink().ops().is_empty());
    }

    #[tokio::test]
    async fn missing_list_is_empty_outcome() {
        let mut poller = poller(ScriptedSource::new([Ok(None)]));
        assert_eq!(poller.poll_once().await, PollOutcome::Empty);
        assert!(poller.sink().ops().is_empty());
    }

    #[tokio::test]
    async fn empty_list_reconciles_nothing() {
        let mut poller = poller(ScriptedSource::new([Ok(Some(Vec::new()))]));
        assert_eq!(
            poller.poll_once().await,
            PollOutcome::Reconciled(ReconcileReport::default())
        );
        assert!(poller.sink().ops().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn slow_source_times_out_as_transport_failure() {
        let source = ScriptedSource::new([Ok(Some(vec![
            torrent("AA", "Demo").totals(1, 1).build(),
        ]))])
        .with_delay(Duration::from_mins(1));
        let mut poller = Poller::new(
            source,
            RecordingSink::new(),
            PollSettings {
                interval: Duration::from_secs(10),
                timeout: Duration::from_secs(5),
                verbose: false,
            },
        );

        let outcome = poller.poll_once().await;
        assert!(matches!(outcome, PollOutcome::Failed { .. }));
        assert!(poller.store().is_empty());
        assert!(poller.sink().ops().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn run_keeps_polling_after_failures() {
        let source = std::sync::Arc::new(ScriptedSource::new([
            Err(SnapshotError::AuthenticationFailed),
            Err(SnapshotError::application("busy")),
            Ok(Some(vec![torrent("AA", "Demo").totals(10, 20).build()])),
        ]));
        let mut poller = Poller::new(source.clone(), RecordingSink::new(), settings());

        let _ = timeout(Duration::from_secs(25), poller.run()).await;

        assert_eq!(source.calls(), 3);
        assert_eq!(poller.store().get("AA"), Some(CounterTotals::new(10, 20)));
    }

    #[test]
    fn error_chain_includes_sources() {
        let err = SnapshotError::unexpected(io::Error::other("malformed payload"));
        assert_eq!(
            error_chain(&err),
            "unexpected snapshot failure: malformed payload"
        );
    }
}
