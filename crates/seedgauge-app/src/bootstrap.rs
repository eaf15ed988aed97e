use seedgauge_config::ExporterConfig;
use seedgauge_core::SnapshotSource;
use seedgauge_telemetry::{GlobalContextGuard, LogFormat, LoggingConfig, TorrentMetrics};
use tracing::info;

use crate::error::{AppError, AppResult};
use crate::http;
use crate::poller::{PollSettings, Poller};

/// Load configuration from the environment, install logging, and run the exporter.
///
/// # Errors
///
/// Returns an error if configuration is invalid, logging cannot be installed, or the
/// scrape listener fails.
pub async fn run_exporter<S>(source: S) -> AppResult<()>
where
    S: SnapshotSource,
{
    let config =
        ExporterConfig::from_env().map_err(|err| AppError::config("config.from_env", err))?;
    let logging = LoggingConfig {
        level: &config.logging.level,
        format: LogFormat::from_name(config.logging.format.as_deref()),
        ..LoggingConfig::default()
    };
    seedgauge_telemetry::init_logging(&logging)
        .map_err(|err| AppError::telemetry("telemetry.init", err))?;
    let _context = GlobalContextGuard::new("exporter");

    run_exporter_with(config, source).await
}

/// Run the poll loop and the scrape endpoint side by side with injected settings.
///
/// Only returns when the scrape endpoint stops; poll failures are logged and retried.
///
/// # Errors
///
/// Returns an error if the metric registry cannot be built or the scrape listener fails.
pub async fn run_exporter_with<S>(config: ExporterConfig, source: S) -> AppResult<()>
where
    S: SnapshotSource,
{
    info!(
        listen_addr = %config.listen_addr,
        namespace = %config.namespace,
        poll_interval_secs = config.poll_interval.as_secs(),
        verbose = config.verbose,
        "seedgauge exporter starting"
    );

    let metrics = TorrentMetrics::new(&config.namespace)
        .map_err(|err| AppError::telemetry("telemetry.metrics", err))?;
    let router = http::router(metrics.clone());
    let mut poller = Poller::new(source, metrics, PollSettings::from_config(&config));

    tokio::select! {
        served = http::serve(config.listen_addr, router) => served,
        () = poller.run() => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::SocketAddr;
    use std::sync::Arc;
    use std::time::Duration;

    use seedgauge_test_support::ScriptedSource;
    use tokio::net::TcpListener;

    #[tokio::test]
    async fn invalid_namespace_fails_before_serving() {
        let config = ExporterConfig {
            namespace: "not-valid".to_string(),
            ..ExporterConfig::default()
        };
        let source = Arc::new(ScriptedSource::default());

        let result = run_exporter_with(config, source.clone()).await;
        assert!(matches!(
            result,
            Err(AppError::Telemetry {
                operation: "telemetry.metrics",
                ..
            })
        ));
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn occupied_listen_address_stops_the_exporter() -> anyhow::Result<()> {
        let occupied = TcpListener::bind("127.0.0.1:0").await?;
        let addr: SocketAddr = occupied.local_addr()?;
        let config = ExporterConfig {
            listen_addr: addr,
            poll_interval: Duration::from_hours(1),
            ..ExporterConfig::default()
        };

        let result = run_exporter_with(config, ScriptedSource::default()).await;
        assert!(matches!(result, Err(AppError::Bind { .. })));
        Ok(())
    }
}
