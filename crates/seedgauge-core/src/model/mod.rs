//! Poll snapshot records, label sets and the catalogue of exported series.

use serde::{Deserialize, Serialize};

/// Fixed-point scale used by torrent clients to report availability.
pub const AVAILABILITY_SCALE: f64 = 65_536.0;
/// Divisor applied to the per-mille progress field before export.
pub const PROGRESS_DIVISOR: f64 = 10.0;

/// Torrent list returned by one poll; `None` when the client answered without a list.
pub type SnapshotList = Option<Vec<TorrentSnapshot>>;

/// Instantaneous state of a single torrent as reported by one poll.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TorrentSnapshot {
    /// Stable identity of the torrent (info hash).
    pub hash: String,
    /// Display name as reported by the client.
    pub name: String,
    /// Cumulative bytes downloaded.
    pub downloaded: u64,
    /// Cumulative bytes uploaded.
    pub uploaded: u64,
    /// Current download rate in bytes per second.
    pub download_speed: u64,
    /// Current upload rate in bytes per second.
    pub upload_speed: u64,
    /// Total size of the torrent payload in bytes.
    pub size: u64,
    /// Bytes still missing.
    pub remaining: u64,
    /// Swarm availability in 1/65536 units.
    pub availability: u64,
    /// Peers currently connected.
    pub peers_connected: u32,
    /// Peers known in the swarm.
    pub peers_in_swarm: u32,
    /// Seeds currently connected.
    pub seeds_connected: u32,
    /// Seeds known in the swarm.
    pub seeds_in_swarm: u32,
    /// Upload/download ratio.
    pub ratio: f64,
    /// Completion in per-mille.
    pub progress: u32,
}

impl TorrentSnapshot {
    /// Label pair used for every series emitted for this torrent.
    #[must_use]
    pub fn labels(&self) -> TorrentLabels {
        TorrentLabels {
            torrent: sanitize_label(&self.name),
            hash: self.hash.clone(),
        }
    }

    /// Availability normalised so that `1.0` means one full copy is reachable.
    #[allow(clippy::cast_precision_loss)]
    #[must_use]
    pub fn availability_ratio(&self) -> f64 {
        self.availability as f64 / AVAILABILITY_SCALE
    }

    /// Progress scaled by the fixed divisor (per-mille becomes a 0-100 value).
    #[must_use]
    pub fn progress_value(&self) -> f64 {
        f64::from(self.progress) / PROGRESS_DIVISOR
    }
}

/// Label values attached to every per-torrent series.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TorrentLabels {
    /// Sanitised display name.
    pub torrent: String,
    /// Torrent identity, used verbatim.
    pub hash: String,
}

impl TorrentLabels {
    /// Label values in declaration order (`torrent`, `hash`).
    #[must_use]
    pub fn values(&self) -> [&str; 2] {
        [&self.torrent, &self.hash]
    }
}

/// Label names shared by every exported series.
pub const LABEL_NAMES: [&str; 2] = ["torrent", "hash"];

/// Remove characters that break label quoting (`"` and `\`).
#[must_use]
pub fn sanitize_label(input: &str) -> String {
    input.chars().filter(|ch| !matches!(ch, '"' | '\\')).collect()
}

/// Exposition type of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    /// Monotonic total advanced by observed deltas.
    Counter,
    /// Point-in-time value overwritten each poll.
    Gauge,
}

/// Every per-torrent series the exporter publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TorrentMetric {
    /// Bytes downloaded, advanced by the per-poll delta.
    BytesDownloaded,
    /// Bytes uploaded, advanced by the per-poll delta.
    BytesUploaded,
    /// Current download rate.
    DownloadSpeed,
    /// Current upload rate.
    UploadSpeed,
    /// Total payload size.
    TotalSize,
    /// Bytes left to download.
    RemainingSize,
    /// Normalised availability.
    Available,
    /// Connected peers.
    PeersConnected,
    /// Peers in swarm.
    PeersInSwarm,
    /// Connected seeds.
    SeedsConnected,
    /// Seeds in swarm.
    SeedsInSwarm,
    /// Share ratio.
    Ratio,
    /// Completion on the divisor-10 scale.
    Progress,
}

impl TorrentMetric {
    /// All series in registration order.
    pub const ALL: [Self; 13] = [
        Self::BytesDownloaded,
        Self::BytesUploaded,
        Self::DownloadSpeed,
        Self::UploadSpeed,
        Self::TotalSize,
        Self::RemainingSize,
        Self::Available,
        Self::PeersConnected,
        Self::PeersInSwarm,
        Self::SeedsConnected,
        Self::SeedsInSwarm,
        Self::Ratio,
        Self::Progress,
    ];

    /// Series name without namespace.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::BytesDownloaded => "total_bytes_downloaded",
            Self::BytesUploaded => "total_bytes_uploaded",
            Self::DownloadSpeed => "current_download_speed",
            Self::UploadSpeed => "current_upload_speed",
            Self::TotalSize => "torrent_total_size",
            Self::RemainingSize => "torrent_remaining_size",
            Self::Available => "torrent_available_amount",
            Self::PeersConnected => "torrent_peers_connected",
            Self::PeersInSwarm => "torrent_peers_in_swarm",
            Self::SeedsConnected => "torrent_seeds_connected",
            Self::SeedsInSwarm => "torrent_seeds_in_swarm",
            Self::Ratio => "torrent_ratio",
            Self::Progress => "torrent_progress",
        }
    }

    /// Help text published alongside the series.
    #[must_use]
    pub const fn help(self) -> &'static str {
        match self {
            Self::BytesDownloaded => "The total number of bytes downloaded using the UTorrent instance",
            Self::BytesUploaded => "The total number of bytes uploaded using the UTorrent instance",
            Self::DownloadSpeed => "The current download speed using the UTorrent instance",
            Self::UploadSpeed => "The current upload speed using the UTorrent instance",
            Self::TotalSize => "The current total torrent size using the UTorrent instance",
            Self::RemainingSize => "The current remaining torrent size using the UTorrent instance",
            Self::Available => "The availability of a torrent with less than 1 being unfulfilled",
            Self::PeersConnected => "The number of peers connected for a specific torrent",
            Self::PeersInSwarm => "The number of peers in swarm for a specific torrent",
            Self::SeedsConnected => "The number of seeds connected for a specific torrent",
            Self::SeedsInSwarm => "The number of seeds in swarm for a specific torrent",
            Self::Ratio => "The current ratio for a specific torrent",
            Self::Progress => "The current progress for a specific torrent",
        }
    }

    /// Exposition type of the series.
    #[must_use]
    pub const fn kind(self) -> MetricKind {
        match self {
            Self::BytesDownloaded | Self::BytesUploaded => MetricKind::Counter,
            _ => MetricKind::Gauge,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_label_strips_quotes_and_backslashes() {
        assert_eq!(
            sanitize_label(r#"Some "Movie" \ 1080p\"#),
            "Some Movie  1080p"
        );
        assert_eq!(sanitize_label("plain name"), "plain name");
        assert_eq!(sanitize_label(r#"\"\""#), "");
    }

    #[test]
    fn sanitize_label_is_idempotent() {
        let inputs = [r#"a"b\c"#, "", r"\\\\", "Ubuntu 24.04 \"LTS\"", "ünïcödé \\ ok"];
        for input in inputs {
            let once = sanitize_label(input);
            assert_eq!(sanitize_label(&once), once);
            assert!(!once.contains('"'));
            assert!(!once.contains('\\'));
        }
    }

    #[test]
    fn labels_keep_hash_verbatim() {
        let snapshot = TorrentSnapshot {
            hash: "ABCDEF0123".to_string(),
            name: r#"quoted "name""#.to_string(),
            ..TorrentSnapshot::default()
        };
        let labels = snapshot.labels();
        assert_eq!(labels.torrent, "quoted name");
        assert_eq!(labels.values(), ["quoted name", "ABCDEF0123"]);
    }

    #[test]
    fn derived_values_use_fixed_divisors() {
        let snapshot = TorrentSnapshot {
            availability: 32_768,
            progress: 500,
            ..TorrentSnapshot::default()
        };
        assert!((snapshot.availability_ratio() - 0.5).abs() < f64::EPSILON);
        assert!((snapshot.progress_value() - 50.0).abs() < f64::EPSILON);

        let complete = TorrentSnapshot {
            availability: 131_072,
            progress: 1_000,
            ..TorrentSnapshot::default()
        };
        assert!((complete.availability_ratio() - 2.0).abs() < f64::EPSILON);
        assert!((complete.progress_value() - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn metric_catalogue_is_consistent() {
        let counters: Vec<_> = TorrentMetric::ALL
            .iter()
            .filter(|metric| metric.kind() == MetricKind::Counter)
            .map(|metric| metric.name())
            .collect();
        assert_eq!(
            counters,
            vec!["total_bytes_downloaded", "total_bytes_uploaded"]
        );

        let mut names: Vec<_> = TorrentMetric::ALL.iter().map(|m| m.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), TorrentMetric::ALL.len());
        assert!(TorrentMetric::ALL.iter().all(|m| !m.help().is_empty()));
    }

    #[test]
    fn help_texts_match_exporter_wording() {
        let cases = [
            (
                TorrentMetric::BytesDownloaded,
                "The total number of bytes downloaded using the UTorrent instance",
            ),
            (
                TorrentMetric::BytesUploaded,
                "The total number of bytes uploaded using the UTorrent instance",
            ),
            (
                TorrentMetric::DownloadSpeed,
                "The current download speed using the UTorrent instance",
            ),
            (
                TorrentMetric::UploadSpeed,
                "The current upload speed using the UTorrent instance",
            ),
            (
                TorrentMetric::TotalSize,
                "The current total torrent size using the UTorrent instance",
            ),
            (
                TorrentMetric::RemainingSize,
                "The current remaining torrent size using the UTorrent instance",
            ),
        ];
        for (metric, help) in cases {
            assert_eq!(metric.help(), help, "{}", metric.name());
        }
    }

    #[test]
    fn snapshot_roundtrips_through_json() -> anyhow::Result<()> {
        let snapshot = TorrentSnapshot {
            hash: "00AA".to_string(),
            name: "demo".to_string(),
            downloaded: 1_000,
            ratio: 1.25,
            ..TorrentSnapshot::default()
        };
        let json = serde_json::to_string(&snapshot)?;
        let decoded: TorrentSnapshot = serde_json::from_str(&json)?;
        assert_eq!(decoded, snapshot);
        Ok(())
    }
}
