//! Snapshot fixtures.

use seedgauge_core::TorrentSnapshot;

/// Start building a snapshot for `hash` named `name`; every other field is zero.
pub fn torrent(hash: &str, name: &str) -> SnapshotBuilder {
    SnapshotBuilder {
        snapshot: TorrentSnapshot {
            hash: hash.to_string(),
            name: name.to_string(),
            ..TorrentSnapshot::default()
        },
    }
}

/// Fluent builder over [`TorrentSnapshot`].
#[derive(Debug, Clone)]
#[must_use]
pub struct SnapshotBuilder {
    snapshot: TorrentSnapshot,
}

impl SnapshotBuilder {
    /// Cumulative byte totals reported by the client.
    pub const fn totals(mut self, downloaded: u64, uploaded: u64) -> Self {
        self.snapshot.downloaded = downloaded;
        self.snapshot.uploaded = uploaded;
        self
    }

    /// Current transfer rates in bytes per second.
    pub const fn speeds(mut self, download: u64, upload: u64) -> Self {
        self.snapshot.download_speed = download;
        self.snapshot.upload_speed = upload;
        self
    }

    /// Total and remaining size in bytes.
    pub const fn sizes(mut self, size: u64, remaining: u64) -> Self {
        self.snapshot.size = size;
        self.snapshot.remaining = remaining;
        self
    }

    /// Raw availability as reported on the wire (65536 is one full copy).
    pub const fn availability(mut self, raw: u64) -> Self {
        self.snapshot.availability = raw;
        self
    }

    /// Connected and swarm peer counts.
    pub const fn peers(mut self, connected: u32, in_swarm: u32) -> Self {
        self.snapshot.peers_connected = connected;
        self.snapshot.peers_in_swarm = in_swarm;
        self
    }

    /// Connected and swarm seed counts.
    pub const fn seeds(mut self, connected: u32, in_swarm: u32) -> Self {
        self.snapshot.seeds_connected = connected;
        self.snapshot.seeds_in_swarm = in_swarm;
        self
    }

    /// Share ratio as a plain float.
    pub const fn ratio(mut self, ratio: f64) -> Self {
        self.snapshot.ratio = ratio;
        self
    }

    /// Raw progress as reported on the wire (tenths of a percent).
    pub const fn progress(mut self, raw: u32) -> Self {
        self.snapshot.progress = raw;
        self
    }

    /// Finish the snapshot.
    #[must_use]
    pub fn build(self) -> TorrentSnapshot {
        self.snapshot
    }
}

impl From<SnapshotBuilder> for TorrentSnapshot {
    fn from(builder: SnapshotBuilder) -> Self {
        builder.build()
    }
}
