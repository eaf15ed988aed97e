#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Engine-agnostic poll snapshots and the reconciliation that turns them into metric series.
//!
//! Layout: `model/` (snapshot records, label sets, metric catalogue), `service/`
//! (snapshot source and metric sink contracts), `store.rs` (per-torrent counter totals),
//! `reconcile.rs` (delta accounting and gauge normalisation), `error.rs` (source failures).

pub mod error;
pub mod model;
pub mod reconcile;
pub mod service;
pub mod store;

pub use error::{SnapshotError, SnapshotResult};
pub use model::{
    MetricKind, SnapshotList, TorrentLabels, TorrentMetric, TorrentSnapshot, sanitize_label,
};
pub use reconcile::{ReconcileReport, Reconciler};
pub use service::{MetricSink, SnapshotSource};
pub use store::{CounterStore, CounterTotals};
