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

//! Exporter wiring: the poll loop, the scrape endpoint, and the boot sequence that joins them.
//!
//! Layout: `poller.rs` (poll/reconcile loop), `http.rs` (scrape router), `bootstrap.rs`
//! (service wiring), `error.rs` (startup failures).

/// Exporter boot sequence.
pub mod bootstrap;
/// Application error types.
pub mod error;
/// Scrape endpoint router and listener.
pub mod http;
/// Periodic poll and reconcile loop.
pub mod poller;

pub use bootstrap::{run_exporter, run_exporter_with};
pub use error::{AppError, AppResult};
pub use poller::{PollOutcome, PollSettings, Poller};
