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

//! Exporter configuration.
//!
//! Layout: `model.rs` (typed configuration), `defaults.rs` (fallback values),
//! `loader.rs` (environment parsing and validation), `error.rs` (validation failures).

pub mod defaults;
pub mod error;
pub mod loader;
pub mod model;

pub use error::{ConfigError, ConfigResult};
pub use model::{ExporterConfig, LogSettings};
