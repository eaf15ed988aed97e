//! Error types raised by snapshot sources.

use std::error::Error;

use thiserror::Error;

/// Failure reported by a snapshot source for a single poll attempt.
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The torrent client rejected the configured credentials.
    #[error("torrent client rejected credentials")]
    AuthenticationFailed,
    /// The torrent client could not be reached or the exchange broke off.
    #[error("torrent client transport failed")]
    Transport {
        /// Underlying network or IO failure.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
    /// The torrent client answered with an error payload instead of torrent data.
    #[error("torrent client reported an error: {message}")]
    Application {
        /// Message carried by the error payload.
        message: String,
    },
    /// Anything the source could not classify further.
    #[error("unexpected snapshot failure")]
    Unexpected {
        /// Underlying failure.
        #[source]
        source: Box<dyn Error + Send + Sync>,
    },
}

impl SnapshotError {
    /// Wrap a network-level failure.
    pub fn transport(source: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self::Transport {
            source: source.into(),
        }
    }

    /// Build an application-level failure from the upstream error message.
    pub fn application(message: impl Into<String>) -> Self {
        Self::Application {
            message: message.into(),
        }
    }

    /// Wrap a failure that fits no other category.
    pub fn unexpected(source: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self::Unexpected {
            source: source.into(),
        }
    }

    /// Short machine-readable classification used in structured logs.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::AuthenticationFailed => "authentication_failed",
            Self::Transport { .. } => "transport",
            Self::Application { .. } => "application",
            Self::Unexpected { .. } => "unexpected",
        }
    }
}

/// Convenience alias for snapshot source results.
pub type SnapshotResult<T> = Result<T, SnapshotError>;
