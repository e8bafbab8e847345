use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("malformed review entry: {reason}")]
    MalformedReview { reason: String },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ScrapeError {
    /// Which pipeline stage this error belongs to, for outcome tallies.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Http(_) | Self::UnexpectedStatus { .. } => FailureKind::Network,
            Self::MalformedReview { .. } => FailureKind::Parse,
            Self::Write { .. } => FailureKind::Io,
        }
    }
}

/// Failure classification at the pipeline boundary: where an item died,
/// not why.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Network,
    Parse,
    Io,
}
