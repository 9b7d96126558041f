use attractions_core::ConfigError;
use thiserror::Error;

/// Failures that stop a feed load. Individual bad rows never surface here;
/// they are reported as [`crate::SkippedRow`]s instead.
#[derive(Debug, Error)]
pub enum FeedError {
    /// The feed URL is unset or still a placeholder.
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid feed URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error! status: {status}")]
    UnexpectedStatus { status: u16, url: String },

    /// The feed was fetched but no row survived normalization.
    #[error("no valid attractions found in the data source ({data_rows} data rows, {skipped} skipped)")]
    NoValidRecords { data_rows: usize, skipped: usize },
}

impl FeedError {
    /// Whether this failure happened while talking to the feed endpoint.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, FeedError::Http(_) | FeedError::UnexpectedStatus { .. })
    }
}
