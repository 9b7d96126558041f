//! HTTP client for the published spreadsheet CSV endpoint.

use std::time::Duration;

use attractions_core::AppConfig;
use reqwest::{Client, Url};

use crate::error::FeedError;

/// Fetches the raw feed text. One GET per call; failures are not retried.
pub struct FeedClient {
    client: Client,
    url: Url,
}

impl FeedClient {
    /// Creates a client for the feed URL in `config`.
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::Config`] when the feed URL is unset or a
    /// placeholder, otherwise the errors of [`FeedClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, FeedError> {
        let url = config.feed_url()?;
        Self::new(url, config.request_timeout_secs, &config.user_agent)
    }

    /// Creates a client for an explicit feed URL (also used to point at a
    /// mock server in tests).
    ///
    /// # Errors
    ///
    /// Returns [`FeedError::InvalidUrl`] if `feed_url` is not an absolute
    /// http(s) URL, or [`FeedError::Http`] if the underlying
    /// `reqwest::Client` cannot be constructed.
    pub fn new(feed_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, FeedError> {
        let url = Url::parse(feed_url).map_err(|e| FeedError::InvalidUrl {
            url: feed_url.to_owned(),
            reason: e.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(FeedError::InvalidUrl {
                url: feed_url.to_owned(),
                reason: format!("unsupported scheme \"{}\"", url.scheme()),
            });
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        Ok(Self { client, url })
    }

    #[must_use]
    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Downloads the feed body as text.
    ///
    /// # Errors
    ///
    /// - [`FeedError::UnexpectedStatus`] for any non-2xx response.
    /// - [`FeedError::Http`] on network failure or an undecodable body.
    pub async fn fetch_text(&self) -> Result<String, FeedError> {
        tracing::debug!(url = %self.url, "fetching feed");
        let response = self
            .client
            .get(self.url.clone())
            .header(
                reqwest::header::ACCEPT,
                "text/csv,text/plain;q=0.9,*/*;q=0.8",
            )
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::UnexpectedStatus {
                status: status.as_u16(),
                url: self.url.to_string(),
            });
        }

        let body = response.text().await?;
        tracing::debug!(url = %self.url, bytes = body.len(), "fetched feed");
        Ok(body)
    }
}
