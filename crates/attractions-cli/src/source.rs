use attractions_core::AppConfig;
use attractions_feed::{load_feed, FeedClient, FeedError, NormalizedFeed};

/// Fetches and normalizes the configured feed.
pub(crate) async fn load(config: &AppConfig) -> Result<NormalizedFeed, FeedError> {
    let client = FeedClient::from_config(config)?;
    load_feed(&client).await
}
