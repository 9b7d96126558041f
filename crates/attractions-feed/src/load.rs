use crate::client::FeedClient;
use crate::error::FeedError;
use crate::normalize::{normalize_feed, NormalizedFeed};

/// Fetches and normalizes the feed.
///
/// # Errors
///
/// Returns the transport errors of [`FeedClient::fetch_text`], or
/// [`FeedError::NoValidRecords`] when the feed was reachable but no row
/// survived normalization.
pub async fn load_feed(client: &FeedClient) -> Result<NormalizedFeed, FeedError> {
    let text = client.fetch_text().await?;
    let feed = normalize_feed(&text);

    if feed.records.is_empty() {
        return Err(FeedError::NoValidRecords {
            data_rows: feed.data_rows,
            skipped: feed.skipped.len(),
        });
    }

    tracing::info!(
        url = client.url(),
        accepted = feed.records.len(),
        skipped = feed.skipped.len(),
        "loaded attraction feed"
    );
    Ok(feed)
}
