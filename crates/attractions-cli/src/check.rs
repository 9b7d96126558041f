//! `check`: fetch and normalize the feed without writing anything.

use attractions_core::AppConfig;
use attractions_feed::{normalize_feed, FeedClient, FeedError, NormalizedFeed};

/// Lines describing a normalization pass: counts, derived sets, then one
/// row per skipped line.
pub(crate) fn report_lines(feed: &NormalizedFeed) -> Vec<String> {
    let join = |set: &std::collections::BTreeSet<String>| {
        if set.is_empty() {
            "(none)".to_string()
        } else {
            set.iter().cloned().collect::<Vec<_>>().join(", ")
        }
    };

    let mut lines = vec![
        format!(
            "accepted {} of {} data rows ({} skipped)",
            feed.records.len(),
            feed.data_rows,
            feed.skipped.len()
        ),
        format!("categories: {}", join(&feed.categories)),
        format!("states: {}", join(&feed.states)),
    ];
    if !feed.skipped.is_empty() {
        lines.push(String::new());
        lines.push(format!("{:<6}REASON", "LINE"));
        lines.extend(
            feed.skipped
                .iter()
                .map(|row| format!("{:<6}{}", row.line, row.reason)),
        );
    }
    lines
}

/// # Errors
///
/// Returns an error if the feed URL is not configured, the fetch fails, or
/// no row survives normalization.
pub(crate) async fn run_check(config: &AppConfig) -> anyhow::Result<()> {
    let client = FeedClient::from_config(config)?;
    let text = client.fetch_text().await?;
    let feed = normalize_feed(&text);

    println!("feed: {}", client.url());
    for line in report_lines(&feed) {
        println!("{line}");
    }

    if feed.records.is_empty() {
        return Err(FeedError::NoValidRecords {
            data_rows: feed.data_rows,
            skipped: feed.skipped.len(),
        }
        .into());
    }
    Ok(())
}
