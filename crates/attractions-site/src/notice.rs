//! User-facing messages for the inline notice regions.

use attractions_core::ConfigError;
use attractions_feed::FeedError;

pub const NO_MATCHES: &str = "No attractions match the current filters.";
pub const FILTER_FAILED: &str = "An error occurred while filtering. Please try again.";
pub const MAP_FAILED: &str = "Failed to load map. Please try refreshing the page.";
pub const NO_VALID_RECORDS: &str = "No valid attractions found in the data source.";

/// Message shown above the list when the feed could not be loaded.
///
/// Configuration, transport and data problems read differently so a site
/// owner can tell "fix the URL" from "fix the sheet".
#[must_use]
pub fn load_failure_message(err: &FeedError) -> String {
    match err {
        FeedError::Config(ConfigError::FeedUrlNotConfigured { reason }) => {
            format!("Configuration error: {reason}. Please set a published CSV link.")
        }
        FeedError::Config(other) => format!("Configuration error: {other}."),
        FeedError::NoValidRecords { .. } => NO_VALID_RECORDS.to_string(),
        FeedError::InvalidUrl { .. } | FeedError::Http(_) | FeedError::UnexpectedStatus { .. } => {
            format!(
                "Failed to load attraction data: {err}. Check the feed URL and ensure it's published correctly."
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_message_names_the_reason() {
        let err = FeedError::Config(ConfigError::FeedUrlNotConfigured {
            reason: "ATTRACTIONS_FEED_URL is not set".to_string(),
        });
        let message = load_failure_message(&err);
        assert!(message.starts_with("Configuration error: ATTRACTIONS_FEED_URL is not set"));
    }

    #[test]
    fn transport_message_carries_status() {
        let err = FeedError::UnexpectedStatus {
            status: 404,
            url: "https://example.com/pub?output=csv".to_string(),
        };
        assert_eq!(
            load_failure_message(&err),
            "Failed to load attraction data: HTTP error! status: 404. Check the feed URL and ensure it's published correctly."
        );
    }

    #[test]
    fn data_message_is_distinct_from_transport() {
        let err = FeedError::NoValidRecords {
            data_rows: 3,
            skipped: 3,
        };
        assert_eq!(load_failure_message(&err), NO_VALID_RECORDS);
    }
}
