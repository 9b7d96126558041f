use std::path::PathBuf;

use crate::attraction::Coordinates;
use crate::config::is_placeholder_feed_url;
use crate::ConfigError;

/// Initial viewport and focus zoom for the map presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    pub center: Coordinates,
    pub initial_zoom: u8,
    /// Zoom level used when focusing a single attraction.
    pub focused_zoom: u8,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            center: Coordinates::new(39.8283, -98.5795),
            initial_zoom: 4,
            focused_zoom: 13,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Published spreadsheet CSV URL. Validated lazily by [`AppConfig::feed_url`]
    /// so an unset feed does not stop the map from initializing.
    pub feed_url: Option<String>,
    pub log_level: String,
    pub map: MapSettings,
    pub site_dir: PathBuf,
    pub output_dir: PathBuf,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}

impl AppConfig {
    /// The configured feed URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::FeedUrlNotConfigured`] when the URL is unset or
    /// still a placeholder.
    pub fn feed_url(&self) -> Result<&str, ConfigError> {
        match self.feed_url.as_deref() {
            None => Err(ConfigError::FeedUrlNotConfigured {
                reason: "ATTRACTIONS_FEED_URL is not set".to_string(),
            }),
            Some(url) if is_placeholder_feed_url(url) => Err(ConfigError::FeedUrlNotConfigured {
                reason: format!(
                    "ATTRACTIONS_FEED_URL \"{url}\" is a placeholder, not a published CSV link"
                ),
            }),
            Some(url) => Ok(url),
        }
    }
}
