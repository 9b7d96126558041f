pub mod app_config;
pub mod attraction;
pub mod config;
pub mod filter;
pub mod site_config;

pub use app_config::{AppConfig, MapSettings};
pub use attraction::{identity_key, AttractionRecord, Coordinates};
pub use config::{is_placeholder_feed_url, load_app_config, load_app_config_from_env};
pub use filter::{FilterState, Selection};
pub use site_config::{load_site_config, SiteConfig};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("configuration error: {reason}")]
    FeedUrlNotConfigured { reason: String },

    #[error("failed to read site config {path}: {source}")]
    SiteFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse site config: {0}")]
    SiteFileParse(#[from] serde_yaml::Error),

    #[error("invalid site config: {0}")]
    Validation(String),
}
