use crate::app_config::{AppConfig, MapSettings};
use crate::attraction::Coordinates;
use crate::ConfigError;

/// Highest zoom level the map widget accepts.
pub const MAX_ZOOM: u8 = 19;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the process environment so it can be tested with a plain
/// `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| invalid(var, e.to_string()))
    };

    let parse_zoom = |var: &str, default: &str| -> Result<u8, ConfigError> {
        let raw = or_default(var, default);
        let zoom = raw.parse::<u8>().map_err(|e| invalid(var, e.to_string()))?;
        if zoom > MAX_ZOOM {
            return Err(invalid(var, format!("zoom {zoom} exceeds maximum {MAX_ZOOM}")));
        }
        Ok(zoom)
    };

    let feed_url = lookup("ATTRACTIONS_FEED_URL")
        .ok()
        .map(|url| url.trim().to_string());
    let log_level = or_default("ATTRACTIONS_LOG_LEVEL", "info");

    let defaults = MapSettings::default();
    let center = or_default("ATTRACTIONS_MAP_CENTER", &defaults.center.to_string())
        .parse::<Coordinates>()
        .map_err(|reason| invalid("ATTRACTIONS_MAP_CENTER", reason))?;
    let initial_zoom = parse_zoom(
        "ATTRACTIONS_MAP_ZOOM",
        &defaults.initial_zoom.to_string(),
    )?;
    let focused_zoom = parse_zoom(
        "ATTRACTIONS_FOCUSED_ZOOM",
        &defaults.focused_zoom.to_string(),
    )?;

    let site_dir = PathBuf::from(or_default("ATTRACTIONS_SITE_DIR", "."));
    let output_dir = PathBuf::from(or_default("ATTRACTIONS_OUTPUT_DIR", "_site"));

    let request_timeout_secs = parse_u64("ATTRACTIONS_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("ATTRACTIONS_USER_AGENT", "attractions/0.1 (static-site)");

    Ok(AppConfig {
        feed_url,
        log_level,
        map: MapSettings {
            center,
            initial_zoom,
            focused_zoom,
        },
        site_dir,
        output_dir,
        request_timeout_secs,
        user_agent,
    })
}

/// Whether a feed URL is still a placeholder rather than a published CSV link.
///
/// Empty values, copy-paste markers, and spreadsheet `pubhtml` links (which
/// serve an HTML page instead of CSV) are all placeholders.
#[must_use]
pub fn is_placeholder_feed_url(url: &str) -> bool {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return true;
    }
    if trimmed.contains("PASTE") || trimmed.contains("YOUR_URL") {
        return true;
    }
    let path = trimmed.split(['?', '#']).next().unwrap_or(trimmed);
    path.trim_end_matches('/').ends_with("/pubhtml")
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
