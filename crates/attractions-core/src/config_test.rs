use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

const SHEET_CSV: &str =
    "https://docs.google.com/spreadsheets/d/e/2PACX-abc/pub?output=csv";

#[test]
fn build_app_config_defaults_with_empty_env() {
    let map = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.feed_url.is_none());
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.map, MapSettings::default());
    assert_eq!(cfg.map.center, Coordinates::new(39.8283, -98.5795));
    assert_eq!(cfg.map.initial_zoom, 4);
    assert_eq!(cfg.map.focused_zoom, 13);
    assert_eq!(cfg.site_dir.to_str(), Some("."));
    assert_eq!(cfg.output_dir.to_str(), Some("_site"));
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "attractions/0.1 (static-site)");
}

#[test]
fn missing_feed_url_is_reported_lazily() {
    let map = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let err = cfg.feed_url().unwrap_err();
    assert!(
        matches!(err, ConfigError::FeedUrlNotConfigured { .. }),
        "expected FeedUrlNotConfigured, got: {err:?}"
    );
    assert!(err.to_string().starts_with("configuration error"));
}

#[test]
fn feed_url_is_trimmed_and_returned() {
    let mut map = HashMap::new();
    let padded = format!("  {SHEET_CSV}  ");
    map.insert("ATTRACTIONS_FEED_URL", padded.as_str());
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.feed_url().unwrap(), SHEET_CSV);
}

#[test]
fn pubhtml_feed_url_is_a_placeholder() {
    let mut map = HashMap::new();
    map.insert(
        "ATTRACTIONS_FEED_URL",
        "https://docs.google.com/spreadsheets/d/e/2PACX-abc/pubhtml?gid=0&single=true",
    );
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(matches!(
        cfg.feed_url(),
        Err(ConfigError::FeedUrlNotConfigured { .. })
    ));
}

#[test]
fn placeholder_detection() {
    assert!(is_placeholder_feed_url(""));
    assert!(is_placeholder_feed_url("   "));
    assert!(is_placeholder_feed_url("PASTE YOUR URL HERE"));
    assert!(is_placeholder_feed_url(
        "https://docs.google.com/spreadsheets/d/e/x/pubhtml"
    ));
    assert!(!is_placeholder_feed_url(SHEET_CSV));
    assert!(!is_placeholder_feed_url("https://example.com/attractions.csv"));
}

#[test]
fn map_center_override() {
    let mut map = HashMap::new();
    map.insert("ATTRACTIONS_MAP_CENTER", "40.7128,-74.0060");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.map.center, Coordinates::new(40.7128, -74.0060));
}

#[test]
fn map_center_invalid() {
    let mut map = HashMap::new();
    map.insert("ATTRACTIONS_MAP_CENTER", "new-york");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ATTRACTIONS_MAP_CENTER"),
        "expected InvalidEnvVar(ATTRACTIONS_MAP_CENTER), got: {result:?}"
    );
}

#[test]
fn zoom_overrides() {
    let mut map = HashMap::new();
    map.insert("ATTRACTIONS_MAP_ZOOM", "6");
    map.insert("ATTRACTIONS_FOCUSED_ZOOM", "15");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.map.initial_zoom, 6);
    assert_eq!(cfg.map.focused_zoom, 15);
}

#[test]
fn zoom_above_maximum_is_invalid() {
    let mut map = HashMap::new();
    map.insert("ATTRACTIONS_FOCUSED_ZOOM", "20");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ATTRACTIONS_FOCUSED_ZOOM"),
        "expected InvalidEnvVar(ATTRACTIONS_FOCUSED_ZOOM), got: {result:?}"
    );
}

#[test]
fn zoom_not_a_number_is_invalid() {
    let mut map = HashMap::new();
    map.insert("ATTRACTIONS_MAP_ZOOM", "close");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ATTRACTIONS_MAP_ZOOM"),
        "expected InvalidEnvVar(ATTRACTIONS_MAP_ZOOM), got: {result:?}"
    );
}

#[test]
fn request_timeout_override() {
    let mut map = HashMap::new();
    map.insert("ATTRACTIONS_REQUEST_TIMEOUT_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 5);
}

#[test]
fn request_timeout_invalid() {
    let mut map = HashMap::new();
    map.insert("ATTRACTIONS_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ATTRACTIONS_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(ATTRACTIONS_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn site_dirs_and_user_agent_override() {
    let mut map = HashMap::new();
    map.insert("ATTRACTIONS_SITE_DIR", "site");
    map.insert("ATTRACTIONS_OUTPUT_DIR", "public");
    map.insert("ATTRACTIONS_USER_AGENT", "custom-agent/2.0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.site_dir.to_str(), Some("site"));
    assert_eq!(cfg.output_dir.to_str(), Some("public"));
    assert_eq!(cfg.user_agent, "custom-agent/2.0");
}
