use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// File name looked up in the site input directory.
pub const SITE_CONFIG_FILE: &str = "site.yaml";

fn default_title() -> String {
    "Attractions Map".to_string()
}

fn default_passthrough() -> Vec<String> {
    vec!["css".to_string(), "js".to_string()]
}

/// Static site layout: page title and directories copied verbatim to the output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_title")]
    pub title: String,
    /// Directories (relative to the input dir) copied into the output unchanged.
    #[serde(default = "default_passthrough")]
    pub passthrough: Vec<String>,
    /// Output directory override, relative to the input dir.
    #[serde(default)]
    pub output: Option<PathBuf>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            passthrough: default_passthrough(),
            output: None,
        }
    }
}

/// Load `site.yaml` from `site_dir`, or the defaults when the file is absent.
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read, parsed, or
/// fails validation.
pub fn load_site_config(site_dir: &Path) -> Result<SiteConfig, ConfigError> {
    let path = site_dir.join(SITE_CONFIG_FILE);
    if !path.exists() {
        return Ok(SiteConfig::default());
    }

    let content = std::fs::read_to_string(&path).map_err(|e| ConfigError::SiteFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    let config: SiteConfig = serde_yaml::from_str(&content)?;
    validate_site_config(&config)?;
    Ok(config)
}

fn validate_site_config(config: &SiteConfig) -> Result<(), ConfigError> {
    if config.title.trim().is_empty() {
        return Err(ConfigError::Validation(
            "site title must be non-empty".to_string(),
        ));
    }

    let mut seen = HashSet::new();
    for dir in &config.passthrough {
        if !is_contained_relative(Path::new(dir)) {
            return Err(ConfigError::Validation(format!(
                "passthrough directory '{dir}' must be a relative path inside the site dir"
            )));
        }
        if !seen.insert(dir.trim_end_matches('/')) {
            return Err(ConfigError::Validation(format!(
                "duplicate passthrough directory: '{dir}'"
            )));
        }
    }

    if let Some(output) = &config.output {
        if !is_contained_relative(output) {
            return Err(ConfigError::Validation(format!(
                "output directory '{}' must be a relative path inside the site dir",
                output.display()
            )));
        }
    }

    Ok(())
}

fn is_contained_relative(path: &Path) -> bool {
    path.components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir))
        && path.components().any(|c| matches!(c, Component::Normal(_)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_site_yaml(dir: &Path, content: &str) {
        std::fs::write(dir.join(SITE_CONFIG_FILE), content).unwrap();
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_site_config(dir.path()).unwrap();
        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.passthrough, vec!["css", "js"]);
        assert_eq!(config.title, "Attractions Map");
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        write_site_yaml(dir.path(), "title: Roadside Oddities\n");
        let config = load_site_config(dir.path()).unwrap();
        assert_eq!(config.title, "Roadside Oddities");
        assert_eq!(config.passthrough, vec!["css", "js"]);
        assert!(config.output.is_none());
    }

    #[test]
    fn full_file_is_parsed() {
        let dir = tempfile::tempdir().unwrap();
        write_site_yaml(
            dir.path(),
            "title: Parks\npassthrough: [css, js, img]\noutput: public\n",
        );
        let config = load_site_config(dir.path()).unwrap();
        assert_eq!(config.passthrough, vec!["css", "js", "img"]);
        assert_eq!(config.output, Some(PathBuf::from("public")));
    }

    #[test]
    fn rejects_empty_title() {
        let config = SiteConfig {
            title: "  ".to_string(),
            ..SiteConfig::default()
        };
        let err = validate_site_config(&config).unwrap_err();
        assert!(err.to_string().contains("non-empty"));
    }

    #[test]
    fn rejects_escaping_passthrough() {
        for dir in ["../secrets", "/etc", ""] {
            let config = SiteConfig {
                passthrough: vec![dir.to_string()],
                ..SiteConfig::default()
            };
            let err = validate_site_config(&config).unwrap_err();
            assert!(
                err.to_string().contains("relative path"),
                "expected rejection for {dir:?}, got: {err}"
            );
        }
    }

    #[test]
    fn rejects_duplicate_passthrough() {
        let config = SiteConfig {
            passthrough: vec!["css".to_string(), "css/".to_string()],
            ..SiteConfig::default()
        };
        let err = validate_site_config(&config).unwrap_err();
        assert!(err.to_string().contains("duplicate passthrough"));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        write_site_yaml(dir.path(), "passthrough: {css\n");
        let err = load_site_config(dir.path()).unwrap_err();
        assert!(
            matches!(err, ConfigError::SiteFileParse(_)),
            "expected SiteFileParse, got: {err:?}"
        );
    }
}
