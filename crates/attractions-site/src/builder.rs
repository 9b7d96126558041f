//! Writes the generated site to the output directory.

use std::fs;
use std::path::{Path, PathBuf};

use attractions_core::{AttractionRecord, SiteConfig};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::SiteError;
use crate::page::{StaticPage, DEFAULT_TEMPLATE};

pub const PAGE_FILE: &str = "index.html";
pub const DATA_FILE: &str = "attractions.json";
pub const MAP_SCRIPT_PATH: &str = "assets/attractions-map.js";

/// Map bootstrap served next to the page.
pub const MAP_SCRIPT: &str = include_str!("../assets/attractions-map.js");

/// Contents of `attractions.json`.
#[derive(Debug, Serialize)]
struct DataFile<'a> {
    generated_at: DateTime<Utc>,
    count: usize,
    records: &'a [AttractionRecord],
}

/// What one build produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub output_dir: PathBuf,
    pub records: usize,
    pub markers: usize,
    pub copied_files: usize,
    /// Whether the page came from the site directory's own template.
    pub custom_template: bool,
}

pub struct SiteBuilder {
    site_dir: PathBuf,
    output_dir: PathBuf,
    config: SiteConfig,
}

impl SiteBuilder {
    #[must_use]
    pub fn new(site_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>, config: SiteConfig) -> Self {
        Self {
            site_dir: site_dir.into(),
            output_dir: output_dir.into(),
            config,
        }
    }

    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Recreates the output directory and writes the page, the data file,
    /// the map script and every passthrough directory.
    ///
    /// # Errors
    ///
    /// - [`SiteError::UnsafeOutputDir`] if the output directory is, or
    ///   contains, the site directory.
    /// - [`SiteError::OutputInsidePassthrough`] if the output directory is,
    ///   or is inside, a passthrough source directory.
    /// - [`SiteError::Io`] / [`SiteError::Json`] on write or encode failure.
    pub fn build(
        &self,
        page: &StaticPage,
        records: &[AttractionRecord],
    ) -> Result<BuildSummary, SiteError> {
        self.check_passthrough_overlap()?;
        self.reset_output_dir()?;

        let mut copied_files = 0;
        for dir in &self.config.passthrough {
            let source = self.site_dir.join(dir);
            if source.is_dir() {
                copied_files += copy_dir_recursive(&source, &self.output_dir.join(dir))?;
            } else {
                tracing::debug!(dir = %source.display(), "passthrough directory not found, skipping");
            }
        }

        let template_path = self.site_dir.join(PAGE_FILE);
        let custom_template = template_path.is_file();
        let template = if custom_template {
            fs::read_to_string(&template_path).map_err(SiteError::io(&template_path))?
        } else {
            DEFAULT_TEMPLATE.to_string()
        };

        let html = page.render(&template, &self.config.title)?;
        write_file(&self.output_dir.join(PAGE_FILE), html.as_bytes())?;

        let data = DataFile {
            generated_at: Utc::now(),
            count: records.len(),
            records,
        };
        let json = serde_json::to_vec_pretty(&data).map_err(|source| SiteError::Json {
            context: DATA_FILE,
            source,
        })?;
        write_file(&self.output_dir.join(DATA_FILE), &json)?;
        write_file(&self.output_dir.join(MAP_SCRIPT_PATH), MAP_SCRIPT.as_bytes())?;

        let summary = BuildSummary {
            output_dir: self.output_dir.clone(),
            records: records.len(),
            markers: page.markers.markers().len(),
            copied_files,
            custom_template,
        };
        tracing::info!(
            output = %summary.output_dir.display(),
            records = summary.records,
            copied_files = summary.copied_files,
            custom_template = summary.custom_template,
            "site written"
        );
        Ok(summary)
    }

    fn check_passthrough_overlap(&self) -> Result<(), SiteError> {
        let output =
            canonicalize_partial(&self.output_dir).map_err(SiteError::io(&self.output_dir))?;
        for dir in &self.config.passthrough {
            let source = self.site_dir.join(dir);
            if !source.is_dir() {
                continue;
            }
            let source = source.canonicalize().map_err(SiteError::io(&source))?;
            if output.starts_with(&source) {
                return Err(SiteError::OutputInsidePassthrough {
                    path: self.output_dir.clone(),
                    dir: dir.clone(),
                });
            }
        }
        Ok(())
    }

    fn reset_output_dir(&self) -> Result<(), SiteError> {
        if self.output_dir.exists() {
            let output = self
                .output_dir
                .canonicalize()
                .map_err(SiteError::io(&self.output_dir))?;
            let site = self
                .site_dir
                .canonicalize()
                .map_err(SiteError::io(&self.site_dir))?;
            if site.starts_with(&output) {
                return Err(SiteError::UnsafeOutputDir {
                    path: self.output_dir.clone(),
                });
            }
            fs::remove_dir_all(&self.output_dir).map_err(SiteError::io(&self.output_dir))?;
        }
        fs::create_dir_all(&self.output_dir).map_err(SiteError::io(&self.output_dir))
    }
}

/// Canonicalizes the longest existing prefix of `path` and re-appends the
/// components that do not exist yet.
fn canonicalize_partial(path: &Path) -> std::io::Result<PathBuf> {
    let mut existing = path;
    let mut missing = Vec::new();
    loop {
        let base = if existing.as_os_str().is_empty() {
            Path::new(".")
        } else {
            existing
        };
        if base.exists() {
            let mut resolved = base.canonicalize()?;
            resolved.extend(missing.iter().rev());
            return Ok(resolved);
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                missing.push(name.to_os_string());
                existing = parent;
            }
            _ => return base.canonicalize(),
        }
    }
}

fn write_file(path: &Path, contents: &[u8]) -> Result<(), SiteError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(SiteError::io(parent))?;
    }
    fs::write(path, contents).map_err(SiteError::io(path))
}

/// Copies `from` into `to`, returning the number of files copied.
fn copy_dir_recursive(from: &Path, to: &Path) -> Result<usize, SiteError> {
    fs::create_dir_all(to).map_err(SiteError::io(to))?;
    let mut copied = 0;
    for entry in fs::read_dir(from).map_err(SiteError::io(from))? {
        let entry = entry.map_err(SiteError::io(from))?;
        let source = entry.path();
        let target = to.join(entry.file_name());
        let file_type = entry.file_type().map_err(SiteError::io(&source))?;
        if file_type.is_dir() {
            copied += copy_dir_recursive(&source, &target)?;
        } else {
            fs::copy(&source, &target).map_err(SiteError::io(&source))?;
            copied += 1;
        }
    }
    Ok(copied)
}
