//! `build`: load the feed and write the static site.
//!
//! A load failure still produces a page; the failure is shown in the list
//! notice and the command then exits non-zero.

use std::path::{Path, PathBuf};

use anyhow::Context;
use attractions_core::{load_site_config, AppConfig, SiteConfig};
use attractions_site::{assemble_page, Controller, SiteBuilder};

/// Output directory precedence: `--output`, then `output` in `site.yaml`
/// (relative to the site directory), then the environment setting.
pub(crate) fn resolve_output_dir(
    flag: Option<PathBuf>,
    site_dir: &Path,
    site_config: &SiteConfig,
    config: &AppConfig,
) -> PathBuf {
    flag.or_else(|| site_config.output.as_ref().map(|o| site_dir.join(o)))
        .unwrap_or_else(|| config.output_dir.clone())
}

/// # Errors
///
/// Returns an error if `site.yaml` is invalid, the site cannot be written,
/// or the feed failed to load (after the degraded page was written).
pub(crate) async fn run_build(
    config: &AppConfig,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
) -> anyhow::Result<()> {
    let site_dir = input.unwrap_or_else(|| config.site_dir.clone());
    let site_config = load_site_config(&site_dir)
        .with_context(|| format!("loading site config from {}", site_dir.display()))?;
    let output_dir = resolve_output_dir(output, &site_dir, &site_config, config);

    let loaded = crate::source::load(config).await;
    let outcome = assemble_page(&config.map, loaded);
    let records = outcome
        .controller
        .as_ref()
        .map_or(&[][..], Controller::records);

    let summary = SiteBuilder::new(&site_dir, output_dir, site_config)
        .build(&outcome.page, records)
        .context("writing site")?;

    println!(
        "wrote {} attractions ({} markers, {} copied files) to {}",
        summary.records,
        summary.markers,
        summary.copied_files,
        summary.output_dir.display()
    );

    if let Some(err) = outcome.load_error {
        return Err(anyhow::Error::new(err).context("site written with a load failure notice"));
    }
    Ok(())
}
