//! `list` and `locate`: drive the controller against terminal output.

use attractions_core::{AppConfig, Coordinates, FilterState, Selection};
use attractions_site::{Controller, HtmlList, MapConfig, MarkerIndex};

use crate::terminal::TerminalList;

/// # Errors
///
/// Returns an error if the feed cannot be loaded or stdout cannot be written.
pub(crate) async fn run_list(config: &AppConfig, category: &str, state: &str) -> anyhow::Result<()> {
    let feed = crate::source::load(config).await?;
    let mut controller = Controller::with_focused_zoom(feed, config.map.focused_zoom);
    controller.set_filter(FilterState::new(
        Selection::from_value(category),
        Selection::from_value(state),
    ));

    let stdout = std::io::stdout();
    let mut list = TerminalList::new(stdout.lock());
    let mut markers = MarkerIndex::new();
    controller.populate_filters(&mut list)?;
    controller.apply_filters(&mut list, &mut markers)?;
    list.finish(controller.filter(), controller.records().len())?;
    Ok(())
}

/// Lines describing a focus request after [`Controller::focus`] ran against
/// `markers`.
pub(crate) fn focus_report(
    controller: &Controller,
    markers: &MarkerIndex,
    target: Coordinates,
) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(viewport) = markers.viewport() {
        lines.push(format!(
            "fly to {} at zoom {} over {:.1}s",
            viewport.center,
            viewport.zoom,
            viewport.duration.as_secs_f64()
        ));
    }

    let key = target.key();
    match markers.pending_popup() {
        Some((marker, delay)) => {
            lines.push(format!(
                "open popup \"{}\" after {} ms",
                marker.title,
                delay.as_millis()
            ));
            let sharing = controller
                .visible()
                .filter(|r| r.identity_key() == key)
                .count();
            if sharing > 1 {
                lines.push(format!(
                    "note: {sharing} attractions share {key}; only the last one has a reachable marker"
                ));
            }
        }
        None => lines.push(format!("no attraction marker at {key}")),
    }
    lines
}

/// # Errors
///
/// Returns an error if the map settings are invalid or the feed cannot be
/// loaded.
pub(crate) async fn run_locate(config: &AppConfig, lat: f64, lng: f64) -> anyhow::Result<()> {
    let map = MapConfig::from_settings(&config.map)?;
    let feed = crate::source::load(config).await?;
    let mut controller = Controller::new(feed, &map);

    let mut list = HtmlList::default();
    let mut markers = MarkerIndex::new();
    controller.apply_filters(&mut list, &mut markers)?;

    let target = Coordinates::new(lat, lng);
    if let Some(record) = controller.focus(&mut markers, target) {
        tracing::debug!(name = %record.name, "focused attraction");
    }
    for line in focus_report(&controller, &markers, target) {
        println!("{line}");
    }
    Ok(())
}
