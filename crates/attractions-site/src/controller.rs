//! Filter/render controller.
//!
//! Owns the full record set, the current [`FilterState`], the visible subset
//! and the marker lookup table. Painting goes through the presentation
//! traits so the same controller drives the static page, the CLI and tests.

use std::collections::HashMap;

use attractions_core::{AttractionRecord, Coordinates, FilterState, Selection};
use attractions_feed::NormalizedFeed;

use crate::error::ViewError;
use crate::map::{MapConfig, FLY_DURATION, POPUP_DELAY};
use crate::notice::{FILTER_FAILED, NO_MATCHES};
use crate::presentation::{FilterOptions, ListPresentation, MapPresentation, NoticeRegion};
use crate::render;

/// Positions in `records` of the records passing `filter`, ascending.
#[must_use]
pub fn visible_indices(records: &[AttractionRecord], filter: &FilterState) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| filter.matches(r))
        .map(|(i, _)| i)
        .collect()
}

/// Records passing `filter`, in feed order.
#[must_use]
pub fn visible_subset<'a>(
    records: &'a [AttractionRecord],
    filter: &FilterState,
) -> Vec<&'a AttractionRecord> {
    visible_indices(records, filter)
        .into_iter()
        .map(|i| &records[i])
        .collect()
}

pub struct Controller {
    records: Vec<AttractionRecord>,
    categories: Vec<String>,
    states: Vec<String>,
    filter: FilterState,
    /// Indices into `records`.
    visible: Vec<usize>,
    /// Identity key → index into `records` of the marker that owns the key.
    markers: HashMap<String, usize>,
    focused_zoom: u8,
}

impl Controller {
    /// Takes ownership of a loaded feed. Everything starts visible.
    #[must_use]
    pub fn new(feed: NormalizedFeed, map: &MapConfig) -> Self {
        Self::with_focused_zoom(feed, map.focused_zoom)
    }

    #[must_use]
    pub fn with_focused_zoom(feed: NormalizedFeed, focused_zoom: u8) -> Self {
        let visible = (0..feed.records.len()).collect();
        Self {
            records: feed.records,
            categories: feed.categories.into_iter().collect(),
            states: feed.states.into_iter().collect(),
            filter: FilterState::default(),
            visible,
            markers: HashMap::new(),
            focused_zoom,
        }
    }

    #[must_use]
    pub fn records(&self) -> &[AttractionRecord] {
        &self.records
    }

    #[must_use]
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    #[must_use]
    pub fn states(&self) -> &[String] {
        &self.states
    }

    #[must_use]
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    /// The visible subset from the last successful [`Controller::apply_filters`].
    pub fn visible(&self) -> impl Iterator<Item = &AttractionRecord> + '_ {
        self.visible.iter().map(|&i| &self.records[i])
    }

    #[must_use]
    pub fn visible_len(&self) -> usize {
        self.visible.len()
    }

    /// The record whose marker answers to `key`.
    #[must_use]
    pub fn marker_for(&self, key: &str) -> Option<&AttractionRecord> {
        self.markers.get(key).map(|&i| &self.records[i])
    }

    #[must_use]
    pub fn filter_options(&self) -> FilterOptions {
        render::filter_options(&self.categories, &self.states)
    }

    /// Writes both filter controls and selects the current filter.
    ///
    /// # Errors
    ///
    /// Propagates the presentation's [`ViewError`].
    pub fn populate_filters(&self, list: &mut impl ListPresentation) -> Result<(), ViewError> {
        list.set_filter_options(&self.filter_options())?;
        list.select_filters(&self.filter)
    }

    pub fn set_category(&mut self, category: Selection) {
        self.filter.category = category;
    }

    pub fn set_state(&mut self, state: Selection) {
        self.filter.state = state;
    }

    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
    }

    /// Recomputes the visible subset and repaints both presentations.
    ///
    /// The visible subset and marker table change only when both
    /// presentations painted successfully. On a paint failure both are rolled
    /// back to the previous render, the filter notice is shown and the error
    /// is logged. Returns the visible count.
    ///
    /// # Errors
    ///
    /// Returns the [`ViewError`] after it has been shown.
    pub fn apply_filters(
        &mut self,
        list: &mut impl ListPresentation,
        map: &mut impl MapPresentation,
    ) -> Result<usize, ViewError> {
        list.hide_notice(NoticeRegion::Filter);

        let visible = visible_indices(&self.records, &self.filter);
        tracing::debug!(
            category = %self.filter.category,
            state = %self.filter.state,
            visible = visible.len(),
            total = self.records.len(),
            "applied filters"
        );

        list.begin_render();
        map.begin_render();
        match paint(&self.records, &visible, list, map) {
            Ok(markers) => {
                list.commit_render();
                map.commit_render();
                self.visible = visible;
                self.markers = markers;
                Ok(self.visible.len())
            }
            Err(err) => {
                list.rollback_render();
                map.rollback_render();
                tracing::error!(error = %err, "error while applying filters");
                list.show_notice(NoticeRegion::Filter, FILTER_FAILED);
                Err(err)
            }
        }
    }

    /// Resets both filters to "all", reflects that in the controls and
    /// repaints.
    ///
    /// # Errors
    ///
    /// See [`Controller::apply_filters`].
    pub fn reset(
        &mut self,
        list: &mut impl ListPresentation,
        map: &mut impl MapPresentation,
    ) -> Result<usize, ViewError> {
        self.filter = FilterState::default();
        if let Err(err) = list.select_filters(&self.filter) {
            tracing::warn!(error = %err, "failed to reset filter controls");
        }
        self.apply_filters(list, map)
    }

    /// Flies the map to `target` at the focused zoom and schedules the popup
    /// of the marker with that identity key. The viewport moves even when no
    /// marker matches. Returns the record whose popup will open.
    pub fn focus(
        &self,
        map: &mut impl MapPresentation,
        target: Coordinates,
    ) -> Option<&AttractionRecord> {
        map.fly_to(target, self.focused_zoom, FLY_DURATION);
        let key = target.key();
        match self.markers.get(&key) {
            Some(&index) => {
                map.open_popup_after(&key, POPUP_DELAY);
                Some(&self.records[index])
            }
            None => {
                tracing::debug!(key = %key, "no marker at focused coordinates");
                None
            }
        }
    }
}

/// Paints `visible` into both presentations and returns the marker table
/// for the new render. Later records with the same identity key win.
fn paint(
    records: &[AttractionRecord],
    visible: &[usize],
    list: &mut impl ListPresentation,
    map: &mut impl MapPresentation,
) -> Result<HashMap<String, usize>, ViewError> {
    map.clear_markers()?;
    list.clear()?;

    let mut markers = HashMap::new();
    if visible.is_empty() {
        list.show_empty(NO_MATCHES)?;
        return Ok(markers);
    }

    for (position, &index) in visible.iter().enumerate() {
        let record = &records[index];
        let marker = render::marker(record);
        map.place_marker(&marker)?;
        markers.insert(marker.key, index);
        list.append_card(&render::card(record, position))?;
    }
    Ok(markers)
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
