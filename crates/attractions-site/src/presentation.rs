//! Presentation surfaces the controller paints into.
//!
//! Rendering is split from filtering: the controller decides *what* is
//! visible and hands finished [`Card`]s and [`Marker`]s to these traits.
//! The static page, the CLI and the tests each provide their own targets.

use std::time::Duration;

use attractions_core::{Coordinates, FilterState};
use serde::Serialize;

use crate::error::ViewError;

/// One entry of a filter dropdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub value: String,
    pub label: String,
}

/// Options for both filter controls, the "all" entry first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FilterOptions {
    pub categories: Vec<FilterOption>,
    pub states: Vec<FilterOption>,
}

/// A rendered list card. `dom_id` is positional and only stable within one
/// render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub index: usize,
    pub dom_id: String,
    pub identity_key: String,
    pub name: String,
    /// `"City, State"` with fallbacks for missing parts.
    pub location: String,
    pub categories: String,
    pub html: String,
}

/// A map marker with its popup content, keyed by the record's identity key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub key: String,
    #[serde(flatten)]
    pub coordinates: Coordinates,
    pub title: String,
    pub popup_html: String,
}

/// Inline message slots on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeRegion {
    /// Feed load problems, shown above the list.
    List,
    /// Problems while filtering or rendering.
    Filter,
}

/// The filter controls and the card list.
///
/// A repaint is bracketed by [`ListPresentation::begin_render`] and either
/// `commit_render` or `rollback_render`; after a rollback the content from
/// before `begin_render` is shown again.
pub trait ListPresentation {
    /// Checkpoint the current cards or "no matches" message.
    fn begin_render(&mut self);

    fn commit_render(&mut self);

    /// Drop a partial repaint and show the checkpointed content.
    fn rollback_render(&mut self);

    fn set_filter_options(&mut self, options: &FilterOptions) -> Result<(), ViewError>;

    fn select_filters(&mut self, filter: &FilterState) -> Result<(), ViewError>;

    /// Remove every card and any "no matches" message.
    fn clear(&mut self) -> Result<(), ViewError>;

    fn show_empty(&mut self, message: &str) -> Result<(), ViewError>;

    fn append_card(&mut self, card: &Card) -> Result<(), ViewError>;

    fn show_notice(&mut self, region: NoticeRegion, message: &str);

    fn hide_notice(&mut self, region: NoticeRegion);
}

/// The marker layer and viewport of a map widget. Repaints are bracketed
/// the same way as [`ListPresentation`].
pub trait MapPresentation {
    /// Checkpoint the current markers.
    fn begin_render(&mut self);

    fn commit_render(&mut self);

    /// Drop a partial repaint and show the checkpointed markers.
    fn rollback_render(&mut self);

    fn clear_markers(&mut self) -> Result<(), ViewError>;

    fn place_marker(&mut self, marker: &Marker) -> Result<(), ViewError>;

    /// Animate the viewport to `center` at `zoom` over `duration`.
    fn fly_to(&mut self, center: Coordinates, zoom: u8, duration: Duration);

    /// Open the popup of the marker with `key` once `delay` has elapsed.
    fn open_popup_after(&mut self, key: &str, delay: Duration);
}
