//! Filtering, rendering and static site output for the attractions map.

pub mod builder;
pub mod controller;
pub mod error;
pub mod map;
pub mod notice;
pub mod page;
pub mod presentation;
pub mod render;

pub use builder::{BuildSummary, SiteBuilder};
pub use controller::{visible_indices, visible_subset, Controller};
pub use error::{MapInitError, SiteError, ViewError};
pub use map::{MapConfig, MarkerIndex, Viewport, FLY_DURATION, POPUP_DELAY};
pub use notice::load_failure_message;
pub use page::{assemble_page, HtmlList, PageOutcome, StaticPage};
pub use presentation::{
    Card, FilterOption, FilterOptions, ListPresentation, MapPresentation, Marker, NoticeRegion,
};
