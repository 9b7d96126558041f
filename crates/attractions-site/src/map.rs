//! Map view configuration and the in-memory marker table.

use std::collections::HashMap;
use std::time::Duration;

use attractions_core::config::MAX_ZOOM;
use attractions_core::{Coordinates, MapSettings};
use serde::Serialize;

use crate::error::{MapInitError, ViewError};
use crate::presentation::{MapPresentation, Marker};

/// Length of the focus animation.
pub const FLY_DURATION: Duration = Duration::from_millis(1000);

/// Delay before opening a focused marker's popup. The animation has no
/// completion signal, so this is the animation length plus a buffer.
pub const POPUP_DELAY: Duration = Duration::from_millis(1100);

pub const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const TILE_ATTRIBUTION: &str =
    r#"&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors"#;

/// Validated map settings, serialized into the page for the map script.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapConfig {
    pub center: Coordinates,
    pub initial_zoom: u8,
    pub focused_zoom: u8,
    pub max_zoom: u8,
    pub fly_duration_secs: f64,
    pub popup_delay_ms: u64,
    pub tile_url: &'static str,
    pub attribution: &'static str,
}

impl MapConfig {
    /// # Errors
    ///
    /// Returns [`MapInitError`] when the center is outside latitude/longitude
    /// ranges or a zoom exceeds the tile layer's maximum.
    pub fn from_settings(settings: &MapSettings) -> Result<Self, MapInitError> {
        let Coordinates {
            latitude,
            longitude,
        } = settings.center;
        if !(-90.0..=90.0).contains(&latitude) || !(-180.0..=180.0).contains(&longitude) {
            return Err(MapInitError::CenterOutOfRange {
                latitude,
                longitude,
            });
        }
        for (which, zoom) in [
            ("initial", settings.initial_zoom),
            ("focused", settings.focused_zoom),
        ] {
            if zoom > MAX_ZOOM {
                return Err(MapInitError::ZoomOutOfRange {
                    which,
                    zoom,
                    max: MAX_ZOOM,
                });
            }
        }

        Ok(Self {
            center: settings.center,
            initial_zoom: settings.initial_zoom,
            focused_zoom: settings.focused_zoom,
            max_zoom: MAX_ZOOM,
            fly_duration_secs: FLY_DURATION.as_secs_f64(),
            popup_delay_ms: u64::try_from(POPUP_DELAY.as_millis()).unwrap_or(u64::MAX),
            tile_url: TILE_URL,
            attribution: TILE_ATTRIBUTION,
        })
    }
}

/// A viewport move requested through [`MapPresentation::fly_to`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: Coordinates,
    pub zoom: u8,
    pub duration: Duration,
}

/// Marker table without a widget behind it. Holds markers in placement
/// order and indexes them by identity key; a later marker with the same key
/// replaces the earlier one in the index.
#[derive(Debug, Default)]
pub struct MarkerIndex {
    markers: Vec<Marker>,
    by_key: HashMap<String, usize>,
    viewport: Option<Viewport>,
    pending_popup: Option<(String, Duration)>,
    checkpoint: Option<MarkerSnapshot>,
}

type MarkerSnapshot = (
    Vec<Marker>,
    HashMap<String, usize>,
    Option<(String, Duration)>,
);

impl MarkerIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every placed marker, including ones shadowed in the key index.
    #[must_use]
    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    /// The marker reachable through `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Marker> {
        self.by_key.get(key).map(|&i| &self.markers[i])
    }

    /// Number of distinct identity keys.
    #[must_use]
    pub fn reachable(&self) -> usize {
        self.by_key.len()
    }

    #[must_use]
    pub fn viewport(&self) -> Option<Viewport> {
        self.viewport
    }

    /// The popup scheduled by the last focus, if any.
    #[must_use]
    pub fn pending_popup(&self) -> Option<(&Marker, Duration)> {
        let (key, delay) = self.pending_popup.as_ref()?;
        self.get(key).map(|m| (m, *delay))
    }
}

impl MapPresentation for MarkerIndex {
    fn begin_render(&mut self) {
        self.checkpoint = Some((
            self.markers.clone(),
            self.by_key.clone(),
            self.pending_popup.clone(),
        ));
    }

    fn commit_render(&mut self) {
        self.checkpoint = None;
    }

    fn rollback_render(&mut self) {
        if let Some((markers, by_key, pending_popup)) = self.checkpoint.take() {
            self.markers = markers;
            self.by_key = by_key;
            self.pending_popup = pending_popup;
        }
    }

    fn clear_markers(&mut self) -> Result<(), ViewError> {
        self.markers.clear();
        self.by_key.clear();
        self.pending_popup = None;
        Ok(())
    }

    fn place_marker(&mut self, marker: &Marker) -> Result<(), ViewError> {
        self.by_key.insert(marker.key.clone(), self.markers.len());
        self.markers.push(marker.clone());
        Ok(())
    }

    fn fly_to(&mut self, center: Coordinates, zoom: u8, duration: Duration) {
        self.viewport = Some(Viewport {
            center,
            zoom,
            duration,
        });
    }

    fn open_popup_after(&mut self, key: &str, delay: Duration) {
        self.pending_popup = Some((key.to_string(), delay));
    }
}
