use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Identity key for these coordinates. See [`identity_key`].
    #[must_use]
    pub fn key(&self) -> String {
        identity_key(self.latitude, self.longitude)
    }
}

impl std::fmt::Display for Coordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

impl FromStr for Coordinates {
    type Err = String;

    /// Parses `"lat,lng"`, e.g. `"39.8283,-98.5795"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| format!("expected \"lat,lng\", got \"{s}\""))?;
        let latitude = lat
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid latitude \"{}\": {e}", lat.trim()))?;
        let longitude = lng
            .trim()
            .parse::<f64>()
            .map_err(|e| format!("invalid longitude \"{}\": {e}", lng.trim()))?;
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(format!("coordinates must be finite, got \"{s}\""));
        }
        Ok(Self::new(latitude, longitude))
    }
}

/// Key correlating a record with its map marker: `"{lat}_{lng}"`.
///
/// Uses shortest round-trip float formatting, so `40.0` renders as `40`.
/// Records sharing identical coordinates produce the same key.
#[must_use]
pub fn identity_key(latitude: f64, longitude: f64) -> String {
    format!("{latitude}_{longitude}")
}

/// One validated point of interest from the feed.
///
/// Every instance has a non-empty `name` and finite coordinates; the feed
/// normalizer is the only producer and enforces this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttractionRecord {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    /// Display order is preserved from the source cell.
    pub categories: Vec<String>,
    /// `None` when the source cell was empty; never matches a specific state filter.
    pub state: Option<String>,
    pub city: String,
    pub description: String,
    pub image_url: String,
    pub image_alt_text: String,
    pub website: String,
}

impl AttractionRecord {
    #[must_use]
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    #[must_use]
    pub fn identity_key(&self) -> String {
        identity_key(self.latitude, self.longitude)
    }

    #[must_use]
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// Alt text for the record's image, falling back to the name.
    #[must_use]
    pub fn image_alt(&self) -> &str {
        if self.image_alt_text.is_empty() {
            &self.name
        } else {
            &self.image_alt_text
        }
    }
}
