use std::path::PathBuf;

use thiserror::Error;

/// A presentation surface failed while being painted.
#[derive(Debug, Error)]
pub enum ViewError {
    #[error("{surface} presentation failed: {reason}")]
    Surface {
        surface: &'static str,
        reason: String,
    },

    #[error("presentation output failed: {0}")]
    Io(#[from] std::io::Error),
}

/// The map settings cannot produce a usable map view.
#[derive(Debug, Error)]
pub enum MapInitError {
    #[error("map center {latitude},{longitude} is outside valid coordinate ranges")]
    CenterOutOfRange { latitude: f64, longitude: f64 },

    #[error("{which} zoom {zoom} exceeds maximum {max}")]
    ZoomOutOfRange {
        which: &'static str,
        zoom: u8,
        max: u8,
    },
}

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error for {context}: {source}")]
    Json {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("refusing to use {path} as output: it contains the site input directory")]
    UnsafeOutputDir { path: PathBuf },

    #[error("refusing to use {path} as output: it is inside passthrough directory {dir}")]
    OutputInsidePassthrough { path: PathBuf, dir: String },
}

impl SiteError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| SiteError::Io { path, source }
    }
}
