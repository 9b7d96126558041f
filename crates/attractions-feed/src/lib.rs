//! Attraction feed loading: fetch the published CSV and normalize it into
//! validated [`attractions_core::AttractionRecord`]s.

pub mod client;
pub mod csv;
pub mod error;
pub mod load;
pub mod normalize;

pub use client::FeedClient;
pub use error::FeedError;
pub use load::load_feed;
pub use normalize::{normalize_feed, NormalizedFeed, SkipReason, SkippedRow};
