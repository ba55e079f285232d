//! Spatial anonymization of respondents' locations
//!
//! Exact coordinates are snapped onto a grid spanning their bounding box
//! and released as one representative per grid cell,
//! hiding each record's location while keeping the density for heatmaps.

pub mod error;
pub mod filter;
pub mod geometry;
pub mod measurements;
pub mod release;
pub mod survey;

pub use error::{PrivacyError, Result};
pub use filter::{anonymize, FilterConfig, PrivacyFilter, DEFAULT_RESOLUTION};
pub use geometry::Point;
pub use release::ReleaseStrategy;
