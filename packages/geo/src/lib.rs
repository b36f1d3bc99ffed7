#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geographic primitives for the accessibility pipeline.
//!
//! Provides the [`GeoPoint`] value type, the haversine great-circle
//! distance, and the exhaustive proximity scans used everywhere else
//! in the workspace. There is deliberately no spatial index here: the
//! datasets are small enough that a linear scan is both fast and
//! trivially deterministic.

pub mod distance;
pub mod proximity;

pub use distance::{EARTH_RADIUS_M, distance_m};
pub use proximity::{count_within_radius, nearest_by};

use serde::{Deserialize, Serialize};

/// A location on earth in decimal degrees.
///
/// Plain value type with no identity; copied freely.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in decimal degrees (positive = north).
    pub latitude: f64,
    /// Longitude in decimal degrees (positive = east).
    pub longitude: f64,
}

impl GeoPoint {
    /// Creates a point from latitude and longitude in decimal degrees.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}
