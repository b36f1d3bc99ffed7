#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared entity types for the accessibility pipeline.
//!
//! Inputs ([`Neighborhood`], [`Poi`], [`StreetSegment`]) are created
//! once per run by the input provider and read-only afterwards.
//! Everything else is a derived value produced by one pipeline stage
//! and consumed by the next; nothing is mutated in place.

use std::fmt;

use access_map_geo::GeoPoint;
use serde::{Deserialize, Serialize};

/// The unit of aggregation for all scores and labels.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Neighborhood {
    /// Unique neighborhood identifier.
    pub id: u64,
    /// Human-readable name (e.g., "Korenmarkt/Veldstraat").
    pub name: String,
    /// City the neighborhood belongs to.
    pub city: String,
    /// Profile category (e.g., "urban_center", "suburb").
    pub category: String,
    /// Center point used for catchment-radius computations.
    pub center: GeoPoint,
}

/// A point of interest within a single amenity category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poi {
    /// Source identifier (OSM id in the reference dataset).
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Amenity category this POI belongs to (e.g., "supermarkets").
    pub category: String,
    /// Finer-grained type tag within the category (e.g., "park").
    pub poi_type: String,
    /// Location in decimal degrees.
    pub location: GeoPoint,
}

/// An ordered street polyline associated with one or more neighborhoods.
///
/// A street that intersects several catchment radii carries all of the
/// matching neighborhood ids and is sampled once per owner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreetSegment {
    /// Source identifier (OSM way id in the reference dataset).
    pub id: u64,
    /// Street name; may be empty for unnamed ways.
    pub name: String,
    /// OSM highway classification (e.g., "residential").
    pub highway_type: String,
    /// Ordered vertices of the street path; at least two.
    pub path: Vec<GeoPoint>,
    /// Neighborhoods whose catchment radius this street intersects.
    pub neighborhood_ids: Vec<u64>,
}

/// Where along its street a sample point sits.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SamplePosition {
    /// Single sample for a street no longer than the sampling interval,
    /// placed at 50% of cumulative arc length.
    Midpoint,
    /// Sample at a fixed arc-length offset (meters) from the street start.
    Offset(f64),
}

impl fmt::Display for SamplePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Midpoint => write!(f, "midpoint"),
            Self::Offset(meters) => write!(f, "{meters:.0}m"),
        }
    }
}

/// A point along a street used as a proxy for "a resident standing
/// here" when measuring distance to amenities.
#[derive(Debug, Clone)]
pub struct SamplePoint {
    /// Dense identifier assigned after radius filtering (1-based).
    pub id: u64,
    /// Street this sample was generated from.
    pub street_id: u64,
    /// Neighborhood the sample belongs to.
    pub neighborhood_id: u64,
    /// Interpolated location on the street path.
    pub location: GeoPoint,
    /// Position descriptor along the street.
    pub position: SamplePosition,
    /// Total length of the owning street in meters.
    pub street_length_m: f64,
}

/// The nearest POI found for a sample in one category.
#[derive(Debug, Clone)]
pub struct NearestPoi {
    /// Identifier of the nearest POI.
    pub poi_id: u64,
    /// Name of the nearest POI.
    pub poi_name: String,
    /// Type tag of the nearest POI.
    pub poi_type: String,
    /// Great-circle distance from the sample in meters.
    pub distance_m: f64,
}

/// Nearest-POI result for one (sample, category) pair.
///
/// `nearest` is `None` when the category has no POIs at all — the
/// explicit "no POI found" marker. Callers must never fold this into
/// a fabricated numeric distance.
#[derive(Debug, Clone)]
pub struct DistanceRecord {
    /// Sample point this record belongs to.
    pub sample_id: u64,
    /// Neighborhood the sample belongs to.
    pub neighborhood_id: u64,
    /// Amenity category searched.
    pub category: String,
    /// Nearest POI, or `None` if the category is empty.
    pub nearest: Option<NearestPoi>,
}

/// Raw radius count for one (neighborhood, domain) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoiCount {
    /// Neighborhood the count belongs to.
    pub neighborhood_id: u64,
    /// Amenity domain counted.
    pub domain: String,
    /// Number of POIs within the counting radius of the center.
    pub count: usize,
}

/// Normalized, weighted score for one (neighborhood, domain) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DomainScore {
    /// Neighborhood the score belongs to.
    pub neighborhood_id: u64,
    /// Amenity domain scored.
    pub domain: String,
    /// Raw POI count the score was derived from.
    pub count: usize,
    /// Normalized score in `[0, 10]`.
    pub score: f64,
    /// Configured weight for this domain.
    pub weight: f64,
    /// `score * weight`; the domain's contribution to the composite.
    pub weighted: f64,
}

/// Weighted-sum accessibility score for a neighborhood across all
/// domains. In `[0, 10]` whenever the weights sum to 1 and every
/// domain score is in `[0, 10]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeScore {
    /// Neighborhood the score belongs to.
    pub neighborhood_id: u64,
    /// Sum of weighted domain contributions.
    pub score: f64,
}

/// Categorical accessibility label for one (neighborhood, category)
/// pair, derived from the median nearest-POI distance.
#[derive(Debug, Clone)]
pub struct NeighborhoodLabel {
    /// Neighborhood the label belongs to.
    pub neighborhood_id: u64,
    /// Amenity category labeled.
    pub category: String,
    /// Median of the per-sample nearest distances, or `None` when the
    /// category had no POIs.
    pub median_distance_m: Option<f64>,
    /// Threshold the median was compared against, in meters.
    pub threshold_m: f64,
    /// Chosen label text (pass, fail, or the no-POI marker).
    pub label: String,
    /// Whether the median met the threshold.
    pub meets_threshold: bool,
}
