#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Generates evenly spaced sample points along street polylines.
//!
//! Streets no longer than the sampling interval get a single sample at
//! their midpoint; longer streets get samples every `interval_m`
//! meters of arc length. After sampling, points farther than the
//! catchment radius from their neighborhood's center are discarded and
//! the surviving samples are re-numbered densely.

mod sampler;

pub use sampler::{path_length_m, sample_street};

use std::collections::BTreeMap;

use access_map_geo::{GeoPoint, distance_m};
use access_map_models::{Neighborhood, SamplePoint, StreetSegment};

/// Errors that can occur while generating sample points.
#[derive(Debug, thiserror::Error)]
pub enum SamplingError {
    /// A street path had fewer than two vertices. The input provider
    /// contract promises well-formed polylines, so this is a caller
    /// error rather than something to paper over with an empty result.
    #[error("street {street_id} has a degenerate path ({vertices} vertices, need at least 2)")]
    DegeneratePath {
        /// Street whose path was rejected.
        street_id: u64,
        /// Number of vertices the path actually had.
        vertices: usize,
    },

    /// A street referenced a neighborhood id with no matching
    /// [`Neighborhood`] record.
    #[error("street {street_id} references unknown neighborhood {neighborhood_id}")]
    UnknownNeighborhood {
        /// Street carrying the dangling reference.
        street_id: u64,
        /// The id that could not be resolved.
        neighborhood_id: u64,
    },

    /// The sampling interval must be a positive number of meters.
    #[error("sampling interval must be positive, got {interval_m}")]
    NonPositiveInterval {
        /// The rejected interval.
        interval_m: f64,
    },
}

/// Generates sample points for every street, filtered to each owning
/// neighborhood's catchment radius.
///
/// A street owned by several neighborhoods is sampled once per owner;
/// the radius filter then keeps only the portion of its samples that
/// actually falls inside that owner's catchment. Surviving samples are
/// assigned dense 1-based ids in input order.
///
/// # Errors
///
/// Returns [`SamplingError`] if the interval is non-positive, a street
/// path has fewer than two vertices, or a street references a
/// neighborhood id not present in `neighborhoods`.
pub fn generate_samples(
    streets: &[StreetSegment],
    neighborhoods: &[Neighborhood],
    interval_m: f64,
    radius_m: f64,
) -> Result<Vec<SamplePoint>, SamplingError> {
    if interval_m <= 0.0 {
        return Err(SamplingError::NonPositiveInterval { interval_m });
    }

    let centers: BTreeMap<u64, GeoPoint> = neighborhoods
        .iter()
        .map(|n| (n.id, n.center))
        .collect();

    let mut generated = 0usize;
    let mut retained = Vec::new();

    for street in streets {
        for &neighborhood_id in &street.neighborhood_ids {
            let center = *centers.get(&neighborhood_id).ok_or_else(|| {
                SamplingError::UnknownNeighborhood {
                    street_id: street.id,
                    neighborhood_id,
                }
            })?;

            let samples = sample_street(street, neighborhood_id, interval_m)?;
            generated += samples.len();

            retained.extend(
                samples
                    .into_iter()
                    .filter(|sample| distance_m(sample.location, center) <= radius_m),
            );
        }
    }

    // Dense re-numbering over the retained set.
    for (index, sample) in retained.iter_mut().enumerate() {
        sample.id = index as u64 + 1;
    }

    log::info!(
        "Generated {generated} sample points, kept {} within {radius_m}m of neighborhood centers",
        retained.len()
    );

    Ok(retained)
}

#[cfg(test)]
mod tests {
    use super::*;
    use access_map_models::SamplePosition;

    /// Meters of arc per degree of latitude on the reference sphere.
    const METERS_PER_DEG_LAT: f64 = 111_194.926_644_558_74;

    fn meridian_path(offsets_m: &[f64]) -> Vec<GeoPoint> {
        offsets_m
            .iter()
            .map(|m| GeoPoint::new(m / METERS_PER_DEG_LAT, 0.0))
            .collect()
    }

    fn street(id: u64, path: Vec<GeoPoint>, neighborhood_ids: Vec<u64>) -> StreetSegment {
        StreetSegment {
            id,
            name: format!("street-{id}"),
            highway_type: "residential".to_string(),
            path,
            neighborhood_ids,
        }
    }

    fn neighborhood(id: u64, center: GeoPoint) -> Neighborhood {
        Neighborhood {
            id,
            name: format!("nbhd-{id}"),
            city: "Gent".to_string(),
            category: "urban_center".to_string(),
            center,
        }
    }

    #[test]
    fn filter_drops_samples_outside_catchment_and_renumbers() {
        // Straight 2000m street heading away from the neighborhood
        // center; samples at 0, 500, 1000, 1500, 2000. Only the first
        // three are within the 1100m catchment.
        let streets = vec![street(7, meridian_path(&[0.0, 2000.0]), vec![1])];
        let neighborhoods = vec![neighborhood(1, GeoPoint::new(0.0, 0.0))];

        let samples = generate_samples(&streets, &neighborhoods, 500.0, 1100.0).expect("samples");

        assert_eq!(samples.len(), 3);
        let ids: Vec<u64> = samples.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(samples.iter().all(|s| s.neighborhood_id == 1));
    }

    #[test]
    fn street_in_two_neighborhoods_is_sampled_per_owner() {
        let streets = vec![street(3, meridian_path(&[0.0, 300.0]), vec![1, 2])];
        let neighborhoods = vec![
            neighborhood(1, GeoPoint::new(0.0, 0.0)),
            neighborhood(2, GeoPoint::new(0.001, 0.0)),
        ];

        let samples = generate_samples(&streets, &neighborhoods, 500.0, 1000.0).expect("samples");

        assert_eq!(samples.len(), 2);
        assert_eq!(samples[0].neighborhood_id, 1);
        assert_eq!(samples[1].neighborhood_id, 2);
        assert_eq!(samples[0].position, SamplePosition::Midpoint);
    }

    #[test]
    fn unknown_neighborhood_is_rejected() {
        let streets = vec![street(3, meridian_path(&[0.0, 300.0]), vec![99])];
        let neighborhoods = vec![neighborhood(1, GeoPoint::new(0.0, 0.0))];

        let err = generate_samples(&streets, &neighborhoods, 500.0, 1000.0).unwrap_err();
        assert!(matches!(
            err,
            SamplingError::UnknownNeighborhood {
                street_id: 3,
                neighborhood_id: 99
            }
        ));
    }

    #[test]
    fn non_positive_interval_is_rejected() {
        let err = generate_samples(&[], &[], 0.0, 1000.0).unwrap_err();
        assert!(matches!(err, SamplingError::NonPositiveInterval { .. }));
    }
}
