//! Arc-length sampling of a single street polyline.

use access_map_geo::{GeoPoint, distance_m};
use access_map_models::{SamplePoint, SamplePosition, StreetSegment};

use crate::SamplingError;

/// Returns the total length of a polyline in meters: the sum of the
/// haversine distances between consecutive vertices.
#[must_use]
pub fn path_length_m(path: &[GeoPoint]) -> f64 {
    path.windows(2)
        .map(|pair| distance_m(pair[0], pair[1]))
        .sum()
}

/// Cumulative arc length at each vertex; `cumulative[0] == 0.0` and
/// `cumulative.last()` is the total path length.
fn cumulative_lengths(path: &[GeoPoint]) -> Vec<f64> {
    let mut cumulative = Vec::with_capacity(path.len());
    let mut total = 0.0;
    cumulative.push(0.0);
    for pair in path.windows(2) {
        total += distance_m(pair[0], pair[1]);
        cumulative.push(total);
    }
    cumulative
}

/// Locates the point at `offset_m` meters of cumulative arc length
/// along the path, interpolating linearly within the containing
/// segment. Offsets past the end clamp to the final vertex.
fn point_at_offset(path: &[GeoPoint], cumulative: &[f64], offset_m: f64) -> GeoPoint {
    for i in 0..path.len() - 1 {
        let segment_length = cumulative[i + 1] - cumulative[i];
        if offset_m <= cumulative[i + 1] {
            if segment_length <= 0.0 {
                // Repeated vertex; no direction to interpolate along.
                return path[i];
            }
            let t = (offset_m - cumulative[i]) / segment_length;
            return GeoPoint::new(
                path[i].latitude + t * (path[i + 1].latitude - path[i].latitude),
                path[i].longitude + t * (path[i + 1].longitude - path[i].longitude),
            );
        }
    }
    path[path.len() - 1]
}

/// Generates sample points along one street for one owning neighborhood.
///
/// A street whose total length is at most `interval_m` yields a single
/// sample at 50% of cumulative arc length, tagged
/// [`SamplePosition::Midpoint`]. Longer streets yield samples at
/// offsets 0, `interval_m`, 2·`interval_m`, … up to the last offset
/// that does not exceed the total length, so the final stretch may be
/// shorter than the interval.
///
/// Sample ids are left at 0; [`crate::generate_samples`] assigns dense
/// ids after the catchment-radius filter.
///
/// # Errors
///
/// Returns [`SamplingError::DegeneratePath`] if the path has fewer
/// than two vertices.
pub fn sample_street(
    street: &StreetSegment,
    neighborhood_id: u64,
    interval_m: f64,
) -> Result<Vec<SamplePoint>, SamplingError> {
    if street.path.len() < 2 {
        return Err(SamplingError::DegeneratePath {
            street_id: street.id,
            vertices: street.path.len(),
        });
    }

    let cumulative = cumulative_lengths(&street.path);
    let length_m = *cumulative.last().unwrap_or(&0.0);

    let make_sample = |location: GeoPoint, position: SamplePosition| SamplePoint {
        id: 0,
        street_id: street.id,
        neighborhood_id,
        location,
        position,
        street_length_m: length_m,
    };

    if length_m <= interval_m {
        // Short street: one representative point at the midpoint. A
        // zero-length path lands here and samples its first vertex.
        let location = point_at_offset(&street.path, &cumulative, length_m / 2.0);
        return Ok(vec![make_sample(location, SamplePosition::Midpoint)]);
    }

    let mut samples = Vec::new();
    let mut step = 0u32;
    loop {
        let offset_m = f64::from(step) * interval_m;
        if offset_m > length_m {
            break;
        }
        let location = point_at_offset(&street.path, &cumulative, offset_m);
        samples.push(make_sample(location, SamplePosition::Offset(offset_m)));
        step += 1;
    }

    Ok(samples)
}

#[cfg(test)]
mod tests {
    use super::*;

    const METERS_PER_DEG_LAT: f64 = 111_194.926_644_558_74;

    fn meridian_path(offsets_m: &[f64]) -> Vec<GeoPoint> {
        offsets_m
            .iter()
            .map(|m| GeoPoint::new(m / METERS_PER_DEG_LAT, 0.0))
            .collect()
    }

    fn street(path: Vec<GeoPoint>) -> StreetSegment {
        StreetSegment {
            id: 42,
            name: "Veldstraat".to_string(),
            highway_type: "residential".to_string(),
            path,
            neighborhood_ids: vec![1],
        }
    }

    fn offset_of(sample: &SamplePoint) -> f64 {
        sample.location.latitude * METERS_PER_DEG_LAT
    }

    #[test]
    fn path_length_sums_consecutive_legs() {
        let path = meridian_path(&[0.0, 400.0, 1200.0]);
        let length = path_length_m(&path);
        assert!((length - 1200.0).abs() < 0.01, "got {length}m");
    }

    #[test]
    fn long_street_samples_every_interval() {
        // 1200m street, 500m interval: offsets {0, 500, 1000}.
        let s = street(meridian_path(&[0.0, 400.0, 800.0, 1200.0]));
        let samples = sample_street(&s, 1, 500.0).expect("samples");

        assert_eq!(samples.len(), 3);
        for (sample, expected) in samples.iter().zip([0.0, 500.0, 1000.0]) {
            assert_eq!(sample.position, SamplePosition::Offset(expected));
            assert!(
                (offset_of(sample) - expected).abs() < 0.5,
                "sample at {expected}m landed at {}m",
                offset_of(sample)
            );
        }
        assert!((samples[0].street_length_m - 1200.0).abs() < 0.01);
    }

    #[test]
    fn interpolation_walks_cumulative_arc_length() {
        // Uneven vertex spacing: the 500m sample falls inside the
        // second leg, not at a vertex fraction.
        let s = street(meridian_path(&[0.0, 100.0, 900.0, 1200.0]));
        let samples = sample_street(&s, 1, 500.0).expect("samples");
        assert!((offset_of(&samples[1]) - 500.0).abs() < 0.5);
    }

    #[test]
    fn short_street_gets_single_midpoint_sample() {
        let s = street(meridian_path(&[0.0, 300.0]));
        let samples = sample_street(&s, 1, 500.0).expect("samples");

        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].position, SamplePosition::Midpoint);
        assert!((offset_of(&samples[0]) - 150.0).abs() < 0.5);
    }

    #[test]
    fn exact_interval_length_takes_midpoint_branch() {
        let s = street(meridian_path(&[0.0, 500.0]));
        let interval = path_length_m(&s.path);
        let samples = sample_street(&s, 1, interval).expect("samples");
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].position, SamplePosition::Midpoint);
    }

    #[test]
    fn zero_length_path_samples_its_vertex() {
        let point = GeoPoint::new(50.85, 4.35);
        let s = street(vec![point, point]);
        let samples = sample_street(&s, 1, 500.0).expect("samples");

        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].position, SamplePosition::Midpoint);
        assert_eq!(samples[0].location, point);
        assert!(samples[0].street_length_m.abs() < 1e-9);
    }

    #[test]
    fn single_vertex_path_is_rejected() {
        let s = street(vec![GeoPoint::new(50.85, 4.35)]);
        let err = sample_street(&s, 1, 500.0).unwrap_err();
        assert!(matches!(
            err,
            SamplingError::DegeneratePath {
                street_id: 42,
                vertices: 1
            }
        ));
    }

    #[test]
    fn position_descriptor_renders_like_source_data() {
        assert_eq!(SamplePosition::Midpoint.to_string(), "midpoint");
        assert_eq!(SamplePosition::Offset(500.0).to_string(), "500m");
    }
}
