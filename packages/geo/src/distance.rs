//! Great-circle distance via the haversine formula.

use crate::GeoPoint;

/// Mean earth radius in meters, matching the spherical model used for
/// all distance calculations in this workspace.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Returns the great-circle distance between two points in meters.
///
/// Haversine formula on a sphere of radius [`EARTH_RADIUS_M`]. Total
/// for any valid decimal-degree input: zero for identical points,
/// symmetric, and never negative.
#[must_use]
pub fn distance_m(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat1 = a.latitude.to_radians();
    let lat2 = b.latitude.to_radians();
    let dlat = (b.latitude - a.latitude).to_radians();
    let dlon = (b.longitude - a.longitude).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().asin();

    c * EARTH_RADIUS_M
}

#[cfg(test)]
mod tests {
    use super::*;

    const BRUSSELS_A: GeoPoint = GeoPoint::new(50.85, 4.35);
    const BRUSSELS_B: GeoPoint = GeoPoint::new(50.86, 4.36);

    #[test]
    fn identical_points_have_zero_distance() {
        assert!(distance_m(BRUSSELS_A, BRUSSELS_A).abs() < 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let ab = distance_m(BRUSSELS_A, BRUSSELS_B);
        let ba = distance_m(BRUSSELS_B, BRUSSELS_A);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn distance_is_non_negative() {
        let south = GeoPoint::new(-33.9, 18.4);
        let north = GeoPoint::new(59.3, 18.1);
        assert!(distance_m(south, north) > 0.0);
    }

    #[test]
    fn brussels_block_is_roughly_1_3_km() {
        // Sanity bound on the formula's scale, not an exact literal.
        let d = distance_m(BRUSSELS_A, BRUSSELS_B);
        assert!((1300.0..1400.0).contains(&d), "got {d}m");
    }

    #[test]
    fn one_degree_of_latitude_is_about_111_km() {
        let d = distance_m(GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0));
        assert!((d - 111_194.9).abs() < 1.0, "got {d}m");
    }
}
