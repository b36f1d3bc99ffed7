//! Exhaustive proximity scans over candidate point sets.
//!
//! Both operations are O(N) per query against a candidate set of size
//! N. The datasets this pipeline handles (hundreds of POIs, thousands
//! of sample points) make a linear scan cheap, and iteration order
//! over a slice gives a deterministic nearest-tie-break for free.

use crate::{GeoPoint, distance::distance_m};

/// Counts candidates within `radius_m` meters of `center` (inclusive).
///
/// An empty candidate set yields 0. For a fixed center and candidate
/// set the count is monotonically non-decreasing in `radius_m`.
#[must_use]
pub fn count_within_radius(center: GeoPoint, candidates: &[GeoPoint], radius_m: f64) -> usize {
    candidates
        .iter()
        .filter(|candidate| distance_m(center, **candidate) <= radius_m)
        .count()
}

/// Finds the candidate nearest to `center`, with its distance in meters.
///
/// `location` projects a candidate to its coordinates. Returns `None`
/// for an empty candidate set; callers must carry that through rather
/// than substitute a sentinel distance, so "no POI in this category"
/// stays distinguishable from a legitimate zero distance.
///
/// Ties are broken by slice order: the comparison is strict, so the
/// first encountered minimum wins and repeated runs over the same
/// input produce the same answer.
pub fn nearest_by<T>(
    center: GeoPoint,
    candidates: &[T],
    location: impl Fn(&T) -> GeoPoint,
) -> Option<(&T, f64)> {
    let mut best: Option<(&T, f64)> = None;

    for candidate in candidates {
        let d = distance_m(center, location(candidate));
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((candidate, d)),
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(50.850, 4.350),
            GeoPoint::new(50.851, 4.350),
            GeoPoint::new(50.860, 4.350),
            GeoPoint::new(50.900, 4.350),
        ]
    }

    #[test]
    fn empty_candidates_count_zero() {
        assert_eq!(
            count_within_radius(GeoPoint::new(50.85, 4.35), &[], 1000.0),
            0
        );
    }

    #[test]
    fn boundary_is_inclusive() {
        let center = GeoPoint::new(50.85, 4.35);
        let candidate = GeoPoint::new(50.851, 4.35);
        let exact = distance_m(center, candidate);
        assert_eq!(count_within_radius(center, &[candidate], exact), 1);
        assert_eq!(count_within_radius(center, &[candidate], exact - 0.01), 0);
    }

    #[test]
    fn count_is_monotone_in_radius() {
        let center = GeoPoint::new(50.85, 4.35);
        let candidates = grid();
        let mut previous = 0;
        for radius in [0.0, 100.0, 500.0, 1500.0, 10_000.0] {
            let count = count_within_radius(center, &candidates, radius);
            assert!(count >= previous, "count dropped at radius {radius}");
            previous = count;
        }
        assert_eq!(previous, 4);
    }

    #[test]
    fn empty_candidates_have_no_nearest() {
        let center = GeoPoint::new(50.85, 4.35);
        let empty: Vec<GeoPoint> = vec![];
        assert!(nearest_by(center, &empty, |p| *p).is_none());
    }

    #[test]
    fn nearest_picks_minimum_distance() {
        let center = GeoPoint::new(50.85, 4.35);
        let candidates = grid();
        let (point, d) = nearest_by(center, &candidates, |p| *p).expect("candidates");
        assert!((point.latitude - 50.850).abs() < 1e-12);
        assert!(d.abs() < 1e-9);
    }

    #[test]
    fn nearest_tie_break_is_first_in_slice_order() {
        let center = GeoPoint::new(0.0, 0.0);
        // Two candidates at the same distance, east and west.
        let candidates = [("east", GeoPoint::new(0.0, 0.01)), ("west", GeoPoint::new(0.0, -0.01))];
        let (winner, _) = nearest_by(center, &candidates, |(_, p)| *p).expect("candidates");
        assert_eq!(winner.0, "east");
    }
}
