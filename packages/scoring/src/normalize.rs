//! The two normalization formulas, with their degenerate-case
//! fallbacks.

/// Min-max normalization onto a 0-10 scale.
///
/// When `max == min` the domain carries no discriminative information,
/// so every neighborhood gets the neutral score 5.0 (and the division
/// by zero never happens).
#[must_use]
pub fn min_max_normalize(value: f64, min: f64, max: f64) -> f64 {
    if (max - min).abs() < f64::EPSILON {
        return 5.0;
    }
    (value - min) / (max - min) * 10.0
}

/// Logarithmic normalization onto a 0-10 scale.
///
/// `ln(value + 1) / ln(max + 1) * 10`; the `+1` offset avoids
/// `ln(0)`. When `max == 0` there is nothing to score and every value
/// maps to 0.0.
#[must_use]
pub fn log_normalize(value: f64, max: f64) -> f64 {
    if max == 0.0 {
        return 0.0;
    }
    (value + 1.0).ln() / (max + 1.0).ln() * 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn min_max_maps_extremes_exactly() {
        assert_eq!(min_max_normalize(0.0, 0.0, 10.0), 0.0);
        assert_eq!(min_max_normalize(5.0, 0.0, 10.0), 5.0);
        assert_eq!(min_max_normalize(10.0, 0.0, 10.0), 10.0);
    }

    #[test]
    fn min_max_degenerate_is_neutral() {
        assert_eq!(min_max_normalize(7.0, 7.0, 7.0), 5.0);
    }

    #[test]
    fn log_zero_value_scores_zero() {
        assert!(log_normalize(0.0, 9.0).abs() < 1e-12);
    }

    #[test]
    fn log_max_value_scores_ten() {
        assert!((log_normalize(9.0, 9.0) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn log_degenerate_max_is_zero() {
        assert_eq!(log_normalize(0.0, 0.0), 0.0);
    }

    #[test]
    fn log_models_diminishing_returns() {
        let low_step = log_normalize(10.0, 55.0) - log_normalize(5.0, 55.0);
        let high_step = log_normalize(55.0, 55.0) - log_normalize(50.0, 55.0);
        assert!(low_step > high_step);
    }
}
