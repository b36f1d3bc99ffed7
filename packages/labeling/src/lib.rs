#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Converts per-sample nearest-POI distances into categorical
//! neighborhood labels.
//!
//! For each (neighborhood, category) pair the per-sample distances are
//! reduced to their median, then compared against the category's
//! configured threshold: at or under the threshold earns the pass
//! label, over it the fail label. Strictly binary — there is no
//! multi-tier banding, which is a documented simplification; richer
//! expected profiles can and do disagree with it in some
//! neighborhoods.

use std::collections::BTreeMap;

use access_map_models::{DistanceRecord, NeighborhoodLabel};
use serde::{Deserialize, Serialize};

/// Label text used when a category has no POIs at all, so no median
/// distance exists.
pub const NO_POI_LABEL: &str = "No POI found";

/// Errors that can occur while labeling.
#[derive(Debug, thiserror::Error)]
pub enum LabelingError {
    /// A category present in the distance records has no threshold
    /// rule. Fatal configuration error: silently skipping the category
    /// would drop data without a trace.
    #[error("no threshold rule configured for category '{category}'")]
    MissingThreshold {
        /// The unconfigured category.
        category: String,
    },
}

/// Threshold and label strings for one amenity category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelRule {
    /// Human-readable category name (e.g., "Groceries").
    pub display_name: String,
    /// Median distance at or under which the category passes, meters.
    pub threshold_m: f64,
    /// Label when the median meets the threshold.
    pub pass_label: String,
    /// Label when the median exceeds the threshold.
    pub fail_label: String,
}

/// Immutable per-category threshold table, keyed by category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ThresholdTable(BTreeMap<String, LabelRule>);

impl ThresholdTable {
    /// Builds a table from (category, rule) pairs.
    pub fn new(rules: impl IntoIterator<Item = (String, LabelRule)>) -> Self {
        Self(rules.into_iter().collect())
    }

    /// Returns the rule for a category, if configured.
    #[must_use]
    pub fn get(&self, category: &str) -> Option<&LabelRule> {
        self.0.get(category)
    }

    /// Iterates rules in lexicographic category order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LabelRule)> {
        self.0.iter().map(|(category, rule)| (category.as_str(), rule))
    }
}

/// Returns the median of the values, or `None` for an empty slice.
///
/// Even-length inputs average the two middle values, matching the
/// statistic the reference dataset was produced with.
#[must_use]
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Some(f64::midpoint(sorted[mid - 1], sorted[mid]))
    } else {
        Some(sorted[mid])
    }
}

/// Labels every (neighborhood, category) pair present in the distance
/// records.
///
/// Records whose `nearest` is `None` contribute no distance; a pair
/// whose records are all empty yields the [`NO_POI_LABEL`] marker with
/// no median and `meets_threshold = false`, so missing data stays
/// visible downstream instead of being dropped. Output is ordered by
/// (neighborhood id, category).
///
/// # Errors
///
/// Returns [`LabelingError::MissingThreshold`] if a category in the
/// records has no rule in `thresholds`.
pub fn label_neighborhoods(
    records: &[DistanceRecord],
    thresholds: &ThresholdTable,
) -> Result<Vec<NeighborhoodLabel>, LabelingError> {
    // Group distances per (neighborhood, category); the BTreeMap gives
    // deterministic output order.
    let mut groups: BTreeMap<(u64, &str), Vec<f64>> = BTreeMap::new();
    for record in records {
        let distances = groups
            .entry((record.neighborhood_id, record.category.as_str()))
            .or_default();
        if let Some(nearest) = &record.nearest {
            distances.push(nearest.distance_m);
        }
    }

    let mut labels = Vec::with_capacity(groups.len());
    for ((neighborhood_id, category), distances) in &groups {
        let rule = thresholds
            .get(category)
            .ok_or_else(|| LabelingError::MissingThreshold {
                category: (*category).to_string(),
            })?;

        let median_distance_m = median(distances);
        let (label, meets_threshold) = match median_distance_m {
            Some(m) if m <= rule.threshold_m => (rule.pass_label.clone(), true),
            Some(_) => (rule.fail_label.clone(), false),
            None => {
                log::warn!(
                    "No POIs in category '{category}' for neighborhood {neighborhood_id}"
                );
                (NO_POI_LABEL.to_string(), false)
            }
        };

        labels.push(NeighborhoodLabel {
            neighborhood_id: *neighborhood_id,
            category: (*category).to_string(),
            median_distance_m,
            threshold_m: rule.threshold_m,
            label,
            meets_threshold,
        });
    }

    Ok(labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use access_map_models::NearestPoi;

    fn groceries_rule() -> ThresholdTable {
        ThresholdTable::new([(
            "supermarkets".to_string(),
            LabelRule {
                display_name: "Groceries".to_string(),
                threshold_m: 1000.0,
                pass_label: "Groceries within walking distance".to_string(),
                fail_label: "Limited grocery access".to_string(),
            },
        )])
    }

    fn record(sample_id: u64, neighborhood_id: u64, distance_m: Option<f64>) -> DistanceRecord {
        DistanceRecord {
            sample_id,
            neighborhood_id,
            category: "supermarkets".to_string(),
            nearest: distance_m.map(|distance_m| NearestPoi {
                poi_id: 1,
                poi_name: "Colruyt".to_string(),
                poi_type: "supermarket".to_string(),
                distance_m,
            }),
        }
    }

    #[test]
    fn median_of_empty_is_none() {
        assert_eq!(median(&[]), None);
    }

    #[test]
    fn median_odd_takes_middle() {
        assert_eq!(median(&[900.0, 100.0, 500.0]), Some(500.0));
    }

    #[test]
    fn median_even_averages_middle_pair() {
        assert_eq!(median(&[100.0, 200.0, 400.0, 800.0]), Some(300.0));
    }

    #[test]
    fn median_under_threshold_earns_pass_label() {
        let records = vec![
            record(1, 1, Some(900.0)),
            record(2, 1, Some(950.0)),
            record(3, 1, Some(1200.0)),
        ];
        let labels = label_neighborhoods(&records, &groceries_rule()).expect("labels");

        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].label, "Groceries within walking distance");
        assert!(labels[0].meets_threshold);
        assert_eq!(labels[0].median_distance_m, Some(950.0));
    }

    #[test]
    fn median_over_threshold_earns_fail_label() {
        let records = vec![record(1, 1, Some(1050.0))];
        let labels = label_neighborhoods(&records, &groceries_rule()).expect("labels");

        assert_eq!(labels[0].label, "Limited grocery access");
        assert!(!labels[0].meets_threshold);
    }

    #[test]
    fn threshold_boundary_is_inclusive() {
        let records = vec![record(1, 1, Some(1000.0))];
        let labels = label_neighborhoods(&records, &groceries_rule()).expect("labels");
        assert!(labels[0].meets_threshold);
    }

    #[test]
    fn empty_category_surfaces_no_poi_marker() {
        let records = vec![record(1, 1, None), record(2, 1, None)];
        let labels = label_neighborhoods(&records, &groceries_rule()).expect("labels");

        assert_eq!(labels[0].label, NO_POI_LABEL);
        assert_eq!(labels[0].median_distance_m, None);
        assert!(!labels[0].meets_threshold);
    }

    #[test]
    fn unconfigured_category_is_fatal() {
        let mut records = vec![record(1, 1, Some(500.0))];
        records[0].category = "pharmacies".to_string();

        let err = label_neighborhoods(&records, &groceries_rule()).unwrap_err();
        assert!(matches!(err, LabelingError::MissingThreshold { category } if category == "pharmacies"));
    }

    #[test]
    fn output_is_ordered_by_neighborhood() {
        let records = vec![record(1, 2, Some(500.0)), record(2, 1, Some(500.0))];
        let labels = label_neighborhoods(&records, &groceries_rule()).expect("labels");
        assert_eq!(labels[0].neighborhood_id, 1);
        assert_eq!(labels[1].neighborhood_id, 2);
    }
}
