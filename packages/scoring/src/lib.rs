#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Turns raw POI counts into comparable 0-10 domain scores and a
//! single weighted composite score per neighborhood.
//!
//! Normalization is relative to the observed dataset: each domain's
//! min/max is taken over the full set of neighborhood counts for that
//! domain, not a fixed scale. Two strategies are supported — plain
//! min-max, and a logarithmic variant that models diminishing returns
//! (the difference between 5 and 10 nearby shops matters more than the
//! difference between 50 and 55).

mod normalize;

pub use normalize::{log_normalize, min_max_normalize};

use std::collections::BTreeMap;
use std::str::FromStr;

use access_map_models::{CompositeScore, DomainScore, PoiCount};
use serde::{Deserialize, Serialize};

/// Weights must sum to 1.0 within this tolerance.
pub const WEIGHT_SUM_TOLERANCE: f64 = 0.001;

/// Errors that can occur while scoring. All of these are fatal
/// configuration errors: a composite computed from a broken weight
/// table is worse than a fast failure.
#[derive(Debug, thiserror::Error)]
pub enum ScoringError {
    /// Domain weights did not sum to ~1.0.
    #[error("domain weights sum to {sum:.4}, expected 1.0 +/- {WEIGHT_SUM_TOLERANCE}")]
    InvalidWeightSum {
        /// The actual sum of the configured weights.
        sum: f64,
    },

    /// A domain present in the counts has no configured weight.
    #[error("no weight configured for domain '{domain}'")]
    MissingWeight {
        /// The unweighted domain.
        domain: String,
    },

    /// An unrecognized normalization strategy selector.
    #[error("unknown normalization strategy '{0}' (expected 'minmax' or 'log')")]
    UnknownNormalization(String),
}

/// Which normalization strategy to apply to raw domain counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Normalization {
    /// `(value - min) / (max - min) * 10`.
    MinMax,
    /// `ln(value + 1) / ln(max + 1) * 10`; diminishing returns.
    Log,
}

impl FromStr for Normalization {
    type Err = ScoringError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "minmax" => Ok(Self::MinMax),
            "log" => Ok(Self::Log),
            other => Err(ScoringError::UnknownNormalization(other.to_string())),
        }
    }
}

/// Immutable per-domain weight table.
///
/// Passed explicitly to the scoring functions rather than living in
/// global state, so differing weight schemes can be run side by side.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DomainWeights(BTreeMap<String, f64>);

impl DomainWeights {
    /// Builds a weight table from (domain, weight) pairs.
    pub fn new(weights: impl IntoIterator<Item = (String, f64)>) -> Self {
        Self(weights.into_iter().collect())
    }

    /// Returns the weight for a domain, if configured.
    #[must_use]
    pub fn get(&self, domain: &str) -> Option<f64> {
        self.0.get(domain).copied()
    }

    /// Iterates domains in lexicographic order.
    pub fn domains(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Checks that the weights sum to 1.0 within
    /// [`WEIGHT_SUM_TOLERANCE`].
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::InvalidWeightSum`] otherwise.
    pub fn validate(&self) -> Result<(), ScoringError> {
        let sum: f64 = self.0.values().sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ScoringError::InvalidWeightSum { sum });
        }
        Ok(())
    }
}

/// Normalizes raw counts into weighted domain scores.
///
/// Each domain is normalized independently over the full set of
/// neighborhood counts observed for it. Output order follows input
/// order, so callers keep determinism for free.
///
/// # Errors
///
/// Returns [`ScoringError`] if the weight table fails validation or a
/// counted domain has no configured weight.
pub fn domain_scores(
    counts: &[PoiCount],
    weights: &DomainWeights,
    normalization: Normalization,
) -> Result<Vec<DomainScore>, ScoringError> {
    weights.validate()?;

    // Per-domain (min, max) over the observed counts.
    let mut extremes: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for count in counts {
        let entry = extremes
            .entry(count.domain.as_str())
            .or_insert((count.count, count.count));
        entry.0 = entry.0.min(count.count);
        entry.1 = entry.1.max(count.count);
    }

    for (domain, (min, max)) in &extremes {
        if min == max {
            log::warn!(
                "Domain '{domain}' has a uniform count of {min} across all neighborhoods; \
                 normalization falls back to a flat score"
            );
        }
    }

    counts
        .iter()
        .map(|count| {
            let weight =
                weights
                    .get(&count.domain)
                    .ok_or_else(|| ScoringError::MissingWeight {
                        domain: count.domain.clone(),
                    })?;
            let (min, max) = extremes[count.domain.as_str()];

            #[allow(clippy::cast_precision_loss)]
            let score = match normalization {
                Normalization::MinMax => {
                    min_max_normalize(count.count as f64, min as f64, max as f64)
                }
                Normalization::Log => log_normalize(count.count as f64, max as f64),
            };

            Ok(DomainScore {
                neighborhood_id: count.neighborhood_id,
                domain: count.domain.clone(),
                count: count.count,
                score,
                weight,
                weighted: score * weight,
            })
        })
        .collect()
}

/// Sums weighted domain contributions into one composite score per
/// neighborhood, ordered by neighborhood id.
#[must_use]
pub fn composite_scores(scores: &[DomainScore]) -> Vec<CompositeScore> {
    let mut totals: BTreeMap<u64, f64> = BTreeMap::new();
    for score in scores {
        *totals.entry(score.neighborhood_id).or_insert(0.0) += score.weighted;
    }

    totals
        .into_iter()
        .map(|(neighborhood_id, score)| CompositeScore {
            neighborhood_id,
            score,
        })
        .collect()
}
