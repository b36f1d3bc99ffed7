#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Orchestrates the two accessibility pipelines.
//!
//! The score pipeline counts POIs around each neighborhood center,
//! normalizes the counts into 0-10 domain scores, and aggregates them
//! into a weighted composite. The label pipeline samples points along
//! streets, measures each sample's nearest POI per category, and turns
//! the per-neighborhood median distances into categorical labels. Both
//! share the distance and proximity primitives and diverge at
//! aggregation.
//!
//! Everything here is a pure function over immutable inputs: identical
//! inputs produce byte-identical outputs (grouping uses `BTreeMap`,
//! ties break on first-encountered minima and ascending ids).

mod config;

pub use config::AccessConfig;

use std::collections::BTreeMap;

use access_map_geo::{count_within_radius, nearest_by};
use access_map_labeling::LabelingError;
use access_map_models::{
    CompositeScore, DistanceRecord, DomainScore, NearestPoi, Neighborhood, NeighborhoodLabel, Poi,
    PoiCount, SamplePoint, StreetSegment,
};
use access_map_sampling::SamplingError;
use access_map_scoring::{Normalization, ScoringError};

/// Errors from any stage of a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Street sampling failed.
    #[error(transparent)]
    Sampling(#[from] SamplingError),

    /// Scoring configuration or computation failed.
    #[error(transparent)]
    Scoring(#[from] ScoringError),

    /// Labeling configuration failed.
    #[error(transparent)]
    Labeling(#[from] LabelingError),
}

/// Everything the score pipeline produces.
#[derive(Debug, Clone)]
pub struct ScoreOutput {
    /// Raw radius counts per (neighborhood, domain).
    pub counts: Vec<PoiCount>,
    /// Normalized, weighted domain scores.
    pub domain_scores: Vec<DomainScore>,
    /// Composite score per neighborhood, ordered by id.
    pub composites: Vec<CompositeScore>,
}

/// Everything the label pipeline produces.
#[derive(Debug, Clone)]
pub struct LabelOutput {
    /// Retained street sample points, densely numbered.
    pub samples: Vec<SamplePoint>,
    /// Nearest-POI record per (sample, category).
    pub records: Vec<DistanceRecord>,
    /// Label per (neighborhood, category).
    pub labels: Vec<NeighborhoodLabel>,
}

/// Side-by-side composite scores under both normalization strategies.
#[derive(Debug, Clone)]
pub struct ScoreComparison {
    /// Neighborhood compared.
    pub neighborhood_id: u64,
    /// Composite under min-max normalization.
    pub minmax_score: f64,
    /// Composite under log normalization.
    pub log_score: f64,
    /// `log_score - minmax_score`.
    pub difference: f64,
}

/// Counts POIs within `radius_m` of each neighborhood center, for each
/// listed domain.
///
/// A domain with no POI collection (or an empty one) yields zero
/// counts — a recoverable missing-data condition, logged rather than
/// raised. Output order is (input neighborhood order) × (given domain
/// order).
#[must_use]
pub fn poi_counts(
    neighborhoods: &[Neighborhood],
    domains: &[String],
    pois_by_domain: &BTreeMap<String, Vec<Poi>>,
    radius_m: f64,
) -> Vec<PoiCount> {
    // Project POI locations once per domain, not once per neighborhood.
    let locations: BTreeMap<&str, Vec<access_map_geo::GeoPoint>> = domains
        .iter()
        .map(|domain| {
            let points = pois_by_domain
                .get(domain)
                .map(|pois| pois.iter().map(|poi| poi.location).collect())
                .unwrap_or_default();
            (domain.as_str(), points)
        })
        .collect();

    for (domain, points) in &locations {
        if points.is_empty() {
            log::warn!("Domain '{domain}' has no POIs; all counts will be zero");
        }
    }

    let mut counts = Vec::with_capacity(neighborhoods.len() * domains.len());
    for neighborhood in neighborhoods {
        for domain in domains {
            let count = count_within_radius(
                neighborhood.center,
                &locations[domain.as_str()],
                radius_m,
            );
            counts.push(PoiCount {
                neighborhood_id: neighborhood.id,
                domain: domain.clone(),
                count,
            });
        }
    }
    counts
}

/// Runs the full score pipeline: radius counts, normalization,
/// weighted composite.
///
/// Weights are validated before any counting so a broken configuration
/// fails fast.
///
/// # Errors
///
/// Returns [`PipelineError::Scoring`] on invalid weights.
pub fn run_score_pipeline(
    neighborhoods: &[Neighborhood],
    pois_by_domain: &BTreeMap<String, Vec<Poi>>,
    config: &AccessConfig,
) -> Result<ScoreOutput, PipelineError> {
    config.weights.validate().map_err(PipelineError::Scoring)?;

    let domains: Vec<String> = config.weights.domains().map(str::to_string).collect();
    log::info!(
        "Scoring {} neighborhoods across {} domains (radius {}m, {:?} normalization)",
        neighborhoods.len(),
        domains.len(),
        config.radius_m,
        config.normalization
    );

    let counts = poi_counts(neighborhoods, &domains, pois_by_domain, config.radius_m);
    let domain_scores =
        access_map_scoring::domain_scores(&counts, &config.weights, config.normalization)?;
    let composites = access_map_scoring::composite_scores(&domain_scores);

    Ok(ScoreOutput {
        counts,
        domain_scores,
        composites,
    })
}

/// Runs the score pipeline under both normalization strategies and
/// tabulates the composite scores side by side.
///
/// Sorted by min-max composite descending; ties break on ascending
/// neighborhood id so repeated runs stay byte-identical.
///
/// # Errors
///
/// Returns [`PipelineError::Scoring`] on invalid weights.
pub fn compare_normalizations(
    neighborhoods: &[Neighborhood],
    pois_by_domain: &BTreeMap<String, Vec<Poi>>,
    config: &AccessConfig,
) -> Result<Vec<ScoreComparison>, PipelineError> {
    config.weights.validate().map_err(PipelineError::Scoring)?;

    let domains: Vec<String> = config.weights.domains().map(str::to_string).collect();
    let counts = poi_counts(neighborhoods, &domains, pois_by_domain, config.radius_m);

    let mut by_id: BTreeMap<u64, (f64, f64)> = BTreeMap::new();
    for (normalization, pick) in [
        (Normalization::MinMax, 0usize),
        (Normalization::Log, 1usize),
    ] {
        let scores = access_map_scoring::domain_scores(&counts, &config.weights, normalization)?;
        for composite in access_map_scoring::composite_scores(&scores) {
            let entry = by_id.entry(composite.neighborhood_id).or_insert((0.0, 0.0));
            if pick == 0 {
                entry.0 = composite.score;
            } else {
                entry.1 = composite.score;
            }
        }
    }

    let mut comparisons: Vec<ScoreComparison> = by_id
        .into_iter()
        .map(|(neighborhood_id, (minmax_score, log_score))| ScoreComparison {
            neighborhood_id,
            minmax_score,
            log_score,
            difference: log_score - minmax_score,
        })
        .collect();

    comparisons.sort_by(|a, b| {
        b.minmax_score
            .total_cmp(&a.minmax_score)
            .then_with(|| a.neighborhood_id.cmp(&b.neighborhood_id))
    });

    Ok(comparisons)
}

/// Finds each sample's nearest POI in every category.
///
/// Produces one record per (sample, category) pair. An empty category
/// yields records with `nearest = None` — the explicit "no POI found"
/// marker — rather than dropping the pair or inventing a distance.
#[must_use]
pub fn nearest_distances(
    samples: &[SamplePoint],
    pois_by_category: &BTreeMap<String, Vec<Poi>>,
) -> Vec<DistanceRecord> {
    let mut records = Vec::with_capacity(samples.len() * pois_by_category.len());

    for sample in samples {
        for (category, pois) in pois_by_category {
            let nearest =
                nearest_by(sample.location, pois, |poi| poi.location).map(|(poi, distance_m)| {
                    NearestPoi {
                        poi_id: poi.id,
                        poi_name: poi.name.clone(),
                        poi_type: poi.poi_type.clone(),
                        distance_m,
                    }
                });

            records.push(DistanceRecord {
                sample_id: sample.id,
                neighborhood_id: sample.neighborhood_id,
                category: category.clone(),
                nearest,
            });
        }
    }

    records
}

/// Runs the full label pipeline: street sampling, nearest-POI
/// distances, median threshold labels.
///
/// # Errors
///
/// Returns [`PipelineError`] on malformed streets, dangling
/// neighborhood references, or a category missing its threshold rule.
pub fn run_label_pipeline(
    streets: &[StreetSegment],
    neighborhoods: &[Neighborhood],
    pois_by_category: &BTreeMap<String, Vec<Poi>>,
    config: &AccessConfig,
) -> Result<LabelOutput, PipelineError> {
    log::info!(
        "Labeling {} neighborhoods from {} streets and {} POI categories",
        neighborhoods.len(),
        streets.len(),
        pois_by_category.len()
    );

    let samples = access_map_sampling::generate_samples(
        streets,
        neighborhoods,
        config.sample_interval_m,
        config.radius_m,
    )?;

    let records = nearest_distances(&samples, pois_by_category);
    log::info!(
        "Computed {} nearest-POI records for {} samples",
        records.len(),
        samples.len()
    );

    let labels = access_map_labeling::label_neighborhoods(&records, &config.thresholds)?;

    Ok(LabelOutput {
        samples,
        records,
        labels,
    })
}
