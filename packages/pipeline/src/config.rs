//! Pipeline configuration, deserialized from TOML.
//!
//! Configuration is always passed around as an explicit immutable
//! value; there is no global table, so two differently weighted
//! pipelines can run side by side for comparison.

use access_map_labeling::ThresholdTable;
use access_map_scoring::{DomainWeights, Normalization};
use serde::Deserialize;

/// The reference configuration shipped with the crate: eight-domain
/// weight table summing to 1.0, three threshold rules, 1 km counting
/// radius, 500 m sampling interval.
const REFERENCE_TOML: &str = include_str!("../access.toml");

/// Full configuration surface of the pipeline.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessConfig {
    /// Catchment radius for POI counting and sample filtering, meters.
    pub radius_m: f64,
    /// Arc-length spacing between street sample points, meters.
    pub sample_interval_m: f64,
    /// Normalization strategy for the score pipeline.
    pub normalization: Normalization,
    /// Per-domain weights for the composite score.
    pub weights: DomainWeights,
    /// Per-category threshold rules for the label pipeline.
    pub thresholds: ThresholdTable,
}

impl AccessConfig {
    /// Parses a configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns the underlying TOML error if the text is malformed or
    /// fields are missing.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Returns the embedded reference configuration.
    #[must_use]
    pub fn reference() -> Self {
        Self::from_toml_str(REFERENCE_TOML).expect("embedded reference config is valid")
    }
}
