#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Flat-file input provider and result sink for the pipeline.
//!
//! Reads neighborhoods and POIs from CSV and streets from GeoJSON into
//! the shared entity types; writes every output collection back out as
//! one CSV per record list. The core pipeline itself never touches the
//! filesystem.

pub mod read;
pub mod write;

/// Errors that can occur while reading inputs or writing results.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// I/O error (file read/write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing or serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// GeoJSON parsing failed.
    #[error("GeoJSON parse error: {0}")]
    GeoJson(#[from] geojson::Error),

    /// A street feature was missing a required property.
    #[error("street feature {feature} is missing property '{property}'")]
    MissingProperty {
        /// Index of the offending feature in the collection.
        feature: usize,
        /// Name of the missing or malformed property.
        property: &'static str,
    },
}
