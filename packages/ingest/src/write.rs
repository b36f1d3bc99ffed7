//! CSV writers for the pipeline's output collections.
//!
//! One file per record list, headers matching the reference result
//! files. `Option` fields serialize as empty cells so "no POI found"
//! stays distinguishable from a zero in the output.

use std::path::Path;

use access_map_models::{
    CompositeScore, DistanceRecord, DomainScore, NeighborhoodLabel, PoiCount, SamplePoint,
};
use access_map_pipeline::ScoreComparison;

use crate::IngestError;

/// Writes raw POI counts as `neighborhood_id,domain,poi_count`.
///
/// # Errors
///
/// Returns [`IngestError`] on I/O or CSV failure.
pub fn write_counts(path: &Path, counts: &[PoiCount]) -> Result<(), IngestError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["neighborhood_id", "domain", "poi_count"])?;
    for count in counts {
        writer.write_record([
            count.neighborhood_id.to_string(),
            count.domain.clone(),
            count.count.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes normalized domain scores as
/// `neighborhood_id,domain,poi_count,domain_score,domain_weight,weighted_score`.
///
/// # Errors
///
/// Returns [`IngestError`] on I/O or CSV failure.
pub fn write_domain_scores(path: &Path, scores: &[DomainScore]) -> Result<(), IngestError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "neighborhood_id",
        "domain",
        "poi_count",
        "domain_score",
        "domain_weight",
        "weighted_score",
    ])?;
    for score in scores {
        writer.write_record([
            score.neighborhood_id.to_string(),
            score.domain.clone(),
            score.count.to_string(),
            score.score.to_string(),
            score.weight.to_string(),
            score.weighted.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes composite scores as `neighborhood_id,composite_score`.
///
/// # Errors
///
/// Returns [`IngestError`] on I/O or CSV failure.
pub fn write_composites(path: &Path, composites: &[CompositeScore]) -> Result<(), IngestError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["neighborhood_id", "composite_score"])?;
    for composite in composites {
        writer.write_record([
            composite.neighborhood_id.to_string(),
            composite.score.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the dual-normalization comparison as
/// `neighborhood_id,score_minmax,score_log,difference`.
///
/// # Errors
///
/// Returns [`IngestError`] on I/O or CSV failure.
pub fn write_comparison(path: &Path, comparisons: &[ScoreComparison]) -> Result<(), IngestError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["neighborhood_id", "score_minmax", "score_log", "difference"])?;
    for row in comparisons {
        writer.write_record([
            row.neighborhood_id.to_string(),
            row.minmax_score.to_string(),
            row.log_score.to_string(),
            row.difference.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes sample points as
/// `sample_id,street_id,neighborhood_id,latitude,longitude,position_on_street,street_length_m`.
///
/// # Errors
///
/// Returns [`IngestError`] on I/O or CSV failure.
pub fn write_samples(path: &Path, samples: &[SamplePoint]) -> Result<(), IngestError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "sample_id",
        "street_id",
        "neighborhood_id",
        "latitude",
        "longitude",
        "position_on_street",
        "street_length_m",
    ])?;
    for sample in samples {
        writer.write_record([
            sample.id.to_string(),
            sample.street_id.to_string(),
            sample.neighborhood_id.to_string(),
            sample.location.latitude.to_string(),
            sample.location.longitude.to_string(),
            sample.position.to_string(),
            sample.street_length_m.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes nearest-POI records as
/// `sample_id,neighborhood_id,category,nearest_poi_id,nearest_poi_name,nearest_poi_type,distance_m`.
/// Records with no nearest POI leave the POI cells empty.
///
/// # Errors
///
/// Returns [`IngestError`] on I/O or CSV failure.
pub fn write_distances(path: &Path, records: &[DistanceRecord]) -> Result<(), IngestError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "sample_id",
        "neighborhood_id",
        "category",
        "nearest_poi_id",
        "nearest_poi_name",
        "nearest_poi_type",
        "distance_m",
    ])?;
    for record in records {
        let (poi_id, poi_name, poi_type, distance) = record.nearest.as_ref().map_or_else(
            || (String::new(), String::new(), String::new(), String::new()),
            |nearest| {
                (
                    nearest.poi_id.to_string(),
                    nearest.poi_name.clone(),
                    nearest.poi_type.clone(),
                    nearest.distance_m.to_string(),
                )
            },
        );
        writer.write_record([
            record.sample_id.to_string(),
            record.neighborhood_id.to_string(),
            record.category.clone(),
            poi_id,
            poi_name,
            poi_type,
            distance,
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes neighborhood labels as
/// `neighborhood_id,category,median_distance_m,threshold_m,label,meets_threshold`.
/// The median cell is empty when the category had no POIs.
///
/// # Errors
///
/// Returns [`IngestError`] on I/O or CSV failure.
pub fn write_labels(path: &Path, labels: &[NeighborhoodLabel]) -> Result<(), IngestError> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record([
        "neighborhood_id",
        "category",
        "median_distance_m",
        "threshold_m",
        "label",
        "meets_threshold",
    ])?;
    for label in labels {
        writer.write_record([
            label.neighborhood_id.to_string(),
            label.category.clone(),
            label
                .median_distance_m
                .map(|m| m.to_string())
                .unwrap_or_default(),
            label.threshold_m.to_string(),
            label.label.clone(),
            label.meets_threshold.to_string(),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use access_map_models::NearestPoi;
    use std::fs;

    fn temp_path(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("access_map_write_{}", std::process::id()));
        fs::create_dir_all(&dir).expect("temp dir");
        dir.join(name)
    }

    #[test]
    fn labels_csv_has_empty_median_for_missing_data() {
        let path = temp_path("labels.csv");
        let labels = vec![NeighborhoodLabel {
            neighborhood_id: 1,
            category: "supermarkets".to_string(),
            median_distance_m: None,
            threshold_m: 1000.0,
            label: "No POI found".to_string(),
            meets_threshold: false,
        }];

        write_labels(&path, &labels).expect("write");
        let text = fs::read_to_string(&path).expect("read");
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("neighborhood_id,category,median_distance_m,threshold_m,label,meets_threshold")
        );
        assert_eq!(lines.next(), Some("1,supermarkets,,1000,No POI found,false"));
    }

    #[test]
    fn distances_csv_round_trips_nearest_fields() {
        let path = temp_path("distances.csv");
        let records = vec![DistanceRecord {
            sample_id: 7,
            neighborhood_id: 1,
            category: "pt_stops".to_string(),
            nearest: Some(NearestPoi {
                poi_id: 55,
                poi_name: "Gent-Sint-Pieters".to_string(),
                poi_type: "station".to_string(),
                distance_m: 212.5,
            }),
        }];

        write_distances(&path, &records).expect("write");
        let text = fs::read_to_string(&path).expect("read");
        assert!(text.contains("7,1,pt_stops,55,Gent-Sint-Pieters,station,212.5"));
    }

    #[test]
    fn counts_csv_is_one_row_per_pair() {
        let path = temp_path("counts.csv");
        let counts = vec![
            PoiCount {
                neighborhood_id: 1,
                domain: "winkels".to_string(),
                count: 12,
            },
            PoiCount {
                neighborhood_id: 1,
                domain: "groen".to_string(),
                count: 3,
            },
        ];

        write_counts(&path, &counts).expect("write");
        let text = fs::read_to_string(&path).expect("read");
        assert_eq!(text.lines().count(), 3);
        assert!(text.contains("1,winkels,12"));
    }
}
