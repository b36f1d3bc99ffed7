//! CSV and GeoJSON readers for the pipeline's input collections.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use access_map_geo::GeoPoint;
use access_map_models::{Neighborhood, Poi, StreetSegment};
use geojson::{GeoJson, Value as GeometryValue};
use serde::Deserialize;

use crate::IngestError;

/// CSV row shape for `neighborhoods.csv`.
#[derive(Debug, Deserialize)]
struct NeighborhoodRow {
    id: u64,
    name: String,
    city: String,
    category: String,
    latitude: f64,
    longitude: f64,
}

/// CSV row shape for per-category POI files.
#[derive(Debug, Deserialize)]
struct PoiRow {
    osm_id: u64,
    name: String,
    poi_type: String,
    latitude: f64,
    longitude: f64,
}

/// Reads neighborhoods from a CSV file with columns
/// `id,name,city,category,latitude,longitude`.
///
/// # Errors
///
/// Returns [`IngestError`] if the file cannot be read or a row fails
/// to parse.
pub fn read_neighborhoods(path: &Path) -> Result<Vec<Neighborhood>, IngestError> {
    let mut reader = csv::Reader::from_path(path)?;
    let mut neighborhoods = Vec::new();

    for row in reader.deserialize() {
        let row: NeighborhoodRow = row?;
        neighborhoods.push(Neighborhood {
            id: row.id,
            name: row.name,
            city: row.city,
            category: row.category,
            center: GeoPoint::new(row.latitude, row.longitude),
        });
    }

    log::info!("Loaded {} neighborhoods from {}", neighborhoods.len(), path.display());
    Ok(neighborhoods)
}

/// Reads one POI collection per listed category from
/// `<dir>/<category>.csv` (columns
/// `osm_id,name,poi_type,latitude,longitude`).
///
/// A missing category file is a recoverable missing-data condition:
/// it is logged and mapped to an empty collection, so downstream
/// stages surface zero counts or no-POI markers instead of aborting.
///
/// # Errors
///
/// Returns [`IngestError`] if an existing file fails to parse.
pub fn read_pois(
    dir: &Path,
    categories: &[String],
) -> Result<BTreeMap<String, Vec<Poi>>, IngestError> {
    let mut by_category = BTreeMap::new();

    for category in categories {
        let path = dir.join(format!("{category}.csv"));
        if !path.exists() {
            log::warn!("POI file {} not found; category '{category}' will be empty", path.display());
            by_category.insert(category.clone(), Vec::new());
            continue;
        }

        let mut reader = csv::Reader::from_path(&path)?;
        let mut pois = Vec::new();
        for row in reader.deserialize() {
            let row: PoiRow = row?;
            pois.push(Poi {
                id: row.osm_id,
                name: row.name,
                category: category.clone(),
                poi_type: row.poi_type,
                location: GeoPoint::new(row.latitude, row.longitude),
            });
        }

        log::info!("Loaded {} POIs for category '{category}'", pois.len());
        by_category.insert(category.clone(), pois);
    }

    Ok(by_category)
}

/// Reads street segments from a GeoJSON `FeatureCollection` of
/// `LineString` features.
///
/// Required properties per feature: `osm_id`, `name`, `highway_type`,
/// and either `neighborhood_ids` (array) or `neighborhood_id`
/// (scalar, the shape the single-owner extractor emits). Features with
/// non-`LineString` geometry are skipped with a warning, matching the
/// extractor's own filtering.
///
/// # Errors
///
/// Returns [`IngestError`] if the file cannot be read, is not valid
/// GeoJSON, or a `LineString` feature is missing a required property.
pub fn read_streets(path: &Path) -> Result<Vec<StreetSegment>, IngestError> {
    let text = fs::read_to_string(path)?;
    let geojson: GeoJson = text.parse()?;

    let GeoJson::FeatureCollection(collection) = geojson else {
        log::warn!("{} is not a FeatureCollection; no streets loaded", path.display());
        return Ok(Vec::new());
    };

    let mut streets = Vec::new();
    for (index, feature) in collection.features.iter().enumerate() {
        let Some(geometry) = &feature.geometry else {
            log::warn!("Street feature {index} has no geometry; skipping");
            continue;
        };
        let GeometryValue::LineString(positions) = &geometry.value else {
            log::warn!("Street feature {index} is not a LineString; skipping");
            continue;
        };

        // GeoJSON positions are [longitude, latitude].
        let path_points: Vec<GeoPoint> = positions
            .iter()
            .filter(|position| position.len() >= 2)
            .map(|position| GeoPoint::new(position[1], position[0]))
            .collect();

        let properties = feature
            .properties
            .as_ref()
            .ok_or(IngestError::MissingProperty {
                feature: index,
                property: "osm_id",
            })?;

        let osm_id = properties
            .get("osm_id")
            .and_then(serde_json::Value::as_u64)
            .ok_or(IngestError::MissingProperty {
                feature: index,
                property: "osm_id",
            })?;
        let name = properties
            .get("name")
            .and_then(serde_json::Value::as_str)
            .unwrap_or_default()
            .to_string();
        let highway_type = properties
            .get("highway_type")
            .and_then(serde_json::Value::as_str)
            .ok_or(IngestError::MissingProperty {
                feature: index,
                property: "highway_type",
            })?
            .to_string();

        let neighborhood_ids = if let Some(ids) = properties.get("neighborhood_ids") {
            ids.as_array()
                .map(|ids| ids.iter().filter_map(serde_json::Value::as_u64).collect())
                .ok_or(IngestError::MissingProperty {
                    feature: index,
                    property: "neighborhood_ids",
                })?
        } else {
            let id = properties
                .get("neighborhood_id")
                .and_then(serde_json::Value::as_u64)
                .ok_or(IngestError::MissingProperty {
                    feature: index,
                    property: "neighborhood_id",
                })?;
            vec![id]
        };

        streets.push(StreetSegment {
            id: osm_id,
            name,
            highway_type,
            path: path_points,
            neighborhood_ids,
        });
    }

    log::info!("Loaded {} street segments from {}", streets.len(), path.display());
    Ok(streets)
}
