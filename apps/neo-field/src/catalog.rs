//! Static planet catalog.
//!
//! Accepts a bare array or `{"bodies": [...]}` of `{name, distance_km, diameter_km}`.
//! The entry named Earth sizes the anchor; every other entry becomes an orbiting planet.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{LoadError, RecordError};

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub name: String,
    pub distance_km: f64,
    pub diameter_km: f64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    pub planets: Vec<CatalogEntry>,
    pub earth_diameter_km: Option<f64>,
    pub skipped: usize,
}

pub fn parse_catalog(json: &str) -> Result<Catalog, LoadError> {
    let document: CatalogDocument = serde_json::from_str(json)
        .map_err(|source| LoadError::Parse { dataset: "catalog", source })?;

    let entries = match document {
        CatalogDocument::List(entries) => entries,
        CatalogDocument::Wrapped { bodies } => bodies,
    };

    let mut catalog = Catalog::default();
    for (index, value) in entries.iter().enumerate() {
        match CatalogEntry::from_value(value) {
            Ok(entry) if entry.name.eq_ignore_ascii_case("earth") => {
                catalog.earth_diameter_km = Some(entry.diameter_km);
            }
            Ok(entry) => catalog.planets.push(entry),
            Err(err) => {
                log::warn!("skipping catalog entry {index}: {err}");
                catalog.skipped += 1;
            }
        }
    }
    Ok(catalog)
}

impl CatalogEntry {
    pub fn from_value(value: &Value) -> Result<Self, RecordError> {
        let raw = RawEntry::deserialize(value)
            .map_err(|e| RecordError::Invalid { field: "entry", value: e.to_string() })?;

        let name = raw.name.filter(|n| !n.trim().is_empty()).ok_or(RecordError::Missing("name"))?;
        let distance_km = raw.distance_km.ok_or(RecordError::Missing("distance_km"))?;
        if !(distance_km.is_finite() && distance_km >= 0.0) {
            return Err(RecordError::Invalid { field: "distance_km", value: distance_km.to_string() });
        }
        let diameter_km = raw.diameter_km.ok_or(RecordError::Missing("diameter_km"))?;
        if !(diameter_km.is_finite() && diameter_km > 0.0) {
            return Err(RecordError::Invalid { field: "diameter_km", value: diameter_km.to_string() });
        }

        Ok(Self { name, distance_km, diameter_km })
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    List(Vec<Value>),
    Wrapped { bodies: Vec<Value> },
}

#[derive(Deserialize)]
struct RawEntry {
    name: Option<String>,
    distance_km: Option<f64>,
    diameter_km: Option<f64>,
}
