//! Near-Earth-object feed parsing and the refresh gate.
//!
//! The feed groups objects by date: `{"near_earth_objects": {"2024-01-05": [...], ...}}`.
//! Numeric fields arrive either as JSON numbers or as decimal strings.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::{LoadError, RecordError};
use crate::orbit::TimeOfDay;

/// One usable close approach.
#[derive(Debug, Clone, PartialEq)]
pub struct NeoRecord {
    pub name: String,
    pub diameter_min_m: f64,
    pub sentry: bool,
    pub miss_distance_km: f64,
    pub velocity_kmh: f64,
    pub time_of_day: TimeOfDay,
}

/// Records in date order, plus how many were unusable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedParse {
    pub records: Vec<NeoRecord>,
    pub skipped: usize,
}

pub fn parse_feed(json: &str) -> Result<FeedParse, LoadError> {
    let value: Value =
        serde_json::from_str(json).map_err(|source| LoadError::Parse { dataset: "feed", source })?;
    FeedParse::from_value(&value)
}

impl FeedParse {
    pub fn from_value(value: &Value) -> Result<Self, LoadError> {
        let document = FeedDocument::deserialize(value)
            .map_err(|source| LoadError::Parse { dataset: "feed", source })?;

        let mut parse = FeedParse::default();
        // BTreeMap keys are ISO dates, so iteration is chronological.
        for (date, objects) in &document.near_earth_objects {
            for object in objects {
                match NeoRecord::from_value(object) {
                    Ok(record) => parse.records.push(record),
                    Err(err) => {
                        log::warn!("skipping object on {date}: {err}");
                        parse.skipped += 1;
                    }
                }
            }
        }
        Ok(parse)
    }
}

impl NeoRecord {
    pub fn from_value(value: &Value) -> Result<Self, RecordError> {
        let raw = RawNeo::deserialize(value)
            .map_err(|e| RecordError::Invalid { field: "object", value: e.to_string() })?;
        let name = raw.name.ok_or(RecordError::Missing("name"))?;

        let meters = raw
            .estimated_diameter
            .and_then(|d| d.meters)
            .ok_or(RecordError::Missing("estimated_diameter.meters"))?;
        let diameter_min_m = number(meters.estimated_diameter_min, "estimated_diameter_min")?;

        let approach = raw
            .close_approach_data
            .into_iter()
            .next()
            .ok_or(RecordError::Missing("close_approach_data"))?;

        let miss_distance_km = number(
            approach.miss_distance.and_then(|m| m.kilometers),
            "miss_distance.kilometers",
        )?;

        let velocity = approach.relative_velocity.ok_or(RecordError::Missing("relative_velocity"))?;
        let velocity_kmh = match (velocity.kilometers_per_hour, velocity.kilometers_per_second) {
            (Some(kmh), _) => non_negative(kmh, "kilometers_per_hour")?,
            (None, Some(kms)) => non_negative(kms, "kilometers_per_second")? * 3600.0,
            (None, None) => return Err(RecordError::Missing("relative_velocity.kilometers_per_hour")),
        };

        let time_of_day = match (approach.epoch_date_close_approach, approach.close_approach_date_full) {
            (Some(epoch), _) => {
                let ms = epoch.value().ok_or_else(|| epoch.invalid("epoch_date_close_approach"))?;
                TimeOfDay::from_epoch_ms(ms).ok_or_else(|| epoch.invalid("epoch_date_close_approach"))?
            }
            (None, Some(full)) => TimeOfDay::parse_hh_mm(&full).ok_or_else(|| RecordError::Invalid {
                field: "close_approach_date_full",
                value: full.clone(),
            })?,
            (None, None) => return Err(RecordError::Missing("epoch_date_close_approach")),
        };

        Ok(Self {
            name,
            diameter_min_m,
            sentry: raw.is_sentry_object.unwrap_or(false),
            miss_distance_km,
            velocity_kmh,
            time_of_day,
        })
    }
}

fn number(field: Option<Number>, name: &'static str) -> Result<f64, RecordError> {
    non_negative(field.ok_or(RecordError::Missing(name))?, name)
}

fn non_negative(field: Number, name: &'static str) -> Result<f64, RecordError> {
    match field.value() {
        Some(v) if v >= 0.0 => Ok(v),
        _ => Err(field.invalid(name)),
    }
}

// ── Refresh gate ─────────────────────────────────────────────────────

/// Remembers the last feed that was turned into asteroids.
/// Payloads are compared by content, so whitespace and key order do not count as changes.
#[derive(Debug, Default)]
pub struct FeedGate {
    last: Option<Value>,
}

impl FeedGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when `payload` differs from the last admitted feed.
    pub fn is_fresh(&self, payload: &Value) -> bool {
        self.last.as_ref() != Some(payload)
    }

    pub fn admit(&mut self, payload: Value) {
        self.last = Some(payload);
    }
}

// ── Wire shapes ──────────────────────────────────────────────────────

#[derive(Deserialize)]
struct FeedDocument {
    near_earth_objects: BTreeMap<String, Vec<Value>>,
}

#[derive(Deserialize)]
struct RawNeo {
    name: Option<String>,
    estimated_diameter: Option<RawEstimatedDiameter>,
    is_sentry_object: Option<bool>,
    #[serde(default)]
    close_approach_data: Vec<RawApproach>,
}

#[derive(Deserialize)]
struct RawEstimatedDiameter {
    meters: Option<RawRange>,
}

#[derive(Deserialize)]
struct RawRange {
    estimated_diameter_min: Option<Number>,
}

#[derive(Deserialize)]
struct RawApproach {
    epoch_date_close_approach: Option<Number>,
    close_approach_date_full: Option<String>,
    relative_velocity: Option<RawVelocity>,
    miss_distance: Option<RawMissDistance>,
}

#[derive(Deserialize)]
struct RawVelocity {
    kilometers_per_hour: Option<Number>,
    kilometers_per_second: Option<Number>,
}

#[derive(Deserialize)]
struct RawMissDistance {
    kilometers: Option<Number>,
}

/// A number that may be sent as a string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Number {
    Float(f64),
    Text(String),
}

impl Number {
    fn value(&self) -> Option<f64> {
        let v = match self {
            Number::Float(v) => *v,
            Number::Text(s) => s.trim().parse().ok()?,
        };
        v.is_finite().then_some(v)
    }

    fn invalid(&self, field: &'static str) -> RecordError {
        let value = match self {
            Number::Float(v) => v.to_string(),
            Number::Text(s) => s.clone(),
        };
        RecordError::Invalid { field, value }
    }
}
