//! Tunable constants for the asteroid field.
//!
//! Every field has a default, so a host only sends the values it wants to change:
//! `{"projection": {"zoom": 3}}` is a complete document.

use serde::{Deserialize, Serialize};

use crate::error::LoadError;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    pub projection: ProjectionConfig,
    pub orbit: OrbitConfig,
    pub ship: ShipConfig,
    pub sizes: SizeConfig,
    pub view: ViewConfig,
    pub feed: FeedConfig,
}

/// Log-scale distance mapping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    /// Distances at or below this map to the base radius.
    pub min_distance_km: f64,
    /// Bodies farther than this are left out of the scene.
    pub max_distance_km: f64,
    /// Radius (before zoom) of the innermost orbit.
    pub base_radius_px: f64,
    /// Outermost radius (before zoom) as a fraction of the smaller viewport side.
    pub max_radius_fraction: f64,
    /// Constant multiplier applied after projection.
    pub zoom: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            min_distance_km: 15_000.0,
            max_distance_km: 100_000_000.0,
            base_radius_px: 50.0,
            max_radius_fraction: 0.45,
            zoom: 5.0,
        }
    }
}

/// Angular speed of orbiting bodies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrbitConfig {
    /// Frame cadence the per-frame increment assumes.
    pub frames_per_second: f64,
    /// Simulated seconds per real second. 1 is real time; 3600 plays one day in 24 s.
    pub simulated_seconds_per_second: f64,
    /// Relative velocity that doubles a body's angular speed.
    pub velocity_scale_kmh: f64,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            frames_per_second: 60.0,
            simulated_seconds_per_second: 1.0,
            velocity_scale_kmh: 50_000.0,
        }
    }
}

/// Ship kinematics, in pixels and degrees per frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    pub max_speed: f32,
    pub acceleration: f32,
    pub deceleration: f32,
    pub rotation_speed_deg: f32,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            max_speed: 5.0,
            acceleration: 0.2,
            deceleration: 0.1,
            rotation_speed_deg: 3.0,
        }
    }
}

/// Visual diameters. Real sizes are scaled down and clamped to a readable range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizeConfig {
    pub asteroid_meters_per_px: f64,
    pub asteroid_min_px: f32,
    pub asteroid_max_px: f32,
    pub planet_km_per_px: f64,
    pub planet_min_px: f32,
    pub planet_max_px: f32,
    /// Used when the catalog has no Earth entry.
    pub earth_px: f32,
    pub ship_px: f32,
}

impl Default for SizeConfig {
    fn default() -> Self {
        Self {
            asteroid_meters_per_px: 20.0,
            asteroid_min_px: 3.0,
            asteroid_max_px: 24.0,
            planet_km_per_px: 1000.0,
            planet_min_px: 8.0,
            planet_max_px: 40.0,
            earth_px: 24.0,
            ship_px: 14.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    /// Viewport assumed until the host reports its size.
    pub width: f32,
    pub height: f32,
    /// Bodies this far outside the viewport still count as visible.
    pub cull_margin: f32,
    /// Draw an orbit ring for each planet.
    pub planet_orbits: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 800.0,
            cull_margin: 50.0,
            planet_orbits: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    /// How often the host should re-fetch the feed.
    pub refresh_interval_ms: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self { refresh_interval_ms: 300_000 }
    }
}

impl FieldConfig {
    /// Parse a (possibly partial) JSON document and validate the result.
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        let config: FieldConfig =
            serde_json::from_str(json).map_err(|e| LoadError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), LoadError> {
        let p = &self.projection;
        check(p.min_distance_km >= 0.0, "projection.min_distance_km must be >= 0")?;
        check(
            p.max_distance_km > p.min_distance_km + 1.0,
            "projection.max_distance_km must exceed min_distance_km + 1",
        )?;
        check(p.base_radius_px > 0.0, "projection.base_radius_px must be > 0")?;
        check(
            p.max_radius_fraction > 0.0 && p.max_radius_fraction <= 1.0,
            "projection.max_radius_fraction must be in (0, 1]",
        )?;
        check(p.zoom > 0.0, "projection.zoom must be > 0")?;

        let o = &self.orbit;
        check(o.frames_per_second > 0.0, "orbit.frames_per_second must be > 0")?;
        check(o.simulated_seconds_per_second >= 0.0, "orbit.simulated_seconds_per_second must be >= 0")?;
        check(o.velocity_scale_kmh > 0.0, "orbit.velocity_scale_kmh must be > 0")?;

        let s = &self.ship;
        check(s.max_speed > 0.0, "ship.max_speed must be > 0")?;
        check(s.acceleration >= 0.0, "ship.acceleration must be >= 0")?;
        check(s.deceleration >= 0.0, "ship.deceleration must be >= 0")?;
        check(s.rotation_speed_deg.is_finite(), "ship.rotation_speed_deg must be finite")?;

        let z = &self.sizes;
        check(z.asteroid_meters_per_px > 0.0, "sizes.asteroid_meters_per_px must be > 0")?;
        check(
            z.asteroid_min_px > 0.0 && z.asteroid_min_px <= z.asteroid_max_px,
            "sizes.asteroid_min_px must be > 0 and <= asteroid_max_px",
        )?;
        check(z.planet_km_per_px > 0.0, "sizes.planet_km_per_px must be > 0")?;
        check(
            z.planet_min_px > 0.0 && z.planet_min_px <= z.planet_max_px,
            "sizes.planet_min_px must be > 0 and <= planet_max_px",
        )?;
        check(z.earth_px > 0.0 && z.ship_px > 0.0, "sizes.earth_px and sizes.ship_px must be > 0")?;

        let v = &self.view;
        check(v.width > 0.0 && v.height > 0.0, "view size must be positive")?;
        check(v.cull_margin >= 0.0, "view.cull_margin must be >= 0")?;

        check(self.feed.refresh_interval_ms > 0, "feed.refresh_interval_ms must be > 0")
    }
}

// NaN fails every comparison above, so it is rejected too.
fn check(ok: bool, message: &str) -> Result<(), LoadError> {
    if ok {
        Ok(())
    } else {
        Err(LoadError::Config(message.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = FieldConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.projection.zoom, 5.0);
        assert_eq!(config.feed.refresh_interval_ms, 300_000);
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config = FieldConfig::from_json(r#"{"projection": {"zoom": 3}, "ship": {"max_speed": 8}}"#)
            .unwrap();
        assert_eq!(config.projection.zoom, 3.0);
        assert_eq!(config.projection.min_distance_km, 15_000.0);
        assert_eq!(config.ship.max_speed, 8.0);
        assert_eq!(config.ship.acceleration, 0.2);
        assert_eq!(config.view, ViewConfig::default());
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(FieldConfig::from_json("{}").unwrap(), FieldConfig::default());
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = FieldConfig::from_json(r#"{"projection": {"zoom": 0}}"#).unwrap_err();
        assert!(matches!(err, LoadError::Config(ref m) if m.contains("zoom")));

        let err = FieldConfig::from_json(r#"{"projection": {"max_distance_km": 10}}"#).unwrap_err();
        assert!(matches!(err, LoadError::Config(_)));

        let err = FieldConfig::from_json(r#"{"sizes": {"asteroid_min_px": 30}}"#).unwrap_err();
        assert!(matches!(err, LoadError::Config(_)));
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(matches!(FieldConfig::from_json("{zoom"), Err(LoadError::Config(_))));
        assert!(matches!(
            FieldConfig::from_json(r#"{"ship": {"max_speed": "fast"}}"#),
            Err(LoadError::Config(_))
        ));
    }
}
