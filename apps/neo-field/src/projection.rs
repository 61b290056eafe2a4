//! Log-scale distance projection, pure math with no engine dependencies.
//!
//! Real distances span several orders of magnitude, so they are normalized on a log10
//! scale between the minimum and maximum distance, then mapped linearly onto
//! `[base_radius, max_radius]` and multiplied by the zoom factor.
//! Uses f64 throughout; callers convert to f32 at the screen-coordinate step.

use crate::config::ProjectionConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct DistanceProjector {
    min_distance_km: f64,
    max_distance_km: f64,
    base_radius_px: f64,
    max_radius_fraction: f64,
    zoom: f64,
    log_min: f64,
    log_max: f64,
}

impl DistanceProjector {
    pub fn new(config: &ProjectionConfig) -> Self {
        Self {
            min_distance_km: config.min_distance_km,
            max_distance_km: config.max_distance_km,
            base_radius_px: config.base_radius_px,
            max_radius_fraction: config.max_radius_fraction,
            zoom: config.zoom,
            log_min: (config.min_distance_km + 1.0).log10(),
            log_max: config.max_distance_km.log10(),
        }
    }

    pub fn min_distance_km(&self) -> f64 {
        self.min_distance_km
    }

    pub fn max_distance_km(&self) -> f64 {
        self.max_distance_km
    }

    /// Whether a body at this distance belongs in the scene.
    /// Far bodies are left out, never compressed onto the outer edge.
    pub fn accepts(&self, distance_km: f64) -> bool {
        distance_km.is_finite() && (0.0..=self.max_distance_km).contains(&distance_km)
    }

    /// Outermost radius before zoom for a viewport whose smaller side is `min_dimension`.
    pub fn max_radius_px(&self, min_dimension: f64) -> f64 {
        self.max_radius_fraction * min_dimension
    }

    /// Radius of the innermost orbit, after zoom.
    pub fn inner_radius_px(&self) -> f64 {
        self.base_radius_px * self.zoom
    }

    /// Position of `distance_km` on the log scale, in [0, 1].
    pub fn proportion(&self, distance_km: f64) -> f64 {
        let p = (distance_km.log10() - self.log_min) / (self.log_max - self.log_min);
        // log10(0) is -inf, which clamps to 0 like any other near distance.
        if p.is_nan() {
            0.0
        } else {
            p.clamp(0.0, 1.0)
        }
    }

    /// Orbit radius in pixels for a distance in km.
    pub fn project(&self, distance_km: f64, min_dimension: f64) -> f64 {
        let base = self.base_radius_px;
        let max = self.max_radius_px(min_dimension);
        (base + self.proportion(distance_km) * (max - base)) * self.zoom
    }

    /// Inverse of `project` for radii inside the mapped band.
    pub fn unproject(&self, radius_px: f64, min_dimension: f64) -> Option<f64> {
        let base = self.base_radius_px;
        let span = self.max_radius_px(min_dimension) - base;
        if span.abs() < f64::EPSILON || !radius_px.is_finite() {
            return None;
        }
        let p = (radius_px / self.zoom - base) / span;
        if !(0.0..=1.0).contains(&p) {
            return None;
        }
        Some(10f64.powf(self.log_min + p * (self.log_max - self.log_min)))
    }

    /// Rough real distance for a pixel distance from the field's center.
    /// Inside the innermost orbit the scale is linear down to zero; beyond the outermost
    /// orbit the distance saturates at the maximum.
    pub fn estimate_km(&self, radius_px: f64, min_dimension: f64) -> f64 {
        let inner = self.inner_radius_px();
        if radius_px <= inner {
            return radius_px.max(0.0) / inner * self.min_distance_km;
        }
        self.unproject(radius_px, min_dimension).unwrap_or(self.max_distance_km)
    }
}

impl Default for DistanceProjector {
    fn default() -> Self {
        Self::new(&ProjectionConfig::default())
    }
}
