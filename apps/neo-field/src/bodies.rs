//! Body kinds, visual classes and size scaling.
//!
//! Visual sizes are deliberately not to scale: real diameters are divided down and
//! clamped so a 5 m rock and a 1 km rock both stay readable.

use glam::Vec2;
use neo_engine::{EntityId, SpriteClass, SpriteComponent};

use crate::config::SizeConfig;
use crate::orbit::OrbitState;

// ── Sprite classes (host maps these to styles) ───────────────────────

pub const CLASS_EARTH: SpriteClass = SpriteClass(0);
pub const CLASS_PLANET: SpriteClass = SpriteClass(1);
pub const CLASS_ASTEROID: SpriteClass = SpriteClass(2);
pub const CLASS_SHIP: SpriteClass = SpriteClass(3);
pub const CLASS_ORBIT_RING: SpriteClass = SpriteClass(4);

// ── Kinds ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    /// The anchor at the center of the field.
    Earth,
    Planet,
    /// `sentry` marks objects under impact monitoring. Display only.
    Asteroid { sentry: bool },
}

impl BodyKind {
    pub fn sprite(self) -> SpriteComponent {
        match self {
            BodyKind::Earth => SpriteComponent::new(CLASS_EARTH),
            BodyKind::Planet => SpriteComponent::new(CLASS_PLANET),
            BodyKind::Asteroid { sentry } => SpriteComponent::new(CLASS_ASTEROID).flagged(sentry),
        }
    }

    pub fn is_asteroid(self) -> bool {
        matches!(self, BodyKind::Asteroid { .. })
    }

    pub fn is_sentry(self) -> bool {
        matches!(self, BodyKind::Asteroid { sentry: true })
    }
}

// ── Bodies ───────────────────────────────────────────────────────────

/// One body in the field and the entities that draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct CelestialBody {
    pub name: String,
    pub kind: BodyKind,
    /// Real distance from the center in km (miss distance for asteroids).
    pub distance_km: f64,
    pub diameter_px: f32,
    pub orbit: OrbitState,
    pub entity: EntityId,
    /// Orbit ring entity, planets only.
    pub ring: Option<EntityId>,
}

impl CelestialBody {
    pub fn world_position(&self) -> Vec2 {
        self.orbit.position().as_vec2()
    }

    /// Real kilometres per world pixel along this body's orbit.
    pub fn km_per_px(&self) -> Option<f64> {
        let radius = self.orbit.radius();
        (radius > 0.0).then(|| self.distance_km / radius)
    }
}

// ── Sizes ────────────────────────────────────────────────────────────

fn scaled(real: f64, per_px: f64, min_px: f32, max_px: f32) -> f32 {
    let px = (real / per_px) as f32;
    if px.is_finite() {
        px.clamp(min_px, max_px)
    } else {
        min_px
    }
}

pub fn asteroid_diameter_px(diameter_m: f64, sizes: &SizeConfig) -> f32 {
    scaled(diameter_m, sizes.asteroid_meters_per_px, sizes.asteroid_min_px, sizes.asteroid_max_px)
}

pub fn planet_diameter_px(diameter_km: f64, sizes: &SizeConfig) -> f32 {
    scaled(diameter_km, sizes.planet_km_per_px, sizes.planet_min_px, sizes.planet_max_px)
}
