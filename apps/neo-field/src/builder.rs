//! One-shot scene construction from the loaded datasets.
//!
//! Draw order follows spawn order: planet orbit rings, Earth, planets, asteroids, ship.

use glam::Vec2;
use neo_engine::{EngineContext, Entity, EntityId, SpriteComponent};

use crate::bodies::{self, BodyKind, CelestialBody, CLASS_ORBIT_RING, CLASS_SHIP};
use crate::catalog::{parse_catalog, Catalog};
use crate::config::FieldConfig;
use crate::error::LoadError;
use crate::feed::{parse_feed, FeedParse, NeoRecord};
use crate::orbit::{self, OrbitState};
use crate::projection::DistanceProjector;

pub const EARTH_TAG: &str = "Earth";
pub const SHIP_TAG: &str = "ship";

/// Both datasets, fully materialized. Loading needs both; there is no partial state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldData {
    pub catalog: Catalog,
    pub feed: FeedParse,
}

impl FieldData {
    pub fn parse(catalog_json: &str, feed_json: &str) -> Result<Self, LoadError> {
        Ok(Self {
            catalog: parse_catalog(catalog_json)?,
            feed: parse_feed(feed_json)?,
        })
    }
}

/// What made it into the scene and what was left out.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub planets: usize,
    pub asteroids: usize,
    pub sentries: usize,
    /// Beyond the projector's maximum distance.
    pub too_far: usize,
    /// Skipped while parsing.
    pub malformed: usize,
}

impl BuildReport {
    /// Catalog counts from `self` combined with a fresh asteroid pass.
    pub fn with_asteroids(self, asteroids: BuildReport, feed_skipped: usize) -> Self {
        Self {
            planets: self.planets,
            asteroids: asteroids.asteroids,
            sentries: asteroids.sentries,
            too_far: self.too_far + asteroids.too_far,
            malformed: self.malformed + feed_skipped,
        }
    }
}

/// The built field: every body plus the ship's entity.
#[derive(Debug, Clone)]
pub struct FieldScene {
    pub bodies: Vec<CelestialBody>,
    pub ship: EntityId,
    pub report: BuildReport,
    /// The catalog's share of `report`, kept for feed refreshes.
    pub catalog_report: BuildReport,
}

pub fn build_scene(
    ctx: &mut EngineContext,
    data: &FieldData,
    config: &FieldConfig,
    projector: &DistanceProjector,
) -> FieldScene {
    let min_dim = ctx.camera.min_dimension() as f64;
    let mut catalog_report = BuildReport {
        malformed: data.catalog.skipped,
        ..BuildReport::default()
    };

    // ── Rings (drawn underneath everything) ──────────────────────────

    let mut accepted = Vec::new();
    for entry in &data.catalog.planets {
        if !projector.accepts(entry.distance_km) {
            log::debug!("{} at {} km is beyond the field, leaving it out", entry.name, entry.distance_km);
            catalog_report.too_far += 1;
            continue;
        }
        let ring = config.view.planet_orbits.then(|| {
            ctx.spawn(|id| {
                Entity::new(id)
                    .with_tag(format!("{} orbit", entry.name))
                    .with_sprite(SpriteComponent::new(CLASS_ORBIT_RING))
            })
        });
        accepted.push((entry, ring));
    }

    // ── Earth ────────────────────────────────────────────────────────

    let earth_px = data
        .catalog
        .earth_diameter_km
        .map(|km| bodies::planet_diameter_px(km, &config.sizes))
        .unwrap_or(config.sizes.earth_px);
    let mut field = vec![spawn_body(ctx, EARTH_TAG.to_owned(), BodyKind::Earth, 0.0, earth_px, OrbitState::fixed(), None)];

    // ── Planets ──────────────────────────────────────────────────────

    let planet_increment = orbit::angular_increment(0.0, &config.orbit);
    for (entry, ring) in accepted {
        // No approach time for planets, so they start anywhere.
        let angle = ctx.rng.next_angle();
        let orbit = OrbitState::new(projector.project(entry.distance_km, min_dim), angle, planet_increment);
        let diameter = bodies::planet_diameter_px(entry.diameter_km, &config.sizes);
        field.push(spawn_body(ctx, entry.name.clone(), BodyKind::Planet, entry.distance_km, diameter, orbit, ring));
        catalog_report.planets += 1;
    }

    // ── Asteroids and ship ───────────────────────────────────────────

    let (asteroids, asteroid_report) = spawn_asteroids(ctx, &data.feed.records, config, projector);
    field.extend(asteroids);
    let report = catalog_report.with_asteroids(asteroid_report, data.feed.skipped);

    let ship = spawn_ship(ctx, config);

    log::info!(
        "scene built: {} planets, {} asteroids ({} sentry), {} too far, {} malformed",
        report.planets,
        report.asteroids,
        report.sentries,
        report.too_far,
        report.malformed
    );

    FieldScene { bodies: field, ship, report, catalog_report }
}

/// Turn feed records into asteroid bodies. Records beyond the maximum distance are dropped.
/// Only the asteroid fields of the report are filled in.
pub fn spawn_asteroids(
    ctx: &mut EngineContext,
    records: &[NeoRecord],
    config: &FieldConfig,
    projector: &DistanceProjector,
) -> (Vec<CelestialBody>, BuildReport) {
    let min_dim = ctx.camera.min_dimension() as f64;
    let mut report = BuildReport::default();
    let mut asteroids = Vec::with_capacity(records.len());

    for record in records {
        if !projector.accepts(record.miss_distance_km) {
            log::debug!("{} misses by {} km, leaving it out", record.name, record.miss_distance_km);
            report.too_far += 1;
            continue;
        }

        let orbit = OrbitState::new(
            projector.project(record.miss_distance_km, min_dim),
            orbit::initial_angle(record.time_of_day),
            orbit::angular_increment(record.velocity_kmh, &config.orbit),
        );
        let kind = BodyKind::Asteroid { sentry: record.sentry };
        let diameter = bodies::asteroid_diameter_px(record.diameter_min_m, &config.sizes);
        asteroids.push(spawn_body(ctx, record.name.clone(), kind, record.miss_distance_km, diameter, orbit, None));

        report.asteroids += 1;
        if record.sentry {
            report.sentries += 1;
        }
    }

    (asteroids, report)
}

pub fn spawn_ship(ctx: &mut EngineContext, config: &FieldConfig) -> EntityId {
    ctx.spawn(|id| {
        Entity::new(id)
            .with_tag(SHIP_TAG)
            .with_pos(Vec2::ZERO)
            .with_diameter(config.sizes.ship_px)
            .with_sprite(SpriteComponent::new(CLASS_SHIP))
    })
}

fn spawn_body(
    ctx: &mut EngineContext,
    name: String,
    kind: BodyKind,
    distance_km: f64,
    diameter_px: f32,
    orbit: OrbitState,
    ring: Option<EntityId>,
) -> CelestialBody {
    let pos = orbit.position().as_vec2();
    let entity = ctx.spawn(|id| {
        Entity::new(id)
            .with_tag(name.clone())
            .with_pos(pos)
            .with_diameter(diameter_px)
            .with_sprite(kind.sprite())
    });
    CelestialBody { name, kind, distance_km, diameter_px, orbit, entity, ring }
}
