//! Near-Earth asteroid field: log-scale orbits around Earth and a steerable ship.
//!
//! World origin is Earth. Every body orbits it on a circle whose radius comes from
//! the distance projector. The camera follows the ship, so bodies are re-projected
//! to the screen every frame.

use glam::Vec2;
use neo_engine::api::game::GameConfig;
use neo_engine::*;

use crate::bodies::CelestialBody;
use crate::builder::{self, BuildReport, FieldData};
use crate::config::FieldConfig;
use crate::feed::FeedParse;
use crate::projection::DistanceProjector;
use crate::ship::Ship;

// ── Engine limits ────────────────────────────────────────────────────

const MAX_INSTANCES: usize = 2048;
const MAX_EVENTS: usize = 16;

// ── Game event kinds to the host ─────────────────────────────────────

/// speed, heading (degrees), docked (0/1)
pub const EVENT_SHIP: f32 = 1.0;
/// entity id (-1 if none), distance (px), estimated distance (km)
pub const EVENT_NEAREST: f32 = 2.0;
/// asteroids, sentries, planets
pub const EVENT_SCENE: f32 = 3.0;

// ── Game struct ──────────────────────────────────────────────────────

pub struct AsteroidField {
    config: FieldConfig,
    projector: DistanceProjector,
    ship: Ship,
    bodies: Vec<CelestialBody>,
    ship_id: Option<EntityId>,
    report: BuildReport,
    catalog_report: BuildReport,
    /// Bodies skipped during the latest placement because their position was not finite.
    faults: usize,
}

impl AsteroidField {
    pub fn new() -> Self {
        Self::with_config(FieldConfig::default())
    }

    pub fn with_config(config: FieldConfig) -> Self {
        Self {
            projector: DistanceProjector::new(&config.projection),
            config,
            ship: Ship::docked_at(Vec2::ZERO),
            bodies: Vec::new(),
            ship_id: None,
            report: BuildReport::default(),
            catalog_report: BuildReport::default(),
            faults: 0,
        }
    }

    /// Swap the configuration. Only meaningful before the scene is built.
    pub fn set_config(&mut self, config: FieldConfig) {
        self.projector = DistanceProjector::new(&config.projection);
        self.config = config;
    }

    pub fn field_config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    pub fn bodies(&self) -> &[CelestialBody] {
        &self.bodies
    }

    pub fn report(&self) -> BuildReport {
        self.report
    }

    pub fn faults(&self) -> usize {
        self.faults
    }

    /// Replace every asteroid with the ones in `feed`. Earth, planets and the ship stay.
    pub fn refresh_asteroids(&mut self, ctx: &mut EngineContext, feed: &FeedParse) -> BuildReport {
        let stale: Vec<EntityId> = self
            .bodies
            .iter()
            .filter(|b| b.kind.is_asteroid())
            .map(|b| b.entity)
            .chain(self.ship_id)
            .collect();
        ctx.scene.despawn_where(|e| stale.contains(&e.id));
        self.bodies.retain(|b| !b.kind.is_asteroid());

        let (asteroids, report) = builder::spawn_asteroids(ctx, &feed.records, &self.config, &self.projector);
        self.bodies.extend(asteroids);
        // Respawned last so it stays on top.
        self.ship_id = Some(builder::spawn_ship(ctx, &self.config));

        self.report = self.catalog_report.with_asteroids(report, feed.skipped);
        log::info!("feed refreshed: {} asteroids ({} sentry)", report.asteroids, report.sentries);

        self.place(ctx);
        report
    }

    /// Closest body to the ship and its distance in world pixels.
    pub fn nearest(&self) -> Option<(&CelestialBody, f32)> {
        self.bodies
            .iter()
            .map(|b| (b, b.world_position().distance(self.ship.pos)))
            .filter(|(_, d)| d.is_finite())
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    // ── Per-frame helpers ──────────────────────────────────────────

    /// Re-project every body and the ship through the camera.
    /// A body with a non-finite position is skipped for this frame only.
    fn place(&mut self, ctx: &mut EngineContext) {
        let camera = &ctx.camera;
        let scene = &mut ctx.scene;
        let center = camera.world_to_screen(Vec2::ZERO);
        self.faults = 0;

        for body in &self.bodies {
            let world = body.world_position();
            let screen = camera.world_to_screen(world);
            if !screen.is_finite() {
                log::debug!("{} has no finite position this frame, skipping", body.name);
                self.faults += 1;
                continue;
            }

            if let Some(entity) = scene.get_mut(body.entity) {
                entity.place(world, screen, camera.is_visible(screen));
            }

            if let Some(ring) = body.ring.and_then(|id| scene.get_mut(id)) {
                let radius = body.orbit.radius() as f32;
                ring.diameter = radius * 2.0;
                ring.place(Vec2::ZERO, center, camera.is_circle_visible(center, radius));
            }
        }

        if let Some(entity) = self.ship_id.and_then(|id| scene.get_mut(id)) {
            let screen = camera.world_to_screen(self.ship.pos);
            entity.rotation = self.ship.heading_rad();
            entity.place(self.ship.pos, screen, camera.is_visible(screen));
        }
    }

    fn emit_info(&self, ctx: &mut EngineContext) {
        ctx.emit_event(GameEvent::new(
            EVENT_SHIP,
            self.ship.speed,
            self.ship.heading_deg,
            if self.ship.is_docked() { 1.0 } else { 0.0 },
        ));

        let min_dim = ctx.camera.min_dimension() as f64;
        let nearest = match self.nearest() {
            Some((body, px)) => {
                let km = match body.km_per_px() {
                    Some(scale) => px as f64 * scale,
                    // Earth sits at the center, so the projector's own scale applies.
                    None => self.projector.estimate_km(px as f64, min_dim),
                };
                GameEvent::new(EVENT_NEAREST, body.entity.as_f32(), px, km as f32)
            }
            None => GameEvent::new(EVENT_NEAREST, -1.0, 0.0, 0.0),
        };
        ctx.emit_event(nearest);

        ctx.emit_event(GameEvent::new(
            EVENT_SCENE,
            self.report.asteroids as f32,
            self.report.sentries as f32,
            self.report.planets as f32,
        ));
    }
}

impl Default for AsteroidField {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for AsteroidField {
    type Data = FieldData;

    fn config(&self) -> GameConfig {
        GameConfig {
            fixed_dt: 1.0 / self.config.orbit.frames_per_second as f32,
            viewport_width: self.config.view.width,
            viewport_height: self.config.view.height,
            cull_margin: self.config.view.cull_margin,
            max_instances: MAX_INSTANCES,
            max_events: MAX_EVENTS,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext, data: FieldData) {
        let scene = builder::build_scene(ctx, &data, &self.config, &self.projector);
        self.bodies = scene.bodies;
        self.ship_id = Some(scene.ship);
        self.report = scene.report;
        self.catalog_report = scene.catalog_report;
        self.ship = Ship::docked_at(Vec2::ZERO);

        ctx.camera.follow(self.ship.pos);
        self.place(ctx);
        self.emit_info(ctx);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputState) {
        // 1. Ship
        self.ship.step(input.controls(), &self.config.ship);

        // 2. Camera, from the position just computed
        ctx.camera.follow(self.ship.pos);

        // 3. Bodies: advance, project, cull
        for body in &mut self.bodies {
            body.orbit.advance();
        }
        self.place(ctx);

        // 4. Derived info
        self.emit_info(ctx);
    }

    fn resized(&mut self, ctx: &mut EngineContext) {
        let min_dim = ctx.camera.min_dimension() as f64;
        for body in &mut self.bodies {
            if body.orbit.radius() > 0.0 {
                body.orbit.set_radius(self.projector.project(body.distance_km, min_dim));
            }
        }
        ctx.camera.follow(self.ship.pos);
        self.place(ctx);
    }
}
