use crate::api::types::{EntityId, GameEvent};
use crate::components::entity::Entity;
use crate::core::rng::Rng;
use crate::core::scene::Scene;
use crate::input::controls::InputState;
use crate::renderer::camera::Camera2D;

/// Configuration for the engine, provided by the game.
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// Maximum fixed steps run for one display frame (default: 10).
    pub max_steps_per_frame: u32,
    /// Viewport width in pixels until the host reports its real size.
    pub viewport_width: f32,
    /// Viewport height in pixels until the host reports its real size.
    pub viewport_height: f32,
    /// Extra pixels around the viewport inside which bodies stay visible (default: 50).
    pub cull_margin: f32,
    /// Maximum number of render instances (default: 512).
    pub max_instances: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            max_steps_per_frame: 10,
            viewport_width: 800.0,
            viewport_height: 600.0,
            cull_margin: 50.0,
            max_instances: 512,
            max_events: 32,
        }
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Everything the game needs before its first frame.
    /// The host resolves it once; the runner stays in its loading phase until then.
    type Data;

    /// Return engine configuration. Re-read before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Build the initial scene from the resolved data. Called exactly once.
    fn init(&mut self, ctx: &mut EngineContext, data: Self::Data);

    /// One fixed step. Reads the current input snapshot and mutates the scene.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputState);

    /// The viewport changed size. `ctx.camera` already holds the new size.
    fn resized(&mut self, _ctx: &mut EngineContext) {}
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub camera: Camera2D,
    pub rng: Rng,
    pub events: Vec<GameEvent>,
    max_events: usize,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self::with_config(&GameConfig::default(), 42)
    }

    /// Create a context sized from a GameConfig, with a seeded RNG.
    pub fn with_config(config: &GameConfig, seed: u64) -> Self {
        Self {
            scene: Scene::with_capacity(config.max_instances),
            camera: Camera2D::new(config.viewport_width, config.viewport_height)
                .with_margin(config.cull_margin),
            rng: Rng::new(seed),
            events: Vec::with_capacity(config.max_events),
            max_events: config.max_events,
            next_id: 1,
        }
    }

    /// Apply capacity and culling settings from a (possibly changed) config.
    /// The viewport size is left alone; it belongs to whoever reported it last.
    pub fn apply_config(&mut self, config: &GameConfig) {
        self.max_events = config.max_events;
        self.camera.margin = config.cull_margin;
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Spawn an entity built from a fresh ID. Returns the ID.
    pub fn spawn(&mut self, build: impl FnOnce(EntityId) -> Entity) -> EntityId {
        let id = self.next_id();
        self.scene.spawn(build(id));
        id
    }

    /// Emit a game event to be forwarded to the host.
    /// Events beyond the per-frame capacity are dropped.
    pub fn emit_event(&mut self, event: GameEvent) {
        if self.events.len() >= self.max_events {
            log::warn!("event buffer full ({}), dropping kind {}", self.max_events, event.kind);
            return;
        }
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}
