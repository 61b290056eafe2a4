use std::fmt::Display;

use neo_engine::bridge::protocol::HEADER_FLOATS;
use neo_engine::{
    build_render_buffer, EngineContext, FixedTimestep, FrameHeader, Game, GameConfig,
    InputEvent, InputState, ProtocolLayout, RenderBuffer,
};

/// Lifecycle of a game session.
///
/// `Loading → Running` or `Loading → Error`, each at most once. `Error` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Waiting for the host to resolve the game's data. No frames run.
    Loading,
    /// Steady-state per-frame updates.
    Running,
    /// Data could not be loaded. No frames run, ever.
    Error,
}

impl RunPhase {
    /// Numeric code exposed to the host.
    pub fn code(self) -> u32 {
        match self {
            RunPhase::Loading => 0,
            RunPhase::Running => 1,
            RunPhase::Error => 2,
        }
    }
}

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]` (see `export_game!`), because wasm-bindgen
/// cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputState,
    render_buffer: RenderBuffer,
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    phase: RunPhase,
    /// Set once the host reports a real viewport; config sizes are placeholders until then.
    viewport_reported: bool,
    error: Option<String>,
    frame: u64,
    header: [f32; HEADER_FLOATS],
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G) -> Self {
        Self::with_seed(game, 42)
    }

    /// Create a runner whose engine RNG starts from `seed`.
    pub fn with_seed(game: G, seed: u64) -> Self {
        let config = game.config();
        let layout = ProtocolLayout::from_config(&config);

        let mut runner = Self {
            ctx: EngineContext::with_config(&config, seed),
            input: InputState::new(),
            render_buffer: RenderBuffer::with_capacity(config.max_instances),
            timestep: FixedTimestep::with_max_steps(config.fixed_dt, config.max_steps_per_frame),
            layout,
            config,
            game,
            phase: RunPhase::Loading,
            viewport_reported: false,
            error: None,
            frame: 0,
            header: [0.0; HEADER_FLOATS],
        };
        runner.write_header();
        runner
    }

    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Why the session failed, once in the Error phase.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    /// Adjust the game before its data arrives, then re-read its config.
    /// Returns false (and does nothing) outside the Loading phase.
    pub fn configure(&mut self, f: impl FnOnce(&mut G)) -> bool {
        if self.phase != RunPhase::Loading {
            log::warn!("configure ignored in {:?} phase", self.phase);
            return false;
        }
        f(&mut self.game);
        self.reload_config();
        true
    }

    fn reload_config(&mut self) {
        self.config = self.game.config();
        self.layout = ProtocolLayout::from_config(&self.config);
        self.timestep = FixedTimestep::with_max_steps(self.config.fixed_dt, self.config.max_steps_per_frame);
        self.render_buffer = RenderBuffer::with_capacity(self.config.max_instances);
        self.ctx.apply_config(&self.config);
        if !self.viewport_reported {
            self.ctx.camera.resize(self.config.viewport_width, self.config.viewport_height);
        }
        self.write_header();
    }

    /// Hand the game its data, or the reason it could not be loaded.
    /// Only the first resolution counts; later ones are ignored.
    pub fn resolve<E: Display>(&mut self, data: Result<G::Data, E>) {
        if self.phase != RunPhase::Loading {
            log::warn!("data resolved again in {:?} phase, ignoring", self.phase);
            return;
        }
        match data {
            Ok(data) => {
                self.game.init(&mut self.ctx, data);
                self.phase = RunPhase::Running;
                self.rebuild_render_buffer();
                log::info!("running with {} entities", self.ctx.scene.len());
            }
            Err(err) => self.fail(err),
        }
    }

    /// Enter the terminal Error phase. Ignored once Running.
    pub fn fail(&mut self, reason: impl Display) {
        if self.phase != RunPhase::Loading {
            log::warn!("failure reported in {:?} phase, ignoring: {reason}", self.phase);
            return;
        }
        let message = reason.to_string();
        log::error!("load failed: {message}");
        self.error = Some(message);
        self.phase = RunPhase::Error;
        self.write_header();
    }

    /// Run a closure against the live game. Returns None unless Running.
    pub fn with_game<R>(&mut self, f: impl FnOnce(&mut G, &mut EngineContext) -> R) -> Option<R> {
        if self.phase != RunPhase::Running {
            return None;
        }
        let result = f(&mut self.game, &mut self.ctx);
        self.rebuild_render_buffer();
        Some(result)
    }

    /// Apply an input event to the level-triggered input state.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.apply(event);
    }

    /// The viewport changed size.
    pub fn resize(&mut self, width: f32, height: f32) {
        let changed = self.ctx.camera.resize(width, height);
        let view = self.ctx.camera.viewport();
        if view.x == width && view.y == height {
            self.viewport_reported = true;
        }
        if !changed {
            return;
        }
        if self.phase == RunPhase::Running {
            self.game.resized(&mut self.ctx);
            self.rebuild_render_buffer();
        } else {
            self.write_header();
        }
    }

    /// Run one display frame: fixed-step updates, then rebuild the render buffer.
    pub fn tick(&mut self, dt: f32) {
        if self.phase != RunPhase::Running {
            return;
        }

        let steps = self.timestep.accumulate(dt);
        if steps == 0 {
            return;
        }

        // Events describe the latest step only.
        for _ in 0..steps {
            self.ctx.clear_frame_data();
            self.game.update(&mut self.ctx, &self.input);
        }

        self.frame += 1;
        self.rebuild_render_buffer();
    }

    fn rebuild_render_buffer(&mut self) {
        build_render_buffer(self.ctx.scene.iter(), &mut self.render_buffer);
        self.write_header();
    }

    fn write_header(&mut self) {
        self.header = FrameHeader {
            frame: self.frame,
            phase: self.phase.code(),
            instance_count: self.render_buffer.instance_count(),
            visible_count: self.render_buffer.visible_count(),
            event_count: self.ctx.events.len() as u32,
            viewport: self.ctx.camera.viewport(),
            camera_offset: self.ctx.camera.offset,
        }
        .encode(&self.layout);
    }

    // ---- Pointer accessors for shared-buffer reads ----

    pub fn header(&self) -> &[f32; HEADER_FLOATS] {
        &self.header
    }

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn render_buffer(&self) -> &RenderBuffer {
        &self.render_buffer
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn visible_count(&self) -> u32 {
        self.render_buffer.visible_count()
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len() as u32
    }

    // ---- Capacity accessors (read by the host via wasm_bindgen exports) ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use neo_engine::bridge::protocol::{HEADER_INSTANCE_COUNT, HEADER_PHASE, HEADER_VIEWPORT_WIDTH};
    use neo_engine::input::controls::KEY_UP;
    use neo_engine::{Entity, GameEvent, SpriteComponent};

    /// Moves one dot right by one pixel per step while thrust is held.
    struct Dot {
        inits: u32,
        steps: u32,
        resizes: u32,
        margin: f32,
    }

    impl Dot {
        fn new() -> Self {
            Self { inits: 0, steps: 0, resizes: 0, margin: 50.0 }
        }
    }

    impl Game for Dot {
        type Data = Vec2;

        fn config(&self) -> GameConfig {
            GameConfig { cull_margin: self.margin, ..GameConfig::default() }
        }

        fn init(&mut self, ctx: &mut EngineContext, start: Vec2) {
            self.inits += 1;
            ctx.spawn(|id| Entity::new(id).with_tag("dot").with_pos(start).with_sprite(SpriteComponent::default()));
        }

        fn update(&mut self, ctx: &mut EngineContext, input: &InputState) {
            self.steps += 1;
            let push = input.controls().up;
            let camera = ctx.camera.clone();
            for e in ctx.scene.iter_mut() {
                if push {
                    e.pos.x += 1.0;
                }
                let screen = camera.world_to_screen(e.pos);
                e.place(e.pos, screen, camera.is_visible(screen));
            }
            ctx.emit_event(GameEvent::new(1.0, self.steps as f32, 0.0, 0.0));
        }

        fn resized(&mut self, _ctx: &mut EngineContext) {
            self.resizes += 1;
        }
    }

    const STEP: f32 = 1.0 / 60.0;

    #[test]
    fn loading_runs_no_frames() {
        let mut runner = GameRunner::new(Dot::new());
        runner.tick(STEP);
        assert_eq!(runner.phase(), RunPhase::Loading);
        assert_eq!(runner.game().steps, 0);
        assert_eq!(runner.header()[HEADER_PHASE], 0.0);
    }

    #[test]
    fn resolve_starts_running_exactly_once() {
        let mut runner = GameRunner::new(Dot::new());
        runner.resolve::<String>(Ok(Vec2::ZERO));
        runner.resolve::<String>(Ok(Vec2::ZERO));
        runner.fail("late failure");
        assert_eq!(runner.phase(), RunPhase::Running);
        assert_eq!(runner.game().inits, 1);
        assert_eq!(runner.context().scene.len(), 1);
        assert_eq!(runner.header()[HEADER_INSTANCE_COUNT], 1.0);
    }

    #[test]
    fn failure_is_terminal() {
        let mut runner = GameRunner::new(Dot::new());
        runner.resolve::<&str>(Err("feed unreachable"));
        assert_eq!(runner.phase(), RunPhase::Error);
        assert_eq!(runner.error_message(), Some("feed unreachable"));

        runner.resolve::<String>(Ok(Vec2::ZERO));
        runner.tick(STEP);
        assert_eq!(runner.phase(), RunPhase::Error);
        assert_eq!(runner.game().inits, 0);
        assert_eq!(runner.header()[HEADER_PHASE], 2.0);
    }

    #[test]
    fn tick_samples_held_input_each_step() {
        let mut runner = GameRunner::new(Dot::new());
        runner.resolve::<String>(Ok(Vec2::ZERO));
        runner.push_input(InputEvent::KeyDown { key_code: KEY_UP });
        for _ in 0..3 {
            runner.tick(STEP);
        }
        runner.push_input(InputEvent::KeyUp { key_code: KEY_UP });
        runner.tick(STEP);

        let dot = runner.context().scene.find_by_tag("dot").map(|e| e.pos.x);
        assert_eq!(dot, Some(3.0));
        assert_eq!(runner.game_events_len(), 1);
    }

    #[test]
    fn configure_only_while_loading() {
        let mut runner = GameRunner::new(Dot::new());
        assert!(runner.configure(|g| g.margin = 5.0));
        assert_eq!(runner.context().camera.margin, 5.0);

        runner.resolve::<String>(Ok(Vec2::ZERO));
        assert!(!runner.configure(|g| g.margin = 99.0));
        assert_eq!(runner.context().camera.margin, 5.0);
    }

    #[test]
    fn resize_notifies_running_game() {
        let mut runner = GameRunner::new(Dot::new());
        runner.resize(1000.0, 800.0);
        assert_eq!(runner.game().resizes, 0);
        assert_eq!(runner.header()[HEADER_VIEWPORT_WIDTH], 1000.0);

        runner.resolve::<String>(Ok(Vec2::ZERO));
        runner.resize(1200.0, 800.0);
        runner.resize(1200.0, 800.0);
        assert_eq!(runner.game().resizes, 1);
    }

    #[test]
    fn configure_keeps_reported_viewport() {
        let mut runner = GameRunner::new(Dot::new());
        assert!(runner.configure(|g| g.margin = 5.0));
        assert_eq!(runner.context().camera.viewport(), Vec2::new(800.0, 600.0));

        runner.resize(f32::NAN, 1080.0);
        assert!(runner.configure(|g| g.margin = 7.0));
        assert_eq!(runner.context().camera.viewport(), Vec2::new(800.0, 600.0));

        runner.resize(1920.0, 1080.0);
        assert!(runner.configure(|g| g.margin = 10.0));
        assert_eq!(runner.context().camera.viewport(), Vec2::new(1920.0, 1080.0));
        assert_eq!(runner.context().camera.margin, 10.0);
        assert_eq!(runner.header()[HEADER_VIEWPORT_WIDTH], 1920.0);
    }

    #[test]
    fn with_game_requires_running() {
        let mut runner = GameRunner::new(Dot::new());
        assert!(runner.with_game(|g, _| g.steps).is_none());
        runner.resolve::<String>(Ok(Vec2::ZERO));
        assert_eq!(runner.with_game(|g, _| g.steps), Some(0));
    }
}
