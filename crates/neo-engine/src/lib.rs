pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;
pub mod bridge;
pub mod input;

// Re-export key types at crate root for convenience
pub use api::game::{Game, GameConfig, EngineContext};
pub use api::types::{EntityId, GameEvent};
pub use components::entity::Entity;
pub use components::sprite::{SpriteComponent, SpriteClass};
pub use core::scene::Scene;
pub use core::time::FixedTimestep;
pub use core::rng::Rng;
pub use renderer::instance::{RenderInstance, RenderBuffer};
pub use renderer::camera::Camera2D;
pub use input::controls::{Control, Controls, InputEvent, InputState};
pub use bridge::protocol::{FrameHeader, ProtocolLayout};
pub use systems::render::build_render_buffer;
