use glam::Vec2;
use crate::api::types::EntityId;
use crate::components::sprite::SpriteComponent;

/// Fat Entity: one render record per body.
/// The game writes world and screen state each frame; the render buffer is built from it.
#[derive(Debug, Clone)]
pub struct Entity {
    /// Unique identifier.
    pub id: EntityId,
    /// String tag for finding entities by name.
    pub tag: String,
    /// Whether this entity is active (inactive entities are not rendered at all).
    pub active: bool,
    /// Position in world space.
    pub pos: Vec2,
    /// Position in screen space, derived from `pos` through the camera.
    pub screen: Vec2,
    /// Culling result for this frame. Hidden entities are still emitted, flagged invisible.
    pub visible: bool,
    /// Rotation in radians.
    pub rotation: f32,
    /// Rendered diameter in pixels.
    pub diameter: f32,
    /// Sprite component (entities without one are never rendered).
    pub sprite: Option<SpriteComponent>,
}

impl Entity {
    /// Create a new entity with the given ID at the origin.
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tag: String::new(),
            active: true,
            pos: Vec2::ZERO,
            screen: Vec2::ZERO,
            visible: true,
            rotation: 0.0,
            diameter: 1.0,
            sprite: None,
        }
    }

    // -- Builder pattern --

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_diameter(mut self, diameter: f32) -> Self {
        self.diameter = diameter;
        self
    }

    pub fn with_sprite(mut self, sprite: SpriteComponent) -> Self {
        self.sprite = Some(sprite);
        self
    }

    /// Record where this entity lands on screen this frame.
    pub fn place(&mut self, pos: Vec2, screen: Vec2, visible: bool) {
        self.pos = pos;
        self.screen = screen;
        self.visible = visible;
    }
}
