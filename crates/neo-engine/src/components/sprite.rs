/// Visual class of an entity. The host maps each class to a style
/// (e.g. a CSS class or a fill colour); the engine never interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SpriteClass(pub u32);

/// Defines how an entity appears visually.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpriteComponent {
    /// Style class looked up by the host.
    pub class: SpriteClass,
    /// Display-only highlight (e.g. a hazard marker).
    pub flagged: bool,
}

impl SpriteComponent {
    pub fn new(class: SpriteClass) -> Self {
        Self { class, flagged: false }
    }

    pub fn flagged(mut self, flagged: bool) -> Self {
        self.flagged = flagged;
        self
    }
}
