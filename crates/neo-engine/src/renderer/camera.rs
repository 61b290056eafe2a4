use glam::Vec2;

/// Screen-space camera for 2D rendering.
///
/// The camera has no state of its own beyond the viewport: `offset` is recomputed
/// from the followed target every frame (`offset = target - screen_center`), so
/// repeated frames never accumulate drift.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera2D {
    /// Viewport width in pixels.
    pub width: f32,
    /// Viewport height in pixels.
    pub height: f32,
    /// World-to-screen translation: `screen = world - offset`.
    pub offset: Vec2,
    /// Extra pixels around the viewport that still count as visible.
    pub margin: f32,
}

impl Camera2D {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            offset: Vec2::ZERO,
            margin: 0.0,
        }
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = margin.max(0.0);
        self
    }

    /// Viewport size as a vector.
    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// The smaller of the two viewport dimensions.
    pub fn min_dimension(&self) -> f32 {
        self.width.min(self.height)
    }

    /// Center of the viewport in screen pixels.
    pub fn screen_center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Resize the viewport (e.g. on window resize).
    /// Non-positive or non-finite sizes are ignored. Returns whether the size changed.
    pub fn resize(&mut self, width: f32, height: f32) -> bool {
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            log::warn!("ignoring invalid viewport size {width}x{height}");
            return false;
        }
        let changed = width != self.width || height != self.height;
        self.width = width;
        self.height = height;
        changed
    }

    /// Center the camera exactly on `target`. No smoothing.
    pub fn follow(&mut self, target: Vec2) {
        self.offset = target - self.screen_center();
    }

    /// Convert a world position to screen pixels.
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world - self.offset
    }

    /// Check if a screen-space point lies inside the viewport expanded by the margin.
    pub fn is_visible(&self, screen: Vec2) -> bool {
        screen.x >= -self.margin
            && screen.x <= self.width + self.margin
            && screen.y >= -self.margin
            && screen.y <= self.height + self.margin
    }

    /// Check if a screen-space circle outline crosses the expanded viewport.
    /// A circle that fully encloses the viewport is not visible (only its outline is drawn).
    pub fn is_circle_visible(&self, center: Vec2, radius: f32) -> bool {
        let min = Vec2::splat(-self.margin);
        let max = Vec2::new(self.width + self.margin, self.height + self.margin);

        // Nearest point of the rectangle to the center.
        let nearest = center.clamp(min, max);
        if center.distance(nearest) > radius {
            return false;
        }

        // Farthest corner from the center.
        let far_x = if (center.x - min.x).abs() > (center.x - max.x).abs() { min.x } else { max.x };
        let far_y = if (center.y - min.y).abs() > (center.y - max.y).abs() { min.y } else { max.y };
        center.distance(Vec2::new(far_x, far_y)) >= radius
    }
}
