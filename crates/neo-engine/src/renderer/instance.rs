use bytemuck::{Pod, Zeroable};

/// Per-instance render data written to the shared buffer for the host renderer.
/// Must match the host protocol: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// X position in screen pixels.
    pub x: f32,
    /// Y position in screen pixels.
    pub y: f32,
    /// Rendered diameter in pixels.
    pub diameter: f32,
    /// Rotation in radians.
    pub rotation: f32,
    /// Sprite class (style lookup on the host side).
    pub class: f32,
    /// 1.0 when the body should be shown, 0.0 when culled this frame.
    pub visible: f32,
    /// 1.0 when the sprite carries a display highlight.
    pub flagged: f32,
    /// Entity id, so the host can key its elements.
    pub id: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 8;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub fn is_visible(&self) -> bool {
        self.visible > 0.5
    }
}

/// Render buffer containing one instance per rendered entity.
pub struct RenderBuffer {
    instances: Vec<RenderInstance>,
    capacity: usize,
    visible: u32,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            capacity,
            visible: 0,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.visible = 0;
    }

    /// Append an instance. Returns false (and drops it) when the buffer is full.
    pub fn push(&mut self, instance: RenderInstance) -> bool {
        if self.instances.len() >= self.capacity {
            return false;
        }
        if instance.is_visible() {
            self.visible += 1;
        }
        self.instances.push(instance);
        true
    }

    pub fn instances(&self) -> &[RenderInstance] {
        &self.instances
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Number of instances flagged visible.
    pub fn visible_count(&self) -> u32 {
        self.visible
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Raw pointer to instance data for shared-buffer reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_instance_is_8_floats() {
        assert_eq!(std::mem::size_of::<RenderInstance>(), RenderInstance::STRIDE_BYTES);
        assert_eq!(RenderInstance::FLOATS, 8);
    }

    #[test]
    fn push_counts_visible_and_respects_capacity() {
        let mut buf = RenderBuffer::with_capacity(2);
        assert!(buf.push(RenderInstance { visible: 1.0, ..Default::default() }));
        assert!(buf.push(RenderInstance::default()));
        assert!(!buf.push(RenderInstance { visible: 1.0, ..Default::default() }));
        assert_eq!(buf.instance_count(), 2);
        assert_eq!(buf.visible_count(), 1);
        buf.clear();
        assert_eq!(buf.visible_count(), 0);
    }
}
