//! Shared-buffer layout.
//! Must stay in sync with the host-side buffer reader.
//!
//! Layout (all values in f32 / 4 bytes):
//! ```text
//! [Header: 16 floats]
//! [Instances: max_instances × 8 floats]
//! [Events: max_events × 4 floats]
//! ```
//!
//! Capacities are written into the header every frame.
//! The host reads them from the header to compute offsets dynamically.

use glam::Vec2;

use crate::api::game::GameConfig;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 16;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_PHASE: usize = 2;
pub const HEADER_MAX_INSTANCES: usize = 3;
pub const HEADER_INSTANCE_COUNT: usize = 4;
pub const HEADER_VISIBLE_COUNT: usize = 5;
pub const HEADER_MAX_EVENTS: usize = 6;
pub const HEADER_EVENT_COUNT: usize = 7;
pub const HEADER_VIEWPORT_WIDTH: usize = 8;
pub const HEADER_VIEWPORT_HEIGHT: usize = 9;
pub const HEADER_CAMERA_OFFSET_X: usize = 10;
pub const HEADER_CAMERA_OFFSET_Y: usize = 11;
pub const HEADER_PROTOCOL_VERSION: usize = 12;
// 13..16 reserved.

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per render instance (wire format, fixed).
pub const INSTANCE_FLOATS: usize = 8;

/// Floats per game event: kind, a, b, c (wire format, fixed).
pub const EVENT_FLOATS: usize = 4;

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum render instances.
    pub max_instances: usize,
    /// Maximum game events per frame.
    pub max_events: usize,

    /// Size of instance data section in floats.
    pub instance_data_floats: usize,
    /// Size of event data section in floats.
    pub event_data_floats: usize,

    /// Offset (in floats) where instance data begins.
    pub instance_data_offset: usize,
    /// Offset (in floats) where event data begins.
    pub event_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from raw capacity values.
    pub fn new(max_instances: usize, max_events: usize) -> Self {
        let instance_data_floats = max_instances * INSTANCE_FLOATS;
        let event_data_floats = max_events * EVENT_FLOATS;

        let instance_data_offset = HEADER_FLOATS;
        let event_data_offset = instance_data_offset + instance_data_floats;

        let buffer_total_floats = event_data_offset + event_data_floats;

        Self {
            max_instances,
            max_events,
            instance_data_floats,
            event_data_floats,
            instance_data_offset,
            event_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute layout from a GameConfig.
    pub fn from_config(config: &GameConfig) -> Self {
        Self::new(config.max_instances, config.max_events)
    }
}

/// Per-frame values written into the header.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameHeader {
    pub frame: u64,
    pub phase: u32,
    pub instance_count: u32,
    pub visible_count: u32,
    pub event_count: u32,
    pub viewport: Vec2,
    pub camera_offset: Vec2,
}

impl FrameHeader {
    /// Encode into the wire header. The lock slot is left at zero for the host to manage.
    pub fn encode(&self, layout: &ProtocolLayout) -> [f32; HEADER_FLOATS] {
        let mut header = [0.0; HEADER_FLOATS];
        header[HEADER_FRAME_COUNTER] = self.frame as f32;
        header[HEADER_PHASE] = self.phase as f32;
        header[HEADER_MAX_INSTANCES] = layout.max_instances as f32;
        header[HEADER_INSTANCE_COUNT] = self.instance_count as f32;
        header[HEADER_VISIBLE_COUNT] = self.visible_count as f32;
        header[HEADER_MAX_EVENTS] = layout.max_events as f32;
        header[HEADER_EVENT_COUNT] = self.event_count as f32;
        header[HEADER_VIEWPORT_WIDTH] = self.viewport.x;
        header[HEADER_VIEWPORT_HEIGHT] = self.viewport.y;
        header[HEADER_CAMERA_OFFSET_X] = self.camera_offset.x;
        header[HEADER_CAMERA_OFFSET_Y] = self.camera_offset.y;
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_default_config_matches_expected_sizes() {
        let layout = ProtocolLayout::from_config(&GameConfig::default());

        assert_eq!(layout.max_instances, 512);
        assert_eq!(layout.max_events, 32);
        assert_eq!(layout.instance_data_floats, 512 * 8);
        assert_eq!(layout.event_data_floats, 32 * 4);
        assert_eq!(layout.instance_data_offset, HEADER_FLOATS);
        assert_eq!(layout.event_data_offset, HEADER_FLOATS + 512 * 8);
        assert_eq!(layout.buffer_total_floats, HEADER_FLOATS + 512 * 8 + 32 * 4);
        assert_eq!(layout.buffer_total_bytes, layout.buffer_total_floats * 4);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(100, 20);
        assert_eq!(layout.instance_data_offset, HEADER_FLOATS);
        assert_eq!(layout.event_data_offset, layout.instance_data_offset + layout.instance_data_floats);
        assert_eq!(layout.buffer_total_floats, layout.event_data_offset + layout.event_data_floats);
    }

    #[test]
    fn header_encodes_fields_in_their_slots() {
        let layout = ProtocolLayout::new(64, 8);
        let header = FrameHeader {
            frame: 12,
            phase: 1,
            instance_count: 40,
            visible_count: 9,
            event_count: 3,
            viewport: Vec2::new(1000.0, 800.0),
            camera_offset: Vec2::new(-500.0, -400.0),
        }
        .encode(&layout);

        assert_eq!(header[HEADER_LOCK], 0.0);
        assert_eq!(header[HEADER_FRAME_COUNTER], 12.0);
        assert_eq!(header[HEADER_PHASE], 1.0);
        assert_eq!(header[HEADER_MAX_INSTANCES], 64.0);
        assert_eq!(header[HEADER_INSTANCE_COUNT], 40.0);
        assert_eq!(header[HEADER_VISIBLE_COUNT], 9.0);
        assert_eq!(header[HEADER_MAX_EVENTS], 8.0);
        assert_eq!(header[HEADER_EVENT_COUNT], 3.0);
        assert_eq!(header[HEADER_VIEWPORT_WIDTH], 1000.0);
        assert_eq!(header[HEADER_CAMERA_OFFSET_Y], -400.0);
        assert_eq!(header[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
    }
}
