//! Shared-buffer layout between the update loop and the browser renderer.
//! Must stay in sync with TypeScript `protocol.ts`.
//!
//! Layout (all values in f32 / 4 bytes):
//! ```text
//! [Header: 8 floats]
//! [Nodes: max_nodes × 8 floats]
//! ```
//!
//! Capacities are written once into the header at init.
//! TypeScript reads them from the header to compute offsets dynamically.

use crate::api::config::TrackerConfig;
use crate::renderer::instance::NodeInstance;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 8;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_NODES: usize = 2;
pub const HEADER_NODE_COUNT: usize = 3;
pub const HEADER_DOME_RADIUS: usize = 4;
pub const HEADER_PROTOCOL_VERSION: usize = 5;
pub const HEADER_CLOCK_RUNNING: usize = 6;
pub const HEADER_FRAME_STALE: usize = 7;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per node instance (wire format, fixed).
pub const NODE_FLOATS: usize = NodeInstance::FLOATS;

/// Per-frame values that go into the header alongside the capacities.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameHeader {
    pub frame: u32,
    pub node_count: u32,
    pub dome_radius: f32,
    pub running: bool,
    pub stale: bool,
}

/// Runtime-computed buffer layout.
#[derive(Debug, Clone, PartialEq)]
pub struct ProtocolLayout {
    /// Maximum node instances.
    pub max_nodes: usize,

    /// Size of the node section in floats.
    pub node_data_floats: usize,
    /// Offset (in floats) where node data begins.
    pub node_data_offset: usize,

    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl ProtocolLayout {
    /// Compute layout from the node capacity.
    pub fn new(max_nodes: usize) -> Self {
        let node_data_floats = max_nodes * NODE_FLOATS;
        let node_data_offset = HEADER_FLOATS;
        let buffer_total_floats = node_data_offset + node_data_floats;

        Self {
            max_nodes,
            node_data_floats,
            node_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    pub fn from_config(config: &TrackerConfig) -> Self {
        Self::new(config.max_nodes)
    }

    /// Fill a header block. The lock slot is left for the reader.
    pub fn write_header(&self, header: &mut [f32; HEADER_FLOATS], frame: &FrameHeader) {
        header[HEADER_FRAME_COUNTER] = frame.frame as f32;
        header[HEADER_MAX_NODES] = self.max_nodes as f32;
        header[HEADER_NODE_COUNT] = frame.node_count as f32;
        header[HEADER_DOME_RADIUS] = frame.dome_radius;
        header[HEADER_PROTOCOL_VERSION] = PROTOCOL_VERSION;
        header[HEADER_CLOCK_RUNNING] = if frame.running { 1.0 } else { 0.0 };
        header[HEADER_FRAME_STALE] = if frame.stale { 1.0 } else { 0.0 };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_default_config_matches_expected_sizes() {
        let layout = ProtocolLayout::from_config(&TrackerConfig::default());

        assert_eq!(layout.max_nodes, 16);
        assert_eq!(layout.node_data_floats, 16 * 8);
        assert_eq!(layout.node_data_offset, HEADER_FLOATS);
        assert_eq!(layout.buffer_total_floats, HEADER_FLOATS + 128);
        assert_eq!(layout.buffer_total_bytes, (HEADER_FLOATS + 128) * 4);
    }

    #[test]
    fn offsets_are_contiguous() {
        let layout = ProtocolLayout::new(5);
        assert_eq!(
            layout.buffer_total_floats,
            layout.node_data_offset + layout.node_data_floats
        );
    }

    #[test]
    fn header_carries_frame_state() {
        let layout = ProtocolLayout::new(16);
        let mut header = [0.0f32; HEADER_FLOATS];
        layout.write_header(
            &mut header,
            &FrameHeader {
                frame: 3,
                node_count: 7,
                dome_radius: 25.0,
                running: false,
                stale: true,
            },
        );
        assert_eq!(header[HEADER_LOCK], 0.0);
        assert_eq!(header[HEADER_FRAME_COUNTER], 3.0);
        assert_eq!(header[HEADER_MAX_NODES], 16.0);
        assert_eq!(header[HEADER_NODE_COUNT], 7.0);
        assert_eq!(header[HEADER_DOME_RADIUS], 25.0);
        assert_eq!(header[HEADER_PROTOCOL_VERSION], PROTOCOL_VERSION);
        assert_eq!(header[HEADER_CLOCK_RUNNING], 0.0);
        assert_eq!(header[HEADER_FRAME_STALE], 1.0);
    }
}
