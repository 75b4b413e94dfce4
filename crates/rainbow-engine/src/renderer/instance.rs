use bytemuck::{Pod, Zeroable};

/// Per-instance node data read by the browser renderer.
/// Must match the TypeScript protocol: 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct NodeInstance {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Euler rotation in degrees.
    pub rotation_x: f32,
    pub rotation_y: f32,
    pub rotation_z: f32,
    /// World-space size in dome units.
    pub scale: f32,
    /// [`crate::NodeKind`] wire value.
    pub kind: f32,
}

impl NodeInstance {
    pub const FLOATS: usize = 8;
}

/// Fixed-capacity instance list rebuilt every tick.
pub struct NodeBuffer {
    instances: Vec<NodeInstance>,
    capacity: usize,
    dropped: usize,
}

impl NodeBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            capacity,
            dropped: 0,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.dropped = 0;
    }

    /// Append an instance. Instances past capacity are counted and dropped
    /// so the shared buffer never overflows.
    pub fn push(&mut self, instance: NodeInstance) -> bool {
        if self.instances.len() >= self.capacity {
            self.dropped += 1;
            return false;
        }
        self.instances.push(instance);
        true
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Instances refused by [`NodeBuffer::push`] since the last clear.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn instances(&self) -> &[NodeInstance] {
        &self.instances
    }

    /// Flat float view, in wire order.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Raw pointer to instance data for zero-copy reads from WASM memory.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for NodeBuffer {
    fn default() -> Self {
        Self::with_capacity(16)
    }
}
