/// Unique identifier for a node in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

/// What a node depicts. The numeric value travels in the instance buffer
/// and selects the mesh and material on the renderer side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum NodeKind {
    Ground = 0,
    Sun = 1,
    Moon = 2,
    Rainbow = 3,
    Moonbow = 4,
}

impl NodeKind {
    pub const ALL: [NodeKind; 5] = [
        NodeKind::Ground,
        NodeKind::Sun,
        NodeKind::Moon,
        NodeKind::Rainbow,
        NodeKind::Moonbow,
    ];

    /// Wire value written into [`crate::NodeInstance::kind`].
    pub fn as_f32(self) -> f32 {
        self as u32 as f32
    }
}
