use glam::Vec3;

use crate::api::types::{NodeId, NodeKind};
use crate::core::geometry::{mirror_orientation, orientation_for, Horizontal, Orientation};

/// One renderable object on the sky dome.
///
/// Positions are world units with `y` up; rotations are Euler degrees.
/// A double-sided node is a single logical ring: its back face is derived
/// from the same facing and never stored separately by callers.
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub id: NodeId,
    pub kind: NodeKind,
    pub position: Vec3,
    pub rotation: Vec3,
    /// Back-face rotation, present only on double-sided nodes.
    pub mirror_rotation: Option<Vec3>,
    pub scale: f32,
}

impl SceneNode {
    /// A single-sided node at the origin.
    pub fn new(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            kind,
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            mirror_rotation: None,
            scale: 1.0,
        }
    }

    // -- Builder pattern --

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    /// Make the node a double-sided ring.
    pub fn double_sided(mut self) -> Self {
        self.mirror_rotation = Some(self.rotation + Vec3::new(180.0, 0.0, 0.0));
        self
    }

    pub fn facing(mut self, toward: Horizontal) -> Self {
        self.set_facing(toward);
        self
    }

    pub fn is_double_sided(&self) -> bool {
        self.mirror_rotation.is_some()
    }

    /// Turn the node's normal towards `toward`, updating the back face too.
    pub fn set_facing(&mut self, toward: Horizontal) {
        self.rotation = to_vec3(orientation_for(toward.altitude, toward.azimuth));
        if self.mirror_rotation.is_some() {
            self.mirror_rotation = Some(to_vec3(mirror_orientation(
                toward.altitude,
                toward.azimuth,
            )));
        }
    }
}

fn to_vec3(o: Orientation) -> Vec3 {
    Vec3::new(o.x as f32, o.y as f32, o.z as f32)
}
