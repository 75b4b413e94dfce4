use glam::Vec3;

use crate::components::node::SceneNode;
use crate::renderer::instance::{NodeBuffer, NodeInstance};

fn instance(node: &SceneNode, rotation: Vec3) -> NodeInstance {
    NodeInstance {
        x: node.position.x,
        y: node.position.y,
        z: node.position.z,
        rotation_x: rotation.x,
        rotation_y: rotation.y,
        rotation_z: rotation.z,
        scale: node.scale,
        kind: node.kind.as_f32(),
    }
}

/// Build the instance buffer from a set of nodes.
/// Double-sided nodes emit their front face followed by their mirror face.
pub fn build_node_buffer<'a>(nodes: impl Iterator<Item = &'a SceneNode>, buffer: &mut NodeBuffer) {
    buffer.clear();

    for node in nodes {
        buffer.push(instance(node, node.rotation));
        if let Some(mirror) = node.mirror_rotation {
            buffer.push(instance(node, mirror));
        }
    }
}
