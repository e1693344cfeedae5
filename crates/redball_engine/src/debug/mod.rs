//! Collision debug visualization
//!
//! Attaches translucent boxes matching each collision shape so the hit
//! volumes can be inspected in a running game.

use crate::foundation::math::Vec3;
use crate::physics::CollisionShape;
use crate::render::Color;
use crate::scene::{Component, Scene, SceneError};

/// Name of the child node hosting a debug box
pub const DEBUG_BOX_NODE: &str = "CollisionDebugBox";

/// Solid box shape drawn for debugging
#[derive(Debug, Clone, PartialEq)]
pub struct DebugBox {
    /// Box color
    pub color: Color,
}

impl Default for DebugBox {
    fn default() -> Self {
        Self { color: Color::RED.with_alpha(0.4) }
    }
}

impl Component for DebugBox {}

/// Add or remove collision debug boxes
///
/// Every node with a [`CollisionShape`] loses its previous debug box child.
/// When `add` is true a fresh child is created, scaled to the shape's
/// world-space size. Returns the number of boxes now present.
pub fn add_collision_debug_boxes(scene: &mut Scene, add: bool) -> Result<usize, SceneError> {
    let mut created = 0;

    for node in scene.nodes_with_component::<CollisionShape>() {
        if let Some(existing) = scene.find_child(node, DEBUG_BOX_NODE) {
            scene.remove_node(existing)?;
        }
        if !add {
            continue;
        }

        let (position, scale) = {
            let host = scene.node(node)?;
            (host.position(), host.scale())
        };
        let size = scene
            .component::<CollisionShape>(node)?
            .world_bounding_box(position, scale)
            .size();

        let debug_node = scene.create_child_of(node, DEBUG_BOX_NODE)?;
        let debug = scene.node_mut(debug_node)?;
        debug.set_scale(size);
        debug.set_position(Vec3::zeros());
        debug.add_component(DebugBox::default());
        created += 1;
    }

    log::debug!("Collision debug boxes: {}", created);
    Ok(created)
}
