//! Physics world and collision shapes
//!
//! Bodies integrate their own motion; the world only carries simulation-wide
//! settings such as gravity.

use crate::foundation::math::{BoundingBox, Vec3};
use crate::scene::Component;

/// Earth gravity along -Y, the default for a fresh world
pub const DEFAULT_GRAVITY: f32 = 9.81;

/// Physics simulation settings, attached to the scene root
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsWorld {
    gravity: Vec3,
}

impl PhysicsWorld {
    /// Create a world with default gravity
    pub fn new() -> Self {
        Self { gravity: Vec3::new(0.0, -DEFAULT_GRAVITY, 0.0) }
    }

    /// Set the global gravity vector
    pub fn set_gravity(&mut self, gravity: Vec3) {
        self.gravity = gravity;
    }

    /// Global gravity vector
    pub fn gravity(&self) -> Vec3 {
        self.gravity
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for PhysicsWorld {}

/// Box collision shape centered on its node
#[derive(Debug, Clone, PartialEq)]
pub struct CollisionShape {
    /// Full size of the box
    pub size: Vec3,
}

impl CollisionShape {
    /// Create a box shape
    pub fn new_box(size: Vec3) -> Self {
        Self { size }
    }

    /// World-space bounds for a node at `position` with `scale`
    pub fn world_bounding_box(&self, position: Vec3, scale: Vec3) -> BoundingBox {
        BoundingBox::from_center_size(position, self.size.component_mul(&scale))
    }
}

impl Component for CollisionShape {}
