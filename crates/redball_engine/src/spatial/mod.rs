//! Spatial index settings
//!
//! The scene root carries an [`Octree`] describing the volume the renderer
//! partitions for culling and raycasts.

use crate::foundation::math::BoundingBox;
use crate::scene::Component;

/// Default octree extent on every axis
pub const DEFAULT_OCTREE_EXTENT: f32 = 1000.0;

/// Default subdivision depth
pub const DEFAULT_OCTREE_LEVELS: u32 = 8;

/// Octree spatial index attached to the scene root
#[derive(Debug, Clone, PartialEq)]
pub struct Octree {
    bounds: BoundingBox,
    levels: u32,
}

impl Octree {
    /// Create an octree covering `bounds` subdivided `levels` times
    pub fn new(bounds: BoundingBox, levels: u32) -> Self {
        Self { bounds, levels: levels.max(1) }
    }

    /// Volume covered by the index
    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Subdivision depth
    pub fn levels(&self) -> u32 {
        self.levels
    }
}

impl Default for Octree {
    fn default() -> Self {
        Self::new(
            BoundingBox::uniform(-DEFAULT_OCTREE_EXTENT, DEFAULT_OCTREE_EXTENT),
            DEFAULT_OCTREE_LEVELS,
        )
    }
}

impl Component for Octree {}
