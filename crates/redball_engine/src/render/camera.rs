//! Camera component
//!
//! The camera takes its position from the node it is attached to; the
//! component only carries projection parameters.

use crate::scene::Component;

/// Perspective camera parameters
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Vertical field of view in degrees
    pub fov_degrees: f32,

    /// Distance to near clipping plane
    pub near: f32,

    /// Distance to far clipping plane
    pub far: f32,

    /// Aspect ratio (width / height), derived from the canvas when zero
    pub aspect: f32,
}

impl Camera {
    /// Create a perspective camera
    pub fn perspective(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self { fov_degrees, near, far, aspect }
    }

    /// Field of view in radians
    pub fn fov_radians(&self) -> f32 {
        self.fov_degrees.to_radians()
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::perspective(45.0, 0.0, 0.1, 1000.0)
    }
}

impl Component for Camera {}
