//! Math utilities and types
//!
//! Thin aliases over `nalgebra` plus the axis-aligned bounding box used by
//! zones, the spatial index and collision shapes.

use serde::{Deserialize, Serialize};

pub use nalgebra::Vector3;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Minimum corner of the box
    pub min: Vec3,
    /// Maximum corner of the box
    pub max: Vec3,
}

impl BoundingBox {
    /// Create a new bounding box from min and max corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create a cube spanning `min..max` on every axis
    pub fn uniform(min: f32, max: f32) -> Self {
        Self {
            min: Vec3::new(min, min, min),
            max: Vec3::new(max, max, max),
        }
    }

    /// Create a box centered at a point with the given full size
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Get the center of the box
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the full size of the box
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Check if this box contains a point (inclusive)
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    /// Check if this box intersects another box
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x &&
        self.min.y <= other.max.y && self.max.y >= other.min.y &&
        self.min.z <= other.max.z && self.max.z >= other.min.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_uniform_box() {
        let bounds = BoundingBox::uniform(-300.0, 300.0);
        assert_relative_eq!(bounds.size().x, 600.0);
        assert_relative_eq!(bounds.center().norm(), 0.0);
        assert!(bounds.contains_point(Vec3::new(0.0, -5.0, -40.0)));
        assert!(!bounds.contains_point(Vec3::new(0.0, 301.0, 0.0)));
    }

    #[test]
    fn test_center_size_and_intersection() {
        let a = BoundingBox::from_center_size(Vec3::zeros(), Vec3::new(2.0, 2.0, 2.0));
        let b = BoundingBox::from_center_size(Vec3::new(1.5, 0.0, 0.0), Vec3::new(2.0, 2.0, 2.0));
        let c = BoundingBox::from_center_size(Vec3::new(5.0, 0.0, 0.0), Vec3::new(1.0, 1.0, 1.0));

        assert_relative_eq!(a.min.x, -1.0);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }
}
