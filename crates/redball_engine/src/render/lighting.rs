//! Light and ambient zone components

use super::color::Color;
use crate::foundation::math::BoundingBox;
use crate::scene::Component;

/// Light types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightType {
    /// Directional light (like sunlight)
    Directional,
    /// Point light (omnidirectional, positioned by its node)
    Point,
}

/// Light source attached to a node
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    /// Type of light
    pub light_type: LightType,

    /// Light color
    pub color: Color,

    /// Brightness multiplier
    pub brightness: f32,

    /// Attenuation range (point lights)
    pub range: f32,
}

impl Light {
    /// Create a white point light
    pub fn point(range: f32, brightness: f32) -> Self {
        Self {
            light_type: LightType::Point,
            color: Color::WHITE,
            brightness,
            range,
        }
    }
}

impl Default for Light {
    fn default() -> Self {
        Self::point(10.0, 1.0)
    }
}

impl Component for Light {}

/// Ambient lighting zone
///
/// Everything inside the bounding box receives the zone's ambient color.
#[derive(Debug, Clone, PartialEq)]
pub struct Zone {
    /// Volume covered by the zone
    pub bounding_box: BoundingBox,

    /// Ambient light color
    pub ambient_color: Color,
}

impl Zone {
    /// Create a zone
    pub fn new(bounding_box: BoundingBox, ambient_color: Color) -> Self {
        Self { bounding_box, ambient_color }
    }
}

impl Component for Zone {}
