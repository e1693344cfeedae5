//! Rendering-facing scene components
//!
//! The renderer backend itself lives outside this crate. What the game needs
//! from it is small: camera, light and zone components on scene nodes, and a
//! viewport table with per-viewport render paths.

pub mod camera;
pub mod color;
pub mod lighting;
pub mod viewport;

pub use camera::Camera;
pub use color::Color;
pub use lighting::{Light, LightType, Zone};
pub use viewport::{PassKind, RenderError, RenderPass, RenderPath, Renderer, Viewport, MAX_VIEWPORTS};
