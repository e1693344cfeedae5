//! Scene graph
//!
//! The scene is an arena of named nodes addressed by generational handles.
//! Each node owns the components attached to it; the scene owns every node.
//!
//! ```text
//! Scene (root node: Octree, PhysicsWorld, Background)
//!  ├── camera node  (Camera)
//!  ├── zone node    (Zone)
//!  ├── light node   (Light)
//!  └── per-cycle node (menu or player, never both)
//! ```

mod component;
mod node;
#[allow(clippy::module_inception)]
mod scene;

pub use component::Component;
pub use node::{Node, NodeId};
pub use scene::{Scene, SceneError};
