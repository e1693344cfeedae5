//! Scene bootstrap
//!
//! Builds the static part of the scene exactly once: spatial index, physics
//! world, camera with its viewport, ambient zone, light and background. The
//! handles are returned in [`SceneFixtures`] and stay valid for the whole
//! process.

use crate::background::Background;
use crate::config::ApplicationOptions;
use redball_engine::foundation::math::{BoundingBox, Vec3};
use redball_engine::physics::PhysicsWorld;
use redball_engine::platform::Platform;
use redball_engine::render::{Camera, Color, Light, RenderError, RenderPath, Renderer, Viewport, Zone};
use redball_engine::scene::{NodeId, Scene, SceneError};
use redball_engine::spatial::{Octree, DEFAULT_OCTREE_LEVELS};
use thiserror::Error;

/// Renderer slot the game camera is bound to
pub const MAIN_VIEWPORT: usize = 0;

/// Tag of the anti-aliasing post-process pass
pub const FXAA_TAG: &str = "FXAA3";

/// Post-process definition appended on unconstrained platforms
pub const FXAA_SHADER: &str = "PostProcess/FXAA3.xml";

const CAMERA_POSITION: [f32; 3] = [0.0, 0.0, -10.0];
const LIGHT_POSITION: [f32; 3] = [0.0, -5.0, -40.0];
const ZONE_EXTENT: f32 = 300.0;

/// Bootstrap errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BootstrapError {
    /// Scene graph failure
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),

    /// Viewport registration failure
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

/// Handles of the static scene objects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneFixtures {
    /// Scene root hosting octree, physics world and background
    pub root: NodeId,
    /// Camera node
    pub camera: NodeId,
    /// Ambient zone node
    pub zone: NodeId,
    /// Point light node
    pub light: NodeId,
    /// Renderer slot holding the camera viewport
    pub viewport: usize,
}

impl SceneFixtures {
    /// Number of nodes the fixtures occupy, root included
    pub const NODE_COUNT: usize = 4;

    /// Fixture nodes in creation order
    pub fn nodes(&self) -> [NodeId; Self::NODE_COUNT] {
        [self.root, self.camera, self.zone, self.light]
    }
}

/// Scene plus its fixtures
pub struct Stage {
    /// The one scene of the process
    pub scene: Scene,
    /// Static objects created with it
    pub fixtures: SceneFixtures,
}

/// Build the scene and register its viewport
pub fn bootstrap(
    renderer: &mut Renderer,
    platform: Platform,
    options: &ApplicationOptions,
) -> Result<Stage, BootstrapError> {
    let mut scene = Scene::new();
    let root = scene.root();
    let zone_bounds = BoundingBox::uniform(-ZONE_EXTENT, ZONE_EXTENT);

    scene.add_component(root, Octree::new(zone_bounds, DEFAULT_OCTREE_LEVELS))?;
    let mut physics = PhysicsWorld::new();
    physics.set_gravity(Vec3::zeros());
    scene.add_component(root, physics)?;

    // Camera
    let camera = scene.create_child("Camera");
    scene.node_mut(camera)?.set_position(Vec3::from(CAMERA_POSITION));
    let aspect = options.width as f32 / options.height.max(1) as f32;
    scene.add_component(camera, Camera { aspect, ..Camera::default() })?;

    let mut viewport = Viewport::new(camera, None);
    if platform.is_constrained() {
        log::info!("Skipping {} on {}", FXAA_TAG, platform);
    } else {
        let mut effect_path = viewport.render_path().clone();
        let shader = format!("{}/{}", options.asset_root.trim_end_matches('/'), FXAA_SHADER);
        effect_path.append(&RenderPath::post_process(FXAA_TAG, shader));
        viewport.set_render_path(effect_path);
    }
    renderer.set_viewport(MAIN_VIEWPORT, viewport, &scene)?;

    let zone = scene.create_child("Zone");
    scene.add_component(zone, Zone::new(zone_bounds, Color::WHITE))?;

    let mut background = Background::new();
    background.start();
    scene.add_component(root, background)?;

    // Lights
    let light = scene.create_child("Light");
    scene.node_mut(light)?.set_position(Vec3::from(LIGHT_POSITION));
    scene.add_component(light, Light::point(120.0, 0.8))?;

    log::info!("Scene created with {} nodes", scene.node_count());
    Ok(Stage {
        scene,
        fixtures: SceneFixtures {
            root,
            camera,
            zone,
            light,
            viewport: MAIN_VIEWPORT,
        },
    })
}
