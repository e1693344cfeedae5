//! Viewports, render paths and the renderer's viewport table
//!
//! A render path is an ordered list of passes. Viewports start from the
//! default forward path; optional post-process passes are appended to a
//! clone so the default stays shared and untouched.

use crate::scene::{NodeId, Scene};
use crate::render::Camera;
use thiserror::Error;

/// Maximum number of viewport slots the renderer exposes
pub const MAX_VIEWPORTS: usize = 8;

/// Renderer errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Viewport slot outside the supported range
    #[error("Viewport index {index} out of range (max {max})")]
    InvalidViewportIndex {
        /// Requested slot
        index: usize,
        /// Number of slots available
        max: usize,
    },

    /// The viewport camera node is missing or has no camera
    #[error("Viewport camera node {0:?} has no Camera component")]
    MissingCamera(NodeId),
}

/// Kind of work a render pass performs
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassKind {
    /// Clear the render target
    Clear,
    /// Draw scene geometry for a material pass
    Scene,
    /// Full-screen quad with a post-process shader
    Quad {
        /// Shader resource path relative to the asset root
        shader: String,
    },
}

/// Single command in a render path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPass {
    /// Tag used to find the pass
    pub tag: String,
    /// What the pass does
    pub kind: PassKind,
}

impl RenderPass {
    fn new(tag: &str, kind: PassKind) -> Self {
        Self { tag: tag.to_string(), kind }
    }
}

/// Ordered list of render passes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderPath {
    passes: Vec<RenderPass>,
}

impl RenderPath {
    /// The default forward render path
    pub fn forward() -> Self {
        Self {
            passes: vec![
                RenderPass::new("clear", PassKind::Clear),
                RenderPass::new("base", PassKind::Scene),
                RenderPass::new("litbase", PassKind::Scene),
                RenderPass::new("light", PassKind::Scene),
                RenderPass::new("alpha", PassKind::Scene),
            ],
        }
    }

    /// A path holding one post-process pass
    ///
    /// `shader` is the resource path of the post-process definition, e.g.
    /// `PostProcess/FXAA3.xml`.
    pub fn post_process(tag: &str, shader: impl Into<String>) -> Self {
        Self {
            passes: vec![RenderPass::new(tag, PassKind::Quad { shader: shader.into() })],
        }
    }

    /// Append every pass of another path
    pub fn append(&mut self, other: &RenderPath) {
        self.passes.extend(other.passes.iter().cloned());
    }

    /// Passes in execution order
    pub fn passes(&self) -> &[RenderPass] {
        &self.passes
    }

    /// Check whether a pass with the given tag exists
    pub fn contains_tag(&self, tag: &str) -> bool {
        self.passes.iter().any(|pass| pass.tag == tag)
    }
}

impl Default for RenderPath {
    fn default() -> Self {
        Self::forward()
    }
}

/// Mapping of a camera to a render target
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    camera: NodeId,
    render_path: RenderPath,
}

impl Viewport {
    /// Create a viewport rendering through the given camera node
    ///
    /// `None` selects the default forward render path.
    pub fn new(camera: NodeId, render_path: Option<RenderPath>) -> Self {
        Self {
            camera,
            render_path: render_path.unwrap_or_default(),
        }
    }

    /// Camera node this viewport renders from
    pub fn camera(&self) -> NodeId {
        self.camera
    }

    /// Current render path
    pub fn render_path(&self) -> &RenderPath {
        &self.render_path
    }

    /// Replace the render path
    pub fn set_render_path(&mut self, render_path: RenderPath) {
        self.render_path = render_path;
    }
}

/// Renderer viewport table
///
/// Frames present whatever viewports are registered here.
#[derive(Debug, Default)]
pub struct Renderer {
    viewports: Vec<Option<Viewport>>,
}

impl Renderer {
    /// Create a renderer with no viewports
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a viewport in a slot, replacing any previous one
    ///
    /// The camera node must exist in `scene` and carry a [`Camera`].
    pub fn set_viewport(&mut self, index: usize, viewport: Viewport, scene: &Scene) -> Result<(), RenderError> {
        if index >= MAX_VIEWPORTS {
            return Err(RenderError::InvalidViewportIndex { index, max: MAX_VIEWPORTS });
        }
        if scene.component::<Camera>(viewport.camera()).is_err() {
            return Err(RenderError::MissingCamera(viewport.camera()));
        }

        if self.viewports.len() <= index {
            self.viewports.resize(index + 1, None);
        }
        log::debug!(
            "Viewport {} registered with {} render passes",
            index,
            viewport.render_path().passes().len()
        );
        self.viewports[index] = Some(viewport);
        Ok(())
    }

    /// Viewport registered in a slot
    pub fn viewport(&self, index: usize) -> Option<&Viewport> {
        self.viewports.get(index).and_then(Option::as_ref)
    }
}
