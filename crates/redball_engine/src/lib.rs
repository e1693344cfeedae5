//! # RedBall Engine
//!
//! Headless engine glue for a small arcade game: a node arena scene graph,
//! camera/light/zone components, a viewport table with render paths, a
//! physics settings component, input tracking, a frame loop, and a
//! process-wide fault hook.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use redball_engine::prelude::*;
//!
//! struct MyGame;
//!
//! impl Application for MyGame {
//!     fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
//!         // Build your scene
//!         Ok(())
//!     }
//!
//!     fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError> {
//!         // Update game logic
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let hook = redball_engine::fault::install(FaultPolicy::detect())?;
//!     Engine::run(EngineConfig::default(), hook, &mut MyGame)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod config;
pub mod debug;
pub mod events;
pub mod fault;
pub mod foundation;
pub mod input;
pub mod physics;
pub mod platform;
pub mod render;
pub mod scene;
pub mod spatial;

mod application;
mod engine;

pub use application::{Application, AppError, AppEvent};
pub use engine::{AssetConfig, Engine, EngineConfig, EngineError, Orientation, WindowConfig};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        Application, AppError, AppEvent,
        Engine, EngineConfig, EngineError, Orientation,
        config::{Config, ConfigError},
        events::Signal,
        fault::{FaultHook, FaultPolicy},
        foundation::math::{BoundingBox, Vec3},
        input::{InputManager, KeyCode},
        platform::Platform,
        render::{Camera, Color, Light, RenderPath, Renderer, Viewport, Zone},
        scene::{Component, Node, NodeId, Scene, SceneError},
    };
}
