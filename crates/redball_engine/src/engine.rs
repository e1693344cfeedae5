//! Core engine implementation

use crate::{
    application::{Application, AppError, AppEvent},
    config::{Config, ConfigError},
    fault::{Fault, FaultDisposition, FaultHook, FaultStage},
    foundation::time::Timer,
    input::InputManager,
    platform::Platform,
    render::Renderer,
};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use thiserror::Error;

/// Main engine struct
///
/// The engine owns the subsystems the game talks to each frame and drives the
/// main loop. Every error or panic escaping an application callback is handed
/// to the [`FaultHook`].
pub struct Engine {
    /// Viewport table presented every frame
    pub renderer: Renderer,

    /// Input handling system
    pub input: InputManager,

    /// Frame timing
    timer: Timer,

    /// Platform used for capability queries
    platform: Platform,

    /// Engine configuration
    config: EngineConfig,

    /// Process-wide fault sink
    fault_hook: Arc<FaultHook>,

    /// External event source (platform glue, stdin pump)
    event_source: Option<Receiver<AppEvent>>,

    /// Events queued from inside the engine or by tests
    pending_events: VecDeque<AppEvent>,

    /// Frames completed by [`Engine::run_frame`]
    frame_count: u64,

    /// Whether the engine should continue running
    running: bool,
}

impl Engine {
    /// Create a new engine instance
    pub fn new(config: EngineConfig, fault_hook: Arc<FaultHook>) -> Result<Self, EngineError> {
        log::info!("Initializing engine...");
        config.validate()?;

        let platform = config.platform.unwrap_or_else(Platform::current);
        log::info!(
            "Platform: {} (constrained: {}), canvas {}x{} {:?}",
            platform,
            platform.is_constrained(),
            config.window.width,
            config.window.height,
            config.window.orientation
        );

        Ok(Self {
            renderer: Renderer::new(),
            input: InputManager::new(),
            timer: Timer::new(),
            platform,
            config,
            fault_hook,
            event_source: None,
            pending_events: VecDeque::new(),
            frame_count: 0,
            running: true,
        })
    }

    /// Run the engine main loop with the given application
    pub fn run<T: Application>(config: EngineConfig, fault_hook: Arc<FaultHook>, app: &mut T) -> Result<(), EngineError> {
        let mut engine = Self::new(config, fault_hook)?;
        engine.run_app(app)
    }

    /// Run an application on this engine until quit or the frame limit
    pub fn run_app<T: Application>(&mut self, app: &mut T) -> Result<(), EngineError> {
        self.start(app)?;

        log::info!("Starting main loop...");
        self.timer = Timer::new();
        while self.running {
            if self.config.max_frames.is_some_and(|max| self.frame_count >= max) {
                log::info!("Frame limit of {} reached", self.frame_count);
                break;
            }

            self.timer.update();
            let delta_time = self.timer.delta_time();
            if let Err(e) = self.run_frame(app, delta_time) {
                app.cleanup(self);
                return Err(e);
            }

            if let Some(remaining) = self.timer.remaining_budget(self.config.target_fps) {
                std::thread::sleep(remaining);
            }
        }

        // Cleanup
        app.cleanup(self);

        log::info!("Engine shutdown complete");
        Ok(())
    }

    /// Call the application's start hook
    pub fn start<T: Application>(&mut self, app: &mut T) -> Result<(), EngineError> {
        let result = panic::catch_unwind(AssertUnwindSafe(|| app.initialize(self)));
        self.dispatch(FaultStage::Initialize, result)
    }

    /// Run a single frame: deliver events, update, then clear input edges
    pub fn run_frame<T: Application>(&mut self, app: &mut T, delta_time: f32) -> Result<(), EngineError> {
        for event in self.collect_events() {
            let result = panic::catch_unwind(AssertUnwindSafe(|| app.handle_event(self, event)));
            self.dispatch(FaultStage::Event, result)?;
        }

        let result = panic::catch_unwind(AssertUnwindSafe(|| app.update(self, delta_time)));
        self.dispatch(FaultStage::Update, result)?;

        self.input.end_frame();
        self.frame_count += 1;
        Ok(())
    }

    /// Route a callback outcome through the fault hook
    fn dispatch(&self, stage: FaultStage, result: std::thread::Result<Result<(), AppError>>) -> Result<(), EngineError> {
        let fault = match result {
            Ok(Ok(())) => return Ok(()),
            Ok(Err(error)) => Fault::error(stage, &error),
            Err(payload) => Fault::panic(stage, payload.as_ref()),
        };

        match self.fault_hook.report(fault.clone()) {
            FaultDisposition::Handled => Ok(()),
            FaultDisposition::Break => Err(EngineError::Fault(fault)),
        }
    }

    fn collect_events(&mut self) -> Vec<AppEvent> {
        let mut events: Vec<AppEvent> = self.pending_events.drain(..).collect();
        if let Some(source) = &self.event_source {
            events.extend(source.try_iter());
        }
        events
    }

    /// Attach an external event source drained at the start of every frame
    pub fn attach_event_source(&mut self, source: Receiver<AppEvent>) {
        self.event_source = Some(source);
    }

    /// Queue an event for delivery at the start of the next frame
    pub fn queue_event(&mut self, event: AppEvent) {
        self.pending_events.push_back(event);
    }

    /// Apply an application event to engine state
    pub fn handle_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::WindowCloseRequested => {
                self.quit();
            }
            AppEvent::Tap => {
                self.input.handle_tap();
            }
            AppEvent::KeyPressed(key) => {
                self.input.handle_key_input(key, true);
            }
            AppEvent::KeyReleased(key) => {
                self.input.handle_key_input(key, false);
            }
        }
    }

    /// Request engine shutdown
    pub fn quit(&mut self) {
        log::info!("Engine shutdown requested");
        self.running = false;
    }

    /// Whether the main loop is still running
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Platform used for capability queries
    pub fn platform(&self) -> Platform {
        self.platform
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The fault hook this engine reports to
    pub fn fault_hook(&self) -> &Arc<FaultHook> {
        &self.fault_hook
    }

    /// Frames completed so far
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

/// Screen orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    /// Taller than wide
    Portrait,
    /// Wider than tall
    Landscape,
}

/// Window configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    pub title: String,

    /// Canvas width
    pub width: u32,

    /// Canvas height
    pub height: u32,

    /// Screen orientation
    pub orientation: Orientation,
}

/// Asset system configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetConfig {
    /// Asset root folder
    pub root: String,
}

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Window configuration
    pub window: WindowConfig,

    /// Asset system configuration
    pub assets: AssetConfig,

    /// Target frames per second, 0 for unpaced
    pub target_fps: u32,

    /// Stop after this many frames (headless runs)
    pub max_frames: Option<u64>,

    /// Default log filter
    pub log_level: String,

    /// Force a platform instead of detecting it
    pub platform: Option<Platform>,
}

impl EngineConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Invalid {
                field: "window",
                reason: format!("canvas size {}x{} must be non-zero", self.window.width, self.window.height),
            });
        }
        if self.assets.root.is_empty() {
            return Err(ConfigError::Invalid {
                field: "assets.root",
                reason: "asset root cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig {
                title: "RedBall".to_string(),
                width: 576,
                height: 1024,
                orientation: Orientation::Portrait,
            },
            assets: AssetConfig {
                root: "Data".to_string(),
            },
            target_fps: 60,
            max_frames: None,
            log_level: "info".to_string(),
            platform: None,
        }
    }
}

impl Config for EngineConfig {}

/// Engine-level errors
#[derive(Error, Debug)]
pub enum EngineError {
    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A fault stopped the run-loop
    #[error("Run-loop stopped by fault: {0}")]
    Fault(Fault),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fault::FaultPolicy;
    use crate::input::KeyCode;

    fn engine(break_on_fault: bool) -> Engine {
        let hook = Arc::new(FaultHook::new(FaultPolicy { break_on_fault }));
        Engine::new(EngineConfig::default(), hook).unwrap()
    }

    #[derive(Default)]
    struct Probe {
        initialized: bool,
        updates: u32,
        taps_seen: u32,
        fail_on_update: Option<u32>,
        panic_on_update: Option<u32>,
    }

    impl Application for Probe {
        fn initialize(&mut self, _engine: &mut Engine) -> Result<(), AppError> {
            self.initialized = true;
            Ok(())
        }

        fn update(&mut self, engine: &mut Engine, _delta_time: f32) -> Result<(), AppError> {
            self.updates += 1;
            self.taps_seen += engine.input.tap_count();
            if self.fail_on_update == Some(self.updates) {
                return Err(AppError::Custom("update failed".into()));
            }
            if self.panic_on_update == Some(self.updates) {
                panic!("update panicked");
            }
            Ok(())
        }
    }

    #[test]
    fn test_events_reach_input_before_update() {
        let mut engine = engine(false);
        let mut app = Probe::default();
        engine.start(&mut app).unwrap();

        engine.queue_event(AppEvent::Tap);
        engine.run_frame(&mut app, 0.016).unwrap();
        engine.run_frame(&mut app, 0.016).unwrap();

        assert!(app.initialized);
        assert_eq!(app.updates, 2);
        assert_eq!(app.taps_seen, 1);
        assert_eq!(engine.frame_count(), 2);
    }

    #[test]
    fn test_attached_event_source() {
        let mut engine = engine(false);
        let mut app = Probe::default();
        let (tx, rx) = std::sync::mpsc::channel();
        engine.attach_event_source(rx);

        tx.send(AppEvent::KeyPressed(KeyCode::Space)).unwrap();
        tx.send(AppEvent::Tap).unwrap();
        engine.run_frame(&mut app, 0.016).unwrap();

        assert_eq!(app.taps_seen, 1);
        assert!(engine.input.is_key_down(KeyCode::Space));
    }

    #[test]
    fn test_error_is_handled_and_loop_continues() {
        let mut engine = engine(false);
        let mut app = Probe { fail_on_update: Some(1), ..Probe::default() };

        engine.run_frame(&mut app, 0.016).unwrap();
        engine.run_frame(&mut app, 0.016).unwrap();

        assert_eq!(engine.fault_hook().handled_count(), 1);
        assert!(engine.is_running());
        assert_eq!(app.updates, 2);
    }

    #[test]
    fn test_panic_is_handled_and_loop_continues() {
        let mut engine = engine(false);
        let mut app = Probe { panic_on_update: Some(1), ..Probe::default() };

        engine.run_frame(&mut app, 0.016).unwrap();
        engine.run_frame(&mut app, 0.016).unwrap();

        let fault = engine.fault_hook().last_fault().unwrap();
        assert!(fault.panicked);
        assert_eq!(fault.stage, FaultStage::Update);
        assert_eq!(engine.fault_hook().handled_count(), 1);
    }

    #[test]
    fn test_break_policy_stops_loop() {
        let mut engine = engine(true);
        let mut app = Probe { fail_on_update: Some(1), ..Probe::default() };

        let result = engine.run_frame(&mut app, 0.016);
        assert!(matches!(result, Err(EngineError::Fault(_))));
    }

    #[test]
    fn test_frame_limit_and_close_request() {
        let hook = Arc::new(FaultHook::new(FaultPolicy::default()));
        let config = EngineConfig { max_frames: Some(3), target_fps: 0, ..EngineConfig::default() };
        let mut app = Probe::default();
        Engine::run(config, Arc::clone(&hook), &mut app).unwrap();
        assert_eq!(app.updates, 3);

        let mut engine = Engine::new(EngineConfig { target_fps: 0, ..EngineConfig::default() }, hook).unwrap();
        engine.queue_event(AppEvent::WindowCloseRequested);
        let mut app = Probe::default();
        engine.run_app(&mut app).unwrap();
        assert_eq!(app.updates, 1);
        assert!(!engine.is_running());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let hook = Arc::new(FaultHook::new(FaultPolicy::default()));
        let mut config = EngineConfig::default();
        config.window.width = 0;
        assert!(matches!(Engine::new(config, hook), Err(EngineError::Config(_))));
    }
}
