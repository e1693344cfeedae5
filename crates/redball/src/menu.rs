//! Start menu
//!
//! Blocks the session until the player taps or presses the start key. After
//! a death the menu shows the last score and ignores input for a short arming
//! delay so the tap that killed the ball does not restart the game at once.

use crate::config::MenuConfig;
use crate::player::ScoreBoard;
use crate::session::{FrameContext, MenuGate};
use redball_engine::events::Signal;
use redball_engine::scene::Component;

/// What resolved the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartTrigger {
    /// Screen tap
    Tap,
    /// Configured start key
    Key,
    /// Auto-start timer
    Timer,
}

/// Start / restart menu
pub struct StartMenu {
    config: MenuConfig,
    scores: ScoreBoard,
    signal: Signal,
    is_restart: bool,
    prompt: String,
    elapsed: f32,
    trigger: Option<StartTrigger>,
}

impl Component for StartMenu {}

impl StartMenu {
    /// Create a menu that reads the last score from `scores`
    pub fn new(config: MenuConfig, scores: ScoreBoard) -> Self {
        Self {
            config,
            scores,
            signal: Signal::new(),
            is_restart: false,
            prompt: String::new(),
            elapsed: 0.0,
            trigger: None,
        }
    }

    /// Text currently shown
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Whether this presentation follows a death
    pub fn is_restart(&self) -> bool {
        self.is_restart
    }

    /// Whether input is accepted yet
    pub fn is_armed(&self) -> bool {
        !self.is_restart || self.elapsed >= self.config.restart_arming_delay
    }

    /// What resolved the menu, once it has
    pub fn trigger(&self) -> Option<StartTrigger> {
        self.trigger
    }

    fn armed_time(&self) -> f32 {
        if self.is_restart {
            self.elapsed - self.config.restart_arming_delay
        } else {
            self.elapsed
        }
    }

    fn fire(&mut self, trigger: StartTrigger) {
        if self.signal.resolve() {
            self.trigger = Some(trigger);
            log::info!("Start requested by {:?}", trigger);
        }
    }
}

impl MenuGate for StartMenu {
    fn present_and_wait(&mut self, is_restart: bool) -> Signal {
        self.is_restart = is_restart;
        self.elapsed = 0.0;
        self.prompt = if is_restart {
            format!(
                "You died! Score {} (best {}). Tap to restart",
                self.scores.last(),
                self.scores.best()
            )
        } else {
            "Tap to start".to_string()
        };
        log::info!("Menu: {}", self.prompt);
        self.signal.clone()
    }

    fn update(&mut self, frame: &FrameContext<'_>) {
        if self.signal.is_resolved() {
            return;
        }
        self.elapsed += frame.delta_time;
        if !self.is_armed() {
            return;
        }

        if frame.input.any_start_input(self.config.start_key) {
            let trigger = if frame.input.was_tapped() { StartTrigger::Tap } else { StartTrigger::Key };
            self.fire(trigger);
        } else if self.config.auto_start_delay.is_some_and(|delay| self.armed_time() >= delay) {
            self.fire(StartTrigger::Timer);
        }
    }
}
