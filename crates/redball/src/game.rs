//! RedBall application
//!
//! Wires the scene bootstrap and the session controller into the engine's
//! application lifecycle.

use crate::background::Background;
use crate::bootstrap::{bootstrap, BootstrapError, SceneFixtures, Stage};
use crate::config::GameConfig;
use crate::menu::StartMenu;
use crate::player::{Player, ScoreBoard};
use crate::session::{FrameContext, SessionController, SessionError};
use redball_engine::debug::add_collision_debug_boxes;
use redball_engine::input::KeyCode;
use redball_engine::scene::Scene;
use redball_engine::{AppError, Application, Engine};

impl From<SessionError> for AppError {
    fn from(error: SessionError) -> Self {
        AppError::GameLogic(Box::new(error))
    }
}

impl From<BootstrapError> for AppError {
    fn from(error: BootstrapError) -> Self {
        AppError::GameLogic(Box::new(error))
    }
}

/// Session controller driving the real menu and player
pub type GameSession = SessionController<StartMenu, Player>;

/// The RedBall game
pub struct RedBallGame {
    config: GameConfig,
    scores: ScoreBoard,
    stage: Option<Stage>,
    session: GameSession,
}

impl RedBallGame {
    /// Create the game; nothing is built until the engine starts it
    pub fn new(config: GameConfig) -> Self {
        let scores = ScoreBoard::new();
        let session = {
            let menu_config = config.menu.clone();
            let menu_scores = scores.clone();
            let tuning = config.gameplay.clone();
            let player_scores = scores.clone();
            SessionController::new(
                move || StartMenu::new(menu_config.clone(), menu_scores.clone()),
                move || Player::new(tuning.clone(), player_scores.clone()),
            )
        };

        Self {
            config,
            scores,
            stage: None,
            session,
        }
    }

    /// The scene, once initialized
    pub fn scene(&self) -> Option<&Scene> {
        self.stage.as_ref().map(|stage| &stage.scene)
    }

    /// Mutable scene access, once initialized
    pub fn scene_mut(&mut self) -> Option<&mut Scene> {
        self.stage.as_mut().map(|stage| &mut stage.scene)
    }

    /// Static scene handles, once initialized
    pub fn fixtures(&self) -> Option<SceneFixtures> {
        self.stage.as_ref().map(|stage| stage.fixtures)
    }

    /// The menu/play cycle
    pub fn session(&self) -> &GameSession {
        &self.session
    }

    /// Scores shared by player and menu
    pub fn scores(&self) -> &ScoreBoard {
        &self.scores
    }
}

impl Application for RedBallGame {
    fn initialize(&mut self, engine: &mut Engine) -> Result<(), AppError> {
        if self.stage.is_some() {
            return Err(AppError::Custom("RedBall already initialized".to_string()));
        }
        log::info!("Starting RedBall");

        let platform = engine.platform();
        let mut stage = bootstrap(&mut engine.renderer, platform, &self.config.options)?;
        self.session.start(&mut stage.scene)?;
        self.stage = Some(stage);
        Ok(())
    }

    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError> {
        let Some(stage) = self.stage.as_mut() else {
            return Err(AppError::Custom("RedBall not initialized".to_string()));
        };

        if engine.input.was_key_pressed(KeyCode::Escape) {
            engine.quit();
            return Ok(());
        }
        if engine.input.was_key_pressed(KeyCode::C) {
            let boxes = add_collision_debug_boxes(&mut stage.scene, true)?;
            log::debug!("{} collision debug boxes shown", boxes);
        }
        if engine.input.was_key_pressed(KeyCode::V) {
            add_collision_debug_boxes(&mut stage.scene, false)?;
        }

        stage
            .scene
            .component_mut::<Background>(stage.fixtures.root)?
            .update(delta_time);

        let frame = FrameContext {
            delta_time,
            input: &engine.input,
        };
        if let Some(state) = self.session.tick(&mut stage.scene, &frame)? {
            log::debug!("Session entered {}", state);
        }
        Ok(())
    }

    fn cleanup(&mut self, engine: &mut Engine) {
        log::info!(
            "RedBall stopped after {} frames, {} cycles, best score {}",
            engine.frame_count(),
            self.session.completed_cycles(),
            self.scores.best()
        );
    }
}
