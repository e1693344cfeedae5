//! The red ball
//!
//! The ball pulls itself down, a tap kicks it upward, and it dies when it
//! leaves the band between floor and ceiling. Distance travelled is the score.

use crate::config::GameplayConfig;
use crate::session::{FrameContext, Spawnable};
use redball_engine::events::Signal;
use redball_engine::foundation::math::Vec3;
use redball_engine::input::KeyCode;
use redball_engine::physics::CollisionShape;
use redball_engine::scene::Component;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

/// Edge length of the ball's collision box
pub const BALL_SIZE: f32 = 1.0;

/// Score of the last finished run, shared between player and menu
#[derive(Debug, Clone, Default)]
pub struct ScoreBoard {
    last: Arc<AtomicU32>,
    best: Arc<AtomicU32>,
}

impl ScoreBoard {
    /// Create an empty score board
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished run
    pub fn record(&self, score: u32) {
        self.last.store(score, Ordering::Release);
        self.best.fetch_max(score, Ordering::AcqRel);
    }

    /// Score of the most recent run
    pub fn last(&self) -> u32 {
        self.last.load(Ordering::Acquire)
    }

    /// Best score so far
    pub fn best(&self) -> u32 {
        self.best.load(Ordering::Acquire)
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeathCause {
    /// Fell below the floor
    Floor,
    /// Rose above the ceiling
    Ceiling,
    /// Killed from outside
    Killed,
}

/// Player-controlled ball
pub struct Player {
    tuning: GameplayConfig,
    height: f32,
    velocity: f32,
    distance: f32,
    life: Signal,
    death: Option<DeathCause>,
    scores: ScoreBoard,
}

impl Component for Player {}

impl Player {
    /// Create a ball reporting its score to `scores`
    pub fn new(tuning: GameplayConfig, scores: ScoreBoard) -> Self {
        let height = tuning.spawn_height;
        Self {
            tuning,
            height,
            velocity: 0.0,
            distance: 0.0,
            life: Signal::new(),
            death: None,
            scores,
        }
    }

    /// Current height
    pub fn height(&self) -> f32 {
        self.height
    }

    /// Current vertical velocity
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Score of this run so far
    pub fn score(&self) -> u32 {
        self.distance.max(0.0) as u32
    }

    /// Whether the run is still going
    pub fn is_alive(&self) -> bool {
        self.death.is_none()
    }

    /// How the run ended, once it has
    pub fn death_cause(&self) -> Option<DeathCause> {
        self.death
    }

    /// End the run immediately
    pub fn kill(&mut self) {
        self.die(DeathCause::Killed);
    }

    fn die(&mut self, cause: DeathCause) {
        if self.death.is_some() {
            return;
        }
        self.death = Some(cause);
        self.scores.record(self.score());
        log::info!("Ball lost ({:?}) with score {}", cause, self.score());
        self.life.resolve();
    }
}

impl Spawnable for Player {
    fn play(&mut self) -> Signal {
        log::debug!("Ball launched at height {}", self.height);
        self.life.clone()
    }

    fn update(&mut self, frame: &FrameContext<'_>) {
        if !self.is_alive() {
            return;
        }
        let dt = frame.delta_time;
        let tuning = &self.tuning;

        if frame.input.was_tapped() || frame.input.was_key_pressed(KeyCode::Up) {
            self.velocity = tuning.tap_impulse;
        } else {
            self.velocity -= tuning.pull * dt;
        }
        self.velocity = self.velocity.clamp(-tuning.max_speed, tuning.max_speed);
        self.height += self.velocity * dt;
        self.distance += tuning.forward_speed * dt;

        let (floor, ceiling) = (tuning.floor, tuning.ceiling);
        if self.height <= floor {
            self.die(DeathCause::Floor);
        } else if self.height >= ceiling {
            self.die(DeathCause::Ceiling);
        }
    }

    fn position(&self) -> Option<Vec3> {
        Some(Vec3::new(0.0, self.height, 0.0))
    }

    fn collision_shape(&self) -> Option<CollisionShape> {
        Some(CollisionShape::new_box(Vec3::new(BALL_SIZE, BALL_SIZE, BALL_SIZE)))
    }
}
