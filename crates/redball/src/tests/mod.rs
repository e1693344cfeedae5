//! End-to-end lifecycle tests running the game on a real engine

use crate::bootstrap::{SceneFixtures, FXAA_TAG, MAIN_VIEWPORT};
use crate::config::GameConfig;
use crate::game::RedBallGame;
use crate::menu::StartMenu;
use crate::player::{Player, ScoreBoard};
use crate::session::{FrameContext, SessionController, SessionState, Spawnable, ENTITY_NODE};
use redball_engine::events::Signal;
use redball_engine::fault::{FaultHook, FaultPolicy, FaultStage};
use redball_engine::input::KeyCode;
use redball_engine::platform::Platform;
use redball_engine::scene::{Component, Scene};
use redball_engine::{AppError, AppEvent, Application, Engine, EngineError};
use std::sync::Arc;

const FRAME: f32 = 1.0 / 60.0;

fn test_config(platform: Platform) -> GameConfig {
    let mut config = GameConfig::default();
    config.runtime.platform = Some(platform);
    config.runtime.target_fps = 0;
    config.menu.restart_arming_delay = 0.0;
    config
}

fn handled_hook() -> Arc<FaultHook> {
    Arc::new(FaultHook::new(FaultPolicy::default()))
}

fn start_game(config: GameConfig) -> (Engine, RedBallGame) {
    let mut engine = Engine::new(config.engine_config(), handled_hook()).unwrap();
    let mut game = RedBallGame::new(config);
    engine.start(&mut game).unwrap();
    (engine, game)
}

fn tap(engine: &mut Engine, game: &mut RedBallGame) {
    engine.queue_event(AppEvent::Tap);
    engine.run_frame(game, FRAME).unwrap();
}

fn live_menu(game: &RedBallGame) -> &StartMenu {
    let node = game.session().live_node().unwrap();
    game.scene().unwrap().component::<StartMenu>(node).unwrap()
}

fn kill_player(engine: &mut Engine, game: &mut RedBallGame) {
    let node = game.session().live_node().unwrap();
    game.scene_mut().unwrap().component_mut::<Player>(node).unwrap().kill();
    engine.run_frame(game, FRAME).unwrap();
}

fn assert_one_transient(scene: &Scene) {
    let menus = scene.nodes_with_component::<StartMenu>().len();
    let players = scene.nodes_with_component::<Player>().len();
    assert_eq!(menus + players, 1, "menus: {menus}, players: {players}");
}

#[test]
fn test_first_menu_then_restart_menu() {
    let (mut engine, mut game) = start_game(test_config(Platform::Linux));

    assert_eq!(game.session().state(), SessionState::ShowingMenu);
    assert!(!live_menu(&game).is_restart());
    assert_eq!(live_menu(&game).prompt(), "Tap to start");

    tap(&mut engine, &mut game);
    assert_eq!(game.session().state(), SessionState::Playing);
    let aircraft = game.session().live_node().unwrap();
    assert_eq!(game.scene().unwrap().node(aircraft).unwrap().name(), ENTITY_NODE);

    kill_player(&mut engine, &mut game);
    assert_eq!(game.session().state(), SessionState::ShowingMenu);
    assert!(live_menu(&game).is_restart());
    assert!(live_menu(&game).prompt().starts_with("You died!"));
    assert!(!game.scene().unwrap().contains(aircraft));
}

#[test]
fn test_hundred_cycles_keep_scene_stable() {
    let (mut engine, mut game) = start_game(test_config(Platform::Linux));
    let fixtures = game.fixtures().unwrap();

    for cycle in 0..100 {
        tap(&mut engine, &mut game);
        assert_eq!(game.session().state(), SessionState::Playing, "cycle {cycle}");
        assert_one_transient(game.scene().unwrap());

        kill_player(&mut engine, &mut game);
        assert_eq!(game.session().state(), SessionState::ShowingMenu, "cycle {cycle}");
        assert!(live_menu(&game).is_restart(), "cycle {cycle}");
        assert_one_transient(game.scene().unwrap());

        let scene = game.scene().unwrap();
        assert_eq!(scene.node_count(), SceneFixtures::NODE_COUNT + 1);
        assert!(fixtures.nodes().iter().all(|node| scene.contains(*node)));
    }

    assert_eq!(game.session().completed_cycles(), 100);
    assert_eq!(game.fixtures(), Some(fixtures));
    assert_eq!(engine.fault_hook().handled_count(), 0);
}

#[test]
fn test_ball_dies_on_its_own_and_score_is_shown() {
    let (mut engine, mut game) = start_game(test_config(Platform::Linux));
    tap(&mut engine, &mut game);

    let mut frames = 0;
    while game.session().state() == SessionState::Playing && frames < 1000 {
        engine.run_frame(&mut game, FRAME).unwrap();
        frames += 1;
    }

    assert_eq!(game.session().state(), SessionState::ShowingMenu);
    let score = game.scores().last();
    assert!(score > 0);
    assert!(live_menu(&game).prompt().contains(&format!("Score {score}")));
}

#[test]
fn test_platform_decides_fxaa() {
    let (engine, _game) = start_game(test_config(Platform::Android));
    let path = engine.renderer.viewport(MAIN_VIEWPORT).unwrap().render_path();
    assert!(!path.contains_tag(FXAA_TAG));

    for platform in [Platform::Linux, Platform::Windows] {
        let (engine, _game) = start_game(test_config(platform));
        let path = engine.renderer.viewport(MAIN_VIEWPORT).unwrap().render_path();
        assert!(path.contains_tag(FXAA_TAG), "{platform}");
    }
}

#[test]
fn test_debug_boxes_follow_keys() {
    let (mut engine, mut game) = start_game(test_config(Platform::Linux));
    tap(&mut engine, &mut game);

    engine.queue_event(AppEvent::KeyPressed(KeyCode::C));
    engine.run_frame(&mut game, FRAME).unwrap();
    let scene = game.scene().unwrap();
    assert_eq!(scene.nodes_with_component::<redball_engine::debug::DebugBox>().len(), 1);

    engine.queue_event(AppEvent::KeyReleased(KeyCode::C));
    engine.queue_event(AppEvent::KeyPressed(KeyCode::V));
    engine.run_frame(&mut game, FRAME).unwrap();
    let scene = game.scene().unwrap();
    assert!(scene.nodes_with_component::<redball_engine::debug::DebugBox>().is_empty());
}

#[test]
fn test_escape_quits() {
    let (mut engine, mut game) = start_game(test_config(Platform::Linux));
    engine.queue_event(AppEvent::KeyPressed(KeyCode::Escape));
    engine.run_frame(&mut game, FRAME).unwrap();
    assert!(!engine.is_running());
}

#[test]
fn test_run_loop_honors_frame_limit() {
    let mut config = test_config(Platform::Linux);
    config.runtime.max_frames = Some(5);
    let mut engine = Engine::new(config.engine_config(), handled_hook()).unwrap();
    let mut game = RedBallGame::new(config);

    engine.queue_event(AppEvent::Tap);
    engine.run_app(&mut game).unwrap();

    assert_eq!(engine.frame_count(), 5);
    assert_eq!(game.session().state(), SessionState::Playing);
}

/// Entity that blows up on its first frame of play
struct Bomb {
    life: Signal,
}

impl Component for Bomb {}

impl Spawnable for Bomb {
    fn play(&mut self) -> Signal {
        self.life.clone()
    }

    fn update(&mut self, _frame: &FrameContext<'_>) {
        panic!("bomb went off");
    }
}

struct BombGame {
    scene: Scene,
    session: SessionController<StartMenu, Bomb>,
}

impl BombGame {
    fn new() -> Self {
        let config = test_config(Platform::Linux);
        let scores = ScoreBoard::new();
        Self {
            scene: Scene::new(),
            session: SessionController::new(
                move || StartMenu::new(config.menu.clone(), scores.clone()),
                || Bomb { life: Signal::new() },
            ),
        }
    }
}

impl Application for BombGame {
    fn initialize(&mut self, _engine: &mut Engine) -> Result<(), AppError> {
        self.session
            .start(&mut self.scene)
            .map_err(|e| AppError::GameLogic(Box::new(e)))
    }

    fn update(&mut self, engine: &mut Engine, delta_time: f32) -> Result<(), AppError> {
        let frame = FrameContext {
            delta_time,
            input: &engine.input,
        };
        self.session.tick(&mut self.scene, &frame)?;
        Ok(())
    }
}

#[test]
fn test_fault_during_play_is_handled_and_loop_survives() {
    let hook = handled_hook();
    let mut engine = Engine::new(test_config(Platform::Linux).engine_config(), Arc::clone(&hook)).unwrap();
    let mut game = BombGame::new();
    engine.start(&mut game).unwrap();

    engine.queue_event(AppEvent::Tap);
    engine.run_frame(&mut game, FRAME).unwrap();
    let bomb = game.session.live_node().unwrap();

    engine.run_frame(&mut game, FRAME).unwrap();
    assert_eq!(hook.handled_count(), 1);
    let fault = hook.last_fault().unwrap();
    assert_eq!(fault.stage, FaultStage::Update);
    assert!(fault.panicked);

    assert!(engine.is_running());
    assert_eq!(engine.frame_count(), 2);
    assert!(!game.scene.contains(bomb));
    assert!(game.session.is_stalled());

    for _ in 0..99 {
        engine.run_frame(&mut game, FRAME).unwrap();
    }
    assert_eq!(hook.handled_count(), 1);
    assert!(engine.is_running());
    assert_eq!(engine.frame_count(), 101);
}

#[test]
fn test_fault_breaks_loop_under_debugger_policy() {
    let hook = Arc::new(FaultHook::new(FaultPolicy { break_on_fault: true }));
    let mut engine = Engine::new(test_config(Platform::Linux).engine_config(), Arc::clone(&hook)).unwrap();
    let mut game = BombGame::new();
    engine.start(&mut game).unwrap();

    engine.queue_event(AppEvent::Tap);
    engine.run_frame(&mut game, FRAME).unwrap();

    let result = engine.run_frame(&mut game, FRAME);
    assert!(matches!(result, Err(EngineError::Fault(_))));
    assert_eq!(hook.handled_count(), 0);
}
