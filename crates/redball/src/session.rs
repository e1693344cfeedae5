//! Session controller
//!
//! Runs the endless `ShowingMenu → Playing → ShowingMenu` cycle. Each state
//! owns exactly one transient node: the start menu while showing the menu,
//! the player while playing. The next node is only created after the
//! previous one has been removed, so the two never coexist.
//!
//! The controller itself is a plain state machine. [`SessionController::handle`]
//! applies a resolved signal; [`SessionController::tick`] is the per-frame
//! driver that updates the live component, polls its signal, and applies the
//! transition in the same frame the signal resolves.
//!
//! A fault part-way through a frame or a transition stalls the controller.
//! The fault itself reaches the engine once; later ticks are no-ops.

use redball_engine::events::Signal;
use redball_engine::foundation::math::Vec3;
use redball_engine::input::InputManager;
use redball_engine::physics::CollisionShape;
use redball_engine::scene::{Component, NodeId, Scene, SceneError};
use std::fmt;
use thiserror::Error;

/// Name of the node hosting the start menu
pub const MENU_NODE: &str = "StartMenu";

/// Name of the node hosting the player
pub const ENTITY_NODE: &str = "Aircraft";

/// Per-frame data handed to the live menu or player
pub struct FrameContext<'a> {
    /// Seconds since the previous frame
    pub delta_time: f32,
    /// Input state for this frame
    pub input: &'a InputManager,
}

/// Scene object that blocks the session until the player asks to start
pub trait MenuGate: Component {
    /// Show the menu and return the signal resolved by the start condition
    ///
    /// `is_restart` is false only for the very first presentation.
    fn present_and_wait(&mut self, is_restart: bool) -> Signal;

    /// Observe input for one frame
    fn update(&mut self, frame: &FrameContext<'_>);
}

/// Scene object representing one play-through
pub trait Spawnable: Component {
    /// Start playing and return the life signal, resolved when the run ends
    fn play(&mut self) -> Signal;

    /// Advance gameplay by one frame
    fn update(&mut self, frame: &FrameContext<'_>);

    /// Position to mirror onto the hosting node, if the entity moves
    fn position(&self) -> Option<Vec3> {
        None
    }

    /// Collision volume attached to the hosting node when spawned
    fn collision_shape(&self) -> Option<CollisionShape> {
        None
    }
}

/// Controller states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the start menu to resolve
    ShowingMenu,
    /// Waiting for the player's life to end
    Playing,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ShowingMenu => f.write_str("ShowingMenu"),
            Self::Playing => f.write_str("Playing"),
        }
    }
}

/// Signals fed into the state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    /// The start menu's condition was met
    StartRequested,
    /// The player's life ended
    LifeEnded,
}

/// Session controller errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// `start` was called twice
    #[error("Session already started")]
    AlreadyStarted,

    /// `handle` or `tick` was called before `start`
    #[error("Session not started")]
    NotStarted,

    /// The event does not apply to the current state
    #[error("Event {event:?} is not valid while {state}")]
    UnexpectedEvent {
        /// Current state
        state: SessionState,
        /// Rejected event
        event: SessionEvent,
    },

    /// The event was fed before the live signal resolved
    #[error("Event {0:?} arrived before its signal resolved")]
    SignalPending(SessionEvent),

    /// A previous frame failed part-way; the session no longer advances
    #[error("Session stalled after an earlier fault")]
    Stalled,

    /// Scene graph failure
    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),
}

/// Transient node owned by the current state
#[derive(Debug)]
struct LiveNode {
    node: NodeId,
    signal: Signal,
}

/// Removes a node when dropped unless disarmed
///
/// Guarantees a transient node is torn down when the wait it belongs to ends,
/// or never starts, including when a gate or entity panics and unwinds
/// through the controller.
struct NodeGuard<'a> {
    scene: &'a mut Scene,
    node: Option<NodeId>,
}

impl<'a> NodeGuard<'a> {
    fn new(scene: &'a mut Scene, node: NodeId) -> Self {
        Self { scene, node: Some(node) }
    }

    fn scene(&mut self) -> &mut Scene {
        &mut *self.scene
    }

    /// Keep the node alive
    fn disarm(mut self) {
        self.node = None;
    }

    /// Remove the node now, reporting failures
    fn remove(mut self) -> Result<(), SceneError> {
        match self.node.take() {
            Some(node) => self.scene.remove_node(node),
            None => Ok(()),
        }
    }
}

impl Drop for NodeGuard<'_> {
    fn drop(&mut self) {
        if let Some(node) = self.node.take() {
            if self.scene.remove_node(node).is_ok() {
                log::warn!("Node {:?} removed during abnormal exit", node);
            }
        }
    }
}

type Factory<T> = Box<dyn FnMut() -> T + Send>;

/// Menu/play cycle driver
pub struct SessionController<G: MenuGate, P: Spawnable> {
    state: SessionState,
    first_cycle: bool,
    completed_cycles: u64,
    live: Option<LiveNode>,
    started: bool,
    poisoned: bool,
    stall_logged: bool,
    make_gate: Factory<G>,
    make_entity: Factory<P>,
}

impl<G: MenuGate, P: Spawnable> SessionController<G, P> {
    /// Create a controller building a fresh gate and entity for every cycle
    pub fn new(
        make_gate: impl FnMut() -> G + Send + 'static,
        make_entity: impl FnMut() -> P + Send + 'static,
    ) -> Self {
        Self {
            state: SessionState::ShowingMenu,
            first_cycle: true,
            completed_cycles: 0,
            live: None,
            started: false,
            poisoned: false,
            stall_logged: false,
            make_gate: Box::new(make_gate),
            make_entity: Box::new(make_entity),
        }
    }

    /// Enter the initial `ShowingMenu` state
    pub fn start(&mut self, scene: &mut Scene) -> Result<(), SessionError> {
        if self.started {
            return Err(SessionError::AlreadyStarted);
        }
        self.started = true;
        self.poisoned = true;
        self.show_menu(scene)?;
        self.poisoned = false;
        Ok(())
    }

    /// Apply a resolved signal
    ///
    /// The live node of the finished state is removed before the next state's
    /// node is created. Events that do not match the state, or whose signal
    /// has not resolved, are rejected without side effects.
    pub fn handle(&mut self, scene: &mut Scene, event: SessionEvent) -> Result<SessionState, SessionError> {
        if self.poisoned {
            return Err(SessionError::Stalled);
        }
        let live = self.live.as_ref().ok_or(SessionError::NotStarted)?;

        match (self.state, event) {
            (SessionState::ShowingMenu, SessionEvent::StartRequested)
            | (SessionState::Playing, SessionEvent::LifeEnded) => {}
            (state, event) => return Err(SessionError::UnexpectedEvent { state, event }),
        }
        if !live.signal.is_resolved() {
            return Err(SessionError::SignalPending(event));
        }

        self.poisoned = true;
        let node = live.node;
        self.live = None;
        NodeGuard::new(scene, node).remove()?;

        match self.state {
            SessionState::ShowingMenu => {
                self.first_cycle = false;
                self.spawn_entity(scene)?;
            }
            SessionState::Playing => {
                self.completed_cycles += 1;
                self.show_menu(scene)?;
            }
        }
        self.poisoned = false;
        Ok(self.state)
    }

    /// Drive one frame
    ///
    /// Returns the new state when a transition happened during this frame.
    /// A stalled controller does nothing and reports no transition; the
    /// failure that stalled it was already returned or unwound once.
    pub fn tick(&mut self, scene: &mut Scene, frame: &FrameContext<'_>) -> Result<Option<SessionState>, SessionError> {
        if self.poisoned {
            if !self.stall_logged {
                self.stall_logged = true;
                log::warn!("Session stalled in {}, ignoring further frames", self.state);
            }
            return Ok(None);
        }
        let Some(live) = self.live.as_ref() else {
            return Err(SessionError::NotStarted);
        };
        let node = live.node;
        let signal = live.signal.clone();

        self.poisoned = true;
        let mut guard = NodeGuard::new(scene, node);
        match self.state {
            SessionState::ShowingMenu => {
                guard.scene().component_mut::<G>(node)?.update(frame);
            }
            SessionState::Playing => {
                let entity = guard.scene().component_mut::<P>(node)?;
                entity.update(frame);
                if let Some(position) = entity.position() {
                    guard.scene().node_mut(node)?.set_position(position);
                }
            }
        }
        guard.disarm();
        self.poisoned = false;

        if signal.is_resolved() {
            let event = match self.state {
                SessionState::ShowingMenu => SessionEvent::StartRequested,
                SessionState::Playing => SessionEvent::LifeEnded,
            };
            return self.handle(scene, event).map(Some);
        }
        Ok(None)
    }

    fn show_menu(&mut self, scene: &mut Scene) -> Result<(), SessionError> {
        let is_restart = !self.first_cycle;
        let node = scene.create_child(MENU_NODE);
        let mut guard = NodeGuard::new(scene, node);
        guard.scene().add_component(node, (self.make_gate)())?;
        let signal = guard.scene().component_mut::<G>(node)?.present_and_wait(is_restart);

        self.live = Some(LiveNode { node, signal });
        guard.disarm();
        self.state = SessionState::ShowingMenu;
        log::info!(
            "Cycle {}: showing menu (restart: {})",
            self.completed_cycles + 1,
            is_restart
        );
        Ok(())
    }

    fn spawn_entity(&mut self, scene: &mut Scene) -> Result<(), SessionError> {
        let entity = (self.make_entity)();
        let position = entity.position();
        let shape = entity.collision_shape();

        let node = scene.create_child(ENTITY_NODE);
        let mut guard = NodeGuard::new(scene, node);
        let host = guard.scene().node_mut(node)?;
        if let Some(position) = position {
            host.set_position(position);
        }
        if let Some(shape) = shape {
            host.add_component(shape);
        }
        host.add_component(entity);
        let signal = guard.scene().component_mut::<P>(node)?.play();

        self.live = Some(LiveNode { node, signal });
        guard.disarm();
        self.state = SessionState::Playing;
        log::info!("Cycle {}: playing", self.completed_cycles + 1);
        Ok(())
    }

    /// Current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// True until the first menu has resolved
    pub fn is_first_cycle(&self) -> bool {
        self.first_cycle
    }

    /// Number of finished menu/play cycles
    pub fn completed_cycles(&self) -> u64 {
        self.completed_cycles
    }

    /// Node owned by the current state
    pub fn live_node(&self) -> Option<NodeId> {
        self.live.as_ref().map(|live| live.node)
    }

    /// Whether an earlier fault left the session unable to advance
    pub fn is_stalled(&self) -> bool {
        self.poisoned
    }
}
