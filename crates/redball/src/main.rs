//! RedBall entry point

use redball::{stdin_input, GameConfig, RedBallGame};
use redball_engine::fault::{self, FaultPolicy};
use redball_engine::foundation::logging;
use redball_engine::Engine;
use std::sync::mpsc;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = GameConfig::load_or_default()?;
    logging::init_with_level(&config.runtime.log_level);

    let policy = FaultPolicy::detect();
    if policy.break_on_fault {
        log::info!("Debugger attached, faults will stop the game");
    }
    let hook = fault::install(policy)?;
    std::thread::yield_now();

    println!("=== RedBall ===");
    println!("Controls:");
    println!("  ENTER - Tap (start / jump)");
    println!("  c     - Show collision boxes");
    println!("  v     - Hide collision boxes");
    println!("  q     - Quit");
    println!();

    let (events, source) = mpsc::channel();
    stdin_input::spawn(events)?;

    let mut engine = Engine::new(config.engine_config(), hook)?;
    engine.attach_event_source(source);

    let mut game = RedBallGame::new(config);
    engine.run_app(&mut game)?;
    Ok(())
}
