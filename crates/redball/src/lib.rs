//! # RedBall
//!
//! A one-button arcade game: keep the red ball in the air by tapping. The
//! game alternates forever between a start menu and a play-through, with
//! exactly one of the two alive in the scene at any time.

#![warn(missing_docs)]

pub mod background;
pub mod bootstrap;
pub mod config;
pub mod game;
pub mod menu;
pub mod player;
pub mod session;
pub mod stdin_input;

#[cfg(test)]
mod tests;

pub use config::GameConfig;
pub use game::RedBallGame;
