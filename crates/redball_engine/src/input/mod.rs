//! Input management system
//!
//! Tracks held keys plus per-frame edges (key presses and screen taps). Edges
//! are cleared by [`InputManager::end_frame`], which the engine calls after
//! every update.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Input manager
#[derive(Debug, Default)]
pub struct InputManager {
    held: HashSet<KeyCode>,
    pressed_this_frame: HashSet<KeyCode>,
    taps_this_frame: u32,
}

impl InputManager {
    /// Create a new input manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle key input
    pub fn handle_key_input(&mut self, key: KeyCode, pressed: bool) {
        if pressed {
            if self.held.insert(key) {
                self.pressed_this_frame.insert(key);
            }
        } else {
            self.held.remove(&key);
        }
    }

    /// Handle a touch tap (or primary click)
    pub fn handle_tap(&mut self) {
        self.taps_this_frame += 1;
    }

    /// Key is currently held
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Key went down during this frame
    pub fn was_key_pressed(&self, key: KeyCode) -> bool {
        self.pressed_this_frame.contains(&key)
    }

    /// At least one tap arrived during this frame
    pub fn was_tapped(&self) -> bool {
        self.taps_this_frame > 0
    }

    /// Number of taps during this frame
    pub fn tap_count(&self) -> u32 {
        self.taps_this_frame
    }

    /// A tap or the given start key arrived during this frame
    pub fn any_start_input(&self, start_key: KeyCode) -> bool {
        self.was_tapped() || self.was_key_pressed(start_key)
    }

    /// Clear per-frame edges
    pub fn end_frame(&mut self) {
        self.pressed_this_frame.clear();
        self.taps_this_frame = 0;
    }
}

/// Key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    /// Space bar
    Space,
    /// Escape
    Escape,
    /// Up arrow
    Up,
    /// C key
    C,
    /// V key
    V,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_edge_and_hold() {
        let mut input = InputManager::new();
        input.handle_key_input(KeyCode::Space, true);
        assert!(input.was_key_pressed(KeyCode::Space));
        assert!(input.is_key_down(KeyCode::Space));

        input.end_frame();
        assert!(!input.was_key_pressed(KeyCode::Space));
        assert!(input.is_key_down(KeyCode::Space));

        // Auto-repeat while held is not a new press
        input.handle_key_input(KeyCode::Space, true);
        assert!(!input.was_key_pressed(KeyCode::Space));

        input.handle_key_input(KeyCode::Space, false);
        assert!(!input.is_key_down(KeyCode::Space));
    }

    #[test]
    fn test_taps_reset_each_frame() {
        let mut input = InputManager::new();
        input.handle_tap();
        input.handle_tap();
        assert!(input.was_tapped());
        assert_eq!(input.tap_count(), 2);
        assert!(input.any_start_input(KeyCode::Space));

        input.end_frame();
        assert!(!input.was_tapped());
    }
}
