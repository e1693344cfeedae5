//! Time management utilities

use std::time::{Duration, Instant};

/// High-precision timer for frame timing
pub struct Timer {
    last_frame: Instant,
    delta_time: f32,
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

impl Timer {
    /// Create a new timer
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            delta_time: 0.0,
        }
    }

    /// Update the timer (should be called once per frame)
    pub fn update(&mut self) {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.advance(elapsed.as_secs_f32());
        self.last_frame = now;
    }

    /// Advance the timer by a fixed step without reading the clock
    pub fn advance(&mut self, delta_time: f32) {
        self.delta_time = delta_time;
    }

    /// Get the time since the last frame in seconds
    pub fn delta_time(&self) -> f32 {
        self.delta_time
    }

    /// Time remaining in the current frame for the given frame rate
    ///
    /// Returns `None` when the frame already took longer than the budget.
    pub fn remaining_budget(&self, target_fps: u32) -> Option<Duration> {
        if target_fps == 0 {
            return None;
        }
        let budget = Duration::from_secs_f64(1.0 / f64::from(target_fps));
        budget.checked_sub(self.last_frame.elapsed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_fixed_advance() {
        let mut timer = Timer::new();
        timer.advance(0.5);
        timer.advance(0.25);

        assert_relative_eq!(timer.delta_time(), 0.25);
    }

    #[test]
    fn test_zero_fps_has_no_budget() {
        let timer = Timer::new();
        assert!(timer.remaining_budget(0).is_none());
    }
}
