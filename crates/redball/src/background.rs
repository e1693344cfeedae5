//! Parallax background
//!
//! A handful of layers scroll at different speeds behind the ball. Layer
//! depths and speeds are generated from a fixed seed so every run looks the
//! same.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use redball_engine::scene::Component;

const LAYER_COUNT: usize = 4;
const LAYER_WIDTH: f32 = 64.0;
const BACKGROUND_SEED: u64 = 0x00BA_11ED;

/// One scrolling layer
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Distance behind the camera plane
    pub depth: f32,
    /// Scroll speed in units per second
    pub speed: f32,
    /// Current horizontal offset, wrapped to the layer width
    pub offset: f32,
}

/// Scrolling background attached to the scene root
#[derive(Debug)]
pub struct Background {
    layers: Vec<Layer>,
    started: bool,
}

impl Component for Background {}

impl Background {
    /// Create a stopped background
    pub fn new() -> Self {
        let mut rng = StdRng::seed_from_u64(BACKGROUND_SEED);
        let layers = (0..LAYER_COUNT)
            .map(|i| {
                let depth = 20.0 + 15.0 * i as f32;
                Layer {
                    depth,
                    // Farther layers scroll slower
                    speed: rng.gen_range(2.0..4.0) * 20.0 / depth,
                    offset: rng.gen_range(0.0..LAYER_WIDTH),
                }
            })
            .collect();
        Self { layers, started: false }
    }

    /// Start scrolling; calling again has no effect
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        log::debug!("Background started with {} layers", self.layers.len());
    }

    /// Whether the background is scrolling
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Advance layer offsets
    pub fn update(&mut self, delta_time: f32) {
        if !self.started {
            return;
        }
        for layer in &mut self.layers {
            layer.offset = (layer.offset + layer.speed * delta_time).rem_euclid(LAYER_WIDTH);
        }
    }

    /// Layers, nearest first
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_layers_are_deterministic() {
        assert_eq!(Background::new().layers(), Background::new().layers());
    }

    #[test]
    fn test_stopped_background_does_not_move() {
        let mut background = Background::new();
        let before = background.layers().to_vec();
        background.update(1.0);
        assert_eq!(background.layers(), before.as_slice());
    }

    #[test]
    fn test_nearer_layers_scroll_faster_per_depth() {
        let background = Background::new();
        for layer in background.layers() {
            assert!(layer.speed > 0.0);
            assert!(layer.offset >= 0.0 && layer.offset < LAYER_WIDTH);
        }
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut background = Background::new();
        background.start();
        background.start();
        assert!(background.is_started());

        let before = background.layers()[0].clone();
        background.update(0.5);
        let after = &background.layers()[0];
        let expected = (before.offset + before.speed * 0.5).rem_euclid(LAYER_WIDTH);
        assert_relative_eq!(after.offset, expected, epsilon = 1e-4);
    }
}
