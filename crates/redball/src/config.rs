//! Game configuration
//!
//! Loaded from `redball.toml` or `redball.ron` in the working directory when
//! present; every section falls back to its defaults when omitted.

use redball_engine::config::{Config, ConfigError};
use redball_engine::input::KeyCode;
use redball_engine::platform::Platform;
use redball_engine::{AssetConfig, EngineConfig, Orientation, WindowConfig};
use serde::{Deserialize, Serialize};

/// Files probed for configuration, in order
pub const CONFIG_CANDIDATES: [&str; 2] = ["redball.toml", "redball.ron"];

/// Game configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Window and asset options consumed at construction time
    pub options: ApplicationOptions,

    /// Player tuning
    pub gameplay: GameplayConfig,

    /// Start menu behavior
    pub menu: MenuConfig,

    /// Run-loop settings
    pub runtime: RuntimeConfig,
}

/// Application options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationOptions {
    /// Asset root folder
    pub asset_root: String,

    /// Canvas height
    pub height: u32,

    /// Canvas width
    pub width: u32,

    /// Screen orientation
    pub orientation: Orientation,
}

/// Player tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayConfig {
    /// Downward acceleration the ball applies to itself (units/s²)
    pub pull: f32,

    /// Upward speed set by a tap (units/s)
    pub tap_impulse: f32,

    /// Terminal speed in either direction (units/s)
    pub max_speed: f32,

    /// Forward speed used for scoring (units/s)
    pub forward_speed: f32,

    /// Height below which the ball is lost
    pub floor: f32,

    /// Height above which the ball hits the ceiling
    pub ceiling: f32,

    /// Height the ball spawns at
    pub spawn_height: f32,
}

/// Start menu behavior
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Key that starts a run (taps always do)
    pub start_key: KeyCode,

    /// Seconds the restart menu ignores input after a death
    pub restart_arming_delay: f32,

    /// Start automatically after this many armed seconds
    pub auto_start_delay: Option<f32>,
}

/// Run-loop settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Target frames per second, 0 for unpaced
    pub target_fps: u32,

    /// Stop after this many frames
    pub max_frames: Option<u64>,

    /// Default log filter
    pub log_level: String,

    /// Force a platform instead of detecting it
    pub platform: Option<Platform>,
}

impl Default for ApplicationOptions {
    fn default() -> Self {
        Self {
            asset_root: "Data".to_string(),
            height: 1024,
            width: 576,
            orientation: Orientation::Portrait,
        }
    }
}

impl Default for GameplayConfig {
    fn default() -> Self {
        Self {
            pull: 12.0,
            tap_impulse: 6.0,
            max_speed: 15.0,
            forward_speed: 5.0,
            floor: -8.0,
            ceiling: 8.0,
            spawn_height: 0.0,
        }
    }
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            start_key: KeyCode::Space,
            restart_arming_delay: 0.5,
            auto_start_delay: None,
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            max_frames: None,
            log_level: "info".to_string(),
            platform: None,
        }
    }
}

impl Config for GameConfig {}

impl GameConfig {
    /// Load the first config file found, or defaults, and validate it
    pub fn load_or_default() -> Result<Self, ConfigError> {
        let config = Self::load_first_or_default(&CONFIG_CANDIDATES)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        let gameplay = &self.gameplay;
        if gameplay.floor >= gameplay.ceiling {
            return Err(invalid("gameplay.floor", format!(
                "floor {} must be below ceiling {}",
                gameplay.floor, gameplay.ceiling
            )));
        }
        if gameplay.spawn_height <= gameplay.floor || gameplay.spawn_height >= gameplay.ceiling {
            return Err(invalid("gameplay.spawn_height", "spawn height must lie between floor and ceiling".to_string()));
        }
        if gameplay.pull < 0.0 {
            return Err(invalid("gameplay.pull", "pull cannot be negative".to_string()));
        }
        if gameplay.tap_impulse <= 0.0 || gameplay.max_speed <= 0.0 {
            return Err(invalid("gameplay.tap_impulse", "tap impulse and max speed must be positive".to_string()));
        }
        if self.menu.restart_arming_delay < 0.0 {
            return Err(invalid("menu.restart_arming_delay", "delay cannot be negative".to_string()));
        }
        if self.menu.auto_start_delay.is_some_and(|delay| delay <= 0.0) {
            return Err(invalid("menu.auto_start_delay", "auto start delay must be positive".to_string()));
        }
        self.engine_config().validate()
    }

    /// Engine configuration derived from the application options
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            window: WindowConfig {
                title: "RedBall".to_string(),
                width: self.options.width,
                height: self.options.height,
                orientation: self.options.orientation,
            },
            assets: AssetConfig {
                root: self.options.asset_root.clone(),
            },
            target_fps: self.runtime.target_fps,
            max_frames: self.runtime.max_frames,
            log_level: self.runtime.log_level.clone(),
            platform: self.runtime.platform,
        }
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let config = GameConfig::default();
        assert_eq!(config.options.asset_root, "Data");
        assert_eq!(config.options.height, 1024);
        assert_eq!(config.options.width, 576);
        assert_eq!(config.options.orientation, Orientation::Portrait);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_engine_config_mapping() {
        let mut config = GameConfig::default();
        config.runtime.platform = Some(Platform::Android);
        config.runtime.max_frames = Some(10);

        let engine = config.engine_config();
        assert_eq!(engine.window.width, 576);
        assert_eq!(engine.window.height, 1024);
        assert_eq!(engine.assets.root, "Data");
        assert_eq!(engine.platform, Some(Platform::Android));
        assert_eq!(engine.max_frames, Some(10));
    }

    #[test]
    fn test_rejects_inverted_bounds() {
        let mut config = GameConfig::default();
        config.gameplay.floor = 10.0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid { field: "gameplay.floor", .. })));
    }

    #[test]
    fn test_rejects_zero_auto_start() {
        let mut config = GameConfig::default();
        config.menu.auto_start_delay = Some(0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let path = std::env::temp_dir().join(format!("redball_partial_{}.toml", std::process::id()));
        std::fs::write(&path, "[menu]\nauto_start_delay = 2.0\n").unwrap();

        let config = GameConfig::load_from_file(&path).unwrap();
        assert_eq!(config.menu.auto_start_delay, Some(2.0));
        assert_eq!(config.options, ApplicationOptions::default());
        let _ = std::fs::remove_file(&path);
    }
}
