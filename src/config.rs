//! Engine tuning and playfield geometry
//!
//! Every field has a default matching the shipped game feel, so partial JSON
//! overrides are enough. Values are validated once at engine construction.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // === Playfield ===
    pub playfield_width: f32,
    pub playfield_height: f32,

    // === Player ===
    /// Fixed left edge of the player box
    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    /// Velocity lost per tick while airborne
    pub gravity: f32,
    /// Velocity set when a jump starts
    pub jump_impulse: f32,

    // === Obstacles ===
    pub obstacle_width: f32,
    /// Height floor; the ceiling is half the playfield height
    pub obstacle_min_height: f32,

    // === Difficulty ===
    pub base_obstacle_speed: f32,
    pub base_spawn_interval_ms: u32,
    pub speed_step: f32,
    pub speed_every: u64,
    pub interval_step_ms: u32,
    pub interval_every: u64,
    pub difficulty_check_every: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,

            player_x: PLAYER_X,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            gravity: GRAVITY,
            jump_impulse: JUMP_IMPULSE,

            obstacle_width: OBSTACLE_WIDTH,
            obstacle_min_height: OBSTACLE_MIN_HEIGHT,

            base_obstacle_speed: BASE_OBSTACLE_SPEED,
            base_spawn_interval_ms: BASE_SPAWN_INTERVAL_MS,
            speed_step: SPEED_STEP,
            speed_every: SPEED_EVERY,
            interval_step_ms: INTERVAL_STEP_MS,
            interval_every: INTERVAL_EVERY,
            difficulty_check_every: DIFFICULTY_CHECK_EVERY,
        }
    }
}

fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConfigError::invalid(
            field,
            format!("must be a positive finite number, got {value}"),
        ));
    }
    Ok(())
}

fn require_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::invalid(
            field,
            format!("must be a non-negative finite number, got {value}"),
        ));
    }
    Ok(())
}

fn require_nonzero(field: &'static str, value: u64) -> Result<(), ConfigError> {
    if value == 0 {
        return Err(ConfigError::invalid(field, "must be greater than zero"));
    }
    Ok(())
}

impl EngineConfig {
    /// Tallest obstacle that can spawn
    #[inline]
    pub fn obstacle_max_height(&self) -> f32 {
        self.playfield_height / 2.0
    }

    /// Reject values that would produce undefined motion
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_positive("playfield_width", self.playfield_width)?;
        require_positive("playfield_height", self.playfield_height)?;

        require_non_negative("player_x", self.player_x)?;
        require_positive("player_width", self.player_width)?;
        require_positive("player_height", self.player_height)?;
        if self.player_x + self.player_width > self.playfield_width {
            return Err(ConfigError::invalid(
                "player_x",
                "player box must fit inside the playfield",
            ));
        }
        if self.player_height >= self.playfield_height {
            return Err(ConfigError::invalid(
                "player_height",
                "player must be shorter than the playfield",
            ));
        }
        require_positive("gravity", self.gravity)?;
        require_positive("jump_impulse", self.jump_impulse)?;

        require_positive("obstacle_width", self.obstacle_width)?;
        require_positive("obstacle_min_height", self.obstacle_min_height)?;
        if self.obstacle_min_height > self.obstacle_max_height() {
            return Err(ConfigError::invalid(
                "obstacle_min_height",
                format!(
                    "must not exceed half the playfield height ({})",
                    self.obstacle_max_height()
                ),
            ));
        }

        require_positive("base_obstacle_speed", self.base_obstacle_speed)?;
        require_nonzero("base_spawn_interval_ms", u64::from(self.base_spawn_interval_ms))?;
        require_non_negative("speed_step", self.speed_step)?;
        require_nonzero("speed_every", self.speed_every)?;
        require_nonzero("interval_every", self.interval_every)?;
        require_nonzero("difficulty_check_every", self.difficulty_check_every)?;

        Ok(())
    }

    /// Parse (possibly partial) JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file and validate it
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "jumper_config";

    /// Load config overrides from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config from LocalStorage");
                        return config;
                    }
                    Err(err) => log::warn!("Ignoring stored config: {err}"),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EngineConfig::from_json(r#"{ "base_obstacle_speed": 5.0 }"#).unwrap();
        assert_eq!(config.base_obstacle_speed, 5.0);
        assert_eq!(config.base_spawn_interval_ms, BASE_SPAWN_INTERVAL_MS);
        assert_eq!(config.playfield_width, PLAYFIELD_WIDTH);
    }

    #[test]
    fn test_rejects_negative_speed() {
        let config = EngineConfig {
            base_obstacle_speed: -1.0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "base_obstacle_speed",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_zero_interval() {
        let err = EngineConfig::from_json(r#"{ "base_spawn_interval_ms": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "base_spawn_interval_ms",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_non_positive_playfield() {
        for (w, h) in [(0.0, 300.0), (800.0, -1.0), (f32::NAN, 300.0)] {
            let config = EngineConfig {
                playfield_width: w,
                playfield_height: h,
                ..Default::default()
            };
            assert!(config.validate().is_err(), "{w}x{h} should be rejected");
        }
    }

    #[test]
    fn test_rejects_min_height_above_half_playfield() {
        let config = EngineConfig {
            playfield_height: 50.0,
            player_height: 20.0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "obstacle_min_height",
                ..
            }
        ));
    }

    #[test]
    fn test_malformed_json() {
        let err = EngineConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
