//! Jumper - a side-scrolling jump-over-obstacles minigame
//!
//! Core modules:
//! - `sim`: Simulation engine (run lifecycle, physics, obstacles, collisions, difficulty)
//! - `platform`: Tick/interval scheduling (virtual clock natively, browser timers on web)
//! - `persistence`: Best score storage
//! - `config`: Data-driven game tuning

pub mod config;
pub mod error;
pub mod persistence;
pub mod platform;
pub mod sim;

pub use config::EngineConfig;
pub use error::ConfigError;
pub use persistence::{MemoryStore, NoStore, ScoreStore};
pub use platform::{ManualScheduler, Scheduler, TimerHandle};
pub use sim::{Engine, RunState};

/// Default tuning constants
pub mod consts {
    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 300.0;

    /// Player box; horizontal position is fixed for the whole run
    pub const PLAYER_X: f32 = 100.0;
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;

    /// Downward velocity change per tick (not time-scaled)
    pub const GRAVITY: f32 = 0.9;
    /// Upward velocity set by a jump
    pub const JUMP_IMPULSE: f32 = 28.0;

    /// Obstacle defaults
    pub const OBSTACLE_WIDTH: f32 = 20.0;
    pub const OBSTACLE_MIN_HEIGHT: f32 = 30.0;

    /// Difficulty base values
    pub const BASE_OBSTACLE_SPEED: f32 = 3.0;
    pub const BASE_SPAWN_INTERVAL_MS: u32 = 2100;

    /// Speed gains `SPEED_STEP` every `SPEED_EVERY` points
    pub const SPEED_STEP: f32 = 1.0;
    pub const SPEED_EVERY: u64 = 10;
    /// Spawn interval grows by `INTERVAL_STEP_MS` every `INTERVAL_EVERY` points
    pub const INTERVAL_STEP_MS: u32 = 50;
    pub const INTERVAL_EVERY: u64 = 20;
    /// Difficulty is only re-evaluated on multiples of this score
    pub const DIFFICULTY_CHECK_EVERY: u64 = 10;

    /// Display refresh cadence assumed by the virtual clock (60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
}
