//! Simulation module
//!
//! All gameplay logic lives here:
//! - One authoritative tick moves the player and every obstacle
//! - Obstacles iterate in spawn order
//! - No rendering or platform dependencies; timers come through `Scheduler`

pub mod autopilot;
pub mod collision;
pub mod difficulty;
pub mod engine;
pub mod obstacles;
pub mod physics;
pub mod state;

pub use collision::Aabb;
pub use difficulty::{Difficulty, DifficultyChange, DifficultyCurve};
pub use engine::Engine;
pub use obstacles::{AdvanceOutcome, ObstacleField};
pub use state::{EngineEvent, Obstacle, Player, RunState, ScoreState, Snapshot};
