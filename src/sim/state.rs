//! Simulation entities and observable state
//!
//! All positions are in playfield units with the origin at the bottom-left
//! corner: x grows to the right, y grows upward from the ground.

use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::config::EngineConfig;

/// Lifecycle of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RunState {
    /// Constructed, never started
    #[default]
    Idle,
    /// Ticks and spawns are armed
    Running,
    /// Stopped by the player; everything frozen in place
    Paused,
    /// Stopped by a collision
    Ended,
}

impl RunState {
    pub fn as_str(&self) -> &'static str {
        match self {
            RunState::Idle => "Idle",
            RunState::Running => "Running",
            RunState::Paused => "Paused",
            RunState::Ended => "Ended",
        }
    }

    /// Overlay text shown while not running
    pub fn status_message(&self) -> Option<&'static str> {
        match self {
            RunState::Idle => Some("Press Start to Play"),
            RunState::Running => None,
            RunState::Paused => Some("Game Paused"),
            RunState::Ended => Some("Press Start to Play Again"),
        }
    }
}

/// The jumping entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Distance of the box bottom above the ground (>= 0)
    pub y: f32,
    /// Vertical velocity, positive is up
    pub vel_y: f32,
    pub airborne: bool,
    /// Fixed left edge
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

impl Player {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            y: 0.0,
            vel_y: 0.0,
            airborne: false,
            x: config.player_x,
            width: config.player_width,
            height: config.player_height,
        }
    }

    /// Back on the ground, at rest
    pub fn reset(&mut self) {
        self.y = 0.0;
        self.vel_y = 0.0;
        self.airborne = false;
    }

    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x, self.y, self.width, self.height)
    }
}

/// A ground-standing block scrolling toward the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Spawn sequence number within the run
    pub id: u32,
    /// Left edge; decreases every tick
    pub x: f32,
    pub width: f32,
    pub height: f32,
}

impl Obstacle {
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.x, 0.0, self.width, self.height)
    }

    /// Right edge has passed the left boundary of the playfield
    #[inline]
    pub fn is_off_screen(&self) -> bool {
        self.x + self.width < 0.0
    }
}

/// Current and best score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScoreState {
    /// Obstacles cleared this run
    pub score: u64,
    /// Highest score seen by this process (seeded from the store)
    pub best: u64,
}

/// Notifications for HUD, audio and alert collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EngineEvent {
    Started,
    Paused,
    ObstacleSpawned { id: u32, height: f32 },
    ObstacleCleared { score: u64 },
    DifficultyRaised { spawn_interval_ms: u32, obstacle_speed: f32 },
    Ended { score: u64, new_best: bool },
}

/// Read-only projection for rendering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub run_state: RunState,
    pub score: u64,
    pub best_score: u64,
    pub player: Aabb,
    pub obstacles: Vec<Aabb>,
    pub obstacle_speed: f32,
    pub spawn_interval_ms: u32,
    pub message: Option<String>,
}
