//! Score-driven difficulty
//!
//! Obstacle speed climbs one step every `speed_every` points while the spawn
//! interval relaxes one step every `interval_every` points. Both are only
//! re-evaluated on multiples of `difficulty_check_every`, and neither ever
//! decreases within a run.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;

/// Scaling curve, fixed for the engine's lifetime
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DifficultyCurve {
    pub base_speed: f32,
    pub speed_step: f32,
    pub speed_every: u64,
    pub base_interval_ms: u32,
    pub interval_step_ms: u32,
    pub interval_every: u64,
    pub check_every: u64,
}

impl DifficultyCurve {
    pub fn from_config(config: &EngineConfig) -> Self {
        Self {
            base_speed: config.base_obstacle_speed,
            speed_step: config.speed_step,
            speed_every: config.speed_every,
            base_interval_ms: config.base_spawn_interval_ms,
            interval_step_ms: config.interval_step_ms,
            interval_every: config.interval_every,
            check_every: config.difficulty_check_every,
        }
    }

    /// Speed the curve asks for at `score`
    pub fn speed_for(&self, score: u64) -> f32 {
        self.base_speed + (score / self.speed_every) as f32 * self.speed_step
    }

    /// Spawn interval the curve asks for at `score`
    pub fn interval_for(&self, score: u64) -> u32 {
        let steps = u32::try_from(score / self.interval_every).unwrap_or(u32::MAX);
        self.base_interval_ms
            .saturating_add(steps.saturating_mul(self.interval_step_ms))
    }

    /// Whether `score` triggers a re-evaluation
    #[inline]
    pub fn is_checkpoint(&self, score: u64) -> bool {
        score > 0 && score % self.check_every == 0
    }
}

/// What changed after a score update
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DifficultyChange {
    /// New spawn interval; the spawn timer must be re-armed
    pub spawn_interval_ms: Option<u32>,
    pub obstacle_speed: Option<f32>,
}

impl DifficultyChange {
    pub fn is_empty(&self) -> bool {
        self.spawn_interval_ms.is_none() && self.obstacle_speed.is_none()
    }
}

/// Live difficulty for the current run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    curve: DifficultyCurve,
    spawn_interval_ms: u32,
    obstacle_speed: f32,
}

impl Difficulty {
    pub fn new(curve: DifficultyCurve) -> Self {
        Self {
            spawn_interval_ms: curve.base_interval_ms,
            obstacle_speed: curve.base_speed,
            curve,
        }
    }

    pub fn spawn_interval_ms(&self) -> u32 {
        self.spawn_interval_ms
    }

    pub fn obstacle_speed(&self) -> f32 {
        self.obstacle_speed
    }

    pub fn curve(&self) -> &DifficultyCurve {
        &self.curve
    }

    /// Back to base values for a new run
    pub fn reset(&mut self) {
        self.spawn_interval_ms = self.curve.base_interval_ms;
        self.obstacle_speed = self.curve.base_speed;
    }

    /// Re-evaluate after the score reached `score`.
    ///
    /// Off-checkpoint scores change nothing. Candidates only replace the
    /// current values when they are strictly larger.
    pub fn on_score(&mut self, score: u64) -> DifficultyChange {
        let mut change = DifficultyChange::default();
        if !self.curve.is_checkpoint(score) {
            return change;
        }

        let interval = self.curve.interval_for(score);
        if interval > self.spawn_interval_ms {
            self.spawn_interval_ms = interval;
            change.spawn_interval_ms = Some(interval);
        }

        let speed = self.curve.speed_for(score);
        if speed > self.obstacle_speed {
            self.obstacle_speed = speed;
            change.obstacle_speed = Some(speed);
        }

        change
    }
}
