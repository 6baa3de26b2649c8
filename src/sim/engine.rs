//! Run state machine and per-tick update
//!
//! The engine owns every piece of mutable game state and mediates the
//! physics, obstacle, collision and difficulty steps. Timers come from a
//! [`Scheduler`]; the platform driver reports firings through
//! [`Engine::on_timer`].

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Aabb;
use super::difficulty::{Difficulty, DifficultyCurve};
use super::obstacles::ObstacleField;
use super::physics;
use super::state::{EngineEvent, Obstacle, Player, RunState, ScoreState, Snapshot};
use crate::config::EngineConfig;
use crate::error::ConfigError;
use crate::persistence::ScoreStore;
use crate::platform::{ManualScheduler, Scheduler, TimerHandle};

/// Events kept for hosts that never drain; the oldest are dropped first
pub const MAX_PENDING_EVENTS: usize = 256;

/// The simulation engine
pub struct Engine<S: Scheduler> {
    config: EngineConfig,
    scheduler: S,
    store: Box<dyn ScoreStore>,
    rng: Pcg32,
    run_state: RunState,
    player: Player,
    obstacles: ObstacleField,
    score: ScoreState,
    difficulty: Difficulty,
    /// Pending frame callback while running
    tick_handle: Option<TimerHandle>,
    /// Armed spawn interval while running
    spawn_handle: Option<TimerHandle>,
    /// Ticks simulated in the current run
    ticks: u64,
    events: VecDeque<EngineEvent>,
}

impl<S: Scheduler> Engine<S> {
    /// Build an idle engine. Fails if the config would produce undefined motion.
    pub fn new(
        config: EngineConfig,
        scheduler: S,
        store: Box<dyn ScoreStore>,
    ) -> Result<Self, ConfigError> {
        let rng = Pcg32::from_rng(&mut rand::rng());
        Self::with_rng(config, scheduler, store, rng)
    }

    /// Like [`Engine::new`] with a caller-supplied obstacle RNG
    pub fn with_rng(
        config: EngineConfig,
        scheduler: S,
        store: Box<dyn ScoreStore>,
        rng: Pcg32,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let best = store.load_best_score();
        log::info!("Engine ready (best score {best})");
        Ok(Self {
            player: Player::new(&config),
            difficulty: Difficulty::new(DifficultyCurve::from_config(&config)),
            score: ScoreState { score: 0, best },
            config,
            scheduler,
            store,
            rng,
            run_state: RunState::Idle,
            obstacles: ObstacleField::new(),
            tick_handle: None,
            spawn_handle: None,
            ticks: 0,
            events: VecDeque::new(),
        })
    }

    // === Lifecycle ===

    /// Begin a fresh run. No-op while already running.
    pub fn start(&mut self) {
        if self.run_state == RunState::Running {
            return;
        }
        // should already be disarmed; never leave a stray timer behind
        self.disarm();

        self.player.reset();
        self.obstacles.clear();
        self.score.score = 0;
        self.difficulty.reset();
        self.ticks = 0;

        self.run_state = RunState::Running;
        self.spawn_handle = Some(
            self.scheduler
                .schedule_interval(self.difficulty.spawn_interval_ms()),
        );
        self.tick_handle = Some(self.scheduler.schedule_tick());

        log::info!(
            "Run started (speed {}, spawn every {}ms)",
            self.difficulty.obstacle_speed(),
            self.difficulty.spawn_interval_ms()
        );
        self.push_event(EngineEvent::Started);
    }

    /// Pause the run, freezing everything in place. No-op unless running.
    pub fn stop(&mut self) {
        if self.run_state != RunState::Running {
            return;
        }
        self.disarm();
        self.run_state = RunState::Paused;
        log::info!("Run paused at score {}", self.score.score);
        self.push_event(EngineEvent::Paused);
    }

    /// Start/Stop button behaviour
    pub fn toggle(&mut self) {
        if self.run_state == RunState::Running {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Jump if running and on the ground; otherwise ignored
    pub fn request_jump(&mut self) {
        if self.run_state != RunState::Running {
            return;
        }
        if physics::try_jump(&mut self.player, self.config.jump_impulse) {
            log::trace!("Jump");
        }
    }

    /// Deliver a fired timer. Handles the engine no longer holds are ignored.
    pub fn on_timer(&mut self, handle: TimerHandle) {
        if self.tick_handle == Some(handle) {
            self.tick_handle = None;
            self.tick();
        } else if self.spawn_handle == Some(handle) {
            self.spawn_obstacle();
        } else {
            log::trace!("Ignoring stale timer {handle:?}");
        }
    }

    fn push_event(&mut self, event: EngineEvent) {
        if self.events.len() >= MAX_PENDING_EVENTS {
            self.events.pop_front();
        }
        self.events.push_back(event);
    }

    fn disarm(&mut self) {
        if let Some(handle) = self.tick_handle.take() {
            self.scheduler.cancel(handle);
        }
        if let Some(handle) = self.spawn_handle.take() {
            self.scheduler.cancel(handle);
        }
    }

    // === Simulation steps ===

    fn tick(&mut self) {
        if self.run_state != RunState::Running {
            return;
        }
        self.ticks += 1;

        physics::integrate(&mut self.player, self.config.gravity);

        // sampled once so every obstacle moves the same distance this tick
        let speed = self.difficulty.obstacle_speed();
        let outcome = self.obstacles.advance(speed, &self.player.bounds());

        for _ in 0..outcome.cleared {
            self.award_point();
        }

        if let Some(id) = outcome.collision {
            log::debug!("Collision with obstacle {id}");
            self.end_run();
            return;
        }

        self.tick_handle = Some(self.scheduler.schedule_tick());
    }

    fn spawn_obstacle(&mut self) {
        if self.run_state != RunState::Running {
            return;
        }
        let obstacle = self.obstacles.spawn(&self.config, &mut self.rng);
        let (id, height) = (obstacle.id, obstacle.height);
        log::debug!("Spawned obstacle {id} (height {height:.1})");
        self.push_event(EngineEvent::ObstacleSpawned { id, height });
    }

    fn award_point(&mut self) {
        self.score.score += 1;
        let score = self.score.score;
        self.push_event(EngineEvent::ObstacleCleared { score });

        let change = self.difficulty.on_score(score);
        if change.is_empty() {
            return;
        }

        if let Some(interval) = change.spawn_interval_ms {
            log::info!("Score reached {score}! Increasing obstacle interval to: {interval}ms");
            // re-arm so the pending timer observes the new cadence
            if let Some(handle) = self.spawn_handle.take() {
                self.scheduler.cancel(handle);
            }
            self.spawn_handle = Some(self.scheduler.schedule_interval(interval));
        }
        if let Some(speed) = change.obstacle_speed {
            log::info!("Score reached {score}! Increasing obstacle speed to: {speed}");
        }

        self.push_event(EngineEvent::DifficultyRaised {
            spawn_interval_ms: self.difficulty.spawn_interval_ms(),
            obstacle_speed: self.difficulty.obstacle_speed(),
        });
    }

    fn end_run(&mut self) {
        self.disarm();
        self.run_state = RunState::Ended;

        let score = self.score.score;
        let new_best = score > self.score.best;
        if new_best {
            self.score.best = score;
            self.store.save_best_score(score);
        }

        log::info!("Game Over! Your score was: {score} (best {})", self.score.best);
        self.push_event(EngineEvent::Ended { score, new_best });
    }

    // === Observable state ===

    pub fn score(&self) -> u64 {
        self.score.score
    }

    pub fn best_score(&self) -> u64 {
        self.score.best
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn player_box(&self) -> Aabb {
        self.player.bounds()
    }

    /// Obstacle boxes in spawn order
    pub fn obstacle_boxes(&self) -> Vec<Aabb> {
        self.obstacles.obstacles().iter().map(Obstacle::bounds).collect()
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        self.obstacles.obstacles()
    }

    pub fn difficulty(&self) -> &Difficulty {
        &self.difficulty
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Take all events raised since the last drain
    pub fn drain_events(&mut self) -> Vec<EngineEvent> {
        self.events.drain(..).collect()
    }

    /// Events waiting to be drained
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            run_state: self.run_state,
            score: self.score.score,
            best_score: self.score.best,
            player: self.player_box(),
            obstacles: self.obstacle_boxes(),
            obstacle_speed: self.difficulty.obstacle_speed(),
            spawn_interval_ms: self.difficulty.spawn_interval_ms(),
            message: self.run_state.status_message().map(str::to_string),
        }
    }
}

impl<S: Scheduler> Drop for Engine<S> {
    /// Dropping a running engine must not leave timers armed in the host
    fn drop(&mut self) {
        self.disarm();
    }
}

impl Engine<ManualScheduler> {
    /// Fire every timer due within the next `ms` of virtual time
    pub fn run_for(&mut self, ms: f64) {
        let until = self.scheduler.now_ms() + ms;
        while let Some(handle) = self.scheduler.pop_due(until) {
            self.on_timer(handle);
        }
        self.scheduler.advance_to(until);
    }

    /// Run exactly one frame tick (plus any spawns due before it)
    pub fn step_frame(&mut self) {
        let frame = self.scheduler.frame_ms();
        self.run_for(frame);
    }
}
