//! Platform abstraction layer
//!
//! The engine asks a [`Scheduler`] for two kinds of timers:
//! - a one-shot frame callback (display refresh cadence), re-requested every tick
//! - a periodic interval (obstacle spawning)
//!
//! Schedulers never call into the engine themselves. When a timer fires, the
//! platform driver hands its [`TimerHandle`] to `Engine::on_timer`, and the
//! engine ignores any handle it no longer holds.

pub mod manual;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use manual::ManualScheduler;

use serde::{Deserialize, Serialize};

/// Opaque id of a scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerHandle(pub u64);

/// Source of frame ticks and periodic timers
pub trait Scheduler {
    /// Request a single callback on the next frame
    fn schedule_tick(&mut self) -> TimerHandle;

    /// Request a callback every `period_ms` milliseconds until canceled
    fn schedule_interval(&mut self, period_ms: u32) -> TimerHandle;

    /// Cancel a pending timer. Unknown, fired or already-canceled handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);
}
