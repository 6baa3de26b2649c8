//! Virtual-clock scheduler
//!
//! Time only moves when the driver asks for due timers, which makes runs
//! reproducible in tests and lets the native demo simulate minutes of play
//! instantly.

use super::{Scheduler, TimerHandle};
use crate::consts::FRAME_MS;

#[derive(Debug, Clone)]
struct PendingTimer {
    handle: TimerHandle,
    due_ms: f64,
    /// `None` for one-shot frame callbacks
    period_ms: Option<f64>,
}

/// Deterministic scheduler driven by explicit time advancement
#[derive(Debug, Clone)]
pub struct ManualScheduler {
    now_ms: f64,
    frame_ms: f64,
    pending: Vec<PendingTimer>,
    next_id: u64,
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new(FRAME_MS)
    }
}

impl ManualScheduler {
    /// Panics unless `frame_ms` is positive and finite; a zero-length frame
    /// would never let the clock move past the next tick.
    pub fn new(frame_ms: f64) -> Self {
        assert!(
            frame_ms.is_finite() && frame_ms > 0.0,
            "frame period must be positive and finite, got {frame_ms}"
        );
        Self {
            now_ms: 0.0,
            frame_ms,
            pending: Vec::new(),
            next_id: 1,
        }
    }

    /// Current virtual time
    pub fn now_ms(&self) -> f64 {
        self.now_ms
    }

    pub fn frame_ms(&self) -> f64 {
        self.frame_ms
    }

    /// Number of armed timers
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    pub fn is_pending(&self, handle: TimerHandle) -> bool {
        self.pending.iter().any(|t| t.handle == handle)
    }

    /// Period of an armed interval, `None` for frames or unknown handles
    pub fn interval_period(&self, handle: TimerHandle) -> Option<f64> {
        self.pending
            .iter()
            .find(|t| t.handle == handle)
            .and_then(|t| t.period_ms)
    }

    /// Pop the earliest timer due at or before `until_ms`, moving the clock to it.
    ///
    /// Ties resolve in scheduling order. Intervals are re-armed for their next
    /// period; frame callbacks are consumed.
    pub fn pop_due(&mut self, until_ms: f64) -> Option<TimerHandle> {
        let idx = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, t)| t.due_ms <= until_ms)
            .min_by(|(_, a), (_, b)| {
                a.due_ms
                    .partial_cmp(&b.due_ms)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.handle.cmp(&b.handle))
            })
            .map(|(i, _)| i)?;

        let PendingTimer {
            handle,
            due_ms,
            period_ms,
        } = self.pending[idx];
        self.now_ms = self.now_ms.max(due_ms);
        match period_ms {
            Some(period) => self.pending[idx].due_ms += period,
            None => {
                self.pending.remove(idx);
            }
        }
        Some(handle)
    }

    /// Move the clock forward without firing anything
    pub fn advance_to(&mut self, until_ms: f64) {
        self.now_ms = self.now_ms.max(until_ms);
    }

    fn next_handle(&mut self) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        handle
    }
}

impl Scheduler for ManualScheduler {
    fn schedule_tick(&mut self) -> TimerHandle {
        let handle = self.next_handle();
        self.pending.push(PendingTimer {
            handle,
            due_ms: self.now_ms + self.frame_ms,
            period_ms: None,
        });
        handle
    }

    fn schedule_interval(&mut self, period_ms: u32) -> TimerHandle {
        let handle = self.next_handle();
        let period = f64::from(period_ms);
        self.pending.push(PendingTimer {
            handle,
            due_ms: self.now_ms + period,
            period_ms: Some(period),
        });
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|t| t.handle != handle);
    }
}
