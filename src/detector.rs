//! Step detection state machine.
//!
//! Turns the delta signal into discrete step events while enforcing a hard
//! refractory (debounce) window between accepted steps:
//! - **Idle**: a delta strictly above the sensitivity threshold, arriving
//!   strictly more than `min_step_interval_ms` after the last accepted
//!   step, is accepted as a step.
//! - **Refractory**: entered on every accepted step. All deltas are
//!   ignored until the window elapses, regardless of how large they are.
//!
//! Both comparisons are strict: a delta exactly equal to the sensitivity,
//! or an elapsed time exactly equal to the interval, does not trigger.
//!
//! The refractory window can be released on two paths: the elapsed-time
//! check on the next sample arrival, or an external timer calling
//! [`StepDetector::release_refractory`]. Both compute the same boolean
//! from the same `last_step_time_ms`, so their ordering is irrelevant.

use tracing::debug;

use crate::types::StepEvent;

/// Step detector with threshold gating and refractory debounce.
///
/// Owns all mutable detection state. The step count accumulates the
/// configured correction per step and is therefore fractional in general;
/// it is monotonically non-decreasing for the detector's entire lifetime.
#[derive(Debug, Clone)]
pub struct StepDetector {
    /// Accumulated step count. Never decreases.
    step_count: f64,

    /// Timestamp of the last accepted step, ms. Zero until the first step.
    last_step_time_ms: u64,

    /// True for exactly `min_step_interval_ms` after an accepted step.
    in_refractory: bool,
}

impl StepDetector {
    /// Creates a detector in the Idle state with a zero count.
    pub fn new() -> Self {
        Self {
            step_count: 0.0,
            last_step_time_ms: 0,
            in_refractory: false,
        }
    }

    /// Processes one delta value at the given arrival time.
    ///
    /// Returns a [`StepEvent`] if the delta was accepted as a step, None
    /// otherwise. O(1), no allocation.
    pub fn process(
        &mut self,
        delta: f64,
        now_ms: u64,
        sensitivity: f64,
        min_step_interval_ms: u64,
        step_correction: f64,
    ) -> Option<StepEvent> {
        let elapsed = now_ms.saturating_sub(self.last_step_time_ms);

        // Leave the refractory window once it has strictly elapsed. The
        // same boolean is computed by release_refractory for timer-driven
        // hosts; whichever path runs first wins harmlessly.
        if self.in_refractory && elapsed > min_step_interval_ms {
            self.in_refractory = false;
        }

        if self.in_refractory {
            // Debounce contract: inputs above the threshold are ignored
            // entirely while the window is open.
            return None;
        }

        if delta > sensitivity && elapsed > min_step_interval_ms {
            self.step_count += step_correction;
            self.last_step_time_ms = now_ms;
            self.in_refractory = true;

            debug!(
                count = self.step_count,
                delta,
                timestamp_ms = now_ms,
                "step accepted"
            );

            return Some(StepEvent {
                new_count: self.step_count,
                delta,
                timestamp_ms: now_ms,
            });
        }

        None
    }

    /// Releases the refractory window if it has elapsed at `now_ms`.
    ///
    /// Intended for hosts that arm a timer for `min_step_interval_ms`
    /// after each accepted step instead of waiting for the next sample.
    /// Flips only the refractory flag; counts and timing are untouched, so
    /// this may run concurrently with the sample path without affecting
    /// the observable outcome.
    pub fn release_refractory(&mut self, now_ms: u64, min_step_interval_ms: u64) {
        if now_ms.saturating_sub(self.last_step_time_ms) > min_step_interval_ms {
            self.in_refractory = false;
        }
    }

    /// The accumulated step count.
    pub fn step_count(&self) -> f64 {
        self.step_count
    }

    /// Timestamp of the last accepted step in milliseconds.
    pub fn last_step_time_ms(&self) -> u64 {
        self.last_step_time_ms
    }

    /// Whether the detector is currently inside a refractory window.
    pub fn in_refractory(&self) -> bool {
        self.in_refractory
    }

    /// Resets all detection state back to Idle with a zero count.
    pub fn reset(&mut self) {
        self.step_count = 0.0;
        self.last_step_time_ms = 0;
        self.in_refractory = false;
    }
}

impl Default for StepDetector {
    fn default() -> Self {
        Self::new()
    }
}
