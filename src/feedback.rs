//! Milestone feedback policy.
//!
//! Decides whether an updated step count warrants a periodic notification
//! (audio or haptic, rendered elsewhere). The policy is a pure decision:
//! it emits at most one event per integer count value and never performs
//! side effects itself.
//!
//! Known quirk, kept deliberately: the step count accumulates the
//! configured correction, so with a correction other than 1.0 a single
//! step can advance the integer count past a multiple of the interval
//! (correction 1.3 stepping 9.75 → 11.05 skips the 10 milestone). A
//! milestone that is jumped over is silently missed; rounding differently
//! would change the reference behavior.

use crate::types::FeedbackEvent;

/// Milestone decision logic.
#[derive(Debug, Clone, Copy)]
pub struct FeedbackPolicy;

impl FeedbackPolicy {
    /// Decides whether the updated count crosses a notification milestone.
    ///
    /// Fires iff `floor(new_count)` is a positive multiple of
    /// `notification_interval` and differs from `prev_integer_count` (the
    /// integer count before the update). The inequality guard prevents
    /// repeated firing while fractional corrections hold the integer count
    /// at the same value across several steps.
    pub fn check(
        prev_integer_count: u32,
        new_count: f64,
        notification_interval: u32,
    ) -> Option<FeedbackEvent> {
        let n = new_count.floor() as u32;

        if n > 0 && n % notification_interval == 0 && n != prev_integer_count {
            Some(FeedbackEvent {
                multiple: notification_interval,
            })
        } else {
            None
        }
    }
}
