//! Signal filtering and delta extraction.
//!
//! This module provides the low-level per-sample signal processing:
//! - Single-pole IIR low-pass filtering, applied independently per axis
//! - Delta magnitude extraction (the step-detection signal)
//!
//! Design note: All filtering is incremental (O(1) per sample). No batch
//! processing, no allocations in hot paths.
//!
//! Why the delta of *filtered* vectors: gravity is present in both the
//! previous and the new filtered vector, so it cancels in the difference.
//! The delta therefore captures short-term acceleration change magnitude
//! independent of device orientation.

use crate::types::Sample;

/// The last filtered acceleration vector, one value per axis.
///
/// Owned exclusively by the engine and mutated once per processed sample.
/// Initialized to zero; the filter converges toward the live signal within
/// a few dozen samples at typical sensor rates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FilterState {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl FilterState {
    /// Creates a zeroed filter state.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Single-pole exponential low-pass filter.
///
/// Per axis: `filtered = alpha * prev + (1 - alpha) * raw`. Causal and
/// stateful; `alpha` close to 1 yields heavier smoothing and slower
/// response.
///
/// The filter itself accepts any finite input. Non-finite samples must be
/// rejected upstream by the engine; they never reach this code.
#[derive(Debug, Clone, Copy)]
pub struct LowPassFilter;

impl LowPassFilter {
    /// Applies one filter step, returning the new state.
    ///
    /// Pure with respect to its inputs; the caller owns and replaces the
    /// state. This keeps the hot path trivially testable.
    pub fn apply(prev: FilterState, sample: &Sample, alpha: f64) -> FilterState {
        FilterState {
            x: alpha * prev.x + (1.0 - alpha) * sample.x,
            y: alpha * prev.y + (1.0 - alpha) * sample.y,
            z: alpha * prev.z + (1.0 - alpha) * sample.z,
        }
    }
}

/// Computes the delta signal between two consecutive filtered vectors.
///
/// Euclidean norm of the per-axis difference. Always non-negative and
/// finite given finite inputs. This is the only scalar the step detector
/// ever sees.
pub fn delta_magnitude(prev: FilterState, new: FilterState) -> f64 {
    let dx = new.x - prev.x;
    let dy = new.y - prev.y;
    let dz = new.z - prev.z;
    (dx * dx + dy * dy + dz * dz).sqrt()
}
