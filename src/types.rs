//! Core data types for the step counting engine.
//!
//! This module defines the input and output contracts of the pipeline.
//! All types are small, copyable, and carry no behavior beyond trivial
//! helpers.
//!
//! Design principle: Types should make intent obvious. If a concept exists,
//! it gets a type. Never pass raw tuples or untyped collections across
//! boundaries.

use serde::{Deserialize, Serialize};

/// A single raw accelerometer sample, gravity included.
///
/// This is the minimal input contract: three axes plus a monotonic arrival
/// timestamp. Samples are transient; nothing retains them beyond one
/// processing step.
///
/// Assumptions:
/// - `timestamp_ms` is monotonically non-decreasing within a stream
/// - axis values are in m/s² as delivered by the host sensor API
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    /// Acceleration along the x axis in m/s².
    pub x: f64,

    /// Acceleration along the y axis in m/s².
    pub y: f64,

    /// Acceleration along the z axis in m/s².
    pub z: f64,

    /// Monotonic wall-clock time at arrival, in milliseconds.
    pub timestamp_ms: u64,
}

impl Sample {
    /// Creates a new sample.
    pub fn new(x: f64, y: f64, z: f64, timestamp_ms: u64) -> Self {
        Self { x, y, z, timestamp_ms }
    }

    /// Returns true if every axis value is finite.
    ///
    /// Host sensor APIs occasionally deliver NaN or infinite readings
    /// (sensor warm-up, driver glitches). Such samples must be dropped
    /// before they reach the filter, since a single NaN would poison the
    /// filter state permanently.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Compute the raw acceleration magnitude in m/s².
    pub fn magnitude(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }
}

/// Emitted whenever the detector accepts a step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepEvent {
    /// The accumulated step count after this step. Fractional when the
    /// configured step correction is not 1.0.
    pub new_count: f64,

    /// The delta signal value that triggered the step.
    pub delta: f64,

    /// Timestamp of the sample that triggered the step, in milliseconds.
    pub timestamp_ms: u64,
}

/// Emitted when the integer step count reaches a configured milestone.
///
/// The engine only decides *that* a milestone was reached; audio or haptic
/// output belongs to the presentation layer consuming this event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackEvent {
    /// The configured notification interval that was hit.
    pub multiple: u32,
}
