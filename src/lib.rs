//! Stepkit: accelerometer step counting engine.
//!
//! Converts a serial stream of 3-axis accelerometer samples (gravity
//! included) into a monotonically increasing step count, with tunable
//! sensitivity, debounce timing, per-step correction, and periodic
//! milestone feedback.
//!
//! # Design Philosophy
//!
//! - **Pure core, external edges**: sensor delivery, settings UI, and
//!   audio/haptic output live in the host. The engine only computes.
//! - **O(1) per sample**: fixed memory, no allocation in the hot path,
//!   safe to run on the sensor's real-time delivery thread.
//! - **Fail-loud configuration**: invalid settings are rejected with a
//!   typed error, never silently clamped.
//! - **Recoverable inputs**: a bad sample is dropped, never fatal.
//!
//! # Example
//!
//! ```
//! use stepkit::{Engine, EngineConfig, Sample};
//!
//! let mut engine = Engine::new(EngineConfig::default()).unwrap();
//!
//! // Let the filter settle on the resting signal, then feed a spike.
//! for i in 0..100 {
//!     engine.process_sample(&Sample::new(0.0, 0.0, 9.8, i * 20));
//! }
//! let outcome = engine.process_sample(&Sample::new(0.0, 0.0, 20.0, 10_000));
//!
//! assert!(outcome.step.is_some());
//! assert_eq!(engine.current_count(), 1.0);
//! ```

pub mod config;
pub mod detector;
pub mod engine;
pub mod feedback;
pub mod signal;
pub mod types;

#[cfg(test)]
mod integration_tests;

// Re-export the primary API surface.
pub use config::{ConfigError, EngineConfig};
pub use engine::{Engine, EngineStats, SampleOutcome, SharedEngine};
pub use types::{FeedbackEvent, Sample, StepEvent};
