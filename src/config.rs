//! Engine configuration and validation.
//!
//! A single configuration snapshot covers every tunable in the pipeline.
//! Snapshots are immutable once installed: the engine swaps the whole
//! struct atomically and never mutates individual fields, so a sample in
//! flight can never observe a torn mix of old and new values.
//!
//! Validation is strict. Out-of-range values are rejected with an error
//! and the previous configuration stays active; nothing is ever silently
//! clamped.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tunable parameters for the step counting engine.
///
/// These values are tuned for mobile accelerometers at 20-60 Hz delivery
/// and balance responsiveness against double-count suppression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Low-pass filter coefficient.
    /// Range: (0.0, 1.0) exclusive. Typical: 0.8.
    /// Higher = heavier smoothing, slower response.
    pub alpha: f64,

    /// Step threshold on the delta signal (unitless, same scale as the
    /// delta). A step is only considered when delta strictly exceeds this.
    /// Range: > 0. Typical: 0.5 - 5.0.
    pub sensitivity: f64,

    /// Minimum time between accepted steps in milliseconds. Enforces the
    /// refractory window that prevents double-counting.
    /// Range: > 0. Typical: 250 - 400.
    pub min_step_interval_ms: u64,

    /// Amount added to the step count per accepted step. Values other
    /// than 1.0 compensate for systematic over- or under-counting.
    /// Range: > 0. Typical: 0.5 - 1.5.
    pub step_correction: f64,

    /// Emit a feedback event whenever the integer step count reaches a
    /// multiple of this value.
    /// Range: > 0. Typical: 5, 10 or 20.
    pub notification_interval: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            alpha: 0.8,                // moderate smoothing at 20-60 Hz
            sensitivity: 1.0,
            min_step_interval_ms: 300, // max ~3 steps/sec
            step_correction: 1.0,
            notification_interval: 10,
        }
    }
}

/// A rejected configuration update.
///
/// One variant per violated constraint so callers can surface a precise
/// message on the settings UI.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("alpha must be strictly between 0 and 1, got {0}")]
    AlphaOutOfRange(f64),

    #[error("sensitivity must be positive and finite, got {0}")]
    InvalidSensitivity(f64),

    #[error("min_step_interval_ms must be positive, got {0}")]
    InvalidStepInterval(u64),

    #[error("step_correction must be positive and finite, got {0}")]
    InvalidStepCorrection(f64),

    #[error("notification_interval must be positive, got {0}")]
    InvalidNotificationInterval(u32),

    #[error("configuration is not valid JSON: {0}")]
    Parse(String),
}

impl EngineConfig {
    /// Validates every constraint, returning the first violation found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.alpha.is_finite() || self.alpha <= 0.0 || self.alpha >= 1.0 {
            return Err(ConfigError::AlphaOutOfRange(self.alpha));
        }
        if !self.sensitivity.is_finite() || self.sensitivity <= 0.0 {
            return Err(ConfigError::InvalidSensitivity(self.sensitivity));
        }
        if self.min_step_interval_ms == 0 {
            return Err(ConfigError::InvalidStepInterval(self.min_step_interval_ms));
        }
        if !self.step_correction.is_finite() || self.step_correction <= 0.0 {
            return Err(ConfigError::InvalidStepCorrection(self.step_correction));
        }
        if self.notification_interval == 0 {
            return Err(ConfigError::InvalidNotificationInterval(
                self.notification_interval,
            ));
        }
        Ok(())
    }

    /// Loads and validates a configuration from a JSON document.
    ///
    /// This is the external configuration surface: hosts hand over the
    /// settings blob their UI produced and get back either a validated
    /// snapshot or a precise rejection.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
