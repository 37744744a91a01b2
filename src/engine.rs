//! Step counting engine: the composition root of the pipeline.
//!
//! Orchestrates the full per-sample data flow:
//! 1. **Validation**: non-finite samples are dropped before any mutation
//! 2. **Filtering**: single-pole low-pass per axis
//! 3. **Delta extraction**: magnitude of the filtered-vector difference
//! 4. **Step detection**: threshold + refractory state machine
//! 5. **Feedback policy**: milestone decision
//!
//! The engine owns all mutable state (filter, detector, configuration) and
//! exposes a single entry point, [`Engine::process_sample`]. Processing is
//! O(1) per sample with no allocation and no I/O; it is safe to run on the
//! sensor's real-time delivery path.
//!
//! Samples arrive as a serial stream, so `&mut self` gives exclusivity by
//! construction. Hosts that deliver samples from multiple threads wrap the
//! engine in [`SharedEngine`], which scopes a lock to one call.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::config::{ConfigError, EngineConfig};
use crate::detector::StepDetector;
use crate::feedback::FeedbackPolicy;
use crate::signal::{delta_magnitude, FilterState, LowPassFilter};
use crate::types::{FeedbackEvent, Sample, StepEvent};

/// Everything a single processed sample produced.
///
/// Zero, one, or both events may be present; a dropped or sub-threshold
/// sample produces neither.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SampleOutcome {
    /// Present when the sample was accepted as a step.
    pub step: Option<StepEvent>,

    /// Present when the accepted step crossed a notification milestone.
    pub feedback: Option<FeedbackEvent>,
}

/// Processing counters for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineStats {
    /// Samples that went through the full pipeline.
    pub samples_processed: u64,

    /// Samples dropped for non-finite axis values.
    pub samples_dropped: u64,
}

/// The step counting engine.
pub struct Engine {
    config: EngineConfig,
    filter_state: FilterState,
    detector: StepDetector,
    stats: EngineStats,
}

impl Engine {
    /// Creates an engine with a validated configuration.
    ///
    /// Filter and detector state start zeroed; the filter converges to the
    /// live signal within a few dozen samples.
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            filter_state: FilterState::new(),
            detector: StepDetector::new(),
            stats: EngineStats::default(),
        })
    }

    /// Processes one accelerometer sample through the entire pipeline.
    ///
    /// Non-finite samples are dropped before the filter: no state mutates
    /// and the engine remains fully usable for subsequent samples.
    pub fn process_sample(&mut self, sample: &Sample) -> SampleOutcome {
        if !sample.is_finite() {
            self.stats.samples_dropped += 1;
            debug!(
                timestamp_ms = sample.timestamp_ms,
                "dropped sample with non-finite axis value"
            );
            return SampleOutcome::default();
        }

        let prev_state = self.filter_state;
        self.filter_state = LowPassFilter::apply(prev_state, sample, self.config.alpha);
        let delta = delta_magnitude(prev_state, self.filter_state);

        trace!(delta, timestamp_ms = sample.timestamp_ms, "sample filtered");

        // Integer count before the update, for milestone deduplication.
        let prev_integer_count = self.detector.step_count().floor() as u32;

        let step = self.detector.process(
            delta,
            sample.timestamp_ms,
            self.config.sensitivity,
            self.config.min_step_interval_ms,
            self.config.step_correction,
        );

        let feedback = step.and_then(|event| {
            FeedbackPolicy::check(
                prev_integer_count,
                event.new_count,
                self.config.notification_interval,
            )
        });

        self.stats.samples_processed += 1;

        SampleOutcome { step, feedback }
    }

    /// Processes a batch of samples, collecting every outcome that
    /// produced at least one event.
    pub fn process_batch(&mut self, samples: &[Sample]) -> Vec<SampleOutcome> {
        samples
            .iter()
            .map(|sample| self.process_sample(sample))
            .filter(|outcome| outcome.step.is_some() || outcome.feedback.is_some())
            .collect()
    }

    /// Atomically replaces the active configuration.
    ///
    /// On rejection the previous configuration stays active. Filter and
    /// detector state are never reset by a configuration change.
    pub fn update_config(&mut self, config: EngineConfig) -> Result<(), ConfigError> {
        config.validate()?;
        debug!(?config, "configuration replaced");
        self.config = config;
        Ok(())
    }

    /// Releases the detector's refractory window if it has elapsed.
    ///
    /// For hosts that arm a timer after each accepted step instead of
    /// relying on the next sample's elapsed-time check.
    pub fn release_refractory(&mut self, now_ms: u64) {
        self.detector
            .release_refractory(now_ms, self.config.min_step_interval_ms);
    }

    /// Read-only snapshot of the accumulated step count.
    pub fn current_count(&self) -> f64 {
        self.detector.step_count()
    }

    /// The active configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Processing counters.
    pub fn stats(&self) -> EngineStats {
        self.stats
    }

    /// Clears filter and detector state without touching the
    /// configuration or the counters.
    pub fn reset(&mut self) {
        self.filter_state = FilterState::new();
        self.detector.reset();
    }
}

/// Thread-safe handle around an [`Engine`].
///
/// For hosts that deliver samples or configuration updates from more than
/// one thread. The lock is scoped to a single `process_sample` or
/// `update_config` call, which preserves the per-sample atomicity the
/// serial stream contract requires.
#[derive(Clone)]
pub struct SharedEngine {
    inner: Arc<Mutex<Engine>>,
}

impl SharedEngine {
    /// Wraps an engine for shared access.
    pub fn new(engine: Engine) -> Self {
        Self {
            inner: Arc::new(Mutex::new(engine)),
        }
    }

    /// Processes one sample under the lock.
    pub fn process_sample(&self, sample: &Sample) -> SampleOutcome {
        self.inner.lock().process_sample(sample)
    }

    /// Replaces the configuration under the lock.
    pub fn update_config(&self, config: EngineConfig) -> Result<(), ConfigError> {
        self.inner.lock().update_config(config)
    }

    /// Releases the refractory window under the lock.
    pub fn release_refractory(&self, now_ms: u64) {
        self.inner.lock().release_refractory(now_ms);
    }

    /// Current accumulated step count.
    pub fn current_count(&self) -> f64 {
        self.inner.lock().current_count()
    }
}
