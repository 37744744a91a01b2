//! Stepkit demo binary.
//!
//! Feeds a synthetic walk through the engine and prints every accepted
//! step and milestone. For library use, see lib.rs.

use tracing_subscriber::EnvFilter;

use stepkit::{Engine, EngineConfig, Sample};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = EngineConfig::default();
    println!("stepkit demo");
    println!(
        "sensitivity={} min_step_interval_ms={} notification_interval={}",
        config.sensitivity, config.min_step_interval_ms, config.notification_interval
    );

    let mut engine = Engine::new(config).expect("default configuration is valid");

    // Resting phase: the filter settles on gravity, no steps.
    for i in 0..100u64 {
        engine.process_sample(&Sample::new(0.0, 0.0, 9.8, i * 20));
    }

    // Walking phase: one heel-strike spike per second, quiet in between.
    for i in 0..25u64 {
        let t = 10_000 + i * 1000;
        let outcome = engine.process_sample(&Sample::new(0.0, 0.0, 20.0, t));
        if let Some(step) = outcome.step {
            println!("step {:>5.1} at t={}ms (delta {:.2})", step.new_count, step.timestamp_ms, step.delta);
        }
        if let Some(feedback) = outcome.feedback {
            println!("*** milestone: multiple of {} reached ***", feedback.multiple);
        }
        engine.process_sample(&Sample::new(0.0, 0.0, 9.8, t + 400));
        engine.process_sample(&Sample::new(0.0, 0.0, 9.8, t + 700));
    }

    let stats = engine.stats();
    println!(
        "done: {} steps, {} samples processed, {} dropped",
        engine.current_count(),
        stats.samples_processed,
        stats.samples_dropped
    );
}
