//! Telemetry module
//!
//! Structured logging and simulation metrics

mod logging;
mod metrics;

pub use logging::init_logging;
pub use metrics::{increment_counter, subscription_ended, subscription_started, CounterMetric};

use crate::config::TelemetryConfig;

/// Guard that cleans up telemetry on drop
pub struct TelemetryGuard {
    _priv: (),
}

/// Initialize all telemetry subsystems
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<TelemetryGuard> {
    init_logging(&config.log_level)?;
    Ok(TelemetryGuard { _priv: () })
}
