//! Telemetry module
//!
//! Structured logging and analysis metrics

mod logging;
mod metrics;

pub use logging::{init_logging, LogFormat};
pub use metrics::{record_analysis, record_insight_fallback, CounterMetric};

use crate::config::TelemetryConfig;

/// Initialize all telemetry subsystems
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<()> {
    init_logging(&config.log_level, config.log_format)?;
    tracing::debug!(level = %config.log_level, format = ?config.log_format, "Logging initialized");
    Ok(())
}
