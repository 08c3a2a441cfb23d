//! Analysis metrics
//!
//! Recorded through the `metrics` facade. Nothing is exported unless the
//! embedding application installs a recorder.

use crate::repository::AssetClass;
use crate::signal::Verdict;
use std::time::Duration;

/// Counter metric types
#[derive(Debug, Clone, Copy)]
pub enum CounterMetric {
    /// Completed analyses, labelled by class and verdict
    Analyses,
    /// Explanations replaced by the fallback sentence
    InsightFallbacks,
}

impl CounterMetric {
    pub fn name(&self) -> &'static str {
        match self {
            CounterMetric::Analyses => "overunder_analyses_total",
            CounterMetric::InsightFallbacks => "overunder_insight_fallbacks_total",
        }
    }
}

const ANALYSIS_LATENCY: &str = "overunder_analysis_latency_ms";

/// Record one completed analysis
pub fn record_analysis(asset_class: AssetClass, verdict: Verdict, duration: Duration) {
    ::metrics::counter!(
        CounterMetric::Analyses.name(),
        "asset_class" => asset_class.as_str(),
        "verdict" => verdict.as_str()
    )
    .increment(1);

    let value_ms = duration.as_secs_f64() * 1000.0;
    ::metrics::histogram!(ANALYSIS_LATENCY, "asset_class" => asset_class.as_str()).record(value_ms);

    tracing::trace!(metric = ANALYSIS_LATENCY, value_ms, "Recording latency");
}

/// Record an explanation that fell back to the template sentence
pub fn record_insight_fallback(reason: &'static str) {
    ::metrics::counter!(CounterMetric::InsightFallbacks.name(), "reason" => reason).increment(1);
}
