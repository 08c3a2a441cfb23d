//! Bounded explanation with a deterministic fallback

use super::{AnthropicGenerator, InsightGenerator, InsightSummary};
use crate::analysis::AnalysisResult;
use crate::config::InsightConfig;
use crate::telemetry;
use std::sync::Arc;
use std::time::Duration;

/// Produces one explanation per analysis
///
/// Never fails: generator errors, empty output and timeouts all degrade to
/// the fallback sentence. The verdict itself is never touched.
#[derive(Clone)]
pub struct Explainer {
    generator: Option<Arc<dyn InsightGenerator>>,
    timeout: Duration,
}

impl Explainer {
    pub fn new(generator: Arc<dyn InsightGenerator>, timeout: Duration) -> Self {
        Self {
            generator: Some(generator),
            timeout,
        }
    }

    /// Explainer that always returns the fallback sentence
    pub fn disabled() -> Self {
        Self {
            generator: None,
            timeout: Duration::ZERO,
        }
    }

    /// Build from configuration, disabling itself when no API key is available
    pub fn from_config(config: &InsightConfig) -> Self {
        if !config.enabled {
            return Self::disabled();
        }

        match AnthropicGenerator::from_env(config) {
            Ok(generator) => Self::new(
                Arc::new(generator),
                Duration::from_secs(config.timeout_secs),
            ),
            Err(e) => {
                tracing::warn!(error = %e, "Explanations disabled");
                Self::disabled()
            }
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.generator.is_some()
    }

    pub async fn explain(&self, result: &AnalysisResult) -> String {
        let summary = InsightSummary::from_result(result);

        let Some(generator) = &self.generator else {
            return summary.fallback();
        };

        match tokio::time::timeout(self.timeout, generator.generate(&summary)).await {
            Ok(Ok(text)) if !text.trim().is_empty() => text,
            Ok(Ok(_)) => {
                tracing::warn!(identifier = %result.identifier(), "Empty explanation, using fallback");
                telemetry::record_insight_fallback("empty");
                summary.fallback()
            }
            Ok(Err(e)) => {
                tracing::warn!(identifier = %result.identifier(), error = %e, "Explanation failed, using fallback");
                telemetry::record_insight_fallback("error");
                summary.fallback()
            }
            Err(_) => {
                tracing::warn!(
                    identifier = %result.identifier(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Explanation timed out, using fallback"
                );
                telemetry::record_insight_fallback("timeout");
                summary.fallback()
            }
        }
    }
}

impl std::fmt::Debug for Explainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Explainer")
            .field("enabled", &self.is_enabled())
            .field("timeout", &self.timeout)
            .finish()
    }
}
