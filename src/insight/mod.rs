//! Natural-language explanation module
//!
//! Optional, best-effort prose for a finished analysis. The generator is a
//! capability behind [`InsightGenerator`]; the [`Explainer`] bounds it by a
//! timeout and falls back to a fixed sentence.

mod anthropic;
mod explainer;
mod prompt;

pub use anthropic::AnthropicGenerator;
pub use explainer::Explainer;
pub use prompt::{fallback_text, Analyst, InsightSummary};

use async_trait::async_trait;
use thiserror::Error;

/// Explanation generation errors
#[derive(Debug, Error)]
pub enum InsightError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },
    #[error("response contained no text")]
    EmptyResponse,
    #[error("environment variable {0} is not set")]
    MissingApiKey(String),
}

/// Trait for explanation generators
#[async_trait]
pub trait InsightGenerator: Send + Sync {
    async fn generate(&self, summary: &InsightSummary) -> Result<String, InsightError>;
}

/// Offline generator that voices the fallback through the analyst persona
#[derive(Debug, Clone, Default)]
pub struct TemplateGenerator;

#[async_trait]
impl InsightGenerator for TemplateGenerator {
    async fn generate(&self, summary: &InsightSummary) -> Result<String, InsightError> {
        Ok(format!("{} says: {}", summary.analyst.name(), summary.fallback()))
    }
}
