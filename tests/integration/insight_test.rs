//! Explanation fallback behaviour

use crate::sample_analyzer;
use async_trait::async_trait;
use over_under::insight::{
    Explainer, InsightError, InsightGenerator, InsightSummary, TemplateGenerator,
};
use over_under::repository::AssetClass;
use over_under::signal::Verdict;
use std::sync::Arc;
use std::time::Duration;

struct FailingGenerator;

#[async_trait]
impl InsightGenerator for FailingGenerator {
    async fn generate(&self, _summary: &InsightSummary) -> Result<String, InsightError> {
        Err(InsightError::Api {
            status: 529,
            body: "overloaded".to_string(),
        })
    }
}

struct SlowGenerator;

#[async_trait]
impl InsightGenerator for SlowGenerator {
    async fn generate(&self, _summary: &InsightSummary) -> Result<String, InsightError> {
        tokio::time::sleep(Duration::from_secs(5)).await;
        Ok("too late".to_string())
    }
}

struct BlankGenerator;

#[async_trait]
impl InsightGenerator for BlankGenerator {
    async fn generate(&self, _summary: &InsightSummary) -> Result<String, InsightError> {
        Ok("   ".to_string())
    }
}

const FALLBACK: &str = "Massively Overpriced with 95% confidence.";

#[tokio::test]
async fn test_failing_generator_falls_back() {
    let result = sample_analyzer()
        .analyze(AssetClass::Derivative, "TSLA_call_250")
        .unwrap();
    let explainer = Explainer::new(Arc::new(FailingGenerator), Duration::from_secs(1));

    assert_eq!(explainer.explain(&result).await, FALLBACK);
    assert_eq!(result.verdict(), Verdict::MassivelyOverpriced);
}

#[tokio::test]
async fn test_slow_generator_times_out() {
    let result = sample_analyzer()
        .analyze(AssetClass::Derivative, "TSLA_call_250")
        .unwrap();
    let explainer = Explainer::new(Arc::new(SlowGenerator), Duration::from_millis(20));

    let started = std::time::Instant::now();
    assert_eq!(explainer.explain(&result).await, FALLBACK);
    assert!(started.elapsed() < Duration::from_secs(2));
}

#[tokio::test]
async fn test_blank_output_falls_back() {
    let result = sample_analyzer()
        .analyze(AssetClass::Bond, "Carvana 2029")
        .unwrap();
    let explainer = Explainer::new(Arc::new(BlankGenerator), Duration::from_secs(1));

    assert_eq!(
        explainer.explain(&result).await,
        "Junk High Yield with 50% confidence."
    );
}

#[tokio::test]
async fn test_generated_text_is_used() {
    let result = sample_analyzer()
        .analyze(AssetClass::Equity, "PLTR")
        .unwrap();
    let explainer = Explainer::new(Arc::new(TemplateGenerator), Duration::from_secs(1));

    assert_eq!(
        explainer.explain(&result).await,
        "Stonker says: Extremely Overvalued with 95% confidence."
    );
}

#[tokio::test]
async fn test_disabled_explainer() {
    let result = sample_analyzer()
        .analyze(AssetClass::Bond, "Exxon 2035")
        .unwrap();
    let explainer = Explainer::disabled();

    assert!(!explainer.is_enabled());
    assert_eq!(
        explainer.explain(&result).await,
        "Insufficient Data with 0% confidence."
    );
}

#[test]
fn test_equity_prompt_context() {
    let result = sample_analyzer()
        .analyze(AssetClass::Equity, "PLTR")
        .unwrap();
    let prompt = InsightSummary::from_result(&result).prompt();

    assert!(prompt.contains("You are Stonker"));
    assert!(prompt.contains("Stock: PLTR (Palantir Technologies)"));
    assert!(prompt.contains("Tobin's Q: 36.00"));
    assert!(prompt.contains("P/E: 115.3"));
    assert!(prompt.contains("Verdict: EXTREMELY_OVERVALUED (95% confidence)"));
}
