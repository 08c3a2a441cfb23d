//! Analyze command implementation

use crate::analysis::{AnalysisResult, Analyzer};
use crate::config::Config;
use crate::insight::Explainer;
use crate::repository::{AssetClass, InstrumentRepository};
use anyhow::Context;
use clap::Args;
use serde::Serialize;
use std::sync::Arc;

#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// Asset class of the instrument
    #[arg(value_enum)]
    pub asset_class: AssetClass,

    /// Ticker, bond issuer, or UNDERLYING_type_strike
    pub identifier: String,

    /// Print the full result as JSON
    #[arg(long)]
    pub json: bool,

    /// Skip the natural-language explanation
    #[arg(long)]
    pub no_insight: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    analysis: &'a AnalysisResult,
    explanation: &'a str,
}

impl AnalyzeArgs {
    pub async fn execute(&self, config: &Config) -> anyhow::Result<()> {
        let repository =
            InstrumentRepository::load(&config.data).context("Failed to load instrument data")?;
        let analyzer = Analyzer::new(Arc::new(repository), config.valuation.clone());

        let result = analyzer.analyze(self.asset_class, &self.identifier)?;

        let explainer = if self.no_insight {
            Explainer::disabled()
        } else {
            Explainer::from_config(&config.insight)
        };
        let explanation = explainer.explain(&result).await;

        if self.json {
            let report = Report {
                analysis: &result,
                explanation: &explanation,
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            print_summary(&result, &explanation);
        }

        Ok(())
    }
}

fn print_summary(result: &AnalysisResult, explanation: &str) {
    println!("{} [{}]", result.identifier(), result.asset_class());
    println!("  Verdict:    {}", result.verdict());
    println!("  Confidence: {}%", result.confidence());
    println!("  Peers:      {}", result.peer_count());

    match result {
        AnalysisResult::Equity(a) => {
            if let Some(q) = a.tobins_q {
                println!("  Tobin's Q:  {:.2}", q);
            }
            if let Some(fv) = a.intrinsic_values.weighted_fair_value {
                println!("  Fair value: {} (price {})", fv.round_dp(2), a.equity.price);
            }
            println!(
                "  Points:     over {} / under {} of {}",
                a.reasoning.overvalued_score,
                a.reasoning.undervalued_score,
                a.reasoning.total_weight
            );
        }
        AnalysisResult::Bond(a) => {
            if let Some(c) = &a.yield_comparison {
                println!(
                    "  Yield:      {:.2}% vs peer median {:.2}% (z {:.2})",
                    c.value, c.peer_median, c.z_score
                );
            }
            println!(
                "  Spread:     {:.2}% ({:.2}x sector)",
                a.credit_spread, a.spread_ratio
            );
        }
        AnalysisResult::Derivative(a) => {
            if let Some(premium) = a.iv_premium_pct {
                println!("  IV premium: {:.1}%", premium);
            }
        }
    }

    println!();
    println!("{}", explanation);
}
