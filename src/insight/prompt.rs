//! Explanation prompt construction

use crate::analysis::AnalysisResult;
use crate::repository::AssetClass;
use crate::signal::Verdict;

/// Analyst persona voicing each asset class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Analyst {
    Bond007,
    Stonker,
    CallMeMaybe,
}

impl Analyst {
    pub fn for_class(asset_class: AssetClass) -> Self {
        match asset_class {
            AssetClass::Bond => Analyst::Bond007,
            AssetClass::Equity => Analyst::Stonker,
            AssetClass::Derivative => Analyst::CallMeMaybe,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Analyst::Bond007 => "Bond007",
            Analyst::Stonker => "Stonker",
            Analyst::CallMeMaybe => "CallMeMaybe",
        }
    }
}

/// Facts handed to an explanation generator
#[derive(Debug, Clone, PartialEq)]
pub struct InsightSummary {
    pub analyst: Analyst,
    pub verdict: Verdict,
    pub confidence: u8,
    /// Labelled facts about the instrument, in display order
    pub context: Vec<(&'static str, String)>,
}

impl InsightSummary {
    pub fn from_result(result: &AnalysisResult) -> Self {
        let context = match result {
            AnalysisResult::Bond(a) => vec![
                ("Bond", a.bond.issuer.clone()),
                ("Yield", format!("{}%", a.bond.yield_pct)),
                (
                    "Peer Median",
                    a.yield_comparison
                        .as_ref()
                        .map(|c| format!("{:.2}%", c.peer_median))
                        .unwrap_or_else(not_available),
                ),
                ("Credit Spread", format!("{:.2}%", a.credit_spread)),
                ("Rating", a.bond.rating.clone()),
            ],
            AnalysisResult::Equity(a) => vec![
                (
                    "Stock",
                    format!("{} ({})", a.equity.ticker, a.equity.company),
                ),
                (
                    "Tobin's Q",
                    a.tobins_q
                        .map(|q| format!("{:.2}", q))
                        .unwrap_or_else(not_available),
                ),
                ("P/E", format!("{:.1}", a.equity.pe_ratio)),
                ("Sector", a.equity.sector.clone()),
            ],
            AnalysisResult::Derivative(a) => vec![
                (
                    "Option",
                    format!(
                        "{} {} ${}",
                        a.derivative.underlying,
                        a.derivative.option_type,
                        a.derivative.strike.normalize()
                    ),
                ),
                ("Implied Vol", format!("{:.2}", a.derivative.implied_vol)),
                ("Historical Vol", format!("{:.2}", a.derivative.historical_vol)),
            ],
        };

        Self {
            analyst: Analyst::for_class(result.asset_class()),
            verdict: result.verdict(),
            confidence: result.confidence(),
            context,
        }
    }

    /// User message sent to the language model
    pub fn prompt(&self) -> String {
        let context = self
            .context
            .iter()
            .map(|(label, value)| format!("{}: {}", label, value))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "You are {}, a witty financial analyst. Provide a 2-3 sentence gamified explanation.\n\n\
             {}\n\n\
             Verdict: {} ({}% confidence)\n\n\
             Style: Fun, emojis, accurate. Under 60 words.",
            self.analyst.name(),
            context,
            self.verdict,
            self.confidence
        )
    }

    /// Plain sentence used whenever no generated explanation is available
    pub fn fallback(&self) -> String {
        fallback_text(self.verdict, self.confidence)
    }
}

/// `Massively Overpriced with 95% confidence.`
pub fn fallback_text(verdict: Verdict, confidence: u8) -> String {
    format!("{} with {}% confidence.", verdict.title(), confidence)
}

fn not_available() -> String {
    "N/A".to_string()
}
