//! Analysis result and error types

use crate::model::{FairValueEstimate, RegimeSignals};
use crate::repository::{AssetClass, Bond, Derivative, Equity, KeyParseError};
use crate::signal::{Assessment, EquityReasoning, Verdict, Vote};
use crate::stats::{ComparisonResult, PeerMultiples};
use serde::Serialize;
use thiserror::Error;

/// Analysis errors surfaced to the caller
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Identifier absent from the repository
    #[error("{asset_class} '{identifier}' not found")]
    NotFound {
        asset_class: AssetClass,
        identifier: String,
    },
    /// Derivative key could not be parsed
    #[error(transparent)]
    MalformedIdentifier(#[from] KeyParseError),
}

/// Full equity breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EquityAnalysis {
    pub equity: Equity,
    pub peers: Vec<Equity>,
    #[serde(flatten)]
    pub assessment: Assessment,
    pub tobins_q: Option<f64>,
    pub intrinsic_values: FairValueEstimate,
    pub market_metrics: RegimeSignals,
    pub peer_multiples: PeerMultiples,
    pub reasoning: EquityReasoning,
}

/// Full bond breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BondAnalysis {
    pub bond: Bond,
    pub peers: Vec<Bond>,
    #[serde(flatten)]
    pub assessment: Assessment,
    /// Yield against peer yields; absent with fewer than two peers
    pub yield_comparison: Option<ComparisonResult>,
    /// Yield over the treasury yield, in percentage points
    pub credit_spread: f64,
    pub sector_spread_avg: f64,
    pub spread_ratio: f64,
    pub votes: Vec<Vote>,
}

/// Full derivative breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivativeAnalysis {
    pub derivative: Derivative,
    pub peers: Vec<Derivative>,
    #[serde(flatten)]
    pub assessment: Assessment,
    pub iv_premium_pct: Option<f64>,
    /// Implied volatility against peer contracts, descriptive only
    pub peer_implied_vol: Option<ComparisonResult>,
}

/// Result of one analysis, tagged by asset class
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "asset_class", rename_all = "lowercase")]
pub enum AnalysisResult {
    Equity(EquityAnalysis),
    Bond(BondAnalysis),
    Derivative(DerivativeAnalysis),
}

impl AnalysisResult {
    pub fn asset_class(&self) -> AssetClass {
        match self {
            AnalysisResult::Equity(_) => AssetClass::Equity,
            AnalysisResult::Bond(_) => AssetClass::Bond,
            AnalysisResult::Derivative(_) => AssetClass::Derivative,
        }
    }

    pub fn assessment(&self) -> Assessment {
        match self {
            AnalysisResult::Equity(a) => a.assessment,
            AnalysisResult::Bond(a) => a.assessment,
            AnalysisResult::Derivative(a) => a.assessment,
        }
    }

    pub fn verdict(&self) -> Verdict {
        self.assessment().verdict
    }

    pub fn confidence(&self) -> u8 {
        self.assessment().confidence
    }

    /// Ticker, issuer or derivative key
    pub fn identifier(&self) -> String {
        match self {
            AnalysisResult::Equity(a) => a.equity.ticker.clone(),
            AnalysisResult::Bond(a) => a.bond.issuer.clone(),
            AnalysisResult::Derivative(a) => a.derivative.key().to_string(),
        }
    }

    pub fn peer_count(&self) -> usize {
        match self {
            AnalysisResult::Equity(a) => a.peers.len(),
            AnalysisResult::Bond(a) => a.peers.len(),
            AnalysisResult::Derivative(a) => a.peers.len(),
        }
    }
}

impl From<EquityAnalysis> for AnalysisResult {
    fn from(analysis: EquityAnalysis) -> Self {
        AnalysisResult::Equity(analysis)
    }
}

impl From<BondAnalysis> for AnalysisResult {
    fn from(analysis: BondAnalysis) -> Self {
        AnalysisResult::Bond(analysis)
    }
}

impl From<DerivativeAnalysis> for AnalysisResult {
    fn from(analysis: DerivativeAnalysis) -> Self {
        AnalysisResult::Derivative(analysis)
    }
}
