//! Analysis module
//!
//! Ties the repository, peer selection, statistics, valuation models and
//! aggregators together. An [`Analyzer`] takes one identifier and returns
//! a full verdict breakdown for its asset class.

mod analyzer;
mod types;

pub use analyzer::Analyzer;
pub use types::{AnalysisError, AnalysisResult, BondAnalysis, DerivativeAnalysis, EquityAnalysis};
