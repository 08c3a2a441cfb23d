//! Verdict aggregation module
//!
//! Turns comparator, estimator and regime signals into one categorical
//! verdict with a confidence, per asset class

mod bond;
mod derivative;
mod equity;
mod types;

pub use bond::{spread_ratio, BondAggregator, BondVerdict};
pub use derivative::{aggregate_derivative, iv_premium_pct, DerivativeVerdict};
pub use equity::{EquityAggregator, EquityReasoning, EquitySignals, EquityVerdict};
pub use types::{Assessment, Verdict, Vote, VoteTally, MAX_CONFIDENCE};
