//! Valuation model module
//!
//! Fair value estimates, Tobin's Q and market-regime signals for equities

mod fair_value;
mod regime;

pub use fair_value::{
    blend, DiscountedCashFlow, FairValueEstimate, FairValueEstimator, GordonGrowth,
    GrahamNumber, PerShareInputs,
};
pub use regime::{
    CapeReading, FedModelReading, MarketRegimeEvaluator, PegReading, RegimeSignal,
    RegimeSignals, RuleOf20Reading,
};

use crate::repository::Equity;

/// Trait for per-share fair value model implementations
pub trait ValuationModel: Send + Sync {
    /// Short model name
    fn name(&self) -> &'static str;
    /// Relative weight in the blended fair value
    fn weight(&self) -> f64;
    /// Per-share estimate, `None` when the model's preconditions fail
    fn estimate(&self, inputs: &PerShareInputs) -> Option<f64>;
}

/// Tobin's Q: market value over book value of net assets
///
/// `None` when book value is not positive.
pub fn tobins_q(equity: &Equity) -> Option<f64> {
    let book_value = equity.total_assets_b - equity.total_liabilities_b;
    if book_value <= rust_decimal::Decimal::ZERO {
        return None;
    }
    let q = equity.market_cap_b / book_value;
    q.try_into().ok()
}
