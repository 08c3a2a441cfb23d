//! Per-share fair value models
//!
//! Three independent estimates, each optional:
//! - Graham number: sqrt(22.5 * EPS * BVPS)
//! - single-stage DCF: FCF/share * (1 + g) / (r - g)
//! - Gordon growth: DPS * (1 + g_div) / (r - g_div)
//!
//! The blend is a weighted average over whichever estimates exist, with
//! weights renormalized over that subset.

use super::ValuationModel;
use crate::config::ValuationConfig;
use crate::repository::Equity;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const UNITS_PER_BILLION: f64 = 1_000_000_000.0;
const UNITS_PER_MILLION: f64 = 1_000_000.0;

/// Per-share inputs derived from an equity's aggregate financials
#[derive(Debug, Clone, PartialEq)]
pub struct PerShareInputs {
    pub price: f64,
    pub eps: f64,
    pub book_value_per_share: f64,
    pub fcf_per_share: f64,
    /// Five-year EPS growth as a fraction
    pub growth_rate: f64,
    /// Dividend yield in percent
    pub dividend_yield: f64,
}

impl PerShareInputs {
    /// Convert billions and millions to units before dividing by share count
    ///
    /// Returns `None` when the share count is not positive.
    pub fn from_equity(equity: &Equity) -> Option<Self> {
        let shares = to_f64(equity.shares_out_m) * UNITS_PER_MILLION;
        if shares <= 0.0 {
            return None;
        }
        let per_share = |billions: Decimal| to_f64(billions) * UNITS_PER_BILLION / shares;

        Some(Self {
            price: to_f64(equity.price),
            eps: per_share(equity.net_income_b),
            book_value_per_share: per_share(equity.total_assets_b - equity.total_liabilities_b),
            fcf_per_share: per_share(equity.fcf_b),
            growth_rate: equity.eps_growth_5yr / 100.0,
            dividend_yield: equity.dividend_yield,
        })
    }
}

/// Graham number, defined only for positive earnings and book value
#[derive(Debug, Clone, Default)]
pub struct GrahamNumber;

impl ValuationModel for GrahamNumber {
    fn name(&self) -> &'static str {
        "graham"
    }

    fn weight(&self) -> f64 {
        0.3
    }

    fn estimate(&self, inputs: &PerShareInputs) -> Option<f64> {
        if inputs.eps > 0.0 && inputs.book_value_per_share > 0.0 {
            Some((22.5 * inputs.eps * inputs.book_value_per_share).sqrt())
        } else {
            None
        }
    }
}

/// Perpetuity-growth value of free cash flow
#[derive(Debug, Clone)]
pub struct DiscountedCashFlow {
    pub discount_rate: f64,
    pub max_growth_rate: f64,
}

impl ValuationModel for DiscountedCashFlow {
    fn name(&self) -> &'static str {
        "dcf"
    }

    fn weight(&self) -> f64 {
        0.5
    }

    fn estimate(&self, inputs: &PerShareInputs) -> Option<f64> {
        let growth = inputs.growth_rate.min(self.max_growth_rate);
        if inputs.fcf_per_share > 0.0 && growth < self.discount_rate {
            Some(inputs.fcf_per_share * (1.0 + growth) / (self.discount_rate - growth))
        } else {
            None
        }
    }
}

/// Gordon dividend discount value
#[derive(Debug, Clone)]
pub struct GordonGrowth {
    pub discount_rate: f64,
    pub max_growth_rate: f64,
    pub max_dividend_growth: f64,
}

impl ValuationModel for GordonGrowth {
    fn name(&self) -> &'static str {
        "gordon"
    }

    fn weight(&self) -> f64 {
        0.2
    }

    fn estimate(&self, inputs: &PerShareInputs) -> Option<f64> {
        if inputs.dividend_yield <= 0.0 {
            return None;
        }
        let dividend_per_share = inputs.price * inputs.dividend_yield / 100.0;
        let dividend_growth = inputs
            .growth_rate
            .min(self.max_growth_rate)
            .min(self.max_dividend_growth);
        if dividend_growth < self.discount_rate {
            Some(dividend_per_share * (1.0 + dividend_growth) / (self.discount_rate - dividend_growth))
        } else {
            None
        }
    }
}

/// Output of the fair value estimator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FairValueEstimate {
    pub graham_number: Option<Decimal>,
    pub dcf_value: Option<Decimal>,
    pub gordon_value: Option<Decimal>,
    pub weighted_fair_value: Option<Decimal>,
    /// Percent gap between blended fair value and price; positive means cheap
    pub margin_of_safety: Option<f64>,
    pub current_price: Decimal,
}

/// Runs the three models and blends them
#[derive(Debug, Clone)]
pub struct FairValueEstimator {
    graham: GrahamNumber,
    dcf: DiscountedCashFlow,
    gordon: GordonGrowth,
}

impl FairValueEstimator {
    pub fn new(config: &ValuationConfig) -> Self {
        Self {
            graham: GrahamNumber,
            dcf: DiscountedCashFlow {
                discount_rate: config.discount_rate,
                max_growth_rate: config.max_growth_rate,
            },
            gordon: GordonGrowth {
                discount_rate: config.discount_rate,
                max_growth_rate: config.max_growth_rate,
                max_dividend_growth: config.max_dividend_growth,
            },
        }
    }

    /// Estimate fair value for one equity
    pub fn estimate(&self, equity: &Equity) -> FairValueEstimate {
        let Some(inputs) = PerShareInputs::from_equity(equity) else {
            tracing::debug!(ticker = %equity.ticker, "No positive share count, skipping fair value");
            return FairValueEstimate {
                graham_number: None,
                dcf_value: None,
                gordon_value: None,
                weighted_fair_value: None,
                margin_of_safety: None,
                current_price: equity.price,
            };
        };

        let graham = self.graham.estimate(&inputs);
        let dcf = self.dcf.estimate(&inputs);
        let gordon = self.gordon.estimate(&inputs);

        for (model, value) in [
            (self.graham.name(), graham),
            (self.dcf.name(), dcf),
            (self.gordon.name(), gordon),
        ] {
            if value.is_none() {
                tracing::debug!(ticker = %equity.ticker, model, "Model preconditions not met");
            }
        }

        let weighted = blend(&[
            (graham, self.graham.weight()),
            (dcf, self.dcf.weight()),
            (gordon, self.gordon.weight()),
        ]);
        let margin_of_safety = weighted
            .filter(|fv| *fv != 0.0)
            .map(|fv| (fv - inputs.price) / fv * 100.0);

        FairValueEstimate {
            graham_number: graham.and_then(to_decimal),
            dcf_value: dcf.and_then(to_decimal),
            gordon_value: gordon.and_then(to_decimal),
            weighted_fair_value: weighted.and_then(to_decimal),
            margin_of_safety,
            current_price: equity.price,
        }
    }
}

impl Default for FairValueEstimator {
    fn default() -> Self {
        Self::new(&ValuationConfig::default())
    }
}

/// Weighted average over present estimates, weights renormalized to sum 1
///
/// `None` iff no estimate is present.
pub fn blend(estimates: &[(Option<f64>, f64)]) -> Option<f64> {
    let present: Vec<(f64, f64)> = estimates
        .iter()
        .filter_map(|(value, weight)| value.map(|v| (v, *weight)))
        .collect();

    let total_weight: f64 = present.iter().map(|(_, w)| w).sum();
    if present.is_empty() || total_weight <= 0.0 {
        return None;
    }

    Some(present.iter().map(|(v, w)| v * (w / total_weight)).sum())
}

fn to_f64(value: Decimal) -> f64 {
    value.try_into().unwrap_or(0.0)
}

fn to_decimal(value: f64) -> Option<Decimal> {
    Decimal::try_from(value).ok().map(|d| d.round_dp(4))
}
