//! Market-regime signals for equities
//!
//! Four descriptive signals measured against fixed macro references:
//! sector CAPE, the Fed model spread, the rule of 20 and PEG.

use crate::config::ValuationConfig;
use crate::repository::Equity;
use serde::{Deserialize, Serialize};

/// Categorical regime reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegimeSignal {
    Fair,
    Overvalued,
    Undervalued,
}

/// Sector cyclically-adjusted P/E reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapeReading {
    pub value: f64,
    pub signal: RegimeSignal,
}

/// Earnings yield against the treasury yield
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FedModelReading {
    pub earnings_yield: f64,
    pub treasury_yield: f64,
    pub spread: f64,
    pub signal: RegimeSignal,
}

/// P/E against the inflation-adjusted fair multiple (20 - inflation)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleOf20Reading {
    pub current_pe: f64,
    pub fair_pe: f64,
    pub deviation_pct: f64,
    pub signal: RegimeSignal,
}

/// Growth-adjusted P/E; absent unless growth is positive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PegReading {
    pub value: Option<f64>,
    pub signal: Option<RegimeSignal>,
}

/// All four regime readings for one equity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeSignals {
    pub cape: CapeReading,
    pub fed_model: FedModelReading,
    pub rule_of_20: RuleOf20Reading,
    pub peg: PegReading,
}

impl RegimeSignals {
    /// Signals in voting order; an absent PEG votes FAIR
    pub fn votes(&self) -> [RegimeSignal; 4] {
        [
            self.cape.signal,
            self.fed_model.signal,
            self.rule_of_20.signal,
            self.peg.signal.unwrap_or(RegimeSignal::Fair),
        ]
    }
}

/// Evaluates regime signals against reference constants
#[derive(Debug, Clone)]
pub struct MarketRegimeEvaluator {
    treasury_yield: f64,
    inflation: f64,
    default_cape: f64,
}

impl MarketRegimeEvaluator {
    pub fn new(config: &ValuationConfig) -> Self {
        Self {
            treasury_yield: config.reference_treasury_yield,
            inflation: config.inflation,
            default_cape: config.default_cape_ratio,
        }
    }

    /// Evaluate an equity given its sector's CAPE (if published)
    pub fn evaluate(&self, equity: &Equity, sector_cape: Option<f64>) -> RegimeSignals {
        RegimeSignals {
            cape: self.cape(sector_cape.unwrap_or(self.default_cape)),
            fed_model: self.fed_model(equity.pe_ratio),
            rule_of_20: self.rule_of_20(equity.pe_ratio),
            peg: peg(equity.pe_ratio, equity.eps_growth_5yr),
        }
    }

    fn cape(&self, value: f64) -> CapeReading {
        let signal = if value > 25.0 {
            RegimeSignal::Overvalued
        } else if value < 15.0 {
            RegimeSignal::Undervalued
        } else {
            RegimeSignal::Fair
        };
        CapeReading { value, signal }
    }

    fn fed_model(&self, pe: f64) -> FedModelReading {
        let earnings_yield = if pe > 0.0 { 100.0 / pe } else { 0.0 };
        let spread = earnings_yield - self.treasury_yield;
        let signal = if spread > 2.0 {
            RegimeSignal::Undervalued
        } else if spread < -1.0 {
            RegimeSignal::Overvalued
        } else {
            RegimeSignal::Fair
        };
        FedModelReading {
            earnings_yield,
            treasury_yield: self.treasury_yield,
            spread,
            signal,
        }
    }

    fn rule_of_20(&self, pe: f64) -> RuleOf20Reading {
        let fair_pe = 20.0 - self.inflation;
        let deviation_pct = (pe - fair_pe) / fair_pe * 100.0;
        let signal = if deviation_pct > 20.0 {
            RegimeSignal::Overvalued
        } else if deviation_pct < -20.0 {
            RegimeSignal::Undervalued
        } else {
            RegimeSignal::Fair
        };
        RuleOf20Reading {
            current_pe: pe,
            fair_pe,
            deviation_pct,
            signal,
        }
    }
}

impl Default for MarketRegimeEvaluator {
    fn default() -> Self {
        Self::new(&ValuationConfig::default())
    }
}

fn peg(pe: f64, growth_pct: f64) -> PegReading {
    let value = pe / growth_pct;
    // A zero PEG (P/E of zero) carries no information
    if growth_pct <= 0.0 || value == 0.0 || !value.is_finite() {
        return PegReading {
            value: None,
            signal: None,
        };
    }
    let signal = if value < 1.0 {
        RegimeSignal::Undervalued
    } else if value > 2.0 {
        RegimeSignal::Overvalued
    } else {
        RegimeSignal::Fair
    };
    PegReading {
        value: Some(value),
        signal: Some(signal),
    }
}
