//! Equity verdict aggregation
//!
//! Point totals for "overvalued" and "undervalued" accumulate across:
//!
//! | signal | weight |
//! |---|---|
//! | Tobin's Q (> 1.5 / < 0.8) | 15 |
//! | margin of safety (> 20% / < -20%, else half in its direction) | 30 |
//! | each regime signal (CAPE, Fed model, rule of 20, PEG) | 7 |
//! | each peer multiple z-score (P/E, P/B, EV/EBITDA) | 7 |
//!
//! A side holding 60% of the total weight wins. Tobin's Q above 3
//! overrides everything.

use super::{Assessment, Verdict};
use crate::model::{RegimeSignal, RegimeSignals};
use crate::stats::PeerMultiples;
use serde::{Deserialize, Serialize};

const TOBINS_Q_WEIGHT: u32 = 15;
const MARGIN_WEIGHT: u32 = 30;
const REGIME_WEIGHT: u32 = 7;
const MULTIPLE_WEIGHT: u32 = 7;

const TOBINS_Q_RICH: f64 = 1.5;
const TOBINS_Q_CHEAP: f64 = 0.8;
const TOBINS_Q_EXTREME: f64 = 3.0;
const MARGIN_THRESHOLD: f64 = 20.0;
const Z_THRESHOLD: f64 = 1.5;
const WINNING_SHARE_PCT: f64 = 60.0;
const CONFIDENCE_BONUS: f64 = 15.0;
const FAIR_CONFIDENCE: u32 = 70;

/// Signals feeding the equity verdict
#[derive(Debug, Clone, Copy)]
pub struct EquitySignals<'a> {
    pub tobins_q: Option<f64>,
    pub margin_of_safety: Option<f64>,
    pub regime: &'a RegimeSignals,
    pub multiples: &'a PeerMultiples,
}

/// Point totals behind an equity verdict
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EquityReasoning {
    pub overvalued_score: u32,
    pub undervalued_score: u32,
    pub total_weight: u32,
}

impl EquityReasoning {
    fn vote(&mut self, overvalued: bool, undervalued: bool, weight: u32) {
        if overvalued {
            self.overvalued_score += weight;
        } else if undervalued {
            self.undervalued_score += weight;
        }
        self.total_weight += weight;
    }
}

/// Equity verdict with its point totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EquityVerdict {
    #[serde(flatten)]
    pub assessment: Assessment,
    pub reasoning: EquityReasoning,
}

/// Combines equity signals into one verdict
#[derive(Debug, Clone, Default)]
pub struct EquityAggregator;

impl EquityAggregator {
    pub fn new() -> Self {
        Self
    }

    pub fn aggregate(&self, signals: &EquitySignals<'_>) -> EquityVerdict {
        let mut reasoning = EquityReasoning::default();

        // An absent or zero Q carries no information
        if let Some(q) = signals.tobins_q.filter(|q| *q != 0.0) {
            reasoning.vote(q > TOBINS_Q_RICH, q < TOBINS_Q_CHEAP, TOBINS_Q_WEIGHT);
        }

        if let Some(margin) = signals.margin_of_safety.filter(|m| *m != 0.0) {
            if margin > MARGIN_THRESHOLD {
                reasoning.undervalued_score += MARGIN_WEIGHT;
            } else if margin < -MARGIN_THRESHOLD {
                reasoning.overvalued_score += MARGIN_WEIGHT;
            } else if margin > 0.0 {
                reasoning.undervalued_score += MARGIN_WEIGHT / 2;
            } else {
                reasoning.overvalued_score += MARGIN_WEIGHT / 2;
            }
            reasoning.total_weight += MARGIN_WEIGHT;
        }

        for signal in signals.regime.votes() {
            reasoning.vote(
                signal == RegimeSignal::Overvalued,
                signal == RegimeSignal::Undervalued,
                REGIME_WEIGHT,
            );
        }

        // A multiple the target does not report still counts toward the total
        for multiple in signals.multiples.present() {
            reasoning.vote(
                multiple.z_score.is_some_and(|z| z > Z_THRESHOLD),
                multiple.z_score.is_some_and(|z| z < -Z_THRESHOLD),
                MULTIPLE_WEIGHT,
            );
        }

        let assessment = Self::decide(&reasoning, signals.tobins_q);

        tracing::debug!(
            overvalued = reasoning.overvalued_score,
            undervalued = reasoning.undervalued_score,
            total = reasoning.total_weight,
            verdict = %assessment.verdict,
            "Equity points tallied"
        );

        EquityVerdict {
            assessment,
            reasoning,
        }
    }

    fn decide(reasoning: &EquityReasoning, tobins_q: Option<f64>) -> Assessment {
        if reasoning.total_weight == 0 {
            return Assessment::insufficient_data();
        }

        if tobins_q.is_some_and(|q| q > TOBINS_Q_EXTREME) {
            return Assessment::new(Verdict::ExtremelyOvervalued, 95);
        }

        let total = reasoning.total_weight as f64;
        let overvalued_pct = reasoning.overvalued_score as f64 / total * 100.0;
        let undervalued_pct = reasoning.undervalued_score as f64 / total * 100.0;

        if overvalued_pct >= WINNING_SHARE_PCT {
            Assessment::new(
                Verdict::Overvalued,
                (overvalued_pct + CONFIDENCE_BONUS) as u32,
            )
        } else if undervalued_pct >= WINNING_SHARE_PCT {
            Assessment::new(
                Verdict::Undervalued,
                (undervalued_pct + CONFIDENCE_BONUS) as u32,
            )
        } else {
            Assessment::new(Verdict::FairlyValued, FAIR_CONFIDENCE)
        }
    }
}
