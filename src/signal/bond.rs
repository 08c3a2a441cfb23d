//! Bond verdict aggregation
//!
//! Two weighted votes: the yield z-score against peers (40, or 20 when
//! neutral) and the credit spread against the sector average (30, or 15
//! when neutral). The heavier verdict wins and its weight is the
//! confidence. Junk yields override everything except missing peers.

use super::{Assessment, Verdict, Vote, VoteTally};
use crate::stats::ComparisonResult;
use serde::{Deserialize, Serialize};

const Z_THRESHOLD: f64 = 1.5;
const WIDE_SPREAD_RATIO: f64 = 1.5;
const TIGHT_SPREAD_RATIO: f64 = 0.7;
const JUNK_CONFIDENCE: u32 = 50;

/// Bond verdict with the votes behind it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondVerdict {
    #[serde(flatten)]
    pub assessment: Assessment,
    /// Yield vote then spread vote; empty when peers were insufficient
    pub votes: Vec<Vote>,
}

/// Credit spread divided by the sector average, 1.0 when the average is not positive
pub fn spread_ratio(credit_spread: f64, sector_average: f64) -> f64 {
    if sector_average > 0.0 {
        credit_spread / sector_average
    } else {
        1.0
    }
}

/// Combines bond signals into one verdict
#[derive(Debug, Clone)]
pub struct BondAggregator {
    junk_yield_threshold: f64,
}

impl BondAggregator {
    pub fn new(junk_yield_threshold: f64) -> Self {
        Self {
            junk_yield_threshold,
        }
    }

    /// Aggregate a bond's signals
    ///
    /// `yield_comparison` is `None` when fewer than two peers exist, which
    /// short-circuits to `INSUFFICIENT_DATA`.
    pub fn aggregate(
        &self,
        yield_pct: f64,
        yield_comparison: Option<&ComparisonResult>,
        spread_ratio: f64,
    ) -> BondVerdict {
        let Some(comparison) = yield_comparison else {
            return BondVerdict {
                assessment: Assessment::insufficient_data(),
                votes: Vec::new(),
            };
        };

        let yield_vote = if comparison.z_score > Z_THRESHOLD {
            Vote::new(Verdict::Undervalued, 40)
        } else if comparison.z_score < -Z_THRESHOLD {
            Vote::new(Verdict::Overvalued, 40)
        } else {
            Vote::new(Verdict::Neutral, 20)
        };

        let spread_vote = if spread_ratio > WIDE_SPREAD_RATIO {
            Vote::new(Verdict::Undervalued, 30)
        } else if spread_ratio < TIGHT_SPREAD_RATIO {
            Vote::new(Verdict::Overvalued, 30)
        } else {
            Vote::new(Verdict::Neutral, 15)
        };

        let votes = vec![yield_vote, spread_vote];
        let tally: VoteTally = votes.iter().copied().collect();
        let mut assessment = tally
            .winner()
            .map(|winner| Assessment::new(winner.verdict, winner.weight))
            .unwrap_or_else(Assessment::insufficient_data);

        if yield_pct > self.junk_yield_threshold {
            assessment = Assessment::new(Verdict::JunkHighYield, JUNK_CONFIDENCE);
        }

        tracing::debug!(
            z_score = comparison.z_score,
            spread_ratio,
            verdict = %assessment.verdict,
            "Bond votes tallied"
        );

        BondVerdict { assessment, votes }
    }
}

impl Default for BondAggregator {
    fn default() -> Self {
        Self::new(10.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn comparison(z_score: f64) -> ComparisonResult {
        ComparisonResult {
            value: 5.0,
            peer_median: 5.0,
            peer_std: 1.0,
            peer_count: 4,
            deviation: z_score,
            z_score,
        }
    }

    #[test]
    fn test_spread_ratio() {
        assert_eq!(spread_ratio(3.0, 2.0), 1.5);
        assert_eq!(spread_ratio(3.0, 0.0), 1.0);
        assert_eq!(spread_ratio(3.0, -1.0), 1.0);
    }

    #[test]
    fn test_agreeing_votes_add_up() {
        let result = BondAggregator::default().aggregate(6.0, Some(&comparison(2.0)), 1.8);
        assert_eq!(result.assessment.verdict, Verdict::Undervalued);
        assert_eq!(result.assessment.confidence, 70);
        assert_eq!(result.votes.len(), 2);
    }

    #[test]
    fn test_yield_vote_outweighs_spread() {
        let result = BondAggregator::default().aggregate(4.0, Some(&comparison(-2.0)), 1.8);
        assert_eq!(result.assessment.verdict, Verdict::Overvalued);
        assert_eq!(result.assessment.confidence, 40);
    }

    #[test]
    fn test_neutral_votes() {
        let result = BondAggregator::default().aggregate(5.0, Some(&comparison(0.3)), 1.0);
        assert_eq!(result.assessment.verdict, Verdict::Neutral);
        assert_eq!(result.assessment.confidence, 35);
    }

    #[test]
    fn test_spread_only_signal() {
        let result = BondAggregator::default().aggregate(5.0, Some(&comparison(0.0)), 0.5);
        // Overvalued 30 beats Neutral 20
        assert_eq!(result.assessment.verdict, Verdict::Overvalued);
        assert_eq!(result.assessment.confidence, 30);
    }

    #[test]
    fn test_junk_override() {
        let result = BondAggregator::default().aggregate(12.5, Some(&comparison(2.5)), 3.0);
        assert_eq!(result.assessment.verdict, Verdict::JunkHighYield);
        assert_eq!(result.assessment.confidence, 50);
        // the votes are still reported
        assert_eq!(result.votes[0].verdict, Verdict::Undervalued);
    }

    #[test]
    fn test_insufficient_peers() {
        let result = BondAggregator::default().aggregate(12.5, None, 3.0);
        assert_eq!(result.assessment, Assessment::insufficient_data());
        assert!(result.votes.is_empty());
    }
}
