//! Equity peer multiple comparisons

use super::{Comparator, ComparisonResult, ZeroDispersion, MIN_PEERS};
use crate::repository::Equity;
use serde::{Deserialize, Serialize};

/// One valuation multiple measured against sector peers
///
/// Counted in the equity vote whenever two peers report the metric. When
/// the target does not report it, the peer statistics are kept but the
/// value, deviation and z-score are absent and the multiple casts no vote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MultipleComparison {
    pub value: Option<f64>,
    pub peer_median: f64,
    pub peer_std: f64,
    pub peer_count: usize,
    pub deviation: Option<f64>,
    pub z_score: Option<f64>,
}

impl MultipleComparison {
    fn voting(result: ComparisonResult) -> Self {
        Self {
            value: Some(result.value),
            peer_median: result.peer_median,
            peer_std: result.peer_std,
            peer_count: result.peer_count,
            deviation: Some(result.deviation),
            z_score: Some(result.z_score),
        }
    }

    fn unreported(result: ComparisonResult) -> Self {
        Self {
            value: None,
            peer_median: result.peer_median,
            peer_std: result.peer_std,
            peer_count: result.peer_count,
            deviation: None,
            z_score: None,
        }
    }
}

/// P/E, P/B and EV/EBITDA measured against sector peers
///
/// A metric is absent when fewer than two peers report it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeerMultiples {
    pub pe: Option<MultipleComparison>,
    pub pb: Option<MultipleComparison>,
    pub ev_ebitda: Option<MultipleComparison>,
}

impl PeerMultiples {
    /// Counted comparisons, in P/E, P/B, EV/EBITDA order
    pub fn present(&self) -> impl Iterator<Item = &MultipleComparison> {
        [&self.pe, &self.pb, &self.ev_ebitda]
            .into_iter()
            .filter_map(|m| m.as_ref())
    }
}

/// Compare the target's valuation multiples with its peers
pub fn peer_multiples(target: &Equity, peers: &[&Equity]) -> PeerMultiples {
    if peers.len() < MIN_PEERS {
        return PeerMultiples::default();
    }

    let comparator = Comparator::new(ZeroDispersion::ZeroScore);

    PeerMultiples {
        pe: compare_metric(&comparator, Some(target.pe_ratio), peers, |e| Some(e.pe_ratio)),
        pb: compare_metric(&comparator, target.pb_ratio, peers, |e| e.pb_ratio),
        ev_ebitda: compare_metric(&comparator, target.ev_ebitda, peers, |e| e.ev_ebitda),
    }
}

fn compare_metric<F>(
    comparator: &Comparator,
    value: Option<f64>,
    peers: &[&Equity],
    extract: F,
) -> Option<MultipleComparison>
where
    F: Fn(&Equity) -> Option<f64>,
{
    let peer_values: Vec<f64> = peers.iter().filter_map(|p| extract(p)).collect();

    match value.filter(|v| v.is_finite()) {
        Some(value) => comparator
            .compare(value, &peer_values)
            .map(MultipleComparison::voting),
        None => comparator
            .compare(0.0, &peer_values)
            .map(MultipleComparison::unreported),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn equity(ticker: &str, pe: f64, pb: Option<f64>, ev: Option<f64>) -> Equity {
        Equity {
            ticker: ticker.to_string(),
            company: ticker.to_string(),
            sector: "Technology".to_string(),
            price: dec!(100),
            market_cap_b: dec!(100),
            total_assets_b: dec!(50),
            total_liabilities_b: dec!(20),
            net_income_b: dec!(5),
            fcf_b: dec!(4),
            shares_out_m: dec!(1000),
            eps_growth_5yr: 10.0,
            dividend_yield: 0.0,
            pe_ratio: pe,
            pb_ratio: pb,
            ev_ebitda: ev,
        }
    }

    #[test]
    fn test_multiples_skip_sparse_metrics() {
        let target = equity("T", 40.0, Some(10.0), Some(30.0));
        let a = equity("A", 20.0, Some(4.0), None);
        let b = equity("B", 22.0, None, None);
        let c = equity("C", 24.0, Some(6.0), Some(15.0));

        let multiples = peer_multiples(&target, &[&a, &b, &c]);
        let pe = multiples.pe.as_ref().unwrap();
        assert_eq!(pe.peer_median, 22.0);
        assert!(pe.z_score.unwrap() > 1.5);

        let pb = multiples.pb.as_ref().unwrap();
        assert_eq!(pb.peer_count, 2);
        assert_eq!(pb.peer_median, 5.0);

        // only one peer reports EV/EBITDA
        assert!(multiples.ev_ebitda.is_none());
        assert_eq!(multiples.present().count(), 2);
    }

    #[test]
    fn test_multiples_need_two_peers() {
        let target = equity("T", 40.0, Some(10.0), Some(30.0));
        let a = equity("A", 20.0, Some(4.0), Some(12.0));
        let multiples = peer_multiples(&target, &[&a]);
        assert_eq!(multiples, PeerMultiples::default());
    }

    #[test]
    fn test_unreported_target_metric_is_still_counted() {
        let target = equity("T", 40.0, None, None);
        let a = equity("A", 20.0, Some(2.0), Some(12.0));
        let b = equity("B", 22.0, Some(3.0), None);
        let multiples = peer_multiples(&target, &[&a, &b]);

        assert!(multiples.pe.as_ref().unwrap().z_score.is_some());

        let pb = multiples.pb.as_ref().unwrap();
        assert_eq!(pb.peer_count, 2);
        assert_eq!(pb.peer_median, 2.5);
        assert!(pb.value.is_none());
        assert!(pb.z_score.is_none());
        assert!(pb.deviation.is_none());

        // one peer reports EV/EBITDA, so it is not counted at all
        assert!(multiples.ev_ebitda.is_none());
        assert_eq!(multiples.present().count(), 2);
    }
}
