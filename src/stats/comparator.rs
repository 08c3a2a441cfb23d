//! Peer-relative deviation statistics

use serde::{Deserialize, Serialize};

/// Minimum number of valid peer values for a comparison
pub const MIN_PEERS: usize = 2;

/// How a zero peer dispersion is treated
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZeroDispersion {
    /// Report a z-score of 0
    ZeroScore,
    /// Divide by a fixed fallback dispersion instead
    Substitute(f64),
}

/// Target value measured against its peers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub value: f64,
    pub peer_median: f64,
    /// Sample standard deviation of the peer values (n - 1)
    pub peer_std: f64,
    pub peer_count: usize,
    /// `value - peer_median`, in the metric's own units
    pub deviation: f64,
    pub z_score: f64,
}

/// Statistical comparator
#[derive(Debug, Clone, Copy)]
pub struct Comparator {
    zero_dispersion: ZeroDispersion,
}

impl Comparator {
    pub fn new(zero_dispersion: ZeroDispersion) -> Self {
        Self { zero_dispersion }
    }

    /// Compare `value` against `peer_values`
    ///
    /// Non-finite peer values are ignored. Returns `None` when fewer than
    /// [`MIN_PEERS`] valid values remain.
    pub fn compare(&self, value: f64, peer_values: &[f64]) -> Option<ComparisonResult> {
        let mut values: Vec<f64> = peer_values.iter().copied().filter(|v| v.is_finite()).collect();
        if values.len() < MIN_PEERS {
            return None;
        }

        values.sort_by(|a, b| a.total_cmp(b));
        let peer_median = median_sorted(&values);
        let peer_std = sample_std(&values);
        let deviation = value - peer_median;

        let z_score = if peer_std > 0.0 {
            deviation / peer_std
        } else {
            match self.zero_dispersion {
                ZeroDispersion::ZeroScore => 0.0,
                ZeroDispersion::Substitute(fallback) => deviation / fallback,
            }
        };

        Some(ComparisonResult {
            value,
            peer_median,
            peer_std,
            peer_count: values.len(),
            deviation,
            z_score,
        })
    }
}

impl Default for Comparator {
    fn default() -> Self {
        Self::new(ZeroDispersion::ZeroScore)
    }
}

/// Median of an already sorted, non-empty slice
fn median_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    }
}

/// Median of arbitrary values, `None` if empty
pub fn median(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    Some(median_sorted(&sorted))
}

/// Sample standard deviation with an n - 1 denominator
pub fn sample_std(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    variance.sqrt()
}
