//! Peer selection
//!
//! Picks the comparable instruments that form the statistical baseline
//! for a target. Each instrument class carries its own rule:
//! - equities: same sector, different ticker
//! - bonds: same sector, different issuer, maturity within a window
//! - derivatives: same underlying and type, strike within a band, minus
//!   contracts with both the target's strike and expiry
//!
//! An empty result is not an error; callers decide what fewer than two
//! peers means for them.

use crate::repository::{Bond, Derivative, Equity, InstrumentRepository};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Class-specific comparability rule
pub trait PeerCriteria: Sized {
    /// Whether `candidate` is a usable comparable for `self`
    fn is_comparable(&self, candidate: &Self, selector: &PeerSelector) -> bool;

    /// Instruments of this class in the repository matching `predicate`
    fn filter<'r, P>(repository: &'r InstrumentRepository, predicate: P) -> Vec<&'r Self>
    where
        P: Fn(&Self) -> bool;
}

/// Peer selector with its window parameters
#[derive(Debug, Clone)]
pub struct PeerSelector {
    /// Maximum maturity difference for bond peers (years)
    pub maturity_window_years: f64,
    /// Maximum strike difference for option peers, as a fraction of the target strike
    pub strike_band: Decimal,
}

impl Default for PeerSelector {
    fn default() -> Self {
        Self {
            maturity_window_years: 2.0,
            strike_band: dec!(0.10),
        }
    }
}

impl PeerSelector {
    /// Create a selector with custom windows
    pub fn new(maturity_window_years: f64, strike_band: Decimal) -> Self {
        Self {
            maturity_window_years,
            strike_band,
        }
    }

    /// Comparables of `target` among the repository's instruments of the same class
    pub fn select<'r, T: PeerCriteria>(
        &self,
        target: &T,
        repository: &'r InstrumentRepository,
    ) -> Vec<&'r T> {
        T::filter(repository, |candidate| target.is_comparable(candidate, self))
    }
}

impl PeerCriteria for Equity {
    fn is_comparable(&self, candidate: &Self, _selector: &PeerSelector) -> bool {
        candidate.sector == self.sector && candidate.ticker != self.ticker
    }

    fn filter<'r, P>(repository: &'r InstrumentRepository, predicate: P) -> Vec<&'r Self>
    where
        P: Fn(&Self) -> bool,
    {
        repository.filter_equities(predicate)
    }
}

impl PeerCriteria for Bond {
    fn is_comparable(&self, candidate: &Self, selector: &PeerSelector) -> bool {
        candidate.sector == self.sector
            && candidate.issuer != self.issuer
            && (candidate.maturity_years - self.maturity_years).abs()
                <= selector.maturity_window_years
    }

    fn filter<'r, P>(repository: &'r InstrumentRepository, predicate: P) -> Vec<&'r Self>
    where
        P: Fn(&Self) -> bool,
    {
        repository.filter_bonds(predicate)
    }
}

impl PeerCriteria for Derivative {
    fn is_comparable(&self, candidate: &Self, selector: &PeerSelector) -> bool {
        let in_band = candidate.underlying == self.underlying
            && candidate.option_type == self.option_type
            && (candidate.strike - self.strike).abs() <= self.strike * selector.strike_band;

        // Same strike with a different expiry (or the reverse) still counts
        let same_contract =
            candidate.strike == self.strike && candidate.expiry_days == self.expiry_days;

        in_band && !same_contract
    }

    fn filter<'r, P>(repository: &'r InstrumentRepository, predicate: P) -> Vec<&'r Self>
    where
        P: Fn(&Self) -> bool,
    {
        repository.filter_derivatives(predicate)
    }
}
