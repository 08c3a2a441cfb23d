//! Statistical comparison module
//!
//! Median, sample standard deviation and z-score of a target value
//! against a peer set

mod comparator;
mod multiples;

pub use comparator::{
    median, sample_std, Comparator, ComparisonResult, ZeroDispersion, MIN_PEERS,
};
pub use multiples::{peer_multiples, MultipleComparison, PeerMultiples};
