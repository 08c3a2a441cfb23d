//! over-under: rule-based valuation verdicts for equities, bonds and options
//!
//! This library provides the core components for:
//! - Instrument and benchmark loading from CSV/JSON
//! - Class-specific peer selection
//! - Peer z-score comparison
//! - Graham, DCF and Gordon fair values with a blended margin of safety
//! - Market-regime signals (CAPE, Fed model, rule of 20, PEG)
//! - Weighted verdict aggregation per asset class
//! - Optional natural-language explanations with a deterministic fallback

pub mod analysis;
pub mod cli;
pub mod config;
pub mod insight;
pub mod model;
pub mod peers;
pub mod repository;
pub mod signal;
pub mod stats;
pub mod telemetry;
