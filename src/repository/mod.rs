//! Instrument repository
//!
//! In-memory tables of equities, bonds and derivatives plus the sector
//! benchmark table. Loaded once and shared read-only by every analysis.

mod loader;
mod types;

pub use loader::{load_benchmarks, load_instruments, read_instruments};
pub use types::{
    AssetClass, BenchmarkTable, Bond, Derivative, DerivativeKey, Equity, KeyParseError,
    LoadError, OptionType, SectorBenchmark,
};

use crate::config::DataConfig;
use rust_decimal::Decimal;

/// Read-only store of every loaded instrument
#[derive(Debug, Clone, Default)]
pub struct InstrumentRepository {
    equities: Vec<Equity>,
    bonds: Vec<Bond>,
    derivatives: Vec<Derivative>,
    benchmarks: BenchmarkTable,
}

impl InstrumentRepository {
    /// Create a repository from already-loaded tables
    pub fn new(
        equities: Vec<Equity>,
        bonds: Vec<Bond>,
        derivatives: Vec<Derivative>,
        benchmarks: BenchmarkTable,
    ) -> Self {
        Self {
            equities,
            bonds,
            derivatives,
            benchmarks,
        }
    }

    /// Load all tables from the configured paths
    pub fn load(config: &DataConfig) -> Result<Self, LoadError> {
        let repository = Self::new(
            load_instruments(&config.equities)?,
            load_instruments(&config.bonds)?,
            load_instruments(&config.derivatives)?,
            load_benchmarks(&config.benchmarks)?,
        );

        tracing::info!(
            equities = repository.equities.len(),
            bonds = repository.bonds.len(),
            derivatives = repository.derivatives.len(),
            "Instrument repository ready"
        );

        Ok(repository)
    }

    pub fn equities(&self) -> &[Equity] {
        &self.equities
    }

    pub fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    pub fn derivatives(&self) -> &[Derivative] {
        &self.derivatives
    }

    pub fn benchmarks(&self) -> &BenchmarkTable {
        &self.benchmarks
    }

    /// First equity with the given ticker
    pub fn find_equity(&self, ticker: &str) -> Option<&Equity> {
        self.equities.iter().find(|e| e.ticker == ticker)
    }

    /// First bond from the given issuer
    pub fn find_bond(&self, issuer: &str) -> Option<&Bond> {
        self.bonds.iter().find(|b| b.issuer == issuer)
    }

    /// First contract matching underlying, type and strike
    pub fn find_derivative(
        &self,
        underlying: &str,
        option_type: OptionType,
        strike: Decimal,
    ) -> Option<&Derivative> {
        self.derivatives.iter().find(|d| {
            d.underlying == underlying && d.option_type == option_type && d.strike == strike
        })
    }

    /// Equities matching a predicate, in table order
    pub fn filter_equities<P>(&self, predicate: P) -> Vec<&Equity>
    where
        P: Fn(&Equity) -> bool,
    {
        self.equities.iter().filter(|e| predicate(e)).collect()
    }

    /// Bonds matching a predicate, in table order
    pub fn filter_bonds<P>(&self, predicate: P) -> Vec<&Bond>
    where
        P: Fn(&Bond) -> bool,
    {
        self.bonds.iter().filter(|b| predicate(b)).collect()
    }

    /// Derivatives matching a predicate, in table order
    pub fn filter_derivatives<P>(&self, predicate: P) -> Vec<&Derivative>
    where
        P: Fn(&Derivative) -> bool,
    {
        self.derivatives.iter().filter(|d| predicate(d)).collect()
    }

    /// Selectable identifiers for one class, in table order
    pub fn identifiers(&self, asset_class: AssetClass) -> Vec<String> {
        match asset_class {
            AssetClass::Equity => self.equities.iter().map(|e| e.ticker.clone()).collect(),
            AssetClass::Bond => self.bonds.iter().map(|b| b.issuer.clone()).collect(),
            AssetClass::Derivative => self
                .derivatives
                .iter()
                .map(|d| d.key().to_string())
                .collect(),
        }
    }
}
