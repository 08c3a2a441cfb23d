//! Instrument and benchmark record types

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Instrument class handled by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AssetClass {
    /// Listed stocks
    Equity,
    /// Fixed income
    Bond,
    /// Listed options
    Derivative,
}

impl AssetClass {
    /// Stable lowercase label, used for metrics and serialized results
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetClass::Equity => "equity",
            AssetClass::Bond => "bond",
            AssetClass::Derivative => "derivative",
        }
    }
}

impl fmt::Display for AssetClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A listed stock with its aggregate financials
///
/// Aggregates suffixed `_b` are in billions, `shares_out_m` in millions.
/// Growth and dividend yield are percentages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Equity {
    pub ticker: String,
    pub company: String,
    pub sector: String,
    pub price: Decimal,
    pub market_cap_b: Decimal,
    pub total_assets_b: Decimal,
    pub total_liabilities_b: Decimal,
    pub net_income_b: Decimal,
    pub fcf_b: Decimal,
    pub shares_out_m: Decimal,
    pub eps_growth_5yr: f64,
    pub dividend_yield: f64,
    pub pe_ratio: f64,
    #[serde(default)]
    pub pb_ratio: Option<f64>,
    #[serde(default)]
    pub ev_ebitda: Option<f64>,
}

/// A fixed income issue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bond {
    pub issuer: String,
    pub sector: String,
    pub maturity_years: f64,
    /// Yield to maturity in percent
    pub yield_pct: f64,
    pub rating: String,
    #[serde(default)]
    pub coupon_pct: Option<f64>,
}

/// Option right
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "call" => Ok(OptionType::Call),
            "put" => Ok(OptionType::Put),
            other => Err(format!("unknown option type '{}'", other)),
        }
    }
}

/// A listed option contract
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Derivative {
    pub underlying: String,
    #[serde(rename = "type")]
    pub option_type: OptionType,
    pub strike: Decimal,
    pub expiry_days: u32,
    /// Annualized implied volatility as a fraction (0.35 = 35%)
    pub implied_vol: f64,
    /// Annualized realized volatility as a fraction
    pub historical_vol: f64,
    #[serde(default)]
    pub premium: Option<Decimal>,
}

impl Derivative {
    /// Lookup key in `UNDERLYING_type_strike` form
    pub fn key(&self) -> DerivativeKey {
        DerivativeKey {
            underlying: self.underlying.clone(),
            option_type: self.option_type,
            strike: self.strike,
        }
    }
}

/// Parsed derivative identifier, e.g. `AAPL_call_150`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DerivativeKey {
    pub underlying: String,
    pub option_type: OptionType,
    pub strike: Decimal,
}

/// Error parsing a derivative identifier
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid derivative identifier '{input}': {reason} (expected UNDERLYING_type_strike)")]
pub struct KeyParseError {
    pub input: String,
    pub reason: String,
}

impl FromStr for DerivativeKey {
    type Err = KeyParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fail = |reason: String| KeyParseError {
            input: s.to_string(),
            reason,
        };

        let parts: Vec<&str> = s.split('_').collect();
        if parts.len() != 3 {
            return Err(fail(format!("expected 3 parts, found {}", parts.len())));
        }
        if parts[0].is_empty() {
            return Err(fail("empty underlying".to_string()));
        }

        let option_type = parts[1].parse::<OptionType>().map_err(fail)?;
        let strike = Decimal::from_str(parts[2])
            .map_err(|e| fail(format!("bad strike '{}': {}", parts[2], e)))?;

        Ok(Self {
            underlying: parts[0].to_string(),
            option_type,
            strike,
        })
    }
}

impl fmt::Display for DerivativeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}_{}_{}",
            self.underlying,
            self.option_type,
            self.strike.normalize()
        )
    }
}

/// Reference ratios for one sector
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SectorBenchmark {
    /// Average bond yield in the sector; the `Government` entry is the treasury yield
    #[serde(default, alias = "bond_yield_avg")]
    pub treasury_yield_avg: Option<f64>,
    #[serde(default)]
    pub credit_spread_avg: Option<f64>,
    #[serde(default)]
    pub cape_ratio: Option<f64>,
}

/// Sector name to benchmark ratios
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BenchmarkTable(BTreeMap<String, SectorBenchmark>);

impl BenchmarkTable {
    /// Sector holding the risk-free reference yield
    pub const GOVERNMENT: &'static str = "Government";

    pub fn new(entries: BTreeMap<String, SectorBenchmark>) -> Self {
        Self(entries)
    }

    pub fn get(&self, sector: &str) -> Option<&SectorBenchmark> {
        self.0.get(sector)
    }

    /// Treasury yield average published under the government sector
    pub fn treasury_yield(&self) -> Option<f64> {
        self.get(Self::GOVERNMENT)
            .and_then(|b| b.treasury_yield_avg)
    }

    pub fn credit_spread_avg(&self, sector: &str) -> Option<f64> {
        self.get(sector).and_then(|b| b.credit_spread_avg)
    }

    pub fn cape_ratio(&self, sector: &str) -> Option<f64> {
        self.get(sector).and_then(|b| b.cape_ratio)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Repository loading errors
#[derive(Debug, Error)]
pub enum LoadError {
    /// File could not be opened or read
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// Malformed CSV row or header
    #[error("malformed CSV in {path}: {source}")]
    Csv {
        path: String,
        #[source]
        source: csv::Error,
    },
    /// Malformed benchmark JSON
    #[error("malformed benchmark JSON in {path}: {source}")]
    Json {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
