//! Configuration types for over-under

use crate::telemetry::LogFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub valuation: ValuationConfig,
    #[serde(default)]
    pub insight: InsightConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Input table locations
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataConfig {
    #[serde(default = "default_equities_path")]
    pub equities: PathBuf,
    #[serde(default = "default_bonds_path")]
    pub bonds: PathBuf,
    #[serde(default = "default_derivatives_path")]
    pub derivatives: PathBuf,
    #[serde(default = "default_benchmarks_path")]
    pub benchmarks: PathBuf,
}

fn default_equities_path() -> PathBuf {
    PathBuf::from("data/equities.csv")
}
fn default_bonds_path() -> PathBuf {
    PathBuf::from("data/bonds.csv")
}
fn default_derivatives_path() -> PathBuf {
    PathBuf::from("data/derivatives.csv")
}
fn default_benchmarks_path() -> PathBuf {
    PathBuf::from("data/industry_benchmarks.json")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            equities: default_equities_path(),
            bonds: default_bonds_path(),
            derivatives: default_derivatives_path(),
            benchmarks: default_benchmarks_path(),
        }
    }
}

/// Reference constants used by the valuation models
///
/// Rates are fractions (0.10 = 10%); yields and inflation are percentages.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ValuationConfig {
    /// Discount rate for DCF and Gordon estimates
    pub discount_rate: f64,
    /// Cap on the growth rate fed to the DCF estimate
    pub max_growth_rate: f64,
    /// Cap on dividend growth in the Gordon estimate
    pub max_dividend_growth: f64,
    /// Treasury yield the earnings yield is measured against
    pub reference_treasury_yield: f64,
    /// Inflation used by the rule-of-20 fair multiple
    pub inflation: f64,
    /// Treasury yield when the benchmark table has no government entry
    pub default_treasury_yield: f64,
    /// Sector credit spread when the benchmark table has none
    pub default_credit_spread: f64,
    /// Sector CAPE when the benchmark table has none
    pub default_cape_ratio: f64,
    /// Divisor for bond yield z-scores when peer yields do not vary
    pub bond_default_dispersion: f64,
    /// Yields above this (percent) are classed as junk
    pub junk_yield_threshold: f64,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            discount_rate: 0.10,
            max_growth_rate: 0.25,
            max_dividend_growth: 0.06,
            reference_treasury_yield: 4.58,
            inflation: 2.8,
            default_treasury_yield: 4.35,
            default_credit_spread: 2.0,
            default_cape_ratio: 25.0,
            bond_default_dispersion: 0.5,
            junk_yield_threshold: 10.0,
        }
    }
}

/// Natural-language explanation settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InsightConfig {
    /// Call the language model at all
    pub enabled: bool,
    pub model: String,
    pub max_tokens: u32,
    /// Upper bound on one explanation call
    pub timeout_secs: u64,
    /// Environment variable holding the API key
    pub api_key_env: String,
    pub base_url: String,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            model: "claude-sonnet-4-20250514".to_string(),
            max_tokens: 200,
            timeout_secs: 10,
            api_key_env: "ANTHROPIC_API_KEY".to_string(),
            base_url: "https://api.anthropic.com".to_string(),
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub log_format: LogFormat,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
