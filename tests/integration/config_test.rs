//! Configuration loading

use over_under::config::{Config, ValuationConfig};
use over_under::telemetry::LogFormat;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_config_example_loads() {
    let example = concat!(env!("CARGO_MANIFEST_DIR"), "/config.toml.example");
    let config = Config::load(example).unwrap();

    assert_eq!(config.valuation, ValuationConfig::default());
    assert_eq!(config.insight.model, "claude-sonnet-4-20250514");
    assert_eq!(config.telemetry.log_format, LogFormat::Pretty);
}

#[test]
fn test_partial_config_uses_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[valuation]\njunk_yield_threshold = 9.0\n\n[telemetry]\nlog_format = \"json\""
    )
    .unwrap();

    let config = Config::load(file.path()).unwrap();
    assert_eq!(config.valuation.junk_yield_threshold, 9.0);
    assert_eq!(config.valuation.discount_rate, 0.10);
    assert_eq!(config.telemetry.log_format, LogFormat::Json);
    assert!(config.insight.enabled);
}

#[test]
fn test_missing_config_file_errors() {
    assert!(Config::load("/definitely/not/here.toml").is_err());
}
