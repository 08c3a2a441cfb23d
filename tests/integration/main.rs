//! Integration tests for over-under

mod analysis_test;
mod config_test;
mod insight_test;
mod repository_test;

use over_under::config::{DataConfig, ValuationConfig};
use over_under::repository::InstrumentRepository;
use std::path::PathBuf;
use std::sync::Arc;

/// Data tables shipped with the crate
pub fn sample_data() -> DataConfig {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data");
    DataConfig {
        equities: root.join("equities.csv"),
        bonds: root.join("bonds.csv"),
        derivatives: root.join("derivatives.csv"),
        benchmarks: root.join("industry_benchmarks.json"),
    }
}

pub fn sample_analyzer() -> over_under::analysis::Analyzer {
    let repository = InstrumentRepository::load(&sample_data()).unwrap();
    over_under::analysis::Analyzer::new(Arc::new(repository), ValuationConfig::default())
}
