//! Loading instrument tables from disk

use crate::sample_data;
use over_under::config::DataConfig;
use over_under::repository::{AssetClass, InstrumentRepository, LoadError, OptionType};
use rust_decimal_macros::dec;
use std::fs;
use tempfile::TempDir;

fn write_tables(dir: &TempDir, bonds: &str) -> DataConfig {
    let config = DataConfig {
        equities: dir.path().join("equities.csv"),
        bonds: dir.path().join("bonds.csv"),
        derivatives: dir.path().join("derivatives.csv"),
        benchmarks: dir.path().join("benchmarks.json"),
    };

    fs::write(
        &config.equities,
        "ticker,company,sector,price,market_cap_b,total_assets_b,total_liabilities_b,net_income_b,fcf_b,shares_out_m,eps_growth_5yr,dividend_yield,pe_ratio,pb_ratio,ev_ebitda\n\
         ACME,Acme Corp,Industrials,42.10,12,20,11,0.9,0.8,285,6.0,1.5,13.3,,\n",
    )
    .unwrap();
    fs::write(&config.bonds, bonds).unwrap();
    fs::write(
        &config.derivatives,
        "underlying,type,strike,expiry_days,implied_vol,historical_vol,premium\n\
         ACME,put,40.5,21,0.31,0.28,\n",
    )
    .unwrap();
    fs::write(
        &config.benchmarks,
        r#"{"Government": {"bond_yield_avg": 4.1}, "Industrials": {"cape_ratio": 22.0}}"#,
    )
    .unwrap();

    config
}

#[test]
fn test_load_from_disk() {
    let dir = TempDir::new().unwrap();
    let config = write_tables(
        &dir,
        "issuer,sector,maturity_years,yield_pct,rating,coupon_pct\n\
         Acme 2030,Industrials,5,5.2,BBB,\n",
    );

    let repository = InstrumentRepository::load(&config).unwrap();

    let equity = repository.find_equity("ACME").unwrap();
    assert_eq!(equity.price, dec!(42.10));
    assert!(equity.pb_ratio.is_none());

    let option = repository
        .find_derivative("ACME", OptionType::Put, dec!(40.5))
        .unwrap();
    assert_eq!(option.expiry_days, 21);
    assert!(option.premium.is_none());

    assert_eq!(repository.benchmarks().treasury_yield(), Some(4.1));
    assert_eq!(repository.benchmarks().cape_ratio("Industrials"), Some(22.0));
    assert_eq!(
        repository.identifiers(AssetClass::Derivative),
        vec!["ACME_put_40.5"]
    );
}

#[test]
fn test_malformed_row() {
    let dir = TempDir::new().unwrap();
    let config = write_tables(
        &dir,
        "issuer,sector,maturity_years,yield_pct,rating,coupon_pct\n\
         Acme 2030,Industrials,soon,5.2,BBB,\n",
    );

    let err = InstrumentRepository::load(&config).unwrap_err();
    assert!(matches!(err, LoadError::Csv { .. }));
    assert!(err.to_string().contains("bonds.csv"));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let mut config = write_tables(
        &dir,
        "issuer,sector,maturity_years,yield_pct,rating,coupon_pct\n",
    );
    config.derivatives = dir.path().join("absent.csv");

    let err = InstrumentRepository::load(&config).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}

#[test]
fn test_sample_data_loads() {
    let repository = InstrumentRepository::load(&sample_data()).unwrap();
    assert_eq!(repository.equities().len(), 10);
    assert_eq!(repository.bonds().len(), 16);
    assert_eq!(repository.derivatives().len(), 10);
    assert_eq!(repository.benchmarks().treasury_yield(), Some(4.35));
}
