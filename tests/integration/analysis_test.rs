//! End-to-end analysis over the shipped sample data

use crate::sample_analyzer;
use over_under::analysis::{AnalysisError, AnalysisResult};
use over_under::repository::{AssetClass, OptionType};
use over_under::signal::{Verdict, MAX_CONFIDENCE};
use rust_decimal_macros::dec;

#[test]
fn test_junk_bond_is_flagged() {
    let result = sample_analyzer()
        .analyze(AssetClass::Bond, "Carvana 2029")
        .unwrap();
    assert_eq!(result.verdict(), Verdict::JunkHighYield);
    assert_eq!(result.confidence(), 50);
    assert_eq!(result.peer_count(), 3);
}

#[test]
fn test_wide_bond_is_undervalued() {
    let analysis = sample_analyzer().analyze_bond("Intel 2030").unwrap();
    let comparison = analysis.yield_comparison.as_ref().unwrap();

    assert_eq!(comparison.peer_count, 3);
    assert!((comparison.peer_median - 4.85).abs() < 1e-9);
    assert!(comparison.z_score > 1.5);
    // 5.90 - 4.35 treasury over a 0.9 sector average
    assert!((analysis.credit_spread - 1.55).abs() < 1e-9);
    assert!(analysis.spread_ratio > 1.5);

    assert_eq!(analysis.assessment.verdict, Verdict::Undervalued);
    assert_eq!(analysis.assessment.confidence, 70);
}

#[test]
fn test_isolated_bond_has_insufficient_data() {
    let result = sample_analyzer()
        .analyze(AssetClass::Bond, "Exxon 2035")
        .unwrap();
    assert_eq!(result.verdict(), Verdict::InsufficientData);
    assert_eq!(result.confidence(), 0);
}

#[test]
fn test_extreme_tobins_q_equity() {
    let result = sample_analyzer()
        .analyze(AssetClass::Equity, "PLTR")
        .unwrap();
    assert_eq!(result.verdict(), Verdict::ExtremelyOvervalued);
    assert_eq!(result.confidence(), 95);

    let AnalysisResult::Equity(analysis) = result else {
        panic!("expected an equity result");
    };
    assert!((analysis.tobins_q.unwrap() - 36.0).abs() < 1e-9);
    assert_eq!(analysis.peers.len(), 4);
    assert!(analysis.peer_multiples.pe.is_some());
    assert!(analysis.reasoning.total_weight > 0);
}

#[test]
fn test_equity_peers_share_sector() {
    let analysis = sample_analyzer().analyze_equity("JPM").unwrap();
    assert!(analysis
        .peers
        .iter()
        .all(|p| p.sector == "Financials" && p.ticker != "JPM"));
    // banks publish no EV/EBITDA
    assert!(analysis.peer_multiples.ev_ebitda.is_none());
}

#[test]
fn test_massively_overpriced_option() {
    let result = sample_analyzer()
        .analyze(AssetClass::Derivative, "TSLA_call_250")
        .unwrap();
    assert_eq!(result.verdict(), Verdict::MassivelyOverpriced);
    assert_eq!(result.confidence(), 95);

    let AnalysisResult::Derivative(analysis) = result else {
        panic!("expected a derivative result");
    };
    assert!((analysis.iv_premium_pct.unwrap() - 428.571).abs() < 0.01);
    assert!(analysis
        .peers
        .iter()
        .all(|p| p.underlying == "TSLA" && p.option_type == OptionType::Call));
}

#[test]
fn test_derivative_key_strike_is_decimal() {
    let analyzer = sample_analyzer();
    let by_key = analyzer.analyze_derivative_key("TSLA_call_250.00").unwrap();
    let by_parts = analyzer
        .analyze_derivative("TSLA", OptionType::Call, dec!(250))
        .unwrap();
    assert_eq!(by_key, by_parts);
}

#[test]
fn test_unknown_identifiers() {
    let analyzer = sample_analyzer();

    let err = analyzer.analyze(AssetClass::Equity, "ZZZZ").unwrap_err();
    assert!(matches!(err, AnalysisError::NotFound { .. }));
    assert_eq!(err.to_string(), "equity 'ZZZZ' not found");

    let err = analyzer
        .analyze(AssetClass::Derivative, "TSLA_call_999")
        .unwrap_err();
    assert!(matches!(err, AnalysisError::NotFound { .. }));
}

#[test]
fn test_malformed_derivative_identifiers() {
    let analyzer = sample_analyzer();
    for key in ["TSLA", "TSLA_call", "TSLA_call_abc", "TSLA_straddle_250", "A_call_1_2"] {
        let err = analyzer.analyze(AssetClass::Derivative, key).unwrap_err();
        assert!(
            matches!(err, AnalysisError::MalformedIdentifier(_)),
            "{} should be malformed",
            key
        );
    }
}

#[test]
fn test_every_instrument_is_bounded_and_repeatable() {
    let analyzer = sample_analyzer();

    for asset_class in [AssetClass::Equity, AssetClass::Bond, AssetClass::Derivative] {
        for identifier in analyzer.repository().identifiers(asset_class) {
            let first = analyzer.analyze(asset_class, &identifier).unwrap();
            let second = analyzer.analyze(asset_class, &identifier).unwrap();

            assert_eq!(first, second, "{} changed between runs", identifier);
            assert!(first.confidence() <= MAX_CONFIDENCE);
            if first.verdict() == Verdict::InsufficientData {
                assert_eq!(first.confidence(), 0);
            }
        }
    }
}

#[test]
fn test_json_shape() {
    let result = sample_analyzer()
        .analyze(AssetClass::Bond, "Carvana 2029")
        .unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["asset_class"], "bond");
    assert_eq!(json["verdict"], "JUNK_HIGH_YIELD");
    assert_eq!(json["confidence"], 50);
    assert_eq!(json["bond"]["rating"], "B-");
    assert_eq!(json["peers"].as_array().unwrap().len(), 3);
}

#[test]
fn test_concurrent_analyses_share_one_analyzer() {
    let analyzer = sample_analyzer();
    let expected = analyzer.analyze(AssetClass::Equity, "MSFT").unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| analyzer.analyze(AssetClass::Equity, "MSFT").unwrap()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
