//! Analysis service

use super::{AnalysisError, AnalysisResult, BondAnalysis, DerivativeAnalysis, EquityAnalysis};
use crate::config::ValuationConfig;
use crate::model::{tobins_q, FairValueEstimator, MarketRegimeEvaluator};
use crate::peers::PeerSelector;
use crate::repository::{AssetClass, DerivativeKey, InstrumentRepository, OptionType};
use crate::signal::{
    aggregate_derivative, spread_ratio, BondAggregator, EquityAggregator, EquitySignals,
};
use crate::stats::{peer_multiples, Comparator, ZeroDispersion};
use crate::telemetry;
use rust_decimal::Decimal;
use std::sync::Arc;
use std::time::Instant;

/// Runs valuations over a shared, read-only repository
///
/// Every call is a pure function of the repository and configuration, so
/// one analyzer can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct Analyzer {
    repository: Arc<InstrumentRepository>,
    config: ValuationConfig,
    selector: PeerSelector,
    estimator: FairValueEstimator,
    regime: MarketRegimeEvaluator,
    equity_aggregator: EquityAggregator,
    bond_aggregator: BondAggregator,
}

impl Analyzer {
    /// Create an analyzer over a loaded repository
    pub fn new(repository: Arc<InstrumentRepository>, config: ValuationConfig) -> Self {
        Self {
            selector: PeerSelector::default(),
            estimator: FairValueEstimator::new(&config),
            regime: MarketRegimeEvaluator::new(&config),
            equity_aggregator: EquityAggregator::new(),
            bond_aggregator: BondAggregator::new(config.junk_yield_threshold),
            repository,
            config,
        }
    }

    pub fn repository(&self) -> &InstrumentRepository {
        &self.repository
    }

    /// Analyze any instrument by class and identifier
    ///
    /// Derivative identifiers use the `UNDERLYING_type_strike` form.
    pub fn analyze(
        &self,
        asset_class: AssetClass,
        identifier: &str,
    ) -> Result<AnalysisResult, AnalysisError> {
        let start = Instant::now();

        let result: AnalysisResult = match asset_class {
            AssetClass::Equity => self.analyze_equity(identifier)?.into(),
            AssetClass::Bond => self.analyze_bond(identifier)?.into(),
            AssetClass::Derivative => self.analyze_derivative_key(identifier)?.into(),
        };

        telemetry::record_analysis(asset_class, result.verdict(), start.elapsed());
        tracing::info!(
            asset_class = %asset_class,
            identifier,
            verdict = %result.verdict(),
            confidence = result.confidence(),
            peers = result.peer_count(),
            "Analysis complete"
        );

        Ok(result)
    }

    /// Value an equity by ticker
    pub fn analyze_equity(&self, ticker: &str) -> Result<EquityAnalysis, AnalysisError> {
        let equity = self
            .repository
            .find_equity(ticker)
            .ok_or_else(|| not_found(AssetClass::Equity, ticker))?;

        let peers = self.selector.select(equity, &self.repository);
        tracing::debug!(ticker, peers = peers.len(), "Selected equity peers");

        let tobins_q = tobins_q(equity);
        let intrinsic_values = self.estimator.estimate(equity);
        let market_metrics = self
            .regime
            .evaluate(equity, self.repository.benchmarks().cape_ratio(&equity.sector));
        let multiples = peer_multiples(equity, &peers);

        let verdict = self.equity_aggregator.aggregate(&EquitySignals {
            tobins_q,
            margin_of_safety: intrinsic_values.margin_of_safety,
            regime: &market_metrics,
            multiples: &multiples,
        });

        Ok(EquityAnalysis {
            equity: equity.clone(),
            peers: peers.into_iter().cloned().collect(),
            assessment: verdict.assessment,
            tobins_q,
            intrinsic_values,
            market_metrics,
            peer_multiples: multiples,
            reasoning: verdict.reasoning,
        })
    }

    /// Value a bond by issuer
    pub fn analyze_bond(&self, issuer: &str) -> Result<BondAnalysis, AnalysisError> {
        let bond = self
            .repository
            .find_bond(issuer)
            .ok_or_else(|| not_found(AssetClass::Bond, issuer))?;

        let peers = self.selector.select(bond, &self.repository);
        tracing::debug!(issuer, peers = peers.len(), "Selected bond peers");

        let benchmarks = self.repository.benchmarks();
        let treasury = benchmarks
            .treasury_yield()
            .unwrap_or(self.config.default_treasury_yield);
        let credit_spread = bond.yield_pct - treasury;
        let sector_spread_avg = benchmarks
            .credit_spread_avg(&bond.sector)
            .unwrap_or(self.config.default_credit_spread);
        let spread_ratio = spread_ratio(credit_spread, sector_spread_avg);

        let comparator =
            Comparator::new(ZeroDispersion::Substitute(self.config.bond_default_dispersion));
        let peer_yields: Vec<f64> = peers.iter().map(|p| p.yield_pct).collect();
        let yield_comparison = comparator.compare(bond.yield_pct, &peer_yields);

        let verdict =
            self.bond_aggregator
                .aggregate(bond.yield_pct, yield_comparison.as_ref(), spread_ratio);

        Ok(BondAnalysis {
            bond: bond.clone(),
            peers: peers.into_iter().cloned().collect(),
            assessment: verdict.assessment,
            yield_comparison,
            credit_spread,
            sector_spread_avg,
            spread_ratio,
            votes: verdict.votes,
        })
    }

    /// Value an option contract by underlying, type and strike
    pub fn analyze_derivative(
        &self,
        underlying: &str,
        option_type: OptionType,
        strike: Decimal,
    ) -> Result<DerivativeAnalysis, AnalysisError> {
        let derivative = self
            .repository
            .find_derivative(underlying, option_type, strike)
            .ok_or_else(|| {
                let key = DerivativeKey {
                    underlying: underlying.to_string(),
                    option_type,
                    strike,
                };
                not_found(AssetClass::Derivative, &key.to_string())
            })?;

        let peers = self.selector.select(derivative, &self.repository);
        tracing::debug!(
            underlying,
            option_type = %option_type,
            peers = peers.len(),
            "Selected derivative peers"
        );

        let verdict = aggregate_derivative(derivative.implied_vol, derivative.historical_vol);
        let peer_vols: Vec<f64> = peers.iter().map(|p| p.implied_vol).collect();
        let peer_implied_vol = Comparator::default().compare(derivative.implied_vol, &peer_vols);

        Ok(DerivativeAnalysis {
            derivative: derivative.clone(),
            peers: peers.into_iter().cloned().collect(),
            assessment: verdict.assessment,
            iv_premium_pct: verdict.iv_premium_pct,
            peer_implied_vol,
        })
    }

    /// Value an option contract from an `UNDERLYING_type_strike` key
    pub fn analyze_derivative_key(&self, key: &str) -> Result<DerivativeAnalysis, AnalysisError> {
        let key: DerivativeKey = key.parse()?;
        self.analyze_derivative(&key.underlying, key.option_type, key.strike)
    }
}

fn not_found(asset_class: AssetClass, identifier: &str) -> AnalysisError {
    AnalysisError::NotFound {
        asset_class,
        identifier: identifier.to_string(),
    }
}
