//! Derivative verdict from the implied volatility premium

use super::{Assessment, Verdict};
use serde::{Deserialize, Serialize};

/// Derivative verdict with the premium behind it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivativeVerdict {
    #[serde(flatten)]
    pub assessment: Assessment,
    /// (IV - HV) / HV in percent; absent when HV is not positive
    pub iv_premium_pct: Option<f64>,
}

/// Implied volatility premium over historical, in percent
pub fn iv_premium_pct(implied_vol: f64, historical_vol: f64) -> Option<f64> {
    if historical_vol > 0.0 && implied_vol.is_finite() {
        Some((implied_vol - historical_vol) / historical_vol * 100.0)
    } else {
        None
    }
}

/// Classify an option by its volatility premium
pub fn aggregate_derivative(implied_vol: f64, historical_vol: f64) -> DerivativeVerdict {
    let Some(premium) = iv_premium_pct(implied_vol, historical_vol) else {
        return DerivativeVerdict {
            assessment: Assessment::insufficient_data(),
            iv_premium_pct: None,
        };
    };

    let assessment = if premium > 100.0 {
        Assessment::new(Verdict::MassivelyOverpriced, 95)
    } else if premium > 50.0 {
        Assessment::new(Verdict::Overvalued, 80)
    } else if premium < -10.0 {
        Assessment::new(Verdict::Undervalued, 75)
    } else {
        Assessment::new(Verdict::FairlyValued, 65)
    };

    DerivativeVerdict {
        assessment,
        iv_premium_pct: Some(premium),
    }
}
