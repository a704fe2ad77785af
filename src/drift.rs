//! Drift calculation: current weight vs. target weight, per holding.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::fund::Holding;

/// A holding's measured allocation drift.
///
/// `drift > 0` means overweight (sell candidate), `drift < 0` underweight
/// (buy candidate).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriftResult {
    pub holding: Holding,
    pub current_weight: Decimal,
    pub drift: Decimal,
}

/// Compute one holding's weight drift against its target.
///
/// `total_nav` must be positive; a non-positive NAV makes every weight in
/// the fund undefined, so it is rejected here rather than producing a
/// meaningless quotient. Reads only its arguments, so holdings may be
/// evaluated in any order or in parallel.
pub fn calculate_drift(total_nav: Decimal, holding: &Holding) -> Result<DriftResult> {
    if total_nav <= Decimal::ZERO {
        return Err(Error::InvalidNav { nav: total_nav });
    }
    let current_weight = holding.market_value / total_nav;
    let drift = current_weight - holding.target_weight;
    Ok(DriftResult {
        holding: holding.clone(),
        current_weight,
        drift,
    })
}
