//! Trade sizing: converts drift into a signed required trade value.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::drift::DriftResult;

/// The unconstrained trade that would erase a holding's drift.
///
/// Sign convention: negative = sell the excess, positive = buy the
/// deficit, zero = already on target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizedTrade {
    pub drift: DriftResult,
    pub required_trade_value: Decimal,
}

/// Size the trade that brings a holding exactly back to target.
///
/// `total_nav` must be the same NAV the drift was computed against; the
/// orchestrator guarantees that pairing.
pub fn size_required_trade(total_nav: Decimal, drift: DriftResult) -> SizedTrade {
    let required_trade_value = -drift.drift * total_nav;
    SizedTrade {
        drift,
        required_trade_value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drift::calculate_drift;
    use crate::fund::Holding;
    use rust_decimal_macros::dec;

    fn drift_for(market_value: Decimal, target_weight: Decimal, nav: Decimal) -> DriftResult {
        let holding = Holding {
            security_id: "CDN-EQ-ETF".into(),
            units: dec!(1000),
            market_value,
            target_weight,
        };
        calculate_drift(nav, &holding).unwrap()
    }

    #[test]
    fn overweight_sizes_to_sell() {
        let nav = dec!(1_000_000);
        let trade = size_required_trade(nav, drift_for(dec!(400_000), dec!(0.30), nav));
        // drift +0.10 → sell 100,000
        assert_eq!(trade.required_trade_value, dec!(-100_000));
    }

    #[test]
    fn underweight_sizes_to_buy() {
        let nav = dec!(1_000_000);
        let trade = size_required_trade(nav, drift_for(dec!(200_000), dec!(0.30), nav));
        assert_eq!(trade.required_trade_value, dec!(100_000));
    }

    #[test]
    fn on_target_sizes_to_zero() {
        let nav = dec!(1_000_000);
        let trade = size_required_trade(nav, drift_for(dec!(250_000), dec!(0.25), nav));
        assert_eq!(trade.required_trade_value, Decimal::ZERO);
    }
}
