//! Rebalance orchestrator: drift → sizing → constraints over a whole fund.

use log::{debug, info};
use rust_decimal::Decimal;

use crate::constraints::{Action, ConstrainedOrder, apply_constraints};
use crate::drift::calculate_drift;
use crate::error::{Error, Result};
use crate::fund::Fund;
use crate::sizing::{SizedTrade, size_required_trade};

/// Compute the full order list that moves `fund` back toward target.
///
/// Pure composition of the three stages; holds no state across calls, so
/// the same `Fund` value always yields the same orders. The fund's NAV is
/// checked once up front and the same NAV feeds both drift and sizing.
pub fn rebalance(fund: &Fund) -> Result<Vec<ConstrainedOrder>> {
    if fund.total_nav <= Decimal::ZERO {
        return Err(Error::InvalidNav { nav: fund.total_nav });
    }

    let trades: Vec<SizedTrade> = fund
        .holdings
        .iter()
        .map(|h| {
            let drift = calculate_drift(fund.total_nav, h)?;
            debug!(
                "{}: weight {} vs target {} (drift {})",
                h.security_id, drift.current_weight, h.target_weight, drift.drift
            );
            Ok(size_required_trade(fund.total_nav, drift))
        })
        .collect::<Result<_>>()?;

    let available_cash = fund.cash_balance - fund.min_cash_reserve;
    let orders = apply_constraints(fund.min_trade_size, available_cash, trades);

    info!(
        "{}: {} holdings -> {} orders ({} skipped), available cash {}",
        fund.fund_id,
        fund.holdings.len(),
        orders.iter().filter(|o| o.action != Action::Skip).count(),
        orders.iter().filter(|o| o.action == Action::Skip).count(),
        available_cash,
    );

    Ok(orders)
}
