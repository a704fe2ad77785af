//! Cash and minimum-size constraints over sized trades.
//!
//! The one nontrivial algorithm in the pipeline. Buys compete for a shared
//! cash pool, and the naive way to resolve that — walking the trades while
//! decrementing a running balance — silently favors whichever buy happens
//! to come first in the input. Here the pool and total demand are
//! aggregated first, from immutable snapshots, and every buy is then
//! scaled by the same factor. Reordering the input cannot change any
//! order's value.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::sizing::SizedTrade;

/// Final, constraint-satisfying instruction for one holding.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstrainedOrder {
    pub trade: SizedTrade,
    pub adjusted_trade_value: Decimal,
    pub action: Action,
}

impl ConstrainedOrder {
    pub fn security_id(&self) -> &str {
        &self.trade.drift.holding.security_id
    }
}

/// What to do with a holding this cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Action {
    Sell,
    Buy,
    /// Buy reduced by the shared scale factor because aggregate buy demand
    /// exceeded the cash pool.
    BuyScaled,
    /// Below the minimum tradable size; no order.
    Skip,
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Sell => write!(f, "SELL"),
            Action::Buy => write!(f, "BUY"),
            Action::BuyScaled => write!(f, "BUY (scaled)"),
            Action::Skip => write!(f, "SKIP"),
        }
    }
}

/// Apply minimum-size and cash constraints to a cycle's sized trades.
///
/// Sells are only size-filtered, never cash-constrained. Buys draw on
/// `available_cash` plus the proceeds of the surviving sells; when their
/// aggregate demand exceeds that pool, every buy is reduced by the same
/// ratio rather than filled first-come-first-served.
///
/// `available_cash` may be negative (fund already under its reserve). The
/// shortfall is then paid out of sell proceeds before any buy is funded,
/// and the pool is floored at zero so a buy is never scaled negative.
///
/// Note: `total_buy_demand` deliberately includes buys that are skipped
/// for being under `min_trade_size`, so a skipped buy's demand still
/// dilutes the factor applied to the surviving ones. Whether that is the
/// intended business rule is unconfirmed; `skipped_buy_still_dilutes_scale`
/// pins the current behavior.
pub fn apply_constraints(
    min_trade_size: Decimal,
    available_cash: Decimal,
    trades: Vec<SizedTrade>,
) -> Vec<ConstrainedOrder> {
    // 1. Partition: sells are excess to shed, buys (incl. zero) are deficits.
    let (sells, buys): (Vec<SizedTrade>, Vec<SizedTrade>) = trades
        .into_iter()
        .partition(|t| t.required_trade_value < Decimal::ZERO);

    // 2. Sells: size filter only.
    let constrained_sells: Vec<ConstrainedOrder> = sells
        .into_iter()
        .map(|trade| {
            if trade.required_trade_value.abs() < min_trade_size {
                ConstrainedOrder {
                    trade,
                    adjusted_trade_value: Decimal::ZERO,
                    action: Action::Skip,
                }
            } else {
                let adjusted_trade_value = trade.required_trade_value;
                ConstrainedOrder {
                    trade,
                    adjusted_trade_value,
                    action: Action::Sell,
                }
            }
        })
        .collect();

    // 3–5. Aggregate before touching any individual buy.
    let total_sell_proceeds: Decimal = constrained_sells
        .iter()
        .filter(|o| o.action == Action::Sell)
        .map(|o| o.adjusted_trade_value.abs())
        .sum();
    let total_available_cash =
        (available_cash + total_sell_proceeds).max(Decimal::ZERO);
    let total_buy_demand: Decimal = buys.iter().map(|t| t.required_trade_value).sum();

    // 6. Buys: size filter, then the shared scale factor.
    let constrained_buys = buys.into_iter().map(|trade| {
        if trade.required_trade_value.abs() < min_trade_size {
            ConstrainedOrder {
                trade,
                adjusted_trade_value: Decimal::ZERO,
                action: Action::Skip,
            }
        } else if total_buy_demand > total_available_cash {
            // total_buy_demand > 0 here, so the division is safe.
            let scale = total_available_cash / total_buy_demand;
            let adjusted_trade_value = trade.required_trade_value * scale;
            ConstrainedOrder {
                trade,
                adjusted_trade_value,
                action: Action::BuyScaled,
            }
        } else {
            let adjusted_trade_value = trade.required_trade_value;
            ConstrainedOrder {
                trade,
                adjusted_trade_value,
                action: Action::Buy,
            }
        }
    });

    // 7. Sells first, then buys. Cosmetic; values never depend on order.
    constrained_sells.into_iter().chain(constrained_buys).collect()
}
