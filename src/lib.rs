//! # fund-rebalancer
//!
//! An order-independent fund rebalancing pipeline: given a fund's current
//! holdings, target allocation weights, and cash constraints, compute the
//! trades that bring the fund back toward target.
//!
//! ## Pipeline
//!
//! Four pure stages composed leaves-first, each producing a new immutable
//! value: `Holding` → [`DriftResult`] → [`SizedTrade`] → [`ConstrainedOrder`].
//!
//! - **Drift**: current weight vs. target weight, per holding
//! - **Sizing**: drift → signed required trade value
//! - **Constraints**: minimum-size filtering, then buys scaled
//!   proportionally against available cash plus sell proceeds
//! - **Rebalance**: orchestrates the stages over a whole fund
//!
//! Cash shortfalls are resolved by one shared scale factor computed before
//! any individual buy is touched, so reordering the holdings never changes
//! any order's value.
//!
//! ## Quick start
//!
//! ```
//! use fund_rebalancer::{Action, Fund, Holding, rebalance};
//! use rust_decimal_macros::dec;
//!
//! let fund = Fund {
//!     fund_id: "BAL-GROWTH".into(),
//!     holdings: vec![
//!         Holding {
//!             security_id: "CDN-BOND-ETF".into(),
//!             units: dec!(32_000),
//!             market_value: dec!(3_200_000),
//!             target_weight: dec!(0.30),
//!         },
//!         Holding {
//!             security_id: "CDN-EQ-ETF".into(),
//!             units: dec!(56_000),
//!             market_value: dec!(2_800_000),
//!             target_weight: dec!(0.30),
//!         },
//!     ],
//!     total_nav: dec!(10_000_000),
//!     cash_balance: dec!(200_000),
//!     min_cash_reserve: dec!(100_000),
//!     min_trade_size: dec!(5_000),
//! };
//!
//! let orders = rebalance(&fund).unwrap();
//! assert_eq!(orders[0].action, Action::Sell);
//! assert_eq!(orders[0].adjusted_trade_value, dec!(-200_000));
//! ```
//!
//! All monetary values are [`rust_decimal::Decimal`]; weights computed as
//! fractions of NAV stay exact instead of accumulating binary rounding
//! across holdings.

pub mod constraints;
pub mod drift;
pub mod error;
pub mod fund;
pub mod policy;
pub mod rebalance;
pub mod sizing;

pub use constraints::{Action, ConstrainedOrder, apply_constraints};
pub use drift::{DriftResult, calculate_drift};
pub use error::{Error, Result};
pub use fund::{Fund, FundSpec, Holding};
pub use policy::Policy;
pub use rebalance::rebalance;
pub use sizing::{SizedTrade, size_required_trade};
