//! Fund snapshot (fund.json) loading and validation.
//!
//! A `FundSpec` is the on-disk snapshot produced by the data-loading side
//! (positions, prices, cash). `into_fund` resolves the tradable minimums
//! against the house [`Policy`](crate::policy::Policy) and yields the
//! immutable [`Fund`] the pipeline operates on.

use std::collections::HashSet;
use std::path::Path;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::policy::Policy;

/// One position: current units and market value, plus the fraction of NAV
/// it is supposed to represent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub security_id: String,
    pub units: Decimal,
    pub market_value: Decimal,
    pub target_weight: Decimal,
}

/// A fund's full state for one rebalance cycle. Built once by the loader
/// and never mutated by the pipeline.
///
/// `total_nav` must be positive (weights are undefined otherwise); the
/// cash fields are non-negative by convention but the pipeline does not
/// enforce that, it only defines behavior for the shortfall case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fund {
    pub fund_id: String,
    pub holdings: Vec<Holding>,
    pub total_nav: Decimal,
    pub cash_balance: Decimal,
    pub min_cash_reserve: Decimal,
    pub min_trade_size: Decimal,
}

/// A fund snapshot file from the position loader.
#[derive(Debug, Clone, Deserialize)]
pub struct FundSpec {
    pub as_of: DateTime<Utc>,
    pub fund_id: String,
    pub total_nav: Decimal,
    pub cash_balance: Decimal,
    pub holdings: Vec<Holding>,
    #[serde(default)]
    pub constraints: Option<Constraints>,
}

/// Optional per-fund overrides for the house minimums.
#[derive(Debug, Clone, Deserialize)]
pub struct Constraints {
    pub min_trade_size: Option<Decimal>,
    pub min_cash_reserve: Option<Decimal>,
}

impl FundSpec {
    /// Load and validate a fund.json file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::FundRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let spec: FundSpec = serde_json::from_str(&contents)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Parse from a JSON string (useful for testing).
    pub fn from_json(json: &str) -> Result<Self> {
        let spec: FundSpec = serde_json::from_str(json)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Validate the snapshot.
    fn validate(&self) -> Result<()> {
        if self.fund_id.is_empty() {
            return Err(Error::Fund("fund_id must not be empty".into()));
        }
        if self.total_nav <= Decimal::ZERO {
            return Err(Error::InvalidNav { nav: self.total_nav });
        }

        // Check for duplicate securities
        let mut seen = HashSet::new();
        for h in &self.holdings {
            if h.security_id.is_empty() {
                return Err(Error::Fund("empty security_id".into()));
            }
            if !seen.insert(&h.security_id) {
                return Err(Error::Fund(format!(
                    "duplicate security: {}",
                    h.security_id
                )));
            }
        }

        // Validate weight magnitudes
        for h in &self.holdings {
            if h.target_weight < Decimal::ZERO || h.target_weight > Decimal::ONE {
                return Err(Error::Fund(format!(
                    "target weight for {} ({}) outside [0, 1]",
                    h.security_id, h.target_weight
                )));
            }
        }

        let weight_sum: Decimal = self.holdings.iter().map(|h| h.target_weight).sum();
        if weight_sum > Decimal::ONE {
            return Err(Error::Fund(format!(
                "target weights sum to {weight_sum} (> 1)"
            )));
        }

        Ok(())
    }

    /// Resolve minimums against the house policy and build the pipeline's
    /// `Fund` value. File-level constraints win over policy defaults.
    pub fn into_fund(self, policy: &Policy) -> Fund {
        let (min_trade_size, min_cash_reserve) = match &self.constraints {
            Some(c) => (
                c.min_trade_size.unwrap_or(policy.min_trade_size),
                c.min_cash_reserve.unwrap_or(policy.min_cash_reserve),
            ),
            None => (policy.min_trade_size, policy.min_cash_reserve),
        };
        Fund {
            fund_id: self.fund_id,
            holdings: self.holdings,
            total_nav: self.total_nav,
            cash_balance: self.cash_balance,
            min_cash_reserve,
            min_trade_size,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn valid_json() -> &'static str {
        r#"{
            "as_of": "2026-08-28T21:00:00Z",
            "fund_id": "BAL-GROWTH",
            "total_nav": "10000000",
            "cash_balance": "200000",
            "holdings": [
                { "security_id": "CDN-BOND-ETF", "units": "32000", "market_value": "3200000", "target_weight": "0.30" },
                { "security_id": "CDN-EQ-ETF",   "units": "56000", "market_value": "2800000", "target_weight": "0.30" },
                { "security_id": "US-EQ-ETF",    "units": "25000", "market_value": "2500000", "target_weight": "0.25" },
                { "security_id": "INTL-EQ-ETF",  "units": "13000", "market_value": "1300000", "target_weight": "0.15" }
            ]
        }"#
    }

    #[test]
    fn parse_valid_fund() {
        let spec = FundSpec::from_json(valid_json()).unwrap();
        assert_eq!(spec.fund_id, "BAL-GROWTH");
        assert_eq!(spec.holdings.len(), 4);
        assert_eq!(spec.total_nav, dec!(10_000_000));
        assert_eq!(spec.holdings[0].target_weight, dec!(0.30));
    }

    #[test]
    fn into_fund_uses_policy_defaults() {
        let policy = Policy {
            min_trade_size: dec!(5000),
            min_cash_reserve: dec!(100_000),
        };
        let fund = FundSpec::from_json(valid_json()).unwrap().into_fund(&policy);
        assert_eq!(fund.min_trade_size, dec!(5000));
        assert_eq!(fund.min_cash_reserve, dec!(100_000));
    }

    #[test]
    fn file_constraints_override_policy() {
        let json = r#"{
            "as_of": "2026-08-28T21:00:00Z",
            "fund_id": "BAL-GROWTH",
            "total_nav": "1000000",
            "cash_balance": "50000",
            "holdings": [
                { "security_id": "US-EQ-ETF", "units": "5000", "market_value": "500000", "target_weight": "0.50" }
            ],
            "constraints": { "min_trade_size": "250" }
        }"#;
        let policy = Policy {
            min_trade_size: dec!(1000),
            min_cash_reserve: dec!(20_000),
        };
        let fund = FundSpec::from_json(json).unwrap().into_fund(&policy);
        assert_eq!(fund.min_trade_size, dec!(250));
        // Unset override falls back to policy
        assert_eq!(fund.min_cash_reserve, dec!(20_000));
    }

    #[test]
    fn reject_zero_nav() {
        let json = valid_json().replace("\"total_nav\": \"10000000\"", "\"total_nav\": \"0\"");
        assert!(matches!(
            FundSpec::from_json(&json),
            Err(Error::InvalidNav { .. })
        ));
    }

    #[test]
    fn reject_duplicate_security() {
        let json = r#"{
            "as_of": "2026-08-28T21:00:00Z",
            "fund_id": "F1",
            "total_nav": "1000000",
            "cash_balance": "0",
            "holdings": [
                { "security_id": "US-EQ-ETF", "units": "1", "market_value": "500000", "target_weight": "0.40" },
                { "security_id": "US-EQ-ETF", "units": "1", "market_value": "500000", "target_weight": "0.40" }
            ]
        }"#;
        assert!(FundSpec::from_json(json).is_err());
    }

    #[test]
    fn reject_weight_over_one() {
        let json = r#"{
            "as_of": "2026-08-28T21:00:00Z",
            "fund_id": "F1",
            "total_nav": "1000000",
            "cash_balance": "0",
            "holdings": [
                { "security_id": "US-EQ-ETF", "units": "1", "market_value": "500000", "target_weight": "1.5" }
            ]
        }"#;
        assert!(FundSpec::from_json(json).is_err());
    }

    #[test]
    fn reject_weight_sum_over_one() {
        let json = r#"{
            "as_of": "2026-08-28T21:00:00Z",
            "fund_id": "F1",
            "total_nav": "1000000",
            "cash_balance": "0",
            "holdings": [
                { "security_id": "A", "units": "1", "market_value": "500000", "target_weight": "0.60" },
                { "security_id": "B", "units": "1", "market_value": "500000", "target_weight": "0.50" }
            ]
        }"#;
        assert!(FundSpec::from_json(json).is_err());
    }

    #[test]
    fn reject_empty_security_id() {
        let json = r#"{
            "as_of": "2026-08-28T21:00:00Z",
            "fund_id": "F1",
            "total_nav": "1000000",
            "cash_balance": "0",
            "holdings": [
                { "security_id": "", "units": "1", "market_value": "500000", "target_weight": "0.50" }
            ]
        }"#;
        assert!(FundSpec::from_json(json).is_err());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fund.json");
        std::fs::write(&path, valid_json()).unwrap();

        let spec = FundSpec::load(&path).unwrap();
        assert_eq!(spec.holdings.len(), 4);
    }

    #[test]
    fn load_missing_file() {
        let err = FundSpec::load(Path::new("/nonexistent/fund.json")).unwrap_err();
        assert!(matches!(err, Error::FundRead { .. }));
    }
}
