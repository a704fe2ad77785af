//! House policy (TOML) loading and validation.
//!
//! Carries the default tradable minimums applied when a fund snapshot does
//! not override them.

use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Default trading minimums for every fund this desk rebalances.
#[derive(Debug, Clone, Deserialize)]
pub struct Policy {
    /// Orders below this notional are skipped rather than executed.
    #[serde(default)]
    pub min_trade_size: Decimal,
    /// Cash the fund must retain; never spent on buys.
    #[serde(default)]
    pub min_cash_reserve: Decimal,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            min_trade_size: Decimal::ZERO,
            min_cash_reserve: Decimal::ZERO,
        }
    }
}

impl Policy {
    /// Load policy from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| Error::PolicyRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let policy: Policy = toml::from_str(&contents)?;
        policy.validate()?;
        Ok(policy)
    }

    /// Validate policy invariants.
    fn validate(&self) -> Result<()> {
        if self.min_trade_size < Decimal::ZERO {
            return Err(Error::Policy("min_trade_size must be >= 0".into()));
        }
        if self.min_cash_reserve < Decimal::ZERO {
            return Err(Error::Policy("min_cash_reserve must be >= 0".into()));
        }
        Ok(())
    }
}
