//! Error types for the rebalancing pipeline.

use std::path::PathBuf;

use rust_decimal::Decimal;

/// All errors that can occur while loading inputs or running a rebalance.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Fund NAV is zero or negative; weights are undefined, so the whole
    /// pipeline is rejected before any drift is computed.
    #[error("invalid fund NAV {nav}: must be > 0")]
    InvalidNav { nav: Decimal },

    #[error("fund file error: {0}")]
    Fund(String),

    #[error("failed to read fund file {path}: {source}")]
    FundRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse fund JSON: {0}")]
    FundParse(#[from] serde_json::Error),

    #[error("policy error: {0}")]
    Policy(String),

    #[error("failed to read policy file {path}: {source}")]
    PolicyRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse policy TOML: {0}")]
    PolicyParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
