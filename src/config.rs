//! Vault configuration
//!
//! Loaded from a JSON file, with optional environment overrides:
//!   VAULT_MAX_INTEREST_RATE_BPS, VAULT_INITIAL_INTEREST_RATE_BPS

use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::VaultError;
use crate::math::BPS_DENOMINATOR;

/// Errors raised while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid value for {var}: '{value}'")]
    InvalidEnv { var: &'static str, value: String },

    #[error(transparent)]
    Invalid(#[from] VaultError),
}

/// Tunable vault parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaultConfig {
    /// Highest rate the administrator may set, in basis points (at most 10000)
    pub max_interest_rate_bps: u32,

    /// Rate in effect at genesis, in basis points
    pub initial_interest_rate_bps: u32,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            max_interest_rate_bps: BPS_DENOMINATOR as u32,
            initial_interest_rate_bps: 0,
        }
    }
}

impl VaultConfig {
    /// Load config from a JSON file and validate it
    pub fn from_json_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply VAULT_* environment variables on top of this config
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Some(value) = read_env_bps("VAULT_MAX_INTEREST_RATE_BPS")? {
            self.max_interest_rate_bps = value;
        }
        if let Some(value) = read_env_bps("VAULT_INITIAL_INTEREST_RATE_BPS")? {
            self.initial_interest_rate_bps = value;
        }
        self.validate()?;
        Ok(self)
    }

    /// Check the rate bounds
    pub fn validate(&self) -> Result<(), VaultError> {
        if self.max_interest_rate_bps as u128 > BPS_DENOMINATOR {
            return Err(VaultError::InvalidConfig(format!(
                "max_interest_rate_bps {} exceeds {}",
                self.max_interest_rate_bps, BPS_DENOMINATOR
            )));
        }
        if self.initial_interest_rate_bps > self.max_interest_rate_bps {
            return Err(VaultError::InvalidConfig(format!(
                "initial_interest_rate_bps {} exceeds max_interest_rate_bps {}",
                self.initial_interest_rate_bps, self.max_interest_rate_bps
            )));
        }
        Ok(())
    }
}

fn read_env_bps(var: &'static str) -> Result<Option<u32>, ConfigError> {
    match env::var(var) {
        Ok(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidEnv { var, value }),
        Err(_) => Ok(None),
    }
}
