//! Search configuration
//!
//! Defaults hash the single nonce 0 and report it regardless of zeros.
//! A JSON file can supply any subset of fields; CLI flags override it.

use keccak_miner_core::ReduceParams;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("File I/O error: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Invalid config file: {0}")]
    InvalidFormat(#[from] serde_json::Error),

    #[error("Invalid hex input: {0}")]
    InvalidHex(#[from] hex::FromHexError),
}

/// Nonce search configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// First nonce (inclusive)
    pub nonce_min: u64,
    /// End of the range (exclusive)
    pub nonce_max: u64,
    /// Leading zero nibbles required to report a nonce
    pub min_zeros: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            nonce_min: 0,
            nonce_max: 1,
            min_zeros: 0,
        }
    }
}

impl SearchConfig {
    /// Load a config from a JSON file; missing fields take defaults
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Apply command-line overrides on top of this config
    pub fn with_overrides(
        mut self,
        nonce_min: Option<u64>,
        nonce_max: Option<u64>,
        min_zeros: Option<u32>,
    ) -> Self {
        if let Some(min) = nonce_min {
            self.nonce_min = min;
        }
        if let Some(max) = nonce_max {
            self.nonce_max = max;
        }
        if let Some(zeros) = min_zeros {
            self.min_zeros = zeros;
        }
        self
    }

    /// Number of nonces the search will hash
    pub fn range_len(&self) -> u64 {
        self.nonce_max.saturating_sub(self.nonce_min)
    }

    /// Reduce parameters for a message of `length` bytes
    pub fn reduce_params(&self, length: usize) -> ReduceParams {
        ReduceParams::new(length)
            .with_range(self.nonce_min, self.nonce_max)
            .with_min_zeros(self.min_zeros)
    }
}

/// Decode hex input, with or without a `0x` prefix
pub fn decode_hex_input(input: &str) -> Result<Vec<u8>, ConfigError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    Ok(hex::decode(digits)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.range_len(), 1);

        let params = config.reduce_params(32);
        assert_eq!(params.length, 32);
        assert_eq!(params.nonce_min, 0);
        assert_eq!(params.nonce_max, 1);
        assert_eq!(params.min_zeros, 0);
    }

    #[test]
    fn test_overrides() {
        let config = SearchConfig::default().with_overrides(Some(10), None, Some(3));
        assert_eq!(
            config,
            SearchConfig {
                nonce_min: 10,
                nonce_max: 1,
                min_zeros: 3
            }
        );
        assert_eq!(config.range_len(), 0, "inverted range hashes nothing");
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: SearchConfig = serde_json::from_str(r#"{"nonce_max": 5000}"#).unwrap();
        assert_eq!(config.nonce_min, 0);
        assert_eq!(config.nonce_max, 5000);
        assert_eq!(config.min_zeros, 0);
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("kminer-config-{}.json", std::process::id()));
        fs::write(&path, r#"{"nonce_min": 7, "nonce_max": 9, "min_zeros": 2}"#).unwrap();

        let config = SearchConfig::load_from_file(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(config.nonce_min, 7);
        assert_eq!(config.nonce_max, 9);
        assert_eq!(config.min_zeros, 2);
    }

    #[test]
    fn test_load_errors() {
        let missing = std::env::temp_dir().join("kminer-config-does-not-exist.json");
        assert!(matches!(
            SearchConfig::load_from_file(&missing),
            Err(ConfigError::FileError(_))
        ));

        let bad: Result<SearchConfig, _> = serde_json::from_str("{nonce_min: }");
        assert!(bad.is_err());
    }

    #[test]
    fn test_decode_hex_input() {
        assert_eq!(decode_hex_input("616263").unwrap(), b"abc");
        assert_eq!(decode_hex_input("0x616263\n").unwrap(), b"abc");
        assert_eq!(decode_hex_input("").unwrap(), Vec::<u8>::new());
        assert!(matches!(
            decode_hex_input("abc"),
            Err(ConfigError::InvalidHex(_))
        ));
    }
}
