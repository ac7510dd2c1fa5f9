//! Keccak Miner Library
//!
//! Keccak-256 digests and brute-force nonce search for digests with a
//! minimum number of leading zero nibbles.
//!
//! # Overview
//!
//! A message is a prefix followed by an 8-byte big-endian nonce field.
//! The search hashes every nonce in `[nonce_min, nonce_max)` and reports
//! those whose digest starts with at least `min_zeros` zero hex digits.
//!
//! # Example
//!
//! ```rust
//! use kminer::algorithm::{keccak256, meets_difficulty};
//! use kminer::{search, KeccakHasher, SearchConfig};
//!
//! let digest = keccak256(b"abc");
//! assert!(!meets_difficulty(&digest, 1));
//!
//! let config = SearchConfig { nonce_min: 0, nonce_max: 32, min_zeros: 1 };
//! let mut hasher = KeccakHasher::new();
//! let report = search(&mut hasher, b"prefix!!\0\0\0\0\0\0\0\0", &config, |_| {}).unwrap();
//! assert_eq!(report.hashes, 32);
//! ```

// Re-export the core algorithm
pub use keccak_miner_core as algorithm;

pub mod config;
pub mod search;

// Convenience re-exports
pub use algorithm::{keccak256, meets_difficulty, KeccakHasher};
pub use config::{ConfigError, SearchConfig};
pub use search::{search, FoundNonce, SearchReport};
