//! # Keccak Miner Core
//!
//! Keccak-256 hashing plus a brute-force nonce search for digests with
//! a minimum number of leading zero nibbles.
//!
//! ## Features
//!
//! - **Keccak-256**: Original Keccak padding (`0x01 .. 0x80`), not SHA3-256
//! - **Streaming**: Absorb input in any chunking, finalize once
//! - **Nonce Search**: Big-endian u64 nonce in the last 8 bytes of the message
//! - **No Allocation**: Fixed 4 KB message and scratch buffers
//!
//! ## Input Format
//!
//! ```text
//! message = prefix || nonce
//!           ^^^^^^    ^^^^^
//!           any len   8 bytes (big-endian u64)
//! ```
//!
//! Messages shorter than 8 bytes are overwritten by the nonce entirely.
//!
//! ## Example
//!
//! ```rust
//! use keccak_miner_core::{KeccakHasher, ReduceParams, keccak256};
//!
//! // Single-shot hashing
//! let digest = keccak256(b"abc");
//! assert_eq!(digest[0], 0x4e);
//!
//! // Nonce search over [0, 1000) for digests starting with a zero nibble
//! let mut hasher = KeccakHasher::new();
//! hasher.load(b"header--nonce---").unwrap();
//! let params = ReduceParams::new(16).with_range(0, 1000).with_min_zeros(1);
//! let summary = hasher
//!     .reduce(&params, |m| println!("nonce {} has {} zeros", m.nonce, m.zeros))
//!     .unwrap();
//! assert_eq!(summary.hashes, 1000);
//! ```
//!
//! ## no_std Support
//!
//! ```toml
//! [dependencies]
//! keccak-miner-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

mod buffers;
mod error;
mod params;
mod permutation;
mod reduce;
mod sponge;

#[cfg(feature = "std")]
mod ffi;

pub use buffers::HashBuffers;
pub use error::{Error, Result};
pub use params::*;
pub use permutation::keccak_f1600;
pub use reduce::{
    KeccakHasher, Match, ReduceParams, ReduceSummary, leading_zero_nibbles, meets_difficulty,
};
pub use sponge::{Keccak256, keccak256};

#[cfg(feature = "std")]
pub use ffi::{KMINER_ERR_LENGTH, KMINER_ERR_NULL, KMINER_OK, MatchCallback};
