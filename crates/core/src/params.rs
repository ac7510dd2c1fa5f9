//! Keccak-256 sponge and host buffer parameters
//!
//! Capacity is twice the digest size, so the rate is
//! `(1600 - 2 * 256) / 8 = 136` bytes.

/// Number of 64-bit lanes in the Keccak-f[1600] state
pub const STATE_WORDS: usize = 25;

/// Rounds of the Keccak-f[1600] permutation
pub const ROUNDS: usize = 24;

/// Digest size in bytes (256 bits)
pub const DIGEST_SIZE: usize = 32;

/// Sponge rate in bytes
pub const RATE: usize = (1600 - 2 * DIGEST_SIZE * 8) / 8;

/// Sponge rate in 64-bit lanes
pub const RATE_WORDS: usize = RATE / 8;

/// Size of the nonce suffix in bytes (big-endian u64)
pub const NONCE_SIZE: usize = 8;

/// Capacity of the message and scratch buffers (4 KB each)
pub const BUFFER_SIZE: usize = 4 * 1024;

/// Alignment of the message and scratch buffers
pub const BUFFER_ALIGN: usize = 128;
