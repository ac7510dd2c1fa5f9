//! Digest and nonce-search driver
//!
//! [`KeccakHasher`] owns one sponge context and one pair of buffers. A
//! digest hashes a prefix of the message buffer and copies the result back
//! over the first 32 bytes of that buffer, so the buffer doubles as the
//! output surface for hosts.
//!
//! A reduction injects each nonce of a half-open range into the last
//! 8 bytes of the message (big-endian), hashes it, and reports every
//! nonce whose digest has at least `min_zeros` leading zero nibbles:
//!
//! ```text
//! message = prefix || nonce
//!           ^^^^^^    ^^^^^
//!           len - 8   8 bytes (big-endian u64), or the whole message if shorter
//! ```
//!
//! Because each digest overwrites the start of the message buffer, the
//! prefix is saved once and restored before every iteration.

use log::{debug, trace};

use crate::buffers::{HashBuffers, check_length};
use crate::error::Result;
use crate::params::{BUFFER_SIZE, DIGEST_SIZE, NONCE_SIZE};
use crate::sponge::Keccak256;

/// Parameters of one reduction run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReduceParams {
    /// Number of message-buffer bytes to hash, nonce included
    pub length: usize,
    /// Opaque identifier passed through to every match
    pub callback_id: u32,
    /// First nonce (inclusive)
    pub nonce_min: u64,
    /// End of the range (exclusive)
    pub nonce_max: u64,
    /// Minimum number of leading zero nibbles for a match
    pub min_zeros: u32,
}

impl ReduceParams {
    /// Hash `length` bytes for the single nonce 0, reporting every digest
    pub fn new(length: usize) -> Self {
        Self {
            length,
            callback_id: 0,
            nonce_min: 0,
            nonce_max: 1,
            min_zeros: 0,
        }
    }

    pub fn with_range(mut self, nonce_min: u64, nonce_max: u64) -> Self {
        self.nonce_min = nonce_min;
        self.nonce_max = nonce_max;
        self
    }

    pub fn with_min_zeros(mut self, min_zeros: u32) -> Self {
        self.min_zeros = min_zeros;
        self
    }

    pub fn with_callback_id(mut self, callback_id: u32) -> Self {
        self.callback_id = callback_id;
        self
    }

    /// Offset of the nonce within the message
    pub fn nonce_offset(&self) -> usize {
        self.length.saturating_sub(NONCE_SIZE)
    }
}

/// A nonce whose digest met the threshold
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub callback_id: u32,
    pub nonce: u64,
    /// Leading zero nibbles of `digest`
    pub zeros: u32,
    pub digest: [u8; DIGEST_SIZE],
}

/// Counters for a finished reduction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReduceSummary {
    /// Digests computed (one per nonce in the range)
    pub hashes: u64,
    /// Matches reported to the callback
    pub matches: u64,
}

/// Keccak-256 hasher with host buffers
///
/// Not reentrant: one digest or one reduction at a time. Reuse an instance
/// across calls; it holds 8 KB of buffers and never allocates.
#[derive(Clone, Default)]
pub struct KeccakHasher {
    sponge: Keccak256,
    buffers: HashBuffers,
}

impl KeccakHasher {
    pub fn new() -> Self {
        Self {
            sponge: Keccak256::new(),
            buffers: HashBuffers::new(),
        }
    }

    pub fn buffers(&self) -> &HashBuffers {
        &self.buffers
    }

    pub fn buffers_mut(&mut self) -> &mut HashBuffers {
        &mut self.buffers
    }

    /// Copy `input` into the message buffer
    pub fn load(&mut self, input: &[u8]) -> Result<()> {
        self.buffers.load(input)
    }

    /// Load `input` and return its digest
    pub fn hash(&mut self, input: &[u8]) -> Result<[u8; DIGEST_SIZE]> {
        self.buffers.load(input)?;
        self.digest(input.len())
    }

    /// Hash the first `length` bytes of the message buffer
    ///
    /// The digest is also copied into message bytes `0..32`.
    pub fn digest(&mut self, length: usize) -> Result<[u8; DIGEST_SIZE]> {
        check_length(length)?;
        Ok(self.digest_prefix(length))
    }

    /// Run a nonce search over `params.nonce_min..params.nonce_max`
    ///
    /// `on_match` is called synchronously, in increasing nonce order, for
    /// every nonce whose digest has at least `params.min_zeros` leading
    /// zero nibbles. The full range is always scanned. Afterwards the
    /// message buffer starts with the digest of the last nonce; an empty
    /// range leaves it untouched.
    pub fn reduce<F>(&mut self, params: &ReduceParams, mut on_match: F) -> Result<ReduceSummary>
    where
        F: FnMut(&Match),
    {
        check_length(params.length)?;
        let offset = params.nonce_offset();
        debug_assert!(offset + NONCE_SIZE <= BUFFER_SIZE);

        debug!(
            "reduce: length={} nonces=[{}, {}) min_zeros={}",
            params.length, params.nonce_min, params.nonce_max, params.min_zeros
        );

        self.buffers.backup(offset)?;

        let mut summary = ReduceSummary::default();
        for nonce in params.nonce_min..params.nonce_max {
            self.buffers.restore(offset)?;
            self.buffers.write_nonce_suffix(offset, nonce)?;

            let digest = self.digest_prefix(params.length);
            summary.hashes += 1;

            let zeros = leading_zero_nibbles(&digest);
            if zeros >= params.min_zeros {
                summary.matches += 1;
                trace!("reduce: nonce={} zeros={}", nonce, zeros);
                on_match(&Match {
                    callback_id: params.callback_id,
                    nonce,
                    zeros,
                    digest,
                });
            }
        }

        debug!(
            "reduce: done hashes={} matches={}",
            summary.hashes, summary.matches
        );
        Ok(summary)
    }

    /// init → absorb → finalize → copy out. `length` must be checked.
    #[inline]
    fn digest_prefix(&mut self, length: usize) -> [u8; DIGEST_SIZE] {
        self.sponge.init();
        self.sponge.absorb(&self.buffers.message()[..length]);
        self.sponge.finalize();

        let digest = self.sponge.digest();
        self.buffers.message_mut()[..DIGEST_SIZE].copy_from_slice(&digest);
        digest
    }
}

/// Count leading zero nibbles of a digest
///
/// Two per all-zero byte, plus one if the first nonzero byte is below 16.
/// An all-zero digest counts 64.
///
/// # Example
///
/// ```rust
/// use keccak_miner_core::leading_zero_nibbles;
///
/// let mut digest = [0xFFu8; 32];
/// digest[0] = 0x00;
/// digest[1] = 0x00;
/// digest[2] = 0x05;
/// assert_eq!(leading_zero_nibbles(&digest), 5);
/// ```
#[inline(always)]
pub fn leading_zero_nibbles(digest: &[u8; DIGEST_SIZE]) -> u32 {
    let mut zeros = 0u32;

    for &byte in digest.iter() {
        if byte == 0 {
            zeros += 2;
            continue;
        }
        if byte < 16 {
            zeros += 1;
        }
        break;
    }

    zeros
}

/// Check if a digest has at least `min_zeros` leading zero nibbles
#[inline(always)]
pub fn meets_difficulty(digest: &[u8; DIGEST_SIZE], min_zeros: u32) -> bool {
    leading_zero_nibbles(digest) >= min_zeros
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_zero_nibbles() {
        let mut digest = [0xFFu8; 32];
        assert_eq!(leading_zero_nibbles(&digest), 0);

        digest[0] = 0x10;
        assert_eq!(leading_zero_nibbles(&digest), 0);

        digest[0] = 0x0F;
        assert_eq!(leading_zero_nibbles(&digest), 1);

        digest[0] = 0x00;
        digest[1] = 0x00;
        digest[2] = 0x05;
        assert_eq!(leading_zero_nibbles(&digest), 5);

        digest[2] = 0x50;
        assert_eq!(leading_zero_nibbles(&digest), 4);
    }

    #[test]
    fn test_all_zero_digest_is_bounded() {
        assert_eq!(leading_zero_nibbles(&[0u8; 32]), 64);

        let mut digest = [0u8; 32];
        digest[31] = 0x01;
        assert_eq!(leading_zero_nibbles(&digest), 63);
    }

    #[test]
    fn test_meets_difficulty() {
        let mut digest = [0xFFu8; 32];
        digest[0] = 0x00;
        digest[1] = 0x0A;

        assert!(meets_difficulty(&digest, 0));
        assert!(meets_difficulty(&digest, 3));
        assert!(!meets_difficulty(&digest, 4));
    }

    #[test]
    fn test_nonce_offset() {
        assert_eq!(ReduceParams::new(0).nonce_offset(), 0);
        assert_eq!(ReduceParams::new(4).nonce_offset(), 0);
        assert_eq!(ReduceParams::new(8).nonce_offset(), 0);
        assert_eq!(ReduceParams::new(9).nonce_offset(), 1);
        assert_eq!(ReduceParams::new(120).nonce_offset(), 112);
    }

    #[test]
    fn test_default_params_hash_nonce_zero_once() {
        let params = ReduceParams::new(16);
        assert_eq!(params.nonce_min, 0);
        assert_eq!(params.nonce_max, 1);
        assert_eq!(params.min_zeros, 0);

        let mut hasher = KeccakHasher::new();
        let mut seen = 0;
        let summary = hasher.reduce(&params, |_| seen += 1).unwrap();

        assert_eq!(summary, ReduceSummary { hashes: 1, matches: 1 });
        assert_eq!(seen, 1);
    }

    #[test]
    fn test_reduced_range_is_half_open() {
        let mut hasher = KeccakHasher::new();
        let params = ReduceParams::new(12).with_range(5, 9);

        let mut nonces = [0u64; 4];
        let mut n = 0;
        hasher
            .reduce(&params, |m| {
                nonces[n] = m.nonce;
                n += 1;
            })
            .unwrap();

        assert_eq!(n, 4);
        assert_eq!(nonces, [5, 6, 7, 8]);
    }

    #[test]
    fn test_callback_id_passes_through() {
        let mut hasher = KeccakHasher::new();
        let params = ReduceParams::new(8).with_callback_id(0xDEAD_BEEF);

        let mut id = 0;
        hasher.reduce(&params, |m| id = m.callback_id).unwrap();
        assert_eq!(id, 0xDEAD_BEEF);
    }
}
