//! Keccak-256 sponge context
//!
//! Absorb, pad, squeeze with the original Keccak submission padding:
//! `0x01` marks the first padding byte and `0x80` is ORed into the last
//! byte of the block. This is not the SHA3-256 (`0x06`) variant.
//!
//! Bytes are decoded to lanes little-endian when absorbed and encoded
//! little-endian when the digest is read out.

use crate::params::{DIGEST_SIZE, RATE, RATE_WORDS, STATE_WORDS};
use crate::permutation::keccak_f1600;

/// Streaming Keccak-256 context
///
/// Lifecycle: [`init`](Self::init) → [`absorb`](Self::absorb)* →
/// [`finalize`](Self::finalize) → [`digest`](Self::digest). Once finalized,
/// further absorption is ignored until the next `init`.
#[derive(Clone)]
pub struct Keccak256 {
    /// Full 1600-bit permutation state
    state: [u64; STATE_WORDS],
    /// Bytes absorbed since the last full block
    pending: [u8; RATE],
    /// Number of valid bytes in `pending`, always `< RATE`
    pending_len: usize,
    finalized: bool,
}

impl Keccak256 {
    /// Create a fresh context ready to absorb
    pub const fn new() -> Self {
        Self {
            state: [0u64; STATE_WORDS],
            pending: [0u8; RATE],
            pending_len: 0,
            finalized: false,
        }
    }

    /// Reset to an empty, absorbing context
    pub fn init(&mut self) {
        self.state = [0u64; STATE_WORDS];
        self.pending = [0u8; RATE];
        self.pending_len = 0;
        self.finalized = false;
    }

    /// Absorb more input. Does nothing once the context is finalized.
    pub fn absorb(&mut self, mut data: &[u8]) {
        if self.finalized || data.is_empty() {
            return;
        }

        // Top up a partially filled block first
        if self.pending_len != 0 {
            let take = (RATE - self.pending_len).min(data.len());
            self.pending[self.pending_len..self.pending_len + take].copy_from_slice(&data[..take]);
            self.pending_len += take;
            data = &data[take..];

            if self.pending_len < RATE {
                return;
            }
            absorb_block(&mut self.state, &self.pending);
            self.pending_len = 0;
        }

        // Full blocks go straight into the state without touching `pending`
        let mut blocks = data.chunks_exact(RATE);
        for block in &mut blocks {
            absorb_block(&mut self.state, block);
        }

        let rest = blocks.remainder();
        self.pending[..rest.len()].copy_from_slice(rest);
        self.pending_len = rest.len();
    }

    /// Pad and process the final block. Idempotent.
    pub fn finalize(&mut self) {
        if self.finalized {
            return;
        }

        self.pending[self.pending_len..].fill(0);
        self.pending[self.pending_len] |= 0x01;
        self.pending[RATE - 1] |= 0x80;
        absorb_block(&mut self.state, &self.pending);

        self.pending_len = 0;
        self.finalized = true;
    }

    /// Whether [`finalize`](Self::finalize) has run since the last `init`
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// First 32 bytes of the state, verbatim
    ///
    /// This is the Keccak-256 digest once the context is finalized.
    pub fn digest(&self) -> [u8; DIGEST_SIZE] {
        let mut out = [0u8; DIGEST_SIZE];
        for (chunk, lane) in out.chunks_exact_mut(8).zip(self.state.iter()) {
            chunk.copy_from_slice(&lane.to_le_bytes());
        }
        out
    }
}

impl Default for Keccak256 {
    fn default() -> Self {
        Self::new()
    }
}

/// XOR one rate-sized block into the first 17 lanes and permute
#[inline(always)]
fn absorb_block(state: &mut [u64; STATE_WORDS], block: &[u8]) {
    debug_assert_eq!(block.len(), RATE);
    for (lane, bytes) in state[..RATE_WORDS].iter_mut().zip(block.chunks_exact(8)) {
        let mut word = [0u8; 8];
        word.copy_from_slice(bytes);
        *lane ^= u64::from_le_bytes(word);
    }
    keccak_f1600(state);
}

/// Convenience function for single-shot hashing
pub fn keccak256(data: &[u8]) -> [u8; DIGEST_SIZE] {
    let mut ctx = Keccak256::new();
    ctx.absorb(data);
    ctx.finalize();
    ctx.digest()
}
