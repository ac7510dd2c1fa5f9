//! Keccak-f[1600] permutation
//!
//! The state is a flat array of 25 lanes where lane `x + 5 * y` holds
//! column `x`, row `y` of the 5x5 matrix. Each round applies theta, rho,
//! pi, chi and iota in that order.

use crate::params::{ROUNDS, STATE_WORDS};

/// Round constants XORed into lane 0 by iota
const ROUND_CONSTANTS: [u64; ROUNDS] = [
    0x0000_0000_0000_0001,
    0x0000_0000_0000_8082,
    0x8000_0000_0000_808a,
    0x8000_0000_8000_8000,
    0x0000_0000_0000_808b,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8009,
    0x0000_0000_0000_008a,
    0x0000_0000_0000_0088,
    0x0000_0000_8000_8009,
    0x0000_0000_8000_000a,
    0x0000_0000_8000_808b,
    0x8000_0000_0000_008b,
    0x8000_0000_0000_8089,
    0x8000_0000_0000_8003,
    0x8000_0000_0000_8002,
    0x8000_0000_0000_0080,
    0x0000_0000_0000_800a,
    0x8000_0000_8000_000a,
    0x8000_0000_8000_8081,
    0x8000_0000_0000_8080,
    0x0000_0000_8000_0001,
    0x8000_0000_8000_8008,
];

/// Rotation amounts for lanes 1..=24 (lane 0 is not rotated)
const RHO_OFFSETS: [u32; STATE_WORDS - 1] = [
    1, 62, 28, 27, 36, 44, 6, 55, 20, 3, 10, 43, 25, 39, 41, 45, 15, 21, 8, 18, 2, 61, 56, 14,
];

/// Pi as a single cycle over lanes 1..=24: lane `PI_CYCLE[i]` takes the
/// value of lane `PI_CYCLE[i + 1]`, and the last entry takes lane 1.
const PI_CYCLE: [usize; STATE_WORDS - 1] = [
    1, 6, 9, 22, 14, 20, 2, 12, 13, 19, 23, 15, 4, 24, 21, 8, 16, 5, 3, 18, 17, 11, 7, 10,
];

/// Apply the full 24-round Keccak-f[1600] permutation in place
#[inline]
pub fn keccak_f1600(state: &mut [u64; STATE_WORDS]) {
    for &round_constant in ROUND_CONSTANTS.iter() {
        theta(state);
        rho(state);
        pi(state);
        chi(state);
        iota(state, round_constant);
    }
}

/// Column parity diffusion
#[inline(always)]
fn theta(state: &mut [u64; STATE_WORDS]) {
    let mut parity = [0u64; 5];
    for (x, p) in parity.iter_mut().enumerate() {
        *p = state[x] ^ state[x + 5] ^ state[x + 10] ^ state[x + 15] ^ state[x + 20];
    }

    for x in 0..5 {
        let d = parity[(x + 4) % 5] ^ parity[(x + 1) % 5].rotate_left(1);
        for y in 0..5 {
            state[x + 5 * y] ^= d;
        }
    }
}

/// Lane-specific rotations, applied to the unpermuted lane indices
#[inline(always)]
fn rho(state: &mut [u64; STATE_WORDS]) {
    for (lane, &offset) in state[1..].iter_mut().zip(RHO_OFFSETS.iter()) {
        *lane = lane.rotate_left(offset);
    }
}

#[inline(always)]
fn pi(state: &mut [u64; STATE_WORDS]) {
    let first = state[PI_CYCLE[0]];
    for i in 0..PI_CYCLE.len() - 1 {
        state[PI_CYCLE[i]] = state[PI_CYCLE[i + 1]];
    }
    state[PI_CYCLE[PI_CYCLE.len() - 1]] = first;
}

/// The only nonlinear step. All five outputs of a row are computed from
/// the same snapshot of that row.
#[inline(always)]
fn chi(state: &mut [u64; STATE_WORDS]) {
    for row in state.chunks_exact_mut(5) {
        let snapshot = [row[0], row[1], row[2], row[3], row[4]];
        for x in 0..5 {
            row[x] = snapshot[x] ^ (!snapshot[(x + 1) % 5] & snapshot[(x + 2) % 5]);
        }
    }
}

#[inline(always)]
fn iota(state: &mut [u64; STATE_WORDS], round_constant: u64) {
    state[0] ^= round_constant;
}
