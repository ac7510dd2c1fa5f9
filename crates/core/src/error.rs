//! Error type for buffer and length violations

use thiserror::Error;

/// Errors returned before any buffer is mutated
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("length {length} exceeds buffer capacity of {capacity} bytes")]
    InvalidLength { length: usize, capacity: usize },

    #[error("nonce at offset {offset} does not fit in a buffer of {capacity} bytes")]
    NonceOutOfBounds { offset: usize, capacity: usize },
}

pub type Result<T> = core::result::Result<T, Error>;
