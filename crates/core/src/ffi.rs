//! C ABI entry points for host environments
//!
//! Hosts create a handle, write input bytes through the buffer pointer,
//! then call digest or reduce. Digests are read back from the first
//! 32 bytes of the same buffer.

use crate::error::Error;
use crate::params::BUFFER_SIZE;
use crate::reduce::{KeccakHasher, ReduceParams};

/// Success
pub const KMINER_OK: i32 = 0;
/// The handle pointer was null
pub const KMINER_ERR_NULL: i32 = -1;
/// Length exceeded the buffer capacity
pub const KMINER_ERR_LENGTH: i32 = -2;

/// Host callback: `(callback_id, nonce, zero_nibbles)`
pub type MatchCallback = extern "C" fn(u32, u64, u32);

/// Opaque hasher handle for FFI
pub struct KMiner {
    inner: KeccakHasher,
}

/// Create a new hasher instance
/// Returns a pointer to the hasher (caller must free with kminer_free)
#[unsafe(no_mangle)]
pub extern "C" fn kminer_new() -> *mut KMiner {
    let hasher = Box::new(KMiner {
        inner: KeccakHasher::new(),
    });
    Box::into_raw(hasher)
}

/// Free a hasher instance
#[unsafe(no_mangle)]
pub extern "C" fn kminer_free(hasher: *mut KMiner) {
    if !hasher.is_null() {
        unsafe {
            let _ = Box::from_raw(hasher);
        }
    }
}

/// Base address of the message buffer (`kminer_buffer_size()` bytes)
/// Returns null for a null handle
#[unsafe(no_mangle)]
pub extern "C" fn kminer_buffer(hasher: *mut KMiner) -> *mut u8 {
    if hasher.is_null() {
        return core::ptr::null_mut();
    }
    unsafe { (*hasher).inner.buffers_mut().as_mut_ptr() }
}

/// Capacity of the message buffer in bytes
#[unsafe(no_mangle)]
pub extern "C" fn kminer_buffer_size() -> u32 {
    BUFFER_SIZE as u32
}

/// Hash the first `length` buffer bytes; the digest lands in bytes 0..32
#[unsafe(no_mangle)]
pub extern "C" fn kminer_digest(hasher: *mut KMiner, length: u32) -> i32 {
    if hasher.is_null() {
        return KMINER_ERR_NULL;
    }

    let hasher = unsafe { &mut *hasher };
    match hasher.inner.digest(length as usize) {
        Ok(_) => KMINER_OK,
        Err(e) => error_code(e),
    }
}

/// Run a nonce search over `[nonce_min, nonce_max)`
/// - length: message bytes in the buffer, last 8 are the nonce
/// - callback_id: passed back unchanged to `callback`
/// - min_zeros: leading zero nibbles required for a callback
/// - callback: invoked once per match in increasing nonce order (may be null)
#[unsafe(no_mangle)]
pub extern "C" fn kminer_reduce(
    hasher: *mut KMiner,
    length: u32,
    callback_id: u32,
    nonce_min: u64,
    nonce_max: u64,
    min_zeros: u32,
    callback: Option<MatchCallback>,
) -> i32 {
    if hasher.is_null() {
        return KMINER_ERR_NULL;
    }

    let hasher = unsafe { &mut *hasher };
    let params = ReduceParams::new(length as usize)
        .with_callback_id(callback_id)
        .with_range(nonce_min, nonce_max)
        .with_min_zeros(min_zeros);

    let result = hasher.inner.reduce(&params, |m| {
        if let Some(cb) = callback {
            cb(m.callback_id, m.nonce, m.zeros);
        }
    });

    match result {
        Ok(_) => KMINER_OK,
        Err(e) => error_code(e),
    }
}

fn error_code(error: Error) -> i32 {
    match error {
        Error::InvalidLength { .. } | Error::NonceOutOfBounds { .. } => KMINER_ERR_LENGTH,
    }
}
