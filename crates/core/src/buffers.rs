//! Message and scratch buffers
//!
//! The message buffer is the shared input/output surface: callers write
//! input bytes into it and digests are copied back to its start. The
//! scratch buffer holds a saved prefix of the message so it can be put
//! back before every nonce-search iteration.

use crate::error::{Error, Result};
use crate::params::{BUFFER_SIZE, NONCE_SIZE};

/// A 4 KB byte block aligned to 128 bytes
#[derive(Clone)]
#[repr(C, align(128))]
struct AlignedBlock([u8; BUFFER_SIZE]);

// Keep in sync with params::BUFFER_ALIGN
const _: () = assert!(core::mem::align_of::<AlignedBlock>() == crate::params::BUFFER_ALIGN);

/// Fixed-capacity message buffer plus its scratch copy
#[derive(Clone)]
pub struct HashBuffers {
    message: AlignedBlock,
    scratch: AlignedBlock,
}

impl HashBuffers {
    /// Create zeroed buffers
    pub const fn new() -> Self {
        Self {
            message: AlignedBlock([0u8; BUFFER_SIZE]),
            scratch: AlignedBlock([0u8; BUFFER_SIZE]),
        }
    }

    /// Capacity of each buffer in bytes
    pub const fn capacity(&self) -> usize {
        BUFFER_SIZE
    }

    /// The full message buffer
    pub fn message(&self) -> &[u8; BUFFER_SIZE] {
        &self.message.0
    }

    /// Mutable access to the full message buffer
    pub fn message_mut(&mut self) -> &mut [u8; BUFFER_SIZE] {
        &mut self.message.0
    }

    /// Base address of the message buffer, for ABI callers that write
    /// input bytes directly
    pub fn as_mut_ptr(&mut self) -> *mut u8 {
        self.message.0.as_mut_ptr()
    }

    /// Copy `input` to the start of the message buffer
    pub fn load(&mut self, input: &[u8]) -> Result<()> {
        check_length(input.len())?;
        self.message.0[..input.len()].copy_from_slice(input);
        Ok(())
    }

    /// Save the first `n` message bytes into the scratch buffer
    pub fn backup(&mut self, n: usize) -> Result<()> {
        check_length(n)?;
        self.scratch.0[..n].copy_from_slice(&self.message.0[..n]);
        Ok(())
    }

    /// Put the first `n` saved bytes back into the message buffer
    pub fn restore(&mut self, n: usize) -> Result<()> {
        check_length(n)?;
        self.message.0[..n].copy_from_slice(&self.scratch.0[..n]);
        Ok(())
    }

    /// Write `nonce` big-endian into message bytes `offset..offset + 8`
    pub fn write_nonce_suffix(&mut self, offset: usize, nonce: u64) -> Result<()> {
        let end = offset
            .checked_add(NONCE_SIZE)
            .filter(|&end| end <= BUFFER_SIZE)
            .ok_or(Error::NonceOutOfBounds {
                offset,
                capacity: BUFFER_SIZE,
            })?;
        self.message.0[offset..end].copy_from_slice(&nonce.to_be_bytes());
        Ok(())
    }
}

impl Default for HashBuffers {
    fn default() -> Self {
        Self::new()
    }
}

#[inline]
pub(crate) fn check_length(length: usize) -> Result<()> {
    if length > BUFFER_SIZE {
        return Err(Error::InvalidLength {
            length,
            capacity: BUFFER_SIZE,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::BUFFER_ALIGN;

    #[test]
    fn test_buffers_are_aligned() {
        let mut buffers = HashBuffers::new();
        assert_eq!(buffers.as_mut_ptr() as usize % BUFFER_ALIGN, 0);
        assert_eq!(buffers.scratch.0.as_ptr() as usize % BUFFER_ALIGN, 0);
    }

    #[test]
    fn test_backup_restore_roundtrip() {
        let mut buffers = HashBuffers::new();
        buffers.load(b"header bytes").unwrap();
        buffers.backup(6).unwrap();

        buffers.message_mut()[..12].fill(0xEE);
        buffers.restore(6).unwrap();

        assert_eq!(&buffers.message()[..6], b"header");
        assert_eq!(&buffers.message()[6..12], &[0xEE; 6]);
    }

    #[test]
    fn test_nonce_suffix_is_big_endian() {
        let mut buffers = HashBuffers::new();
        buffers.write_nonce_suffix(4, 0x0102_0304_0506_0708).unwrap();

        assert_eq!(&buffers.message()[..4], &[0u8; 4]);
        assert_eq!(&buffers.message()[4..12], &[1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_nonce_suffix_at_end_of_buffer() {
        let mut buffers = HashBuffers::new();
        buffers
            .write_nonce_suffix(BUFFER_SIZE - NONCE_SIZE, u64::MAX)
            .unwrap();
        assert_eq!(&buffers.message()[BUFFER_SIZE - 8..], &[0xFF; 8]);
    }

    #[test]
    fn test_oversized_operations_fail_without_mutation() {
        let mut buffers = HashBuffers::new();
        buffers.load(&[0xAB; 16]).unwrap();

        let oversized = [0u8; BUFFER_SIZE + 1];
        assert_eq!(
            buffers.load(&oversized),
            Err(Error::InvalidLength {
                length: BUFFER_SIZE + 1,
                capacity: BUFFER_SIZE
            })
        );
        assert!(buffers.backup(BUFFER_SIZE + 1).is_err());
        assert!(buffers.restore(BUFFER_SIZE + 1).is_err());
        assert_eq!(
            buffers.write_nonce_suffix(BUFFER_SIZE - 7, 1),
            Err(Error::NonceOutOfBounds {
                offset: BUFFER_SIZE - 7,
                capacity: BUFFER_SIZE
            })
        );
        assert!(buffers.write_nonce_suffix(usize::MAX, 1).is_err());

        assert_eq!(&buffers.message()[..16], &[0xAB; 16]);
    }
}
