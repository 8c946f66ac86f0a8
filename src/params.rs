//! Constants and backing-store traits shared by all algorithm families.

use zeroize::Zeroize;

/// Seed and hash-output granularity used throughout (32 bytes).
pub const SYMBYTES: usize = 32;

/// Size in bytes of a KEM shared secret.
pub const SSBYTES: usize = 32;

/// Fixed-size byte buffer usable as a key/ciphertext/signature backing store.
pub trait ByteArray:
    AsRef<[u8]> + AsMut<[u8]> + Clone + core::fmt::Debug + Zeroize + Send + Sync + 'static
{
    /// Array length in bytes.
    const LEN: usize;

    /// Return a zero-filled instance.
    fn zeroed() -> Self;
}

impl<const SIZE: usize> ByteArray for [u8; SIZE] {
    const LEN: usize = SIZE;

    #[inline]
    fn zeroed() -> Self {
        [0u8; SIZE]
    }
}
