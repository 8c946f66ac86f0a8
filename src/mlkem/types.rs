//! ML-KEM key and ciphertext types.
//!
//! All types wrap fixed-size byte arrays chosen by [`MlKemParams`]. Secret
//! types zeroize on drop.

use zeroize::{Zeroize, ZeroizeOnDrop};

use super::params::MlKemParams;
use crate::params::{ByteArray, SSBYTES};
use crate::Error;

/// ML-KEM encapsulation key (public key).
pub struct PublicKey<P: MlKemParams> {
    pub(crate) bytes: P::PkArray,
}

impl<P: MlKemParams> PublicKey<P> {
    /// Wrap a backing array.
    #[inline]
    pub fn from_bytes(bytes: P::PkArray) -> Self {
        Self { bytes }
    }

    /// Parse from a byte slice, validating the length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, Error> {
        crate::check_len(bytes, P::PK_BYTES)?;
        let mut arr = P::PkArray::zeroed();
        arr.as_mut().copy_from_slice(bytes);
        Ok(Self { bytes: arr })
    }

    /// View the raw encoding.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<P: MlKemParams> AsRef<[u8]> for PublicKey<P> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<P: MlKemParams> Clone for PublicKey<P> {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
        }
    }
}

impl<P: MlKemParams> core::fmt::Debug for PublicKey<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PublicKey")
            .field("len", &self.bytes.as_ref().len())
            .finish_non_exhaustive()
    }
}

/// ML-KEM decapsulation key (secret key). Zeroized on drop.
pub struct SecretKey<P: MlKemParams> {
    pub(crate) bytes: P::SkArray,
}

impl<P: MlKemParams> SecretKey<P> {
    /// Wrap a backing array.
    #[inline]
    pub fn from_bytes(bytes: P::SkArray) -> Self {
        Self { bytes }
    }

    /// Parse from a byte slice, validating the length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, Error> {
        crate::check_len(bytes, P::SK_BYTES)?;
        let mut arr = P::SkArray::zeroed();
        arr.as_mut().copy_from_slice(bytes);
        Ok(Self { bytes: arr })
    }

    /// View the raw encoding.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<P: MlKemParams> AsRef<[u8]> for SecretKey<P> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<P: MlKemParams> Clone for SecretKey<P> {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
        }
    }
}

impl<P: MlKemParams> Zeroize for SecretKey<P> {
    fn zeroize(&mut self) {
        self.bytes.zeroize();
    }
}

impl<P: MlKemParams> Drop for SecretKey<P> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<P: MlKemParams> core::fmt::Debug for SecretKey<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SecretKey([REDACTED])")
    }
}

/// ML-KEM ciphertext.
pub struct Ciphertext<P: MlKemParams> {
    pub(crate) bytes: P::CtArray,
}

impl<P: MlKemParams> Ciphertext<P> {
    /// Wrap a backing array.
    #[inline]
    pub fn from_bytes(bytes: P::CtArray) -> Self {
        Self { bytes }
    }

    /// Parse from a byte slice, validating the length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, Error> {
        crate::check_len(bytes, P::CT_BYTES)?;
        let mut arr = P::CtArray::zeroed();
        arr.as_mut().copy_from_slice(bytes);
        Ok(Self { bytes: arr })
    }

    /// View the raw encoding.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<P: MlKemParams> AsRef<[u8]> for Ciphertext<P> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<P: MlKemParams> Clone for Ciphertext<P> {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
        }
    }
}

impl<P: MlKemParams> core::fmt::Debug for Ciphertext<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Ciphertext")
            .field("len", &self.bytes.as_ref().len())
            .finish_non_exhaustive()
    }
}

/// KEM shared secret (32 bytes).
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret {
    pub(crate) bytes: [u8; SSBYTES],
}

impl SharedSecret {
    /// Wrap a 32-byte secret.
    #[inline]
    pub fn from_bytes(bytes: [u8; SSBYTES]) -> Self {
        Self { bytes }
    }
}

impl AsRef<[u8]> for SharedSecret {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl core::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SharedSecret").finish_non_exhaustive()
    }
}
