//! Falcon key and signature types.

use zeroize::Zeroize;

use super::params::FalconParams;
use crate::params::ByteArray;
use crate::Error;

/// Falcon verification key: the NTRU public polynomial h.
pub struct PublicKey<P: FalconParams> {
    pub(crate) bytes: P::PkArray,
}

impl<P: FalconParams> PublicKey<P> {
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

impl<P: FalconParams> AsRef<[u8]> for PublicKey<P> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<P: FalconParams> Clone for PublicKey<P> {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
        }
    }
}

impl<P: FalconParams> core::fmt::Debug for PublicKey<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PublicKey")
            .field("len", &self.bytes.as_ref().len())
            .finish_non_exhaustive()
    }
}

/// Falcon signing key: the trimmed basis polynomials (f, g, F).
/// Zeroized on drop.
pub struct SecretKey<P: FalconParams> {
    pub(crate) bytes: P::SkArray,
}

impl<P: FalconParams> SecretKey<P> {
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

impl<P: FalconParams> AsRef<[u8]> for SecretKey<P> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<P: FalconParams> Clone for SecretKey<P> {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
        }
    }
}

impl<P: FalconParams> Zeroize for SecretKey<P> {
    fn zeroize(&mut self) {
        self.bytes.zeroize();
    }
}

impl<P: FalconParams> Drop for SecretKey<P> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<P: FalconParams> core::fmt::Debug for SecretKey<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SecretKey([REDACTED])")
    }
}

/// Falcon signature in the fixed-length padded format:
/// header ‖ salt ‖ compressed s2 ‖ zero padding.
pub struct Signature<P: FalconParams> {
    pub(crate) bytes: P::SigArray,
}

impl<P: FalconParams> Signature<P> {
    /// Wrap a backing array.
    #[inline]
    pub fn from_bytes(bytes: P::SigArray) -> Self {
        Self { bytes }
    }

    /// Parse from a byte slice, validating the length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, Error> {
        crate::check_len(bytes, P::SIG_BYTES)?;
        let mut arr = P::SigArray::zeroed();
        arr.as_mut().copy_from_slice(bytes);
        Ok(Self { bytes: arr })
    }

    /// View the raw encoding.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<P: FalconParams> AsRef<[u8]> for Signature<P> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<P: FalconParams> Clone for Signature<P> {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
        }
    }
}

impl<P: FalconParams> core::fmt::Debug for Signature<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Signature")
            .field("len", &self.bytes.as_ref().len())
            .finish_non_exhaustive()
    }
}
