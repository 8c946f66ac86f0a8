//! ML-DSA key and signature types.

use zeroize::Zeroize;

use super::params::MlDsaParams;
use crate::params::ByteArray;
use crate::Error;

/// ML-DSA verification key (public key).
pub struct PublicKey<P: MlDsaParams> {
    pub(crate) bytes: P::PkArray,
}

impl<P: MlDsaParams> PublicKey<P> {
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

impl<P: MlDsaParams> AsRef<[u8]> for PublicKey<P> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<P: MlDsaParams> Clone for PublicKey<P> {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
        }
    }
}

impl<P: MlDsaParams> core::fmt::Debug for PublicKey<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PublicKey")
            .field("len", &self.bytes.as_ref().len())
            .finish_non_exhaustive()
    }
}

/// ML-DSA signing key (secret key). Zeroized on drop.
pub struct SecretKey<P: MlDsaParams> {
    pub(crate) bytes: P::SkArray,
}

impl<P: MlDsaParams> SecretKey<P> {
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

impl<P: MlDsaParams> AsRef<[u8]> for SecretKey<P> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<P: MlDsaParams> Clone for SecretKey<P> {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
        }
    }
}

impl<P: MlDsaParams> Zeroize for SecretKey<P> {
    fn zeroize(&mut self) {
        self.bytes.zeroize();
    }
}

impl<P: MlDsaParams> Drop for SecretKey<P> {
    fn drop(&mut self) {
        self.zeroize();
    }
}

impl<P: MlDsaParams> core::fmt::Debug for SecretKey<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SecretKey([REDACTED])")
    }
}

/// ML-DSA signature (fixed length per parameter set).
pub struct Signature<P: MlDsaParams> {
    pub(crate) bytes: P::SigArray,
}

impl<P: MlDsaParams> Signature<P> {
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

impl<P: MlDsaParams> AsRef<[u8]> for Signature<P> {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        self.bytes.as_ref()
    }
}

impl<P: MlDsaParams> Clone for Signature<P> {
    fn clone(&self) -> Self {
        Self {
            bytes: self.bytes.clone(),
        }
    }
}

impl<P: MlDsaParams> core::fmt::Debug for Signature<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Signature")
            .field("len", &self.bytes.as_ref().len())
            .finish_non_exhaustive()
    }
}
