//! Byte-slice call surface.
//!
//! The typed family modules are the primary API; these traits flatten them
//! to raw buffers for callers marshalling across process or language
//! boundaries. Lengths are validated up front so no cryptographic work
//! happens on malformed input, and the size constants are queryable
//! without constructing anything.

use rand_core::CryptoRng;

use crate::falcon::{self, FalconParams};
use crate::mldsa::{self, MlDsaParams};
use crate::mlkem::{self, MlKemParams};
use crate::params::SSBYTES;
use crate::{Error, Falcon1024, Falcon512, MlDsa44, MlDsa65, MlDsa87, MlKem1024, MlKem512,
            MlKem768};

/// A key encapsulation mechanism over raw byte buffers.
pub trait KemScheme {
    const PUBLIC_KEY_BYTES: usize;
    const SECRET_KEY_BYTES: usize;
    const CIPHERTEXT_BYTES: usize;
    const SHARED_SECRET_BYTES: usize = SSBYTES;

    /// Generate an encoded (public key, secret key) pair.
    fn keypair(rng: &mut impl CryptoRng) -> (Vec<u8>, Vec<u8>);

    /// Encapsulate against an encoded public key, producing
    /// (ciphertext, shared secret).
    fn encapsulate(pk: &[u8], rng: &mut impl CryptoRng) -> Result<(Vec<u8>, Vec<u8>), Error>;

    /// Decapsulate an encoded ciphertext with an encoded secret key.
    /// Always yields a shared secret; a forged ciphertext yields the
    /// implicit-rejection decoy.
    fn decapsulate(ct: &[u8], sk: &[u8]) -> Result<Vec<u8>, Error>;
}

/// A signature scheme over raw byte buffers.
pub trait SignScheme {
    const PUBLIC_KEY_BYTES: usize;
    const SECRET_KEY_BYTES: usize;
    /// Signature length; for Falcon the padded fixed length.
    const SIGNATURE_BYTES: usize;

    /// Generate an encoded (public key, secret key) pair.
    fn keypair(rng: &mut impl CryptoRng) -> Result<(Vec<u8>, Vec<u8>), Error>;

    /// Sign a message with an encoded secret key.
    fn sign(msg: &[u8], sk: &[u8], rng: &mut impl CryptoRng) -> Result<Vec<u8>, Error>;

    /// Verify an encoded signature; malformed inputs simply verify false.
    fn verify(sig: &[u8], msg: &[u8], pk: &[u8]) -> bool;
}

macro_rules! impl_kem_scheme {
    ($set:ty) => {
        impl KemScheme for $set {
            const PUBLIC_KEY_BYTES: usize = <$set as MlKemParams>::PK_BYTES;
            const SECRET_KEY_BYTES: usize = <$set as MlKemParams>::SK_BYTES;
            const CIPHERTEXT_BYTES: usize = <$set as MlKemParams>::CT_BYTES;

            fn keypair(rng: &mut impl CryptoRng) -> (Vec<u8>, Vec<u8>) {
                let (pk, sk) = mlkem::keypair::<$set>(rng);
                (pk.as_bytes().to_vec(), sk.as_bytes().to_vec())
            }

            fn encapsulate(
                pk: &[u8],
                rng: &mut impl CryptoRng,
            ) -> Result<(Vec<u8>, Vec<u8>), Error> {
                let pk = mlkem::PublicKey::<$set>::from_slice(pk)?;
                let (ct, ss) = mlkem::encapsulate(&pk, rng);
                Ok((ct.as_bytes().to_vec(), ss.as_ref().to_vec()))
            }

            fn decapsulate(ct: &[u8], sk: &[u8]) -> Result<Vec<u8>, Error> {
                let ct = mlkem::Ciphertext::<$set>::from_slice(ct)?;
                let sk = mlkem::SecretKey::<$set>::from_slice(sk)?;
                Ok(mlkem::decapsulate(&ct, &sk).as_ref().to_vec())
            }
        }
    };
}

impl_kem_scheme!(MlKem512);
impl_kem_scheme!(MlKem768);
impl_kem_scheme!(MlKem1024);

macro_rules! impl_mldsa_scheme {
    ($set:ty) => {
        impl SignScheme for $set {
            const PUBLIC_KEY_BYTES: usize = <$set as MlDsaParams>::PK_BYTES;
            const SECRET_KEY_BYTES: usize = <$set as MlDsaParams>::SK_BYTES;
            const SIGNATURE_BYTES: usize = <$set as MlDsaParams>::SIG_BYTES;

            fn keypair(rng: &mut impl CryptoRng) -> Result<(Vec<u8>, Vec<u8>), Error> {
                let (pk, sk) = mldsa::keypair::<$set>(rng);
                Ok((pk.as_bytes().to_vec(), sk.as_bytes().to_vec()))
            }

            fn sign(msg: &[u8], sk: &[u8], rng: &mut impl CryptoRng) -> Result<Vec<u8>, Error> {
                let sk = mldsa::SecretKey::<$set>::from_slice(sk)?;
                let sig = mldsa::sign(&sk, msg, rng)?;
                Ok(sig.as_bytes().to_vec())
            }

            fn verify(sig: &[u8], msg: &[u8], pk: &[u8]) -> bool {
                let (Ok(sig), Ok(pk)) = (
                    mldsa::Signature::<$set>::from_slice(sig),
                    mldsa::PublicKey::<$set>::from_slice(pk),
                ) else {
                    return false;
                };
                mldsa::verify(&pk, msg, &sig)
            }
        }
    };
}

impl_mldsa_scheme!(MlDsa44);
impl_mldsa_scheme!(MlDsa65);
impl_mldsa_scheme!(MlDsa87);

macro_rules! impl_falcon_scheme {
    ($set:ty) => {
        impl SignScheme for $set {
            const PUBLIC_KEY_BYTES: usize = <$set as FalconParams>::PK_BYTES;
            const SECRET_KEY_BYTES: usize = <$set as FalconParams>::SK_BYTES;
            const SIGNATURE_BYTES: usize = <$set as FalconParams>::SIG_BYTES;

            fn keypair(rng: &mut impl CryptoRng) -> Result<(Vec<u8>, Vec<u8>), Error> {
                let (pk, sk) = falcon::keypair::<$set>(rng)?;
                Ok((pk.as_bytes().to_vec(), sk.as_bytes().to_vec()))
            }

            fn sign(msg: &[u8], sk: &[u8], rng: &mut impl CryptoRng) -> Result<Vec<u8>, Error> {
                let sk = falcon::SecretKey::<$set>::from_slice(sk)?;
                let sig = falcon::sign(&sk, msg, rng)?;
                Ok(sig.as_bytes().to_vec())
            }

            fn verify(sig: &[u8], msg: &[u8], pk: &[u8]) -> bool {
                let (Ok(sig), Ok(pk)) = (
                    falcon::Signature::<$set>::from_slice(sig),
                    falcon::PublicKey::<$set>::from_slice(pk),
                ) else {
                    return false;
                };
                falcon::verify(&pk, msg, &sig)
            }
        }
    };
}

impl_falcon_scheme!(Falcon512);
impl_falcon_scheme!(Falcon1024);
