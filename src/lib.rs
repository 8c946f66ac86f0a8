//! `pqchub` -- a native post-quantum cryptography suite.
//!
//! Implements three NIST-track algorithm families in pure Rust, with no
//! external binary or FFI layer:
//!
//! - **ML-KEM** (FIPS 203): ML-KEM-512, ML-KEM-768, ML-KEM-1024
//! - **ML-DSA** (FIPS 204): ML-DSA-44, ML-DSA-65, ML-DSA-87
//! - **Falcon**: Falcon-512, Falcon-1024
//!
//! Each family exposes typed keys parameterised by a marker type, plus a
//! byte-slice call surface in [`api`] for callers that only deal in raw
//! buffers. All operations are pure and synchronous; the caller supplies
//! the RNG (`rand_core::CryptoRng`) and owns every buffer.
//!
//! ```no_run
//! use pqchub::mlkem::{self, MlKem768};
//!
//! let mut rng = rand::rng();
//! let (pk, sk) = mlkem::keypair::<MlKem768>(&mut rng);
//! let (ct, ss_sender) = mlkem::encapsulate(&pk, &mut rng);
//! let ss_receiver = mlkem::decapsulate(&ct, &sk);
//! assert_eq!(ss_sender.as_ref(), ss_receiver.as_ref());
//! ```

#![deny(unsafe_code)]

pub mod api;
pub mod ct;
pub mod falcon;
pub mod hash;
pub mod mldsa;
pub mod mlkem;
pub mod params;

pub use api::{KemScheme, SignScheme};
pub use falcon::{Falcon512, Falcon1024};
pub use mldsa::{MlDsa44, MlDsa65, MlDsa87};
pub use mlkem::{MlKem512, MlKem768, MlKem1024};

/// Errors surfaced by key construction, input validation, and the
/// (bounded) rejection-sampling loops.
///
/// Semantic failure is deliberately *not* represented here: KEM
/// decapsulation always returns a shared secret (implicit rejection) and
/// signature verification returns `bool`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Input byte slice has the wrong length for this parameter set.
    #[error("invalid length: expected {expected}, got {actual}")]
    InvalidLength {
        /// Expected byte count.
        expected: usize,
        /// Actual byte count received.
        actual: usize,
    },
    /// Key bytes failed structural validation.
    #[error("invalid key")]
    InvalidKey,
    /// A rejection-sampling loop exceeded its iteration ceiling.
    ///
    /// This is fatal to the call; no partial output is produced. With a
    /// healthy RNG the probability of hitting the ceiling is negligible.
    #[error("rejection sampling exceeded its iteration ceiling")]
    Sampling,
}

pub(crate) fn check_len(buf: &[u8], expected: usize) -> Result<(), Error> {
    if buf.len() == expected {
        Ok(())
    } else {
        Err(Error::InvalidLength {
            expected,
            actual: buf.len(),
        })
    }
}
