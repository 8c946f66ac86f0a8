//! ML-DSA (FIPS 204) module-lattice signatures.
//!
//! Layered as: `reduce`/`ntt`/`rounding`/`bitpack`/`sample` (coefficient
//! arithmetic, hint rounding, and codecs), `poly` (structured wrappers),
//! and `sign` (key generation, hedged/deterministic signing, verification).

mod bitpack;
mod ntt;
mod params;
mod poly;
mod reduce;
mod rounding;
mod sample;
mod sign;
mod types;

pub use params::{MlDsa44, MlDsa65, MlDsa87, MlDsaParams};
pub use sign::{keypair, keypair_derand, sign, sign_derand, verify};
pub use types::{PublicKey, SecretKey, Signature};
