//! Falcon NTRU-lattice signatures over Z[X]/(Xⁿ + 1), q = 12289.
//!
//! Layered as: `zq` (modular arithmetic and NTT), `fft`/`ldl` (floating
//! point trapdoor machinery), `samplerz`/`ffsampling` (Gaussian sampling),
//! `ntrugen` (key generation tower), `encoding` (wire codecs), and `sig`
//! (the keypair/sign/verify driver).

mod encoding;
mod ffsampling;
mod fft;
mod ldl;
mod ntrugen;
mod params;
mod samplerz;
mod sig;
mod types;
mod zq;

pub use params::{Falcon1024, Falcon512, FalconParams};
pub use sig::{keypair, sign, verify};
pub use types::{PublicKey, SecretKey, Signature};
