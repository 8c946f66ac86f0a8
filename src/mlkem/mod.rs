//! ML-KEM (FIPS 203) module-lattice key encapsulation.
//!
//! Layered as: `reduce`/`ntt`/`sample`/`pack` (coefficient arithmetic and
//! codecs), `poly`/`polyvec` (structured wrappers), `pke` (the inner IND-CPA
//! scheme), and `kem` (the Fujisaki-Okamoto transform with implicit
//! rejection).

mod kem;
mod ntt;
mod pack;
mod params;
mod pke;
mod poly;
mod polyvec;
mod reduce;
mod sample;
mod types;

pub use kem::{decapsulate, encapsulate, encapsulate_derand, keypair, keypair_derand};
pub use params::{MlKem1024, MlKem512, MlKem768, MlKemParams};
pub use types::{Ciphertext, PublicKey, SecretKey, SharedSecret};
