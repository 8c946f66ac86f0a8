//! Falcon parameter sets.

use crate::params::ByteArray;

/// Ring degree is always a power of two; the modulus is shared by both sets.
pub const Q: u32 = 12289;

/// Salt (nonce) length prepended to every signature, in bytes.
pub const SALT_LEN: usize = 40;

/// Standard deviation ceiling of the integer Gaussian base sampler.
pub const SIGMA_MAX: f64 = 1.8205;

/// Parameter set for one Falcon instance.
pub trait FalconParams: 'static {
    /// log2 of the ring degree.
    const LOGN: usize;
    /// Ring degree n.
    const N: usize = 1 << Self::LOGN;

    /// Signing Gaussian standard deviation σ.
    const SIGMA: f64;
    /// Lower bound σ_min passed to the integer sampler.
    const SIGMA_MIN: f64;
    /// Squared norm bound ⌊β²⌋ on accepted (s1, s2) pairs.
    const SIG_BOUND: i64;

    /// Bits per coefficient for f and g in the secret key encoding.
    const FG_BITS: usize;

    /// Public key: header byte plus 14 bits per coefficient.
    const PK_BYTES: usize = 1 + 14 * Self::N / 8;
    /// Secret key: header, f, g (FG_BITS each), F (8 bits).
    const SK_BYTES: usize = 1 + 2 * (Self::FG_BITS * Self::N / 8) + Self::N;
    /// Fixed (padded) signature length.
    const SIG_BYTES: usize;

    type PkArray: ByteArray;
    type SkArray: ByteArray;
    type SigArray: ByteArray;
}

/// Falcon-512: NIST level 1.
pub struct Falcon512;

/// Falcon-1024: NIST level 5.
pub struct Falcon1024;

impl FalconParams for Falcon512 {
    const LOGN: usize = 9;
    const SIGMA: f64 = 165.736_617_182_977_6;
    const SIGMA_MIN: f64 = 1.277_833_696_912_833_7;
    const SIG_BOUND: i64 = 34_034_726;
    const FG_BITS: usize = 6;
    const SIG_BYTES: usize = 666;
    type PkArray = [u8; 897];
    type SkArray = [u8; 1281];
    type SigArray = [u8; 666];
}

impl FalconParams for Falcon1024 {
    const LOGN: usize = 10;
    const SIGMA: f64 = 168.388_571_446_543_95;
    const SIGMA_MIN: f64 = 1.298_280_334_344_292;
    const SIG_BOUND: i64 = 70_265_242;
    const FG_BITS: usize = 5;
    const SIG_BYTES: usize = 1280;
    type PkArray = [u8; 1793];
    type SkArray = [u8; 2305];
    type SigArray = [u8; 1280];
}

const _: () = {
    assert!(Falcon512::N == 512 && Falcon1024::N == 1024);
    assert!(Falcon512::PK_BYTES == 897 && Falcon1024::PK_BYTES == 1793);
    assert!(Falcon512::SK_BYTES == 1281 && Falcon1024::SK_BYTES == 2305);
    // 2n must divide q − 1 for the negacyclic NTT to exist.
    assert!((Q as usize - 1) % (2 * Falcon1024::N) == 0);
};
