//! ML-DSA parameter definitions: the [`MlDsaParams`] trait and the marker
//! types [`MlDsa44`], [`MlDsa65`], [`MlDsa87`].

use crate::params::ByteArray;

/// Polynomial degree.
pub const N: usize = 256;

/// Field modulus q = 2²³ − 2¹³ + 1.
pub const Q: i32 = 8_380_417;

/// Dropped bits in Power2Round (all parameter sets).
pub const D: usize = 13;

/// Bytes per packed t1 polynomial (10 bits per coefficient).
pub const T1_PACKED: usize = 320;

/// Bytes per packed t0 polynomial (13 bits per coefficient).
pub const T0_PACKED: usize = 416;

/// ML-DSA parameter set implemented by the three marker types.
pub trait MlDsaParams: 'static {
    /// Rows of the public matrix A.
    const K: usize;
    /// Columns of the public matrix A.
    const L: usize;
    /// Secret coefficient range: s1, s2 ∈ [−η, η].
    const ETA: usize;
    /// Number of ±1 entries in the challenge polynomial.
    const TAU: usize;
    /// Rejection threshold β = τ·η.
    const BETA: i32;
    /// Mask coefficient range (y ∈ (−γ₁, γ₁]).
    const GAMMA1: i32;
    /// Low-order rounding range.
    const GAMMA2: i32;
    /// Maximum total weight of the hint.
    const OMEGA: usize;
    /// Collision strength in bits; the challenge hash is λ/4 bytes.
    const LAMBDA: usize;

    /// Bits per packed z coefficient (1 + bitlen(γ₁ − 1)).
    const Z_BITS: usize;
    /// Bits per packed w1 coefficient.
    const W1_BITS: usize;
    /// Bits per packed s1/s2 coefficient (bitlen(2η)).
    const ETA_BITS: usize;

    /// Bytes per packed z polynomial.
    const Z_PACKED: usize;
    /// Bytes per packed w1 polynomial.
    const W1_PACKED: usize;
    /// Bytes per packed s1/s2 polynomial.
    const ETA_PACKED: usize;
    /// Challenge hash bytes (λ/4).
    const C_TILDE_BYTES: usize;

    /// Public key bytes.
    const PK_BYTES: usize;
    /// Secret key bytes.
    const SK_BYTES: usize;
    /// Signature bytes.
    const SIG_BYTES: usize;

    /// Backing array for public keys.
    type PkArray: ByteArray;
    /// Backing array for secret keys.
    type SkArray: ByteArray;
    /// Backing array for signatures.
    type SigArray: ByteArray;
}

/// ML-DSA-44 parameter set (NIST security category 2).
#[derive(Debug, Clone, Copy)]
pub struct MlDsa44;

impl MlDsaParams for MlDsa44 {
    const K: usize = 4;
    const L: usize = 4;
    const ETA: usize = 2;
    const TAU: usize = 39;
    const BETA: i32 = 78;
    const GAMMA1: i32 = 1 << 17;
    const GAMMA2: i32 = (Q - 1) / 88; // 95232
    const OMEGA: usize = 80;
    const LAMBDA: usize = 128;

    const Z_BITS: usize = 18;
    const W1_BITS: usize = 6;
    const ETA_BITS: usize = 3;

    const Z_PACKED: usize = 576;
    const W1_PACKED: usize = 192;
    const ETA_PACKED: usize = 96;
    const C_TILDE_BYTES: usize = 32;

    const PK_BYTES: usize = 1312;
    const SK_BYTES: usize = 2560;
    const SIG_BYTES: usize = 2420;

    type PkArray = [u8; 1312];
    type SkArray = [u8; 2560];
    type SigArray = [u8; 2420];
}

/// ML-DSA-65 parameter set (NIST security category 3).
#[derive(Debug, Clone, Copy)]
pub struct MlDsa65;

impl MlDsaParams for MlDsa65 {
    const K: usize = 6;
    const L: usize = 5;
    const ETA: usize = 4;
    const TAU: usize = 49;
    const BETA: i32 = 196;
    const GAMMA1: i32 = 1 << 19;
    const GAMMA2: i32 = (Q - 1) / 32; // 261888
    const OMEGA: usize = 55;
    const LAMBDA: usize = 192;

    const Z_BITS: usize = 20;
    const W1_BITS: usize = 4;
    const ETA_BITS: usize = 4;

    const Z_PACKED: usize = 640;
    const W1_PACKED: usize = 128;
    const ETA_PACKED: usize = 128;
    const C_TILDE_BYTES: usize = 48;

    const PK_BYTES: usize = 1952;
    const SK_BYTES: usize = 4032;
    const SIG_BYTES: usize = 3309;

    type PkArray = [u8; 1952];
    type SkArray = [u8; 4032];
    type SigArray = [u8; 3309];
}

/// ML-DSA-87 parameter set (NIST security category 5).
#[derive(Debug, Clone, Copy)]
pub struct MlDsa87;

impl MlDsaParams for MlDsa87 {
    const K: usize = 8;
    const L: usize = 7;
    const ETA: usize = 2;
    const TAU: usize = 60;
    const BETA: i32 = 120;
    const GAMMA1: i32 = 1 << 19;
    const GAMMA2: i32 = (Q - 1) / 32; // 261888
    const OMEGA: usize = 75;
    const LAMBDA: usize = 256;

    const Z_BITS: usize = 20;
    const W1_BITS: usize = 4;
    const ETA_BITS: usize = 3;

    const Z_PACKED: usize = 640;
    const W1_PACKED: usize = 128;
    const ETA_PACKED: usize = 96;
    const C_TILDE_BYTES: usize = 64;

    const PK_BYTES: usize = 2592;
    const SK_BYTES: usize = 4896;
    const SIG_BYTES: usize = 4627;

    type PkArray = [u8; 2592];
    type SkArray = [u8; 4896];
    type SigArray = [u8; 4627];
}

const _: () = {
    macro_rules! check_params {
        ($t:ty) => {
            assert!(<$t>::BETA == (<$t>::TAU * <$t>::ETA) as i32);
            assert!(<$t>::Z_PACKED == N * <$t>::Z_BITS / 8);
            assert!(<$t>::W1_PACKED == N * <$t>::W1_BITS / 8);
            assert!(<$t>::ETA_PACKED == N * <$t>::ETA_BITS / 8);
            assert!(<$t>::C_TILDE_BYTES == <$t>::LAMBDA / 4);
            assert!(<$t>::PK_BYTES == 32 + <$t>::K * T1_PACKED);
            assert!(
                <$t>::SK_BYTES
                    == 128 + (<$t>::K + <$t>::L) * <$t>::ETA_PACKED + <$t>::K * T0_PACKED
            );
            assert!(
                <$t>::SIG_BYTES
                    == <$t>::C_TILDE_BYTES + <$t>::L * <$t>::Z_PACKED + <$t>::OMEGA + <$t>::K
            );
        };
    }
    check_params!(MlDsa44);
    check_params!(MlDsa65);
    check_params!(MlDsa87);

    // Cross-check against FIPS 204 table 2 sizes.
    assert!(MlDsa44::PK_BYTES == 1312 && MlDsa44::SK_BYTES == 2560 && MlDsa44::SIG_BYTES == 2420);
    assert!(MlDsa65::PK_BYTES == 1952 && MlDsa65::SK_BYTES == 4032 && MlDsa65::SIG_BYTES == 3309);
    assert!(MlDsa87::PK_BYTES == 2592 && MlDsa87::SK_BYTES == 4896 && MlDsa87::SIG_BYTES == 4627);
};
