//! Hash and extendable-output function (XOF) adapters.
//!
//! Wraps the SHA-3 family for all three algorithm families:
//!
//! | Standard name | Primitive   | Function |
//! |---------------|-------------|----------|
//! | **H**         | SHA3-256    | [`hash_h`] |
//! | **G**         | SHA3-512    | [`hash_g`] |
//! | **PRF**       | SHAKE-256   | [`prf`] |
//! | **XOF**       | SHAKE-128   | [`xof_absorb`] |
//! | **J**         | SHAKE-256   | [`rkprf`] |
//!
//! ML-DSA and Falcon expandable streams (ExpandA, ExpandS, ExpandMask,
//! HashToPoint, ...) absorb multi-part inputs; [`shake128`] and
//! [`shake256`] cover those.

use crate::params::{SSBYTES, SYMBYTES};
use sha3::digest::{ExtendableOutput, Update, XofReader};
use sha3::{Digest, Sha3_256, Sha3_512, Shake128, Shake256};

/// H(input) = SHA3-256(input) → 32 bytes.
#[inline]
pub fn hash_h(input: &[u8]) -> [u8; 32] {
    let mut h = Sha3_256::new();
    Digest::update(&mut h, input);
    h.finalize().into()
}

/// G(input) = SHA3-512(input) → 64 bytes.
#[inline]
pub fn hash_g(input: &[u8]) -> [u8; 64] {
    let mut h = Sha3_512::new();
    Digest::update(&mut h, input);
    h.finalize().into()
}

/// PRFη(seed, nonce) = SHAKE-256(seed ‖ nonce), squeezed to fill `output`.
pub fn prf(seed: &[u8; SYMBYTES], nonce: u8, output: &mut [u8]) {
    let mut h = Shake256::default();
    Update::update(&mut h, seed);
    Update::update(&mut h, &[nonce]);
    let mut reader = h.finalize_xof();
    reader.read(output);
}

/// Create a SHAKE-128 XOF absorber for matrix sampling.
///
/// Absorbs `seed ‖ x ‖ y` and returns a reader from which uniform
/// bytes can be squeezed.
pub fn xof_absorb(seed: &[u8; SYMBYTES], x: u8, y: u8) -> impl XofReader {
    let mut h = Shake128::default();
    Update::update(&mut h, seed);
    Update::update(&mut h, &[x, y]);
    h.finalize_xof()
}

/// J(key, ct) = SHAKE-256(key ‖ ct) → 32 bytes.
///
/// Used as the rejection-key PRF in decapsulation (implicit reject).
pub fn rkprf(key: &[u8; SYMBYTES], ct: &[u8]) -> [u8; SSBYTES] {
    let mut h = Shake256::default();
    Update::update(&mut h, key);
    Update::update(&mut h, ct);
    let mut reader = h.finalize_xof();
    let mut out = [0u8; SSBYTES];
    reader.read(&mut out);
    out
}

/// SHAKE-128 over the concatenation of `inputs`, returned as a reader.
pub fn shake128(inputs: &[&[u8]]) -> impl XofReader {
    let mut h = Shake128::default();
    for part in inputs {
        Update::update(&mut h, part);
    }
    h.finalize_xof()
}

/// SHAKE-256 over the concatenation of `inputs`, returned as a reader.
pub fn shake256(inputs: &[&[u8]]) -> impl XofReader {
    let mut h = Shake256::default();
    for part in inputs {
        Update::update(&mut h, part);
    }
    h.finalize_xof()
}

/// SHAKE-256 over the concatenation of `inputs`, squeezed into `output`.
pub fn shake256_into(inputs: &[&[u8]], output: &mut [u8]) {
    let mut reader = shake256(inputs);
    reader.read(output);
}

#[cfg(test)]
mod tests {
    use super::*;

    // SHA3-256("") and SHA3-512("") from FIPS 202 example values.
    #[test]
    fn h_empty() {
        let expect = [
            0xa7, 0xff, 0xc6, 0xf8, 0xbf, 0x1e, 0xd7, 0x66, 0x51, 0xc1, 0x47, 0x56, 0xa0, 0x61,
            0xd6, 0x62, 0xf5, 0x80, 0xff, 0x4d, 0xe4, 0x3b, 0x49, 0xfa, 0x82, 0xd8, 0x0a, 0x4b,
            0x80, 0xf8, 0x43, 0x4a,
        ];
        assert_eq!(hash_h(b""), expect);
    }

    #[test]
    fn g_empty_prefix() {
        let out = hash_g(b"");
        assert_eq!(
            &out[..8],
            &[0xa6, 0x9f, 0x73, 0xcc, 0xa2, 0x3a, 0x9a, 0xc5]
        );
    }

    #[test]
    fn shake256_multipart_matches_whole() {
        let mut split = [0u8; 64];
        shake256_into(&[b"abc", b"def"], &mut split);
        let mut whole = [0u8; 64];
        shake256_into(&[b"abcdef"], &mut whole);
        assert_eq!(split, whole);
    }

    #[test]
    fn prf_distinct_nonces() {
        let seed = [7u8; SYMBYTES];
        let mut a = [0u8; 128];
        let mut b = [0u8; 128];
        prf(&seed, 0, &mut a);
        prf(&seed, 1, &mut b);
        assert_ne!(a, b);
    }
}
