//! ML-DSA keygen, signing, and verification per FIPS 204.
//!
//! Signing is hedged by default (fresh 32-byte `rnd` per call);
//! [`sign_derand`] fixes `rnd = 0` for the deterministic variant. Messages
//! are framed as pure ML-DSA with an empty context string.

use super::bitpack;
use super::params::{MlDsaParams, D, N, Q, T0_PACKED, T1_PACKED};
use super::poly::{Poly, PolyVec};
use super::reduce::{center, reduce32};
use super::rounding;
use super::sample;
use super::types::{PublicKey, SecretKey, Signature};
use crate::hash;
use crate::params::{ByteArray, SYMBYTES};
use crate::Error;

/// Rejection rounds before signing gives up with [`Error::Sampling`].
/// Each round has an acceptance probability around 1/4 to 1/7 depending on
/// the parameter set, so 512 rounds is unreachable with a sound RNG.
const MAX_SIGN_ROUNDS: usize = 512;

/// Pure ML-DSA message framing: domain byte 0, empty context.
const MSG_PREFIX: [u8; 2] = [0, 0];

// ---------------------------------------------------------------------------
// Key generation
// ---------------------------------------------------------------------------

/// Deterministic key generation from a 32-byte seed ξ.
pub fn keypair_derand<P: MlDsaParams>(xi: &[u8; SYMBYTES]) -> (PublicKey<P>, SecretKey<P>) {
    match (P::K, P::L) {
        (4, 4) => keypair_inner::<P, 4, 4>(xi),
        (6, 5) => keypair_inner::<P, 6, 5>(xi),
        (8, 7) => keypair_inner::<P, 8, 7>(xi),
        _ => unreachable!(),
    }
}

/// Key generation with caller-supplied randomness.
pub fn keypair<P: MlDsaParams>(
    rng: &mut impl rand_core::CryptoRng,
) -> (PublicKey<P>, SecretKey<P>) {
    let mut xi = [0u8; SYMBYTES];
    rng.fill_bytes(&mut xi);
    keypair_derand::<P>(&xi)
}

fn keypair_inner<P: MlDsaParams, const K: usize, const L: usize>(
    xi: &[u8; SYMBYTES],
) -> (PublicKey<P>, SecretKey<P>) {
    // (ρ ‖ ρ′ ‖ K) = SHAKE-256(ξ ‖ k ‖ l), 128 bytes
    let mut expanded = [0u8; 128];
    hash::shake256_into(&[xi, &[P::K as u8, P::L as u8]], &mut expanded);
    let rho: [u8; 32] = expanded[..32].try_into().unwrap();
    let rho_prime: [u8; 64] = expanded[32..96].try_into().unwrap();
    let key: [u8; 32] = expanded[96..128].try_into().unwrap();

    let a_hat = expand_a::<K, L>(&rho);

    // Sample s1, s2 with indices 0..l and l..l+k
    let mut s1 = PolyVec::<L>::zero();
    for (r, p) in s1.polys.iter_mut().enumerate() {
        sample::expand_s_poly(&rho_prime, r as u16, P::ETA, &mut p.coeffs);
    }
    let mut s2 = PolyVec::<K>::zero();
    for (r, p) in s2.polys.iter_mut().enumerate() {
        sample::expand_s_poly(&rho_prime, (L + r) as u16, P::ETA, &mut p.coeffs);
    }

    // t = NTT⁻¹(Â · NTT(s1)) + s2
    let mut s1_hat = s1.clone();
    s1_hat.ntt();
    let mut t = matvec_mul::<K, L>(&a_hat, &s1_hat);
    t.invntt();
    let t_sum = t.clone();
    t.add(&t_sum, &s2);

    // (t1, t0) = Power2Round(t)
    let mut t1 = PolyVec::<K>::zero();
    let mut t0 = PolyVec::<K>::zero();
    for i in 0..K {
        for j in 0..N {
            let (hi, lo) = rounding::power2round(t.polys[i].coeffs[j]);
            t1.polys[i].coeffs[j] = hi;
            t0.polys[i].coeffs[j] = lo;
        }
    }

    // pk = ρ ‖ SimpleBitPack(t1)
    let mut pk_arr = P::PkArray::zeroed();
    {
        let pk = pk_arr.as_mut();
        pk[..32].copy_from_slice(&rho);
        for i in 0..K {
            let chunk = &mut pk[32 + i * T1_PACKED..32 + (i + 1) * T1_PACKED];
            bitpack::pack_simple(chunk, &t1.polys[i].coeffs, 10);
        }
    }

    // tr = SHAKE-256(pk), 64 bytes
    let mut tr = [0u8; 64];
    hash::shake256_into(&[pk_arr.as_ref()], &mut tr);

    // sk = ρ ‖ K ‖ tr ‖ BitPack(s1) ‖ BitPack(s2) ‖ BitPack(t0)
    let mut sk_arr = P::SkArray::zeroed();
    {
        let sk = sk_arr.as_mut();
        sk[..32].copy_from_slice(&rho);
        sk[32..64].copy_from_slice(&key);
        sk[64..128].copy_from_slice(&tr);
        let mut off = 128;
        let eta = P::ETA as i32;
        for p in s1.polys.iter() {
            bitpack::pack_signed(&mut sk[off..off + P::ETA_PACKED], &p.coeffs, eta, P::ETA_BITS);
            off += P::ETA_PACKED;
        }
        for p in s2.polys.iter() {
            bitpack::pack_signed(&mut sk[off..off + P::ETA_PACKED], &p.coeffs, eta, P::ETA_BITS);
            off += P::ETA_PACKED;
        }
        for p in t0.polys.iter() {
            bitpack::pack_signed(&mut sk[off..off + T0_PACKED], &p.coeffs, 1 << (D - 1), 13);
            off += T0_PACKED;
        }
    }

    (PublicKey::from_bytes(pk_arr), SecretKey::from_bytes(sk_arr))
}

// ---------------------------------------------------------------------------
// Signing
// ---------------------------------------------------------------------------

/// Hedged signing: a fresh random `rnd` enters the commitment derivation,
/// so repeated signatures over the same message differ.
pub fn sign<P: MlDsaParams>(
    sk: &SecretKey<P>,
    msg: &[u8],
    rng: &mut impl rand_core::CryptoRng,
) -> Result<Signature<P>, Error> {
    let mut rnd = [0u8; SYMBYTES];
    rng.fill_bytes(&mut rnd);
    sign_with_rnd::<P>(sk, msg, &rnd)
}

/// Deterministic signing (`rnd = 0`): the same key and message always
/// produce the same signature.
pub fn sign_derand<P: MlDsaParams>(sk: &SecretKey<P>, msg: &[u8]) -> Result<Signature<P>, Error> {
    sign_with_rnd::<P>(sk, msg, &[0u8; SYMBYTES])
}

fn sign_with_rnd<P: MlDsaParams>(
    sk: &SecretKey<P>,
    msg: &[u8],
    rnd: &[u8; SYMBYTES],
) -> Result<Signature<P>, Error> {
    match (P::K, P::L) {
        (4, 4) => sign_inner::<P, 4, 4>(sk, msg, rnd),
        (6, 5) => sign_inner::<P, 6, 5>(sk, msg, rnd),
        (8, 7) => sign_inner::<P, 8, 7>(sk, msg, rnd),
        _ => unreachable!(),
    }
}

fn sign_inner<P: MlDsaParams, const K: usize, const L: usize>(
    sk: &SecretKey<P>,
    msg: &[u8],
    rnd: &[u8; SYMBYTES],
) -> Result<Signature<P>, Error> {
    // Decode sk = ρ ‖ K ‖ tr ‖ s1 ‖ s2 ‖ t0
    let sk_bytes = sk.as_bytes();
    let rho: [u8; 32] = sk_bytes[..32].try_into().unwrap();
    let key = &sk_bytes[32..64];
    let tr = &sk_bytes[64..128];

    let mut off = 128;
    let eta = P::ETA as i32;
    let mut s1_hat = PolyVec::<L>::zero();
    for p in s1_hat.polys.iter_mut() {
        bitpack::unpack_signed(&mut p.coeffs, &sk_bytes[off..off + P::ETA_PACKED], eta, P::ETA_BITS);
        off += P::ETA_PACKED;
    }
    let mut s2_hat = PolyVec::<K>::zero();
    for p in s2_hat.polys.iter_mut() {
        bitpack::unpack_signed(&mut p.coeffs, &sk_bytes[off..off + P::ETA_PACKED], eta, P::ETA_BITS);
        off += P::ETA_PACKED;
    }
    let mut t0_hat = PolyVec::<K>::zero();
    for p in t0_hat.polys.iter_mut() {
        bitpack::unpack_signed(&mut p.coeffs, &sk_bytes[off..off + T0_PACKED], 1 << (D - 1), 13);
        off += T0_PACKED;
    }
    s1_hat.ntt();
    s2_hat.ntt();
    t0_hat.ntt();

    let a_hat = expand_a::<K, L>(&rho);

    // μ = SHAKE-256(tr ‖ 0x00 ‖ 0x00 ‖ M)
    let mut mu = [0u8; 64];
    hash::shake256_into(&[tr, &MSG_PREFIX, msg], &mut mu);

    // ρ″ = SHAKE-256(K ‖ rnd ‖ μ)
    let mut rho_prime2 = [0u8; 64];
    hash::shake256_into(&[key, rnd, &mu], &mut rho_prime2);

    let mut kappa: usize = 0;
    for _ in 0..MAX_SIGN_ROUNDS {
        // y from ExpandMask, w = NTT⁻¹(Â · NTT(y))
        let mut y = PolyVec::<L>::zero();
        for (r, p) in y.polys.iter_mut().enumerate() {
            sample::expand_mask_poly(
                &rho_prime2,
                (kappa + r) as u16,
                P::GAMMA1,
                P::Z_BITS,
                &mut p.coeffs,
            );
        }
        kappa += L;

        let mut y_hat = y.clone();
        y_hat.ntt();
        let mut w = matvec_mul::<K, L>(&a_hat, &y_hat);
        w.invntt();

        // Commitment hash over packed w1
        let mut w1 = PolyVec::<K>::zero();
        for i in 0..K {
            for j in 0..N {
                w1.polys[i].coeffs[j] = rounding::high_bits(w.polys[i].coeffs[j], P::GAMMA2);
            }
        }
        let mut w1_packed = [0u8; 1024]; // ≥ K · W1_PACKED for all sets
        pack_w1::<P, K>(&w1, &mut w1_packed);

        let mut c_tilde = [0u8; 64];
        hash::shake256_into(
            &[&mu, &w1_packed[..K * P::W1_PACKED]],
            &mut c_tilde[..P::C_TILDE_BYTES],
        );

        let mut c = Poly::zero();
        sample::sample_in_ball(&c_tilde[..P::C_TILDE_BYTES], P::TAU, &mut c.coeffs);
        let mut c_hat = c;
        c_hat.ntt();

        // z = y + c·s1, rejected if too large
        let mut cs1 = PolyVec::<L>::zero();
        cs1.pointwise_poly(&c_hat, &s1_hat);
        cs1.invntt();
        let mut z = PolyVec::<L>::zero();
        z.add(&y, &cs1);
        if z.norm_exceeds(P::GAMMA1 - P::BETA) {
            continue;
        }

        // Low part of w − c·s2, rejected if too large
        let mut cs2 = PolyVec::<K>::zero();
        cs2.pointwise_poly(&c_hat, &s2_hat);
        cs2.invntt();
        let mut w_cs2 = PolyVec::<K>::zero();
        w_cs2.sub(&w, &cs2);
        let mut r0_max = 0i32;
        for p in w_cs2.polys.iter() {
            for &coeff in p.coeffs.iter() {
                r0_max = r0_max.max(rounding::low_bits(coeff, P::GAMMA2).abs());
            }
        }
        if r0_max >= P::GAMMA2 - P::BETA {
            continue;
        }

        // Hints against c·t0
        let mut ct0 = PolyVec::<K>::zero();
        ct0.pointwise_poly(&c_hat, &t0_hat);
        ct0.invntt();
        if ct0.norm_exceeds(P::GAMMA2) {
            continue;
        }

        let mut hints = [[0i32; N]; K];
        let mut hint_count = 0usize;
        for i in 0..K {
            for j in 0..N {
                let neg_ct0 = center(reduce32(-ct0.polys[i].coeffs[j]));
                let r = w_cs2.polys[i].coeffs[j] + ct0.polys[i].coeffs[j];
                if rounding::make_hint(neg_ct0, r, P::GAMMA2) {
                    hints[i][j] = 1;
                    hint_count += 1;
                }
            }
        }
        if hint_count > P::OMEGA {
            continue;
        }

        // sig = c̃ ‖ BitPack(z) ‖ HintBitPack(h)
        let mut sig_arr = P::SigArray::zeroed();
        {
            let sig = sig_arr.as_mut();
            sig[..P::C_TILDE_BYTES].copy_from_slice(&c_tilde[..P::C_TILDE_BYTES]);
            let mut off = P::C_TILDE_BYTES;
            z.center();
            for p in z.polys.iter() {
                bitpack::pack_signed(&mut sig[off..off + P::Z_PACKED], &p.coeffs, P::GAMMA1, P::Z_BITS);
                off += P::Z_PACKED;
            }
            bitpack::pack_hints(&mut sig[off..off + P::OMEGA + K], &hints, P::OMEGA);
        }
        return Ok(Signature::from_bytes(sig_arr));
    }

    Err(Error::Sampling)
}

// ---------------------------------------------------------------------------
// Verification
// ---------------------------------------------------------------------------

/// Verify a signature over `msg`. Any decode failure, norm violation, or
/// commitment mismatch yields `false`.
pub fn verify<P: MlDsaParams>(pk: &PublicKey<P>, msg: &[u8], sig: &Signature<P>) -> bool {
    match (P::K, P::L) {
        (4, 4) => verify_inner::<P, 4, 4>(pk, msg, sig),
        (6, 5) => verify_inner::<P, 6, 5>(pk, msg, sig),
        (8, 7) => verify_inner::<P, 8, 7>(pk, msg, sig),
        _ => unreachable!(),
    }
}

fn verify_inner<P: MlDsaParams, const K: usize, const L: usize>(
    pk: &PublicKey<P>,
    msg: &[u8],
    sig: &Signature<P>,
) -> bool {
    // Decode pk = ρ ‖ t1
    let pk_bytes = pk.as_bytes();
    let rho: [u8; 32] = pk_bytes[..32].try_into().unwrap();
    let mut t1 = PolyVec::<K>::zero();
    for (i, p) in t1.polys.iter_mut().enumerate() {
        let chunk = &pk_bytes[32 + i * T1_PACKED..32 + (i + 1) * T1_PACKED];
        bitpack::unpack_simple(&mut p.coeffs, chunk, 10);
    }

    // Decode sig = c̃ ‖ z ‖ h
    let sig_bytes = sig.as_bytes();
    let c_tilde = &sig_bytes[..P::C_TILDE_BYTES];
    let mut off = P::C_TILDE_BYTES;
    let mut z = PolyVec::<L>::zero();
    for p in z.polys.iter_mut() {
        bitpack::unpack_signed(&mut p.coeffs, &sig_bytes[off..off + P::Z_PACKED], P::GAMMA1, P::Z_BITS);
        off += P::Z_PACKED;
    }
    let mut hints = [[0i32; N]; K];
    if !bitpack::unpack_hints(&mut hints, &sig_bytes[off..off + P::OMEGA + K], P::OMEGA) {
        return false;
    }

    if z.norm_exceeds(P::GAMMA1 - P::BETA) {
        return false;
    }

    // μ = SHAKE-256(SHAKE-256(pk) ‖ 0x00 ‖ 0x00 ‖ M)
    let mut tr = [0u8; 64];
    hash::shake256_into(&[pk_bytes], &mut tr);
    let mut mu = [0u8; 64];
    hash::shake256_into(&[&tr, &MSG_PREFIX, msg], &mut mu);

    let mut c = Poly::zero();
    sample::sample_in_ball(c_tilde, P::TAU, &mut c.coeffs);
    let mut c_hat = c;
    c_hat.ntt();

    let a_hat = expand_a::<K, L>(&rho);

    // w′ = NTT⁻¹(Â·NTT(z) − NTT(c)·NTT(t1·2ᵈ))
    let mut z_hat = z.clone();
    z_hat.ntt();
    let az_hat = matvec_mul::<K, L>(&a_hat, &z_hat);

    let mut t1_shifted = t1;
    for p in t1_shifted.polys.iter_mut() {
        for coeff in p.coeffs.iter_mut() {
            *coeff = reduce32(*coeff << D);
        }
    }
    t1_shifted.ntt();
    let mut ct1_hat = PolyVec::<K>::zero();
    ct1_hat.pointwise_poly(&c_hat, &t1_shifted);

    let mut w_approx = PolyVec::<K>::zero();
    w_approx.sub(&az_hat, &ct1_hat);
    w_approx.invntt();

    // Recover w1 via the hints and recompute the commitment hash
    let mut w1 = PolyVec::<K>::zero();
    for i in 0..K {
        for j in 0..N {
            w1.polys[i].coeffs[j] =
                rounding::use_hint(hints[i][j] == 1, w_approx.polys[i].coeffs[j], P::GAMMA2);
        }
    }
    let mut w1_packed = [0u8; 1024];
    pack_w1::<P, K>(&w1, &mut w1_packed);

    let mut c_tilde_prime = [0u8; 64];
    hash::shake256_into(
        &[&mu, &w1_packed[..K * P::W1_PACKED]],
        &mut c_tilde_prime[..P::C_TILDE_BYTES],
    );

    c_tilde == &c_tilde_prime[..P::C_TILDE_BYTES]
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

/// Expand the public matrix Â from ρ, row-major.
fn expand_a<const K: usize, const L: usize>(rho: &[u8; 32]) -> [PolyVec<L>; K] {
    let mut a: [PolyVec<L>; K] = core::array::from_fn(|_| PolyVec::zero());
    for (i, row) in a.iter_mut().enumerate() {
        for (j, p) in row.polys.iter_mut().enumerate() {
            sample::expand_a_poly(rho, i as u8, j as u8, &mut p.coeffs);
        }
    }
    a
}

/// NTT-domain matrix-vector product: `out[i] = Σⱼ a[i][j] · v[j]`.
fn matvec_mul<const K: usize, const L: usize>(
    a: &[PolyVec<L>; K],
    v: &PolyVec<L>,
) -> PolyVec<K> {
    let mut out = PolyVec::<K>::zero();
    let mut t = Poly::zero();
    for i in 0..K {
        let mut acc = Poly::zero();
        for j in 0..L {
            t.pointwise(&a[i].polys[j], &v.polys[j]);
            let prev = acc;
            acc.add(&prev, &t);
        }
        out.polys[i] = acc;
    }
    out
}

/// Pack w1 into `out[..K · W1_PACKED]`.
fn pack_w1<P: MlDsaParams, const K: usize>(w1: &PolyVec<K>, out: &mut [u8]) {
    for (i, p) in w1.polys.iter().enumerate() {
        let chunk = &mut out[i * P::W1_PACKED..(i + 1) * P::W1_PACKED];
        bitpack::pack_simple(chunk, &p.coeffs, P::W1_BITS);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mldsa::params::{MlDsa44, MlDsa65, MlDsa87};

    fn roundtrip<P: MlDsaParams>() {
        let xi = [13u8; SYMBYTES];
        let (pk, sk) = keypair_derand::<P>(&xi);
        assert_eq!(pk.as_bytes().len(), P::PK_BYTES);
        assert_eq!(sk.as_bytes().len(), P::SK_BYTES);

        let msg = b"attack at dawn";
        let sig = sign_derand::<P>(&sk, msg).expect("signing failed");
        assert!(verify::<P>(&pk, msg, &sig), "valid signature rejected");
        assert!(!verify::<P>(&pk, b"attack at dusk", &sig), "wrong message accepted");
    }

    #[test]
    fn roundtrip_44() {
        roundtrip::<MlDsa44>();
    }
    #[test]
    fn roundtrip_65() {
        roundtrip::<MlDsa65>();
    }
    #[test]
    fn roundtrip_87() {
        roundtrip::<MlDsa87>();
    }

    #[test]
    fn derand_signatures_are_stable() {
        let (_, sk) = keypair_derand::<MlDsa44>(&[1u8; SYMBYTES]);
        let a = sign_derand::<MlDsa44>(&sk, b"m").unwrap();
        let b = sign_derand::<MlDsa44>(&sk, b"m").unwrap();
        assert_eq!(a.as_bytes(), b.as_bytes());
    }

    #[test]
    fn corrupted_signature_rejected() {
        let (pk, sk) = keypair_derand::<MlDsa44>(&[2u8; SYMBYTES]);
        let sig = sign_derand::<MlDsa44>(&sk, b"m").unwrap();
        let mut bad = sig.as_bytes().to_vec();
        bad[0] ^= 1;
        let bad_sig = Signature::<MlDsa44>::from_slice(&bad).unwrap();
        assert!(!verify::<MlDsa44>(&pk, b"m", &bad_sig));
    }

    #[test]
    fn signature_under_wrong_key_rejected() {
        let (_, sk) = keypair_derand::<MlDsa44>(&[3u8; SYMBYTES]);
        let (other_pk, _) = keypair_derand::<MlDsa44>(&[4u8; SYMBYTES]);
        let sig = sign_derand::<MlDsa44>(&sk, b"m").unwrap();
        assert!(!verify::<MlDsa44>(&other_pk, b"m", &sig));
    }
}
