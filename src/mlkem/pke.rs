//! IND-CPA public-key encryption, the inner PKE scheme used by ML-KEM.
//!
//! Not exposed directly; called by [`super::kem`].

use super::params::MlKemParams;
use super::{poly::Poly, polyvec::PolyVec, sample};
use crate::hash;
use crate::params::SYMBYTES;

/// Sample the K×K public matrix A from seed ρ using SHAKE-128.
///
/// If `transposed`, indices are swapped (produces Aᵀ for encryption).
fn gen_matrix<const K: usize>(a: &mut [PolyVec<K>], seed: &[u8; SYMBYTES], transposed: bool) {
    for i in 0..K {
        for j in 0..K {
            let (x, y) = if transposed {
                (i as u8, j as u8)
            } else {
                (j as u8, i as u8)
            };
            let mut xof = hash::xof_absorb(seed, x, y);
            sample::rej_uniform(&mut a[i].polys[j].coeffs, &mut xof);
        }
    }
}

/// Deterministic IND-CPA keypair generation.
///
/// `coins` is 32 bytes of randomness (the seed `d` in FIPS 203). Writes the
/// public key to `pk_bytes` and the IND-CPA secret key to `sk_bytes`.
pub(crate) fn indcpa_keypair_derand<P: MlKemParams>(
    pk_bytes: &mut [u8],
    sk_bytes: &mut [u8],
    coins: &[u8; SYMBYTES],
) {
    match P::K {
        2 => indcpa_keypair_inner::<P, 2>(pk_bytes, sk_bytes, coins),
        3 => indcpa_keypair_inner::<P, 3>(pk_bytes, sk_bytes, coins),
        4 => indcpa_keypair_inner::<P, 4>(pk_bytes, sk_bytes, coins),
        _ => unreachable!(),
    }
}

fn indcpa_keypair_inner<P: MlKemParams, const K: usize>(
    pk_bytes: &mut [u8],
    sk_bytes: &mut [u8],
    coins: &[u8; SYMBYTES],
) {
    // G(d ‖ k) → (ρ ‖ σ)  (FIPS 203: k is appended before hashing)
    let mut g_input = [0u8; SYMBYTES + 1];
    g_input[..SYMBYTES].copy_from_slice(coins);
    g_input[SYMBYTES] = K as u8;
    let buf = hash::hash_g(&g_input);
    let public_seed: [u8; SYMBYTES] = buf[..SYMBYTES].try_into().unwrap();
    let noise_seed: [u8; SYMBYTES] = buf[SYMBYTES..].try_into().unwrap();

    let mut a: [PolyVec<K>; K] = core::array::from_fn(|_| PolyVec::zero());
    gen_matrix::<K>(&mut a, &public_seed, false);

    // Sample secret vector s and error vector e
    let mut nonce: u8 = 0;
    let mut skpv = PolyVec::<K>::zero();
    for i in 0..K {
        skpv.polys[i] = Poly::getnoise_eta(P::ETA1, &noise_seed, nonce);
        nonce += 1;
    }
    let mut e = PolyVec::<K>::zero();
    for i in 0..K {
        e.polys[i] = Poly::getnoise_eta(P::ETA1, &noise_seed, nonce);
        nonce += 1;
    }

    skpv.ntt();
    skpv.reduce();
    e.ntt();

    // t = A · s + e  (in NTT domain)
    let mut pkpv = PolyVec::<K>::zero();
    for i in 0..K {
        PolyVec::basemul_acc_montgomery(&mut pkpv.polys[i], &a[i], &skpv);
        pkpv.polys[i].tomont();
    }
    pkpv.add_assign(&e);
    pkpv.reduce();

    // Pack: pk = (Encode₁₂(t) ‖ ρ),  sk = Encode₁₂(s)
    pkpv.tobytes(&mut pk_bytes[..P::POLYVEC_BYTES]);
    pk_bytes[P::POLYVEC_BYTES..P::INDCPA_PK_BYTES].copy_from_slice(&public_seed);
    skpv.tobytes(&mut sk_bytes[..P::INDCPA_SK_BYTES]);
}

/// Deterministic IND-CPA encryption of message `m` under `pk_bytes` with
/// randomness `coins`.
pub(crate) fn indcpa_enc<P: MlKemParams>(
    ct_bytes: &mut [u8],
    m: &[u8; SYMBYTES],
    pk_bytes: &[u8],
    coins: &[u8; SYMBYTES],
) {
    match P::K {
        2 => indcpa_enc_inner::<P, 2>(ct_bytes, m, pk_bytes, coins),
        3 => indcpa_enc_inner::<P, 3>(ct_bytes, m, pk_bytes, coins),
        4 => indcpa_enc_inner::<P, 4>(ct_bytes, m, pk_bytes, coins),
        _ => unreachable!(),
    }
}

fn indcpa_enc_inner<P: MlKemParams, const K: usize>(
    ct_bytes: &mut [u8],
    m: &[u8; SYMBYTES],
    pk_bytes: &[u8],
    coins: &[u8; SYMBYTES],
) {
    let pkpv = PolyVec::<K>::frombytes(&pk_bytes[..P::POLYVEC_BYTES]);
    let seed: [u8; SYMBYTES] = pk_bytes[P::POLYVEC_BYTES..P::INDCPA_PK_BYTES]
        .try_into()
        .unwrap();

    let k = Poly::frommsg(m);

    // Sample Aᵀ (transposed for encryption)
    let mut at: [PolyVec<K>; K] = core::array::from_fn(|_| PolyVec::zero());
    gen_matrix::<K>(&mut at, &seed, true);

    // Sample r, e₁, e₂
    let mut nonce: u8 = 0;
    let mut sp = PolyVec::<K>::zero();
    for i in 0..K {
        sp.polys[i] = Poly::getnoise_eta(P::ETA1, coins, nonce);
        nonce += 1;
    }
    let mut ep = PolyVec::<K>::zero();
    for i in 0..K {
        ep.polys[i] = Poly::getnoise_eta(P::ETA2, coins, nonce);
        nonce += 1;
    }
    let epp = Poly::getnoise_eta(P::ETA2, coins, nonce);

    sp.ntt();

    // u = Aᵀ · r + e₁
    let mut b = PolyVec::<K>::zero();
    for i in 0..K {
        PolyVec::basemul_acc_montgomery(&mut b.polys[i], &at[i], &sp);
    }

    // v = tᵀ · r + e₂ + Decompress₁(m)
    let mut v = Poly::zero();
    PolyVec::basemul_acc_montgomery(&mut v, &pkpv, &sp);

    b.invntt_tomont();
    v.invntt_tomont();

    b.add_assign(&ep);
    v.add_assign(&epp);
    v.add_assign(&k);

    b.reduce();
    v.reduce();

    // Pack ciphertext: c = (Compress_{d_u}(u) ‖ Compress_{d_v}(v))
    b.compress(&mut ct_bytes[..P::POLYVEC_COMPRESSED_BYTES], P::D_U);
    v.compress(
        &mut ct_bytes[P::POLYVEC_COMPRESSED_BYTES..P::INDCPA_BYTES],
        P::D_V,
    );
}

/// IND-CPA decryption: recovers the message from ciphertext and secret key.
pub(crate) fn indcpa_dec<P: MlKemParams>(
    m: &mut [u8; SYMBYTES],
    ct_bytes: &[u8],
    sk_bytes: &[u8],
) {
    match P::K {
        2 => indcpa_dec_inner::<P, 2>(m, ct_bytes, sk_bytes),
        3 => indcpa_dec_inner::<P, 3>(m, ct_bytes, sk_bytes),
        4 => indcpa_dec_inner::<P, 4>(m, ct_bytes, sk_bytes),
        _ => unreachable!(),
    }
}

fn indcpa_dec_inner<P: MlKemParams, const K: usize>(
    m: &mut [u8; SYMBYTES],
    ct_bytes: &[u8],
    sk_bytes: &[u8],
) {
    let b = PolyVec::<K>::decompress(&ct_bytes[..P::POLYVEC_COMPRESSED_BYTES], P::D_U);
    let v = Poly::decompress(
        &ct_bytes[P::POLYVEC_COMPRESSED_BYTES..P::INDCPA_BYTES],
        P::D_V,
    );

    let skpv = PolyVec::<K>::frombytes(&sk_bytes[..P::INDCPA_SK_BYTES]);

    // m' = v − NTT⁻¹(sᵀ · NTT(u))
    let mut b_ntt = b;
    b_ntt.ntt();

    let mut mp = Poly::zero();
    PolyVec::basemul_acc_montgomery(&mut mp, &skpv, &b_ntt);
    mp.invntt_tomont();

    let inner = mp;
    mp.sub(&v, &inner);
    mp.reduce();

    *m = mp.tomsg();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mlkem::params::{MlKem1024, MlKem512, MlKem768};

    fn indcpa_roundtrip<P: MlKemParams>() {
        let seed = [42u8; SYMBYTES];
        let mut pk = vec![0u8; P::INDCPA_PK_BYTES];
        let mut sk = vec![0u8; P::INDCPA_SK_BYTES];
        indcpa_keypair_derand::<P>(&mut pk, &mut sk, &seed);

        let msg = [0xAB; SYMBYTES];
        let coins = [7u8; SYMBYTES];
        let mut ct = vec![0u8; P::INDCPA_BYTES];
        indcpa_enc::<P>(&mut ct, &msg, &pk, &coins);

        let mut recovered = [0u8; SYMBYTES];
        indcpa_dec::<P>(&mut recovered, &ct, &sk);

        assert_eq!(msg, recovered, "IND-CPA roundtrip failed");
    }

    #[test]
    fn indcpa_roundtrip_512() {
        indcpa_roundtrip::<MlKem512>();
    }
    #[test]
    fn indcpa_roundtrip_768() {
        indcpa_roundtrip::<MlKem768>();
    }
    #[test]
    fn indcpa_roundtrip_1024() {
        indcpa_roundtrip::<MlKem1024>();
    }

    #[test]
    fn matrix_transpose_consistency() {
        let seed = [9u8; SYMBYTES];
        let mut a: [PolyVec<2>; 2] = core::array::from_fn(|_| PolyVec::zero());
        let mut at: [PolyVec<2>; 2] = core::array::from_fn(|_| PolyVec::zero());
        gen_matrix::<2>(&mut a, &seed, false);
        gen_matrix::<2>(&mut at, &seed, true);
        for i in 0..2 {
            for j in 0..2 {
                assert_eq!(
                    a[i].polys[j].coeffs, at[j].polys[i].coeffs,
                    "A[{i}][{j}] != At[{j}][{i}]"
                );
            }
        }
    }
}
