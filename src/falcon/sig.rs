//! Falcon key generation, signing, and verification.
//!
//! Signing samples a short lattice preimage of the message digest with the
//! fast Fourier sampler; verification is float-free, rebuilding s1 from
//! the public polynomial and checking the squared norm bound.

use rand_core::CryptoRng;
use sha3::digest::XofReader;
use zeroize::Zeroize;

use super::encoding;
use super::ffsampling::ff_sampling;
use super::fft::{self, Cplx};
use super::ldl;
use super::ntrugen;
use super::params::{FalconParams, Q, SALT_LEN};
use super::types::{PublicKey, SecretKey, Signature};
use super::zq;
use crate::hash;
use crate::params::ByteArray;
use crate::Error;

/// Fresh salts tried before signing gives up.
const MAX_SALT_ATTEMPTS: usize = 16;
/// Preimage samples per salt.
const MAX_SAMPLE_ATTEMPTS: usize = 64;

/// Hash a salted message to a point of Zq[X]/(Xⁿ + 1): squeeze SHAKE-256
/// two bytes at a time, rejecting values that would bias the residue.
fn hash_to_point(salt: &[u8], msg: &[u8], n: usize) -> Vec<u32> {
    let mut reader = hash::shake256(&[salt, msg]);
    let mut out = Vec::with_capacity(n);
    let mut buf = [0u8; 2];
    while out.len() < n {
        reader.read(&mut buf);
        let t = ((buf[0] as u32) << 8) | buf[1] as u32;
        // Largest multiple of q below 2¹⁶.
        if t < 5 * Q {
            out.push(t % Q);
        }
    }
    out
}

/// Generate a Falcon key pair.
pub fn keypair<P: FalconParams>(
    rng: &mut impl CryptoRng,
) -> Result<(PublicKey<P>, SecretKey<P>), Error> {
    let fg_limit = (1 << (P::FG_BITS - 1)) - 1;
    let (f, g, big_f, _big_g) = ntrugen::ntru_gen(P::LOGN, fg_limit, rng)?;

    // h = g / f mod q
    let f_q: Vec<u32> = f.iter().map(|&c| zq::from_signed(c as i32)).collect();
    let f_inv = zq::poly_inv_ntt(&f_q).ok_or(Error::Sampling)?;
    let mut h: Vec<u32> = g.iter().map(|&c| zq::from_signed(c as i32)).collect();
    zq::ntt(&mut h);
    for (x, y) in h.iter_mut().zip(f_inv.iter()) {
        *x = zq::mul(*x, *y);
    }
    zq::invntt(&mut h);

    let mut pk_arr = P::PkArray::zeroed();
    {
        let pk = pk_arr.as_mut();
        pk[0] = P::LOGN as u8;
        encoding::modq_encode(&mut pk[1..], &h);
    }

    let fg_bytes = P::FG_BITS * P::N / 8;
    let mut sk_arr = P::SkArray::zeroed();
    {
        let sk = sk_arr.as_mut();
        sk[0] = 0x50 + P::LOGN as u8;
        encoding::trim_encode(&mut sk[1..1 + fg_bytes], &f, P::FG_BITS);
        encoding::trim_encode(&mut sk[1 + fg_bytes..1 + 2 * fg_bytes], &g, P::FG_BITS);
        encoding::trim_encode(&mut sk[1 + 2 * fg_bytes..], &big_f, 8);
    }

    Ok((PublicKey::from_bytes(pk_arr), SecretKey::from_bytes(sk_arr)))
}

/// Decoded secret basis polynomials, wiped on drop.
struct SecretBasis {
    f: Vec<i16>,
    g: Vec<i16>,
    big_f: Vec<i16>,
    big_g: Vec<i16>,
}

impl Drop for SecretBasis {
    fn drop(&mut self) {
        self.f.zeroize();
        self.g.zeroize();
        self.big_f.zeroize();
        self.big_g.zeroize();
    }
}

/// Decode the secret key and complete the basis: G ≡ gF/f (mod q), whose
/// true coefficients are small enough that the centered residue is exact.
fn decode_sk<P: FalconParams>(sk: &SecretKey<P>) -> Result<SecretBasis, Error> {
    let bytes = sk.as_bytes();
    if bytes[0] != 0x50 + P::LOGN as u8 {
        return Err(Error::InvalidKey);
    }
    let fg_bytes = P::FG_BITS * P::N / 8;
    let f = encoding::trim_decode(&bytes[1..1 + fg_bytes], P::N, P::FG_BITS)
        .ok_or(Error::InvalidKey)?;
    let g = encoding::trim_decode(&bytes[1 + fg_bytes..1 + 2 * fg_bytes], P::N, P::FG_BITS)
        .ok_or(Error::InvalidKey)?;
    let big_f = encoding::trim_decode(&bytes[1 + 2 * fg_bytes..], P::N, 8)
        .ok_or(Error::InvalidKey)?;

    let f_q: Vec<u32> = f.iter().map(|&c| zq::from_signed(c as i32)).collect();
    let f_inv = zq::poly_inv_ntt(&f_q).ok_or(Error::InvalidKey)?;
    let mut big_g_q: Vec<u32> = g.iter().map(|&c| zq::from_signed(c as i32)).collect();
    zq::ntt(&mut big_g_q);
    let mut ff_q: Vec<u32> = big_f.iter().map(|&c| zq::from_signed(c as i32)).collect();
    zq::ntt(&mut ff_q);
    for i in 0..P::N {
        big_g_q[i] = zq::mul(zq::mul(big_g_q[i], ff_q[i]), f_inv[i]);
    }
    zq::invntt(&mut big_g_q);
    let big_g: Vec<i16> = big_g_q.iter().map(|&c| zq::center(c) as i16).collect();

    Ok(SecretBasis { f, g, big_f, big_g })
}

/// Sign a message. Fresh randomness drives both the salt and the Gaussian
/// sampler, so signatures over the same message differ.
pub fn sign<P: FalconParams>(
    sk: &SecretKey<P>,
    msg: &[u8],
    rng: &mut impl CryptoRng,
) -> Result<Signature<P>, Error> {
    let basis = decode_sk::<P>(sk)?;

    // Basis B = [[g, −f], [G, −F]] and its Gram matrix, in Fourier form.
    let b00 = fft::fft_i16(&basis.g);
    let b01 = fft::neg(&fft::fft_i16(&basis.f));
    let b10 = fft::fft_i16(&basis.big_g);
    let b11 = fft::neg(&fft::fft_i16(&basis.big_f));

    let g00 = fft::add(
        &fft::mul(&b00, &fft::adj(&b00)),
        &fft::mul(&b01, &fft::adj(&b01)),
    );
    let g01 = fft::add(
        &fft::mul(&b00, &fft::adj(&b10)),
        &fft::mul(&b01, &fft::adj(&b11)),
    );
    let g11 = fft::add(
        &fft::mul(&b10, &fft::adj(&b10)),
        &fft::mul(&b11, &fft::adj(&b11)),
    );
    let mut tree = ldl::ffldl(&g00, &g01, &g11);
    ldl::normalize(&mut tree, P::SIGMA);

    let inv_q = 1.0 / Q as f64;
    for _ in 0..MAX_SALT_ATTEMPTS {
        let mut salt = [0u8; SALT_LEN];
        rng.fill_bytes(&mut salt);
        let c = hash_to_point(&salt, msg, P::N);
        let c_fft = fft::fft(&c.iter().map(|&x| x as f64).collect::<Vec<_>>());

        // Target (t0, t1) = (c, 0) · B⁻¹, using det B = q.
        let t0: Vec<Cplx> = fft::mul(&c_fft, &b11)
            .iter()
            .map(|x| x.scale(inv_q))
            .collect();
        let t1: Vec<Cplx> = fft::neg(&fft::mul(&c_fft, &b01))
            .iter()
            .map(|x| x.scale(inv_q))
            .collect();

        for _ in 0..MAX_SAMPLE_ATTEMPTS {
            let (z0, z1) = ff_sampling(&t0, &t1, &tree, P::SIGMA_MIN, rng)?;

            let d0 = fft::sub(&t0, &z0);
            let d1 = fft::sub(&t1, &z1);
            let s0_fft = fft::add(&fft::mul(&d0, &b00), &fft::mul(&d1, &b10));
            let s1_fft = fft::add(&fft::mul(&d0, &b01), &fft::mul(&d1, &b11));
            let s0: Vec<i64> = fft::ifft(&s0_fft).iter().map(|&x| x.round() as i64).collect();
            let s1: Vec<i64> = fft::ifft(&s1_fft).iter().map(|&x| x.round() as i64).collect();

            let norm: i64 = s0.iter().chain(s1.iter()).map(|&x| x * x).sum();
            if norm > P::SIG_BOUND {
                continue;
            }

            let s1_small: Vec<i16> = s1.iter().map(|&x| x as i16).collect();
            let mut sig_arr = P::SigArray::zeroed();
            {
                let sig = sig_arr.as_mut();
                sig[0] = 0x30 + P::LOGN as u8;
                sig[1..1 + SALT_LEN].copy_from_slice(&salt);
                if !encoding::comp_encode(&mut sig[1 + SALT_LEN..], &s1_small) {
                    continue;
                }
            }
            return Ok(Signature::from_bytes(sig_arr));
        }
    }
    Err(Error::Sampling)
}

/// Verify a signature. Any decode failure or norm violation yields false.
pub fn verify<P: FalconParams>(pk: &PublicKey<P>, msg: &[u8], sig: &Signature<P>) -> bool {
    let pk_bytes = pk.as_bytes();
    let sig_bytes = sig.as_bytes();
    if pk_bytes[0] != P::LOGN as u8 || sig_bytes[0] != 0x30 + P::LOGN as u8 {
        return false;
    }
    let h = match encoding::modq_decode(&pk_bytes[1..], P::N) {
        Some(h) => h,
        None => return false,
    };
    let salt = &sig_bytes[1..1 + SALT_LEN];
    let s2 = match encoding::comp_decode(&sig_bytes[1 + SALT_LEN..], P::N) {
        Some(s) => s,
        None => return false,
    };

    // s1 = c − s2·h mod q, centered; accept iff ‖(s1, s2)‖² is short.
    let c = hash_to_point(salt, msg, P::N);
    let s2_q: Vec<u32> = s2.iter().map(|&x| zq::from_signed(x as i32)).collect();
    let s2h = zq::poly_mul(&s2_q, &h);
    let norm: i64 = c
        .iter()
        .zip(s2h.iter())
        .map(|(&ci, &pi)| {
            let s1 = zq::center(zq::sub(ci, pi)) as i64;
            s1 * s1
        })
        .chain(s2.iter().map(|&x| (x as i64) * (x as i64)))
        .sum();
    norm <= P::SIG_BOUND
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::falcon::params::Falcon512;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn hash_to_point_in_range_and_deterministic() {
        let a = hash_to_point(b"salt", b"msg", 512);
        let b = hash_to_point(b"salt", b"msg", 512);
        assert_eq!(a, b);
        assert!(a.iter().all(|&c| c < Q));
        assert_ne!(a, hash_to_point(b"tlas", b"msg", 512));
    }

    #[test]
    fn keypair_succeeds_across_seeds() {
        for seed in 0..5 {
            let mut rng = StdRng::seed_from_u64(seed);
            assert!(
                keypair::<Falcon512>(&mut rng).is_ok(),
                "keygen failed for seed {seed}"
            );
        }
    }

    #[test]
    fn sign_verify_roundtrip_512() {
        let mut rng = StdRng::seed_from_u64(0xFA1C0);
        let (pk, sk) = keypair::<Falcon512>(&mut rng).expect("keygen failed");

        let msg = b"falcon flies";
        let sig = sign::<Falcon512>(&sk, msg, &mut rng).expect("signing failed");
        assert_eq!(sig.as_bytes().len(), Falcon512::SIG_BYTES);
        assert!(verify::<Falcon512>(&pk, msg, &sig));
        assert!(!verify::<Falcon512>(&pk, b"falcon walks", &sig));
    }

    #[test]
    fn corrupted_signature_rejected() {
        let mut rng = StdRng::seed_from_u64(3);
        let (pk, sk) = keypair::<Falcon512>(&mut rng).expect("keygen failed");
        let sig = sign::<Falcon512>(&sk, b"m", &mut rng).expect("signing failed");

        let mut bad = sig.as_bytes().to_vec();
        bad[1] ^= 1; // flip a salt bit
        let bad_sig = Signature::<Falcon512>::from_slice(&bad).unwrap();
        assert!(!verify::<Falcon512>(&pk, b"m", &bad_sig));
    }

    #[test]
    fn signature_under_wrong_key_rejected() {
        let mut rng = StdRng::seed_from_u64(4);
        let (_, sk) = keypair::<Falcon512>(&mut rng).expect("keygen failed");
        let (other_pk, _) = keypair::<Falcon512>(&mut rng).expect("keygen failed");
        let sig = sign::<Falcon512>(&sk, b"m", &mut rng).expect("signing failed");
        assert!(!verify::<Falcon512>(&other_pk, b"m", &sig));
    }
}
