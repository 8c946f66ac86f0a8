//! NTRU lattice generation: sample (f, g), solve the NTRU equation
//! fG − gF = q over Z[X]/(Xⁿ + 1), and Babai-reduce (F, G).
//!
//! The solver recurses through the field-norm tower down to integers,
//! where the equation is an extended gcd. Intermediate coefficients grow
//! into the thousands of bits, hence the `num_bigint` arithmetic.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, ToPrimitive, Zero};
use rand_core::CryptoRng;

use super::fft::{self, Cplx};
use super::params::Q;
use super::samplerz::sampler_z;
use super::zq;
use crate::Error;

/// Deviation of the 4096-sample base Gaussian; folded sums of 4096/n of
/// them give coefficients of deviation 1.17·√(q/2n).
const GEN_SIGMA: f64 = 1.433_009_805_287_73;

/// Attempts at drawing a usable (f, g) before keygen reports failure.
/// Roughly one draw in nine survives the Gram-Schmidt norm check, so the
/// whole-call failure probability is negligible.
const MAX_GEN_ATTEMPTS: usize = 256;

/// Sample one secret polynomial of degree n.
fn gen_poly(n: usize, rng: &mut impl CryptoRng) -> Result<Vec<i32>, Error> {
    let fold = 4096 / n;
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        let mut acc = 0i32;
        for _ in 0..fold {
            acc += sampler_z(0.0, GEN_SIGMA, GEN_SIGMA - 0.001, rng)?;
        }
        out.push(acc);
    }
    Ok(out)
}

/// Squared Gram-Schmidt norm of the NTRU basis built on (f, g).
fn gs_norm(f: &[i32], g: &[i32]) -> f64 {
    let n = f.len() as f64;
    let sq_fg: f64 = f
        .iter()
        .chain(g.iter())
        .map(|&c| (c as f64) * (c as f64))
        .sum();

    let ff = fft::fft(&f.iter().map(|&c| c as f64).collect::<Vec<_>>());
    let gg = fft::fft(&g.iter().map(|&c| c as f64).collect::<Vec<_>>());
    let denom = fft::add(
        &fft::mul(&ff, &fft::adj(&ff)),
        &fft::mul(&gg, &fft::adj(&gg)),
    );
    // ‖(qg̅/(ff̅+gg̅), qf̅/(ff̅+gg̅))‖² via Parseval.
    let sq_cap: f64 = ff
        .iter()
        .zip(gg.iter())
        .zip(denom.iter())
        .map(|((&a, &b), &d)| (Q as f64 * Q as f64) * (a.norm_sq() + b.norm_sq()) / d.norm_sq())
        .sum::<f64>()
        / n;

    sq_fg.max(sq_cap)
}

// --- big-integer polynomial helpers (ring Z[X]/(Xⁿ + 1)) ---

fn karatsuba(a: &[BigInt], b: &[BigInt]) -> Vec<BigInt> {
    let n = a.len();
    if n <= 4 {
        let mut out = vec![BigInt::zero(); 2 * n];
        for i in 0..n {
            for j in 0..n {
                out[i + j] += &a[i] * &b[j];
            }
        }
        return out;
    }
    let m = n / 2;
    let lo = karatsuba(&a[..m], &b[..m]);
    let hi = karatsuba(&a[m..], &b[m..]);
    let a_sum: Vec<BigInt> = (0..m).map(|i| &a[i] + &a[m + i]).collect();
    let b_sum: Vec<BigInt> = (0..m).map(|i| &b[i] + &b[m + i]).collect();
    let mut mid = karatsuba(&a_sum, &b_sum);
    for i in 0..2 * m {
        mid[i] -= &lo[i];
        mid[i] -= &hi[i];
    }

    let mut out = vec![BigInt::zero(); 2 * n];
    for i in 0..2 * m {
        out[i] += &lo[i];
        out[i + m] += &mid[i];
        out[i + 2 * m] += &hi[i];
    }
    out
}

/// Product in Z[X]/(Xⁿ + 1).
fn karamul(a: &[BigInt], b: &[BigInt]) -> Vec<BigInt> {
    let n = a.len();
    let ab = karatsuba(a, b);
    (0..n).map(|i| &ab[i] - &ab[i + n]).collect()
}

/// a(−X): negate odd-index coefficients.
fn galois_conjugate(a: &[BigInt]) -> Vec<BigInt> {
    a.iter()
        .enumerate()
        .map(|(i, c)| if i % 2 == 1 { -c } else { c.clone() })
        .collect()
}

/// Field norm down to Z[X]/(X^(n/2) + 1): N(a) = aₑ² − X·aₒ².
fn field_norm(a: &[BigInt]) -> Vec<BigInt> {
    let m = a.len() / 2;
    let even: Vec<BigInt> = a.iter().step_by(2).cloned().collect();
    let odd: Vec<BigInt> = a.iter().skip(1).step_by(2).cloned().collect();
    let e_sq = karamul(&even, &even);
    let o_sq = karamul(&odd, &odd);
    let mut out = Vec::with_capacity(m);
    out.push(&e_sq[0] + &o_sq[m - 1]); // X·(X^(m-1)) = −1 folded in
    for i in 1..m {
        out.push(&e_sq[i] - &o_sq[i - 1]);
    }
    out
}

/// Map a(X) to a(X²) in the double-size ring.
fn lift(a: &[BigInt]) -> Vec<BigInt> {
    let mut out = vec![BigInt::zero(); 2 * a.len()];
    for (i, c) in a.iter().enumerate() {
        out[2 * i] = c.clone();
    }
    out
}

/// Byte-granular bit size, as used by the reduction's float scaling.
fn bitsize(a: &BigInt) -> u64 {
    let mut val = a.abs();
    let mut res = 0;
    while !val.is_zero() {
        res += 8;
        val >>= 8;
    }
    res
}

fn max_bitsize(v: &[BigInt]) -> u64 {
    v.iter().map(bitsize).max().unwrap_or(0)
}

fn to_floats(v: &[BigInt], shift: u64) -> Vec<f64> {
    v.iter()
        .map(|c| (c >> shift).to_f64().unwrap_or(0.0))
        .collect()
}

/// Babai-reduce (F, G) against (f, g), in place.
fn reduce(
    f: &[BigInt],
    g: &[BigInt],
    big_f: &mut [BigInt],
    big_g: &mut [BigInt],
) -> Result<(), Error> {
    let size = 53.max(max_bitsize(f)).max(max_bitsize(g));
    let f_fft = fft::fft(&to_floats(f, size - 53));
    let g_fft = fft::fft(&to_floats(g, size - 53));
    let denom = fft::add(
        &fft::mul(&f_fft, &fft::adj(&f_fft)),
        &fft::mul(&g_fft, &fft::adj(&g_fft)),
    );

    // The gap at the top of the solve tower runs to thousands of bits, so
    // the round cap scales with it; the loop exits as soon as k is zero.
    let start = 53.max(max_bitsize(big_f)).max(max_bitsize(big_g));
    let rounds = (start.saturating_sub(size) + 64) as usize;

    for _ in 0..rounds {
        let cap_size = 53.max(max_bitsize(big_f)).max(max_bitsize(big_g));
        if cap_size < size {
            return Ok(());
        }
        let cap_f_fft = fft::fft(&to_floats(big_f, cap_size - 53));
        let cap_g_fft = fft::fft(&to_floats(big_g, cap_size - 53));
        let num = fft::add(
            &fft::mul(&cap_f_fft, &fft::adj(&f_fft)),
            &fft::mul(&cap_g_fft, &fft::adj(&g_fft)),
        );
        let k: Vec<BigInt> = fft::ifft(&fft::div(&num, &denom))
            .iter()
            .map(|&c| BigInt::from(c.round() as i64))
            .collect();
        if k.iter().all(|c| c.is_zero()) {
            return Ok(());
        }

        let fk = karamul(f, &k);
        let gk = karamul(g, &k);
        for i in 0..f.len() {
            big_f[i] -= &fk[i] << (cap_size - size);
            big_g[i] -= &gk[i] << (cap_size - size);
        }
    }
    Err(Error::Sampling)
}

/// Solve fG − gF = q in Z[X]/(Xⁿ + 1).
fn ntru_solve(f: &[BigInt], g: &[BigInt]) -> Result<(Vec<BigInt>, Vec<BigInt>), Error> {
    let n = f.len();
    if n == 1 {
        let r = f[0].extended_gcd(&g[0]);
        if r.gcd != BigInt::from(1) {
            return Err(Error::Sampling);
        }
        let q = BigInt::from(Q);
        return Ok((vec![-(&q * &r.y)], vec![&q * &r.x]));
    }

    let fp = field_norm(f);
    let gp = field_norm(g);
    let (cap_fp, cap_gp) = ntru_solve(&fp, &gp)?;
    let mut big_f = karamul(&lift(&cap_fp), &galois_conjugate(g));
    let mut big_g = karamul(&lift(&cap_gp), &galois_conjugate(f));
    reduce(f, g, &mut big_f, &mut big_g)?;
    Ok((big_f, big_g))
}

fn within(v: &[BigInt], limit: i32) -> bool {
    let limit = BigInt::from(limit);
    v.iter().all(|c| c.abs() <= limit)
}

/// Generate a complete NTRU secret basis (f, g, F, G) for degree 2^logn.
/// `fg_limit` bounds |f|, |g| so the key fits its fixed-width encoding.
pub fn ntru_gen(
    logn: usize,
    fg_limit: i32,
    rng: &mut impl CryptoRng,
) -> Result<(Vec<i16>, Vec<i16>, Vec<i16>, Vec<i16>), Error> {
    let n = 1 << logn;
    for _ in 0..MAX_GEN_ATTEMPTS {
        let f = gen_poly(n, rng)?;
        let g = gen_poly(n, rng)?;

        if f.iter().chain(g.iter()).any(|&c| c.abs() > fg_limit) {
            continue;
        }
        if gs_norm(&f, &g) > 1.17 * 1.17 * Q as f64 {
            continue;
        }
        // f must be invertible mod q for the public key h = g/f.
        let f_q: Vec<u32> = f.iter().map(|&c| zq::from_signed(c)).collect();
        if zq::poly_inv_ntt(&f_q).is_none() {
            continue;
        }

        let f_big: Vec<BigInt> = f.iter().map(|&c| BigInt::from(c)).collect();
        let g_big: Vec<BigInt> = g.iter().map(|&c| BigInt::from(c)).collect();
        let (big_f, big_g) = match ntru_solve(&f_big, &g_big) {
            Ok(pair) => pair,
            Err(_) => continue,
        };
        if !within(&big_f, 127) || !within(&big_g, 127) {
            continue;
        }

        let small = |v: &[BigInt]| -> Vec<i16> {
            v.iter().map(|c| c.to_i16().unwrap_or(0)).collect()
        };
        return Ok((
            f.iter().map(|&c| c as i16).collect(),
            g.iter().map(|&c| c as i16).collect(),
            small(&big_f),
            small(&big_g),
        ));
    }
    Err(Error::Sampling)
}
