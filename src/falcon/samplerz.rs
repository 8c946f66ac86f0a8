//! Discrete Gaussian sampling over the integers.
//!
//! The base sampler draws from a fixed half-Gaussian of standard deviation
//! σ_max = 1.8205 via a 72-bit reverse CDT, then rejection sampling with a
//! fixed-point Bernoulli-exp trial shifts it to an arbitrary center μ and
//! any σ ∈ [σ_min, σ_max].

use rand_core::CryptoRng;

use super::params::SIGMA_MAX;
use crate::Error;

/// Rejection rounds before the sampler reports failure.
const MAX_SAMPLE_ROUNDS: usize = 1024;

/// Reverse cumulative distribution table of the half-Gaussian, scaled to
/// 72 bits of precision.
const RCDT: [u128; 18] = [
    3024686241123004913666,
    1564742784480091954050,
    636254429462080897535,
    199560484645026482916,
    47667343854657281903,
    8595902006365044063,
    1163297957344668388,
    117656387352093658,
    8867391802663976,
    496969357462633,
    20680885154299,
    638331848991,
    14602316184,
    247426747,
    3104126,
    28824,
    198,
    1,
];

/// Polynomial coefficients of 2⁻⁶³-scaled exp(−x) on [0, ln 2].
const EXP_COEFFS: [u64; 13] = [
    0x00000004741183A3,
    0x00000036548CFC06,
    0x0000024FDCBF140A,
    0x0000171D939DE045,
    0x0000D00CF58F6F84,
    0x000680681CF796E3,
    0x002D82D8305B0FEA,
    0x011111110E066FD0,
    0x0555555555070F00,
    0x155555555581FF00,
    0x400000000002B400,
    0x7FFFFFFFFFFF4800,
    0x8000000000000000,
];

/// Draw z0 ≥ 0 from the half-Gaussian of deviation σ_max.
fn base_sampler(rng: &mut impl CryptoRng) -> i32 {
    let mut bytes = [0u8; 9];
    rng.fill_bytes(&mut bytes);
    let mut u: u128 = 0;
    for &b in bytes.iter() {
        u = (u << 8) | b as u128;
    }
    RCDT.iter().filter(|&&v| u < v).count() as i32
}

/// ccs · exp(−x) in 2⁻⁶³ fixed point, for x ∈ [0, ln 2), ccs ∈ (0, 1].
fn approx_exp(x: f64, ccs: f64) -> u64 {
    let mut y = EXP_COEFFS[0];
    let z = ((x * 9007199254740992.0 * 1024.0) as u64) << 1; // ⌊x·2⁶³⌋·2 = x·2⁶⁴
    for &c in EXP_COEFFS[1..].iter() {
        let w = (z as u128 * y as u128) >> 64;
        y = c.wrapping_sub(w as u64);
    }
    // ccs = 1 maps to 2⁶⁴, one past u64; saturate instead of wrapping to 0.
    let z = (((ccs * 9007199254740992.0 * 1024.0) as u128) << 1).min(u64::MAX as u128) as u64;
    ((z as u128 * y as u128) >> 64) as u64
}

/// Return true with probability ccs · exp(−x).
fn ber_exp(x: f64, ccs: f64, rng: &mut impl CryptoRng) -> bool {
    let s = (x / core::f64::consts::LN_2) as u64;
    let r = x - s as f64 * core::f64::consts::LN_2;
    let s = s.min(63);
    let z = (approx_exp(r, ccs).wrapping_shl(1)).wrapping_sub(1) >> s;

    // Lazy byte-by-byte comparison of a uniform value against z.
    let mut w = 0i32;
    let mut i = 64;
    while i > 0 {
        i -= 8;
        let mut byte = [0u8; 1];
        rng.fill_bytes(&mut byte);
        w = byte[0] as i32 - ((z >> i) & 0xFF) as i32;
        if w != 0 {
            break;
        }
    }
    w < 0
}

/// Sample from the discrete Gaussian over Z with center `mu` and standard
/// deviation `sigma`, where σ_min ≤ sigma ≤ σ_max.
pub fn sampler_z(
    mu: f64,
    sigma: f64,
    sigma_min: f64,
    rng: &mut impl CryptoRng,
) -> Result<i32, Error> {
    let s = mu.floor();
    let r = mu - s;
    let dss = 1.0 / (2.0 * sigma * sigma);
    let ccs = sigma_min / sigma;
    let inv_2smax_sq = 1.0 / (2.0 * SIGMA_MAX * SIGMA_MAX);

    for _ in 0..MAX_SAMPLE_ROUNDS {
        let z0 = base_sampler(rng);
        let mut byte = [0u8; 1];
        rng.fill_bytes(&mut byte);
        let b = (byte[0] & 1) as i32;
        let z = b + (2 * b - 1) * z0;

        let x = (z as f64 - r) * (z as f64 - r) * dss - (z0 * z0) as f64 * inv_2smax_sq;
        if ber_exp(x, ccs, rng) {
            return Ok(z + s as i32);
        }
    }
    Err(Error::Sampling)
}
