//! Number-theoretic transform and base multiplication in `Z_q[X]/(X² − ζ)`.
//!
//! - [`ntt`]: forward NTT, standard order in, bit-reversed order out.
//! - [`invntt`]: inverse NTT with Montgomery scaling.
//! - [`basemul`]: degree-1 multiplication in the NTT domain.

use super::params::N;
use super::reduce::{barrett_reduce, fqmul};

/// Twiddle factors in Montgomery form, from the primitive 512th root ζ = 17,
/// bit-reversed indexing.
pub static ZETAS: [i16; 128] = [
    -1044, -758, -359, -1517, 1493, 1422, 287, 202, -171, 622, 1577, 182, 962, -1202, -1474,
    1468, 573, -1325, 264, 383, -829, 1458, -1602, -130, -681, 1017, 732, 608, -1542, 411, -205,
    -1571, 1223, 652, -552, 1015, -1293, 1491, -282, -1544, 516, -8, -320, -666, -1618, -1162,
    126, 1469, -853, -90, -271, 830, 107, -1421, -247, -951, -398, 961, -1508, -725, 448, -1065,
    677, -1275, -1103, 430, 555, 843, -1251, 871, 1550, 105, 422, 587, 177, -235, -291, -460,
    1574, 1653, -246, 778, 1159, -147, -777, 1483, -602, 1119, -1590, 644, -872, 349, 418, 329,
    -156, -75, 817, 1097, 603, 610, 1322, -1285, -1465, 384, -1215, -136, 1218, -1335, -874, 220,
    -1187, -1659, -1185, -1530, -1278, 794, -1510, -854, -870, 478, -108, -308, 996, 991, 958,
    -1460, 1522, 1628,
];

/// Cooley-Tukey butterfly over a lo/hi coefficient pair.
#[inline]
fn butterfly_fwd(lo: &mut [i16], hi: &mut [i16], zeta: i16) {
    for (a, b) in lo.iter_mut().zip(hi.iter_mut()) {
        let t = fqmul(zeta, *b);
        *b = *a - t;
        *a += t;
    }
}

/// Gentleman-Sande butterfly over a lo/hi coefficient pair.
#[inline]
fn butterfly_inv(lo: &mut [i16], hi: &mut [i16], zeta: i16) {
    for (a, b) in lo.iter_mut().zip(hi.iter_mut()) {
        let t = *a;
        *a = barrett_reduce(t + *b);
        *b = fqmul(zeta, *b - t);
    }
}

/// Forward NTT (in-place). Standard order in, bit-reversed order out.
pub fn ntt(r: &mut [i16; N]) {
    let mut k: usize = 1;
    let mut len = 128;
    while len >= 2 {
        let mut start = 0;
        while start < N {
            let zeta = ZETAS[k];
            k += 1;
            let (lo, hi) = r[start..start + 2 * len].split_at_mut(len);
            butterfly_fwd(lo, hi, zeta);
            start += 2 * len;
        }
        len >>= 1;
    }
}

/// Inverse NTT (in-place). Bit-reversed in, standard order out, each
/// coefficient scaled by the Montgomery factor `R = 2¹⁶`.
pub fn invntt(r: &mut [i16; N]) {
    const F: i16 = 1441; // mont² · 128⁻¹ mod q
    let mut k: usize = 127;
    let mut len = 2;
    while len <= 128 {
        let mut start = 0;
        while start < N {
            let zeta = ZETAS[k];
            k = k.wrapping_sub(1);
            let (lo, hi) = r[start..start + 2 * len].split_at_mut(len);
            butterfly_inv(lo, hi, zeta);
            start += 2 * len;
        }
        len <<= 1;
    }
    for c in r.iter_mut() {
        *c = fqmul(*c, F);
    }
}

/// Base multiply two degree-1 polys in `Z_q[X]/(X² − ζ)`:
/// `r = a · b mod (X² − ζ)`.
#[inline]
pub fn basemul(r: &mut [i16; 2], a: &[i16; 2], b: &[i16; 2], zeta: i16) {
    r[0] = fqmul(a[1], b[1]);
    r[0] = fqmul(r[0], zeta);
    r[0] += fqmul(a[0], b[0]);
    r[1] = fqmul(a[0], b[1]);
    r[1] += fqmul(a[1], b[0]);
}
