//! Arithmetic in Zq[X]/(Xⁿ + 1) for q = 12289.
//!
//! Falcon's modulus satisfies 2n | q − 1 for every supported degree, so the
//! negacyclic NTT exists for all of them. Root powers are derived at run
//! time from a generator of Zq*; with q − 1 = 2¹² · 3 the generator test
//! needs only two exponentiations.

use super::params::Q;

#[inline]
pub fn add(a: u32, b: u32) -> u32 {
    let s = a + b;
    if s >= Q {
        s - Q
    } else {
        s
    }
}

#[inline]
pub fn sub(a: u32, b: u32) -> u32 {
    if a >= b {
        a - b
    } else {
        a + Q - b
    }
}

#[inline]
pub fn mul(a: u32, b: u32) -> u32 {
    ((a as u64 * b as u64) % Q as u64) as u32
}

pub fn pow(mut base: u32, mut exp: u32) -> u32 {
    let mut acc = 1u32;
    while exp > 0 {
        if exp & 1 == 1 {
            acc = mul(acc, base);
        }
        base = mul(base, base);
        exp >>= 1;
    }
    acc
}

/// Multiplicative inverse of a nonzero element (Fermat).
#[inline]
pub fn inv(a: u32) -> u32 {
    pow(a, Q - 2)
}

/// Canonical representative of a signed value.
#[inline]
pub fn from_signed(a: i32) -> u32 {
    a.rem_euclid(Q as i32) as u32
}

/// Centered representative in (−q/2, q/2].
#[inline]
pub fn center(a: u32) -> i32 {
    let a = a as i32;
    if a > (Q as i32 - 1) / 2 {
        a - Q as i32
    } else {
        a
    }
}

/// A primitive 2n-th root of unity modulo q.
fn primitive_root(two_n: u32) -> u32 {
    // Smallest g generating Zq*: g^((q-1)/2) ≠ 1 and g^((q-1)/3) ≠ 1.
    let mut g = 2;
    while pow(g, (Q - 1) / 2) == 1 || pow(g, (Q - 1) / 3) == 1 {
        g += 1;
    }
    pow(g, (Q - 1) / two_n)
}

fn bitrev(mut k: usize, bits: u32) -> usize {
    let mut r = 0;
    for _ in 0..bits {
        r = (r << 1) | (k & 1);
        k >>= 1;
    }
    r
}

/// Powers ψ^bitrev(k) of the 2n-th root, as consumed by the butterflies.
fn zeta_table(n: usize) -> Vec<u32> {
    let logn = n.trailing_zeros();
    let psi = primitive_root(2 * n as u32);
    let mut pows = vec![0u32; n];
    let mut p = 1;
    for pw in pows.iter_mut() {
        *pw = p;
        p = mul(p, psi);
    }
    (0..n).map(|k| pows[bitrev(k, logn)]).collect()
}

/// Forward negacyclic NTT, in place. `a.len()` must be a power of two.
pub fn ntt(a: &mut [u32]) {
    let n = a.len();
    let zetas = zeta_table(n);
    let mut k = 1;
    let mut len = n / 2;
    while len >= 1 {
        let mut start = 0;
        while start < n {
            let zeta = zetas[k];
            k += 1;
            for j in start..start + len {
                let t = mul(zeta, a[j + len]);
                a[j + len] = sub(a[j], t);
                a[j] = add(a[j], t);
            }
            start += 2 * len;
        }
        len /= 2;
    }
}

/// Inverse negacyclic NTT, in place, including the 1/n scaling.
pub fn invntt(a: &mut [u32]) {
    let n = a.len();
    let zetas = zeta_table(n);
    let mut k = n - 1;
    let mut len = 1;
    while len < n {
        let mut start = 0;
        while start < n {
            let zeta = sub(0, zetas[k]);
            k -= 1;
            for j in start..start + len {
                let t = a[j];
                a[j] = add(t, a[j + len]);
                a[j + len] = mul(zeta, sub(t, a[j + len]));
            }
            start += 2 * len;
        }
        len *= 2;
    }
    let ninv = inv(n as u32);
    for c in a.iter_mut() {
        *c = mul(*c, ninv);
    }
}

/// Product of two polynomials mod (Xⁿ + 1, q), both in coefficient form.
pub fn poly_mul(a: &[u32], b: &[u32]) -> Vec<u32> {
    let mut fa = a.to_vec();
    let mut fb = b.to_vec();
    ntt(&mut fa);
    ntt(&mut fb);
    for (x, y) in fa.iter_mut().zip(fb.iter()) {
        *x = mul(*x, *y);
    }
    invntt(&mut fa);
    fa
}

/// NTT-domain inverse of a polynomial; `None` if not invertible.
pub fn poly_inv_ntt(a: &[u32]) -> Option<Vec<u32>> {
    let mut fa = a.to_vec();
    ntt(&mut fa);
    if fa.iter().any(|&c| c == 0) {
        return None;
    }
    for c in fa.iter_mut() {
        *c = inv(*c);
    }
    Some(fa)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_has_exact_order() {
        for n in [512u32, 1024] {
            let psi = primitive_root(2 * n);
            assert_eq!(pow(psi, n), Q - 1, "ψ^n must be −1");
            assert_eq!(pow(psi, 2 * n), 1);
        }
    }

    #[test]
    fn ntt_roundtrip() {
        let mut a: Vec<u32> = (0..512u32).map(|i| (i * 7 + 3) % Q).collect();
        let orig = a.clone();
        ntt(&mut a);
        invntt(&mut a);
        assert_eq!(a, orig);
    }

    #[test]
    fn poly_mul_matches_schoolbook() {
        let n = 16;
        let a: Vec<u32> = (0..n as u32).map(|i| (i * 31 + 1) % Q).collect();
        let b: Vec<u32> = (0..n as u32).map(|i| (i * 17 + 5) % Q).collect();

        let mut naive = vec![0i64; n];
        for i in 0..n {
            for j in 0..n {
                let k = (i + j) % n;
                let sign = if i + j >= n { -1i64 } else { 1 };
                naive[k] += sign * a[i] as i64 * b[j] as i64;
            }
        }
        let naive: Vec<u32> = naive
            .iter()
            .map(|&c| c.rem_euclid(Q as i64) as u32)
            .collect();

        assert_eq!(poly_mul(&a, &b), naive);
    }

    #[test]
    fn inverse_multiplies_to_one() {
        let n = 32;
        let a: Vec<u32> = (0..n as u32).map(|i| (i * i + 7) % Q).collect();
        let a_inv_ntt = poly_inv_ntt(&a).expect("invertible");
        let mut fa = a.clone();
        ntt(&mut fa);
        let prod: Vec<u32> = fa
            .iter()
            .zip(a_inv_ntt.iter())
            .map(|(&x, &y)| mul(x, y))
            .collect();
        let mut prod = prod;
        invntt(&mut prod);
        assert_eq!(prod[0], 1);
        assert!(prod[1..].iter().all(|&c| c == 0));
    }
}
