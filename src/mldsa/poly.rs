//! Polynomial and polynomial-vector types for ML-DSA.
//!
//! Coefficients are `i32`: canonical in [0, q) after modular operations,
//! small signed values for sampled secrets, masks, and decoded signature
//! components.

use super::ntt;
use super::params::N;
use super::reduce::{center, reduce64};

/// Polynomial in Rq = Zq[X]/(Xⁿ + 1), N = 256, q = 8380417.
#[derive(Clone, Copy)]
pub struct Poly {
    pub(crate) coeffs: [i32; N],
}

impl Poly {
    /// The zero polynomial.
    #[inline]
    pub const fn zero() -> Self {
        Poly { coeffs: [0i32; N] }
    }

    /// Coefficient-wise addition modulo q: `self = a + b`.
    pub fn add(&mut self, a: &Poly, b: &Poly) {
        for i in 0..N {
            self.coeffs[i] = reduce64(a.coeffs[i] as i64 + b.coeffs[i] as i64);
        }
    }

    /// Coefficient-wise subtraction modulo q: `self = a − b`.
    pub fn sub(&mut self, a: &Poly, b: &Poly) {
        for i in 0..N {
            self.coeffs[i] = reduce64(a.coeffs[i] as i64 - b.coeffs[i] as i64);
        }
    }

    /// Coefficient-wise negation modulo q.
    pub fn negate(&mut self) {
        for c in self.coeffs.iter_mut() {
            *c = reduce64(-(*c as i64));
        }
    }

    /// Forward NTT (in-place).
    #[inline]
    pub fn ntt(&mut self) {
        ntt::ntt(&mut self.coeffs);
    }

    /// Inverse NTT (in-place).
    #[inline]
    pub fn invntt(&mut self) {
        ntt::invntt(&mut self.coeffs);
    }

    /// NTT-domain product: `self = a · b`.
    #[inline]
    pub fn pointwise(&mut self, a: &Poly, b: &Poly) {
        ntt::pointwise(&mut self.coeffs, &a.coeffs, &b.coeffs);
    }

    /// Replace each coefficient with its centered representative.
    pub fn center(&mut self) {
        for c in self.coeffs.iter_mut() {
            *c = center(*c);
        }
    }

    /// True if any centered coefficient has absolute value ≥ `bound`.
    pub fn norm_exceeds(&self, bound: i32) -> bool {
        self.coeffs.iter().any(|&c| center(c).abs() >= bound)
    }
}

impl Default for Poly {
    #[inline]
    fn default() -> Self {
        Poly::zero()
    }
}

impl core::fmt::Debug for Poly {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Poly")
            .field("coeffs[..4]", &&self.coeffs[..4])
            .finish_non_exhaustive()
    }
}

/// A vector of `X` polynomials (the k- and l-length vectors of ML-DSA).
#[derive(Clone)]
pub struct PolyVec<const X: usize> {
    pub(crate) polys: [Poly; X],
}

impl<const X: usize> PolyVec<X> {
    /// Zero-initialised vector.
    #[inline]
    pub fn zero() -> Self {
        PolyVec {
            polys: [Poly::zero(); X],
        }
    }

    /// Forward NTT on every polynomial.
    pub fn ntt(&mut self) {
        for p in self.polys.iter_mut() {
            p.ntt();
        }
    }

    /// Inverse NTT on every polynomial.
    pub fn invntt(&mut self) {
        for p in self.polys.iter_mut() {
            p.invntt();
        }
    }

    /// Pointwise add: `self = a + b`.
    pub fn add(&mut self, a: &PolyVec<X>, b: &PolyVec<X>) {
        for i in 0..X {
            self.polys[i].add(&a.polys[i], &b.polys[i]);
        }
    }

    /// Pointwise subtract: `self = a − b`.
    pub fn sub(&mut self, a: &PolyVec<X>, b: &PolyVec<X>) {
        for i in 0..X {
            self.polys[i].sub(&a.polys[i], &b.polys[i]);
        }
    }

    /// Multiply every polynomial by a single NTT-domain polynomial `c`.
    pub fn pointwise_poly(&mut self, c: &Poly, v: &PolyVec<X>) {
        for i in 0..X {
            self.polys[i].pointwise(c, &v.polys[i]);
        }
    }

    /// Center every coefficient.
    pub fn center(&mut self) {
        for p in self.polys.iter_mut() {
            p.center();
        }
    }

    /// True if any centered coefficient in the vector reaches `bound`.
    pub fn norm_exceeds(&self, bound: i32) -> bool {
        self.polys.iter().any(|p| p.norm_exceeds(bound))
    }
}

impl<const X: usize> Default for PolyVec<X> {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mldsa::params::Q;

    #[test]
    fn add_sub_inverse_mod_q() {
        let mut a = Poly::zero();
        let mut b = Poly::zero();
        for i in 0..N {
            a.coeffs[i] = (i as i32 * 32_771) % Q;
            b.coeffs[i] = (i as i32 * 65_537) % Q;
        }
        let mut sum = Poly::zero();
        sum.add(&a, &b);
        let mut back = Poly::zero();
        back.sub(&sum, &b);
        assert_eq!(a.coeffs, back.coeffs);
    }

    #[test]
    fn norm_exceeds_uses_centered_values() {
        let mut p = Poly::zero();
        p.coeffs[0] = Q - 1; // centered: −1
        assert!(!p.norm_exceeds(2));
        assert!(p.norm_exceeds(1));
    }

    #[test]
    fn negate_is_additive_inverse() {
        let mut p = Poly::zero();
        p.coeffs[0] = 12345;
        p.coeffs[255] = Q - 7;
        let mut n = p;
        n.negate();
        let mut sum = Poly::zero();
        sum.add(&p, &n);
        assert!(sum.coeffs.iter().all(|&c| c == 0));
    }
}
