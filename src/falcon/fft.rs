//! Floating-point FFT over Q[X]/(Xⁿ + 1).
//!
//! Polynomials are evaluated at the primitive 2n-th roots of unity, kept as
//! full-length complex vectors. The root ordering is fixed by the recursion
//! itself: position 2k and 2k+1 hold a conjugate/negated pair whose square
//! is the root at position k of the half-size problem, with i and −i at the
//! bottom. `split`/`merge` use the same table, so the transform pair and
//! the Fourier-domain ring operations are consistent by construction.

use core::ops::{Add, Mul, Neg, Sub};

/// Complex number in rectangular form.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cplx {
    pub re: f64,
    pub im: f64,
}

impl Cplx {
    pub const ZERO: Cplx = Cplx { re: 0.0, im: 0.0 };

    #[inline]
    pub fn new(re: f64, im: f64) -> Self {
        Cplx { re, im }
    }

    #[inline]
    pub fn real(re: f64) -> Self {
        Cplx { re, im: 0.0 }
    }

    /// Complex conjugate.
    #[inline]
    pub fn conj(self) -> Self {
        Cplx {
            re: self.re,
            im: -self.im,
        }
    }

    #[inline]
    pub fn norm_sq(self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    #[inline]
    pub fn scale(self, s: f64) -> Self {
        Cplx {
            re: self.re * s,
            im: self.im * s,
        }
    }

    #[inline]
    pub fn div(self, rhs: Cplx) -> Self {
        let d = rhs.norm_sq();
        (self * rhs.conj()).scale(1.0 / d)
    }

    fn from_angle(theta: f64) -> Self {
        Cplx {
            re: theta.cos(),
            im: theta.sin(),
        }
    }
}

impl Add for Cplx {
    type Output = Cplx;
    #[inline]
    fn add(self, rhs: Cplx) -> Cplx {
        Cplx::new(self.re + rhs.re, self.im + rhs.im)
    }
}

impl Sub for Cplx {
    type Output = Cplx;
    #[inline]
    fn sub(self, rhs: Cplx) -> Cplx {
        Cplx::new(self.re - rhs.re, self.im - rhs.im)
    }
}

impl Mul for Cplx {
    type Output = Cplx;
    #[inline]
    fn mul(self, rhs: Cplx) -> Cplx {
        Cplx::new(
            self.re * rhs.re - self.im * rhs.im,
            self.re * rhs.im + self.im * rhs.re,
        )
    }
}

impl Neg for Cplx {
    type Output = Cplx;
    #[inline]
    fn neg(self) -> Cplx {
        Cplx::new(-self.re, -self.im)
    }
}

/// Angles of the evaluation points for degree `n`, in recursion order.
fn angles(n: usize) -> Vec<f64> {
    if n == 1 {
        return vec![core::f64::consts::PI];
    }
    let half = angles(n / 2);
    let mut out = vec![0.0; n];
    for (k, &a) in half.iter().enumerate() {
        out[2 * k] = a / 2.0;
        out[2 * k + 1] = a / 2.0 + core::f64::consts::PI;
    }
    out
}

/// Twiddles w[k] = root at position 2k of a size-`n` problem, as used by
/// both `merge` and `split`.
fn twiddles(n: usize) -> Vec<Cplx> {
    angles(n / 2)
        .iter()
        .map(|&a| Cplx::from_angle(a / 2.0))
        .collect()
}

/// Interleave two half-size Fourier vectors into a full one.
pub fn merge(f0: &[Cplx], f1: &[Cplx]) -> Vec<Cplx> {
    let n = 2 * f0.len();
    let w = twiddles(n);
    let mut out = vec![Cplx::ZERO; n];
    for i in 0..n / 2 {
        let t = w[i] * f1[i];
        out[2 * i] = f0[i] + t;
        out[2 * i + 1] = f0[i] - t;
    }
    out
}

/// Inverse of [`merge`]: recover the two half-size Fourier vectors.
pub fn split(f: &[Cplx]) -> (Vec<Cplx>, Vec<Cplx>) {
    let n = f.len();
    let w = twiddles(n);
    let mut f0 = vec![Cplx::ZERO; n / 2];
    let mut f1 = vec![Cplx::ZERO; n / 2];
    for i in 0..n / 2 {
        f0[i] = (f[2 * i] + f[2 * i + 1]).scale(0.5);
        f1[i] = ((f[2 * i] - f[2 * i + 1]) * w[i].conj()).scale(0.5);
    }
    (f0, f1)
}

/// Forward FFT of a real polynomial.
pub fn fft(f: &[f64]) -> Vec<Cplx> {
    let n = f.len();
    if n == 1 {
        return vec![Cplx::real(f[0])];
    }
    if n == 2 {
        let i_f1 = Cplx::new(0.0, f[1]);
        let f0 = Cplx::real(f[0]);
        return vec![f0 + i_f1, f0 - i_f1];
    }
    let even: Vec<f64> = f.iter().step_by(2).copied().collect();
    let odd: Vec<f64> = f.iter().skip(1).step_by(2).copied().collect();
    merge(&fft(&even), &fft(&odd))
}

/// Inverse FFT back to real coefficients.
pub fn ifft(f: &[Cplx]) -> Vec<f64> {
    let n = f.len();
    if n == 1 {
        return vec![f[0].re];
    }
    if n == 2 {
        return vec![f[0].re, f[0].im];
    }
    let (f0, f1) = split(f);
    let even = ifft(&f0);
    let odd = ifft(&f1);
    let mut out = vec![0.0; n];
    for i in 0..n / 2 {
        out[2 * i] = even[i];
        out[2 * i + 1] = odd[i];
    }
    out
}

pub fn fft_i16(f: &[i16]) -> Vec<Cplx> {
    let reals: Vec<f64> = f.iter().map(|&c| c as f64).collect();
    fft(&reals)
}

// Coefficient-wise ring operations in the Fourier domain.

pub fn add(a: &[Cplx], b: &[Cplx]) -> Vec<Cplx> {
    a.iter().zip(b.iter()).map(|(&x, &y)| x + y).collect()
}

pub fn sub(a: &[Cplx], b: &[Cplx]) -> Vec<Cplx> {
    a.iter().zip(b.iter()).map(|(&x, &y)| x - y).collect()
}

pub fn mul(a: &[Cplx], b: &[Cplx]) -> Vec<Cplx> {
    a.iter().zip(b.iter()).map(|(&x, &y)| x * y).collect()
}

pub fn div(a: &[Cplx], b: &[Cplx]) -> Vec<Cplx> {
    a.iter().zip(b.iter()).map(|(&x, &y)| x.div(y)).collect()
}

/// Adjoint: conjugate in the Fourier domain, x ↦ x(1/X) on coefficients.
pub fn adj(a: &[Cplx]) -> Vec<Cplx> {
    a.iter().map(|&x| x.conj()).collect()
}

pub fn neg(a: &[Cplx]) -> Vec<Cplx> {
    a.iter().map(|&x| -x).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn fft_roundtrip() {
        let f: Vec<f64> = (0..64).map(|i| (i as f64) - 31.5).collect();
        let back = ifft(&fft(&f));
        assert!(f.iter().zip(back.iter()).all(|(&x, &y)| close(x, y)));
    }

    #[test]
    fn split_merge_roundtrip() {
        let f: Vec<f64> = (0..32).map(|i| (i * i) as f64 * 0.25 - 3.0).collect();
        let f_fft = fft(&f);
        let (f0, f1) = split(&f_fft);
        let merged = merge(&f0, &f1);
        assert!(f_fft
            .iter()
            .zip(merged.iter())
            .all(|(&x, &y)| close(x.re, y.re) && close(x.im, y.im)));
    }

    #[test]
    fn pointwise_mul_is_negacyclic_product() {
        let n = 16;
        let a: Vec<f64> = (0..n).map(|i| (i as f64 % 5.0) - 2.0).collect();
        let b: Vec<f64> = (0..n).map(|i| ((i * 3) as f64 % 7.0) - 3.0).collect();

        let mut naive = vec![0.0; n];
        for i in 0..n {
            for j in 0..n {
                let k = (i + j) % n;
                let sign = if i + j >= n { -1.0 } else { 1.0 };
                naive[k] += sign * a[i] * b[j];
            }
        }

        let prod = ifft(&mul(&fft(&a), &fft(&b)));
        assert!(naive.iter().zip(prod.iter()).all(|(&x, &y)| close(x, y)));
    }

    #[test]
    fn adjoint_reverses_coefficients() {
        // adj(f)(X) = f(1/X): coefficient k moves to n−k with a sign flip.
        let n = 8;
        let f: Vec<f64> = (0..n).map(|i| i as f64 + 1.0).collect();
        let a = ifft(&adj(&fft(&f)));
        assert!(close(a[0], f[0]));
        for k in 1..n {
            assert!(close(a[k], -f[n - k]));
        }
    }
}
