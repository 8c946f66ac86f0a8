//! LDL* decomposition tree of the secret basis Gram matrix.
//!
//! The tree mirrors the recursive splitting of the ring: each internal node
//! stores the l10 factor of a 2×2 LDL* step, each leaf the Gaussian
//! deviation used by the integer sampler at the bottom of the recursion.

use super::fft::{self, Cplx};

pub enum LdlTree {
    Node {
        l10: Vec<Cplx>,
        left: Box<LdlTree>,
        right: Box<LdlTree>,
    },
    Leaf(f64),
}

/// One LDL* step on the self-adjoint Gram [[g00, g01], [adj(g01), g11]]:
/// returns (l10, d00, d11) with G = L·diag(d00, d11)·L*.
fn ldl(g00: &[Cplx], g01: &[Cplx], g11: &[Cplx]) -> (Vec<Cplx>, Vec<Cplx>, Vec<Cplx>) {
    let l10 = fft::div(&fft::adj(g01), g00);
    let l10_sq = fft::mul(&l10, &fft::adj(&l10));
    let d11 = fft::sub(g11, &fft::mul(&l10_sq, g00));
    (l10, g00.to_vec(), d11)
}

/// Build the full decomposition tree for the Gram matrix.
pub fn ffldl(g00: &[Cplx], g01: &[Cplx], g11: &[Cplx]) -> LdlTree {
    let n = g00.len();
    let (l10, d00, d11) = ldl(g00, g01, g11);
    if n == 2 {
        return LdlTree::Node {
            l10,
            left: Box::new(LdlTree::Leaf(d00[0].re)),
            right: Box::new(LdlTree::Leaf(d11[0].re)),
        };
    }
    let (d00_0, d00_1) = fft::split(&d00);
    let (d11_0, d11_1) = fft::split(&d11);
    LdlTree::Node {
        l10,
        left: Box::new(ffldl(&d00_0, &d00_1, &d00_0)),
        right: Box::new(ffldl(&d11_0, &d11_1, &d11_0)),
    }
}

/// Turn the leaf variances into per-leaf sampler deviations σ/√d.
pub fn normalize(tree: &mut LdlTree, sigma: f64) {
    match tree {
        LdlTree::Node { left, right, .. } => {
            normalize(left, sigma);
            normalize(right, sigma);
        }
        LdlTree::Leaf(value) => {
            *value = sigma / value.sqrt();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Cplx, b: Cplx) -> bool {
        (a.re - b.re).abs() < 1e-7 && (a.im - b.im).abs() < 1e-7
    }

    #[test]
    fn ldl_reconstructs_gram() {
        // Gram of a rank-2 basis over a degree-8 ring.
        let a: Vec<f64> = (0..8).map(|i| (i as f64 * 0.7).sin() * 3.0).collect();
        let b: Vec<f64> = (0..8).map(|i| (i as f64 * 1.3).cos() * 2.0 + 1.0).collect();
        let c: Vec<f64> = (0..8).map(|i| (i as f64) * 0.5 - 2.0).collect();
        let d: Vec<f64> = (0..8).map(|i| (i as f64 * 0.9).cos() - 0.5).collect();
        let (fa, fb, fc, fd) = (fft::fft(&a), fft::fft(&b), fft::fft(&c), fft::fft(&d));

        let g00 = fft::add(&fft::mul(&fa, &fft::adj(&fa)), &fft::mul(&fb, &fft::adj(&fb)));
        let g01 = fft::add(&fft::mul(&fa, &fft::adj(&fc)), &fft::mul(&fb, &fft::adj(&fd)));
        let g11 = fft::add(&fft::mul(&fc, &fft::adj(&fc)), &fft::mul(&fd, &fft::adj(&fd)));

        let (l10, d00, d11) = ldl(&g00, &g01, &g11);

        // G = L·D·L*: g01 = d00·adj(l10), g11 = l10·adj(l10)·d00 + d11.
        let g01_back = fft::mul(&d00, &fft::adj(&l10));
        let g11_back = fft::add(&fft::mul(&fft::mul(&l10, &fft::adj(&l10)), &d00), &d11);
        assert!(g01.iter().zip(g01_back.iter()).all(|(&x, &y)| close(x, y)));
        assert!(g11.iter().zip(g11_back.iter()).all(|(&x, &y)| close(x, y)));
    }

    #[test]
    fn tree_shape_and_positive_leaves() {
        let f: Vec<f64> = (0..16).map(|i| ((i * 7 % 5) as f64) - 2.0).collect();
        let g: Vec<f64> = (0..16).map(|i| ((i * 3 % 7) as f64) - 3.0).collect();
        let (ff, fg) = (fft::fft(&f), fft::fft(&g));
        let g00 = fft::add(&fft::mul(&ff, &fft::adj(&ff)), &fft::mul(&fg, &fft::adj(&fg)));
        // Self-Gram of [f, g] rows: strictly positive definite diagonal.
        let mut tree = ffldl(&g00, &fft::mul(&ff, &fft::adj(&fg)), &g00);

        fn depth(t: &LdlTree) -> usize {
            match t {
                LdlTree::Node { left, .. } => 1 + depth(left),
                LdlTree::Leaf(_) => 0,
            }
        }
        assert_eq!(depth(&tree), 4); // 16 → 8 → 4 → 2 → leaf

        normalize(&mut tree, 10.0);
        fn leaves_finite(t: &LdlTree) -> bool {
            match t {
                LdlTree::Node { left, right, .. } => leaves_finite(left) && leaves_finite(right),
                LdlTree::Leaf(v) => v.is_finite() && *v > 0.0,
            }
        }
        assert!(leaves_finite(&tree));
    }
}
