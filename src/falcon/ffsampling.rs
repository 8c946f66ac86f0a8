//! Fast Fourier nearest-plane sampling over the LDL tree.

use rand_core::CryptoRng;

use super::fft::{self, Cplx};
use super::ldl::LdlTree;
use super::samplerz::sampler_z;
use crate::Error;

/// Sample an integer lattice point (z0, z1) close to the target (t0, t1),
/// both in the Fourier domain. The tree depth matches the vector length:
/// leaves see scalar (real) targets.
pub fn ff_sampling(
    t0: &[Cplx],
    t1: &[Cplx],
    tree: &LdlTree,
    sigma_min: f64,
    rng: &mut impl CryptoRng,
) -> Result<(Vec<Cplx>, Vec<Cplx>), Error> {
    match tree {
        LdlTree::Leaf(sigma) => {
            let z0 = sampler_z(t0[0].re, *sigma, sigma_min, rng)?;
            let z1 = sampler_z(t1[0].re, *sigma, sigma_min, rng)?;
            Ok((
                vec![Cplx::real(z0 as f64)],
                vec![Cplx::real(z1 as f64)],
            ))
        }
        LdlTree::Node { l10, left, right } => {
            let (t1_even, t1_odd) = fft::split(t1);
            let (z1_even, z1_odd) = ff_sampling(&t1_even, &t1_odd, right, sigma_min, rng)?;
            let z1 = fft::merge(&z1_even, &z1_odd);

            // Babai shift of the first target by the sampled residual.
            let t0b = fft::add(t0, &fft::mul(&fft::sub(t1, &z1), l10));
            let (t0_even, t0_odd) = fft::split(&t0b);
            let (z0_even, z0_odd) = ff_sampling(&t0_even, &t0_odd, left, sigma_min, rng)?;
            Ok((fft::merge(&z0_even, &z0_odd), z1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::falcon::ldl;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn output_is_integral_and_near_target() {
        let n = 16;
        let f: Vec<f64> = (0..n).map(|i| ((i * 5 % 9) as f64) - 4.0).collect();
        let g: Vec<f64> = (0..n).map(|i| ((i * 11 % 7) as f64) - 3.0).collect();
        let (ff, fg) = (fft::fft(&f), fft::fft(&g));
        let g00 = fft::add(&fft::mul(&ff, &fft::adj(&ff)), &fft::mul(&fg, &fft::adj(&fg)));
        let g01 = fft::mul(&ff, &fft::adj(&fg));
        let mut tree = ldl::ffldl(&g00, &g01, &g00);
        ldl::normalize(&mut tree, 60.0);

        let t0: Vec<f64> = (0..n).map(|i| (i as f64) * 0.3 - 2.0).collect();
        let t1: Vec<f64> = (0..n).map(|i| (i as f64) * -0.2 + 1.0).collect();
        let mut rng = StdRng::seed_from_u64(42);
        let (z0, z1) = ff_sampling(
            &fft::fft(&t0),
            &fft::fft(&t1),
            &tree,
            1.2778336969128337,
            &mut rng,
        )
        .unwrap();

        for z in [fft::ifft(&z0), fft::ifft(&z1)] {
            for &c in z.iter() {
                assert!((c - c.round()).abs() < 1e-6, "non-integral output {c}");
                assert!(c.abs() < 1000.0);
            }
        }
    }
}
