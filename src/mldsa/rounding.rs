//! Coefficient rounding: Power2Round, Decompose, and the hint functions.
//!
//! All functions take canonical or arbitrary i32 inputs and reduce
//! internally; γ₂ is passed explicitly so the same code serves both
//! rounding regimes ((q−1)/88 and (q−1)/32).

use super::params::{D, Q};
use super::reduce::{center_mod, reduce32};

/// Split `r` into `(r1, r0)` with `r = r1·2ᵈ + r0` and `r0 ∈ (−2ᵈ⁻¹, 2ᵈ⁻¹]`.
#[inline]
pub fn power2round(r: i32) -> (i32, i32) {
    let r = reduce32(r);
    let r0 = center_mod(r, 1 << D);
    ((r - r0) >> D, r0)
}

/// Split `r` into high and low parts relative to α = 2γ₂, with the q−1
/// wraparound folded into the low part.
#[inline]
pub fn decompose(r: i32, gamma2: i32) -> (i32, i32) {
    let r = reduce32(r);
    let r0 = center_mod(r, 2 * gamma2);
    if r - r0 == Q - 1 {
        (0, r0 - 1)
    } else {
        ((r - r0) / (2 * gamma2), r0)
    }
}

/// High part of [`decompose`].
#[inline]
pub fn high_bits(r: i32, gamma2: i32) -> i32 {
    decompose(r, gamma2).0
}

/// Low part of [`decompose`].
#[inline]
pub fn low_bits(r: i32, gamma2: i32) -> i32 {
    decompose(r, gamma2).1
}

/// Hint bit: does adding `z` to `r` change the high part?
#[inline]
pub fn make_hint(z: i32, r: i32, gamma2: i32) -> bool {
    high_bits(r, gamma2) != high_bits(r + z, gamma2)
}

/// Recover the high part of the signer's commitment from `r` and a hint.
#[inline]
pub fn use_hint(hint: bool, r: i32, gamma2: i32) -> i32 {
    let m = (Q - 1) / (2 * gamma2);
    let (r1, r0) = decompose(r, gamma2);
    if !hint {
        r1
    } else if r0 > 0 {
        (r1 + 1).rem_euclid(m)
    } else {
        (r1 - 1).rem_euclid(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAMMA2_44: i32 = (Q - 1) / 88;
    const GAMMA2_65: i32 = (Q - 1) / 32;

    #[test]
    fn power2round_reconstructs() {
        for r in [0, 1, 8191, 8192, 123_456, Q - 1] {
            let (r1, r0) = power2round(r);
            assert_eq!(r1 * (1 << D) + r0, r, "reconstruction failed for {r}");
            assert!(r0 > -(1 << (D - 1)) && r0 <= 1 << (D - 1));
        }
    }

    #[test]
    fn decompose_reconstructs_mod_q() {
        for gamma2 in [GAMMA2_44, GAMMA2_65] {
            for r in [0, 1, gamma2, 2 * gamma2, Q - 2, Q - 1, 4_000_000] {
                let (r1, r0) = decompose(r, gamma2);
                let rebuilt = reduce32(r1 * 2 * gamma2 + r0);
                assert_eq!(rebuilt, reduce32(r), "γ₂={gamma2} r={r}");
                assert!(r0.abs() <= gamma2 + 1);
            }
        }
    }

    #[test]
    fn decompose_wraparound_edge() {
        // r − r0 = q − 1 folds into the low part with r1 = 0. Both moduli
        // divide q − 1 exactly, so r0 = 0 − 1 = −1.
        for gamma2 in [GAMMA2_44, GAMMA2_65] {
            let (r1, r0) = decompose(Q - 1, gamma2);
            assert_eq!(r1, 0);
            assert_eq!(r0, -1);
        }
    }

    #[test]
    fn use_hint_recovers_high_bits() {
        // For any r and small perturbation z, UseHint(MakeHint(z, r), r)
        // equals HighBits(r + z).
        for gamma2 in [GAMMA2_44, GAMMA2_65] {
            for r in [5, gamma2 - 1, gamma2 + 7, 3 * gamma2, Q - gamma2] {
                for z in [-(gamma2 / 2), -3, 0, 3, gamma2 / 2] {
                    let h = make_hint(z, r, gamma2);
                    let recovered = use_hint(h, r, gamma2);
                    assert_eq!(
                        recovered,
                        high_bits(r + z, gamma2),
                        "γ₂={gamma2} r={r} z={z}"
                    );
                }
            }
        }
    }

    #[test]
    fn high_bits_range() {
        for gamma2 in [GAMMA2_44, GAMMA2_65] {
            let m = (Q - 1) / (2 * gamma2);
            for r in (0..Q).step_by(99_991) {
                let hb = high_bits(r, gamma2);
                assert!((0..m).contains(&hb), "high bits {hb} out of [0, {m})");
            }
        }
    }
}
