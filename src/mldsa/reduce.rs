//! Modular arithmetic for the ML-DSA field (q = 8380417).
//!
//! Products are taken through i64 and reduced to the canonical range
//! [0, q); [`center`] maps canonical values to (−q/2, q/2].

use super::params::Q;

/// Reduce an i64 to the canonical range [0, q).
#[inline]
pub fn reduce64(a: i64) -> i32 {
    let r = a % (Q as i64);
    if r < 0 {
        (r + Q as i64) as i32
    } else {
        r as i32
    }
}

/// Reduce an i32 to the canonical range [0, q).
#[inline]
pub fn reduce32(a: i32) -> i32 {
    let r = a % Q;
    if r < 0 {
        r + Q
    } else {
        r
    }
}

/// Centered representative in [−(q−1)/2, (q−1)/2].
#[inline]
pub fn center(a: i32) -> i32 {
    let mut r = reduce32(a);
    if r > Q / 2 {
        r -= Q;
    }
    r
}

/// Centered representative modulo an arbitrary even modulus `m`
/// (result in (−m/2, m/2]).
#[inline]
pub fn center_mod(a: i32, m: i32) -> i32 {
    let mut r = a % m;
    if r < 0 {
        r += m;
    }
    if r > m / 2 {
        r -= m;
    }
    r
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduce64_negative() {
        assert_eq!(reduce64(-1), Q - 1);
        assert_eq!(reduce64(-(Q as i64)), 0);
    }

    #[test]
    fn center_halves() {
        assert_eq!(center(Q - 1), -1);
        assert_eq!(center(1), 1);
        assert_eq!(center(Q / 2), Q / 2);
        assert_eq!(center(Q / 2 + 1), Q / 2 + 1 - Q);
    }

    #[test]
    fn center_mod_power_of_two() {
        let m = 1 << 13;
        assert_eq!(center_mod(m - 1, m), -1);
        assert_eq!(center_mod(m / 2, m), m / 2);
        assert_eq!(center_mod(m / 2 + 1, m), m / 2 + 1 - m);
    }

    #[test]
    fn reduce64_of_wide_product() {
        let a = (Q - 3) as i64;
        let b = (Q - 7) as i64;
        // (q-3)(q-7) ≡ 21 mod q
        assert_eq!(reduce64(a * b), 21);
    }
}
