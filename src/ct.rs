//! Constant-time comparison and conditional move. No secret-dependent branching.

/// Constant-time byte-slice comparison. Returns 0 if `a == b`, 1 otherwise.
/// Slices must have equal length.
#[inline]
pub fn verify(a: &[u8], b: &[u8]) -> u8 {
    assert_eq!(a.len(), b.len(), "ct::verify: length mismatch");

    let mut diff: u64 = 0;
    for (&x, &y) in a.iter().zip(b.iter()) {
        diff |= u64::from(x ^ y);
    }
    // Fence: prevent the optimiser from short-circuiting the loop.
    let diff = core::hint::black_box(diff);
    // Map 0 -> 0, nonzero -> 1 without branching.
    (diff.wrapping_neg() >> 63) as u8
}

/// Constant-time conditional copy. If `condition == 1` overwrites `dst` with
/// `src`; if 0, `dst` is unchanged. `condition` must be 0 or 1.
#[inline]
pub fn cmov(dst: &mut [u8], src: &[u8], condition: u8) {
    assert_eq!(dst.len(), src.len(), "ct::cmov: length mismatch");
    debug_assert!(condition <= 1, "ct::cmov: condition must be 0 or 1");

    // Fence the condition so the mask isn't optimised into a branch.
    let mask = core::hint::black_box(condition).wrapping_neg(); // 0x00 or 0xFF

    for (d, &s) in dst.iter_mut().zip(src.iter()) {
        *d ^= mask & (*d ^ s);
    }
}
