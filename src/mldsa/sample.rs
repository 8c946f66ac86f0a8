//! Deterministic expansion of seeds into polynomials: ExpandA, ExpandS,
//! ExpandMask, and SampleInBall.

use sha3::digest::XofReader;

use super::bitpack::BitReader;
use super::params::{N, Q};
use crate::hash;

/// Rejection-sample one uniform NTT-domain polynomial from
/// SHAKE-128(ρ ‖ s ‖ r) where `s` is the column and `r` the row index.
pub fn expand_a_poly(rho: &[u8; 32], r: u8, s: u8, out: &mut [i32; N]) {
    let mut reader = hash::shake128(&[rho, &[s, r]]);
    let mut buf = [0u8; 3];
    let mut count = 0;
    while count < N {
        reader.read(&mut buf);
        // 23-bit little-endian candidate, top bit of the third byte dropped.
        let z = (((buf[2] & 0x7F) as i32) << 16) | ((buf[1] as i32) << 8) | (buf[0] as i32);
        if z < Q {
            out[count] = z;
            count += 1;
        }
    }
}

/// Rejection-sample one secret polynomial with coefficients in [−η, η]
/// from SHAKE-256(ρ′ ‖ LE16(index)).
pub fn expand_s_poly(rho_prime: &[u8; 64], index: u16, eta: usize, out: &mut [i32; N]) {
    let mut reader = hash::shake256(&[rho_prime, &index.to_le_bytes()]);
    let mut buf = [0u8; 1];
    let mut count = 0;
    while count < N {
        reader.read(&mut buf);
        for half in [buf[0] & 0x0F, buf[0] >> 4] {
            if count == N {
                break;
            }
            if let Some(c) = coeff_from_half_byte(half, eta) {
                out[count] = c;
                count += 1;
            }
        }
    }
}

fn coeff_from_half_byte(b: u8, eta: usize) -> Option<i32> {
    if eta == 2 && b < 15 {
        Some(2 - (b % 5) as i32)
    } else if eta == 4 && b < 9 {
        Some(4 - b as i32)
    } else {
        None
    }
}

/// Expand one mask polynomial with coefficients uniform in (−γ₁, γ₁],
/// from SHAKE-256(ρ″ ‖ LE16(index)).
pub fn expand_mask_poly(
    rho_prime2: &[u8; 64],
    index: u16,
    gamma1: i32,
    z_bits: usize,
    out: &mut [i32; N],
) {
    let mut reader = hash::shake256(&[rho_prime2, &index.to_le_bytes()]);
    let mut buf = [0u8; 640]; // 256 · 20 / 8, the widest case
    let nbytes = N * z_bits / 8;
    reader.read(&mut buf[..nbytes]);

    let mut bits = BitReader::new(&buf[..nbytes]);
    for c in out.iter_mut() {
        *c = gamma1 - bits.read(z_bits) as i32;
    }
}

/// Sample the challenge polynomial: τ coefficients of ±1, the rest zero,
/// from SHAKE-256(c̃) via a Fisher-Yates style shuffle.
pub fn sample_in_ball(c_tilde: &[u8], tau: usize, out: &mut [i32; N]) {
    out.fill(0);
    let mut reader = hash::shake256(&[c_tilde]);

    let mut signs = [0u8; 8];
    reader.read(&mut signs);
    let sign_bit = |idx: usize| (signs[idx / 8] >> (idx % 8)) & 1;

    let mut buf = [0u8; 1];
    for i in (N - tau)..N {
        let j = loop {
            reader.read(&mut buf);
            let j = buf[0] as usize;
            if j <= i {
                break j;
            }
        };
        out[i] = out[j];
        out[j] = if sign_bit(i - (N - tau)) == 0 { 1 } else { -1 };
    }
}
