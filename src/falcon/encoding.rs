//! Falcon wire encodings: fixed-width key fields and the variable-width
//! compressed signature, all packed MSB-first.

use super::params::Q;

fn write_bits(buf: &mut [u8], pos: &mut usize, value: u32, bits: usize) -> bool {
    if *pos + bits > buf.len() * 8 {
        return false;
    }
    for i in (0..bits).rev() {
        let bit = ((value >> i) & 1) as u8;
        buf[*pos >> 3] |= bit << (7 - (*pos & 7));
        *pos += 1;
    }
    true
}

fn read_bits(buf: &[u8], pos: &mut usize, bits: usize) -> Option<u32> {
    if *pos + bits > buf.len() * 8 {
        return None;
    }
    let mut value = 0u32;
    for _ in 0..bits {
        let bit = (buf[*pos >> 3] >> (7 - (*pos & 7))) & 1;
        value = (value << 1) | bit as u32;
        *pos += 1;
    }
    Some(value)
}

/// Pack small signed coefficients in two's complement at `bits` each.
/// `out` must hold exactly `v.len() · bits / 8` bytes and be zeroed.
pub fn trim_encode(out: &mut [u8], v: &[i16], bits: usize) {
    let mut pos = 0;
    let mask = (1u32 << bits) - 1;
    for &c in v.iter() {
        write_bits(out, &mut pos, (c as i32 as u32) & mask, bits);
    }
}

/// Inverse of [`trim_encode`]; rejects the out-of-range value −2^(bits−1).
pub fn trim_decode(input: &[u8], n: usize, bits: usize) -> Option<Vec<i16>> {
    let mut pos = 0;
    let half = 1i32 << (bits - 1);
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        let raw = read_bits(input, &mut pos, bits)? as i32;
        let c = if raw >= half { raw - (1 << bits) } else { raw };
        if c == -half {
            return None;
        }
        out.push(c as i16);
    }
    Some(out)
}

/// Pack public key coefficients at 14 bits each.
pub fn modq_encode(out: &mut [u8], h: &[u32]) {
    let mut pos = 0;
    for &c in h.iter() {
        write_bits(out, &mut pos, c, 14);
    }
}

/// Inverse of [`modq_encode`]; rejects coefficients ≥ q.
pub fn modq_decode(input: &[u8], n: usize) -> Option<Vec<u32>> {
    let mut pos = 0;
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        let c = read_bits(input, &mut pos, 14)?;
        if c >= Q {
            return None;
        }
        out.push(c);
    }
    Some(out)
}

/// Golomb-Rice style signature compression: sign bit, 7 mantissa bits,
/// then the high part in unary. Returns false when a coefficient is out
/// of range or the encoding overflows `out` (the caller resamples).
/// Unused trailing bits of `out` are left zero, as the padded signature
/// format requires.
pub fn comp_encode(out: &mut [u8], s: &[i16]) -> bool {
    let mut pos = 0;
    for &c in s.iter() {
        let m = (c as i32).unsigned_abs();
        if m > 2047 {
            return false;
        }
        if !write_bits(out, &mut pos, (c < 0) as u32, 1)
            || !write_bits(out, &mut pos, m & 0x7F, 7)
        {
            return false;
        }
        let high = m >> 7;
        for _ in 0..high {
            if !write_bits(out, &mut pos, 0, 1) {
                return false;
            }
        }
        if !write_bits(out, &mut pos, 1, 1) {
            return false;
        }
    }
    true
}

/// Inverse of [`comp_encode`]. Enforces canonicity: minimal-length unary
/// parts, no negative zero, and all-zero padding after the last value.
pub fn comp_decode(input: &[u8], n: usize) -> Option<Vec<i16>> {
    let mut pos = 0;
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        let sign = read_bits(input, &mut pos, 1)?;
        let mantissa = read_bits(input, &mut pos, 7)?;
        let mut high = 0u32;
        while read_bits(input, &mut pos, 1)? == 0 {
            high += 1;
            if high > 15 {
                return None;
            }
        }
        let m = mantissa | (high << 7);
        if sign == 1 && m == 0 {
            return None;
        }
        let v = if sign == 1 { -(m as i32) } else { m as i32 };
        out.push(v as i16);
    }
    // Padding must be all-zero bits.
    while pos < input.len() * 8 {
        if read_bits(input, &mut pos, 1)? != 0 {
            return None;
        }
    }
    Some(out)
}
