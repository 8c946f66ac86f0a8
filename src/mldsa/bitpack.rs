//! Byte-level bit packing for ML-DSA encodings.
//!
//! All field encodings are little-endian at the bit level: coefficient 0
//! occupies the lowest-order bits of byte 0. Signed ranges [−a, b] are
//! stored as `b − c` in bitlen(a + b) bits.

use super::params::N;

/// LSB-first bit writer over a byte buffer.
pub struct BitWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> BitWriter<'a> {
    /// Wrap `buf`, zeroing it first.
    pub fn new(buf: &'a mut [u8]) -> Self {
        buf.fill(0);
        BitWriter { buf, pos: 0 }
    }

    /// Append the low `bits` bits of `value`, LSB first.
    #[inline]
    pub fn write(&mut self, value: u32, bits: usize) {
        for i in 0..bits {
            let bit = ((value >> i) & 1) as u8;
            self.buf[self.pos >> 3] |= bit << (self.pos & 7);
            self.pos += 1;
        }
    }
}

/// LSB-first bit reader over a byte buffer.
pub struct BitReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> BitReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        BitReader { buf, pos: 0 }
    }

    /// Read `bits` bits, LSB first.
    #[inline]
    pub fn read(&mut self, bits: usize) -> u32 {
        let mut value = 0u32;
        for i in 0..bits {
            let bit = (self.buf[self.pos >> 3] >> (self.pos & 7)) & 1;
            value |= (bit as u32) << i;
            self.pos += 1;
        }
        value
    }
}

/// Pack non-negative coefficients at `bits` bits each (SimpleBitPack).
/// `out` must hold exactly `N · bits / 8` bytes.
pub fn pack_simple(out: &mut [u8], coeffs: &[i32; N], bits: usize) {
    debug_assert_eq!(out.len(), N * bits / 8);
    let mut w = BitWriter::new(out);
    for &c in coeffs.iter() {
        debug_assert!(c >= 0 && (c as u32) < (1u32 << bits));
        w.write(c as u32, bits);
    }
}

/// Unpack non-negative coefficients at `bits` bits each.
pub fn unpack_simple(coeffs: &mut [i32; N], input: &[u8], bits: usize) {
    debug_assert_eq!(input.len(), N * bits / 8);
    let mut r = BitReader::new(input);
    for c in coeffs.iter_mut() {
        *c = r.read(bits) as i32;
    }
}

/// Pack coefficients in a signed range with upper endpoint `b`: each
/// coefficient `c` is stored as `b − c` in `bits` bits (BitPack).
pub fn pack_signed(out: &mut [u8], coeffs: &[i32; N], b: i32, bits: usize) {
    debug_assert_eq!(out.len(), N * bits / 8);
    let mut w = BitWriter::new(out);
    for &c in coeffs.iter() {
        let v = b - c;
        debug_assert!(v >= 0 && (v as u32) < (1u32 << bits));
        w.write(v as u32, bits);
    }
}

/// Unpack coefficients stored by [`pack_signed`]: `c = b − v`.
pub fn unpack_signed(coeffs: &mut [i32; N], input: &[u8], b: i32, bits: usize) {
    debug_assert_eq!(input.len(), N * bits / 8);
    let mut r = BitReader::new(input);
    for c in coeffs.iter_mut() {
        *c = b - r.read(bits) as i32;
    }
}

/// Pack the hint vector (HintBitPack): positions of set bits, then per-row
/// cumulative counts. `out` must hold `omega + h.len()` bytes.
pub fn pack_hints(out: &mut [u8], h: &[[i32; N]], omega: usize) {
    debug_assert_eq!(out.len(), omega + h.len());
    out.fill(0);
    let mut index = 0;
    for (i, row) in h.iter().enumerate() {
        for (j, &bit) in row.iter().enumerate() {
            if bit != 0 {
                out[index] = j as u8;
                index += 1;
            }
        }
        out[omega + i] = index as u8;
    }
}

/// Unpack and validate the hint vector (HintBitUnpack).
///
/// Returns `false` on any malleability violation: out-of-order or
/// duplicate positions, cumulative counts that decrease or exceed ω, or
/// nonzero padding after the last hint.
pub fn unpack_hints(h: &mut [[i32; N]], input: &[u8], omega: usize) -> bool {
    for row in h.iter_mut() {
        row.fill(0);
    }

    let mut index = 0usize;
    for (i, row) in h.iter_mut().enumerate() {
        let bound = input[omega + i] as usize;
        if bound < index || bound > omega {
            return false;
        }
        let first = index;
        while index < bound {
            if index > first && input[index - 1] >= input[index] {
                return false;
            }
            row[input[index] as usize] = 1;
            index += 1;
        }
    }

    // Unused position bytes must be zero.
    input[index..omega].iter().all(|&b| b == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_reader_roundtrip() {
        let mut buf = [0u8; 10];
        {
            let mut w = BitWriter::new(&mut buf);
            w.write(0b101, 3);
            w.write(0x3FFF, 14);
            w.write(0, 5);
            w.write(0x55, 8);
        }
        let mut r = BitReader::new(&buf);
        assert_eq!(r.read(3), 0b101);
        assert_eq!(r.read(14), 0x3FFF);
        assert_eq!(r.read(5), 0);
        assert_eq!(r.read(8), 0x55);
    }

    #[test]
    fn simple_pack_roundtrip_10_bits() {
        let mut coeffs = [0i32; N];
        for (i, c) in coeffs.iter_mut().enumerate() {
            *c = ((i * 37) % 1024) as i32;
        }
        let mut buf = [0u8; N * 10 / 8];
        pack_simple(&mut buf, &coeffs, 10);
        let mut back = [0i32; N];
        unpack_simple(&mut back, &buf, 10);
        assert_eq!(coeffs, back);
    }

    #[test]
    fn signed_pack_roundtrip_eta() {
        let mut coeffs = [0i32; N];
        for (i, c) in coeffs.iter_mut().enumerate() {
            *c = (i as i32 % 5) - 2; // [-2, 2]
        }
        let mut buf = [0u8; N * 3 / 8];
        pack_signed(&mut buf, &coeffs, 2, 3);
        let mut back = [0i32; N];
        unpack_signed(&mut back, &buf, 2, 3);
        assert_eq!(coeffs, back);
    }

    #[test]
    fn signed_pack_roundtrip_t0() {
        let mut coeffs = [0i32; N];
        for (i, c) in coeffs.iter_mut().enumerate() {
            *c = ((i as i32 * 101) % 8192) - 4095; // within (−2¹², 2¹²]
        }
        let mut buf = [0u8; N * 13 / 8];
        pack_signed(&mut buf, &coeffs, 1 << 12, 13);
        let mut back = [0i32; N];
        unpack_signed(&mut back, &buf, 1 << 12, 13);
        assert_eq!(coeffs, back);
    }

    #[test]
    fn hints_roundtrip() {
        const OMEGA: usize = 80;
        let mut h = [[0i32; N]; 4];
        h[0][3] = 1;
        h[0][200] = 1;
        h[2][0] = 1;
        h[3][255] = 1;

        let mut buf = [0u8; OMEGA + 4];
        pack_hints(&mut buf, &h, OMEGA);

        let mut back = [[0i32; N]; 4];
        assert!(unpack_hints(&mut back, &buf, OMEGA));
        assert_eq!(h, back);
    }

    #[test]
    fn hints_reject_disorder() {
        const OMEGA: usize = 80;
        let mut buf = [0u8; OMEGA + 4];
        // Two positions out of order in row 0.
        buf[0] = 10;
        buf[1] = 5;
        buf[OMEGA] = 2;
        buf[OMEGA + 1] = 2;
        buf[OMEGA + 2] = 2;
        buf[OMEGA + 3] = 2;
        let mut h = [[0i32; N]; 4];
        assert!(!unpack_hints(&mut h, &buf, OMEGA));
    }

    #[test]
    fn hints_reject_dirty_padding() {
        const OMEGA: usize = 80;
        let mut buf = [0u8; OMEGA + 4];
        buf[5] = 99; // nonzero past the hint count
        let mut h = [[0i32; N]; 4];
        assert!(!unpack_hints(&mut h, &buf, OMEGA));
    }
}
