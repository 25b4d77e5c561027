use byteorder::{LittleEndian as LE, ReadBytesExt, WriteBytesExt};
use std::io::{self, Read, Write};

/// Bytes needed to hold `m` packed bits: ceil(m / 8).
#[inline]
pub fn bit_length(m: u64) -> u64 { m.div_ceil(8) }

/// Bit `i` lives in byte `i / 8` at position `i % 8` (LSB first).
#[inline]
pub fn byte_and_mask(bit: u64) -> (usize, u8) { ((bit / 8) as usize, 1u8 << (bit & 7)) }

pub fn write_u64<W: Write>(w: &mut W, v: u64) -> io::Result<()> { w.write_u64::<LE>(v) }
pub fn read_u64<R: Read>(r: &mut R) -> io::Result<u64> { r.read_u64::<LE>() }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bit_length_rounds_up() {
        assert_eq!(bit_length(1), 1);
        assert_eq!(bit_length(8), 1);
        assert_eq!(bit_length(9), 2);
        assert_eq!(bit_length(96), 12);
        assert_eq!(bit_length(u64::MAX), u64::MAX / 8 + 1);
    }

    #[test]
    fn lsb_first_packing() {
        assert_eq!(byte_and_mask(0), (0, 0b0000_0001));
        assert_eq!(byte_and_mask(7), (0, 0b1000_0000));
        assert_eq!(byte_and_mask(9), (1, 0b0000_0010));
    }

    #[test]
    fn u64_is_little_endian() {
        let mut out = Vec::new();
        write_u64(&mut out, 0x0102_0304_0506_0708).unwrap();
        assert_eq!(out, [8, 7, 6, 5, 4, 3, 2, 1]);
        assert_eq!(read_u64(&mut out.as_slice()).unwrap(), 0x0102_0304_0506_0708);
    }
}
