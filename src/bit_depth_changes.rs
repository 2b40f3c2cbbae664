//! Changing the bit depth of a single channel value, with only integer
//! operations.
//!
//! To *increase* bit depth the current bit pattern becomes the top bits of the
//! new value, and then that pattern is copied down as many times as it takes to
//! fill in all the new low bits. This keeps 0 at 0 and the maximum at the
//! maximum. To *reduce* bit depth just keep the top bits.

use bitfrob::u8_replicate_bits;

/// Makes a sample of the given `bit_depth` into an 8-bit value.
///
/// * 1, 2, and 4 bit samples replicate their bits.
/// * 8 bit samples are unchanged.
/// * 16 bit samples keep only their high byte.
///
/// Other bit depths can't occur in PNG and give 0.
#[inline]
#[must_use]
pub fn sample_to_u8(bit_depth: u8, sample: u16) -> u8 {
  match bit_depth {
    1 | 2 | 4 => u8_replicate_bits(u32::from(bit_depth), sample as u8),
    8 => sample as u8,
    16 => (sample >> 8) as u8,
    _ => 0,
  }
}

/// Makes a sample of the given `bit_depth` into a 16-bit value.
///
/// Anything below 16 bits is first brought to 8 bits, then the byte is
/// doubled into both halves (so `0xAB` becomes `0xABAB`).
#[inline]
#[must_use]
pub fn sample_to_u16(bit_depth: u8, sample: u16) -> u16 {
  if bit_depth == 16 {
    sample
  } else {
    u8_to_u16(sample_to_u8(bit_depth, sample))
  }
}

/// Promotes an 8-bit value to 16 bits by replicating the byte.
#[inline]
#[must_use]
pub const fn u8_to_u16(v: u8) -> u16 {
  u16::from_be_bytes([v, v])
}

#[test]
fn test_sample_scaling() {
  assert_eq!(sample_to_u8(1, 0), 0);
  assert_eq!(sample_to_u8(1, 1), 255);
  assert_eq!(sample_to_u8(2, 0b01), 0b0101_0101);
  assert_eq!(sample_to_u8(2, 0b11), 255);
  assert_eq!(sample_to_u8(4, 0xA), 0xAA);
  assert_eq!(sample_to_u8(8, 0x7F), 0x7F);
  assert_eq!(sample_to_u8(16, 0x1234), 0x12);
  //
  assert_eq!(u8_to_u16(0), 0);
  assert_eq!(u8_to_u16(0xFF), 0xFFFF);
  assert_eq!(u8_to_u16(0x12), 0x1212);
  assert_eq!(sample_to_u16(16, 0xBEEF), 0xBEEF);
  assert_eq!(sample_to_u16(1, 1), 0xFFFF);
  assert_eq!(sample_to_u16(4, 0x3), 0x3333);
}
