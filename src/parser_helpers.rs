#![forbid(unsafe_code)]

//! Shorthands for pulling big-endian values off the front of a byte slice.

/// Reads a `u32` from the front of the slice, if there's enough bytes.
#[inline]
#[must_use]
pub fn u32_be(bytes: &[u8]) -> Option<u32> {
  let (a, _) = try_split_off_byte_array::<4>(bytes)?;
  Some(u32::from_be_bytes(a))
}

/// Splits an array off the front of the slice, if there's enough bytes.
#[inline]
pub fn try_split_off_byte_array<const N: usize>(bytes: &[u8]) -> Option<([u8; N], &[u8])> {
  if bytes.len() >= N {
    let (head, tail) = bytes.split_at(N);
    let a: [u8; N] = head.try_into().ok()?;
    Some((a, tail))
  } else {
    None
  }
}

#[test]
fn test_be_helpers() {
  assert_eq!(u32_be(&[0, 0, 1, 0]), Some(256));
  assert_eq!(u32_be(&[0, 0, 1]), None);
  assert_eq!(try_split_off_byte_array::<2>(&[1, 2, 3]), Some(([1, 2], &[3][..])));
}
