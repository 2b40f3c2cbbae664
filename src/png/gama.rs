use super::*;

/// `gAMA`: Image gamma
///
/// Values are stored as an integer 100,000 times the floating point value.
///
/// **Example:** A gamma of 1/2.2 would be stored as the integer 45,455.
///
/// An `sRGB` chunk or `iCCP` chunk, when present and recognized, overrides the
/// `gAMA` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(nonstandard_style)]
pub struct gAMA {
  /// gamma times 100,000
  pub gamma: u32,
}
impl TryFrom<&[u8]> for gAMA {
  type Error = PngError;
  #[inline]
  fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
    match *data {
      [g0, g1, g2, g3] => Ok(Self { gamma: u32::from_be_bytes([g0, g1, g2, g3]) }),
      _ => Err(PngError::ChunkSize),
    }
  }
}
