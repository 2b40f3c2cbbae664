use super::*;

/// `cHRM`: Primary chromaticities and white point
///
/// Values are stored as an integer 100,000 times the floating point value.
///
/// **Example:** A value of 0.3127 would be stored as the integer 31270.
///
/// An `sRGB` chunk or `iCCP` chunk, when present and recognized, overrides the
/// `cHRM` chunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(nonstandard_style)]
#[allow(missing_docs)]
pub struct cHRM {
  pub white_x: u32,
  pub white_y: u32,
  pub red_x: u32,
  pub red_y: u32,
  pub green_x: u32,
  pub green_y: u32,
  pub blue_x: u32,
  pub blue_y: u32,
}
impl TryFrom<&[u8]> for cHRM {
  type Error = PngError;
  #[inline]
  fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
    let bytes: [u8; 32] = data.try_into().map_err(|_| PngError::ChunkSize)?;
    let values: [[u8; 4]; 8] = bytemuck::cast(bytes);
    let [white_x, white_y, red_x, red_y, green_x, green_y, blue_x, blue_y] =
      values.map(u32::from_be_bytes);
    Ok(Self { white_x, white_y, red_x, red_y, green_x, green_y, blue_x, blue_y })
  }
}
