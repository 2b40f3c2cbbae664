use super::*;

/// `pHYs`: Physical pixel dimensions
///
/// Specifies the intended pixel size or aspect ratio for display of the image.
///
/// When the unit specifier is 1 then `x` and `y` are in pixels per meter.
/// When it's 0 they have no unit and define an aspect ratio only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(nonstandard_style)]
pub struct pHYs {
  /// pixels per unit, X axis
  pub ppu_x: u32,
  /// pixels per unit, Y axis
  pub ppu_y: u32,
  /// the raw unit byte
  pub unit_specifier: u8,
}
impl pHYs {
  /// If the unit is the meter.
  #[inline]
  #[must_use]
  pub const fn is_meters(&self) -> bool {
    self.unit_specifier == 1
  }
}
impl TryFrom<&[u8]> for pHYs {
  type Error = PngError;
  #[inline]
  fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
    match *data {
      [x0, x1, x2, x3, y0, y1, y2, y3, unit_specifier] => Ok(Self {
        ppu_x: u32::from_be_bytes([x0, x1, x2, x3]),
        ppu_y: u32::from_be_bytes([y0, y1, y2, y3]),
        unit_specifier,
      }),
      _ => Err(PngError::ChunkSize),
    }
  }
}
