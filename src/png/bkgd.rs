use super::*;

/// `bKGD`: Background colour
///
/// Gives an intended background color for the image.
///
/// RGB and Greyscale colors are always given as `u16` values. The actual color
/// selected should stay within the bit depth range of the rest of the image.
/// The variant always matches the color type of the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(nonstandard_style)]
#[allow(missing_docs)]
pub enum bKGD {
  /// greyscale, with or without alpha
  Y { y: u16 },
  /// truecolor, with or without alpha
  RGB { r: u16, g: u16, b: u16 },
  /// indexed
  Index { i: u8 },
}
impl bKGD {
  /// Parses the chunk according to the image's color type.
  pub fn parse(data: &[u8], ihdr: &IHDR, plte: Option<&PLTE<'_>>) -> Result<Self, PngError> {
    Ok(match ihdr.color_type {
      PngColorType::Y | PngColorType::YA => match *data {
        [y0, y1] => bKGD::Y { y: u16::from_be_bytes([y0, y1]) },
        _ => return Err(PngError::ChunkSize),
      },
      PngColorType::RGB | PngColorType::RGBA => match *data {
        [r0, r1, g0, g1, b0, b1] => bKGD::RGB {
          r: u16::from_be_bytes([r0, r1]),
          g: u16::from_be_bytes([g0, g1]),
          b: u16::from_be_bytes([b0, b1]),
        },
        _ => return Err(PngError::ChunkSize),
      },
      PngColorType::Index => match *data {
        [i] => {
          let plte = plte.ok_or(PngError::BkgdNoPlte)?;
          if usize::from(i) >= plte.len() {
            return Err(PngError::BkgdPlteIdx);
          }
          bKGD::Index { i }
        }
        _ => return Err(PngError::ChunkSize),
      },
    })
  }
}
