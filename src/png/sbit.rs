use super::*;

/// `sBIT`: Significant bits
///
/// Gives the original number of significant bits per channel in the image.
///
/// * Each value here is more than 0 and no more than the sample depth of
///   this PNG.
/// * Indexed color uses the `RGB` variant, and the sample depth for that
///   check is 8 (the depth of the palette entries).
/// * The variant always matches the color type of the image.
/// * If the color type doesn't have alpha but a `tRNS` chunk is present then
///   all alpha bits are assumed to be significant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(nonstandard_style)]
#[allow(missing_docs)]
pub enum sBIT {
  Y { y: u8 },
  RGB { r: u8, g: u8, b: u8 },
  YA { y: u8, a: u8 },
  RGBA { r: u8, g: u8, b: u8, a: u8 },
}
impl sBIT {
  /// Parses the chunk according to the image's color type.
  pub fn parse(data: &[u8], ihdr: &IHDR) -> Result<Self, PngError> {
    let sbit = match ihdr.color_type {
      PngColorType::Y => match *data {
        [y] => sBIT::Y { y },
        _ => return Err(PngError::ChunkSize),
      },
      PngColorType::RGB | PngColorType::Index => match *data {
        [r, g, b] => sBIT::RGB { r, g, b },
        _ => return Err(PngError::ChunkSize),
      },
      PngColorType::YA => match *data {
        [y, a] => sBIT::YA { y, a },
        _ => return Err(PngError::ChunkSize),
      },
      PngColorType::RGBA => match *data {
        [r, g, b, a] => sBIT::RGBA { r, g, b, a },
        _ => return Err(PngError::ChunkSize),
      },
    };
    let sample_depth = if ihdr.color_type == PngColorType::Index { 8 } else { ihdr.bit_depth };
    // the payload bytes are exactly the per-channel values
    if data.iter().all(|&bits| bits != 0 && bits <= sample_depth) {
      Ok(sbit)
    } else {
      Err(PngError::Sbit)
    }
  }
}
