use super::*;

/// `PLTE`: Palette
///
/// Palette entries are always RGB.
///
/// If you want to have a paletted image with transparency then the transparency
/// info goes in a separate transparency chunk.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PLTE<'b>(&'b [RGB8]);
impl<'b> PLTE<'b> {
  /// Parses a palette for an image with the given header.
  ///
  /// The payload must be a non-zero multiple of 3 bytes, with no more than
  /// 256 entries. Indexed images additionally can't have more entries than
  /// their bit depth can address.
  pub fn parse(data: &'b [u8], ihdr: &IHDR) -> Result<Self, PngError> {
    let entries: &[RGB8] = bytemuck::try_cast_slice(data).map_err(|_| PngError::ChunkSize)?;
    if entries.is_empty() || entries.len() > 256 {
      return Err(PngError::ChunkSize);
    }
    if ihdr.color_type == PngColorType::Index && entries.len() > (1_usize << ihdr.bit_depth) {
      return Err(PngError::ChunkSize);
    }
    Ok(Self(entries))
  }

  /// Gets the entries as a slice.
  #[inline]
  #[must_use]
  pub const fn entries(&self) -> &'b [RGB8] {
    self.0
  }

  /// Number of entries.
  #[inline]
  #[must_use]
  pub const fn len(&self) -> usize {
    self.0.len()
  }

  /// A parsed palette always has at least one entry.
  #[inline]
  #[must_use]
  pub const fn is_empty(&self) -> bool {
    self.0.is_empty()
  }
}
impl Debug for PLTE<'_> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    // currently prints no more than 4 palette entries
    f.debug_tuple("PLTE").field(&&self.0[..self.0.len().min(4)]).field(&self.0.len()).finish()
  }
}
