use super::*;

/// `hIST`: Image Histogram
///
/// Gives the approximate usage frequency of each color in the palette.
///
/// Can appear only when a `PLTE` chunk appears, and there's exactly one entry
/// for each palette entry. A zero entry means that palette entry isn't used at
/// all in the image.
///
/// The entries are kept as the 2-byte big-endian values from the chunk, to
/// avoid a copy. Use [`frequency`](Self::frequency) or
/// [`frequencies`](Self::frequencies) to read them.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[allow(nonstandard_style)]
pub struct hIST<'b>(&'b [[u8; 2]]);
impl<'b> hIST<'b> {
  /// Parses the chunk, it must come after the palette and match its length.
  pub fn parse(data: &'b [u8], plte: Option<&PLTE<'_>>) -> Result<Self, PngError> {
    let plte = plte.ok_or(PngError::ChunkPos)?;
    let entries: &[[u8; 2]] = bytemuck::try_cast_slice(data).map_err(|_| PngError::ChunkSize)?;
    if entries.len() != plte.len() {
      return Err(PngError::ChunkSize);
    }
    Ok(Self(entries))
  }

  /// The frequency of a palette index.
  #[inline]
  #[must_use]
  pub fn frequency(&self, index: u8) -> Option<u16> {
    self.0.get(usize::from(index)).copied().map(u16::from_be_bytes)
  }

  /// All the frequencies, in palette order.
  #[inline]
  pub fn frequencies(&self) -> impl Iterator<Item = u16> + 'b {
    self.0.iter().copied().map(u16::from_be_bytes)
  }
}
impl Debug for hIST<'_> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_tuple("hIST").field(&self.0.len()).finish()
  }
}
