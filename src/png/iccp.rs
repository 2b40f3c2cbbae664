use super::*;

/// `iCCP`: Embedded ICC profile
///
/// * The profile `name` may be any convenient name for referring to the
///   profile. It is case-sensitive, and should be Latin-1 text.
/// * The `zlib_data` is a zlib data stream, and decompression of this
///   datastream yields the embedded ICC profile. This crate doesn't
///   decompress or interpret the profile, it only reports that one exists.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[allow(nonstandard_style)]
pub struct iCCP<'b> {
  /// profile name, 1 to 79 bytes
  pub name: &'b [u8],
  /// compressed profile
  pub zlib_data: &'b [u8],
}
impl<'b> TryFrom<&'b [u8]> for iCCP<'b> {
  type Error = PngError;
  #[inline]
  fn try_from(data: &'b [u8]) -> Result<Self, Self::Error> {
    let mut it = data.splitn(2, |u| u == &0_u8);
    let name = it.next().ok_or(PngError::ChunkSize)?;
    if name.is_empty() || name.len() > 79 {
      return Err(PngError::ChunkSize);
    }
    match it.next().ok_or(PngError::ChunkSize)? {
      [0, zlib_data @ ..] => Ok(Self { name, zlib_data }),
      _ => Err(PngError::ChunkSize),
    }
  }
}
impl Debug for iCCP<'_> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("iCCP")
      .field("name", &core::str::from_utf8(self.name).unwrap_or("?"))
      .field("zlib_data", &self.zlib_data.len())
      .finish()
  }
}
