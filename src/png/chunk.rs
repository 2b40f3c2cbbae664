use super::*;

/// The four byte type tag of a chunk.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct ChunkTy(pub [u8; 4]);
#[allow(nonstandard_style)]
#[allow(missing_docs)]
impl ChunkTy {
  pub const IHDR: Self = Self(*b"IHDR");
  pub const PLTE: Self = Self(*b"PLTE");
  pub const IDAT: Self = Self(*b"IDAT");
  pub const IEND: Self = Self(*b"IEND");
  pub const cHRM: Self = Self(*b"cHRM");
  pub const gAMA: Self = Self(*b"gAMA");
  pub const iCCP: Self = Self(*b"iCCP");
  pub const sBIT: Self = Self(*b"sBIT");
  pub const sRGB: Self = Self(*b"sRGB");
  pub const bKGD: Self = Self(*b"bKGD");
  pub const hIST: Self = Self(*b"hIST");
  pub const tRNS: Self = Self(*b"tRNS");
  pub const pHYs: Self = Self(*b"pHYs");
  pub const tIME: Self = Self(*b"tIME");
}
impl ChunkTy {
  /// Chunk types are made only of ASCII letters.
  #[inline]
  #[must_use]
  pub const fn is_valid(self) -> bool {
    let [a, b, c, d] = self.0;
    a.is_ascii_alphabetic()
      && b.is_ascii_alphabetic()
      && c.is_ascii_alphabetic()
      && d.is_ascii_alphabetic()
  }

  /// Bit 5 of the first byte clear (an uppercase letter) marks a chunk that a
  /// decoder must understand to decode the image.
  #[inline]
  #[must_use]
  pub const fn is_critical(self) -> bool {
    (self.0[0] & 0b0010_0000) == 0
  }
}
impl core::fmt::Debug for ChunkTy {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    for ch in self.0.iter().copied().map(|u| u as char) {
      f.write_char(ch)?;
    }
    Ok(())
  }
}

/// Where a chunk sits within the input buffer.
///
/// The `offset` is the byte position of the chunk's length field, relative to
/// the start of the whole buffer (signature included).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChunkSpan {
  /// position of the length field
  pub offset: usize,
  /// declared payload length
  pub length: u32,
  /// type tag
  pub ty: ChunkTy,
  /// declared CRC
  pub crc: u32,
}
impl ChunkSpan {
  /// Bytes in the complete record: length, type, payload, and CRC.
  #[inline]
  #[must_use]
  pub const fn record_len(&self) -> usize {
    12 + self.length as usize
  }

  /// Position of the byte just past this record.
  #[inline]
  #[must_use]
  pub const fn end(&self) -> usize {
    self.offset + self.record_len()
  }
}

/// Chunk lengths are capped at this value by the PNG format.
pub const PNG_MAX_CHUNK_LEN: u32 = (1 << 31) - 1;

/// A chunk record read out of the buffer, with its CRC already verified.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PngChunk<'b> {
  /// position and declared values
  pub span: ChunkSpan,
  /// the payload
  pub data: &'b [u8],
}
impl<'b> PngChunk<'b> {
  /// The chunk's type.
  #[inline]
  #[must_use]
  pub const fn ty(&self) -> ChunkTy {
    self.span.ty
  }
}
impl core::fmt::Debug for PngChunk<'_> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("PngChunk")
      .field("span", &self.span)
      .field("data", &(&self.data[..self.data.len().min(12)], self.data.len()))
      .finish()
  }
}

/// Computes the CRC of a chunk the way PNG defines it: over the type bytes
/// followed by the payload.
#[inline]
#[must_use]
pub fn png_crc(ty: ChunkTy, data: &[u8]) -> u32 {
  let mut h = crc32fast::Hasher::new();
  h.update(&ty.0);
  h.update(data);
  h.finalize()
}

/// Reads the chunk record starting at `offset` within `png`.
///
/// ## Failure
/// * [`PngError::ChunkSize`] if the declared length is above the format cap.
/// * [`PngError::ChunkPos`] if the record runs past the end of the buffer.
/// * [`PngError::ChunkType`] if the type isn't four ASCII letters.
/// * [`PngError::ChunkCrc`] if the checksum doesn't match.
pub fn read_chunk_at(png: &[u8], offset: usize) -> Result<PngChunk<'_>, PngError> {
  let rest = png.get(offset..).ok_or(PngError::ChunkPos)?;
  let (len_bytes, rest) = try_split_off_byte_array::<4>(rest).ok_or(PngError::ChunkPos)?;
  let length = u32::from_be_bytes(len_bytes);
  if length > PNG_MAX_CHUNK_LEN {
    return Err(PngError::ChunkSize);
  }
  let (ty_bytes, rest) = try_split_off_byte_array::<4>(rest).ok_or(PngError::ChunkPos)?;
  let ty = ChunkTy(ty_bytes);
  let data = rest.get(..length as usize).ok_or(PngError::ChunkPos)?;
  let crc = rest.get(length as usize..).and_then(u32_be).ok_or(PngError::ChunkPos)?;
  if !ty.is_valid() {
    return Err(PngError::ChunkType);
  }
  if png_crc(ty, data) != crc {
    return Err(PngError::ChunkCrc);
  }
  Ok(PngChunk { span: ChunkSpan { offset, length, ty, crc }, data })
}

/// An iterator that produces successive verified chunks from PNG bytes.
///
/// Iteration stops after the first error, or once the buffer is exactly used
/// up.
#[derive(Debug, Clone)]
pub struct PngChunkIter<'b> {
  png: &'b [u8],
  pos: usize,
}
impl<'b> PngChunkIter<'b> {
  /// Starts reading chunks at the given byte offset of the full buffer.
  #[inline]
  #[must_use]
  pub const fn new_at(png: &'b [u8], pos: usize) -> Self {
    Self { png, pos }
  }
  /// The offset where the next chunk would be read from.
  #[inline]
  #[must_use]
  pub const fn position(&self) -> usize {
    self.pos
  }
}
impl<'b> Iterator for PngChunkIter<'b> {
  type Item = Result<PngChunk<'b>, PngError>;
  #[inline]
  fn next(&mut self) -> Option<Self::Item> {
    if self.pos >= self.png.len() {
      return None;
    }
    match read_chunk_at(self.png, self.pos) {
      Ok(chunk) => {
        self.pos = chunk.span.end();
        Some(Ok(chunk))
      }
      Err(e) => {
        self.pos = self.png.len();
        Some(Err(e))
      }
    }
  }
}
