use core::num::TryFromIntError;

/// An error from the `strict_png` crate.
///
/// Every variant is a distinct terminal condition. Once a [`Decoder`] has
/// returned one of these it stays invalid, and every later call answers
/// [`PngError::BadState`].
///
/// The discriminant is the stable numeric code (see [`PngError::code`]).
/// Success has no variant, it's just `Ok`, which by convention is code 0.
///
/// [`Decoder`]: crate::png::Decoder
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u32)]
#[non_exhaustive]
pub enum PngError {
  // usage
  /// An argument was out of range, or a value wasn't recognized.
  InvalidArgument = 1,
  /// The allocator couldn't give us enough space.
  OutOfMemory = 2,
  /// A size computation didn't fit in the native integer width.
  Overflow = 3,

  // container structure
  /// The first eight bytes aren't the PNG signature.
  Signature = 4,
  /// Width is zero or above the format limit.
  Width = 5,
  /// Height is zero or above the format limit.
  Height = 6,
  /// Width exceeds the caller's limit.
  UserWidth = 7,
  /// Height exceeds the caller's limit.
  UserHeight = 8,

  // header fields
  /// The bit depth is not legal for the colour type.
  BitDepth = 9,
  /// The colour type isn't one of the five PNG colour types.
  ColourType = 10,
  /// Compression method other than 0.
  CompressionMethod = 11,
  /// Filter method other than 0.
  FilterMethod = 12,
  /// Interlace method other than 0 or 1.
  InterlaceMethod = 13,
  /// The header chunk doesn't declare exactly 13 bytes.
  IhdrSize = 14,
  /// The first chunk isn't a header chunk.
  NoIhdr = 15,

  // chunk records
  /// A chunk is somewhere it's not allowed to be, or runs past the end of
  /// the buffer.
  ChunkPos = 50,
  /// A chunk's declared length is illegal for its type.
  ChunkSize = 51,
  /// A chunk's CRC doesn't match its type and payload.
  ChunkCrc = 52,
  /// A chunk type contains bytes that aren't ASCII letters.
  ChunkType = 53,
  /// An unrecognized chunk is marked critical.
  ChunkUnknownCritical = 54,

  // duplicates
  /// More than one `PLTE`.
  DupPlte = 55,
  /// More than one `cHRM`.
  DupChrm = 56,
  /// More than one `gAMA`.
  DupGama = 57,
  /// More than one `iCCP`.
  DupIccp = 58,
  /// More than one `sBIT`.
  DupSbit = 59,
  /// More than one `sRGB`.
  DupSrgb = 60,
  /// More than one `bKGD`.
  DupBkgd = 61,
  /// More than one `hIST`.
  DupHist = 62,
  /// More than one `tRNS`.
  DupTrns = 63,
  /// More than one `pHYs`.
  DupPhys = 64,
  /// More than one `tIME`.
  DupTime = 65,

  // semantic
  /// An `sBIT` value is zero or above the sample depth.
  Sbit = 66,
  /// A pixel references an index past the end of the palette.
  PlteIdx = 67,
  /// `tRNS` appeared for a colour type that already has alpha.
  TrnsColourType = 68,

  // image data
  /// The image data decompressed to fewer bytes than the image needs.
  IdatTooShort = 80,
  /// The image data decompressed to more bytes than the image needs.
  IdatTooLong = 81,
  /// There are bytes after the `IEND` chunk.
  DataAfterIend = 82,
  /// The `IDAT` chunks are not contiguous.
  IdatStream = 83,
  /// The zlib stream is corrupt.
  Zlib = 84,
  /// A scanline has a filter type above 4.
  Filter = 85,

  /// Palette-index `bKGD` without a `PLTE`.
  BkgdNoPlte = 100,
  /// `bKGD` palette index past the end of the palette.
  BkgdPlteIdx = 101,
  /// Indexed-colour `tRNS` without a `PLTE`.
  TrnsNoPlte = 102,

  /// The output buffer is smaller than the size query reported.
  BufSiz = 120,

  /// Reserved for callback based input, the buffer API never returns it.
  Io = 130,
  /// Reserved for callback based input, the buffer API never returns it.
  Eof = 131,

  /// An input buffer was already attached to this decoder.
  BufSet = 140,
  /// The decoder can't perform this operation in its current state.
  BadState = 141,
}

impl PngError {
  /// The stable numeric code of this error.
  #[inline]
  #[must_use]
  pub const fn code(self) -> u32 {
    self as u32
  }

  /// If this error is one of the "chunk appeared twice" errors.
  #[inline]
  #[must_use]
  pub const fn is_duplicate_chunk(self) -> bool {
    matches!(self.code(), 55..=65)
  }

  const fn message(self) -> &'static str {
    match self {
      Self::InvalidArgument => "invalid argument",
      Self::OutOfMemory => "out of memory",
      Self::Overflow => "arithmetic overflow",
      Self::Signature => "invalid signature",
      Self::Width => "invalid image width",
      Self::Height => "invalid image height",
      Self::UserWidth => "image width exceeds user limit",
      Self::UserHeight => "image height exceeds user limit",
      Self::BitDepth => "invalid bit depth",
      Self::ColourType => "invalid colour type",
      Self::CompressionMethod => "invalid compression method",
      Self::FilterMethod => "invalid filter method",
      Self::InterlaceMethod => "invalid interlace method",
      Self::IhdrSize => "invalid IHDR chunk size",
      Self::NoIhdr => "missing IHDR chunk",
      Self::ChunkPos => "invalid chunk position",
      Self::ChunkSize => "invalid chunk length",
      Self::ChunkCrc => "invalid chunk checksum",
      Self::ChunkType => "invalid chunk type",
      Self::ChunkUnknownCritical => "unknown critical chunk",
      Self::DupPlte => "duplicate PLTE chunk",
      Self::DupChrm => "duplicate cHRM chunk",
      Self::DupGama => "duplicate gAMA chunk",
      Self::DupIccp => "duplicate iCCP chunk",
      Self::DupSbit => "duplicate sBIT chunk",
      Self::DupSrgb => "duplicate sRGB chunk",
      Self::DupBkgd => "duplicate bKGD chunk",
      Self::DupHist => "duplicate hIST chunk",
      Self::DupTrns => "duplicate tRNS chunk",
      Self::DupPhys => "duplicate pHYs chunk",
      Self::DupTime => "duplicate tIME chunk",
      Self::Sbit => "invalid significant bits value",
      Self::PlteIdx => "palette index out of range",
      Self::TrnsColourType => "tRNS chunk with alpha-bearing colour type",
      Self::IdatTooShort => "IDAT stream too short",
      Self::IdatTooLong => "IDAT stream too long",
      Self::DataAfterIend => "data after IEND chunk",
      Self::IdatStream => "IDAT chunks are not contiguous",
      Self::Zlib => "zlib stream error",
      Self::Filter => "invalid scanline filter",
      Self::BkgdNoPlte => "bKGD palette index without PLTE",
      Self::BkgdPlteIdx => "bKGD palette index out of range",
      Self::TrnsNoPlte => "indexed tRNS without PLTE",
      Self::BufSiz => "output buffer too small",
      Self::Io => "i/o error",
      Self::Eof => "end of input",
      Self::BufSet => "input buffer already set",
      Self::BadState => "decoder in invalid state",
    }
  }
}

impl core::fmt::Display for PngError {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    write!(f, "{} (code {})", self.message(), self.code())
  }
}

impl core::error::Error for PngError {}

impl From<alloc::collections::TryReserveError> for PngError {
  #[inline]
  fn from(_: alloc::collections::TryReserveError) -> Self {
    Self::OutOfMemory
  }
}
impl From<TryFromIntError> for PngError {
  #[inline]
  fn from(_: TryFromIntError) -> Self {
    Self::Overflow
  }
}

#[test]
fn test_error_codes_are_stable() {
  assert_eq!(PngError::InvalidArgument.code(), 1);
  assert_eq!(PngError::NoIhdr.code(), 15);
  assert_eq!(PngError::ChunkCrc.code(), 52);
  assert_eq!(PngError::DupTime.code(), 65);
  assert_eq!(PngError::Filter.code(), 85);
  assert_eq!(PngError::BufSiz.code(), 120);
  assert_eq!(PngError::BadState.code(), 141);
  assert!(PngError::DupPlte.is_duplicate_chunk());
  assert!(!PngError::Sbit.is_duplicate_chunk());
}
