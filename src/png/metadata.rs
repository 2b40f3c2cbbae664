use super::*;

/// Everything the chunk scan learned about a PNG, other than the header.
///
/// Each ancillary record is present only if its chunk was in the stream, and
/// each one appears at most once. The records that borrow (`PLTE`, `iCCP`,
/// `hIST`, and indexed `tRNS`) point into the decoder's input buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[allow(missing_docs)]
pub struct PngMetadata<'b> {
  pub plte: Option<PLTE<'b>>,
  pub chrm: Option<cHRM>,
  pub gama: Option<gAMA>,
  pub iccp: Option<iCCP<'b>>,
  pub sbit: Option<sBIT>,
  pub srgb: Option<sRGB>,
  pub bkgd: Option<bKGD>,
  pub hist: Option<hIST<'b>>,
  pub trns: Option<tRNS<'b>>,
  pub phys: Option<pHYs>,
  pub time: Option<tIME>,
  /// The first `IDAT` chunk of the stream.
  pub first_idat: Option<ChunkSpan>,
  /// The last `IDAT` chunk of the stream.
  pub last_idat: Option<ChunkSpan>,
}
impl<'b> PngMetadata<'b> {
  /// If the image has an embedded ICC profile.
  #[inline]
  #[must_use]
  pub const fn has_iccp(&self) -> bool {
    self.iccp.is_some()
  }
}
