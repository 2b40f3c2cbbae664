use super::*;

/// The rendering intents an `sRGB` chunk can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PngSrgbIntent {
  /// for images preferring good adaptation to the output device gamut at the
  /// expense of colorimetric accuracy, such as photographs.
  Perceptual = 0,
  /// for images requiring colour appearance matching (relative to the output
  /// device white point), such as logos.
  RelativeColorimetric = 1,
  /// for images preferring preservation of saturation at the expense of hue and
  /// lightness, such as charts and graphs.
  Saturation = 2,
  /// for images requiring preservation of absolute colorimetry, such as
  /// previews of images destined for a different output device (proofs).
  AbsoluteColorimetric = 3,
}

/// `sRGB`: Standard RGB colour space
///
/// If the `sRGB` chunk is present, the image samples conform to the
/// [sRGB](https://en.wikipedia.org/wiki/SRGB) colour space, and should be
/// displayed using the rendering intent given.
///
/// The intent byte is kept as stored. Values above 3 aren't defined by PNG,
/// in which case [`intent`](Self::intent) gives `None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(nonstandard_style)]
pub struct sRGB {
  /// the raw rendering intent byte
  pub rendering_intent: u8,
}
impl sRGB {
  /// The rendering intent, if it's a known value.
  #[inline]
  #[must_use]
  pub const fn intent(&self) -> Option<PngSrgbIntent> {
    Some(match self.rendering_intent {
      0 => PngSrgbIntent::Perceptual,
      1 => PngSrgbIntent::RelativeColorimetric,
      2 => PngSrgbIntent::Saturation,
      3 => PngSrgbIntent::AbsoluteColorimetric,
      _ => return None,
    })
  }
}
impl TryFrom<&[u8]> for sRGB {
  type Error = PngError;
  #[inline]
  fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
    match *data {
      [rendering_intent] => Ok(Self { rendering_intent }),
      _ => Err(PngError::ChunkSize),
    }
  }
}
