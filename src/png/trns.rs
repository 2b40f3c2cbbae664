use super::*;

/// `tRNS`: Transparency
///
/// Stores additional transparency data.
///
/// * `Y` and `RGB` each store a single color. All samples of that color in the
///   image are fully transparent (alpha 0), while the rest are fully opaque
///   (alpha maximum). The `tRNS` chunk always uses a `u16` to store the value,
///   even if the image's bit depth is less than 16, and the comparison is
///   against the raw sample value.
/// * `Index` has an alpha value that goes along with the rest of the palette
///   data. The transparency slice can be shorter than the palette, and all
///   missing entries have an alpha value of 255.
///
/// The variant is picked by the image's color type, never by the data length.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[allow(nonstandard_style)]
pub enum tRNS<'b> {
  /// greyscale images
  Y {
    /// the transparent grey sample
    y: u16,
  },
  /// truecolor images
  RGB {
    /// red sample
    r: u16,
    /// green sample
    g: u16,
    /// blue sample
    b: u16,
  },
  /// indexed images
  Index {
    /// one alpha per palette entry, possibly fewer than the palette has
    alphas: &'b [u8],
  },
}
impl<'b> tRNS<'b> {
  /// Parses the chunk according to the image's color type.
  ///
  /// ## Failure
  /// * Color types that already have alpha can't have this chunk.
  /// * Indexed images need the palette to come first, and can't have more
  ///   alpha entries than palette entries.
  pub fn parse(data: &'b [u8], ihdr: &IHDR, plte: Option<&PLTE<'_>>) -> Result<Self, PngError> {
    Ok(match ihdr.color_type {
      PngColorType::Y => match *data {
        [y0, y1] => tRNS::Y { y: u16::from_be_bytes([y0, y1]) },
        _ => return Err(PngError::ChunkSize),
      },
      PngColorType::RGB => match *data {
        [r0, r1, g0, g1, b0, b1] => tRNS::RGB {
          r: u16::from_be_bytes([r0, r1]),
          g: u16::from_be_bytes([g0, g1]),
          b: u16::from_be_bytes([b0, b1]),
        },
        _ => return Err(PngError::ChunkSize),
      },
      PngColorType::Index => {
        let plte = plte.ok_or(PngError::TrnsNoPlte)?;
        if data.is_empty() || data.len() > plte.len() {
          return Err(PngError::ChunkSize);
        }
        tRNS::Index { alphas: data }
      }
      PngColorType::YA | PngColorType::RGBA => return Err(PngError::TrnsColourType),
    })
  }

  /// The alpha of a palette index, or `None` if this isn't indexed data.
  #[inline]
  #[must_use]
  pub fn index_alpha(&self, index: u8) -> Option<u8> {
    match self {
      Self::Index { alphas } => Some(alphas.get(usize::from(index)).copied().unwrap_or(u8::MAX)),
      _ => None,
    }
  }
}
impl Debug for tRNS<'_> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    match self {
      Self::Y { y } => f.debug_struct("Y").field("y", y).finish(),
      Self::RGB { r, g, b } => {
        f.debug_struct("RGB").field("r", r).field("g", g).field("b", b).finish()
      }
      Self::Index { alphas } => {
        f.debug_tuple("Index").field(&&alphas[..alphas.len().min(12)]).field(&alphas.len()).finish()
      }
    }
  }
}
