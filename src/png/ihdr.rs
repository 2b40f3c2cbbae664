use super::*;

/// Width and height are capped at this value by the PNG format.
pub const PNG_MAX_DIMENSION: u32 = (1 << 31) - 1;

/// The types of color that PNG supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PngColorType {
  /// Greyscale
  Y = 0,
  /// Red, Green, Blue
  RGB = 2,
  /// Index into a palette.
  ///
  /// The palette will have RGB8 data. There may optionally be a transparency
  /// chunk.
  Index = 3,
  /// Greyscale + Alpha
  YA = 4,
  /// Red, Green, Blue, Alpha
  RGBA = 6,
}
impl PngColorType {
  /// The number of channels in this type of color.
  #[inline]
  #[must_use]
  pub const fn channel_count(self) -> usize {
    match self {
      Self::Y => 1,
      Self::RGB => 3,
      Self::Index => 1,
      Self::YA => 2,
      Self::RGBA => 4,
    }
  }

  /// If the given bit depth is allowed with this color type.
  #[inline]
  #[must_use]
  pub const fn allows_bit_depth(self, bit_depth: u8) -> bool {
    match self {
      Self::Y => matches!(bit_depth, 1 | 2 | 4 | 8 | 16),
      Self::Index => matches!(bit_depth, 1 | 2 | 4 | 8),
      Self::RGB | Self::YA | Self::RGBA => matches!(bit_depth, 8 | 16),
    }
  }

  /// If a `PLTE` chunk may appear with this color type.
  ///
  /// It's required for `Index`, and optional (a suggested palette) for `RGB`
  /// and `RGBA`.
  #[inline]
  #[must_use]
  pub const fn allows_palette(self) -> bool {
    matches!(self, Self::RGB | Self::Index | Self::RGBA)
  }
}
impl TryFrom<u8> for PngColorType {
  type Error = PngError;
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => PngColorType::Y,
      2 => PngColorType::RGB,
      3 => PngColorType::Index,
      4 => PngColorType::YA,
      6 => PngColorType::RGBA,
      _ => return Err(PngError::ColourType),
    })
  }
}

/// Caller supplied caps on the image dimensions.
///
/// Images over these limits are rejected as soon as the header is parsed,
/// before anything is allocated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PngLimits {
  /// max width in pixels
  pub max_width: u32,
  /// max height in pixels
  pub max_height: u32,
}
impl Default for PngLimits {
  #[inline]
  fn default() -> Self {
    Self { max_width: PNG_MAX_DIMENSION, max_height: PNG_MAX_DIMENSION }
  }
}

/// `IHDR`: Image header
///
/// Once parsed this is never modified, and it governs how every later chunk
/// is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IHDR {
  /// width in pixels
  pub width: u32,
  /// height in pixels
  pub height: u32,
  /// bits per channel
  pub bit_depth: u8,
  /// pixel color type
  pub color_type: PngColorType,
  /// always 0
  pub compression_method: u8,
  /// always 0
  pub filter_method: u8,
  /// if the image data is stored interlaced with the Adam7 method.
  pub is_interlaced: bool,
}
impl IHDR {
  /// Parses and validates the payload of an `IHDR` chunk.
  ///
  /// Checks are done in a fixed order, so a header with more than one problem
  /// always reports the same one: width, height, the user limits, color type,
  /// bit depth, compression method, filter method, interlace method.
  pub fn parse(data: &[u8], limits: PngLimits) -> Result<Self, PngError> {
    let Ok(bytes) = <[u8; 13]>::try_from(data) else {
      return Err(PngError::IhdrSize);
    };
    let [w0, w1, w2, w3, h0, h1, h2, h3, bit_depth, color_type, methods @ ..] = bytes;
    let [compression_method, filter_method, interlace_method] = methods;
    let width = u32::from_be_bytes([w0, w1, w2, w3]);
    let height = u32::from_be_bytes([h0, h1, h2, h3]);
    if width == 0 || width > PNG_MAX_DIMENSION {
      return Err(PngError::Width);
    }
    if height == 0 || height > PNG_MAX_DIMENSION {
      return Err(PngError::Height);
    }
    if width > limits.max_width {
      return Err(PngError::UserWidth);
    }
    if height > limits.max_height {
      return Err(PngError::UserHeight);
    }
    let color_type = PngColorType::try_from(color_type)?;
    if !color_type.allows_bit_depth(bit_depth) {
      return Err(PngError::BitDepth);
    }
    if compression_method != 0 {
      return Err(PngError::CompressionMethod);
    }
    if filter_method != 0 {
      return Err(PngError::FilterMethod);
    }
    let is_interlaced = match interlace_method {
      0 => false,
      1 => true,
      _ => return Err(PngError::InterlaceMethod),
    };
    Ok(Self {
      width,
      height,
      bit_depth,
      color_type,
      compression_method,
      filter_method,
      is_interlaced,
    })
  }

  /// The interlace method byte as it's stored in the file.
  #[inline]
  #[must_use]
  pub const fn interlace_method(&self) -> u8 {
    self.is_interlaced as u8
  }

  /// Bits used by one pixel.
  #[inline]
  #[must_use]
  pub const fn bits_per_pixel(&self) -> usize {
    (self.bit_depth as usize) * self.color_type.channel_count()
  }

  /// Filtering works on whole bytes. This is the distance back to the
  /// "previous pixel" when unfiltering: the byte size of a pixel, but never
  /// less than 1.
  #[inline]
  #[must_use]
  pub const fn filter_chunk_size(&self) -> usize {
    let bytes = self.bits_per_pixel() / 8;
    if bytes == 0 {
      1
    } else {
      bytes
    }
  }

  /// Bytes of pixel data in one scanline of the given width, not counting the
  /// filter byte. Partial bytes at the end of a line are rounded up.
  #[inline]
  pub fn bytes_per_scanline(&self, width: u32) -> Result<usize, PngError> {
    let bits =
      self.bits_per_pixel().checked_mul(usize::try_from(width)?).ok_or(PngError::Overflow)?;
    Ok(bits / 8 + usize::from(bits % 8 != 0))
  }

  /// Bytes in one filtered line of the given width: the filter type byte
  /// plus the scanline.
  #[inline]
  pub fn bytes_per_filterline(&self, width: u32) -> Result<usize, PngError> {
    self.bytes_per_scanline(width)?.checked_add(1).ok_or(PngError::Overflow)
  }

  /// Gets the number of bytes that Zlib decompression must produce, exactly.
  ///
  /// * Interlaced images sum the filtered sizes of all 7 reduced images
  ///   (reduced images with a zero dimension contribute nothing).
  /// * Non-interlaced images are just `height` filtered lines.
  pub fn get_zlib_decompression_requirement(&self) -> Result<usize, PngError> {
    let mut total = 0_usize;
    for (_, w, h) in self.reduced_images() {
      if w == 0 || h == 0 {
        continue;
      }
      let this_image =
        self.bytes_per_filterline(w)?.checked_mul(usize::try_from(h)?).ok_or(PngError::Overflow)?;
      total = total.checked_add(this_image).ok_or(PngError::Overflow)?;
    }
    Ok(total)
  }

  /// The `(level, width, height)` of each image stored in the data stream.
  ///
  /// Non-interlaced images are a single image at level 0, interlaced images
  /// are the reduced images of levels 1 through 7.
  pub(crate) fn reduced_images(&self) -> impl Iterator<Item = (usize, u32, u32)> {
    let (skip, take) = if self.is_interlaced { (1, 7) } else { (0, 1) };
    reduced_image_dimensions(self.width, self.height)
      .into_iter()
      .enumerate()
      .map(|(i, (w, h))| (i, w, h))
      .skip(skip)
      .take(take)
  }
}

/// Given the dimensions of the full PNG image, computes the size of each
/// reduced image.
///
/// The PNG interlacing scheme converts a full image to 7 reduced images, each
/// with potentially separate dimensions. Knowing the size of each reduced image
/// is important for the unfiltering process.
///
/// The output uses index 0 as the base image size, and indexes 1 through 7 for
/// the size of reduced images 1 through 7.
#[inline]
#[must_use]
pub const fn reduced_image_dimensions(full_width: u32, full_height: u32) -> [(u32, u32); 8] {
  // ```
  // 1 6 4 6 2 6 4 6
  // 7 7 7 7 7 7 7 7
  // 5 6 5 6 5 6 5 6
  // 7 7 7 7 7 7 7 7
  // 3 6 4 6 3 6 4 6
  // 7 7 7 7 7 7 7 7
  // 5 6 5 6 5 6 5 6
  // 7 7 7 7 7 7 7 7
  // ```
  let mut out = [(full_width, full_height); 8];
  let mut level = 1;
  while level < 8 {
    let (x0, y0, dx, dy) = ADAM7[level - 1];
    out[level] = (pass_extent(full_width, x0, dx), pass_extent(full_height, y0, dy));
    level += 1;
  }
  out
}

/// `(x_start, y_start, x_step, y_step)` of the Adam7 passes 1 through 7.
const ADAM7: [(u32, u32, u32, u32); 7] = [
  (0, 0, 8, 8),
  (4, 0, 8, 8),
  (0, 4, 4, 8),
  (2, 0, 4, 4),
  (0, 2, 2, 4),
  (1, 0, 2, 2),
  (0, 1, 1, 2),
];

/// How many of `0..full` are hit starting at `start` and stepping by `step`.
#[inline]
#[must_use]
const fn pass_extent(full: u32, start: u32, step: u32) -> u32 {
  if full <= start {
    0
  } else {
    // can't overflow: full - start - 1 < full
    (full - start - 1) / step + 1
  }
}

/// Converts a reduced image location into the full image location.
///
/// For consistency between this function and the [reduced_image_dimensions]
/// function, when giving an `image_level` of 0 the output will be the same as
/// the input.
///
/// Levels above 7 aren't a thing, and are also treated as level 0.
#[inline]
#[must_use]
pub const fn interlaced_pos_to_full_pos(
  image_level: usize, reduced_x: u32, reduced_y: u32,
) -> (u32, u32) {
  if image_level == 0 || image_level > 7 {
    return (reduced_x, reduced_y);
  }
  let (x0, y0, dx, dy) = ADAM7[image_level - 1];
  (reduced_x * dx + x0, reduced_y * dy + y0)
}
