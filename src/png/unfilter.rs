//! Reversing the scanline filters and walking the (possibly interlaced)
//! reduced images back to full image positions.

use super::*;

/// The filter types a scanline can declare in its leading byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum PngFilterType {
  /// the bytes are stored as-is
  None = 0,
  /// difference from the byte one pixel to the left
  Sub = 1,
  /// difference from the byte above
  Up = 2,
  /// difference from the average of left and above
  Average = 3,
  /// difference from the Paeth predictor of left, above, and upper-left
  Paeth = 4,
}
impl TryFrom<u8> for PngFilterType {
  type Error = PngError;
  #[inline]
  fn try_from(value: u8) -> Result<Self, Self::Error> {
    Ok(match value {
      0 => Self::None,
      1 => Self::Sub,
      2 => Self::Up,
      3 => Self::Average,
      4 => Self::Paeth,
      _ => return Err(PngError::Filter),
    })
  }
}

/// Picks whichever of left (`a`), above (`b`), and upper-left (`c`) is
/// closest to `a + b - c`.
#[inline]
#[must_use]
pub const fn paeth_predict(a: u8, b: u8, c: u8) -> u8 {
  let a_ = a as i32;
  let b_ = b as i32;
  let c_ = c as i32;
  let p: i32 = a_ + b_ - c_;
  let pa = (p - a_).abs();
  let pb = (p - b_).abs();
  let pc = (p - c_).abs();
  // The order of these tests is fixed by PNG, ties go to `a`, then `b`.
  if pa <= pb && pa <= pc {
    a
  } else if pb <= pc {
    b
  } else {
    c
  }
}

/// Unfilters one line in place.
///
/// * `filter_chunk_size` is the distance back to the corresponding byte of the
///   pixel to the left.
/// * `prev` is the already unfiltered previous line of the same reduced image,
///   or `None` for the first line (which acts like a line of zeroes).
pub fn unfilter_line(
  filter: PngFilterType, filter_chunk_size: usize, prev: Option<&[u8]>, line: &mut [u8],
) {
  let bpp = filter_chunk_size;
  match (filter, prev) {
    (PngFilterType::None, _) | (PngFilterType::Up, None) => (),
    (PngFilterType::Sub, _) | (PngFilterType::Paeth, None) => {
      // with no line above, paeth always picks the left byte
      for i in bpp..line.len() {
        line[i] = line[i].wrapping_add(line[i - bpp]);
      }
    }
    (PngFilterType::Up, Some(b_line)) => {
      line.iter_mut().zip(b_line.iter().copied()).for_each(|(p, b)| *p = p.wrapping_add(b));
    }
    (PngFilterType::Average, None) => {
      for i in bpp..line.len() {
        line[i] = line[i].wrapping_add(line[i - bpp] / 2);
      }
    }
    (PngFilterType::Average, Some(b_line)) => {
      for i in 0..line.len() {
        let a = if i >= bpp { u32::from(line[i - bpp]) } else { 0 };
        let b = u32::from(b_line[i]);
        line[i] = line[i].wrapping_add(((a + b) / 2) as u8);
      }
    }
    (PngFilterType::Paeth, Some(b_line)) => {
      for i in 0..line.len() {
        let (a, c) = if i >= bpp { (line[i - bpp], b_line[i - bpp]) } else { (0, 0) };
        line[i] = line[i].wrapping_add(paeth_predict(a, b_line[i], c));
      }
    }
  }
}

/// Sends a filter chunk's worth of unfiltered data out to the `op`.
///
/// Bit-packed data gets one call per pixel, with the value in the low bits of a
/// single byte, stopping at the end of the reduced line (the rest are padding
/// bits). Otherwise the chunk is exactly one pixel.
fn send_out_pixel<F>(
  header: &IHDR, image_level: usize, reduced_width: u32, reduced_x: u32, reduced_y: u32,
  data: &[u8], op: &mut F,
) -> Result<(), PngError>
where
  F: FnMut(u32, u32, &[u8]) -> Result<(), PngError>,
{
  match header.bit_depth {
    depth @ (1 | 2 | 4) => {
      let full_data: u8 = data[0];
      let per_byte = u32::from(8 / depth);
      let mask = (1_u8 << depth) - 1;
      for plus_x in 0..per_byte {
        let r_x = reduced_x * per_byte + plus_x;
        if r_x >= reduced_width {
          break;
        }
        let down_shift = 8 - u32::from(depth) * (plus_x + 1);
        let (image_x, image_y) = interlaced_pos_to_full_pos(image_level, r_x, reduced_y);
        op(image_x, image_y, &[(full_data >> down_shift) & mask])?;
      }
      Ok(())
    }
    _ => {
      let (image_x, image_y) = interlaced_pos_to_full_pos(image_level, reduced_x, reduced_y);
      op(image_x, image_y, data)
    }
  }
}

/// Given the `header`, `decompressed` buffer, and a per-pixel `op`, unfilters
/// the data and passes each pixel output to the `op` as the unfiltering occurs.
///
/// Each call to the `op` gets `|x, y, data|` as arguments, where `x` and `y`
/// are the position of the pixel within the full image (relative to the top
/// left), and `data` is the unfiltered pixel at that location:
/// * Bit depths 1, 2, and 4 have the value in the low bits of a single byte.
/// * Bit depth 8 has one byte per channel.
/// * Bit depth 16 has two big-endian bytes per channel.
///
/// For interlaced images the pixels of each reduced image are sent in turn,
/// so every full image position gets exactly one call overall.
///
/// The data is unfiltered in place, and each filter byte is reset to the
/// "no filter" setting as it goes.
///
/// ## Failure
/// * [`PngError::Filter`] if a line has a filter type above 4.
/// * [`PngError::IdatTooShort`] if the buffer is smaller than the image needs.
/// * Any error the `op` returns, which stops the process immediately.
pub fn unfilter_decompressed_data<F>(
  header: &IHDR, mut decompressed: &mut [u8], mut op: F,
) -> Result<(), PngError>
where
  F: FnMut(u32, u32, &[u8]) -> Result<(), PngError>,
{
  let filter_chunk_size = header.filter_chunk_size();

  // Non-interlaced data is treated as interlaced data with just one "reduced"
  // image (level 0), which is the full image.
  for (image_level, reduced_width, reduced_height) in header.reduced_images() {
    if reduced_width == 0 || reduced_height == 0 {
      // while the full image's width and height must not be 0, the width or
      // height of any particular reduced image might still be 0.
      continue;
    }
    trace!("png: unfiltering level {image_level}, {reduced_width}x{reduced_height}");

    let bytes_per_filterline = header.bytes_per_filterline(reduced_width)?;
    let bytes_used_this_image = bytes_per_filterline
      .checked_mul(usize::try_from(reduced_height)?)
      .ok_or(PngError::Overflow)?;
    if decompressed.len() < bytes_used_this_image {
      return Err(PngError::IdatTooShort);
    }
    let (these_bytes, more_bytes) =
      core::mem::take(&mut decompressed).split_at_mut(bytes_used_this_image);
    decompressed = more_bytes;

    let mut b_pixels: Option<&[u8]> = None;
    for (reduced_y, line) in these_bytes.chunks_exact_mut(bytes_per_filterline).enumerate() {
      let (f, pixels) = line.split_at_mut(1);
      let filter = PngFilterType::try_from(f[0])?;
      unfilter_line(filter, filter_chunk_size, b_pixels, pixels);
      f[0] = 0;
      for (reduced_x, pixel) in pixels.chunks_exact(filter_chunk_size).enumerate() {
        send_out_pixel(
          header,
          image_level,
          reduced_width,
          reduced_x as u32,
          reduced_y as u32,
          pixel,
          &mut op,
        )?;
      }
      b_pixels = Some(pixels);
    }
  }

  Ok(())
}
