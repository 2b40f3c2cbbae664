//! Writing unfiltered pixels into the caller's buffer in the requested
//! output format.

use super::*;

use crate::bit_depth_changes::{sample_to_u16, sample_to_u8};

/// The pixel layouts that a decode can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u32)]
pub enum DecodeFormat {
  /// The image's own sample encoding, deinterlaced and with the filter bytes
  /// removed.
  ///
  /// Each row starts on a byte boundary. Samples below 8 bits stay packed
  /// with the leftmost pixel in the high bits, and 16-bit samples stay big
  /// endian.
  Png = 1,
  /// [`RGBA8`] pixels.
  Rgba8 = 2,
  /// [`RGBA16`] pixels, with native endian channels.
  Rgba16 = 3,
}
impl TryFrom<u32> for DecodeFormat {
  type Error = PngError;
  #[inline]
  fn try_from(value: u32) -> Result<Self, Self::Error> {
    Ok(match value {
      1 => Self::Png,
      2 => Self::Rgba8,
      3 => Self::Rgba16,
      _ => return Err(PngError::InvalidArgument),
    })
  }
}

/// The exact number of bytes a decode of this image in `fmt` writes.
pub fn output_image_size(ihdr: &IHDR, fmt: DecodeFormat) -> Result<usize, PngError> {
  let height = usize::try_from(ihdr.height)?;
  let row_bytes = match fmt {
    DecodeFormat::Png => ihdr.bytes_per_scanline(ihdr.width)?,
    DecodeFormat::Rgba8 => usize::try_from(ihdr.width)?
      .checked_mul(core::mem::size_of::<RGBA8>())
      .ok_or(PngError::Overflow)?,
    DecodeFormat::Rgba16 => usize::try_from(ihdr.width)?
      .checked_mul(core::mem::size_of::<RGBA16>())
      .ok_or(PngError::Overflow)?,
  };
  row_bytes.checked_mul(height).ok_or(PngError::Overflow)
}

/// Places individual pixels (as given by [`unfilter_decompressed_data`]) into
/// an output buffer.
pub(crate) struct PixelWriter<'o, 'b> {
  ihdr: IHDR,
  fmt: DecodeFormat,
  plte: Option<PLTE<'b>>,
  trns: Option<tRNS<'b>>,
  row_bytes: usize,
  out: &'o mut [u8],
}
impl<'o, 'b> PixelWriter<'o, 'b> {
  /// Prepares to write into `out`, which must be at least
  /// [`output_image_size`] bytes.
  ///
  /// Packed rows are built up with bitwise-or, so for sub-byte depths with
  /// [`DecodeFormat::Png`] the output area is cleared first.
  pub(crate) fn new(
    ihdr: &IHDR, meta: &PngMetadata<'b>, fmt: DecodeFormat, out: &'o mut [u8],
  ) -> Result<Self, PngError> {
    let size = output_image_size(ihdr, fmt)?;
    let out = out.get_mut(..size).ok_or(PngError::BufSiz)?;
    let row_bytes = match fmt {
      DecodeFormat::Png => ihdr.bytes_per_scanline(ihdr.width)?,
      DecodeFormat::Rgba8 => ihdr.width as usize * core::mem::size_of::<RGBA8>(),
      DecodeFormat::Rgba16 => ihdr.width as usize * core::mem::size_of::<RGBA16>(),
    };
    if fmt == DecodeFormat::Png && ihdr.bit_depth < 8 {
      out.fill(0);
    }
    Ok(Self { ihdr: *ihdr, fmt, plte: meta.plte, trns: meta.trns, row_bytes, out })
  }

  /// Writes the pixel for full image position `(x, y)`.
  pub(crate) fn put(&mut self, x: u32, y: u32, data: &[u8]) -> Result<(), PngError> {
    match self.fmt {
      DecodeFormat::Png => self.put_native(x, y, data),
      DecodeFormat::Rgba8 => {
        let (depth, channels) = self.channels(data)?;
        let px = RGBA8 {
          r: sample_to_u8(depth, channels[0]),
          g: sample_to_u8(depth, channels[1]),
          b: sample_to_u8(depth, channels[2]),
          a: sample_to_u8(depth, channels[3]),
        };
        self.dest(x, y, core::mem::size_of::<RGBA8>())?.copy_from_slice(bytemuck::bytes_of(&px));
        Ok(())
      }
      DecodeFormat::Rgba16 => {
        let (depth, channels) = self.channels(data)?;
        let px = RGBA16 {
          r: sample_to_u16(depth, channels[0]),
          g: sample_to_u16(depth, channels[1]),
          b: sample_to_u16(depth, channels[2]),
          a: sample_to_u16(depth, channels[3]),
        };
        self.dest(x, y, core::mem::size_of::<RGBA16>())?.copy_from_slice(bytemuck::bytes_of(&px));
        Ok(())
      }
    }
  }

  fn dest(&mut self, x: u32, y: u32, pixel_bytes: usize) -> Result<&mut [u8], PngError> {
    let start = y as usize * self.row_bytes + x as usize * pixel_bytes;
    self.out.get_mut(start..start + pixel_bytes).ok_or(PngError::BufSiz)
  }

  fn put_native(&mut self, x: u32, y: u32, data: &[u8]) -> Result<(), PngError> {
    if self.ihdr.color_type == PngColorType::Index {
      self.palette_entry(data[0])?;
    }
    let depth = usize::from(self.ihdr.bit_depth);
    if depth < 8 {
      let bit = x as usize * depth;
      let shift = 8 - depth - (bit % 8);
      let i = y as usize * self.row_bytes + bit / 8;
      let byte = self.out.get_mut(i).ok_or(PngError::BufSiz)?;
      *byte |= data[0] << shift;
      Ok(())
    } else {
      self.dest(x, y, data.len())?.copy_from_slice(data);
      Ok(())
    }
  }

  fn palette_entry(&self, index: u8) -> Result<RGB8, PngError> {
    self
      .plte
      .and_then(|plte| plte.entries().get(usize::from(index)).copied())
      .ok_or(PngError::PlteIdx)
  }

  /// The RGBA channels of a pixel along with the bit depth they're stored at.
  ///
  /// Grey is spread to all three color channels. Alpha comes from the pixel
  /// itself, or from a `tRNS` match on the raw samples, or is fully opaque.
  fn channels(&self, data: &[u8]) -> Result<(u8, [u16; 4]), PngError> {
    let depth = self.ihdr.bit_depth;
    let opaque: u16 = if depth == 16 { u16::MAX } else { (1 << depth) - 1 };
    let sample = |i: usize| -> u16 {
      if depth == 16 {
        u16::from_be_bytes([data[2 * i], data[2 * i + 1]])
      } else {
        u16::from(data[i])
      }
    };
    Ok(match self.ihdr.color_type {
      PngColorType::Y => {
        let y = sample(0);
        let a = match self.trns {
          Some(tRNS::Y { y: t }) if t == y => 0,
          _ => opaque,
        };
        (depth, [y, y, y, a])
      }
      PngColorType::RGB => {
        let (r, g, b) = (sample(0), sample(1), sample(2));
        let a = match self.trns {
          Some(tRNS::RGB { r: tr, g: tg, b: tb }) if (tr, tg, tb) == (r, g, b) => 0,
          _ => opaque,
        };
        (depth, [r, g, b, a])
      }
      PngColorType::Index => {
        let index = data[0];
        let RGB8 { r, g, b } = self.palette_entry(index)?;
        let a = self.trns.and_then(|t| t.index_alpha(index)).unwrap_or(u8::MAX);
        (8, [r, g, b, a].map(u16::from))
      }
      PngColorType::YA => {
        let (y, a) = (sample(0), sample(1));
        (depth, [y, y, y, a])
      }
      PngColorType::RGBA => (depth, [sample(0), sample(1), sample(2), sample(3)]),
    })
  }
}
