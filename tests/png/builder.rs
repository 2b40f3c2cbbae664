//! Building PNG datastreams in memory.

use miniz_oxide::deflate::compress_to_vec_zlib;
use strict_png::png::*;

pub const Y: u8 = 0;
pub const RGB: u8 = 2;
pub const INDEX: u8 = 3;
pub const YA: u8 = 4;
pub const RGBA: u8 = 6;

/// Every legal color type, with its channel count and bit depths.
pub const ALL_FORMATS: [(u8, usize, &[u8]); 5] = [
  (Y, 1, &[1, 2, 4, 8, 16]),
  (RGB, 3, &[8, 16]),
  (INDEX, 1, &[1, 2, 4, 8]),
  (YA, 2, &[8, 16]),
  (RGBA, 4, &[8, 16]),
];

pub fn chunk(ty: &[u8; 4], data: &[u8]) -> Vec<u8> {
  let mut crc = crc32fast::Hasher::new();
  crc.update(ty);
  crc.update(data);
  let mut v = Vec::with_capacity(12 + data.len());
  v.extend_from_slice(&(data.len() as u32).to_be_bytes());
  v.extend_from_slice(ty);
  v.extend_from_slice(data);
  v.extend_from_slice(&crc.finalize().to_be_bytes());
  v
}

pub fn ihdr_data(width: u32, height: u32, bit_depth: u8, color_type: u8, interlace: u8) -> Vec<u8> {
  let mut v = Vec::new();
  v.extend_from_slice(&width.to_be_bytes());
  v.extend_from_slice(&height.to_be_bytes());
  v.extend_from_slice(&[bit_depth, color_type, 0, 0, interlace]);
  v
}

/// Appends chunks one at a time, in whatever order the test wants.
#[derive(Debug, Clone, Default)]
pub struct PngBuilder {
  bytes: Vec<u8>,
}
impl PngBuilder {
  pub fn new() -> Self {
    Self { bytes: Vec::from(PNG_SIGNATURE) }
  }
  pub fn chunk(mut self, ty: &[u8; 4], data: &[u8]) -> Self {
    self.bytes.extend(chunk(ty, data));
    self
  }
  pub fn ihdr(self, width: u32, height: u32, bit_depth: u8, color_type: u8, interlace: u8) -> Self {
    self.chunk(b"IHDR", &ihdr_data(width, height, bit_depth, color_type, interlace))
  }
  /// Compresses the filtered scanlines into a single `IDAT`.
  pub fn idat(self, scanlines: &[u8]) -> Self {
    self.chunk(b"IDAT", &compress_to_vec_zlib(scanlines, 6))
  }
  /// Compresses the filtered scanlines and splits them over `count` `IDAT`s.
  pub fn split_idat(mut self, scanlines: &[u8], count: usize) -> Self {
    let z = compress_to_vec_zlib(scanlines, 6);
    let per = (z.len() + count - 1) / count;
    for part in z.chunks(per) {
      self = self.chunk(b"IDAT", part);
    }
    self
  }
  pub fn iend(self) -> Self {
    self.chunk(b"IEND", &[])
  }
  pub fn build(self) -> Vec<u8> {
    self.bytes
  }
}

/// Packs one row of samples at the given bit depth, leftmost sample in the
/// high bits, 16-bit samples big endian.
pub fn pack_row(bit_depth: u8, samples: &[u16]) -> Vec<u8> {
  match bit_depth {
    8 => samples.iter().map(|&s| s as u8).collect(),
    16 => samples.iter().flat_map(|&s| s.to_be_bytes()).collect(),
    depth => {
      let per_byte = usize::from(8 / depth);
      samples
        .chunks(per_byte)
        .map(|chunk| {
          let mut byte = 0_u8;
          for (i, &s) in chunk.iter().enumerate() {
            byte |= (s as u8) << (8 - usize::from(depth) * (i + 1));
          }
          byte
        })
        .collect()
    }
  }
}

/// Makes the (unfiltered, filter type 0) scanlines for an image, calling
/// `sample(x, y, channel)` for each sample.
pub fn raw_scanlines(
  width: u32, height: u32, bit_depth: u8, channels: usize, interlaced: bool,
  sample: impl Fn(u32, u32, usize) -> u16,
) -> Vec<u8> {
  let dims = reduced_image_dimensions(width, height);
  let levels = if interlaced { 1..8 } else { 0..1 };
  let mut out = Vec::new();
  for level in levels {
    let (rw, rh) = dims[level];
    if rw == 0 || rh == 0 {
      continue;
    }
    for ry in 0..rh {
      let mut samples = Vec::new();
      for rx in 0..rw {
        let (x, y) = interlaced_pos_to_full_pos(level, rx, ry);
        for c in 0..channels {
          samples.push(sample(x, y, c));
        }
      }
      out.push(0);
      out.extend(pack_row(bit_depth, &samples));
    }
  }
  out
}

pub fn paeth(a: u8, b: u8, c: u8) -> u8 {
  let p = i16::from(a) + i16::from(b) - i16::from(c);
  let pa = (p - i16::from(a)).abs();
  let pb = (p - i16::from(b)).abs();
  let pc = (p - i16::from(c)).abs();
  if pa <= pb && pa <= pc {
    a
  } else if pb <= pc {
    b
  } else {
    c
  }
}

/// Applies a PNG filter to one line, the way an encoder would.
pub fn filter_line(filter: u8, bpp: usize, prev: &[u8], line: &[u8]) -> Vec<u8> {
  (0..line.len())
    .map(|i| {
      let a = if i >= bpp { line[i - bpp] } else { 0 };
      let b = prev[i];
      let c = if i >= bpp { prev[i - bpp] } else { 0 };
      let predicted = match filter {
        0 => 0,
        1 => a,
        2 => b,
        3 => ((u16::from(a) + u16::from(b)) / 2) as u8,
        4 => paeth(a, b, c),
        _ => panic!("no filter type {filter}"),
      };
      line[i].wrapping_sub(predicted)
    })
    .collect()
}

/// Re-filters the unfiltered scanlines from [`raw_scanlines`], cycling
/// through the filter types line by line, `first_filter` on the first line.
///
/// The first line of each reduced image is filtered against a line of zeroes.
pub fn refilter_scanlines(
  raw: &[u8], width: u32, height: u32, bit_depth: u8, channels: usize, interlaced: bool,
  first_filter: u8,
) -> Vec<u8> {
  let bits_per_pixel = usize::from(bit_depth) * channels;
  let bpp = (bits_per_pixel / 8).max(1);
  let dims = reduced_image_dimensions(width, height);
  let levels = if interlaced { 1..8 } else { 0..1 };
  let mut out = Vec::with_capacity(raw.len());
  let mut rest = raw;
  let mut filter = first_filter % 5;
  for level in levels {
    let (rw, rh) = dims[level];
    if rw == 0 || rh == 0 {
      continue;
    }
    let line_len = (rw as usize * bits_per_pixel + 7) / 8;
    let mut prev = vec![0; line_len];
    for _ in 0..rh {
      let (line, more) = rest.split_at(1 + line_len);
      assert_eq!(line[0], 0, "expected unfiltered input");
      out.push(filter);
      out.extend(filter_line(filter, bpp, &prev, &line[1..]));
      prev.copy_from_slice(&line[1..]);
      rest = more;
      filter = (filter + 1) % 5;
    }
  }
  assert!(rest.is_empty());
  out
}

/// Decodes the whole thing in one go.
pub fn decode(png: &[u8], fmt: DecodeFormat) -> Result<Vec<u8>, strict_png::PngError> {
  let mut d = Decoder::new();
  d.set_buffer(png)?;
  let mut out = vec![0; d.get_output_image_size(fmt)?];
  d.decode_image(fmt, &mut out, DecodeFlags::NONE)?;
  Ok(out)
}
