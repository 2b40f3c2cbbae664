use super::*;
use strict_png::{bit_depth_changes::sample_to_u8, PngError, RGBA16, RGBA8};

const FORMATS: [DecodeFormat; 3] = [DecodeFormat::Png, DecodeFormat::Rgba8, DecodeFormat::Rgba16];

fn max_sample(bit_depth: u8) -> u32 {
  if bit_depth == 16 {
    0xFFFF
  } else {
    (1 << bit_depth) - 1
  }
}

fn palette_len(bit_depth: u8) -> u32 {
  (1_u32 << bit_depth).min(5)
}

/// A deterministic sample pattern that hits a spread of values.
fn pattern(color_type: u8, bit_depth: u8) -> impl Fn(u32, u32, usize) -> u16 {
  let limit = if color_type == INDEX { palette_len(bit_depth) } else { max_sample(bit_depth) + 1 };
  move |x, y, c| ((x * 7 + y * 13 + c as u32 * 3) % limit) as u16
}

fn palette_bytes(bit_depth: u8) -> Vec<u8> {
  (0..palette_len(bit_depth) as u8).flat_map(|i| [i * 10, i * 20 + 1, i * 30 + 2]).collect()
}

fn to_rgba8(bytes: &[u8]) -> Vec<RGBA8> {
  bytes.chunks_exact(4).map(bytemuck::pod_read_unaligned).collect()
}

#[test]
fn test_one_pixel_grey() {
  let png = PngBuilder::new().ihdr(1, 1, 8, Y, 0).idat(&[0, 0]).iend().build();
  assert_eq!(decode(&png, DecodeFormat::Rgba8).unwrap(), [0, 0, 0, 255]);
  assert_eq!(decode(&png, DecodeFormat::Png).unwrap(), [0]);
}

#[test]
fn test_output_size_matches_output() {
  for (color_type, channels, depths) in ALL_FORMATS {
    for &bit_depth in depths {
      for interlace in [0, 1] {
        let (w, h) = (7, 5);
        let sample = pattern(color_type, bit_depth);
        let raw = raw_scanlines(w, h, bit_depth, channels, interlace == 1, sample);
        let mut b = PngBuilder::new().ihdr(w, h, bit_depth, color_type, interlace);
        if color_type == INDEX {
          b = b.chunk(b"PLTE", &palette_bytes(bit_depth));
        }
        let png = b.idat(&raw).iend().build();
        let row_bits = w as usize * channels * usize::from(bit_depth);
        let expected = [(row_bits + 7) / 8 * h as usize, 4 * 35, 8 * 35];
        for (fmt, expected) in FORMATS.into_iter().zip(expected) {
          let out = decode(&png, fmt).unwrap();
          assert_eq!(out.len(), expected, "{color_type} {bit_depth} {fmt:?}");
        }
      }
    }
  }
}

#[test]
fn test_alpha_without_trns_is_opaque() {
  for (color_type, channels, depths) in ALL_FORMATS {
    for &bit_depth in depths {
      let (w, h) = (6, 3);
      let sample = pattern(color_type, bit_depth);
      let raw = raw_scanlines(w, h, bit_depth, channels, false, &sample);
      let mut b = PngBuilder::new().ihdr(w, h, bit_depth, color_type, 0);
      if color_type == INDEX {
        b = b.chunk(b"PLTE", &palette_bytes(bit_depth));
      }
      let png = b.idat(&raw).iend().build();
      let pixels = to_rgba8(&decode(&png, DecodeFormat::Rgba8).unwrap());
      for (i, px) in pixels.iter().enumerate() {
        let (x, y) = (i as u32 % w, i as u32 / w);
        let expected_alpha = match color_type {
          YA => sample_to_u8(bit_depth, sample(x, y, 1)),
          RGBA => sample_to_u8(bit_depth, sample(x, y, 3)),
          _ => 255,
        };
        assert_eq!(px.a, expected_alpha, "{color_type} {bit_depth} ({x},{y})");
        let expected_red = match color_type {
          INDEX => sample(x, y, 0) as u8 * 10,
          _ => sample_to_u8(bit_depth, sample(x, y, 0)),
        };
        assert_eq!(px.r, expected_red, "{color_type} {bit_depth} ({x},{y})");
      }
    }
  }
}

#[test]
fn test_trns_makes_matching_samples_transparent() {
  for (color_type, channels, depths) in ALL_FORMATS {
    if matches!(color_type, YA | RGBA) {
      continue;
    }
    for &bit_depth in depths {
      let (w, h) = (6, 3);
      let sample = pattern(color_type, bit_depth);
      let raw = raw_scanlines(w, h, bit_depth, channels, false, &sample);
      let key: Vec<u16> = (0..channels).map(|c| sample(0, 0, c)).collect();
      let mut b = PngBuilder::new().ihdr(w, h, bit_depth, color_type, 0);
      let trns: Vec<u8> = if color_type == INDEX {
        b = b.chunk(b"PLTE", &palette_bytes(bit_depth));
        let mut alphas = vec![255; key[0] as usize + 1];
        alphas[key[0] as usize] = 0;
        alphas
      } else {
        key.iter().flat_map(|s| s.to_be_bytes()).collect()
      };
      let png = b.chunk(b"tRNS", &trns).idat(&raw).iend().build();
      let pixels8 = to_rgba8(&decode(&png, DecodeFormat::Rgba8).unwrap());
      let bytes16 = decode(&png, DecodeFormat::Rgba16).unwrap();
      let pixels16: Vec<RGBA16> =
        bytes16.chunks_exact(8).map(bytemuck::pod_read_unaligned).collect();
      let mut transparent_count = 0;
      for (i, (px8, px16)) in pixels8.iter().zip(&pixels16).enumerate() {
        let (x, y) = (i as u32 % w, i as u32 / w);
        let matches = (0..channels).all(|c| sample(x, y, c) == key[c]);
        transparent_count += usize::from(matches);
        let (a8, a16) = if matches { (0, 0) } else { (255, 0xFFFF) };
        assert_eq!(px8.a, a8, "{color_type} {bit_depth} ({x},{y})");
        assert_eq!(px16.a, a16, "{color_type} {bit_depth} ({x},{y})");
      }
      assert!(transparent_count >= 1);
    }
  }
}

#[test]
fn test_rgba16_replicates_bytes() {
  let raw = [0, 0x12, 0xAB, 0xFF];
  let png = PngBuilder::new().ihdr(1, 1, 8, RGB, 0).idat(&raw).iend().build();
  let out = decode(&png, DecodeFormat::Rgba16).unwrap();
  let px: RGBA16 = bytemuck::pod_read_unaligned(&out);
  assert_eq!(px, RGBA16 { r: 0x1212, g: 0xABAB, b: 0xFFFF, a: 0xFFFF });
  //
  let raw = [0, 0x12, 0x34, 0xAB, 0xCD];
  let png = PngBuilder::new().ihdr(1, 1, 16, YA, 0).idat(&raw).iend().build();
  let out = decode(&png, DecodeFormat::Rgba16).unwrap();
  let px: RGBA16 = bytemuck::pod_read_unaligned(&out);
  assert_eq!(px, RGBA16 { r: 0x1234, g: 0x1234, b: 0x1234, a: 0xABCD });
  assert_eq!(decode(&png, DecodeFormat::Rgba8).unwrap(), [0x12, 0x12, 0x12, 0xAB]);
  assert_eq!(decode(&png, DecodeFormat::Png).unwrap(), [0x12, 0x34, 0xAB, 0xCD]);
}

#[test]
fn test_interlaced_matches_non_interlaced() {
  for (color_type, channels, depths) in ALL_FORMATS {
    for &bit_depth in depths {
      for (w, h) in [(1, 1), (3, 2), (9, 9), (13, 4)] {
        let sample = pattern(color_type, bit_depth);
        let make = |interlace: u8| {
          let raw = raw_scanlines(w, h, bit_depth, channels, interlace == 1, &sample);
          let mut b = PngBuilder::new().ihdr(w, h, bit_depth, color_type, interlace);
          if color_type == INDEX {
            b = b.chunk(b"PLTE", &palette_bytes(bit_depth));
          }
          b.idat(&raw).iend().build()
        };
        let (flat, laced) = (make(0), make(1));
        for fmt in FORMATS {
          assert_eq!(
            decode(&flat, fmt).unwrap(),
            decode(&laced, fmt).unwrap(),
            "{color_type} {bit_depth} {w}x{h} {fmt:?}"
          );
        }
      }
    }
  }
}

#[test]
fn test_native_output_packs_rows() {
  // 3 pixels of 2-bit grey per row, padded out to a byte
  let sample = |x: u32, y: u32, _: usize| (x + y) as u16;
  let raw = raw_scanlines(3, 2, 2, 1, true, sample);
  let png = PngBuilder::new().ihdr(3, 2, 2, Y, 1).idat(&raw).iend().build();
  assert_eq!(decode(&png, DecodeFormat::Png).unwrap(), [0b00_01_10_00, 0b01_10_11_00]);
}

#[test]
fn test_split_idat() {
  let sample = pattern(RGB, 16);
  let raw = raw_scanlines(8, 8, 16, 3, false, &sample);
  let one = PngBuilder::new().ihdr(8, 8, 16, RGB, 0).idat(&raw).iend().build();
  let many = PngBuilder::new().ihdr(8, 8, 16, RGB, 0).split_idat(&raw, 5).iend().build();
  assert_eq!(decode(&one, DecodeFormat::Png).unwrap(), decode(&many, DecodeFormat::Png).unwrap());
  let empty_first =
    PngBuilder::new().ihdr(8, 8, 16, RGB, 0).chunk(b"IDAT", &[]).idat(&raw).iend().build();
  assert_eq!(
    decode(&one, DecodeFormat::Png).unwrap(),
    decode(&empty_first, DecodeFormat::Png).unwrap()
  );
}

#[test]
fn test_one_byte_idats() {
  for raw in [[0_u8, 0, 0, 0], [0, 9, 200, 31]] {
    for level in [1, 6] {
      let z = miniz_oxide::deflate::compress_to_vec_zlib(&raw, level);
      let mut builder = PngBuilder::new().ihdr(1, 1, 8, RGB, 0);
      for byte in z.chunks(1) {
        builder = builder.chunk(b"IDAT", byte);
      }
      let png = builder.iend().build();
      assert_eq!(decode(&png, DecodeFormat::Png).unwrap(), raw[1..], "level {level}");
    }
  }
  // every split point of a larger stream, including inside the checksum
  let sample = pattern(RGBA, 8);
  let raw = raw_scanlines(5, 3, 8, 4, false, &sample);
  let z = miniz_oxide::deflate::compress_to_vec_zlib(&raw, 6);
  let whole = PngBuilder::new().ihdr(5, 3, 8, RGBA, 0).idat(&raw).iend().build();
  let expected = decode(&whole, DecodeFormat::Png).unwrap();
  for split in 0..=z.len() {
    let (a, b) = z.split_at(split);
    let png =
      PngBuilder::new().ihdr(5, 3, 8, RGBA, 0).chunk(b"IDAT", a).chunk(b"IDAT", b).iend().build();
    assert_eq!(decode(&png, DecodeFormat::Png).unwrap(), expected, "split at {split}");
  }
}

#[test]
fn test_palette_index_out_of_range() {
  let png = PngBuilder::new()
    .ihdr(2, 1, 8, INDEX, 0)
    .chunk(b"PLTE", &[1, 2, 3])
    .idat(&[0, 0, 1])
    .iend()
    .build();
  for fmt in FORMATS {
    assert_eq!(decode(&png, fmt), Err(PngError::PlteIdx));
  }
  // a 2-bit index that's in range for the bit depth but not the palette
  let png = PngBuilder::new()
    .ihdr(4, 1, 2, INDEX, 0)
    .chunk(b"PLTE", &[1, 2, 3, 4, 5, 6, 7, 8, 9])
    .idat(&[0, 0b00_01_10_11])
    .iend()
    .build();
  assert_eq!(decode(&png, DecodeFormat::Rgba8), Err(PngError::PlteIdx));
}

#[test]
fn test_buffer_one_byte_short() {
  let sample = pattern(RGBA, 8);
  let raw = raw_scanlines(4, 3, 8, 4, false, &sample);
  let png = PngBuilder::new().ihdr(4, 3, 8, RGBA, 0).idat(&raw).iend().build();
  for fmt in FORMATS {
    let mut d = Decoder::new();
    d.set_buffer(&png).unwrap();
    let size = d.get_output_image_size(fmt).unwrap();
    let mut out = vec![0x5A; size - 1];
    assert_eq!(d.decode_image(fmt, &mut out, DecodeFlags::NONE), Err(PngError::BufSiz));
    assert!(out.iter().all(|&b| b == 0x5A));
    assert_eq!(d.state(), DecoderState::Invalid);
  }
}

#[test]
fn test_bigger_buffer_only_prefix_written() {
  let png = PngBuilder::new().ihdr(1, 1, 8, Y, 0).idat(&[0, 7]).iend().build();
  let mut d = Decoder::new();
  d.set_buffer(&png).unwrap();
  let mut out = [0xEE; 6];
  d.decode_image(DecodeFormat::Rgba8, &mut out, DecodeFlags::NONE).unwrap();
  assert_eq!(out, [7, 7, 7, 255, 0xEE, 0xEE]);
}

#[test]
fn test_metadata_records() {
  let sample = pattern(INDEX, 4);
  let raw = raw_scanlines(4, 4, 4, 1, false, &sample);
  let plte = palette_bytes(4);
  let entries = plte.len() / 3;
  let png = PngBuilder::new()
    .ihdr(4, 4, 4, INDEX, 0)
    .chunk(b"gAMA", &45455_u32.to_be_bytes())
    .chunk(b"sRGB", &[1])
    .chunk(b"iCCP", b"my profile\0\0\x78\x9c")
    .chunk(b"sBIT", &[5, 6, 5])
    .chunk(b"PLTE", &plte)
    .chunk(b"bKGD", &[2])
    .chunk(b"hIST", &vec![0; entries * 2])
    .chunk(b"tRNS", &[0, 128])
    .chunk(b"pHYs", &[0, 0, 0x0B, 0x13, 0, 0, 0x0B, 0x13, 1])
    .chunk(b"teXt", b"skipped")
    .idat(&raw)
    .chunk(b"tIME", &[0x07, 0xEA, 10, 19, 12, 30, 59])
    .iend()
    .build();
  let mut d = Decoder::new();
  d.set_buffer(&png).unwrap();
  let meta = *d.metadata().unwrap();
  assert_eq!(meta.gama, Some(gAMA { gamma: 45455 }));
  assert_eq!(meta.srgb.and_then(|s| s.intent()), Some(PngSrgbIntent::RelativeColorimetric));
  assert!(meta.has_iccp());
  assert_eq!(meta.iccp.unwrap().name, b"my profile");
  assert_eq!(meta.sbit, Some(sBIT::RGB { r: 5, g: 6, b: 5 }));
  assert_eq!(meta.plte.unwrap().len(), entries);
  assert_eq!(meta.bkgd, Some(bKGD::Index { i: 2 }));
  assert_eq!(meta.hist.unwrap().frequencies().count(), entries);
  assert_eq!(meta.trns.unwrap().index_alpha(1), Some(128));
  assert_eq!(meta.trns.unwrap().index_alpha(3), Some(255));
  let phys = meta.phys.unwrap();
  assert_eq!((phys.ppu_x, phys.ppu_y), (2835, 2835));
  assert!(phys.is_meters());
  assert_eq!(meta.time.unwrap().year, 2026);
  assert!(meta.chrm.is_none());
  let first = meta.first_idat.unwrap();
  assert_eq!(first.ty, ChunkTy::IDAT);
  assert_eq!(meta.last_idat, Some(first));
  // the metadata is still there after decoding
  let mut out = vec![0; d.get_output_image_size(DecodeFormat::Rgba8).unwrap()];
  d.decode_image(DecodeFormat::Rgba8, &mut out, DecodeFlags::NONE).unwrap();
  assert_eq!(d.metadata().unwrap().gama, Some(gAMA { gamma: 45455 }));
  let px = to_rgba8(&out);
  assert_eq!(sample(0, 0, 0), 0);
  assert_eq!(px[0].a, 0);
  assert_eq!(sample(3, 0, 0), 1);
  assert_eq!(px[3].a, 128);
  assert_eq!(sample(1, 0, 0), 2);
  assert_eq!(px[1].a, 255);
}
