//! Gathering the image data chunks and inflating them.

use super::*;

use alloc::vec::Vec;
use miniz_oxide::inflate::{decompress_slice_iter_to_slice, TINFLStatus};

/// Collects the payloads of every chunk from `first` through `last`.
///
/// Every chunk in that range must be an `IDAT`, anything else between them
/// means the image data isn't contiguous. The total compressed size is also
/// computed, with overflow checks.
pub fn collect_idat<'b>(
  png: &'b [u8], first: ChunkSpan, last: ChunkSpan,
) -> Result<(Vec<&'b [u8]>, usize), PngError> {
  let mut payloads: Vec<&'b [u8]> = Vec::new();
  let mut total = 0_usize;
  let mut pos = first.offset;
  loop {
    let chunk = read_chunk_at(png, pos)?;
    if chunk.ty() != ChunkTy::IDAT {
      return Err(PngError::IdatStream);
    }
    payloads.try_reserve(1)?;
    payloads.push(chunk.data);
    total = total.checked_add(chunk.data.len()).ok_or(PngError::Overflow)?;
    if chunk.span.offset >= last.offset {
      break;
    }
    pos = chunk.span.end();
  }
  Ok((payloads, total))
}

/// Inflates the zlib stream formed by the IDAT payloads (in order, as if they
/// were one long slice) into a buffer of exactly the size the header requires.
///
/// The inflater gets one spare byte of room. Without it, a stream whose end of
/// block code or checksum sits in a later IDAT than the last output byte would
/// look like it had more output pending.
///
/// ## Failure
/// * [`PngError::IdatTooShort`] if the stream ends, or the compressed data runs
///   out, before the buffer is full.
/// * [`PngError::IdatTooLong`] if the stream has more output than the header
///   calls for.
/// * [`PngError::Zlib`] for any corruption the inflater reports, including an
///   Adler-32 mismatch.
/// * [`PngError::OutOfMemory`] if the buffer can't be allocated.
pub fn inflate_idat(ihdr: &IHDR, payloads: &[&[u8]]) -> Result<Vec<u8>, PngError> {
  let required = ihdr.get_zlib_decompression_requirement()?;
  let capacity = required.checked_add(1).ok_or(PngError::Overflow)?;
  let mut out: Vec<u8> = Vec::new();
  out.try_reserve_exact(capacity)?;
  out.resize(capacity, 0);
  let inflated = decompress_slice_iter_to_slice(&mut out, payloads.iter().copied(), true, false);
  let written = match inflated {
    Ok(written) => written,
    Err(TINFLStatus::HasMoreOutput) => return Err(PngError::IdatTooLong),
    Err(TINFLStatus::FailedCannotMakeProgress | TINFLStatus::NeedsMoreInput) => {
      return Err(PngError::IdatTooShort)
    }
    Err(e) => {
      debug!("png: inflate failed: {e:?}");
      return Err(PngError::Zlib);
    }
  };
  match written.cmp(&required) {
    core::cmp::Ordering::Less => return Err(PngError::IdatTooShort),
    core::cmp::Ordering::Greater => return Err(PngError::IdatTooLong),
    core::cmp::Ordering::Equal => (),
  }
  out.truncate(required);
  debug!("png: inflated {written} bytes of scanline data");
  Ok(out)
}
