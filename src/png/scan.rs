//! Walking the chunk stream and checking it against the PNG ordering and
//! uniqueness rules.

use super::*;

/// The first eight bytes of a PNG datastream should match these bytes.
pub const PNG_SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

/// Checks if the PNG's initial 8 bytes are correct.
#[inline]
#[must_use]
pub const fn is_png_signature_correct(bytes: &[u8]) -> bool {
  matches!(bytes, [137, 80, 78, 71, 13, 10, 26, 10, ..])
}

/// Offset of the first chunk after the header chunk.
pub(crate) const FIRST_CHUNK_AFTER_IHDR: usize = PNG_SIGNATURE.len() + 12 + 13;

/// Checks the signature, then reads and validates the `IHDR` chunk, which must
/// be the first chunk.
pub fn read_header(png: &[u8], limits: PngLimits) -> Result<IHDR, PngError> {
  if !is_png_signature_correct(png) {
    return Err(PngError::Signature);
  }
  let rest = &png[PNG_SIGNATURE.len()..];
  let (len_bytes, rest) = try_split_off_byte_array::<4>(rest).ok_or(PngError::NoIhdr)?;
  let (ty_bytes, _) = try_split_off_byte_array::<4>(rest).ok_or(PngError::NoIhdr)?;
  if ChunkTy(ty_bytes) != ChunkTy::IHDR {
    return Err(PngError::NoIhdr);
  }
  if u32::from_be_bytes(len_bytes) != 13 {
    return Err(PngError::IhdrSize);
  }
  let chunk = read_chunk_at(png, PNG_SIGNATURE.len())?;
  let ihdr = IHDR::parse(chunk.data, limits)?;
  debug!("png: {ihdr:?}");
  Ok(ihdr)
}

/// Walks every chunk after the header, validating each one and filling in the
/// metadata.
///
/// Scanning stops at `IEND`, or when the buffer is used up exactly on a chunk
/// boundary (which is tolerated, with a warning). The `IDAT` chunks must all be
/// next to each other. Their payloads are not touched, only their positions are
/// recorded.
pub fn scan_chunks<'b>(png: &'b [u8], ihdr: &IHDR) -> Result<PngMetadata<'b>, PngError> {
  let mut meta = PngMetadata::default();
  let mut it = PngChunkIter::new_at(png, FIRST_CHUNK_AFTER_IHDR);
  let mut saw_iend = false;
  let mut prev_was_idat = false;
  while let Some(chunk) = it.next() {
    let chunk = chunk?;
    let PngChunk { span, data } = chunk;
    debug!("png: chunk {:?} at {}, {} bytes", span.ty, span.offset, span.length);
    let after_idat = meta.first_idat.is_some();
    match span.ty {
      ChunkTy::IHDR => return Err(PngError::ChunkPos),
      ChunkTy::PLTE => {
        if after_idat
          || !ihdr.color_type.allows_palette()
          || meta.trns.is_some()
          || meta.bkgd.is_some()
          || meta.hist.is_some()
        {
          return Err(PngError::ChunkPos);
        }
        if meta.plte.is_some() {
          return Err(PngError::DupPlte);
        }
        meta.plte = Some(PLTE::parse(data, ihdr)?);
      }
      ChunkTy::IDAT => {
        if meta.first_idat.is_none() {
          if ihdr.color_type == PngColorType::Index && meta.plte.is_none() {
            return Err(PngError::ChunkPos);
          }
          meta.first_idat = Some(span);
        } else if !prev_was_idat {
          return Err(PngError::IdatStream);
        }
        meta.last_idat = Some(span);
      }
      ChunkTy::IEND => {
        if span.length != 0 {
          return Err(PngError::ChunkSize);
        }
        if span.end() != png.len() {
          return Err(PngError::DataAfterIend);
        }
        saw_iend = true;
        break;
      }
      ChunkTy::cHRM => {
        before_plte_and_idat(&meta)?;
        no_dup(&meta.chrm, PngError::DupChrm)?;
        meta.chrm = Some(cHRM::try_from(data)?);
      }
      ChunkTy::gAMA => {
        before_plte_and_idat(&meta)?;
        no_dup(&meta.gama, PngError::DupGama)?;
        meta.gama = Some(gAMA::try_from(data)?);
      }
      ChunkTy::iCCP => {
        before_plte_and_idat(&meta)?;
        no_dup(&meta.iccp, PngError::DupIccp)?;
        meta.iccp = Some(iCCP::try_from(data)?);
      }
      ChunkTy::sBIT => {
        before_plte_and_idat(&meta)?;
        no_dup(&meta.sbit, PngError::DupSbit)?;
        meta.sbit = Some(sBIT::parse(data, ihdr)?);
      }
      ChunkTy::sRGB => {
        before_plte_and_idat(&meta)?;
        no_dup(&meta.srgb, PngError::DupSrgb)?;
        meta.srgb = Some(sRGB::try_from(data)?);
      }
      ChunkTy::bKGD => {
        before_idat(&meta)?;
        no_dup(&meta.bkgd, PngError::DupBkgd)?;
        meta.bkgd = Some(bKGD::parse(data, ihdr, meta.plte.as_ref())?);
      }
      ChunkTy::hIST => {
        before_idat(&meta)?;
        no_dup(&meta.hist, PngError::DupHist)?;
        meta.hist = Some(hIST::parse(data, meta.plte.as_ref())?);
      }
      ChunkTy::tRNS => {
        before_idat(&meta)?;
        no_dup(&meta.trns, PngError::DupTrns)?;
        meta.trns = Some(tRNS::parse(data, ihdr, meta.plte.as_ref())?);
      }
      ChunkTy::pHYs => {
        before_idat(&meta)?;
        no_dup(&meta.phys, PngError::DupPhys)?;
        meta.phys = Some(pHYs::try_from(data)?);
      }
      ChunkTy::tIME => {
        no_dup(&meta.time, PngError::DupTime)?;
        meta.time = Some(tIME::try_from(data)?);
      }
      other if other.is_critical() => return Err(PngError::ChunkUnknownCritical),
      other => debug!("png: skipping ancillary chunk {other:?}"),
    }
    prev_was_idat = span.ty == ChunkTy::IDAT;
  }
  if !saw_iend {
    warn!("png: data ended at {} without an IEND chunk", it.position());
  }
  if meta.first_idat.is_none() {
    return Err(PngError::IdatTooShort);
  }
  Ok(meta)
}

#[inline]
fn before_idat(meta: &PngMetadata<'_>) -> Result<(), PngError> {
  if meta.first_idat.is_some() {
    Err(PngError::ChunkPos)
  } else {
    Ok(())
  }
}

#[inline]
fn before_plte_and_idat(meta: &PngMetadata<'_>) -> Result<(), PngError> {
  if meta.plte.is_some() {
    Err(PngError::ChunkPos)
  } else {
    before_idat(meta)
  }
}

#[inline]
fn no_dup<T>(slot: &Option<T>, e: PngError) -> Result<(), PngError> {
  if slot.is_some() {
    Err(e)
  } else {
    Ok(())
  }
}
