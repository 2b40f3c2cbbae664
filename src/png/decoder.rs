//! The decoding session.

use super::*;

/// Where a [`Decoder`] is in its lifecycle.
///
/// States only ever move forward. `Decoded` and `Invalid` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DecoderState {
  /// Just created, no input yet.
  Empty,
  /// An input buffer is attached.
  Buffered,
  /// The signature and header have been read.
  Parsed,
  /// Every chunk has been validated.
  Scanned,
  /// The image was decoded.
  Decoded,
  /// An error happened, every further call fails.
  Invalid,
}

/// Flags that adjust a decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct DecodeFlags(pub u32);
impl DecodeFlags {
  /// No flags.
  pub const NONE: Self = Self(0);
  const KNOWN_BITS: u32 = 0;

  #[inline]
  #[must_use]
  const fn has_unknown_bits(self) -> bool {
    (self.0 & !Self::KNOWN_BITS) != 0
  }
}

/// A PNG decoding session over a single borrowed input buffer.
///
/// * Attach the PNG bytes with [`set_buffer`](Self::set_buffer).
/// * Ask for the header, the output size, or the metadata. Each of these only
///   does as much parsing as it needs.
/// * Decode into your own buffer with [`decode_image`](Self::decode_image).
///
/// Any error at all leaves the session [`Invalid`](DecoderState::Invalid),
/// and from then on every call returns [`PngError::BadState`]. To try again,
/// make a new decoder.
///
/// ```no_run
/// use strict_png::png::*;
/// # fn f(png: &[u8]) -> Result<(), strict_png::PngError> {
/// let mut decoder = Decoder::new();
/// decoder.set_buffer(png)?;
/// let size = decoder.get_output_image_size(DecodeFormat::Rgba8)?;
/// let mut pixels = vec![0_u8; size];
/// decoder.decode_image(DecodeFormat::Rgba8, &mut pixels, DecodeFlags::NONE)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Decoder<'b> {
  state: DecoderState,
  png: &'b [u8],
  limits: PngLimits,
  ihdr: Option<IHDR>,
  meta: PngMetadata<'b>,
}
impl Default for Decoder<'_> {
  #[inline]
  fn default() -> Self {
    Self::new()
  }
}
impl<'b> Decoder<'b> {
  /// Makes an empty session.
  #[inline]
  #[must_use]
  pub fn new() -> Self {
    Self {
      state: DecoderState::Empty,
      png: &[],
      limits: PngLimits::default(),
      ihdr: None,
      meta: PngMetadata::default(),
    }
  }

  /// The current state.
  #[inline]
  #[must_use]
  pub const fn state(&self) -> DecoderState {
    self.state
  }

  /// The dimension limits that the header will be checked against.
  #[inline]
  #[must_use]
  pub const fn get_image_limits(&self) -> PngLimits {
    self.limits
  }

  /// Attaches the PNG datastream. This can happen only once per session.
  ///
  /// ## Failure
  /// * [`PngError::InvalidArgument`] if the buffer is empty.
  /// * [`PngError::BufSet`] if a buffer was already attached.
  pub fn set_buffer(&mut self, png: &'b [u8]) -> Result<(), PngError> {
    self.check_valid()?;
    let r = if self.state != DecoderState::Empty {
      Err(PngError::BufSet)
    } else if png.is_empty() {
      Err(PngError::InvalidArgument)
    } else {
      self.png = png;
      self.state = DecoderState::Buffered;
      debug!("png: attached {} byte buffer", png.len());
      Ok(())
    };
    self.guard(r)
  }

  /// Sets caps on the image width and height.
  ///
  /// This must be done before the header is parsed.
  ///
  /// ## Failure
  /// * [`PngError::InvalidArgument`] if either value is 0 or above
  ///   [`PNG_MAX_DIMENSION`].
  /// * [`PngError::BadState`] if the header was already parsed.
  pub fn set_image_limits(&mut self, max_width: u32, max_height: u32) -> Result<(), PngError> {
    self.check_valid()?;
    let r = if self.state > DecoderState::Buffered {
      Err(PngError::BadState)
    } else if !(1..=PNG_MAX_DIMENSION).contains(&max_width)
      || !(1..=PNG_MAX_DIMENSION).contains(&max_height)
    {
      Err(PngError::InvalidArgument)
    } else {
      self.limits = PngLimits { max_width, max_height };
      Ok(())
    };
    self.guard(r)
  }

  /// Gets the image header, parsing it if that hasn't happened yet.
  pub fn get_ihdr(&mut self) -> Result<IHDR, PngError> {
    let r = self.ensure_parsed();
    self.guard(r)
  }

  /// The number of bytes that [`decode_image`](Self::decode_image) will
  /// write for the given format.
  pub fn get_output_image_size(&mut self, fmt: DecodeFormat) -> Result<usize, PngError> {
    let r = self.ensure_parsed().and_then(|ihdr| output_image_size(&ihdr, fmt));
    self.guard(r)
  }

  /// Gets the ancillary metadata.
  ///
  /// This validates every chunk of the stream (but doesn't inflate the image
  /// data).
  pub fn metadata(&mut self) -> Result<&PngMetadata<'b>, PngError> {
    let r = self.ensure_scanned();
    self.guard(r)?;
    Ok(&self.meta)
  }

  /// Decodes the image into `out`, in the format given.
  ///
  /// Only the first [`get_output_image_size`](Self::get_output_image_size)
  /// bytes of `out` are written. If this fails, the content of `out` is
  /// unspecified (except for a [`PngError::BufSiz`] failure, which writes
  /// nothing).
  ///
  /// ## Failure
  /// * [`PngError::BadState`] if the image was already decoded.
  /// * [`PngError::InvalidArgument`] for unknown flag bits.
  /// * [`PngError::BufSiz`] if `out` is too small.
  /// * Any error from validating the chunks, inflating the image data,
  ///   unfiltering, or resolving palette indexes.
  pub fn decode_image(
    &mut self, fmt: DecodeFormat, out: &mut [u8], flags: DecodeFlags,
  ) -> Result<(), PngError> {
    self.check_valid()?;
    let r = self.decode_inner(fmt, out, flags);
    self.guard(r)
  }

  fn decode_inner(
    &mut self, fmt: DecodeFormat, out: &mut [u8], flags: DecodeFlags,
  ) -> Result<(), PngError> {
    if self.state == DecoderState::Decoded {
      return Err(PngError::BadState);
    }
    if flags.has_unknown_bits() {
      return Err(PngError::InvalidArgument);
    }
    let ihdr = self.ensure_parsed()?;
    let size = output_image_size(&ihdr, fmt)?;
    if out.len() < size {
      return Err(PngError::BufSiz);
    }
    self.ensure_scanned()?;
    let meta = self.meta;
    let (first, last) = match (meta.first_idat, meta.last_idat) {
      (Some(first), Some(last)) => (first, last),
      _ => return Err(PngError::IdatTooShort),
    };
    let (payloads, compressed_len) = collect_idat(self.png, first, last)?;
    debug!("png: {} IDAT chunks, {compressed_len} compressed bytes", payloads.len());
    let mut scanlines = inflate_idat(&ihdr, &payloads)?;
    let mut writer = PixelWriter::new(&ihdr, &meta, fmt, out)?;
    unfilter_decompressed_data(&ihdr, &mut scanlines, |x, y, data| writer.put(x, y, data))?;
    self.state = DecoderState::Decoded;
    debug!("png: decoded {}x{} as {fmt:?}", ihdr.width, ihdr.height);
    Ok(())
  }

  #[inline]
  fn check_valid(&self) -> Result<(), PngError> {
    if self.state == DecoderState::Invalid {
      Err(PngError::BadState)
    } else {
      Ok(())
    }
  }

  /// Any error moves the session to `Invalid`.
  #[inline]
  fn guard<T>(&mut self, r: Result<T, PngError>) -> Result<T, PngError> {
    if let Err(e) = &r {
      if self.state != DecoderState::Invalid {
        debug!("png: decoder invalidated by {e}");
        self.state = DecoderState::Invalid;
      }
    }
    r
  }

  fn ensure_parsed(&mut self) -> Result<IHDR, PngError> {
    match (self.state, self.ihdr) {
      (DecoderState::Empty | DecoderState::Invalid, _) => Err(PngError::BadState),
      (DecoderState::Buffered, _) => {
        let ihdr = read_header(self.png, self.limits)?;
        self.ihdr = Some(ihdr);
        self.state = DecoderState::Parsed;
        debug!("png: header parsed");
        Ok(ihdr)
      }
      (_, Some(ihdr)) => Ok(ihdr),
      (_, None) => Err(PngError::BadState),
    }
  }

  fn ensure_scanned(&mut self) -> Result<(), PngError> {
    let ihdr = self.ensure_parsed()?;
    if self.state == DecoderState::Parsed {
      self.meta = scan_chunks(self.png, &ihdr)?;
      self.state = DecoderState::Scanned;
      debug!("png: chunks scanned");
    }
    Ok(())
  }
}
