//! Module for pixel formats.
//!
//! These are the plain channel structs used for palettes and for decoded
//! output. All of them are `Pod`, so a byte buffer of the right length can be
//! cast to a slice of them (and back) with `bytemuck`.
//!
//! Channels are always stored in the order of the type name. When a channel
//! is more than one byte the byte order is whatever the field type uses in
//! memory (native endian).

use bytemuck::{Pod, Zeroable};

/// An 8-bit RGB pixel, as found in a PNG palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Pod, Zeroable)]
#[repr(C)]
#[allow(missing_docs)]
pub struct RGB8 {
  pub r: u8,
  pub g: u8,
  pub b: u8,
}
impl RGB8 {
  /// Adds an alpha channel.
  #[inline]
  #[must_use]
  pub const fn with_alpha(self, a: u8) -> RGBA8 {
    RGBA8 { r: self.r, g: self.g, b: self.b, a }
  }
}

/// An 8-bit RGBA pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Pod, Zeroable)]
#[repr(C)]
#[allow(missing_docs)]
pub struct RGBA8 {
  pub r: u8,
  pub g: u8,
  pub b: u8,
  pub a: u8,
}

/// A 16-bit RGBA pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Pod, Zeroable)]
#[repr(C)]
#[allow(missing_docs)]
pub struct RGBA16 {
  pub r: u16,
  pub g: u16,
  pub b: u16,
  pub a: u16,
}
impl From<RGBA8> for RGBA16 {
  /// Replicates each byte into both halves of the wider channel.
  #[inline]
  fn from(RGBA8 { r, g, b, a }: RGBA8) -> Self {
    use crate::bit_depth_changes::u8_to_u16;
    Self { r: u8_to_u16(r), g: u8_to_u16(g), b: u8_to_u16(b), a: u8_to_u16(a) }
  }
}
