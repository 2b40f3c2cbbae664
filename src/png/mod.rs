//! Holds all the tools for decoding PNG data.
//!
//! ## Decoding A PNG
//! Make a [`Decoder`], give it the PNG bytes, ask how big the output will be,
//! and then decode into a buffer of that size.
//!
//! ```no_run
//! use strict_png::png::*;
//! # fn f() -> Result<(), strict_png::PngError> {
//! let png: &[u8] = unimplemented!("data from somewhere");
//! let mut decoder = Decoder::new();
//! decoder.set_buffer(png)?;
//! let ihdr = decoder.get_ihdr()?;
//! assert!(ihdr.width > 0 && ihdr.height > 0);
//! let mut pixels = vec![0_u8; decoder.get_output_image_size(DecodeFormat::Rgba8)?];
//! decoder.decode_image(DecodeFormat::Rgba8, &mut pixels, DecodeFlags::NONE)?;
//! # Ok(())
//! # }
//! ```
//!
//! ## How PNG Data Is Stored
//! The general format of a PNG is that the information is stored in "chunks",
//! each with a length, a type, the payload, and a CRC. There's four "critical"
//! chunk types:
//! * **Header** ([`IHDR`]) - This has all the important information about the
//!   image's dimensions, pixel format, and if the image is interlaced or not.
//!   It must be the very first chunk.
//! * **Palette** ([`PLTE`]) - If an image uses indexed color it will have a
//!   palette of what index values map to what `RGB8` values.
//! * **Image Data** - One or more chunks of compressed data. All of the
//!   compressed data forms a single zlib data stream. All of the image data
//!   chunks must appear one after the other.
//! * **End** - The last chunk, lets you know you had the full PNG and your data
//!   wasn't truncated accidentally.
//!
//! Between the header and the end there are also zero or more "ancillary"
//! chunks which give additional information about the image. These are all
//! collected into the [`PngMetadata`]. Unknown ancillary chunks are skipped,
//! unknown critical chunks are an error.
//!
//! This decoder is strict. Every chunk's CRC is checked, and chunks that are
//! out of order, duplicated, or the wrong size for their type are errors
//! rather than being silently skipped.
//!
//! When storing the PNG, the raw pixel values are first "filtered" (to try and
//! make them more compression-friendly), and then compressed into a Zlib data
//! stream. To decode, the operations are reversed:
//! * **Decompression:** The image data is inflated into a buffer of exactly
//!   the size the header calls for. Too little or too much data is an error.
//! * **Unfiltering:** Each line has an extra byte on the front which says what
//!   filter was used for that line, and the filters are reversed in place.
//! * **De-interlacing:** An interlaced image is stored as a series of seven
//!   "reduced" images of varying resolutions. As each pixel is unfiltered it's
//!   sent to its full image position.
//! * **Pixel Format Changes:** Each pixel is written into the output in the
//!   requested [`DecodeFormat`].
//!
//! All the steps after decompression are one pass over the decompressed data.

use core::fmt::{Debug, Write};

use log::{debug, trace, warn};

use crate::*;

mod chunk;
pub use chunk::*;

mod ihdr;
pub use ihdr::*;

mod plte;
pub use plte::*;

mod trns;
pub use trns::*;

mod bkgd;
pub use bkgd::*;

mod sbit;
pub use sbit::*;

mod hist;
pub use hist::*;

mod chrm;
pub use chrm::*;

mod gama;
pub use gama::*;

mod srgb;
pub use srgb::*;

mod phys;
pub use phys::*;

mod time;
pub use time::*;

mod iccp;
pub use iccp::*;

mod metadata;
pub use metadata::*;

mod scan;
pub use scan::*;

mod idat;
pub use idat::*;

mod unfilter;
pub use unfilter::*;

mod convert;
pub use convert::*;

mod decoder;
pub use decoder::*;
