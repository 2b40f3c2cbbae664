#![no_std]
#![forbid(unsafe_code)]
#![cfg_attr(docs_rs, feature(doc_cfg))]
#![warn(missing_docs)]

//! A crate for strict PNG decoding.
//!
//! The whole PNG datastream is given as one byte slice. The decoder checks it
//! against the PNG rules (chunk order, duplicates, checksums, header fields,
//! and so on), and then reconstructs the pixels into a buffer that you
//! provide, in one of a few output formats.
//!
//! See the [`png`] module for the details.

extern crate alloc;

#[cfg(target_pointer_width = "16")]
compile_error!("this crate assumes 32-bit or bigger pointers!");

mod error;
pub use error::*;

pub mod pixel_formats;
pub use pixel_formats::*;

pub mod bit_depth_changes;

mod parser_helpers;
pub(crate) use parser_helpers::*;

pub mod png;
