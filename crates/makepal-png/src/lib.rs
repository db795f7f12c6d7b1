/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! A png encoder
//!
//! This features a small, streaming PNG writer which produces valid
//! ISO/IEC 15948:2003 (E) images, one row at a time.
//!
//! # Features
//! - 8 and 16 bit grayscale, grayscale alpha, RGB and RGBA images
//! - All five scanline filters, selectable per row
//! - Optional `gAMA`, `bKGD`, `tIME` and `tEXt` chunks
//! - Configurable deflate compression level, best compression by default
//!
//! # Usage
//!
//! An encoder is created with [`PngEncoder::init`], which writes the
//! signature and header chunks immediately. Rows are then passed to
//! [`PngEncoder::write_row`] from top to bottom and the image is
//! completed with [`PngEncoder::finish`].
//!
//! ```
//! use makepal_core::bit_depth::BitDepth;
//! use makepal_core::colorspace::ColorSpace;
//! use makepal_core::options::EncoderOptions;
//! use makepal_png::{FilterMethod, PngEncoder, PngMetadata};
//!
//! let options = EncoderOptions::new(4, 2, ColorSpace::Luma, BitDepth::Eight);
//! let mut encoder = PngEncoder::init(options, PngMetadata::new(), vec![]).unwrap();
//!
//! encoder.set_row_filter(FilterMethod::Sub);
//! encoder.write_row(&[0, 64, 128, 255]).unwrap();
//! encoder.write_row(&[255, 128, 64, 0]).unwrap();
//!
//! let png = encoder.finish().unwrap();
//! ```
//!
//! Any error leaves the encoder in a failed state, the caller should
//! call [`PngEncoder::abort`] (or just drop it) and discard the sink.
pub use encoder::{EncoderState, PngEncoder};
pub use enums::FilterMethod;
pub use error::PngEncodeErrors;
pub use makepal_core;
pub use metadata::{Background, PngMetadata, PngTime, TextChunk};

mod constants;
pub mod crc;
mod encoder;
mod enums;
pub mod error;
mod filters;
mod headers;
mod metadata;
