/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Encoder options
//!
//! Options shared by encoders, set with a builder style api
//!
//! ```
//! use makepal_core::bit_depth::BitDepth;
//! use makepal_core::colorspace::ColorSpace;
//! use makepal_core::options::EncoderOptions;
//!
//! let options = EncoderOptions::default()
//!     .set_width(3)
//!     .set_height(1)
//!     .set_colorspace(ColorSpace::RGBA)
//!     .set_depth(BitDepth::Eight);
//! assert_eq!(options.width(), 3);
//! ```

use crate::bit_depth::BitDepth;
use crate::colorspace::ColorSpace;

/// Highest compression level understood by deflate encoders
pub const MAX_COMPRESSION_LEVEL: u8 = 9;

/// Options every encoder understands
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct EncoderOptions {
    width:       usize,
    height:      usize,
    colorspace:  ColorSpace,
    depth:       BitDepth,
    compression: u8,
    interlace:   bool
}

impl Default for EncoderOptions {
    fn default() -> Self {
        Self {
            width:       0,
            height:      0,
            colorspace:  ColorSpace::RGBA,
            depth:       BitDepth::Eight,
            compression: MAX_COMPRESSION_LEVEL,
            interlace:   false
        }
    }
}

impl EncoderOptions {
    /// Create new encode options
    ///
    /// # Arguments
    /// - width: Image width
    /// - height: Image height
    /// - colorspace: Image colorspace
    /// - depth: Bit depth of the samples
    pub fn new(
        width: usize, height: usize, colorspace: ColorSpace, depth: BitDepth
    ) -> EncoderOptions {
        EncoderOptions {
            width,
            height,
            colorspace,
            depth,
            ..Default::default()
        }
    }

    /// Get the width for which the image will be encoded in
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Get the height for which the image will be encoded in
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Get the colorspace the samples are laid out in
    pub const fn colorspace(&self) -> ColorSpace {
        self.colorspace
    }

    /// Get the bit depth of the samples
    pub const fn depth(&self) -> BitDepth {
        self.depth
    }

    /// Get the deflate compression level, 0 (store) to 9 (best)
    pub const fn compression_level(&self) -> u8 {
        self.compression
    }

    /// Whether the image should be written interlaced
    pub const fn interlace(&self) -> bool {
        self.interlace
    }

    /// Number of bytes a single pixel takes, or `None` for unknown depths
    pub const fn bytes_per_pixel(&self) -> Option<usize> {
        match self.depth.size_of() {
            Some(size) => Some(size * self.colorspace.num_components()),
            None => None
        }
    }

    /// Number of bytes in one row of pixels, `None` on overflow
    /// or unknown depth
    pub fn row_size(&self) -> Option<usize> {
        self.bytes_per_pixel()?.checked_mul(self.width)
    }

    pub fn set_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn set_height(mut self, height: usize) -> Self {
        self.height = height;
        self
    }

    pub fn set_colorspace(mut self, colorspace: ColorSpace) -> Self {
        self.colorspace = colorspace;
        self
    }

    pub fn set_depth(mut self, depth: BitDepth) -> Self {
        self.depth = depth;
        self
    }

    /// Set the compression level, values above
    /// [`MAX_COMPRESSION_LEVEL`] are clamped
    pub fn set_compression_level(mut self, level: u8) -> Self {
        self.compression = level.min(MAX_COMPRESSION_LEVEL);
        self
    }

    pub fn set_interlace(mut self, interlace: bool) -> Self {
        self.interlace = interlace;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_size_depends_on_depth_and_components() {
        let options = EncoderOptions::new(5, 1, ColorSpace::RGB, BitDepth::Sixteen);
        assert_eq!(options.bytes_per_pixel(), Some(6));
        assert_eq!(options.row_size(), Some(30));

        let unknown = options.set_depth(BitDepth::Unknown);
        assert_eq!(unknown.row_size(), None);
    }

    #[test]
    fn compression_level_is_clamped() {
        let options = EncoderOptions::default().set_compression_level(42);
        assert_eq!(options.compression_level(), MAX_COMPRESSION_LEVEL);
    }
}
