/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors possible during encoding
use core::fmt::{Debug, Display, Formatter};

use makepal_core::bit_depth::BitDepth;
use makepal_core::bytestream::ByteIoError;
use makepal_core::colorspace::ColorSpace;

/// Errors encountered during encoding
///
/// Once an encoder returns one of these it cannot be used to
/// write more data, the caller should discard whatever the sink holds
pub enum PngEncodeErrors {
    /// Width or height is zero
    ZeroDimensions(usize, usize),
    /// Too large dimensions, png stores them in 31 bits
    TooLargeDimensions(usize),
    /// Unsupported colorspace
    ///
    /// The first argument is the colorspace encountered
    /// The second argument is list of supported colorspaces
    UnsupportedColorspace(ColorSpace, &'static [ColorSpace]),
    /// Bit depth the encoder cannot write
    UnsupportedDepth(BitDepth),
    /// Interlaced output was requested
    UnsupportedInterlace,
    /// Ancillary chunk data can't be represented, e.g a text keyword
    /// that is not Latin-1 or a background that doesn't match the colorspace
    InvalidMetadata(String),
    /// A row didn't have the expected number of bytes
    ///
    /// # Arguments
    /// - 1st argument is the number of bytes we expected
    /// - 2nd argument is number of bytes found
    RowLengthMismatch(usize, usize),
    /// Whole image buffer has the wrong size
    DataLengthMismatch(usize, usize),
    /// More rows were written than the image height
    TooManyRows(usize),
    /// Finish was called before every row was written
    ///
    /// # Arguments
    /// - 1st argument is the image height
    /// - 2nd argument is rows written
    IncompleteImage(usize, usize),
    /// The encoder already failed, no further calls are accepted
    EncoderFailed,
    /// The deflate stream reported an error
    Compression(String),
    Generic(&'static str),
    IoError(ByteIoError)
}

impl Debug for PngEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            PngEncodeErrors::ZeroDimensions(width, height) => {
                write!(f, "Image dimensions must be non zero, found {width}x{height}")
            }
            PngEncodeErrors::TooLargeDimensions(found) => {
                write!(
                    f,
                    "Too large image dimension {found}, png can only encode dimensions up to {}",
                    crate::constants::MAX_DIMENSION
                )
            }
            PngEncodeErrors::UnsupportedColorspace(found, supported) => {
                write!(f, "Cannot encode image with colorspace {found:?} into PNG, supported ones are {supported:?}")
            }
            PngEncodeErrors::UnsupportedDepth(depth) => {
                write!(f, "Cannot encode image with bit depth {depth:?} into PNG")
            }
            PngEncodeErrors::UnsupportedInterlace => {
                write!(f, "Interlaced encoding is not supported")
            }
            PngEncodeErrors::InvalidMetadata(reason) => {
                write!(f, "Invalid metadata: {reason}")
            }
            PngEncodeErrors::RowLengthMismatch(expected, found) => {
                write!(f, "Expected a row of {expected} bytes but found {found} bytes")
            }
            PngEncodeErrors::DataLengthMismatch(expected, found) => {
                write!(f, "Expected {expected} bytes of pixel data but found {found} bytes")
            }
            PngEncodeErrors::TooManyRows(height) => {
                write!(f, "All {height} rows have already been written")
            }
            PngEncodeErrors::IncompleteImage(height, written) => {
                write!(f, "Image has {height} rows but only {written} were written")
            }
            PngEncodeErrors::EncoderFailed => {
                write!(f, "Encoder is in a failed state after a previous error")
            }
            PngEncodeErrors::Compression(reason) => {
                write!(f, "Deflate error: {reason}")
            }
            PngEncodeErrors::Generic(val) => {
                write!(f, "{val}")
            }
            PngEncodeErrors::IoError(err) => {
                write!(f, "I/O error {err:?}")
            }
        }
    }
}

impl Display for PngEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for PngEncodeErrors {}

impl From<ByteIoError> for PngEncodeErrors {
    fn from(value: ByteIoError) -> Self {
        PngEncodeErrors::IoError(value)
    }
}

impl From<flate2::CompressError> for PngEncodeErrors {
    fn from(value: flate2::CompressError) -> Self {
        PngEncodeErrors::Compression(value.to_string())
    }
}
