/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Traits for writing images in makepal

use std::fs::File;
use std::io::{BufWriter, Write};

use crate::bytestream::ByteIoError;

/// The writer trait implemented for makepal encoders
///
/// Anything that implements this trait can be used as a sink
/// for writing encoded images.
///
/// Rust has no specialization, so this is implemented for concrete
/// types (`Vec<u8>`, `BufWriter<File>` and mutable references to them)
/// rather than blanket implemented over [`Write`], which would conflict
/// with the vector implementations.
pub trait ByteWriterTrait {
    /// Write all bytes to the sink or return an error if something occurred
    ///
    /// This will always write all bytes, if it can't fully write all bytes, it will
    /// error out
    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), ByteIoError>;
    /// Write a fixed number of bytes and error out if we can't write the bytes
    fn write_const_bytes<const N: usize>(&mut self, buf: &[u8; N]) -> Result<(), ByteIoError> {
        self.write_all_bytes(buf)
    }
    /// Ensure bytes are written to the sink.
    ///
    /// After this, the encoder should be able to guarantee that all buffered
    /// data has been handed to the underlying storage
    fn flush_bytes(&mut self) -> Result<(), ByteIoError>;
}

impl ByteWriterTrait for Vec<u8> {
    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), ByteIoError> {
        self.extend_from_slice(buf);
        Ok(())
    }

    fn flush_bytes(&mut self) -> Result<(), ByteIoError> {
        Ok(())
    }
}

impl ByteWriterTrait for &mut Vec<u8> {
    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), ByteIoError> {
        (**self).write_all_bytes(buf)
    }

    fn flush_bytes(&mut self) -> Result<(), ByteIoError> {
        Ok(())
    }
}

impl ByteWriterTrait for BufWriter<File> {
    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), ByteIoError> {
        self.write_all(buf)?;
        Ok(())
    }

    fn flush_bytes(&mut self) -> Result<(), ByteIoError> {
        self.flush()?;
        Ok(())
    }
}

impl ByteWriterTrait for &mut BufWriter<File> {
    fn write_all_bytes(&mut self, buf: &[u8]) -> Result<(), ByteIoError> {
        self.write_all(buf)?;
        Ok(())
    }

    fn flush_bytes(&mut self) -> Result<(), ByteIoError> {
        self.flush()?;
        Ok(())
    }
}
