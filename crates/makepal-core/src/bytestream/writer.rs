/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use crate::bytestream::{ByteIoError, ByteWriterTrait};

/// Encapsulates a byte sink with support for
/// big endian writes and a running count of bytes written
pub struct ByteWriter<T: ByteWriterTrait> {
    buffer:        T,
    bytes_written: usize
}

impl<T: ByteWriterTrait> ByteWriter<T> {
    /// Create a new writer wrapping the sink
    pub fn new(data: T) -> ByteWriter<T> {
        ByteWriter {
            buffer:        data,
            bytes_written: 0
        }
    }

    /// Destroy this writer returning
    /// the underlying sink
    pub fn into_inner(self) -> T {
        self.buffer
    }

    /// Return the number of bytes the writer has written
    ///
    /// ```
    /// use makepal_core::bytestream::ByteWriter;
    /// let mut sink = vec![];
    /// let mut stream = ByteWriter::new(&mut sink);
    /// stream.write_u32_be_err(7).unwrap();
    /// assert_eq!(stream.bytes_written(), 4);
    /// ```
    pub const fn bytes_written(&self) -> usize {
        self.bytes_written
    }

    /// Write all bytes in `buf` or error out
    #[inline]
    pub fn write_all(&mut self, buf: &[u8]) -> Result<(), ByteIoError> {
        self.buffer.write_all_bytes(buf)?;
        self.bytes_written += buf.len();
        Ok(())
    }

    #[inline]
    fn write_const<const N: usize>(&mut self, buf: &[u8; N]) -> Result<(), ByteIoError> {
        self.buffer.write_const_bytes(buf)?;
        self.bytes_written += N;
        Ok(())
    }

    /// Write a single byte into the sink or error out
    #[inline]
    pub fn write_u8_err(&mut self, byte: u8) -> Result<(), ByteIoError> {
        self.write_const(&[byte])
    }

    /// Write a u16 as a big endian integer
    #[inline]
    pub fn write_u16_be_err(&mut self, value: u16) -> Result<(), ByteIoError> {
        self.write_const(&value.to_be_bytes())
    }

    /// Write a u32 as a big endian integer
    #[inline]
    pub fn write_u32_be_err(&mut self, value: u32) -> Result<(), ByteIoError> {
        self.write_const(&value.to_be_bytes())
    }

    /// Write a u64 as a big endian integer
    #[inline]
    pub fn write_u64_be_err(&mut self, value: u64) -> Result<(), ByteIoError> {
        self.write_const(&value.to_be_bytes())
    }

    /// Ask the sink to flush anything it buffered
    pub fn flush(&mut self) -> Result<(), ByteIoError> {
        self.buffer.flush_bytes()
    }
}
