/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Byte sinks and an endian aware writer for encoders
//!
//! Encoders never talk to files or vectors directly, they write through
//! a [`ByteWriter`] wrapping anything that implements [`ByteWriterTrait`]
pub use error::ByteIoError;
pub use traits::ByteWriterTrait;
pub use writer::ByteWriter;

mod error;
mod traits;
mod writer;
