/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// Eight magic bytes every png starts with
pub const PNG_SIGNATURE: u64 = 0x89504E470D0A1A0A;

/// Largest payload a single IDAT chunk carries.
///
/// Most decoders love data in 8KB chunks, since
/// libpng does that by default
pub const IDAT_CHUNK_SIZE: usize = 8192;

/// Largest width or height representable in an IHDR chunk
pub const MAX_DIMENSION: usize = (1 << 31) - 1;

/// Longest keyword allowed in a text chunk
pub const MAX_KEYWORD_LENGTH: usize = 79;
