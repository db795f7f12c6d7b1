/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Image bit depth information

/// The image bit depth.
///
/// Samples are stored in a [`u8`] for eight bit images and as two big
/// endian bytes for sixteen bit images.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
#[non_exhaustive]
pub enum BitDepth {
    /// Eight bit depth.
    ///
    /// Images with such bit depth use [`u8`] to store
    /// samples and use the whole range from 0-255.
    Eight,
    /// Sixteen bit depth
    ///
    /// Each sample takes two bytes, most significant byte first,
    /// i.e the layout png expects on disk
    Sixteen,
    /// Bit depth information is unknown
    #[default]
    Unknown
}

impl BitDepth {
    /// Get the max value supported by the bit depth
    pub const fn max_value(self) -> u16 {
        match self {
            Self::Eight => (1 << 8) - 1,
            Self::Sixteen => u16::MAX,
            Self::Unknown => 0
        }
    }

    /// Get the number of bytes needed to store a single sample
    /// of this depth, or `None` if the depth is unknown
    ///
    /// ```
    /// use makepal_core::bit_depth::BitDepth;
    /// assert_eq!(BitDepth::Sixteen.size_of(), Some(2));
    /// assert_eq!(BitDepth::Unknown.size_of(), None);
    /// ```
    pub const fn size_of(self) -> Option<usize> {
        match self {
            Self::Eight => Some(1),
            Self::Sixteen => Some(2),
            Self::Unknown => None
        }
    }

    /// Number of bits used by a single sample
    pub const fn bit_size(self) -> usize {
        match self {
            Self::Eight => 8,
            Self::Sixteen => 16,
            Self::Unknown => 0
        }
    }
}
