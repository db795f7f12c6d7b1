/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
#![allow(clippy::upper_case_acronyms, non_camel_case_types)]

use makepal_core::colorspace::ColorSpace;

/// Chunk types the encoder can emit, see
/// table 5.3 of https://www.w3.org/TR/2003/REC-PNG-20031110/
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PngChunkType {
    IHDR,
    IDAT,
    IEND,
    gAMA,
    bKGD,
    tIME,
    tEXt
}

impl PngChunkType {
    /// The four ascii bytes identifying this chunk in a stream
    pub const fn tag(self) -> [u8; 4] {
        match self {
            Self::IHDR => *b"IHDR",
            Self::IDAT => *b"IDAT",
            Self::IEND => *b"IEND",
            Self::gAMA => *b"gAMA",
            Self::bKGD => *b"bKGD",
            Self::tIME => *b"tIME",
            Self::tEXt => *b"tEXt"
        }
    }
}

/// Per scanline filter applied before compression
///
/// The discriminant is the filter type byte prefixed to every
/// scanline in the compressed stream.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Default)]
pub enum FilterMethod {
    #[default]
    None,
    Sub,
    Up,
    Average,
    Paeth
}

impl FilterMethod {
    pub const fn from_int(int: u8) -> Option<FilterMethod> {
        match int {
            0 => Some(FilterMethod::None),
            1 => Some(FilterMethod::Sub),
            2 => Some(FilterMethod::Up),
            3 => Some(FilterMethod::Average),
            4 => Some(FilterMethod::Paeth),
            _ => None
        }
    }

    pub const fn to_int(self) -> u8 {
        match self {
            FilterMethod::None => 0,
            FilterMethod::Sub => 1,
            FilterMethod::Up => 2,
            FilterMethod::Average => 3,
            FilterMethod::Paeth => 4
        }
    }
}

/// Png color types for colorspaces the encoder can write
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum PngColor {
    Luma,
    LumaA,
    RGB,
    RGBA
}

impl PngColor {
    pub const fn from_colorspace(colorspace: ColorSpace) -> Option<PngColor> {
        match colorspace {
            ColorSpace::Luma => Some(Self::Luma),
            ColorSpace::LumaA => Some(Self::LumaA),
            ColorSpace::RGB => Some(Self::RGB),
            ColorSpace::RGBA => Some(Self::RGBA),
            _ => None
        }
    }

    /// Color type byte stored in the IHDR chunk
    pub const fn to_int(self) -> u8 {
        match self {
            Self::Luma => 0,
            Self::RGB => 2,
            Self::LumaA => 4,
            Self::RGBA => 6
        }
    }

    pub const fn is_grayscale(self) -> bool {
        matches!(self, Self::Luma | Self::LumaA)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_bytes_round_trip() {
        for int in 0..5 {
            let filter = FilterMethod::from_int(int).unwrap();
            assert_eq!(filter.to_int(), int);
        }
        assert_eq!(FilterMethod::from_int(5), None);
        assert_eq!(FilterMethod::default(), FilterMethod::None);
    }

    #[test]
    fn unknown_colorspace_has_no_color_type() {
        assert_eq!(PngColor::from_colorspace(ColorSpace::Unknown), None);
        assert_eq!(
            PngColor::from_colorspace(ColorSpace::RGBA).map(PngColor::to_int),
            Some(6)
        );
    }
}
