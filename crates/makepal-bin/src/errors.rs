/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Errors reported by the command line front end
use std::fmt::{Debug, Display, Formatter};
use std::path::PathBuf;

use makepal_colors::ColorErrors;
use makepal_png::PngEncodeErrors;

pub enum MakepalErrors {
    /// The color list could not be read or resolved
    Colors(ColorErrors),
    /// The encoder rejected the image or could not write it
    Encode(PngEncodeErrors),
    /// A file could not be opened, created or renamed
    Io(PathBuf, std::io::Error),
    /// The output path does not name a file
    InvalidOutput(PathBuf),
    /// Input ended before any color was read
    NoColors
}

impl Debug for MakepalErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            MakepalErrors::Colors(err) => write!(f, "{err:?}"),
            MakepalErrors::Encode(err) => write!(f, "{err:?}"),
            MakepalErrors::Io(path, err) => write!(f, "{}: {err}", path.display()),
            MakepalErrors::InvalidOutput(path) => {
                write!(f, "Output path {} is not a file name", path.display())
            }
            MakepalErrors::NoColors => write!(f, "No colors given, nothing to encode")
        }
    }
}

impl Display for MakepalErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for MakepalErrors {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MakepalErrors::Colors(err) => Some(err),
            MakepalErrors::Encode(err) => Some(err),
            MakepalErrors::Io(_, err) => Some(err),
            _ => None
        }
    }
}

impl From<ColorErrors> for MakepalErrors {
    fn from(value: ColorErrors) -> Self {
        MakepalErrors::Colors(value)
    }
}

impl From<PngEncodeErrors> for MakepalErrors {
    fn from(value: PngEncodeErrors) -> Self {
        MakepalErrors::Encode(value)
    }
}
