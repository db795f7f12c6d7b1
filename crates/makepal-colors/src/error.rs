/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use core::fmt::{Debug, Display, Formatter};

use crate::parse::MAX_TOKEN_LENGTH;

/// Errors possible when reading a color list
pub enum ColorErrors {
    /// A line is not a color
    ///
    /// # Arguments
    /// - line: 1 based line number
    /// - token: the offending token
    Format { line: usize, token: String },
    /// A line is longer than any color can be
    TooLong { line: usize, length: usize },
    /// The list could not grow
    OutOfMemory,
    /// Reading the input failed
    Io(std::io::Error)
}

impl ColorErrors {
    /// The line an error was found on, if it is tied to one
    pub const fn line(&self) -> Option<usize> {
        match self {
            ColorErrors::Format { line, .. } | ColorErrors::TooLong { line, .. } => Some(*line),
            _ => None
        }
    }
}

impl Debug for ColorErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            ColorErrors::Format { line, token } => {
                write!(f, "List format error at line {line}, {token:?} is not a color")
            }
            ColorErrors::TooLong { line, length } => {
                write!(
                    f,
                    "List format error at line {line}, token of {length} characters is longer than {MAX_TOKEN_LENGTH}"
                )
            }
            ColorErrors::OutOfMemory => {
                write!(f, "Out of memory")
            }
            ColorErrors::Io(err) => {
                write!(f, "Cannot read color list: {err}")
            }
        }
    }
}

impl Display for ColorErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl std::error::Error for ColorErrors {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ColorErrors::Io(err) => Some(err),
            _ => None
        }
    }
}

impl From<std::io::Error> for ColorErrors {
    fn from(value: std::io::Error) -> Self {
        ColorErrors::Io(value)
    }
}
