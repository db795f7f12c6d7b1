/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */
//! Color list reading and resolution
//!
//! Reads tokens naming colors, one per line, and resolves each to an
//! [`Rgba`] quadruple. A token is either a named color (`red`, `teal`, ...)
//! or a 3, 6 or 8 digit hex code optionally prefixed by `#` or `0x`.
//! Tokens in a list are at most [`MAX_TOKEN_LENGTH`] characters long, so
//! an 8 digit code there takes the `#` prefix or none, not `0x`.
//!
//! ```
//! use makepal_colors::{read_colors, InputMode, Rgba};
//!
//! let input = "red\n00ff00\n0000ffff\n";
//! let colors = read_colors(input.as_bytes(), InputMode::File).unwrap();
//!
//! assert_eq!(colors.len(), 3);
//! assert_eq!(colors.colors()[0], Rgba::opaque(255, 0, 0));
//! ```
pub use error::ColorErrors;
pub use list::{read_colors, resolve_tokens, ColorList, InputMode};
pub use named::named_color;
pub use parse::{is_color, parse_color, MAX_TOKEN_LENGTH};
pub use rgba::Rgba;

mod error;
mod list;
mod named;
mod parse;
mod rgba;
