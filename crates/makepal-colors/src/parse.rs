/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Turning a single token into a color

use crate::named::named_color;
use crate::rgba::Rgba;

/// Longest token accepted on an input line, `#` plus eight hex digits
pub const MAX_TOKEN_LENGTH: usize = 9;

/// Parse a color name or hex code.
///
/// Accepted forms, case insensitive:
/// - a name from the named color table, e.g `red`
/// - 3 hex digits `rgb`, each digit is doubled, so `f0a` is `ff00aa`
/// - 6 hex digits `rrggbb`
/// - 8 hex digits `rrggbbaa`
///
/// Hex codes may be prefixed by `#` or `0x`. Alpha is fully opaque
/// unless given.
///
/// Lists read with [`read_colors`](crate::read_colors) or
/// [`resolve_tokens`](crate::resolve_tokens) cap tokens at
/// [`MAX_TOKEN_LENGTH`], so there 8 digit hex only fits with the `#` prefix
/// or none.
///
/// ```
/// use makepal_colors::{parse_color, Rgba};
/// assert_eq!(parse_color("f0a"), Some(Rgba::opaque(0xFF, 0x00, 0xAA)));
/// assert_eq!(parse_color("#0000ff80"), Some(Rgba::new(0, 0, 255, 0x80)));
/// assert_eq!(parse_color("12g"), None);
/// ```
pub fn parse_color(token: &str) -> Option<Rgba> {
    let token = token.to_ascii_lowercase();

    named_color(&token).or_else(|| parse_hex(&token))
}

/// Whether `token` denotes a color
pub fn is_color(token: &str) -> bool {
    parse_color(token).is_some()
}

fn parse_hex(token: &str) -> Option<Rgba> {
    let digits = token
        .strip_prefix('#')
        .or_else(|| token.strip_prefix("0x"))
        .unwrap_or(token);

    let nibbles = digits
        .chars()
        .map(|c| c.to_digit(16).map(|d| d as u8))
        .collect::<Option<Vec<u8>>>()?;

    let byte = |i: usize| (nibbles[i] << 4) | nibbles[i + 1];

    match nibbles.len() {
        3 => Some(Rgba::opaque(
            nibbles[0] * 0x11,
            nibbles[1] * 0x11,
            nibbles[2] * 0x11
        )),
        6 => Some(Rgba::opaque(byte(0), byte(2), byte(4))),
        8 => Some(Rgba::new(byte(0), byte(2), byte(4), byte(6))),
        _ => None
    }
}
