/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::io::{BufRead, ErrorKind, Read};

use log::{debug, trace};

use crate::error::ColorErrors;
use crate::parse::{parse_color, MAX_TOKEN_LENGTH};
use crate::rgba::Rgba;

/// Most bytes of a line kept in memory, tokens may be padded with whitespace
const MAX_LINE_LENGTH: usize = 256;

/// How the end of a color list is detected
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum InputMode {
    /// Someone is typing, an empty line ends the list
    Interactive,
    /// Read until end of file, empty lines are errors
    File
}

/// Colors in the order they were read
///
/// Duplicates are kept, the list order is the left to right
/// pixel order of the image.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ColorList {
    colors: Vec<Rgba>
}

impl ColorList {
    pub fn new() -> ColorList {
        ColorList::default()
    }

    /// Append a color to the end of the list
    pub fn push(&mut self, color: Rgba) -> Result<(), ColorErrors> {
        self.colors
            .try_reserve(1)
            .map_err(|_| ColorErrors::OutOfMemory)?;
        self.colors.push(color);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Rgba] {
        &self.colors
    }

    /// View the colors as packed RGBA pixel bytes
    pub fn as_rgba_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.colors.as_slice())
    }
}

impl<'a> IntoIterator for &'a ColorList {
    type Item = &'a Rgba;
    type IntoIter = core::slice::Iter<'a, Rgba>;

    fn into_iter(self) -> Self::IntoIter {
        self.colors.iter()
    }
}

/// Resolve a single line into a color
fn resolve_line(line: usize, raw: &str) -> Result<Rgba, ColorErrors> {
    let length = raw.chars().count();

    if length > MAX_TOKEN_LENGTH {
        return Err(ColorErrors::TooLong { line, length });
    }
    let color = parse_color(raw).ok_or_else(|| ColorErrors::Format {
        line,
        token: raw.to_string()
    })?;
    trace!("Line {line}: {raw:?} is {color:?}");

    Ok(color)
}

/// Resolve an ordered list of tokens, numbering them from line 1
///
/// Stops at the first token that isn't a color, no partial list is returned
///
/// ```
/// use makepal_colors::{resolve_tokens, Rgba};
/// let list = resolve_tokens(["red", "00ff00", "0000ffff"]).unwrap();
/// assert_eq!(list.colors()[1], Rgba::opaque(0, 255, 0));
/// ```
pub fn resolve_tokens<I, S>(tokens: I) -> Result<ColorList, ColorErrors>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>
{
    let mut list = ColorList::new();

    for (index, token) in tokens.into_iter().enumerate() {
        list.push(resolve_line(index + 1, token.as_ref())?)?;
    }
    Ok(list)
}

/// Read one color per line from `reader`
///
/// Surrounding whitespace on a line is ignored. Tokens longer than
/// [`MAX_TOKEN_LENGTH`] are rejected, never truncated. At most a few hundred
/// bytes of a line are buffered, the rest of an overlong line is skipped.
///
/// # Errors
/// - [`ColorErrors::Format`] / [`ColorErrors::TooLong`] with the line number
///   of the first bad line
/// - [`ColorErrors::Io`] if the reader fails
pub fn read_colors<R: BufRead>(mut reader: R, mode: InputMode) -> Result<ColorList, ColorErrors> {
    let mut list = ColorList::new();
    let mut buffer = Vec::new();
    let mut line = 0;

    loop {
        buffer.clear();

        let read = (&mut reader)
            .take(MAX_LINE_LENGTH as u64)
            .read_until(b'\n', &mut buffer)?;

        if read == 0 {
            debug!("End of input after {line} lines");
            break;
        }
        line += 1;

        if read == MAX_LINE_LENGTH && buffer.last() != Some(&b'\n') {
            let length = read + skip_line(&mut reader)?;
            return Err(ColorErrors::TooLong { line, length });
        }

        let raw = String::from_utf8_lossy(&buffer);
        let token = raw.trim();

        if token.is_empty() && mode == InputMode::Interactive {
            debug!("Empty line {line}, ending input");
            break;
        }
        list.push(resolve_line(line, token)?)?;
    }
    Ok(list)
}

/// Discard input up to and including the next newline, returning how
/// many bytes came before it
fn skip_line<R: BufRead>(reader: &mut R) -> Result<usize, ColorErrors> {
    let mut skipped = 0;

    loop {
        let (found, used) = {
            let available = match reader.fill_buf() {
                Ok(available) => available,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into())
            };
            if available.is_empty() {
                return Ok(skipped);
            }
            match available.iter().position(|&b| b == b'\n') {
                Some(pos) => (true, pos + 1),
                None => (false, available.len())
            }
        };
        reader.consume(used);

        if found {
            return Ok(skipped + used - 1);
        }
        skipped += used;
    }
}
