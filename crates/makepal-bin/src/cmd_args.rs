/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::PathBuf;

use clap::builder::PossibleValue;
use clap::{value_parser, Arg, ArgAction, Command, ValueEnum};
use makepal_colors::parse_color;
use makepal_png::{Background, FilterMethod, TextChunk};

/// Name of the image written when `--out` isn't given
pub const DEFAULT_OUTPUT: &str = "palette.png";

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum RowFilter {
    None,
    Sub,
    Up,
    Average,
    Paeth
}

impl RowFilter {
    pub const fn to_filter_method(self) -> FilterMethod {
        match self {
            RowFilter::None => FilterMethod::None,
            RowFilter::Sub => FilterMethod::Sub,
            RowFilter::Up => FilterMethod::Up,
            RowFilter::Average => FilterMethod::Average,
            RowFilter::Paeth => FilterMethod::Paeth
        }
    }
}

impl ValueEnum for RowFilter {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::None, Self::Sub, Self::Up, Self::Average, Self::Paeth]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(match self {
            Self::None => PossibleValue::new("none"),
            Self::Sub => PossibleValue::new("sub"),
            Self::Up => PossibleValue::new("up"),
            Self::Average => PossibleValue::new("average"),
            Self::Paeth => PossibleValue::new("paeth")
        })
    }
}

/// Parse a `KEY=VALUE` pair into a text chunk
fn parse_text(value: &str) -> Result<TextChunk, String> {
    match value.split_once('=') {
        Some((key, text)) if !key.is_empty() => Ok(TextChunk::new(key, text)),
        _ => Err(format!("expected KEY=VALUE, found {value:?}"))
    }
}

/// Parse any color token into an RGB background, alpha is dropped
fn parse_background(value: &str) -> Result<Background, String> {
    parse_color(value)
        .map(|c| Background::Rgb(c.r.into(), c.g.into(), c.b.into()))
        .ok_or_else(|| format!("{value:?} is not a color"))
}

#[rustfmt::skip]
pub fn create_cmd_args() -> Command {
    Command::new("makepal")
        .about("Create a one row png with one pixel for every color in a list")
        .long_about("Create a one row png with one pixel for every color in a list.\n\nColors are read one per line, either color names (red, teal) or\n3, 6 or 8 digit hex codes optionally prefixed with # or 0x.\nWithout a list file colors are read from standard input until an empty line.")
        .arg(Arg::new("input")
            .help("File with one color per line, standard input is used when absent")
            .value_name("LIST FILE")
            .value_parser(value_parser!(PathBuf)))
        .arg(Arg::new("out")
            .short('o')
            .long("out")
            .help("Image to write")
            .value_parser(value_parser!(PathBuf))
            .default_value(DEFAULT_OUTPUT))
        .arg(Arg::new("debug")
            .long("debug")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display debug information and higher"))
        .arg(Arg::new("trace")
            .long("trace")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display very verbose information"))
        .arg(Arg::new("warn")
            .long("warn")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display warnings and errors"))
        .arg(Arg::new("info")
            .long("info")
            .action(ArgAction::SetTrue)
            .help_heading("LOGGING")
            .help("Display information about the encoding options"))
        .arg(Arg::new("filter")
            .long("filter")
            .help_heading("ENCODING")
            .help("Scanline filter applied before compression")
            .value_parser(value_parser!(RowFilter))
            .default_value("none"))
        .arg(Arg::new("compression")
            .long("compression")
            .help_heading("ENCODING")
            .help("Deflate compression level, 0 stores and 9 compresses best")
            .value_parser(value_parser!(u8).range(0..=9))
            .default_value("9"))
        .arg(Arg::new("gamma")
            .long("gamma")
            .help_heading("METADATA")
            .help("File gamma to store in a gAMA chunk, e.g 0.45455")
            .value_parser(value_parser!(f32)))
        .arg(Arg::new("background")
            .long("background")
            .help_heading("METADATA")
            .help("Background color to store in a bKGD chunk, any color from the list syntax")
            .value_parser(parse_background))
        .arg(Arg::new("timestamp")
            .long("timestamp")
            .action(ArgAction::SetTrue)
            .help_heading("METADATA")
            .help("Store the current time in a tIME chunk"))
        .arg(Arg::new("text")
            .long("text")
            .action(ArgAction::Append)
            .value_name("KEY=VALUE")
            .help_heading("METADATA")
            .help("Add a tEXt chunk, e.g --text Title=Sunset, can be repeated")
            .long_help("Add a tEXt chunk. Common keywords are Title, Author, Description,\nCopyright, E-mail and URL. Can be repeated.")
            .value_parser(parse_text))
}
