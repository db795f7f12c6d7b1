/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

use log::{debug, info};
use makepal_colors::{read_colors, ColorList, InputMode};
use makepal_core::bit_depth::BitDepth;
use makepal_core::colorspace::ColorSpace;
use makepal_core::options::EncoderOptions;
use makepal_png::{FilterMethod, PngEncoder, PngMetadata};

use crate::cmd_parsers::global_options::CmdOptions;
use crate::errors::MakepalErrors;
use crate::file_io::PendingFile;

/// Read the color list, then write it out as a one row image
pub fn create_palette(options: &CmdOptions) -> Result<(), MakepalErrors> {
    let colors = read_input(options.input.as_deref())?;

    if colors.is_empty() {
        return Err(MakepalErrors::NoColors);
    }
    debug!("Colors:");
    for color in &colors {
        debug!("  {:?}", color);
    }
    debug!("Size: {}", colors.len());

    let encoder_options = EncoderOptions::new(colors.len(), 1, ColorSpace::RGBA, BitDepth::Eight)
        .set_compression_level(options.compression);

    write_palette(
        &options.out,
        encoder_options,
        options.metadata(),
        options.filter,
        &colors
    )?;
    info!("Wrote {} colors to {:?}", colors.len(), options.out);
    Ok(())
}

/// Resolve colors from `input`, or interactively from standard input
pub fn read_input(input: Option<&Path>) -> Result<ColorList, MakepalErrors> {
    match input {
        Some(path) => {
            let file = File::open(path).map_err(|e| MakepalErrors::Io(path.to_path_buf(), e))?;
            Ok(read_colors(BufReader::new(file), InputMode::File)?)
        }
        None => {
            info!("Reading colors from standard input, an empty line ends the list");
            let stdin = std::io::stdin();
            Ok(read_colors(stdin.lock(), InputMode::Interactive)?)
        }
    }
}

/// Encode `colors` as a single row into `path`.
///
/// Nothing is left at `path` if any step fails.
pub fn write_palette(
    path: &Path, options: EncoderOptions, metadata: PngMetadata, filter: FilterMethod,
    colors: &ColorList
) -> Result<(), MakepalErrors> {
    let (pending, sink) = PendingFile::create(path)?;

    let mut encoder = PngEncoder::init(options, metadata, sink)?;
    encoder.set_row_filter(filter);

    if let Err(e) = encoder.write_row(colors.as_rgba_bytes()) {
        encoder.abort();
        return Err(e.into());
    }
    let mut sink = encoder.finish()?;

    sink.flush()
        .map_err(|e| MakepalErrors::Io(pending.target().to_path_buf(), e))?;
    drop(sink);

    pending.commit()
}
