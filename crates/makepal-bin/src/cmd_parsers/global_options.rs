/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::path::PathBuf;

use clap::parser::ValueSource;
use clap::ArgMatches;
use log::{info, Level};
use makepal_core::options::MAX_COMPRESSION_LEVEL;
use makepal_png::{Background, FilterMethod, PngMetadata, PngTime, TextChunk};

use crate::cmd_args::{RowFilter, DEFAULT_OUTPUT};

#[derive(Debug, Clone, PartialEq)]
pub struct CmdOptions {
    /// Color list file, `None` reads standard input
    pub input:       Option<PathBuf>,
    pub out:         PathBuf,
    pub filter:      FilterMethod,
    pub compression: u8,
    pub gamma:       Option<f32>,
    pub background:  Option<Background>,
    pub timestamp:   bool,
    pub text:        Vec<TextChunk>
}

impl CmdOptions {
    pub fn new() -> CmdOptions {
        CmdOptions {
            input:       None,
            out:         PathBuf::from(DEFAULT_OUTPUT),
            filter:      FilterMethod::None,
            compression: MAX_COMPRESSION_LEVEL,
            gamma:       None,
            background:  None,
            timestamp:   false,
            text:        Vec::new()
        }
    }

    /// Ancillary chunks requested on the command line
    pub fn metadata(&self) -> PngMetadata {
        let mut metadata = PngMetadata::new();

        if let Some(gamma) = self.gamma {
            metadata = metadata.set_gamma(gamma);
        }
        if let Some(background) = self.background {
            metadata = metadata.set_background(background);
        }
        if self.timestamp {
            metadata = metadata.set_time(PngTime::now());
        }
        for text in &self.text {
            metadata = metadata.add_text(text.clone());
        }
        metadata
    }
}

impl Default for CmdOptions {
    fn default() -> Self {
        CmdOptions::new()
    }
}

pub fn parse_options(options: &ArgMatches) -> CmdOptions {
    let mut cmd_options = CmdOptions::new();

    if let Some(input) = options.get_one::<PathBuf>("input") {
        info!("Reading colors from {:?}", input);
        cmd_options.input = Some(input.clone());
    }
    if let Some(out) = options.get_one::<PathBuf>("out") {
        cmd_options.out = out.clone();
    }
    if options.value_source("filter") == Some(ValueSource::CommandLine) {
        if let Some(filter) = options.get_one::<RowFilter>("filter") {
            info!("Setting row filter to {:?}", filter);
            cmd_options.filter = filter.to_filter_method();
        }
    }
    if let Some(level) = options.get_one::<u8>("compression") {
        cmd_options.compression = *level;
    }
    cmd_options.gamma = options.get_one::<f32>("gamma").copied();
    cmd_options.background = options.get_one::<Background>("background").copied();
    cmd_options.timestamp = options.get_flag("timestamp");

    if let Some(texts) = options.get_many::<TextChunk>("text") {
        cmd_options.text = texts.cloned().collect();
    }
    cmd_options
}

/// Set up logging options
pub fn setup_logger(options: &ArgMatches) {
    let log_level;

    if options.get_flag("debug") {
        log_level = Level::Debug;
    } else if options.get_flag("trace") {
        log_level = Level::Trace;
    } else if options.get_flag("warn") {
        log_level = Level::Warn
    } else if options.get_flag("info") {
        log_level = Level::Info;
    } else {
        log_level = Level::Warn;
    }

    if let Err(e) = simple_logger::init_with_level(log_level) {
        eprintln!("Could not initialize logger: {e}");
        return;
    }

    info!("Initialized logger");
    info!("Log level :{}", log_level);
}
