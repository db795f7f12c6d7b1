/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fs;
use std::path::PathBuf;

use makepal_bin::cmd_parsers::global_options::CmdOptions;
use makepal_bin::errors::MakepalErrors;
use makepal_bin::workflow::create_palette;
use makepal_colors::ColorErrors;
use makepal_png::{Background, FilterMethod, TextChunk};

struct Scratch {
    dir: PathBuf
}

impl Scratch {
    fn new(name: &str) -> Scratch {
        let dir = std::env::temp_dir().join(format!("makepal-bin-{}-{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        Scratch { dir }
    }

    fn options(&self, list: &str) -> CmdOptions {
        let input = self.dir.join("colors.txt");
        fs::write(&input, list).unwrap();

        let mut options = CmdOptions::new();
        options.input = Some(input);
        options.out = self.dir.join("palette.png");
        options
    }

    fn file_names(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(&self.dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

impl Drop for Scratch {
    fn drop(&mut self) {
        let _ = fs::remove_dir_all(&self.dir);
    }
}

/// Decode `path`, returning frame info, pixels and `(keyword, text)` pairs
fn decode(path: &PathBuf) -> (png::OutputInfo, Vec<u8>, Vec<(String, String)>) {
    let mut decoder = png::Decoder::new(fs::File::open(path).unwrap());
    decoder.set_transformations(png::Transformations::IDENTITY);
    let mut reader = decoder.read_info().unwrap();
    let mut pixels = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut pixels).unwrap();
    pixels.truncate(info.buffer_size());

    let text = reader
        .info()
        .uncompressed_latin1_text
        .iter()
        .map(|t| (t.keyword.clone(), t.text.clone()))
        .collect();

    (info, pixels, text)
}

#[test]
fn three_colors_make_three_pixels() {
    let scratch = Scratch::new("three");
    let options = scratch.options("red\n00ff00\n0000ffff\n");

    create_palette(&options).unwrap();

    let (info, pixels, _) = decode(&options.out);
    assert_eq!((info.width, info.height), (3, 1));
    assert_eq!(info.color_type, png::ColorType::Rgba);
    assert_eq!(info.bit_depth, png::BitDepth::Eight);
    assert_eq!(pixels, [255, 0, 0, 255, 0, 255, 0, 255, 0, 0, 255, 255]);
    assert_eq!(scratch.file_names(), ["colors.txt", "palette.png"]);
}

#[test]
fn options_reach_the_file() {
    let scratch = Scratch::new("options");
    let mut options = scratch.options("f0a\nteal\n#11223344\n");
    options.filter = FilterMethod::Paeth;
    options.compression = 0;
    options.gamma = Some(0.45455);
    options.background = Some(Background::Rgb(0, 0, 0));
    options.timestamp = true;
    options.text = vec![TextChunk::new("Title", "Test palette")];

    create_palette(&options).unwrap();

    let (_, pixels, text) = decode(&options.out);
    assert_eq!(
        pixels,
        [0xff, 0x00, 0xaa, 0xff, 0, 128, 128, 255, 0x11, 0x22, 0x33, 0x44]
    );
    assert_eq!(text, [("Title".to_string(), "Test palette".to_string())]);
}

#[test]
fn malformed_line_leaves_no_file() {
    let scratch = Scratch::new("malformed");
    let options = scratch.options("red\nblue\nnotacolor\nwhite\nblack\n");

    match create_palette(&options) {
        Err(MakepalErrors::Colors(ColorErrors::Format { line, .. })) => assert_eq!(line, 3),
        other => panic!("unexpected result {other:?}")
    }
    assert_eq!(scratch.file_names(), ["colors.txt"]);
}

#[test]
fn empty_list_is_an_error() {
    let scratch = Scratch::new("empty");
    let options = scratch.options("");

    assert!(matches!(create_palette(&options), Err(MakepalErrors::NoColors)));
    assert_eq!(scratch.file_names(), ["colors.txt"]);
}

#[test]
fn rejected_metadata_leaves_no_file() {
    let scratch = Scratch::new("metadata");
    let mut options = scratch.options("red\n");
    options.text = vec![TextChunk::new(" leading space", "x")];

    assert!(matches!(create_palette(&options), Err(MakepalErrors::Encode(_))));
    assert_eq!(scratch.file_names(), ["colors.txt"]);
}

#[test]
fn missing_input_names_the_path() {
    let scratch = Scratch::new("missing");
    let mut options = scratch.options("red\n");
    options.input = Some(scratch.dir.join("does-not-exist.txt"));

    match create_palette(&options) {
        Err(MakepalErrors::Io(path, _)) => assert!(path.ends_with("does-not-exist.txt")),
        other => panic!("unexpected result {other:?}")
    }
    assert!(!options.out.exists());
}

#[test]
fn unstorable_gamma_leaves_no_file() {
    let scratch = Scratch::new("gamma");
    let mut options = scratch.options("red\n");
    options.gamma = Some(0.000_000_1);

    assert!(matches!(create_palette(&options), Err(MakepalErrors::Encode(_))));
    assert_eq!(scratch.file_names(), ["colors.txt"]);
}
