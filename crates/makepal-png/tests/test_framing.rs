/*
 * Copyright (c) 2023.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use makepal_core::bit_depth::BitDepth;
use makepal_core::colorspace::ColorSpace;
use makepal_core::options::EncoderOptions;
use makepal_png::crc::calc_crc;
use makepal_png::{Background, PngEncoder, PngMetadata, PngTime, TextChunk};
use nanorand::Rng;

const SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

struct Chunk {
    name: [u8; 4],
    data: Vec<u8>
}

/// Split a png into chunks, checking lengths and crcs on the way
fn split_chunks(png: &[u8]) -> Vec<Chunk> {
    assert_eq!(&png[..8], &SIGNATURE);

    let mut chunks = vec![];
    let mut rest = &png[8..];

    while !rest.is_empty() {
        let length = u32::from_be_bytes(rest[0..4].try_into().unwrap()) as usize;
        let name: [u8; 4] = rest[4..8].try_into().unwrap();
        let data = rest[8..8 + length].to_vec();
        let crc = u32::from_be_bytes(rest[8 + length..12 + length].try_into().unwrap());

        assert_eq!(crc, calc_crc(&rest[4..8 + length]), "bad crc for {name:?}");

        chunks.push(Chunk { name, data });
        rest = &rest[12 + length..];
    }
    chunks
}

fn names(chunks: &[Chunk]) -> Vec<&[u8]> {
    let mut names: Vec<&[u8]> = chunks.iter().map(|c| c.name.as_slice()).collect();
    // many IDATs are reported as one
    names.dedup();
    names
}

#[test]
fn test_minimal_image_has_three_chunks() {
    let options = EncoderOptions::new(3, 1, ColorSpace::RGBA, BitDepth::Eight);
    let pixels = [255, 0, 0, 255, 0, 255, 0, 255, 0, 0, 255, 255];

    let png = PngEncoder::encode_image(options, PngMetadata::new(), &pixels, vec![]).unwrap();
    let chunks = split_chunks(&png);

    assert_eq!(names(&chunks), [b"IHDR", b"IDAT", b"IEND"]);
    // width 3, height 1, depth 8, color type 6, compression, filter and interlace 0
    assert_eq!(
        chunks[0].data,
        [0, 0, 0, 3, 0, 0, 0, 1, 8, 6, 0, 0, 0]
    );
    assert!(chunks.last().unwrap().data.is_empty());
}

#[test]
fn test_ihdr_color_types() {
    let expected = [
        (ColorSpace::Luma, 0),
        (ColorSpace::RGB, 2),
        (ColorSpace::LumaA, 4),
        (ColorSpace::RGBA, 6)
    ];
    for (colorspace, color_type) in expected {
        let options = EncoderOptions::new(1, 1, colorspace, BitDepth::Sixteen);
        let data = vec![0; colorspace.num_components() * 2];

        let png = PngEncoder::encode_image(options, PngMetadata::new(), &data, vec![]).unwrap();
        let ihdr = &split_chunks(&png)[0];

        assert_eq!(ihdr.data[8], 16);
        assert_eq!(ihdr.data[9], color_type);
    }
}

#[test]
fn test_large_images_split_idat() {
    let (width, height) = (200, 100);
    let mut data = vec![0; width * height * 4];
    nanorand::WyRand::new_seed(7).fill(&mut data);

    let options = EncoderOptions::new(width, height, ColorSpace::RGBA, BitDepth::Eight);
    let png = PngEncoder::encode_image(options, PngMetadata::new(), &data, vec![]).unwrap();
    let chunks = split_chunks(&png);

    let idats: Vec<&Chunk> = chunks.iter().filter(|c| &c.name == b"IDAT").collect();

    // random data doesn't compress, so it can't fit a single chunk
    assert!(idats.len() > 1);
    assert!(idats.iter().all(|c| c.data.len() <= 8192 && !c.data.is_empty()));
    // all but the last chunk are full
    assert!(idats[..idats.len() - 1].iter().all(|c| c.data.len() == 8192));
    assert_eq!(names(&chunks), [b"IHDR", b"IDAT", b"IEND"]);
}

#[test]
fn test_ancillary_chunk_order_and_payloads() {
    let time = PngTime {
        year:   2023,
        month:  10,
        day:    18,
        hour:   13,
        minute: 45,
        second: 30
    };
    let metadata = PngMetadata::new()
        .set_gamma(0.45455)
        .set_background(Background::Rgb(255, 255, 255))
        .set_time(time)
        .add_text(TextChunk::new("Title", "palette"))
        .add_trailing_text(TextChunk::new("Comment", "done"));

    let options = EncoderOptions::new(1, 1, ColorSpace::RGBA, BitDepth::Eight);
    let png = PngEncoder::encode_image(options, metadata, &[1, 2, 3, 4], vec![]).unwrap();
    let chunks = split_chunks(&png);

    assert_eq!(
        names(&chunks),
        [
            b"IHDR", b"gAMA", b"bKGD", b"tIME", b"tEXt", b"IDAT", b"tEXt", b"IEND"
        ]
    );
    assert_eq!(chunks[1].data, 45455_u32.to_be_bytes());
    assert_eq!(chunks[2].data, [0, 255, 0, 255, 0, 255]);
    assert_eq!(chunks[3].data, [0x07, 0xE7, 10, 18, 13, 45, 30]);
    assert_eq!(chunks[4].data, b"Title\0palette");
    assert_eq!(chunks[chunks.len() - 2].data, b"Comment\0done");
}

#[test]
fn test_gray_background_is_two_bytes() {
    let metadata = PngMetadata::new().set_background(Background::Gray(128));
    let options = EncoderOptions::new(1, 1, ColorSpace::LumaA, BitDepth::Eight);

    let png = PngEncoder::encode_image(options, metadata, &[1, 2], vec![]).unwrap();
    let chunks = split_chunks(&png);

    assert_eq!(&chunks[1].name, b"bKGD");
    assert_eq!(chunks[1].data, [0, 128]);
}

#[test]
fn test_output_is_deterministic() {
    let options = EncoderOptions::new(4, 4, ColorSpace::RGB, BitDepth::Eight);
    let data: Vec<u8> = (0..48).collect();

    let first = PngEncoder::encode_image(options, PngMetadata::new(), &data, vec![]).unwrap();
    let second = PngEncoder::encode_image(options, PngMetadata::new(), &data, vec![]).unwrap();

    assert_eq!(first, second);
}
