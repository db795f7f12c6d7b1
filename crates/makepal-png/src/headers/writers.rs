/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use log::trace;
use makepal_core::bytestream::{ByteIoError, ByteWriter, ByteWriterTrait};
use makepal_core::options::EncoderOptions;

use crate::crc::calc_crc_with_bytes;
use crate::enums::{PngChunkType, PngColor};
use crate::metadata::{Background, PngTime, TextChunk};

type ChunkWriter<'a> = ByteWriter<&'a mut Vec<u8>>;

pub(crate) fn write_ihdr(
    options: &EncoderOptions, color: PngColor, output: &mut ChunkWriter
) -> Result<(), ByteIoError> {
    // dimensions were validated to fit in 31 bits
    output.write_u32_be_err(u32::try_from(options.width())?)?;
    output.write_u32_be_err(u32::try_from(options.height())?)?;
    // write depth
    output.write_u8_err(options.depth().bit_size() as u8)?;
    // write color
    output.write_u8_err(color.to_int())?;
    // compression method, always deflate
    output.write_u8_err(0)?;
    // filter method, always adaptive filtering with five types
    output.write_u8_err(0)?;
    // interlace method, always Standard
    output.write_u8_err(0)
}

pub(crate) fn write_gamma(gamma: f32, writer: &mut ChunkWriter) -> Result<(), ByteIoError> {
    // scale by 100000.0
    let gamma_value = (f64::from(gamma) * 100000.0).round() as u32;
    writer.write_u32_be_err(gamma_value)
}

pub(crate) fn write_background(
    background: Background, writer: &mut ChunkWriter
) -> Result<(), ByteIoError> {
    match background {
        Background::Gray(value) => writer.write_u16_be_err(value),
        Background::Rgb(r, g, b) => {
            writer.write_u16_be_err(r)?;
            writer.write_u16_be_err(g)?;
            writer.write_u16_be_err(b)
        }
    }
}

pub(crate) fn write_time(time: PngTime, writer: &mut ChunkWriter) -> Result<(), ByteIoError> {
    writer.write_u16_be_err(time.year)?;
    writer.write_all(&[time.month, time.day, time.hour, time.minute, time.second])
}

/// Write a text chunk, keyword and text must already be
/// validated as Latin-1
pub(crate) fn write_text(text: &TextChunk, writer: &mut ChunkWriter) -> Result<(), ByteIoError> {
    let latin1 = |s: &str| -> Vec<u8> { s.chars().map(|c| c as u8).collect() };

    writer.write_all(&latin1(&text.keyword))?;
    // null separator
    writer.write_u8_err(0)?;
    writer.write_all(&latin1(&text.text))
}

// iend is a no-op
pub(crate) fn write_iend(_: &mut ChunkWriter) -> Result<(), ByteIoError> {
    Ok(())
}

/// Write header writes the boilerplate for each png chunk
///
/// It writes the length, chunk type, calls a function to write the
/// data and then calculates the CRC chunk for that png and writes it.
///
/// This should be called with the appropriate inner function to write data
pub(crate) fn write_header_fn<T, F>(
    writer: &mut ByteWriter<T>, chunk_type: PngChunkType, func: F
) -> Result<(), ByteIoError>
where
    T: ByteWriterTrait,
    F: FnOnce(&mut ByteWriter<&mut Vec<u8>>) -> Result<(), ByteIoError>
{
    // Ancillary chunks are small, so we build the payload in memory
    // since the length comes before the data and can't be known until the
    // data is written
    let mut payload = Vec::with_capacity(16);
    let mut local_writer = ByteWriter::new(&mut payload);

    (func)(&mut local_writer)?;

    write_chunk(chunk_type, &payload, writer)
}

/// Frame `data` as a chunk: length, type, data then the crc of type and data
pub(crate) fn write_chunk<T: ByteWriterTrait>(
    chunk_type: PngChunkType, data: &[u8], writer: &mut ByteWriter<T>
) -> Result<(), ByteIoError> {
    let tag = chunk_type.tag();
    let length = u32::try_from(data.len())?;

    trace!("Writing {chunk_type:?} chunk of {length} bytes");

    // write length
    writer.write_u32_be_err(length)?;
    // write chunk name
    writer.write_all(&tag)?;
    // write chunk data
    writer.write_all(data)?;
    // crc is a continuous function, so first crc the chunk name
    // and then crc that with the chunk bytes passing in the previous crc

    // equal to crc((chunk.chunk + data) ,u32::MAX))
    let crc = calc_crc_with_bytes(&tag, u32::MAX);
    let crc = !calc_crc_with_bytes(data, crc);
    writer.write_u32_be_err(crc)
}

#[cfg(test)]
mod tests {
    use makepal_core::bytestream::ByteWriter;

    use super::*;

    #[test]
    fn iend_is_twelve_fixed_bytes() {
        let mut sink = vec![];
        let mut writer = ByteWriter::new(&mut sink);
        write_header_fn(&mut writer, PngChunkType::IEND, write_iend).unwrap();

        assert_eq!(
            sink,
            [0, 0, 0, 0, b'I', b'E', b'N', b'D', 0xAE, 0x42, 0x60, 0x82]
        );
    }

    #[test]
    fn text_is_keyword_null_text() {
        let mut sink = vec![];
        let mut writer = ByteWriter::new(&mut sink);
        let text = TextChunk::new("Title", "caf\u{e9}");

        write_header_fn(&mut writer, PngChunkType::tEXt, |w| write_text(&text, w)).unwrap();

        // length
        assert_eq!(&sink[0..4], &[0, 0, 0, 10]);
        assert_eq!(&sink[4..8], b"tEXt");
        assert_eq!(&sink[8..18], b"Title\0caf\xe9");
        assert_eq!(sink.len(), 22);
    }

    #[test]
    fn gamma_is_scaled() {
        let mut sink = vec![];
        let mut writer = ByteWriter::new(&mut sink);
        write_gamma(0.45455, &mut writer).unwrap();
        assert_eq!(u32::from_be_bytes(sink[..4].try_into().unwrap()), 45455);
    }
}
