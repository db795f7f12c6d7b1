/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use flate2::{Compress, Compression, FlushCompress, Status};
use log::{debug, trace};
use makepal_core::bit_depth::BitDepth;
use makepal_core::bytestream::{ByteWriter, ByteWriterTrait};
use makepal_core::colorspace::ColorSpace;
use makepal_core::options::EncoderOptions;

use crate::constants::{IDAT_CHUNK_SIZE, MAX_DIMENSION, MAX_KEYWORD_LENGTH, PNG_SIGNATURE};
use crate::enums::{FilterMethod, PngChunkType, PngColor};
use crate::error::PngEncodeErrors;
use crate::filters::filter_scanline;
use crate::headers::writers::{
    write_background, write_chunk, write_gamma, write_header_fn, write_iend, write_ihdr,
    write_text, write_time
};
use crate::metadata::{Background, PngMetadata, TextChunk};

const SUPPORTED_COLORSPACES: [ColorSpace; 4] = [
    ColorSpace::Luma,
    ColorSpace::LumaA,
    ColorSpace::RGB,
    ColorSpace::RGBA
];

/// Extra space we make available to the compressor on every call
const DEFLATE_SLACK: usize = 4096;

/// Where an encoder is in writing an image
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum EncoderState {
    /// Signature and header chunks are in the sink, no rows yet
    HeaderWritten,
    /// This many rows have been filtered and fed to the compressor
    RowsWritten(usize),
    /// The trailer has been written
    Finalized,
    /// A call failed, the encoder accepts nothing else
    Failed
}

/// A png encoder writing an image one row at a time
///
/// The encoder owns the sink and the deflate context for the lifetime of
/// the image. Compressed data is sent to the sink in IDAT chunks of up
/// to 8 KB as it becomes available, so memory use doesn't grow with the
/// image height.
///
/// # Example
/// - Encode a 2 by 1 RGBA image
///
/// ```
/// use makepal_core::bit_depth::BitDepth;
/// use makepal_core::colorspace::ColorSpace;
/// use makepal_core::options::EncoderOptions;
/// use makepal_png::{PngEncodeErrors, PngEncoder, PngMetadata};
///
/// fn main() -> Result<(), PngEncodeErrors> {
///     let options = EncoderOptions::new(2, 1, ColorSpace::RGBA, BitDepth::Eight);
///     let mut encoder = PngEncoder::init(options, PngMetadata::new(), vec![])?;
///
///     encoder.write_row(&[255, 0, 0, 255, 0, 0, 255, 255])?;
///     let png = encoder.finish()?;
///     assert_eq!(&png[1..4], b"PNG");
///     Ok(())
/// }
/// ```
pub struct PngEncoder<T: ByteWriterTrait> {
    options:       EncoderOptions,
    writer:        ByteWriter<T>,
    compressor:    Option<Compress>,
    compressed:    Vec<u8>,
    previous_row:  Vec<u8>,
    filtered_row:  Vec<u8>,
    row_filter:    FilterMethod,
    row_size:      usize,
    components:    usize,
    trailing_text: Vec<TextChunk>,
    state:         EncoderState
}

impl<T: ByteWriterTrait> PngEncoder<T> {
    /// Validate the image description and write everything up to the
    /// first IDAT chunk into `sink`.
    ///
    /// # Arguments
    /// - options: Image width, height, colorspace, depth and compression level
    /// - metadata: Ancillary chunks to write, use [`PngMetadata::new`] for none
    /// - sink: Where the encoded image goes
    ///
    /// # Errors
    /// On an invalid description or a failing sink. The sink may hold a
    /// partial header at that point and should be discarded.
    pub fn init(
        options: EncoderOptions, metadata: PngMetadata, sink: T
    ) -> Result<PngEncoder<T>, PngEncodeErrors> {
        let color = validate_options(&options)?;
        validate_metadata(&metadata, &options, color)?;

        let row_size = options
            .row_size()
            .ok_or(PngEncodeErrors::Generic("Overflow"))?;
        let components = options
            .bytes_per_pixel()
            .ok_or(PngEncodeErrors::UnsupportedDepth(options.depth()))?;

        debug!(
            "Encoding {}x{} {:?} image, depth {:?}, compression level {}",
            options.width(),
            options.height(),
            options.colorspace(),
            options.depth(),
            options.compression_level()
        );

        let level = Compression::new(u32::from(options.compression_level()));

        let mut encoder = PngEncoder {
            options,
            writer: ByteWriter::new(sink),
            compressor: Some(Compress::new(level, true)),
            compressed: Vec::new(),
            previous_row: Vec::with_capacity(row_size),
            filtered_row: vec![0; row_size + 1],
            row_filter: FilterMethod::None,
            row_size,
            components,
            trailing_text: metadata.trailing_text.clone(),
            state: EncoderState::HeaderWritten
        };
        encoder.encode_headers(&metadata, color)?;

        Ok(encoder)
    }

    /// Encode a whole image in one call
    ///
    /// `data` holds `height` rows laid out one after another, sixteen bit
    /// samples are expected in big endian.
    ///
    /// Returns the sink once the trailer has been written
    pub fn encode_image(
        options: EncoderOptions, metadata: PngMetadata, data: &[u8], sink: T
    ) -> Result<T, PngEncodeErrors> {
        if let Some(expected) = options
            .row_size()
            .and_then(|size| size.checked_mul(options.height()))
        {
            if data.len() != expected {
                return Err(PngEncodeErrors::DataLengthMismatch(expected, data.len()));
            }
        }
        let mut encoder = PngEncoder::init(options, metadata, sink)?;

        for row in data.chunks_exact(encoder.row_size) {
            if let Err(err) = encoder.write_row(row) {
                encoder.abort();
                return Err(err);
            }
        }
        encoder.finish()
    }

    /// Change the filter used for subsequent rows
    ///
    /// Defaults to [`FilterMethod::None`]
    pub fn set_row_filter(&mut self, filter: FilterMethod) {
        self.row_filter = filter;
    }

    pub const fn row_filter(&self) -> FilterMethod {
        self.row_filter
    }

    pub const fn state(&self) -> EncoderState {
        self.state
    }

    /// Number of bytes a row passed to [`write_row`](Self::write_row) must have
    pub const fn row_size(&self) -> usize {
        self.row_size
    }

    pub const fn rows_written(&self) -> usize {
        match self.state {
            EncoderState::RowsWritten(rows) => rows,
            EncoderState::Finalized => self.options.height(),
            _ => 0
        }
    }

    /// Bytes handed to the sink so far
    pub const fn bytes_written(&self) -> usize {
        self.writer.bytes_written()
    }

    /// Filter and compress a single row of pixels
    ///
    /// # Errors
    /// - If the row length isn't `width * bytes per pixel`
    /// - If every row has already been written
    /// - If compression or the sink fails
    ///
    /// Any error moves the encoder to [`EncoderState::Failed`]
    pub fn write_row(&mut self, row: &[u8]) -> Result<(), PngEncodeErrors> {
        let rows = match self.state {
            EncoderState::HeaderWritten => 0,
            EncoderState::RowsWritten(rows) => rows,
            EncoderState::Finalized | EncoderState::Failed => {
                return Err(PngEncodeErrors::EncoderFailed)
            }
        };
        let result = if rows == self.options.height() {
            Err(PngEncodeErrors::TooManyRows(rows))
        } else if row.len() != self.row_size {
            Err(PngEncodeErrors::RowLengthMismatch(self.row_size, row.len()))
        } else {
            self.encode_row(row)
        };

        match result {
            Ok(()) => {
                self.state = EncoderState::RowsWritten(rows + 1);
                Ok(())
            }
            Err(err) => {
                self.state = EncoderState::Failed;
                Err(err)
            }
        }
    }

    /// Flush the compressor, write the remaining image data and the
    /// trailer then return the sink
    ///
    /// # Errors
    /// If not every row has been written, the encoder failed earlier
    /// or the sink fails.
    pub fn finish(mut self) -> Result<T, PngEncodeErrors> {
        let rows = match self.state {
            EncoderState::HeaderWritten => 0,
            EncoderState::RowsWritten(rows) => rows,
            EncoderState::Finalized | EncoderState::Failed => {
                return Err(PngEncodeErrors::EncoderFailed)
            }
        };
        if rows != self.options.height() {
            return Err(PngEncodeErrors::IncompleteImage(
                self.options.height(),
                rows
            ));
        }
        self.deflate(&[], FlushCompress::Finish)?;
        self.write_idat_chunks(true)?;

        for text in &self.trailing_text {
            write_header_fn(&mut self.writer, PngChunkType::tEXt, |w| {
                write_text(text, w)
            })?;
        }
        write_header_fn(&mut self.writer, PngChunkType::IEND, write_iend)?;
        self.writer.flush()?;

        self.state = EncoderState::Finalized;
        debug!("Finished png, {} bytes written", self.writer.bytes_written());

        let PngEncoder { writer, .. } = self;

        Ok(writer.into_inner())
    }

    /// Release the compression context and buffers without writing
    /// anything else
    ///
    /// Whatever the sink received so far is not a valid image.
    /// Dropping the encoder releases the same resources, this only makes
    /// the intent explicit on error paths.
    pub fn abort(mut self) {
        debug!(
            "Aborting png encoding in state {:?} after {} bytes",
            self.state,
            self.writer.bytes_written()
        );
        self.release();
    }

    fn release(&mut self) {
        self.compressor = None;
        self.compressed = Vec::new();
        self.previous_row = Vec::new();
        self.filtered_row = Vec::new();
        self.state = EncoderState::Failed;
    }

    fn encode_headers(
        &mut self, metadata: &PngMetadata, color: PngColor
    ) -> Result<(), PngEncodeErrors> {
        let writer = &mut self.writer;
        let options = &self.options;
        // write signature
        writer.write_u64_be_err(PNG_SIGNATURE)?;
        // write ihdr
        write_header_fn(writer, PngChunkType::IHDR, |w| write_ihdr(options, color, w))?;

        // extra headers
        if let Some(gamma) = metadata.gamma {
            write_header_fn(writer, PngChunkType::gAMA, |w| write_gamma(gamma, w))?;
        }
        if let Some(background) = metadata.background {
            write_header_fn(writer, PngChunkType::bKGD, |w| {
                write_background(background, w)
            })?;
        }
        if let Some(time) = metadata.time {
            write_header_fn(writer, PngChunkType::tIME, |w| write_time(time, w))?;
        }
        for text in &metadata.text {
            write_header_fn(writer, PngChunkType::tEXt, |w| write_text(text, w))?;
        }
        Ok(())
    }

    fn encode_row(&mut self, row: &[u8]) -> Result<(), PngEncodeErrors> {
        filter_scanline(
            row,
            &self.previous_row,
            &mut self.filtered_row,
            self.row_filter,
            self.components
        );
        // the filtered row moves out while deflating, so the borrow of
        // self.filtered_row doesn't overlap the mutable borrow of self
        let filtered = core::mem::take(&mut self.filtered_row);
        let result = self.deflate(&filtered, FlushCompress::None);
        self.filtered_row = filtered;
        result?;

        self.write_idat_chunks(false)?;

        // keep the unfiltered row for the filters that look up
        self.previous_row.clear();
        self.previous_row.extend_from_slice(row);

        Ok(())
    }

    /// Feed `input` to the compressor, collecting output in `self.compressed`
    fn deflate(&mut self, mut input: &[u8], flush: FlushCompress) -> Result<(), PngEncodeErrors> {
        let compressor = self
            .compressor
            .as_mut()
            .ok_or(PngEncodeErrors::EncoderFailed)?;

        loop {
            if self.compressed.capacity() - self.compressed.len() < DEFLATE_SLACK {
                self.compressed.reserve(DEFLATE_SLACK);
            }
            let before = compressor.total_in();
            let status = compressor.compress_vec(input, &mut self.compressed, flush)?;
            let consumed = usize::try_from(compressor.total_in() - before)
                .map_err(|_| PngEncodeErrors::Generic("Overflow"))?;

            input = &input[consumed..];

            match (flush, status) {
                (FlushCompress::Finish, Status::StreamEnd) => break,
                (FlushCompress::Finish, _) => continue,
                _ if input.is_empty() => break,
                _ => continue
            }
        }
        trace!(
            "Compressor has consumed {} bytes and produced {} bytes",
            compressor.total_in(),
            compressor.total_out()
        );
        Ok(())
    }

    /// Send compressed data to the sink as IDAT chunks
    ///
    /// Unless `last` is set, only full chunks are written and the remainder
    /// waits for more data.
    fn write_idat_chunks(&mut self, last: bool) -> Result<(), PngEncodeErrors> {
        let ready = if last {
            self.compressed.len()
        } else {
            self.compressed.len() - self.compressed.len() % IDAT_CHUNK_SIZE
        };
        for chunk in self.compressed[..ready].chunks(IDAT_CHUNK_SIZE) {
            write_chunk(PngChunkType::IDAT, chunk, &mut self.writer)?;
        }
        self.compressed.drain(..ready);

        Ok(())
    }
}

fn validate_options(options: &EncoderOptions) -> Result<PngColor, PngEncodeErrors> {
    let (width, height) = (options.width(), options.height());

    if width == 0 || height == 0 {
        return Err(PngEncodeErrors::ZeroDimensions(width, height));
    }
    if width > MAX_DIMENSION {
        return Err(PngEncodeErrors::TooLargeDimensions(width));
    }
    if height > MAX_DIMENSION {
        return Err(PngEncodeErrors::TooLargeDimensions(height));
    }
    if !matches!(options.depth(), BitDepth::Eight | BitDepth::Sixteen) {
        return Err(PngEncodeErrors::UnsupportedDepth(options.depth()));
    }
    if options.interlace() {
        return Err(PngEncodeErrors::UnsupportedInterlace);
    }
    PngColor::from_colorspace(options.colorspace()).ok_or(
        PngEncodeErrors::UnsupportedColorspace(options.colorspace(), &SUPPORTED_COLORSPACES)
    )
}

fn validate_metadata(
    metadata: &PngMetadata, options: &EncoderOptions, color: PngColor
) -> Result<(), PngEncodeErrors> {
    if let Some(gamma) = metadata.gamma {
        // stored as gamma * 100000, zero is not a valid gamma
        let scaled = (f64::from(gamma) * 100000.0).round();

        if !gamma.is_finite() || scaled < 1.0 || scaled > f64::from(u32::MAX) {
            return Err(PngEncodeErrors::InvalidMetadata(format!(
                "gamma {gamma} cannot be stored"
            )));
        }
    }
    if let Some(background) = metadata.background {
        let max = options.depth().max_value();

        let fits = match (background, color.is_grayscale()) {
            (Background::Gray(v), true) => v <= max,
            (Background::Rgb(r, g, b), false) => r <= max && g <= max && b <= max,
            _ => {
                return Err(PngEncodeErrors::InvalidMetadata(format!(
                    "background {background:?} does not match colorspace {:?}",
                    options.colorspace()
                )))
            }
        };
        if !fits {
            return Err(PngEncodeErrors::InvalidMetadata(format!(
                "background {background:?} exceeds the maximum sample value {max}"
            )));
        }
    }
    if let Some(time) = metadata.time {
        if !time.is_valid() {
            return Err(PngEncodeErrors::InvalidMetadata(format!(
                "time {time:?} is out of range"
            )));
        }
    }
    for text in metadata.text.iter().chain(&metadata.trailing_text) {
        validate_text(text)?;
    }
    Ok(())
}

fn validate_text(text: &TextChunk) -> Result<(), PngEncodeErrors> {
    let keyword = &text.keyword;
    let printable = |c: char| matches!(c as u32, 32..=126 | 161..=255);

    if keyword.is_empty()
        || keyword.chars().count() > MAX_KEYWORD_LENGTH
        || !keyword.chars().all(printable)
        || keyword.starts_with(' ')
        || keyword.ends_with(' ')
        || keyword.contains("  ")
    {
        return Err(PngEncodeErrors::InvalidMetadata(format!(
            "text keyword {keyword:?} must be 1-{MAX_KEYWORD_LENGTH} printable Latin-1 characters without leading, trailing or repeated spaces"
        )));
    }
    if text.text.chars().any(|c| c == '\0' || c as u32 > 255) {
        return Err(PngEncodeErrors::InvalidMetadata(format!(
            "text for {keyword:?} is not representable in Latin-1"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::PngTime;

    fn rgba(width: usize, height: usize) -> EncoderOptions {
        EncoderOptions::new(width, height, ColorSpace::RGBA, BitDepth::Eight)
    }

    #[test]
    fn header_starts_with_signature_and_ihdr() {
        let encoder = PngEncoder::init(rgba(3, 1), PngMetadata::new(), vec![]).unwrap();
        assert_eq!(encoder.state(), EncoderState::HeaderWritten);
        // signature + 25 byte IHDR chunk
        assert_eq!(encoder.bytes_written(), 8 + 25);
    }

    #[test]
    fn zero_width_is_rejected() {
        let err = PngEncoder::init(rgba(0, 1), PngMetadata::new(), vec![]).err();
        assert!(matches!(err, Some(PngEncodeErrors::ZeroDimensions(0, 1))));
    }

    #[test]
    fn unknown_depth_and_colorspace_are_rejected() {
        let options = rgba(1, 1).set_depth(BitDepth::Unknown);
        let err = PngEncoder::init(options, PngMetadata::new(), vec![]).err();
        assert!(matches!(err, Some(PngEncodeErrors::UnsupportedDepth(_))));

        let options = rgba(1, 1).set_colorspace(ColorSpace::Unknown);
        let err = PngEncoder::init(options, PngMetadata::new(), vec![]).err();
        assert!(matches!(
            err,
            Some(PngEncodeErrors::UnsupportedColorspace(ColorSpace::Unknown, _))
        ));
    }

    #[test]
    fn interlace_is_rejected() {
        let options = rgba(1, 1).set_interlace(true);
        let err = PngEncoder::init(options, PngMetadata::new(), vec![]).err();
        assert!(matches!(err, Some(PngEncodeErrors::UnsupportedInterlace)));
    }

    #[test]
    fn row_errors_are_absorbing() {
        let mut encoder = PngEncoder::init(rgba(2, 1), PngMetadata::new(), vec![]).unwrap();

        let err = encoder.write_row(&[0; 7]).unwrap_err();
        assert!(matches!(err, PngEncodeErrors::RowLengthMismatch(8, 7)));
        assert_eq!(encoder.state(), EncoderState::Failed);

        // a correct row doesn't revive the encoder
        let err = encoder.write_row(&[0; 8]).unwrap_err();
        assert!(matches!(err, PngEncodeErrors::EncoderFailed));
        assert!(matches!(encoder.finish(), Err(PngEncodeErrors::EncoderFailed)));
    }

    #[test]
    fn extra_rows_are_rejected() {
        let mut encoder = PngEncoder::init(rgba(1, 1), PngMetadata::new(), vec![]).unwrap();
        encoder.write_row(&[1, 2, 3, 4]).unwrap();
        assert_eq!(encoder.state(), EncoderState::RowsWritten(1));

        let err = encoder.write_row(&[1, 2, 3, 4]).unwrap_err();
        assert!(matches!(err, PngEncodeErrors::TooManyRows(1)));
    }

    #[test]
    fn finish_requires_every_row() {
        let mut encoder = PngEncoder::init(rgba(1, 2), PngMetadata::new(), vec![]).unwrap();
        encoder.write_row(&[1, 2, 3, 4]).unwrap();

        let err = encoder.finish().err();
        assert!(matches!(err, Some(PngEncodeErrors::IncompleteImage(2, 1))));
    }

    #[test]
    fn abort_is_safe_in_any_state() {
        let encoder = PngEncoder::init(rgba(1, 2), PngMetadata::new(), vec![]).unwrap();
        encoder.abort();

        let mut encoder = PngEncoder::init(rgba(1, 1), PngMetadata::new(), vec![]).unwrap();
        encoder.write_row(&[9, 9, 9, 9]).unwrap();
        encoder.abort();
    }

    #[test]
    fn mismatched_background_is_rejected() {
        let metadata = PngMetadata::new().set_background(Background::Gray(0));
        let err = PngEncoder::init(rgba(1, 1), metadata, vec![]).err();
        assert!(matches!(err, Some(PngEncodeErrors::InvalidMetadata(_))));

        let metadata = PngMetadata::new().set_background(Background::Rgb(256, 0, 0));
        let err = PngEncoder::init(rgba(1, 1), metadata, vec![]).err();
        assert!(matches!(err, Some(PngEncodeErrors::InvalidMetadata(_))));
    }

    #[test]
    fn bad_text_and_time_are_rejected() {
        let metadata = PngMetadata::new().add_text(TextChunk::new("", "empty keyword"));
        assert!(PngEncoder::init(rgba(1, 1), metadata, vec![]).is_err());

        let metadata =
            PngMetadata::new().add_trailing_text(TextChunk::new("Title", "\u{263A}"));
        assert!(PngEncoder::init(rgba(1, 1), metadata, vec![]).is_err());

        let metadata = PngMetadata::new().set_time(PngTime::default());
        assert!(PngEncoder::init(rgba(1, 1), metadata, vec![]).is_err());
    }

    #[test]
    fn keyword_spaces_are_checked() {
        for keyword in ["a  b", " Title", "Title ", "Title\u{7f}"] {
            let metadata = PngMetadata::new().add_text(TextChunk::new(keyword, "x"));
            let err = PngEncoder::init(rgba(1, 1), metadata, vec![]).err();
            assert!(
                matches!(err, Some(PngEncodeErrors::InvalidMetadata(_))),
                "{keyword:?} should be rejected"
            );
        }
        let metadata = PngMetadata::new().add_text(TextChunk::new("Creation Time", "now"));
        assert!(PngEncoder::init(rgba(1, 1), metadata, vec![]).is_ok());
    }

    #[test]
    fn smallest_storable_gamma_is_accepted() {
        // stored as 1
        let metadata = PngMetadata::new().set_gamma(1e-5);
        assert!(PngEncoder::init(rgba(1, 1), metadata, vec![]).is_ok());
    }

    #[test]
    fn bad_gamma_is_rejected() {
        // 1e-6 and 4e-6 round to a stored value of zero
        for gamma in [0.0, -1.0, 1e-6, 4e-6, f32::NAN, f32::INFINITY] {
            let metadata = PngMetadata::new().set_gamma(gamma);
            assert!(PngEncoder::init(rgba(1, 1), metadata, vec![]).is_err());
        }
    }

    #[test]
    fn encode_image_checks_length() {
        let err = PngEncoder::encode_image(rgba(2, 2), PngMetadata::new(), &[0; 15], vec![]).err();
        assert!(matches!(err, Some(PngEncodeErrors::DataLengthMismatch(16, 15))));
    }
}
