/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Ancillary information written alongside the image data
//!
//! None of these chunks affect how pixels are stored, they are passed
//! through to the file for decoders that care about them.

use std::time::{SystemTime, UNIX_EPOCH};

/// Background color stored in a `bKGD` chunk
///
/// Samples are in the image's bit depth, so for eight bit images
/// values above 255 are rejected by the encoder
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Background {
    /// Background for grayscale images
    Gray(u16),
    /// Background for RGB and RGBA images
    Rgb(u16, u16, u16)
}

/// Last modification time stored in a `tIME` chunk, always UTC
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct PngTime {
    pub year:   u16,
    pub month:  u8,
    pub day:    u8,
    pub hour:   u8,
    pub minute: u8,
    pub second: u8
}

impl PngTime {
    /// Convert seconds since the unix epoch into a calendar date and time
    ///
    /// ```
    /// use makepal_png::PngTime;
    /// let time = PngTime::from_unix_seconds(951_782_400);
    /// assert_eq!((time.year, time.month, time.day), (2000, 2, 29));
    /// ```
    pub fn from_unix_seconds(seconds: u64) -> PngTime {
        let days = seconds / 86_400;
        let rem = seconds % 86_400;

        // civil from days, shifted so the year starts in march
        let z = days + 719_468;
        let era = z / 146_097;
        let doe = z - era * 146_097;
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = doy - (153 * mp + 2) / 5 + 1;
        let month = if mp < 10 { mp + 3 } else { mp - 9 };
        let year = yoe + era * 400 + u64::from(month <= 2);

        PngTime {
            year:   year.min(u64::from(u16::MAX)) as u16,
            month:  month as u8,
            day:    day as u8,
            hour:   (rem / 3600) as u8,
            minute: ((rem % 3600) / 60) as u8,
            second: (rem % 60) as u8
        }
    }

    /// The current system time, or the epoch if the clock is set before it
    pub fn now() -> PngTime {
        let seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        PngTime::from_unix_seconds(seconds)
    }

    /// Whether every field is in the range png allows
    ///
    /// Seconds go up to 60 to allow for leap seconds
    pub const fn is_valid(&self) -> bool {
        self.month >= 1
            && self.month <= 12
            && self.day >= 1
            && self.day <= 31
            && self.hour <= 23
            && self.minute <= 59
            && self.second <= 60
    }
}

/// An uncompressed Latin-1 `tEXt` chunk
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TextChunk {
    pub keyword: String,
    pub text:    String
}

impl TextChunk {
    pub fn new(keyword: impl Into<String>, text: impl Into<String>) -> TextChunk {
        TextChunk {
            keyword: keyword.into(),
            text:    text.into()
        }
    }
}

/// Optional ancillary chunks for an image
///
/// Everything is off by default, so the encoder only writes
/// `IHDR`, `IDAT` and `IEND`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PngMetadata {
    pub(crate) gamma:         Option<f32>,
    pub(crate) background:    Option<Background>,
    pub(crate) time:          Option<PngTime>,
    pub(crate) text:          Vec<TextChunk>,
    pub(crate) trailing_text: Vec<TextChunk>
}

impl PngMetadata {
    pub fn new() -> PngMetadata {
        PngMetadata::default()
    }

    /// Set the file gamma written to `gAMA`, e.g `1.0 / 2.2`
    pub fn set_gamma(mut self, gamma: f32) -> Self {
        self.gamma = Some(gamma);
        self
    }

    pub fn set_background(mut self, background: Background) -> Self {
        self.background = Some(background);
        self
    }

    pub fn set_time(mut self, time: PngTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Add a text chunk written before the image data
    pub fn add_text(mut self, text: TextChunk) -> Self {
        self.text.push(text);
        self
    }

    /// Add a text chunk written after the image data
    pub fn add_trailing_text(mut self, text: TextChunk) -> Self {
        self.trailing_text.push(text);
        self
    }

    pub fn gamma(&self) -> Option<f32> {
        self.gamma
    }

    pub fn background(&self) -> Option<Background> {
        self.background
    }

    pub fn time(&self) -> Option<PngTime> {
        self.time
    }

    pub fn text(&self) -> &[TextChunk] {
        &self.text
    }

    pub fn trailing_text(&self) -> &[TextChunk] {
        &self.trailing_text
    }
}

#[cfg(test)]
mod tests {
    use super::PngTime;

    #[test]
    fn epoch_is_first_of_january_1970() {
        let time = PngTime::from_unix_seconds(0);
        assert_eq!(
            time,
            PngTime {
                year:   1970,
                month:  1,
                day:    1,
                hour:   0,
                minute: 0,
                second: 0
            }
        );
        assert!(time.is_valid());
    }

    #[test]
    fn time_of_day_is_split() {
        // 2023-10-18 13:45:30 UTC
        let time = PngTime::from_unix_seconds(1_697_636_730);
        assert_eq!((time.year, time.month, time.day), (2023, 10, 18));
        assert_eq!((time.hour, time.minute, time.second), (13, 45, 30));
    }

    #[test]
    fn zero_month_is_invalid() {
        assert!(!PngTime::default().is_valid());
    }
}
