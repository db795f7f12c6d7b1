/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Forward scanline filters applied before compression.
//!
//! Filters operate on bytes, not samples, `components` is the
//! number of bytes in a single pixel (rounded up to one byte).

use crate::enums::FilterMethod;

/// Filter `current` into `out`.
///
/// `out` must be one byte larger than `current`, the first byte receives
/// the filter type and the rest the filtered scanline.
///
/// `previous` is the unfiltered scanline above the current one, an empty slice
/// means this is the first row and the row above is treated as all zeroes.
pub fn filter_scanline(
    current: &[u8], previous: &[u8], out: &mut [u8], filter: FilterMethod, components: usize
) {
    debug_assert_eq!(out.len(), current.len() + 1);
    debug_assert!(previous.is_empty() || previous.len() == current.len());

    let (filter_byte, out) = out.split_at_mut(1);
    filter_byte[0] = filter.to_int();

    // the first scanline has nothing above it, so Up and Paeth behave
    // like None and Sub and Average only halves the left pixel
    let above = |i: usize| -> u8 { previous.get(i).copied().unwrap_or(0) };

    match filter {
        FilterMethod::None => out.copy_from_slice(current),
        FilterMethod::Sub => {
            let (first, rest) = out.split_at_mut(components.min(current.len()));
            first.copy_from_slice(&current[..first.len()]);

            for ((filt, raw), left) in rest
                .iter_mut()
                .zip(current.get(components..).unwrap_or(&[]))
                .zip(current)
            {
                *filt = raw.wrapping_sub(*left);
            }
        }
        FilterMethod::Up => {
            for (i, (filt, raw)) in out.iter_mut().zip(current).enumerate() {
                *filt = raw.wrapping_sub(above(i));
            }
        }
        FilterMethod::Average => {
            for (i, (filt, raw)) in out.iter_mut().zip(current).enumerate() {
                let left = if i >= components {
                    u16::from(current[i - components])
                } else {
                    0
                };
                // needs 9 bits of precision before the shift
                let avg = ((left + u16::from(above(i))) >> 1) as u8;

                *filt = raw.wrapping_sub(avg);
            }
        }
        FilterMethod::Paeth => {
            for (i, (filt, raw)) in out.iter_mut().zip(current).enumerate() {
                let (left, upper_left) = if i >= components {
                    (current[i - components], above(i - components))
                } else {
                    (0, 0)
                };
                *filt = raw.wrapping_sub(paeth(left, above(i), upper_left));
            }
        }
    }
}

#[inline(always)]
fn paeth(a: u8, b: u8, c: u8) -> u8 {
    let a = i16::from(a);
    let b = i16::from(b);
    let c = i16::from(c);

    let p = a + b - c;
    let pa = (p - a).abs();
    let pb = (p - b).abs();
    let pc = (p - c).abs();

    if pa <= pb && pa <= pc {
        a as u8
    } else if pb <= pc {
        b as u8
    } else {
        c as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(current: &[u8], previous: &[u8], filter: FilterMethod, components: usize) -> Vec<u8> {
        let mut out = vec![0; current.len() + 1];
        filter_scanline(current, previous, &mut out, filter, components);
        out
    }

    #[test]
    fn none_prefixes_zero_and_copies() {
        let row = [255, 0, 0, 255, 0, 255, 0, 255];
        let out = run(&row, &[], FilterMethod::None, 4);
        assert_eq!(out[0], 0);
        assert_eq!(&out[1..], &row);
    }

    #[test]
    fn sub_subtracts_left_pixel() {
        let out = run(&[10, 20, 15, 25], &[], FilterMethod::Sub, 2);
        assert_eq!(out, [1, 10, 20, 5, 5]);
    }

    #[test]
    fn up_on_first_row_is_identity() {
        let out = run(&[7, 8, 9], &[], FilterMethod::Up, 1);
        assert_eq!(out, [2, 7, 8, 9]);

        let out = run(&[7, 8, 9], &[1, 10, 3], FilterMethod::Up, 1);
        assert_eq!(out, [2, 6, 254, 6]);
    }

    #[test]
    fn average_uses_floor_of_mean() {
        let out = run(&[100, 100], &[51, 50], FilterMethod::Average, 1);
        // first byte: 100 - (0 + 51) / 2, second: 100 - (100 + 50) / 2
        assert_eq!(out, [3, 75, 25]);
    }

    #[test]
    fn paeth_predictor_picks_nearest() {
        assert_eq!(paeth(10, 20, 10), 20);
        assert_eq!(paeth(20, 10, 10), 20);
        assert_eq!(paeth(0, 0, 0), 0);
        let out = run(&[5, 5], &[], FilterMethod::Paeth, 1);
        assert_eq!(out, [4, 5, 0]);
    }
}
