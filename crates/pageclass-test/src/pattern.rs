//! Synthetic images from ASCII art
//!
//! `#` (or `x`, `X`) is a black pixel, `.` (or space) a white one. All
//! rows must have the same length.

use crate::error::{TestError, TestResult};
use pageclass_core::{Pix, PixelFormat, color};

/// Build an RGB image from ASCII art.
pub fn pix_from_ascii(rows: &[&str]) -> TestResult<Pix> {
    pix_from_ascii_with_format(rows, PixelFormat::Rgb)
}

/// Build an image of the given format from ASCII art.
pub fn pix_from_ascii_with_format(rows: &[&str], format: PixelFormat) -> TestResult<Pix> {
    let height = rows.len();
    let width = rows.first().map_or(0, |r| r.chars().count());

    let mut data = Vec::with_capacity(width * height);
    for (row, line) in rows.iter().enumerate() {
        if line.chars().count() != width {
            return Err(TestError::BadPattern {
                row,
                message: format!("expected {} columns, got {}", width, line.chars().count()),
            });
        }
        for c in line.chars() {
            let value = match c {
                '#' | 'x' | 'X' => color::BLACK,
                '.' | ' ' => color::WHITE,
                other => {
                    return Err(TestError::BadPattern {
                        row,
                        message: format!("unexpected character {:?}", other),
                    });
                }
            };
            data.push(value);
        }
    }

    Ok(Pix::from_data(width as u32, height as u32, format, data)?)
}

/// Render an image as ASCII art (`#` black, `.` white).
pub fn pix_to_ascii(pix: &Pix) -> Vec<String> {
    (0..pix.height())
        .map(|y| {
            pix.row_data(y)
                .iter()
                .map(|&p| if color::is_color_black(p) { '#' } else { '.' })
                .collect()
        })
        .collect()
}

/// Coordinates of all black pixels, row-major.
pub fn black_positions(pix: &Pix) -> Vec<(u32, u32)> {
    let mut out = Vec::new();
    for y in 0..pix.height() {
        for x in 0..pix.width() {
            if pix.is_black_unchecked(x, y) {
                out.push((x, y));
            }
        }
    }
    out
}

/// A checkerboard of `cell`-sized squares, black in the top-left corner.
pub fn checkerboard(width: u32, height: u32, cell: u32) -> TestResult<Pix> {
    let cell = cell.max(1);
    let mut data = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        for x in 0..width {
            let black = ((x / cell) + (y / cell)) % 2 == 0;
            data.push(if black { color::BLACK } else { color::WHITE });
        }
    }
    Ok(Pix::from_data(width, height, PixelFormat::Rgb, data)?)
}
