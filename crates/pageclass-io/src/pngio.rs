//! PNG image format support

use crate::{IoError, IoResult};
use pageclass_core::{Pix, PixelFormat, color};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image
///
/// Palettes and sub-byte gray depths are expanded and 16-bit samples are
/// stripped to 8 bits. A 1-bit grayscale source loads as
/// [`PixelFormat::Binary`], other gray sources as [`PixelFormat::Gray`].
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let source_bilevel = {
        let info = reader.info();
        info.color_type == ColorType::Grayscale && info.bit_depth == BitDepth::One
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let width = output_info.width;
    let height = output_info.height;
    let (format, samples) = match output_info.color_type {
        ColorType::Grayscale if source_bilevel => (PixelFormat::Binary, 1),
        ColorType::Grayscale => (PixelFormat::Gray, 1),
        ColorType::GrayscaleAlpha => (PixelFormat::Gray, 2),
        ColorType::Rgb => (PixelFormat::Rgb, 3),
        ColorType::Rgba => (PixelFormat::Rgba, 4),
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNG output: {:?} {:?}",
                other, output_info.bit_depth
            )));
        }
    };

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];
    let mut pixels = Vec::with_capacity(width as usize * height as usize);

    for y in 0..height as usize {
        let row = &data[y * bytes_per_row..];
        for x in 0..width as usize {
            let idx = x * samples;
            let pixel = match samples {
                1 | 2 => color::compose_rgb(row[idx], row[idx], row[idx]),
                3 => color::compose_rgb(row[idx], row[idx + 1], row[idx + 2]),
                _ => color::compose_rgba(row[idx], row[idx + 1], row[idx + 2], row[idx + 3]),
            };
            pixels.push(pixel);
        }
    }

    Ok(Pix::from_data(width, height, format, pixels)?)
}

/// Write a PNG image
///
/// Binary images are written as 1-bit grayscale, gray images as 8-bit
/// grayscale, and color images as 8-bit RGB or RGBA.
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();

    let (color_type, bit_depth) = match pix.format() {
        PixelFormat::Binary => (ColorType::Grayscale, BitDepth::One),
        PixelFormat::Gray => (ColorType::Grayscale, BitDepth::Eight),
        PixelFormat::Rgb => (ColorType::Rgb, BitDepth::Eight),
        PixelFormat::Rgba => (ColorType::Rgba, BitDepth::Eight),
    };

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(bit_depth);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let bytes_per_row = match pix.format() {
        PixelFormat::Binary => width.div_ceil(8),
        PixelFormat::Gray => width,
        PixelFormat::Rgb => width * 3,
        PixelFormat::Rgba => width * 4,
    } as usize;

    let mut data = vec![0u8; bytes_per_row * height as usize];

    for y in 0..height {
        let row_start = y as usize * bytes_per_row;
        let row = pix.row_data(y);

        match pix.format() {
            PixelFormat::Binary => {
                // PNG grayscale: 1 is white
                for (x, &pixel) in row.iter().enumerate() {
                    if !color::is_color_black(pixel) {
                        data[row_start + x / 8] |= 1 << (7 - (x % 8));
                    }
                }
            }
            PixelFormat::Gray => {
                for (x, &pixel) in row.iter().enumerate() {
                    data[row_start + x] = color::red(pixel);
                }
            }
            PixelFormat::Rgb => {
                for (x, &pixel) in row.iter().enumerate() {
                    let (r, g, b) = color::extract_rgb(pixel);
                    let idx = row_start + x * 3;
                    data[idx] = r;
                    data[idx + 1] = g;
                    data[idx + 2] = b;
                }
            }
            PixelFormat::Rgba => {
                for (x, &pixel) in row.iter().enumerate() {
                    let (r, g, b) = color::extract_rgb(pixel);
                    let idx = row_start + x * 4;
                    data[idx] = r;
                    data[idx + 1] = g;
                    data[idx + 2] = b;
                    data[idx + 3] = color::alpha(pixel);
                }
            }
        }
    }

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    Ok(())
}
