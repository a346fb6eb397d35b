//! JPEG image format support
//!
//! Reads JPEG through `jpeg-decoder` and writes it through `jpeg-encoder`.
//! Grayscale files load as [`PixelFormat::Gray`], everything else as
//! [`PixelFormat::Rgb`].
//!
//! JPEG is lossy. Blocks written here are meant for viewing; feature
//! extraction should work from a lossless copy.

use crate::{IoError, IoResult};
use jpeg_decoder::{Decoder, PixelFormat as JpegPixelFormat};
use jpeg_encoder::{ColorType, Encoder};
use pageclass_core::{Pix, PixelFormat, color};
use std::io::{BufReader, Read, Write};

/// Encoder quality (1..=100)
const JPEG_QUALITY: u8 = 95;

/// Read a JPEG image.
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(BufReader::new(reader));
    decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("JPEG header error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::InvalidData("JPEG has no frame header".to_string()))?;
    let width = info.width as u32;
    let height = info.height as u32;
    Pix::check_dimensions(width, height)?;

    let data = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;

    let (format, pixels): (PixelFormat, Vec<u32>) = match info.pixel_format {
        JpegPixelFormat::L8 => (
            PixelFormat::Gray,
            data.iter().map(|&v| color::compose_rgb(v, v, v)).collect(),
        ),
        // Big-endian samples; the high byte is enough
        JpegPixelFormat::L16 => (
            PixelFormat::Gray,
            data.chunks_exact(2)
                .map(|s| color::compose_rgb(s[0], s[0], s[0]))
                .collect(),
        ),
        JpegPixelFormat::RGB24 => (
            PixelFormat::Rgb,
            data.chunks_exact(3)
                .map(|p| color::compose_rgb(p[0], p[1], p[2]))
                .collect(),
        ),
        JpegPixelFormat::CMYK32 => (
            PixelFormat::Rgb,
            data.chunks_exact(4).map(cmyk_to_rgb).collect(),
        ),
    };

    Ok(Pix::from_data(width, height, format, pixels)?)
}

/// Naive CMYK conversion, no color management.
fn cmyk_to_rgb(cmyk: &[u8]) -> u32 {
    let k = 255 - cmyk[3] as u32;
    let channel = |c: u8| ((255 - c as u32) * k / 255) as u8;
    color::compose_rgb(channel(cmyk[0]), channel(cmyk[1]), channel(cmyk[2]))
}

/// Write a JPEG image.
///
/// Binary and gray images are written as single-channel JPEG, color
/// images as RGB with alpha dropped.
pub fn write_jpeg<W: Write>(pix: &Pix, mut writer: W) -> IoResult<()> {
    let (width, height) = match (u16::try_from(pix.width()), u16::try_from(pix.height())) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(IoError::EncodeError(format!(
                "{}x{} exceeds the JPEG size limit",
                pix.width(),
                pix.height()
            )));
        }
    };

    let (samples, color_type) = match pix.format() {
        PixelFormat::Binary | PixelFormat::Gray => (
            pix.data().iter().map(|&p| color::red(p)).collect::<Vec<u8>>(),
            ColorType::Luma,
        ),
        PixelFormat::Rgb | PixelFormat::Rgba => {
            let mut samples = Vec::with_capacity(pix.data().len() * 3);
            for &p in pix.data() {
                let (r, g, b) = color::extract_rgb(p);
                samples.extend_from_slice(&[r, g, b]);
            }
            (samples, ColorType::Rgb)
        }
    };

    Encoder::new(&mut writer, JPEG_QUALITY)
        .encode(&samples, width, height, color_type)
        .map_err(|e| IoError::EncodeError(format!("JPEG encode error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pageclass_core::InitColor;
    use std::io::Cursor;

    /// 16x16 with the top-left and bottom-right 8x8 tiles black.
    ///
    /// Tiles line up with the DCT blocks, so every block is flat and
    /// survives compression.
    fn tiles(format: PixelFormat) -> Pix {
        let mut pm = Pix::new_with_init(16, 16, format, InitColor::White)
            .unwrap()
            .to_mut();
        for y in 0..16 {
            for x in 0..16 {
                if (x < 8) == (y < 8) {
                    pm.set_pixel(x, y, color::BLACK).unwrap();
                }
            }
        }
        pm.into()
    }

    #[test]
    fn test_jpeg_gray_roundtrip() {
        let pix = tiles(PixelFormat::Binary);
        let mut buffer = Vec::new();
        write_jpeg(&pix, &mut buffer).unwrap();
        assert!(buffer.starts_with(&[0xFF, 0xD8, 0xFF]));

        let back = read_jpeg(Cursor::new(buffer)).unwrap();
        assert_eq!(back.format(), PixelFormat::Gray);
        assert_eq!((back.width(), back.height()), (16, 16));
        assert_eq!(back.count_black(), 128);
        assert!(back.is_black(0, 0).unwrap());
        assert!(!back.is_black(15, 0).unwrap());
    }

    #[test]
    fn test_jpeg_rgb_roundtrip() {
        let pix = tiles(PixelFormat::Rgb);
        let mut buffer = Vec::new();
        write_jpeg(&pix, &mut buffer).unwrap();
        let back = read_jpeg(Cursor::new(buffer)).unwrap();
        assert_eq!(back.format(), PixelFormat::Rgb);
        assert_eq!(back.count_black(), 128);
    }

    #[test]
    fn test_jpeg_garbage() {
        let data = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x00, 0x00];
        let err = read_jpeg(Cursor::new(&data[..])).unwrap_err();
        assert!(matches!(err, IoError::DecodeError(_)));
    }

    #[test]
    fn test_cmyk() {
        assert_eq!(cmyk_to_rgb(&[0, 0, 0, 0]), color::WHITE);
        assert_eq!(cmyk_to_rgb(&[0, 0, 0, 255]), color::BLACK);
        assert_eq!(cmyk_to_rgb(&[255, 0, 0, 0]), color::compose_rgb(0, 255, 255));
    }
}
