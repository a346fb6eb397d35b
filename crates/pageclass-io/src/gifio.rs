//! GIF image format support
//!
//! Reads single-frame GIF images. Palette entries are expanded to opaque
//! [`PixelFormat::Rgb`]; the transparent index, if any, reads as white
//! paper. Writing is not supported.

use crate::{IoError, IoResult};
use gif::{ColorOutput, DecodeOptions};
use pageclass_core::{Pix, PixelFormat, color};
use std::io::Read;

/// Read a GIF image
///
/// Animated GIFs (more than one frame) are rejected.
pub fn read_gif<R: Read>(reader: R) -> IoResult<Pix> {
    let mut options = DecodeOptions::new();
    options.set_color_output(ColorOutput::Indexed);

    let mut decoder = options
        .read_info(reader)
        .map_err(|e| IoError::DecodeError(format!("GIF decode error: {}", e)))?;

    let frame = decoder
        .read_next_frame()
        .map_err(|e| IoError::DecodeError(format!("GIF frame error: {}", e)))?
        .ok_or_else(|| IoError::InvalidData("no frames in GIF".to_string()))?
        .clone();

    if decoder
        .read_next_frame()
        .map_err(|e| IoError::DecodeError(format!("GIF frame error: {}", e)))?
        .is_some()
    {
        return Err(IoError::UnsupportedFormat(
            "animated GIF not supported".to_string(),
        ));
    }

    // Local palette first, then the global one
    let palette: &[u8] = match (&frame.palette, decoder.global_palette()) {
        (Some(local), _) => local.as_slice(),
        (None, Some(global)) => global,
        (None, None) => {
            return Err(IoError::InvalidData("GIF has no color map".to_string()));
        }
    };
    let colors: Vec<u32> = palette
        .chunks_exact(3)
        .map(|c| color::compose_rgb(c[0], c[1], c[2]))
        .collect();

    let width = frame.width as u32;
    let height = frame.height as u32;
    let npix = Pix::check_dimensions(width, height)?;
    if frame.buffer.len() < npix {
        return Err(IoError::InvalidData(format!(
            "GIF frame holds {} pixels, expected {}",
            frame.buffer.len(),
            npix
        )));
    }

    let pixels = frame.buffer[..npix]
        .iter()
        .map(|&index| {
            if frame.transparent == Some(index) {
                return Ok(color::WHITE);
            }
            colors.get(index as usize).copied().ok_or_else(|| {
                IoError::InvalidData(format!("palette index {} out of range", index))
            })
        })
        .collect::<IoResult<Vec<u32>>>()?;

    Ok(Pix::from_data(width, height, PixelFormat::Rgb, pixels)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gif::{Encoder, Frame};
    use std::io::Cursor;

    const PALETTE: [u8; 6] = [0, 0, 0, 255, 255, 255];

    fn encode(frames: &[Vec<u8>], transparent: Option<u8>) -> Vec<u8> {
        let mut bytes = Vec::new();
        {
            let mut encoder = Encoder::new(&mut bytes, 3, 2, &PALETTE).unwrap();
            for indices in frames {
                let frame = Frame::from_indexed_pixels(3, 2, indices.clone(), transparent);
                encoder.write_frame(&frame).unwrap();
            }
        }
        bytes
    }

    #[test]
    fn test_read_indexed() {
        let bytes = encode(&[vec![0, 1, 0, 1, 1, 0]], None);
        let pix = read_gif(Cursor::new(bytes)).unwrap();
        assert_eq!(pix.format(), PixelFormat::Rgb);
        assert_eq!((pix.width(), pix.height()), (3, 2));
        assert_eq!(pix.get_pixel(0, 0), Some(color::BLACK));
        assert_eq!(pix.get_pixel(1, 0), Some(color::WHITE));
        assert_eq!(pix.count_black(), 3);
    }

    #[test]
    fn test_transparent_reads_white() {
        let bytes = encode(&[vec![0, 1, 0, 1, 1, 0]], Some(0));
        let pix = read_gif(Cursor::new(bytes)).unwrap();
        assert_eq!(pix.count_black(), 0);
    }

    #[test]
    fn test_animated_rejected() {
        let bytes = encode(&[vec![0; 6], vec![1; 6]], None);
        let err = read_gif(Cursor::new(bytes)).unwrap_err();
        assert!(matches!(err, IoError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_gif_garbage() {
        let err = read_gif(Cursor::new(&b"GIF89a\x01"[..])).unwrap_err();
        assert!(matches!(err, IoError::DecodeError(_)));
    }
}
