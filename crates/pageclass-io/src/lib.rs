//! pageclass-io - Image reading and writing
//!
//! Loads page-block images into a [`Pix`] and writes smoothed results back
//! out for inspection. Supported formats:
//!
//! - PNG (feature `png-format`): all color types, palettes expanded
//! - BMP (feature `bmp`): uncompressed 1/4/8/24/32-bit
//! - PNM (feature `pnm`): PBM / PGM / PPM, ASCII and binary
//! - JPEG (feature `jpeg`): grayscale, RGB and CMYK
//! - GIF (feature `gif-format`): single frame, read only
//!
//! The input format is detected from magic bytes, never from the file
//! extension. Decoders reject dimensions above
//! [`pageclass_core::MAX_PIXELS`] before allocating pixel storage.

#[cfg(feature = "bmp")]
pub mod bmpio;
mod error;
pub mod format;
#[cfg(feature = "gif-format")]
pub mod gifio;
#[cfg(feature = "jpeg")]
pub mod jpegio;
#[cfg(feature = "png-format")]
pub mod pngio;
#[cfg(feature = "pnm")]
pub mod pnmio;

pub use error::{IoError, IoResult};
pub use format::{can_read, can_write, detect_format_from_bytes};
pub use pageclass_core::ImageFormat;

use log::debug;
use pageclass_core::Pix;
use std::fs::{self, File};
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

/// Read an image from a file path.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let path = path.as_ref();
    let data = fs::read(path)?;
    let pix = read_image_mem(&data)?;
    debug!(
        "read {} ({}x{}, {:?}, {:?})",
        path.display(),
        pix.width(),
        pix.height(),
        pix.format(),
        pix.informat()
    );
    Ok(pix)
}

/// Read an image from an in-memory buffer.
pub fn read_image_mem(data: &[u8]) -> IoResult<Pix> {
    let format = detect_format_from_bytes(data)?;
    let cursor = Cursor::new(data);
    let pix = match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => pngio::read_png(cursor)?,
        #[cfg(feature = "bmp")]
        ImageFormat::Bmp => bmpio::read_bmp(cursor)?,
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnmio::read_pnm(cursor)?,
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpegio::read_jpeg(cursor)?,
        #[cfg(feature = "gif-format")]
        ImageFormat::Gif => gifio::read_gif(cursor)?,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "reading {:?} is not supported",
                other
            )));
        }
    };

    let mut pix_mut = pix.try_into_mut().unwrap_or_else(|shared| shared.to_mut());
    pix_mut.set_informat(format);
    Ok(pix_mut.into())
}

/// Write an image to a file path.
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P, format: ImageFormat) -> IoResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_image_to(pix, &mut writer, format)?;
    writer.flush()?;
    debug!("wrote {} as {:?}", path.display(), format);
    Ok(())
}

/// Encode an image into an in-memory buffer.
pub fn write_image_mem(pix: &Pix, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buffer = Vec::new();
    write_image_to(pix, &mut buffer, format)?;
    Ok(buffer)
}

fn write_image_to<W: Write>(pix: &Pix, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => pngio::write_png(pix, writer),
        #[cfg(feature = "bmp")]
        ImageFormat::Bmp => bmpio::write_bmp(pix, writer),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnmio::write_pnm(pix, writer),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpegio::write_jpeg(pix, writer),
        other => Err(IoError::UnsupportedFormat(format!(
            "writing {:?} is not supported",
            other
        ))),
    }
}
