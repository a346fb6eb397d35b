//! Format detection and capability queries
//!
//! Input files are identified by their leading bytes. Which formats can
//! actually be read or written depends on the enabled cargo features.

use crate::{IoError, IoResult};
use pageclass_core::ImageFormat;

/// Leading bytes of every format this crate knows how to decode
const SIGNATURES: &[(&[u8], ImageFormat)] = &[
    (b"\x89PNG\r\n\x1a\n", ImageFormat::Png),
    (b"BM", ImageFormat::Bmp),
    (b"\xff\xd8\xff", ImageFormat::Jpeg),
    (b"GIF87a", ImageFormat::Gif),
    (b"GIF89a", ImageFormat::Gif),
];

/// Identify an image format from the start of its data.
///
/// # Errors
///
/// Returns [`IoError::InvalidData`] for fewer than two bytes and
/// [`IoError::UnsupportedFormat`] when no signature matches.
pub fn detect_format_from_bytes(data: &[u8]) -> IoResult<ImageFormat> {
    if data.len() < 2 {
        return Err(IoError::InvalidData(
            "not enough data to detect format".to_string(),
        ));
    }

    if let Some(&(_, format)) = SIGNATURES
        .iter()
        .find(|(signature, _)| data.starts_with(signature))
    {
        return Ok(format);
    }

    // P1..P6
    if data[0] == b'P' && (b'1'..=b'6').contains(&data[1]) {
        return Ok(ImageFormat::Pnm);
    }

    Err(IoError::UnsupportedFormat(
        "unknown image format".to_string(),
    ))
}

/// Whether [`crate::read_image`] can decode `format` in this build.
pub fn can_read(format: ImageFormat) -> bool {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => true,
        #[cfg(feature = "bmp")]
        ImageFormat::Bmp => true,
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => true,
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => true,
        #[cfg(feature = "gif-format")]
        ImageFormat::Gif => true,
        _ => false,
    }
}

/// Whether [`crate::write_image`] can encode `format` in this build.
///
/// GIF is read-only.
pub fn can_write(format: ImageFormat) -> bool {
    format != ImageFormat::Gif && can_read(format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_signatures() {
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0];
        assert_eq!(detect_format_from_bytes(&png).unwrap(), ImageFormat::Png);
        assert_eq!(
            detect_format_from_bytes(b"BM\x00\x00\x00\x00").unwrap(),
            ImageFormat::Bmp
        );
        let jpeg = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];
        assert_eq!(detect_format_from_bytes(&jpeg).unwrap(), ImageFormat::Jpeg);
        assert_eq!(
            detect_format_from_bytes(b"GIF89a\x01\x00").unwrap(),
            ImageFormat::Gif
        );
    }

    #[test]
    fn test_detect_pnm() {
        assert_eq!(
            detect_format_from_bytes(b"P1\n2 2\n").unwrap(),
            ImageFormat::Pnm
        );
        assert_eq!(
            detect_format_from_bytes(b"P6\n100 100\n255\n").unwrap(),
            ImageFormat::Pnm
        );
        assert!(detect_format_from_bytes(b"P7\n").is_err());
    }

    #[test]
    fn test_detect_unknown() {
        assert!(detect_format_from_bytes(b"UNKNOWN_FORMAT").is_err());
        assert!(detect_format_from_bytes(b"P").is_err());
        // TIFF is not decoded, so it is not recognized either
        assert!(matches!(
            detect_format_from_bytes(b"II\x2a\x00\x08\x00\x00\x00"),
            Err(IoError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_capabilities() {
        for format in [
            ImageFormat::Png,
            ImageFormat::Bmp,
            ImageFormat::Pnm,
            ImageFormat::Jpeg,
        ] {
            assert!(can_read(format), "{:?}", format);
            assert!(can_write(format), "{:?}", format);
        }
        assert!(can_read(ImageFormat::Gif));
        assert!(!can_write(ImageFormat::Gif));
        assert!(!can_read(ImageFormat::Unknown));
        assert!(!can_write(ImageFormat::Unknown));
    }
}
