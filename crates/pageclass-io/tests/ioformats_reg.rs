//! Image I/O regression test
//!
//! Writes a synthetic page block in every writable format, reads it back
//! through format detection and checks the black/white content survives.
//!
//! Run with:
//! ```
//! cargo test -p pageclass-io --test ioformats_reg
//! ```

use pageclass_core::{ImageFormat, PixelFormat};
use pageclass_io::{IoError, read_image, read_image_mem, write_image, write_image_mem};
use pageclass_test::{RegParams, pix_from_ascii, pix_from_ascii_with_format, pix_to_ascii};

const BLOCK: [&str; 4] = ["#.##..#", "...#...", "##....#", ".#.#.#."];

#[test]
fn ioformats_reg() {
    let mut rp = RegParams::new("ioformats");
    let dir = tempfile::tempdir().expect("tempdir");

    for (format, pixel_format) in [
        (ImageFormat::Png, PixelFormat::Rgb),
        (ImageFormat::Png, PixelFormat::Binary),
        (ImageFormat::Png, PixelFormat::Gray),
        (ImageFormat::Bmp, PixelFormat::Rgb),
        (ImageFormat::Pnm, PixelFormat::Binary),
        (ImageFormat::Pnm, PixelFormat::Gray),
        (ImageFormat::Pnm, PixelFormat::Rgb),
    ] {
        eprintln!("  {:?} / {:?}", format, pixel_format);
        let pix = pix_from_ascii_with_format(&BLOCK, pixel_format).unwrap();
        let path = dir
            .path()
            .join(format!("block-{:?}.{}", pixel_format, format.extension()));

        write_image(&pix, &path, format).expect("write");
        let back = read_image(&path).expect("read");

        rp.compare_values(pix.width() as f64, back.width() as f64, 0.0);
        rp.compare_values(pix.height() as f64, back.height() as f64, 0.0);
        rp.compare_values(pix.count_black() as f64, back.count_black() as f64, 0.0);
        rp.compare_ascii(&back, &BLOCK);
        rp.compare_values(
            1.0,
            if back.informat() == format { 1.0 } else { 0.0 },
            0.0,
        );
    }

    assert!(rp.cleanup(), "ioformats regression test failed");
}

#[test]
fn ioformats_mem_reg() {
    let mut rp = RegParams::new("ioformats_mem");

    let pix = pix_from_ascii(&BLOCK).unwrap();
    let bytes = write_image_mem(&pix, ImageFormat::Png).unwrap();
    let back = read_image_mem(&bytes).unwrap();
    rp.compare_pix(&pix, &back);
    assert_eq!(pix_to_ascii(&back), BLOCK);

    // A JPEG signature with nothing behind it fails in the decoder
    let jpeg = [0xFF, 0xD8, 0xFF, 0xE0, 0, 0, 0, 0];
    let err = read_image_mem(&jpeg).unwrap_err();
    rp.compare_values(
        1.0,
        if matches!(err, IoError::DecodeError(_)) {
            1.0
        } else {
            0.0
        },
        0.0,
    );

    // Formats without a decoder are reported, not misread
    let tiff = [0x49, 0x49, 0x2A, 0x00, 0x08, 0, 0, 0];
    let err = read_image_mem(&tiff).unwrap_err();
    rp.compare_values(
        1.0,
        if matches!(err, IoError::UnsupportedFormat(_)) {
            1.0
        } else {
            0.0
        },
        0.0,
    );

    let err = write_image_mem(&pix, ImageFormat::Gif).unwrap_err();
    rp.compare_values(
        1.0,
        if matches!(err, IoError::UnsupportedFormat(_)) {
            1.0
        } else {
            0.0
        },
        0.0,
    );

    assert!(rp.cleanup(), "ioformats_mem regression test failed");
}

#[test]
fn ioformats_jpeg_reg() {
    let mut rp = RegParams::new("ioformats_jpeg");
    let dir = tempfile::tempdir().expect("tempdir");

    // Flat 8x8 tiles survive lossy compression exactly
    let tile_row = |first: char| -> String {
        let other = if first == '#' { '.' } else { '#' };
        std::iter::repeat_n(first, 8)
            .chain(std::iter::repeat_n(other, 8))
            .collect()
    };
    let rows: Vec<String> = (0..16)
        .map(|y| tile_row(if y < 8 { '#' } else { '.' }))
        .collect();
    let rows: Vec<&str> = rows.iter().map(String::as_str).collect();

    for pixel_format in [PixelFormat::Binary, PixelFormat::Rgb] {
        eprintln!("  Jpeg / {:?}", pixel_format);
        let pix = pix_from_ascii_with_format(&rows, pixel_format).unwrap();
        let path = dir.path().join(format!("tiles-{:?}.jpg", pixel_format));
        write_image(&pix, &path, ImageFormat::Jpeg).expect("write");
        let back = read_image(&path).expect("read");

        rp.compare_values(128.0, back.count_black() as f64, 0.0);
        rp.compare_ascii(&back, &rows);
        rp.compare_values(
            1.0,
            if back.informat() == ImageFormat::Jpeg {
                1.0
            } else {
                0.0
            },
            0.0,
        );
    }

    assert!(rp.cleanup(), "ioformats_jpeg regression test failed");
}

#[test]
fn oversized_headers_are_errors() {
    // Header dimensions past the pixel limit never reach the allocator
    for data in [
        &b"P1\n4294967295 4294967295\n0"[..],
        &b"P5\n100000 100000\n255\n"[..],
    ] {
        let err = read_image_mem(data).unwrap_err();
        assert!(
            matches!(err, IoError::Core(pageclass_core::Error::ImageTooLarge { .. })),
            "{err}"
        );
    }
}

#[test]
fn missing_file_is_io_error() {
    let err = read_image("/nonexistent/definitely/not/here.png").unwrap_err();
    assert!(matches!(err, IoError::Io(_)));
}
