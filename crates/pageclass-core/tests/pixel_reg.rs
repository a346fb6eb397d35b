//! Pixel classification regression test
//!
//! Checks the black/white rule across formats, bounds handling of pixel
//! access, and the template factory.
//!
//! Run with:
//! ```
//! cargo test -p pageclass-core --test pixel_reg
//! ```

use pageclass_core::{Error, InitColor, Pix, PixelFormat, color};
use pageclass_test::{RegParams, pix_from_ascii_with_format};

#[test]
fn pixel_reg() {
    let mut rp = RegParams::new("pixel");

    // --- Test 1: the threshold sits between mean 127.67 and mean 128 ---
    for (r, g, b, black) in [
        (0, 0, 0, true),
        (127, 128, 128, true),
        (128, 128, 128, false),
        (255, 0, 0, true),
        (0, 255, 255, false),
        (255, 255, 255, false),
    ] {
        let got = color::is_color_black(color::compose_rgb(r, g, b));
        rp.compare_values(
            if black { 1.0 } else { 0.0 },
            if got { 1.0 } else { 0.0 },
            0.0,
        );
    }

    // --- Test 2: writes keep blackness in every format ---
    for format in [
        PixelFormat::Rgb,
        PixelFormat::Rgba,
        PixelFormat::Gray,
        PixelFormat::Binary,
    ] {
        eprintln!("  {:?}", format);
        let mut pm = Pix::new_with_init(4, 1, format, InitColor::White)
            .unwrap()
            .to_mut();
        pm.set_rgb(0, 0, 127, 128, 128).unwrap();
        pm.set_rgb(1, 0, 128, 128, 128).unwrap();
        pm.set_rgb(2, 0, 200, 10, 10).unwrap();
        let pix: Pix = pm.into();
        rp.compare_values(1.0, pix.is_black(0, 0).unwrap() as u8 as f64, 0.0);
        rp.compare_values(0.0, pix.is_black(1, 0).unwrap() as u8 as f64, 0.0);
        rp.compare_values(1.0, pix.is_black(2, 0).unwrap() as u8 as f64, 0.0);
        rp.compare_values(0.0, pix.is_black(3, 0).unwrap() as u8 as f64, 0.0);
        rp.compare_values(2.0, pix.count_black() as f64, 0.0);
    }

    // --- Test 3: out-of-range access ---
    let pix = Pix::new(3, 2, PixelFormat::Rgb).unwrap();
    let out_of_range = matches!(pix.is_black(3, 0), Err(Error::PixelOutOfRange { .. }));
    rp.compare_values(1.0, if out_of_range { 1.0 } else { 0.0 }, 0.0);
    let none = pix.get_pixel(0, 2).is_none();
    rp.compare_values(1.0, if none { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "pixel regression test failed");
}

#[test]
fn pixel_template_reg() {
    let mut rp = RegParams::new("pixel_template");

    let pix = pix_from_ascii_with_format(&["#.#", ".#."], PixelFormat::Gray).unwrap();
    let template = pix.create_template();
    rp.compare_values(pix.width() as f64, template.width() as f64, 0.0);
    rp.compare_values(pix.height() as f64, template.height() as f64, 0.0);
    rp.compare_values(1.0, if template.same_format(&pix) { 1.0 } else { 0.0 }, 0.0);
    let compatible = pix.check_compatible(&template).is_ok();
    rp.compare_values(1.0, if compatible { 1.0 } else { 0.0 }, 0.0);

    // Writing into a copy leaves the original untouched
    let mut copy = pix.to_mut();
    copy.set_black_unchecked(1, 0);
    let copy: Pix = copy.into();
    rp.compare_values(3.0, pix.count_black() as f64, 0.0);
    rp.compare_values(4.0, copy.count_black() as f64, 0.0);

    let other = Pix::new(3, 2, PixelFormat::Rgb).unwrap();
    let mismatch = matches!(
        pix.check_compatible(&other),
        Err(Error::IncompatibleFormats(PixelFormat::Gray, PixelFormat::Rgb))
    );
    rp.compare_values(1.0, if mismatch { 1.0 } else { 0.0 }, 0.0);

    assert!(rp.cleanup(), "pixel template regression test failed");
}
