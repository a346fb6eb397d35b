//! Pixel-wise composition and box smoothing

use crate::error::RlsaResult;
use crate::smooth::{smooth_horizontal, smooth_vertical};
use log::debug;
use pageclass_core::Pix;

/// Combine two images with a pixel-wise AND of their blackness.
///
/// A pixel of the result is black when it is black in both inputs and
/// white otherwise. The result has the dimensions and format of `pix1`.
///
/// # Errors
///
/// Returns [`pageclass_core::Error::IncompatibleSizes`] or
/// [`pageclass_core::Error::IncompatibleFormats`] (wrapped in
/// [`RlsaError::Core`](crate::RlsaError::Core)) when the inputs differ.
pub fn pixel_and(pix1: &Pix, pix2: &Pix) -> RlsaResult<Pix> {
    pix1.check_compatible(pix2)?;

    let mut out = pix1.create_template().to_mut();
    for y in 0..pix1.height() {
        for x in 0..pix1.width() {
            if pix1.is_black_unchecked(x, y) && pix2.is_black_unchecked(x, y) {
                out.set_black_unchecked(x, y);
            } else {
                out.set_white_unchecked(x, y);
            }
        }
    }
    Ok(out.into())
}

/// Options for [`box_smooth_with`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxSmoothOptions {
    /// Gap threshold of the horizontal passes
    pub horizontal_threshold: u32,
    /// Gap threshold of the vertical pass
    pub vertical_threshold: u32,
}

impl Default for BoxSmoothOptions {
    fn default() -> Self {
        Self {
            horizontal_threshold: 10,
            vertical_threshold: 20,
        }
    }
}

impl BoxSmoothOptions {
    /// Set the horizontal threshold.
    pub fn with_horizontal_threshold(mut self, threshold: u32) -> Self {
        self.horizontal_threshold = threshold;
        self
    }

    /// Set the vertical threshold.
    pub fn with_vertical_threshold(mut self, threshold: u32) -> Self {
        self.vertical_threshold = threshold;
        self
    }
}

/// Box smoothing: `H(AND(H(pix, h), V(pix, v)), h)`.
///
/// Both directional passes run on the original image; their intersection
/// is smoothed horizontally once more with `h`.
pub fn box_smooth(pix: &Pix, horizontal: u32, vertical: u32) -> RlsaResult<Pix> {
    let h = smooth_horizontal(pix, horizontal);
    let v = smooth_vertical(pix, vertical);
    let combined = pixel_and(&h, &v)?;
    let out = smooth_horizontal(&combined, horizontal);

    debug!(
        "box smooth h={} v={} on {}x{}: {} -> {} black",
        horizontal,
        vertical,
        pix.width(),
        pix.height(),
        pix.count_black(),
        out.count_black()
    );
    Ok(out)
}

/// [`box_smooth`] driven by a [`BoxSmoothOptions`].
pub fn box_smooth_with(pix: &Pix, options: &BoxSmoothOptions) -> RlsaResult<Pix> {
    box_smooth(pix, options.horizontal_threshold, options.vertical_threshold)
}
