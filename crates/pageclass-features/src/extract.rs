//! Feature extraction
//!
//! The extractor box-smooths every block with fixed thresholds. Changing
//! them changes the meaning of `p_and` and `blackand`, and with it every
//! model trained on earlier vectors.

use crate::error::{FeatureError, FeatureResult};
use crate::vector::FeatureVector;
use log::debug;
use pageclass_core::Pix;
use pageclass_rlsa::{BoxSmoothOptions, box_smooth_with};

/// Box smoothing thresholds used by [`extract`]
pub const FEATURE_BOX_SMOOTH: BoxSmoothOptions = BoxSmoothOptions {
    horizontal_threshold: 80,
    vertical_threshold: 80,
};

/// Count the black pixels of an image.
pub fn count_black_pixels(pix: &Pix) -> u64 {
    pix.count_black()
}

/// Count horizontal white-to-black transitions.
///
/// Summed over all rows: the number of positions `x` where `(x, y)` is
/// white and `(x + 1, y)` is black. Rows are independent; the end of one
/// row is never compared with the start of the next.
pub fn count_transitions(pix: &Pix) -> u64 {
    let mut transitions = 0u64;
    for y in 0..pix.height() {
        let mut prev_black = true;
        for x in 0..pix.width() {
            let black = pix.is_black_unchecked(x, y);
            if black && !prev_black {
                transitions += 1;
            }
            prev_black = black;
        }
    }
    transitions
}

/// Compute the feature vector of a block.
///
/// # Errors
///
/// Returns [`FeatureError::InvalidGeometry`] for an image with zero width
/// or height.
pub fn extract(pix: &Pix) -> FeatureResult<FeatureVector> {
    let (width, height) = (pix.width(), pix.height());
    if width == 0 || height == 0 {
        return Err(FeatureError::InvalidGeometry { width, height });
    }

    let smoothed = box_smooth_with(pix, &FEATURE_BOX_SMOOTH)?;

    let area = width as f64 * height as f64;
    let black = count_black_pixels(pix) as f64;
    let black_smoothed = count_black_pixels(&smoothed) as f64;
    let transitions = count_transitions(pix) as f64;

    let vector = FeatureVector {
        height: height as f64,
        width: width as f64,
        area,
        eccentricity: width as f64 / height as f64,
        black_ratio: black / area,
        black_ratio_smoothed: black_smoothed / area,
        mean_run: black / (transitions + 1.0),
        black_count: black,
        black_count_smoothed: black_smoothed,
        transitions,
    };
    debug!("features of {}x{} block: {}", width, height, vector);
    Ok(vector)
}
