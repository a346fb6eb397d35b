//! The ten-field block feature vector

use std::fmt;

/// Number of fields in a [`FeatureVector`]
pub const FEATURE_COUNT: usize = 10;

/// Attribute names, in field order
///
/// These are the column names of the UCI page-blocks data set.
pub const ATTRIBUTE_NAMES: [&str; FEATURE_COUNT] = [
    "height", "length", "area", "eccen", "p_black", "p_and", "mean_tr", "blackpix", "blackand",
    "wb_trans",
];

/// Measurements of one page block
///
/// Counts are stored as `f64` so vectors read from data files and vectors
/// extracted from images share one representation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FeatureVector {
    /// Block height in pixels
    pub height: f64,
    /// Block width in pixels
    pub width: f64,
    /// `width * height`
    pub area: f64,
    /// `width / height`
    pub eccentricity: f64,
    /// `black_count / area`
    pub black_ratio: f64,
    /// `black_count_smoothed / area`
    pub black_ratio_smoothed: f64,
    /// `black_count / (transitions + 1)`
    pub mean_run: f64,
    /// Black pixels in the block
    pub black_count: f64,
    /// Black pixels after box smoothing
    pub black_count_smoothed: f64,
    /// Horizontal white-to-black transitions
    pub transitions: f64,
}

impl FeatureVector {
    /// Fields in attribute order.
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.height,
            self.width,
            self.area,
            self.eccentricity,
            self.black_ratio,
            self.black_ratio_smoothed,
            self.mean_run,
            self.black_count,
            self.black_count_smoothed,
            self.transitions,
        ]
    }

    /// Build a vector from fields in attribute order.
    pub fn from_array(values: [f64; FEATURE_COUNT]) -> Self {
        let [
            height,
            width,
            area,
            eccentricity,
            black_ratio,
            black_ratio_smoothed,
            mean_run,
            black_count,
            black_count_smoothed,
            transitions,
        ] = values;
        Self {
            height,
            width,
            area,
            eccentricity,
            black_ratio,
            black_ratio_smoothed,
            mean_run,
            black_count,
            black_count_smoothed,
            transitions,
        }
    }

    /// Field by attribute index.
    ///
    /// # Panics
    ///
    /// Panics if `index >= FEATURE_COUNT`.
    pub fn get(&self, index: usize) -> f64 {
        self.to_array()[index]
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self::from_array(values)
    }
}

/// Tab-separated values in attribute order.
impl fmt::Display for FeatureVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.to_array().iter().enumerate() {
            if i > 0 {
                write!(f, "\t")?;
            }
            write!(f, "{}", value)?;
        }
        Ok(())
    }
}
