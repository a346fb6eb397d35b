//! pageclass-features - Feature vectors of page blocks
//!
//! A page block (one cropped region of a scanned page) is described by ten
//! numbers: its geometry, how much of it is ink, how much of it is ink
//! after box smoothing, and how often rows switch from white to black.
//! The layout matches the attribute schema of the UCI page-blocks data,
//! so vectors extracted here can be mixed with that data set.
//!
//! # Example
//!
//! ```no_run
//! use pageclass_features::feature_vector;
//!
//! let pix = pageclass_io::read_image("block.png")?;
//! let vector = feature_vector(&pix)?;
//! println!("{}", vector);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
pub mod extract;
pub mod vector;

pub use error::{FeatureError, FeatureResult};

pub use extract::{FEATURE_BOX_SMOOTH, count_black_pixels, count_transitions, extract};
pub use vector::{ATTRIBUTE_NAMES, FEATURE_COUNT, FeatureVector};

use pageclass_core::Pix;

/// Compute the feature vector of one block.
///
/// This is the single entry point from an image to the vector handed to a
/// classifier.
pub fn feature_vector(pix: &Pix) -> FeatureResult<FeatureVector> {
    extract(pix)
}

/// Compute feature vectors for a batch of blocks, in input order.
///
/// Fails on the first block that cannot be measured. With the `parallel`
/// feature the blocks are processed on the rayon thread pool.
pub fn feature_vectors(blocks: &[Pix]) -> FeatureResult<Vec<FeatureVector>> {
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;

        blocks.par_iter().map(extract).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        blocks.iter().map(extract).collect()
    }
}
