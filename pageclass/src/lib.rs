//! pageclass - Classify page blocks of scanned documents
//!
//! A page block is a rectangular region cut out of a scanned page. This
//! crate describes each block by ten features computed from its
//! black/white content and run-length smoothed shape, and classifies it as
//! text, horizontal line, picture, vertical line or graphic.
//!
//! # Overview
//!
//! - [`io`]: reading and writing PNG, BMP and PNM images
//! - [`rlsa`]: run-length smoothing and box smoothing
//! - [`features`]: the ten-field feature vector of a block
//! - [`classify`]: datasets, the classifier trait and a C4.5 decision tree
//!
//! # Example
//!
//! ```
//! use pageclass::{InitColor, Pix, PixelFormat};
//!
//! let pix = Pix::new_with_init(2, 2, PixelFormat::Rgb, InitColor::Black).unwrap();
//! let vector = pageclass::features::feature_vector(&pix).unwrap();
//! assert_eq!(vector.area, 4.0);
//! assert_eq!(vector.mean_run, 4.0);
//! ```

// Re-export core types (primary data structures used everywhere)
pub use pageclass_core::*;

// Re-export domain crates as modules to avoid name conflicts
pub use pageclass_classify as classify;
pub use pageclass_features as features;
pub use pageclass_io as io;
pub use pageclass_rlsa as rlsa;
