//! pageclass-classify - Page block classification
//!
//! This crate turns feature vectors into block classes:
//!
//! - [`BlockClass`]: the five kinds of page block
//! - [`Classifier`]: the trait every classifier implements, plus
//!   [`classify_image`] to go straight from an image to a class
//! - [`Dataset`]: labeled vectors with ARFF and UCI `page-blocks.data`
//!   reading and ARFF writing
//! - [`DecisionTree`]: a C4.5 decision tree
//! - [`Evaluation`]: accuracy, kappa and confusion matrix of a test run
//!
//! # Example
//!
//! ```no_run
//! use pageclass_classify::{Classifier, Dataset, DecisionTree, classify_image};
//!
//! let dataset = Dataset::read("page-blocks.arff")?;
//! let mut tree = DecisionTree::new();
//! tree.build(dataset.examples())?;
//!
//! let pix = pageclass_io::read_image("block.png")?;
//! println!("{}", classify_image(&tree, &pix)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod class;
pub mod classifier;
pub mod dataset;
mod error;
pub mod evaluation;
pub mod tree;

pub use error::{ClassifyError, ClassifyResult};

pub use class::{BlockClass, NUM_CLASSES};
pub use classifier::{Classifier, classify_image};
pub use dataset::{DEFAULT_RELATION, Dataset, LabeledVector};
pub use evaluation::Evaluation;
pub use tree::{DecisionTree, TreeOptions};

// Re-export features for convenience
pub use pageclass_features;
