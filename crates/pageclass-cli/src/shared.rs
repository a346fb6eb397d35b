use std::path::Path;

use pageclass_classify::{Dataset, DecisionTree, TreeOptions};
use pageclass_core::{ImageFormat, Pix};

use crate::cli::TreeArgs;

/// Read a dataset file, printing a message on failure.
pub fn load_dataset(path: &Path) -> Result<Dataset, i32> {
    if !path.exists() {
        eprintln!("Error: file not found: {}", path.display());
        return Err(1);
    }
    Dataset::read(path).map_err(|e| {
        eprintln!("Error: failed to read dataset {}: {e}", path.display());
        1
    })
}

/// Read a block image, printing a message on failure.
pub fn load_image(path: &Path) -> Result<Pix, i32> {
    if !path.exists() {
        eprintln!("Error: file not found: {}", path.display());
        return Err(1);
    }
    pageclass_io::read_image(path).map_err(|e| {
        eprintln!("Error: failed to read image {}: {e}", path.display());
        1
    })
}

/// Image format implied by a file name's extension.
pub fn format_from_path(path: &Path) -> ImageFormat {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(ImageFormat::Unknown, ImageFormat::from_extension)
}

/// An unbuilt decision tree configured from the command line.
pub fn tree_from_args(args: &TreeArgs) -> DecisionTree {
    DecisionTree::with_options(
        TreeOptions::default()
            .with_min_leaf(args.min_leaf)
            .with_pruning(!args.unpruned),
    )
}

/// Print any error to stderr and map it to exit code 1.
pub fn report<E: std::fmt::Display>(context: &str) -> impl Fn(E) -> i32 + '_ {
    move |e| {
        eprintln!("Error: {context}: {e}");
        1
    }
}
