use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Extract features from page blocks and classify them.
#[derive(Debug, Parser)]
#[command(name = "pageclass", about, version)]
pub struct Cli {
    /// Increase log output (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Train on a dataset and print the class of one block image
    Classify {
        /// Training dataset (ARFF or UCI page-blocks layout)
        #[arg(value_name = "DATASET")]
        dataset: PathBuf,

        /// Block image to classify
        #[arg(value_name = "IMAGE")]
        image: PathBuf,

        #[command(flatten)]
        tree: TreeArgs,
    },

    /// Build a labeled ARFF dataset from a directory of block images
    ///
    /// With --class every image in IMAGE_DIR gets that class. Without it,
    /// each subdirectory named after a class (e.g. `text`,
    /// `horizontal-line`) contributes its images with that class.
    Generate {
        /// Output dataset file (ARFF)
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Directory of block images
        #[arg(value_name = "IMAGE_DIR")]
        image_dir: PathBuf,

        /// Label every image in IMAGE_DIR with this class
        #[arg(long, value_name = "NAME")]
        class: Option<String>,

        /// Add to OUTPUT instead of replacing it
        #[arg(long)]
        append: bool,
    },

    /// Train on one dataset and test on another
    Evaluate {
        /// Training dataset
        #[arg(value_name = "TRAIN")]
        train: PathBuf,

        /// Test dataset
        #[arg(value_name = "TEST")]
        test: PathBuf,

        #[command(flatten)]
        tree: TreeArgs,
    },

    /// Train on the first part of a dataset and test on the rest
    EvaluateSelf {
        /// Dataset to split
        #[arg(value_name = "DATASET")]
        dataset: PathBuf,

        /// Fraction of the dataset used for training
        #[arg(long, default_value_t = 0.5)]
        training_fraction: f64,

        /// Train on exactly the first N examples instead
        #[arg(long, value_name = "N", conflicts_with = "training_fraction")]
        split_position: Option<usize>,

        /// Leave examples of this class out of the test set (repeatable)
        #[arg(long, value_name = "CLASS")]
        exclude_class: Vec<String>,

        #[command(flatten)]
        tree: TreeArgs,
    },

    /// Print the feature vector of each image
    Features {
        /// Block images
        #[arg(value_name = "IMAGE", required = true)]
        images: Vec<PathBuf>,
    },

    /// Write a run-length smoothed copy of an image
    Smooth {
        /// Input image
        #[arg(value_name = "IMAGE")]
        image: PathBuf,

        /// Output image; the format follows the extension
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Smoothing mode
        #[arg(long, value_enum, default_value_t = SmoothMode::Box)]
        mode: SmoothMode,

        /// Horizontal gap threshold
        #[arg(long, default_value_t = 10)]
        horizontal: u32,

        /// Vertical gap threshold
        #[arg(long, default_value_t = 20)]
        vertical: u32,
    },
}

/// Decision tree options shared by the training subcommands.
#[derive(Debug, Clone, Copy, Args)]
pub struct TreeArgs {
    /// Minimum number of training examples per branch
    #[arg(long, default_value_t = 2)]
    pub min_leaf: usize,

    /// Skip pruning
    #[arg(long)]
    pub unpruned: bool,

    /// Print the tree after training
    #[arg(long)]
    pub show_tree: bool,
}

/// Which smoothing to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SmoothMode {
    /// Fill gaps along rows
    Horizontal,
    /// Fill gaps along columns
    Vertical,
    /// Horizontal and vertical passes, their AND, then a horizontal pass
    Box,
}
