//! Error types for pageclass-classify

use thiserror::Error;

/// Errors that can occur during classification
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// Feature extraction failed
    #[error("feature error: {0}")]
    Feature(#[from] pageclass_features::FeatureError),

    /// I/O error while reading or writing a dataset
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// The classifier has not been built
    #[error("classifier has not been built")]
    NotBuilt,

    /// No training examples were supplied
    #[error("dataset is empty")]
    EmptyDataset,

    /// A class label that is neither a class name nor a class code
    #[error("unknown class: {0:?}")]
    UnknownClass(String),

    /// Malformed dataset file
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Invalid parameter provided
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for classification operations
pub type ClassifyResult<T> = Result<T, ClassifyError>;
