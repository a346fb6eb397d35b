//! Error types for pageclass-features

use thiserror::Error;

/// Errors that can occur during feature extraction
#[derive(Debug, Error)]
pub enum FeatureError {
    /// The block has no pixels along one axis
    #[error("invalid block geometry: {width}x{height}")]
    InvalidGeometry { width: u32, height: u32 },

    /// Smoothing failed
    #[error("smoothing error: {0}")]
    Rlsa(#[from] pageclass_rlsa::RlsaError),
}

/// Result type for feature extraction
pub type FeatureResult<T> = Result<T, FeatureError>;
