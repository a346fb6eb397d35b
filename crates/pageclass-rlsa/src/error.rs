//! Error types for pageclass-rlsa

use thiserror::Error;

/// Errors that can occur during smoothing operations
#[derive(Debug, Error)]
pub enum RlsaError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] pageclass_core::Error),
}

/// Result type for smoothing operations
pub type RlsaResult<T> = Result<T, RlsaError>;
