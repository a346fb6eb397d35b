//! Error types for pageclass-core
//!
//! Provides a unified error type for all operations in the core crate.
//! Every variant is a caller-contract violation: nothing here is worth
//! retrying, so errors carry just enough context to report the bad input.

use crate::pix::PixelFormat;
use thiserror::Error;

/// pageclass-core error type
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid image dimensions
    #[error("invalid image dimensions: {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Image dimensions above the supported pixel count
    #[error("image too large: {width}x{height} exceeds {max} pixels")]
    ImageTooLarge { width: u32, height: u32, max: u64 },

    /// Index out of bounds
    #[error("index out of bounds: {index} >= {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Pixel coordinates outside the image
    #[error("pixel ({x}, {y}) outside {width}x{height} image")]
    PixelOutOfRange {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
    },

    /// Incompatible image sizes
    #[error("incompatible image sizes: {0}x{1} vs {2}x{3}")]
    IncompatibleSizes(u32, u32, u32, u32),

    /// Incompatible pixel formats
    #[error("incompatible pixel formats: {0:?} vs {1:?}")]
    IncompatibleFormats(PixelFormat, PixelFormat),

    /// Raw pixel buffer does not match the declared geometry
    #[error("pixel buffer holds {actual} values, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },
}

/// Result type alias for pageclass-core operations
pub type Result<T> = std::result::Result<T, Error>;
