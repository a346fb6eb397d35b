//! pageclass-rlsa - Run-length smoothing for document images
//!
//! This crate provides the run-length smoothing algorithm (RLSA) used to
//! merge nearby ink into block shapes:
//!
//! - Directional smoothing: fill short white gaps between black pixels
//!   along rows ([`ScanDirection::Horizontal`]) or columns
//!   ([`ScanDirection::Vertical`])
//! - Pixel-wise AND of two images
//! - Box smoothing: horizontal and vertical passes, their AND, then a
//!   final horizontal pass
//!
//! All operations read the input image and return a new one of identical
//! size and format; inputs are never modified.

pub mod compose;
mod error;
pub mod smooth;

pub use error::{RlsaError, RlsaResult};

pub use compose::{BoxSmoothOptions, box_smooth, box_smooth_with, pixel_and};
pub use smooth::{ScanDirection, smooth, smooth_horizontal, smooth_vertical};
