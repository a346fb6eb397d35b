//! pageclass-test - Regression test framework for pageclass
//!
//! Tests build small synthetic page images from ASCII art, run them
//! through the pipeline and record value / image comparisons in a
//! [`RegParams`], which reports every failure at the end instead of
//! stopping at the first one.
//!
//! # Usage
//!
//! ```ignore
//! use pageclass_test::{RegParams, pix_from_ascii};
//!
//! let mut rp = RegParams::new("rlsa");
//! let pix = pix_from_ascii(&["#..#"]).unwrap();
//! rp.compare_values(2.0, pix.count_black() as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "display" to also write intermediate images
//!   under `tests/regout/` for visual inspection

mod error;
mod params;
mod pattern;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};
pub use pattern::{
    black_positions, checkerboard, pix_from_ascii, pix_from_ascii_with_format, pix_to_ascii,
};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // pageclass-test is at crates/pageclass-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
