//! pageclass Core - Image container and pixel classification
//!
//! This crate provides the fundamental data structures used throughout
//! the pageclass document-block classifier:
//!
//! - [`Pix`] / [`PixMut`] - The image container (immutable / mutable)
//! - [`PixelFormat`] - How written pixel values are normalized
//! - [`color`] - Packed color decomposition and the black/white rule
//!
//! Every image is a grid of packed 32-bit colors. The core never mutates
//! an input image: transformations build a template with
//! [`Pix::create_template`] or a copy with [`Pix::to_mut`] and write into
//! that instead.

pub mod error;
pub mod pix;

pub use error::{Error, Result};
pub use pix::{ImageFormat, InitColor, MAX_PIXELS, Pix, PixMut, PixelFormat};

/// Color channel helpers for packed 32-bit pixels.
///
/// # Pixel format
///
/// Pixels are stored as `0xAABBGGRR`: red in the least significant byte,
/// then green, then blue, with alpha in the most significant byte. Only
/// the red, green and blue bytes take part in classification.
pub mod color {
    /// Shift amounts for extracting color channels
    pub const RED_SHIFT: u32 = 0;
    pub const GREEN_SHIFT: u32 = 8;
    pub const BLUE_SHIFT: u32 = 16;
    pub const ALPHA_SHIFT: u32 = 24;

    /// Opaque black.
    pub const BLACK: u32 = 0xFF00_0000;
    /// Opaque white.
    pub const WHITE: u32 = 0xFFFF_FFFF;

    /// Mean channel intensity below which a pixel counts as black.
    pub const BLACK_THRESHOLD: f64 = 128.0;

    /// Extract red component from a 32-bit pixel.
    #[inline]
    pub fn red(pixel: u32) -> u8 {
        ((pixel >> RED_SHIFT) & 0xff) as u8
    }

    /// Extract green component from a 32-bit pixel.
    #[inline]
    pub fn green(pixel: u32) -> u8 {
        ((pixel >> GREEN_SHIFT) & 0xff) as u8
    }

    /// Extract blue component from a 32-bit pixel.
    #[inline]
    pub fn blue(pixel: u32) -> u8 {
        ((pixel >> BLUE_SHIFT) & 0xff) as u8
    }

    /// Extract alpha component from a 32-bit pixel.
    #[inline]
    pub fn alpha(pixel: u32) -> u8 {
        ((pixel >> ALPHA_SHIFT) & 0xff) as u8
    }

    /// Compose an opaque 32-bit pixel (alpha = 255).
    #[inline]
    pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
        compose_rgba(r, g, b, 255)
    }

    /// Compose a 32-bit pixel with explicit alpha.
    #[inline]
    pub fn compose_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
        ((r as u32) << RED_SHIFT)
            | ((g as u32) << GREEN_SHIFT)
            | ((b as u32) << BLUE_SHIFT)
            | ((a as u32) << ALPHA_SHIFT)
    }

    /// Extract RGB values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgb(pixel: u32) -> (u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel))
    }

    /// Decide whether a packed color is black.
    ///
    /// A pixel is black when the unweighted mean of its red, green and
    /// blue channels is strictly below 128. There is no gray state.
    #[inline]
    pub fn is_color_black(pixel: u32) -> bool {
        let (r, g, b) = extract_rgb(pixel);
        (r as u32 + g as u32 + b as u32) as f64 / 3.0 < BLACK_THRESHOLD
    }

}
