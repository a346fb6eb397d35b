//! PIX - The image container
//!
//! The `Pix` structure is the image type every pageclass stage works on.
//!
//! # Pixel layout
//!
//! - One packed 32-bit color per pixel (see [`crate::color`])
//! - Rows are stored top to bottom, pixels left to right, with no padding
//! - The [`PixelFormat`] decides how values written through [`PixMut`]
//!   are normalized; reads always return the stored packed color
//!
//! # Ownership model
//!
//! `Pix` uses `Arc` for cheap cloning (shared ownership).
//! To modify pixel data, convert to `PixMut` via [`Pix::try_into_mut`]
//! or [`Pix::to_mut`], then convert back with `Into<Pix>`.

mod access;
mod binary;

use crate::color;
use crate::error::{Error, Result};
use std::sync::Arc;

/// Largest image accepted, in pixels (2 GiB of packed colors).
pub const MAX_PIXELS: u64 = 1 << 29;

/// Initial color for [`Pix::new_with_init`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitColor {
    /// Initialize to opaque black
    Black,
    /// Initialize to opaque white
    White,
}

impl InitColor {
    /// Packed value used for the fill.
    pub fn value(self) -> u32 {
        match self {
            InitColor::Black => color::BLACK,
            InitColor::White => color::WHITE,
        }
    }
}

/// Pixel format of an image.
///
/// All formats share the packed 32-bit storage; the format only changes
/// what a write stores. Two images are format-compatible when their
/// formats are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelFormat {
    /// Opaque color: alpha is forced to 0xFF on write
    #[default]
    Rgb,
    /// Color with alpha, stored as written
    Rgba,
    /// Grayscale: R, G and B are replaced by their integer mean
    Gray,
    /// Bilevel: every write stores exactly black or white
    Binary,
}

impl PixelFormat {
    /// Normalize a packed color for storage in an image of this format.
    #[inline]
    pub fn normalize(self, pixel: u32) -> u32 {
        match self {
            PixelFormat::Rgb => pixel | (0xff << color::ALPHA_SHIFT),
            PixelFormat::Rgba => pixel,
            PixelFormat::Gray => {
                let (r, g, b) = color::extract_rgb(pixel);
                let v = ((r as u32 + g as u32 + b as u32) / 3) as u8;
                color::compose_rgb(v, v, v)
            }
            PixelFormat::Binary => {
                if color::is_color_black(pixel) {
                    color::BLACK
                } else {
                    color::WHITE
                }
            }
        }
    }
}

/// Image file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageFormat {
    /// Unknown format
    #[default]
    Unknown,
    /// BMP format
    Bmp,
    /// JFIF JPEG format
    Jpeg,
    /// PNG format
    Png,
    /// PNM format (PBM / PGM / PPM)
    Pnm,
    /// GIF format
    Gif,
}

impl ImageFormat {
    /// Get the file extension for this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Unknown => "dat",
            Self::Bmp => "bmp",
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::Pnm => "pnm",
            Self::Gif => "gif",
        }
    }

    /// Guess a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "bmp" => Self::Bmp,
            "jpg" | "jpeg" => Self::Jpeg,
            "png" => Self::Png,
            "pnm" | "pbm" | "pgm" | "ppm" => Self::Pnm,
            "gif" => Self::Gif,
            _ => Self::Unknown,
        }
    }
}

/// Internal PIX data
#[derive(Debug, Clone)]
struct PixData {
    /// Width in pixels
    width: u32,
    /// Height in pixels
    height: u32,
    /// Pixel format
    format: PixelFormat,
    /// Input file format
    informat: ImageFormat,
    /// Packed colors, row-major
    data: Vec<u32>,
}

/// PIX - Image container
///
/// `Pix` is immutable and reference counted via `Arc`, so clones are
/// cheap and can be handed to worker threads freely.
///
/// # Examples
///
/// ```
/// use pageclass_core::{Pix, PixelFormat};
///
/// let pix = Pix::new(640, 480, PixelFormat::Rgb).unwrap();
/// assert_eq!(pix.width(), 640);
/// assert_eq!(pix.height(), 480);
/// ```
#[derive(Debug, Clone)]
pub struct Pix {
    inner: Arc<PixData>,
}

impl Pix {
    /// Create a new PIX with the specified dimensions and format.
    ///
    /// The image data is initialized to zero (transparent black).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0 and
    /// [`Error::ImageTooLarge`] above [`MAX_PIXELS`].
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        Self::filled(width, height, format, 0)
    }

    /// Create a new PIX filled with black or white.
    pub fn new_with_init(
        width: u32,
        height: u32,
        format: PixelFormat,
        init: InitColor,
    ) -> Result<Self> {
        Self::filled(width, height, format, init.value())
    }

    /// Wrap an existing buffer of packed colors.
    ///
    /// Values are normalized for `format` on the way in.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] for a zero dimension and
    /// [`Error::BufferSizeMismatch`] when `data.len() != width * height`.
    pub fn from_data(
        width: u32,
        height: u32,
        format: PixelFormat,
        mut data: Vec<u32>,
    ) -> Result<Self> {
        let expected = Self::check_dimensions(width, height)?;
        if data.len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        for value in data.iter_mut() {
            *value = format.normalize(*value);
        }
        Ok(Self::from_parts(width, height, format, data))
    }

    fn filled(width: u32, height: u32, format: PixelFormat, value: u32) -> Result<Self> {
        let len = Self::check_dimensions(width, height)?;
        Ok(Self::from_parts(width, height, format, vec![value; len]))
    }

    fn from_parts(width: u32, height: u32, format: PixelFormat, data: Vec<u32>) -> Self {
        Pix {
            inner: Arc::new(PixData {
                width,
                height,
                format,
                informat: ImageFormat::Unknown,
                data,
            }),
        }
    }

    /// Validate image dimensions and return the pixel count.
    ///
    /// Decoders call this with header values before allocating anything.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimension`] if width or height is 0 and
    /// [`Error::ImageTooLarge`] above [`MAX_PIXELS`].
    pub fn check_dimensions(width: u32, height: u32) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimension { width, height });
        }
        let npixels = width as u64 * height as u64;
        if npixels > MAX_PIXELS {
            return Err(Error::ImageTooLarge {
                width,
                height,
                max: MAX_PIXELS,
            });
        }
        Ok(npixels as usize)
    }

    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel format.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.inner.format
    }

    /// Get the input file format.
    #[inline]
    pub fn informat(&self) -> ImageFormat {
        self.inner.informat
    }

    /// Get raw access to the packed pixel data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get the pixels of row `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= height`.
    #[inline]
    pub fn row_data(&self, y: u32) -> &[u32] {
        let w = self.inner.width as usize;
        let start = y as usize * w;
        &self.inner.data[start..start + w]
    }

    /// Create a blank image with the same dimensions and format.
    ///
    /// This is the factory every transformation uses for its output.
    pub fn create_template(&self) -> Self {
        Pix {
            inner: Arc::new(PixData {
                width: self.width(),
                height: self.height(),
                format: self.format(),
                informat: self.informat(),
                data: vec![0; self.inner.data.len()],
            }),
        }
    }

    /// Check if two images have the same width and height.
    pub fn sizes_equal(&self, other: &Pix) -> bool {
        self.width() == other.width() && self.height() == other.height()
    }

    /// Check if two images have the same pixel format.
    pub fn same_format(&self, other: &Pix) -> bool {
        self.format() == other.format()
    }

    /// Verify that `other` can be combined pixel-for-pixel with `self`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IncompatibleSizes`] or [`Error::IncompatibleFormats`].
    pub fn check_compatible(&self, other: &Pix) -> Result<()> {
        if !self.sizes_equal(other) {
            return Err(Error::IncompatibleSizes(
                self.width(),
                self.height(),
                other.width(),
                other.height(),
            ));
        }
        if !self.same_format(other) {
            return Err(Error::IncompatibleFormats(self.format(), other.format()));
        }
        Ok(())
    }

    /// Try to get mutable access without copying.
    ///
    /// Succeeds only when this is the sole reference to the data.
    pub fn try_into_mut(self) -> std::result::Result<PixMut, Self> {
        match Arc::try_unwrap(self.inner) {
            Ok(data) => Ok(PixMut { inner: data }),
            Err(arc) => Err(Pix { inner: arc }),
        }
    }

    /// Create a mutable copy of this PIX.
    pub fn to_mut(&self) -> PixMut {
        PixMut {
            inner: (*self.inner).clone(),
        }
    }
}

/// Mutable PIX
///
/// Obtained from [`Pix::try_into_mut`] or [`Pix::to_mut`]; converts back
/// with `Into<Pix>`.
#[derive(Debug)]
pub struct PixMut {
    inner: PixData,
}

impl PixMut {
    /// Get the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.inner.width
    }

    /// Get the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.inner.height
    }

    /// Get the pixel format.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.inner.format
    }

    /// Set the input file format.
    pub fn set_informat(&mut self, format: ImageFormat) {
        self.inner.informat = format;
    }

    /// Get raw access to the packed pixel data.
    #[inline]
    pub fn data(&self) -> &[u32] {
        &self.inner.data
    }

    /// Get mutable access to the raw pixel data.
    ///
    /// Values written here bypass format normalization.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u32] {
        &mut self.inner.data
    }

    /// Fill the whole image with black or white.
    pub fn set_black_or_white(&mut self, init: InitColor) {
        let value = init.value();
        self.inner.data.iter_mut().for_each(|p| *p = value);
    }
}

impl From<PixMut> for Pix {
    fn from(pix: PixMut) -> Self {
        Pix {
            inner: Arc::new(pix.inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pix_creation() {
        let pix = Pix::new(100, 200, PixelFormat::Rgb).unwrap();
        assert_eq!(pix.width(), 100);
        assert_eq!(pix.height(), 200);
        assert_eq!(pix.format(), PixelFormat::Rgb);
        assert_eq!(pix.data().len(), 20_000);
        assert!(pix.data().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(matches!(
            Pix::new(0, 100, PixelFormat::Rgb),
            Err(Error::InvalidDimension { .. })
        ));
        assert!(Pix::new(100, 0, PixelFormat::Binary).is_err());
    }

    #[test]
    fn test_too_large() {
        assert!(matches!(
            Pix::new(u32::MAX, u32::MAX, PixelFormat::Binary),
            Err(Error::ImageTooLarge { .. })
        ));
        assert!(matches!(
            Pix::check_dimensions(1 << 15, 1 << 15),
            Err(Error::ImageTooLarge { .. })
        ));
        assert_eq!(Pix::check_dimensions(1 << 14, 1 << 15).unwrap(), 1 << 29);
    }

    #[test]
    fn test_new_with_init() {
        let pix = Pix::new_with_init(3, 2, PixelFormat::Gray, InitColor::White).unwrap();
        assert!(pix.data().iter().all(|&p| p == color::WHITE));
    }

    #[test]
    fn test_from_data_size_check() {
        let err = Pix::from_data(2, 2, PixelFormat::Rgb, vec![0; 3]).unwrap_err();
        assert!(matches!(
            err,
            Error::BufferSizeMismatch {
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_from_data_normalizes() {
        let data = vec![0x0000_0010, 0x00c0_c0c0];
        let pix = Pix::from_data(2, 1, PixelFormat::Binary, data).unwrap();
        assert_eq!(pix.data(), &[color::BLACK, color::WHITE]);
    }

    #[test]
    fn test_normalize_formats() {
        let px = color::compose_rgba(30, 60, 90, 7);
        assert_eq!(PixelFormat::Rgba.normalize(px), px);
        assert_eq!(color::alpha(PixelFormat::Rgb.normalize(px)), 255);
        assert_eq!(
            PixelFormat::Gray.normalize(px),
            color::compose_rgb(60, 60, 60)
        );
        assert_eq!(PixelFormat::Binary.normalize(px), color::BLACK);
    }

    #[test]
    fn test_create_template() {
        let pix = Pix::new_with_init(5, 4, PixelFormat::Binary, InitColor::White).unwrap();
        let template = pix.create_template();
        assert!(template.sizes_equal(&pix));
        assert!(template.same_format(&pix));
        assert!(template.data().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_check_compatible() {
        let a = Pix::new(4, 4, PixelFormat::Rgb).unwrap();
        let b = Pix::new(4, 5, PixelFormat::Rgb).unwrap();
        let c = Pix::new(4, 4, PixelFormat::Binary).unwrap();
        assert!(a.check_compatible(&a.clone()).is_ok());
        assert!(matches!(
            a.check_compatible(&b),
            Err(Error::IncompatibleSizes(4, 4, 4, 5))
        ));
        assert!(matches!(
            a.check_compatible(&c),
            Err(Error::IncompatibleFormats(PixelFormat::Rgb, PixelFormat::Binary))
        ));
    }

    #[test]
    fn test_clone_shares_data() {
        let pix1 = Pix::new(10, 10, PixelFormat::Rgb).unwrap();
        let pix2 = pix1.clone();
        assert!(pix2.try_into_mut().is_err());
        assert!(pix1.try_into_mut().is_ok());
    }

    #[test]
    fn test_to_mut_leaves_original() {
        let pix = Pix::new_with_init(2, 2, PixelFormat::Rgb, InitColor::White).unwrap();
        let mut pm = pix.to_mut();
        pm.set_black_or_white(InitColor::Black);
        let modified: Pix = pm.into();
        assert!(pix.data().iter().all(|&p| p == color::WHITE));
        assert!(modified.data().iter().all(|&p| p == color::BLACK));
    }

    #[test]
    fn test_format_extension() {
        assert_eq!(ImageFormat::Png.extension(), "png");
        assert_eq!(ImageFormat::from_extension("PGM"), ImageFormat::Pnm);
        assert_eq!(ImageFormat::from_extension("JPEG"), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_extension("tif"), ImageFormat::Unknown);
        assert_eq!(ImageFormat::from_extension("xyz"), ImageFormat::Unknown);
    }
}
