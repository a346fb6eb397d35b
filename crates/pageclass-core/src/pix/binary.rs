//! Black/white pixel classification
//!
//! Every pageclass algorithm sees an image as bilevel: a pixel is black
//! when [`color::is_color_black`] says so and white otherwise.

use super::{Pix, PixMut};
use crate::color;
use crate::error::{Error, Result};

impl Pix {
    /// Decide whether the pixel at (x, y) is black.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PixelOutOfRange`] outside `[0, width) x [0, height)`.
    pub fn is_black(&self, x: u32, y: u32) -> Result<bool> {
        match self.get_pixel(x, y) {
            Some(pixel) => Ok(color::is_color_black(pixel)),
            None => Err(Error::PixelOutOfRange {
                x,
                y,
                width: self.width(),
                height: self.height(),
            }),
        }
    }

    /// Blackness without bounds checking.
    #[inline]
    pub fn is_black_unchecked(&self, x: u32, y: u32) -> bool {
        color::is_color_black(self.get_pixel_unchecked(x, y))
    }

    /// Count the black pixels in the whole image.
    pub fn count_black(&self) -> u64 {
        self.data()
            .iter()
            .filter(|&&p| color::is_color_black(p))
            .count() as u64
    }
}

impl PixMut {
    /// Paint the pixel at (x, y) black, without bounds checking.
    #[inline]
    pub fn set_black_unchecked(&mut self, x: u32, y: u32) {
        self.set_pixel_unchecked(x, y, color::BLACK);
    }

    /// Paint the pixel at (x, y) white, without bounds checking.
    #[inline]
    pub fn set_white_unchecked(&mut self, x: u32, y: u32) {
        self.set_pixel_unchecked(x, y, color::WHITE);
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, InitColor, Pix, PixelFormat, color};

    #[test]
    fn test_is_black() {
        let mut pm = Pix::new_with_init(2, 2, PixelFormat::Rgb, InitColor::White)
            .unwrap()
            .to_mut();
        pm.set_rgb(1, 0, 10, 20, 30).unwrap();
        let pix: Pix = pm.into();
        assert!(!pix.is_black(0, 0).unwrap());
        assert!(pix.is_black(1, 0).unwrap());
    }

    #[test]
    fn test_is_black_out_of_range() {
        let pix = Pix::new(2, 2, PixelFormat::Rgb).unwrap();
        assert!(matches!(
            pix.is_black(2, 0),
            Err(Error::PixelOutOfRange {
                x: 2,
                y: 0,
                width: 2,
                height: 2
            })
        ));
    }

    #[test]
    fn test_zeroed_pixels_are_black() {
        // A fresh buffer is transparent black; alpha plays no part
        let pix = Pix::new(3, 3, PixelFormat::Rgba).unwrap();
        assert_eq!(pix.count_black(), 9);
    }

    #[test]
    fn test_count_black() {
        let mut pm = Pix::new_with_init(4, 3, PixelFormat::Rgb, InitColor::White)
            .unwrap()
            .to_mut();
        pm.set_black_unchecked(0, 0);
        pm.set_black_unchecked(3, 2);
        pm.set_pixel(1, 1, color::compose_rgb(127, 127, 127)).unwrap();
        let pix: Pix = pm.into();
        assert_eq!(pix.count_black(), 3);
    }
}
