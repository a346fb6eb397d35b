//! Directional run-length smoothing
//!
//! A smoothing pass walks every line of the image in one direction and
//! paints black each white run whose two bounding black pixels are at
//! most `threshold` positions apart.
//!
//! Blackness is always read from the input image. Fills written earlier in
//! the same line therefore never start new runs, and the result does not
//! depend on the order in which lines are processed.

use log::trace;
use pageclass_core::Pix;

/// Scan direction of a smoothing pass
///
/// A pass is a sequence of lines; each line is a sequence of positions.
/// The direction only decides how (line, position) maps onto (x, y).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanDirection {
    /// Lines are rows; positions run left to right
    Horizontal,
    /// Lines are columns; positions run top to bottom
    Vertical,
}

impl ScanDirection {
    /// Number of lines in `pix` for this direction.
    #[inline]
    pub fn line_count(self, pix: &Pix) -> u32 {
        match self {
            ScanDirection::Horizontal => pix.height(),
            ScanDirection::Vertical => pix.width(),
        }
    }

    /// Number of positions in one line of `pix`.
    #[inline]
    pub fn line_length(self, pix: &Pix) -> u32 {
        match self {
            ScanDirection::Horizontal => pix.width(),
            ScanDirection::Vertical => pix.height(),
        }
    }

    /// Map (line index, position index) to image coordinates (x, y).
    #[inline]
    pub fn to_xy(self, line: u32, position: u32) -> (u32, u32) {
        match self {
            ScanDirection::Horizontal => (position, line),
            ScanDirection::Vertical => (line, position),
        }
    }
}

/// Smooth an image along one direction.
///
/// For every line, when the black pixel at position `i` follows the
/// previous black pixel at `last` with `i - last <= threshold`, all
/// positions strictly between `last` and `i` become black in the output.
///
/// Guarantees:
/// - the output has the input's dimensions and format
/// - no black pixel ever becomes white
/// - `threshold == 0` returns a pixel-identical copy
/// - lines with fewer than two black pixels are unchanged
///
/// # Arguments
///
/// * `pix` - Input image (any format)
/// * `direction` - Rows or columns
/// * `threshold` - Largest index distance between two black pixels whose
///   gap is filled
pub fn smooth(pix: &Pix, direction: ScanDirection, threshold: u32) -> Pix {
    let mut out = pix.to_mut();
    let lines = direction.line_count(pix);
    let length = direction.line_length(pix);
    let mut filled = 0u64;

    for line in 0..lines {
        let mut last_black: Option<u32> = None;

        for i in 0..length {
            let (x, y) = direction.to_xy(line, i);
            if !pix.is_black_unchecked(x, y) {
                continue;
            }

            if let Some(last) = last_black.filter(|&last| i - last <= threshold) {
                for k in last + 1..i {
                    let (fx, fy) = direction.to_xy(line, k);
                    out.set_black_unchecked(fx, fy);
                }
                filled += (i - last - 1) as u64;
            }
            last_black = Some(i);
        }
    }

    trace!(
        "smooth {:?} threshold={} on {}x{}: filled {} pixels",
        direction,
        threshold,
        pix.width(),
        pix.height(),
        filled
    );

    out.into()
}

/// Smooth along rows. See [`smooth`].
pub fn smooth_horizontal(pix: &Pix, threshold: u32) -> Pix {
    smooth(pix, ScanDirection::Horizontal, threshold)
}

/// Smooth along columns. See [`smooth`].
pub fn smooth_vertical(pix: &Pix, threshold: u32) -> Pix {
    smooth(pix, ScanDirection::Vertical, threshold)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pageclass_core::{PixelFormat, color};

    fn row(pattern: &str) -> Pix {
        let data = pattern
            .chars()
            .map(|c| if c == '#' { color::BLACK } else { color::WHITE })
            .collect();
        Pix::from_data(pattern.len() as u32, 1, PixelFormat::Rgb, data).unwrap()
    }

    fn column(pattern: &str) -> Pix {
        let data = pattern
            .chars()
            .map(|c| if c == '#' { color::BLACK } else { color::WHITE })
            .collect();
        Pix::from_data(1, pattern.len() as u32, PixelFormat::Rgb, data).unwrap()
    }

    fn render(pix: &Pix) -> String {
        pix.data()
            .iter()
            .map(|&p| if color::is_color_black(p) { '#' } else { '.' })
            .collect()
    }

    #[test]
    fn test_to_xy() {
        assert_eq!(ScanDirection::Horizontal.to_xy(2, 5), (5, 2));
        assert_eq!(ScanDirection::Vertical.to_xy(2, 5), (2, 5));
    }

    #[test]
    fn test_line_geometry() {
        let pix = Pix::new(7, 3, PixelFormat::Rgb).unwrap();
        assert_eq!(ScanDirection::Horizontal.line_count(&pix), 3);
        assert_eq!(ScanDirection::Horizontal.line_length(&pix), 7);
        assert_eq!(ScanDirection::Vertical.line_count(&pix), 7);
        assert_eq!(ScanDirection::Vertical.line_length(&pix), 3);
    }

    #[test]
    fn test_gap_boundary() {
        // Black at 0 and 3: index distance 3
        let pix = row("#..#");
        assert_eq!(render(&smooth_horizontal(&pix, 2)), "#..#");
        assert_eq!(render(&smooth_horizontal(&pix, 3)), "####");
    }

    #[test]
    fn test_zero_threshold_noop() {
        let pix = row("#.#..##...#");
        let out = smooth_horizontal(&pix, 0);
        assert_eq!(out.data(), pix.data());
    }

    #[test]
    fn test_single_black_unchanged() {
        let pix = row("...#....");
        assert_eq!(render(&smooth_horizontal(&pix, 100)), "...#....");
    }

    #[test]
    fn test_edges_not_filled() {
        // Runs touching the line ends have only one bounding black pixel
        let pix = row("..#.#..");
        assert_eq!(render(&smooth_horizontal(&pix, 10)), "..###..");
    }

    #[test]
    fn test_fills_read_from_input() {
        // Gaps 0-3 and 3-7 are judged independently against the input
        let pix = row("#..#...#");
        assert_eq!(render(&smooth_horizontal(&pix, 3)), "####...#");
        assert_eq!(render(&smooth_horizontal(&pix, 4)), "########");
    }

    #[test]
    fn test_vertical() {
        let pix = column("#..#.....#");
        assert_eq!(render(&smooth_vertical(&pix, 3)), "####.....#");
    }

    #[test]
    fn test_fill_color_is_black() {
        let pix = row("#.#");
        let out = smooth_horizontal(&pix, 2);
        assert_eq!(out.get_pixel(1, 0), Some(color::BLACK));
    }

    #[test]
    fn test_non_black_colors_kept() {
        // A dark red pixel counts as black and keeps its color
        let mut pm = row("..#").to_mut();
        pm.set_rgb(0, 0, 200, 10, 10).unwrap();
        let pix: Pix = pm.into();
        let out = smooth_horizontal(&pix, 5);
        assert_eq!(out.get_rgb(0, 0), Some((200, 10, 10)));
        assert_eq!(out.get_pixel(1, 0), Some(color::BLACK));
    }
}
