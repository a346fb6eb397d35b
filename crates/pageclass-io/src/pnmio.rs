//! PNM (Portable Any Map) format support
//!
//! Reads PBM (P1/P4), PGM (P2/P5) and PPM (P3/P6), in both the ASCII
//! and the binary variants. Writes binary P4 / P5 / P6 depending on
//! the pixel format.

use crate::{IoError, IoResult};
use pageclass_core::{Pix, PixelFormat, color};
use std::io::{Read, Write};

/// Byte cursor over a PNM stream
struct PnmParser<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> PnmParser<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Skip whitespace and `#` comments.
    fn skip_blank(&mut self) {
        while self.pos < self.data.len() {
            match self.data[self.pos] {
                b'#' => {
                    while self.pos < self.data.len() && self.data[self.pos] != b'\n' {
                        self.pos += 1;
                    }
                }
                c if c.is_ascii_whitespace() => self.pos += 1,
                _ => break,
            }
        }
    }

    fn next_uint(&mut self) -> IoResult<u32> {
        self.skip_blank();
        let start = self.pos;
        while self.pos < self.data.len() && self.data[self.pos].is_ascii_digit() {
            self.pos += 1;
        }
        if start == self.pos {
            return Err(IoError::InvalidData(format!(
                "expected a number at byte {}",
                start
            )));
        }
        std::str::from_utf8(&self.data[start..self.pos])
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| IoError::InvalidData("number out of range".to_string()))
    }

    /// Next ASCII PBM sample: a single `0` or `1`, separators optional.
    fn next_bit(&mut self) -> IoResult<u32> {
        self.skip_blank();
        match self.data.get(self.pos) {
            Some(b'0') => {
                self.pos += 1;
                Ok(0)
            }
            Some(b'1') => {
                self.pos += 1;
                Ok(1)
            }
            _ => Err(IoError::InvalidData("truncated PBM data".to_string())),
        }
    }

    /// Consume the single whitespace byte that ends a binary header.
    fn end_header(&mut self) -> IoResult<()> {
        match self.data.get(self.pos) {
            Some(c) if c.is_ascii_whitespace() => {
                self.pos += 1;
                Ok(())
            }
            _ => Err(IoError::InvalidData("malformed PNM header".to_string())),
        }
    }

    fn take(&mut self, len: usize) -> IoResult<&'a [u8]> {
        let end = self.pos + len;
        if end > self.data.len() {
            return Err(IoError::InvalidData(format!(
                "truncated PNM data: need {} bytes, have {}",
                len,
                self.data.len() - self.pos
            )));
        }
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }
}

fn scale_sample(value: u32, maxval: u32) -> IoResult<u8> {
    if value > maxval {
        return Err(IoError::InvalidData(format!(
            "sample {} exceeds maxval {}",
            value, maxval
        )));
    }
    Ok(((value * 255 + maxval / 2) / maxval) as u8)
}

/// Read a PNM image (P1 through P6).
///
/// PBM loads as [`PixelFormat::Binary`], PGM as [`PixelFormat::Gray`]
/// and PPM as [`PixelFormat::Rgb`]. Samples are rescaled to 0..=255.
pub fn read_pnm<R: Read>(mut reader: R) -> IoResult<Pix> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let mut p = PnmParser::new(&bytes);

    let magic = p.take(2)?;
    if magic[0] != b'P' || !(b'1'..=b'6').contains(&magic[1]) {
        return Err(IoError::InvalidData("not a PNM file".to_string()));
    }
    let kind = magic[1] - b'0';

    let width = p.next_uint()?;
    let height = p.next_uint()?;
    let maxval = if kind == 1 || kind == 4 {
        1
    } else {
        let m = p.next_uint()?;
        if m == 0 || m > 65535 {
            return Err(IoError::InvalidData(format!("invalid maxval {}", m)));
        }
        m
    };

    let format = match kind {
        1 | 4 => PixelFormat::Binary,
        2 | 5 => PixelFormat::Gray,
        _ => PixelFormat::Rgb,
    };
    let npix = Pix::check_dimensions(width, height)?;
    // Every sample takes at least one bit of input
    let mut pixels = Vec::with_capacity(npix.min(bytes.len() * 8));

    match kind {
        1 => {
            for _ in 0..npix {
                let bit = p.next_bit()?;
                pixels.push(if bit == 1 { color::BLACK } else { color::WHITE });
            }
        }
        2 | 3 => {
            let channels = if kind == 2 { 1 } else { 3 };
            for _ in 0..npix {
                let mut c = [0u8; 3];
                for slot in c.iter_mut().take(channels) {
                    *slot = scale_sample(p.next_uint()?, maxval)?;
                }
                pixels.push(if channels == 1 {
                    color::compose_rgb(c[0], c[0], c[0])
                } else {
                    color::compose_rgb(c[0], c[1], c[2])
                });
            }
        }
        4 => {
            p.end_header()?;
            let row_bytes = (width as usize).div_ceil(8);
            for _ in 0..height {
                let row = p.take(row_bytes)?;
                for x in 0..width as usize {
                    let bit = (row[x / 8] >> (7 - (x % 8))) & 1;
                    pixels.push(if bit == 1 { color::BLACK } else { color::WHITE });
                }
            }
        }
        _ => {
            p.end_header()?;
            let channels = if kind == 5 { 1 } else { 3 };
            let sample_bytes = if maxval > 255 { 2 } else { 1 };
            let raw = p.take(npix * channels * sample_bytes)?;
            let mut samples = raw.chunks_exact(sample_bytes).map(|s| {
                let v = if sample_bytes == 2 {
                    ((s[0] as u32) << 8) | s[1] as u32
                } else {
                    s[0] as u32
                };
                scale_sample(v, maxval)
            });
            for _ in 0..npix {
                let mut c = [0u8; 3];
                for slot in c.iter_mut().take(channels) {
                    *slot = samples
                        .next()
                        .ok_or_else(|| IoError::InvalidData("truncated PNM data".to_string()))??;
                }
                pixels.push(if channels == 1 {
                    color::compose_rgb(c[0], c[0], c[0])
                } else {
                    color::compose_rgb(c[0], c[1], c[2])
                });
            }
        }
    }

    Ok(Pix::from_data(width, height, format, pixels)?)
}

/// Write a `Pix` as binary PNM.
///
/// Chooses P4 (binary), P5 (gray) or P6 (color, alpha dropped) based on
/// the pixel format.
pub fn write_pnm<W: Write>(pix: &Pix, mut writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();

    match pix.format() {
        PixelFormat::Binary => {
            write!(writer, "P4\n{} {}\n", width, height)?;
            let row_bytes = (width as usize).div_ceil(8);
            let mut row = vec![0u8; row_bytes];
            for y in 0..height {
                row.iter_mut().for_each(|b| *b = 0);
                for (x, &pixel) in pix.row_data(y).iter().enumerate() {
                    if color::is_color_black(pixel) {
                        row[x / 8] |= 1 << (7 - (x % 8));
                    }
                }
                writer.write_all(&row)?;
            }
        }
        PixelFormat::Gray => {
            write!(writer, "P5\n{} {}\n255\n", width, height)?;
            for y in 0..height {
                let row: Vec<u8> = pix.row_data(y).iter().map(|&p| color::red(p)).collect();
                writer.write_all(&row)?;
            }
        }
        PixelFormat::Rgb | PixelFormat::Rgba => {
            write!(writer, "P6\n{} {}\n255\n", width, height)?;
            for y in 0..height {
                let mut row = Vec::with_capacity(width as usize * 3);
                for &pixel in pix.row_data(y) {
                    let (r, g, b) = color::extract_rgb(pixel);
                    row.extend_from_slice(&[r, g, b]);
                }
                writer.write_all(&row)?;
            }
        }
    }

    Ok(())
}
