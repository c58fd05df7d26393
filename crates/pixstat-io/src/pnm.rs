//! PNM (Portable Any Map) format support
//!
//! Reads PBM, PGM and PPM in both ASCII (P1/P2/P3) and binary (P4/P5/P6)
//! form. Samples with a maxval other than 255 are rescaled to 8 bits;
//! bitmaps map 1 (black) to 0 and 0 (white) to 255. Writes P5 and P6.

use crate::{IoError, IoResult};
use pixstat_core::{ImageFormat, Pix, PixelDepth, color};
use std::io::Write;

/// Byte cursor over a PNM stream.
struct PnmParser<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> PnmParser<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Skip whitespace and `#` comments.
    fn skip_separators(&mut self) {
        while let Some(&c) = self.data.get(self.pos) {
            if c == b'#' {
                while let Some(&c) = self.data.get(self.pos) {
                    self.pos += 1;
                    if c == b'\n' || c == b'\r' {
                        break;
                    }
                }
            } else if c.is_ascii_whitespace() {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn read_uint(&mut self, what: &str) -> IoResult<u32> {
        self.skip_separators();
        let start = self.pos;
        while self.data.get(self.pos).is_some_and(u8::is_ascii_digit) {
            self.pos += 1;
        }
        std::str::from_utf8(&self.data[start..self.pos])
            .ok()
            .and_then(|s| s.parse().ok())
            .ok_or_else(|| IoError::InvalidData(format!("PNM: expected {what}")))
    }

    /// A single `0`/`1` digit of an ASCII bitmap, separators optional.
    fn read_bit(&mut self) -> IoResult<u32> {
        self.skip_separators();
        match self.data.get(self.pos) {
            Some(b'0') => {
                self.pos += 1;
                Ok(0)
            }
            Some(b'1') => {
                self.pos += 1;
                Ok(1)
            }
            _ => Err(IoError::InvalidData("PNM: expected bit".to_string())),
        }
    }

    fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    fn take_bytes(&mut self, n: usize) -> IoResult<&'a [u8]> {
        let end = self.pos + n;
        let bytes = self
            .data
            .get(self.pos..end)
            .ok_or_else(|| IoError::InvalidData("PNM data truncated".to_string()))?;
        self.pos = end;
        Ok(bytes)
    }
}

fn scale(val: u32, maxval: u32) -> u8 {
    if maxval == 255 {
        val.min(255) as u8
    } else {
        ((val.min(maxval) * 255 + maxval / 2) / maxval) as u8
    }
}

/// Read a PNM image from memory.
///
/// Returns 8 bpp for PBM and PGM, 32 bpp for PPM.
pub fn read_pnm(data: &[u8]) -> IoResult<Pix> {
    if data.len() < 2 || data[0] != b'P' {
        return Err(IoError::InvalidData("not a PNM file".to_string()));
    }
    let kind = data[1];
    if !(b'1'..=b'6').contains(&kind) {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported PNM type: P{}",
            kind as char
        )));
    }

    let mut p = PnmParser::new(&data[2..]);
    let width = p.read_uint("width")?;
    let height = p.read_uint("height")?;
    let bitmap = kind == b'1' || kind == b'4';
    let maxval = if bitmap { 1 } else { p.read_uint("maxval")? };
    if maxval == 0 || maxval > 65535 {
        return Err(IoError::InvalidData(format!("PNM: bad maxval {maxval}")));
    }
    let binary = kind >= b'4';
    if binary {
        // Exactly one whitespace byte separates the header from raster data
        p.take_bytes(1)?;
    }

    let rgb = kind == b'3' || kind == b'6';
    let depth = if rgb {
        PixelDepth::Bit32
    } else {
        PixelDepth::Bit8
    };
    // Lower bound on the raster bytes; ASCII samples take at least one digit
    let (w, h) = (u64::from(width), u64::from(height));
    let channels = if rgb { 3 } else { 1 };
    let needed = match kind {
        b'4' => w.div_ceil(8) * h,
        b'5' | b'6' if maxval > 255 => w * h * channels * 2,
        _ => w * h * channels,
    };
    if needed > p.remaining() as u64 {
        return Err(IoError::InvalidData(format!(
            "PNM raster needs {needed} bytes, {} left",
            p.remaining()
        )));
    }

    log::debug!(
        "pnm: P{} {width}x{height} maxval {maxval} -> {} bpp",
        kind as char,
        depth.bits()
    );

    let mut pix_mut = Pix::new(width, height, depth)?.to_mut();
    pix_mut.set_informat(ImageFormat::Pnm);

    let wide = maxval > 255;
    let next_sample = |p: &mut PnmParser<'_>| -> IoResult<u8> {
        let raw = if binary && wide {
            let b = p.take_bytes(2)?;
            u32::from(u16::from_be_bytes([b[0], b[1]]))
        } else if binary {
            u32::from(p.take_bytes(1)?[0])
        } else {
            p.read_uint("sample")?
        };
        Ok(scale(raw, maxval))
    };

    match kind {
        b'1' => {
            for y in 0..height {
                for x in 0..width {
                    let bit = p.read_bit()?;
                    pix_mut.set_pixel_unchecked(x, y, if bit == 1 { 0 } else { 255 });
                }
            }
        }
        b'4' => {
            let stride = width.div_ceil(8) as usize;
            for y in 0..height {
                let row = p.take_bytes(stride)?;
                for x in 0..width {
                    let bit = (row[x as usize / 8] >> (7 - x % 8)) & 1;
                    pix_mut.set_pixel_unchecked(x, y, if bit == 1 { 0 } else { 255 });
                }
            }
        }
        b'2' | b'5' => {
            for y in 0..height {
                for x in 0..width {
                    let v = next_sample(&mut p)?;
                    pix_mut.set_pixel_unchecked(x, y, u32::from(v));
                }
            }
        }
        _ => {
            for y in 0..height {
                for x in 0..width {
                    let r = next_sample(&mut p)?;
                    let g = next_sample(&mut p)?;
                    let b = next_sample(&mut p)?;
                    pix_mut.set_pixel_unchecked(x, y, color::compose_rgb(r, g, b));
                }
            }
        }
    }

    Ok(pix_mut.into())
}

/// Write a `Pix` as binary PNM: P5 for 8 bpp, P6 for 32 bpp.
pub fn write_pnm<W: Write>(pix: &Pix, mut writer: W) -> IoResult<()> {
    let (w, h) = (pix.width(), pix.height());
    match pix.depth() {
        PixelDepth::Bit8 => {
            write!(writer, "P5\n{w} {h}\n255\n")?;
            writer.write_all(&pix.samples()?)?;
        }
        PixelDepth::Bit32 => {
            write!(writer, "P6\n{w} {h}\n255\n")?;
            let mut buf = Vec::with_capacity(w as usize * h as usize * 3);
            for y in 0..h {
                for x in 0..w {
                    let (r, g, b) = color::extract_rgb(pix.get_pixel_unchecked(x, y));
                    buf.extend_from_slice(&[r, g, b]);
                }
            }
            writer.write_all(&buf)?;
        }
    }
    Ok(())
}
