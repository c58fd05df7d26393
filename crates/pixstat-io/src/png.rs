//! PNG image format support
//!
//! Decoding asks the `png` crate to expand palettes and sub-byte depths
//! and to strip 16-bit samples, so every frame arrives as 8-bit
//! Grayscale, GrayscaleAlpha, Rgb or Rgba.

use crate::{IoError, IoResult};
use pixstat_core::{ImageFormat, Pix, PixelDepth, color};
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image.
///
/// Returns 8 bpp for grayscale input and 32 bpp for color input.
/// Alpha is discarded.
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let width = output_info.width;
    let height = output_info.height;
    let color_type = output_info.color_type;
    if output_info.bit_depth != BitDepth::Eight {
        return Err(IoError::UnsupportedFormat(format!(
            "unexpected PNG output depth: {:?}",
            output_info.bit_depth
        )));
    }

    let (depth, samples) = match color_type {
        ColorType::Grayscale => (PixelDepth::Bit8, 1),
        ColorType::GrayscaleAlpha => (PixelDepth::Bit8, 2),
        ColorType::Rgb => (PixelDepth::Bit32, 3),
        ColorType::Rgba => (PixelDepth::Bit32, 4),
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "PNG palette was not expanded".to_string(),
            ));
        }
    };
    log::debug!("png: {width}x{height} {color_type:?} -> {} bpp", depth.bits());

    let mut pix_mut = Pix::new(width, height, depth)?.to_mut();
    pix_mut.set_informat(ImageFormat::Png);

    let bytes_per_row = output_info.line_size;
    let data = &buf[..output_info.buffer_size()];

    for y in 0..height {
        let row = &data[y as usize * bytes_per_row..];
        for x in 0..width {
            let idx = x as usize * samples;
            let pixel = match depth {
                PixelDepth::Bit8 => u32::from(row[idx]),
                PixelDepth::Bit32 => color::compose_rgb(row[idx], row[idx + 1], row[idx + 2]),
            };
            pix_mut.set_pixel_unchecked(x, y, pixel);
        }
    }

    Ok(pix_mut.into())
}

/// Write a PNG image.
///
/// 8 bpp images are written as 8-bit grayscale, 32 bpp as 8-bit RGB.
pub fn write_png<W: Write>(pix: &Pix, writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();

    let (color_type, bytes_per_pixel) = match pix.depth() {
        PixelDepth::Bit8 => (ColorType::Grayscale, 1usize),
        PixelDepth::Bit32 => (ColorType::Rgb, 3usize),
    };

    let mut encoder = Encoder::new(writer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    let bytes_per_row = width as usize * bytes_per_pixel;
    let mut data = vec![0u8; bytes_per_row * height as usize];

    for y in 0..height {
        let row = &mut data[y as usize * bytes_per_row..(y as usize + 1) * bytes_per_row];
        for x in 0..width {
            let pixel = pix.get_pixel_unchecked(x, y);
            match pix.depth() {
                PixelDepth::Bit8 => row[x as usize] = pixel as u8,
                PixelDepth::Bit32 => {
                    let (r, g, b) = color::extract_rgb(pixel);
                    let idx = x as usize * 3;
                    row[idx..idx + 3].copy_from_slice(&[r, g, b]);
                }
            }
        }
    }

    writer
        .write_image_data(&data)
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;
    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn encode_raw(width: u32, height: u32, ct: ColorType, bd: BitDepth, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut enc = Encoder::new(&mut out, width, height);
            enc.set_color(ct);
            enc.set_depth(bd);
            let mut w = enc.write_header().unwrap();
            w.write_image_data(data).unwrap();
        }
        out
    }

    #[test]
    fn test_gray8_roundtrip() {
        let pix = Pix::from_samples(3, 2, &[0, 50, 100, 150, 200, 255]).unwrap();
        let mut buf = Vec::new();
        write_png(&pix, &mut buf).unwrap();
        let back = read_png(Cursor::new(buf)).unwrap();
        assert_eq!(back.depth(), PixelDepth::Bit8);
        assert_eq!(back.informat(), ImageFormat::Png);
        assert_eq!(back.samples().unwrap(), pix.samples().unwrap());
    }

    #[test]
    fn test_rgb_roundtrip() {
        let mut pm = Pix::new(2, 1, PixelDepth::Bit32).unwrap().to_mut();
        pm.set_rgb(0, 0, 10, 20, 30).unwrap();
        pm.set_rgb(1, 0, 200, 100, 0).unwrap();
        let pix: Pix = pm.into();
        let mut buf = Vec::new();
        write_png(&pix, &mut buf).unwrap();
        let back = read_png(Cursor::new(buf)).unwrap();
        assert_eq!(back.get_rgb(0, 0), Some((10, 20, 30)));
        assert_eq!(back.get_rgb(1, 0), Some((200, 100, 0)));
    }

    #[test]
    fn test_gray16_is_stripped() {
        let data = [0x12, 0x34, 0xAB, 0xCD];
        let png = encode_raw(2, 1, ColorType::Grayscale, BitDepth::Sixteen, &data);
        let pix = read_png(Cursor::new(png)).unwrap();
        assert_eq!(pix.depth(), PixelDepth::Bit8);
        assert_eq!(pix.samples().unwrap(), vec![0x12, 0xAB]);
    }

    #[test]
    fn test_gray1_is_expanded() {
        // 0b1010_0000: pixels 1, 0, 1, 0
        let png = encode_raw(4, 1, ColorType::Grayscale, BitDepth::One, &[0b1010_0000]);
        let pix = read_png(Cursor::new(png)).unwrap();
        assert_eq!(pix.samples().unwrap(), vec![255, 0, 255, 0]);
    }

    #[test]
    fn test_gray_alpha_drops_alpha() {
        let png = encode_raw(
            2,
            1,
            ColorType::GrayscaleAlpha,
            BitDepth::Eight,
            &[7, 0, 9, 255],
        );
        let pix = read_png(Cursor::new(png)).unwrap();
        assert_eq!(pix.samples().unwrap(), vec![7, 9]);
    }

    #[test]
    fn test_truncated() {
        let pix = Pix::from_samples(2, 2, &[1, 2, 3, 4]).unwrap();
        let mut buf = Vec::new();
        write_png(&pix, &mut buf).unwrap();
        buf.truncate(buf.len() / 2);
        assert!(read_png(Cursor::new(buf)).is_err());
    }
}
