//! BMP image format support
//!
//! Reads uncompressed Windows Bitmap files at 1, 4, 8, 24 and 32 bpp.
//! Palette images come back as 8 bpp when every palette entry is gray
//! and as 32 bpp RGB otherwise. Writes 8 bpp (gray palette) and 24 bpp.

use crate::{IoError, IoResult};
use pixstat_core::{ImageFormat, Pix, PixelDepth, color};
use std::io::{Read, Write};

/// BMP file header size
const BMP_FILE_HEADER_SIZE: usize = 14;

/// BMP info header size (BITMAPINFOHEADER)
const BMP_INFO_HEADER_SIZE: u32 = 40;

fn le_u16(b: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([b[at], b[at + 1]])
}

fn le_u32(b: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]])
}

fn skip<R: Read>(reader: &mut R, n: usize) -> IoResult<()> {
    let copied = std::io::copy(&mut reader.take(n as u64), &mut std::io::sink())?;
    if copied as usize != n {
        return Err(IoError::InvalidData("BMP file truncated".to_string()));
    }
    Ok(())
}

/// Read a BMP image from memory
pub fn read_bmp(data: &[u8]) -> IoResult<Pix> {
    let mut reader = data;
    let mut file_header = [0u8; BMP_FILE_HEADER_SIZE];
    reader.read_exact(&mut file_header)?;

    if &file_header[0..2] != b"BM" {
        return Err(IoError::InvalidData("not a BMP file".to_string()));
    }
    let pixel_offset = le_u32(&file_header, 10) as usize;

    let mut info_header = [0u8; BMP_INFO_HEADER_SIZE as usize];
    reader.read_exact(&mut info_header)?;

    let header_size = le_u32(&info_header, 0);
    if header_size < BMP_INFO_HEADER_SIZE {
        return Err(IoError::InvalidData(format!(
            "unsupported BMP header size: {}",
            header_size
        )));
    }

    let width = le_u32(&info_header, 4) as i32;
    let height = le_u32(&info_header, 8) as i32;
    let planes = le_u16(&info_header, 12);
    if planes != 1 {
        return Err(IoError::InvalidData(format!(
            "unsupported number of planes: {}",
            planes
        )));
    }
    let bits_per_pixel = le_u16(&info_header, 14);
    let compression = le_u32(&info_header, 16);
    let colors_used = le_u32(&info_header, 32) as usize;

    // BI_RGB, or BI_BITFIELDS with the standard masks
    if compression != 0 && compression != 3 {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported BMP compression: {}",
            compression
        )));
    }

    // Only the height carries the row order sign
    if width <= 0 {
        return Err(IoError::InvalidData(format!("bad BMP width: {width}")));
    }
    let top_down = height < 0;
    let width = width.unsigned_abs();
    let height = height.unsigned_abs();

    if !matches!(bits_per_pixel, 1 | 4 | 8 | 24 | 32) {
        return Err(IoError::UnsupportedFormat(format!(
            "unsupported BMP bit depth: {}",
            bits_per_pixel
        )));
    }

    skip(&mut reader, header_size as usize - BMP_INFO_HEADER_SIZE as usize)?;

    let mut palette: Vec<(u8, u8, u8)> = Vec::new();
    if bits_per_pixel <= 8 {
        let max_colors = 1usize << bits_per_pixel;
        let num_colors = if colors_used == 0 {
            max_colors
        } else {
            colors_used.min(max_colors)
        };
        let mut raw = vec![0u8; num_colors * 4];
        reader.read_exact(&mut raw)?;
        palette = raw.chunks_exact(4).map(|q| (q[2], q[1], q[0])).collect();
    }

    let consumed = BMP_FILE_HEADER_SIZE + header_size as usize + palette.len() * 4;
    if pixel_offset > consumed {
        skip(&mut reader, pixel_offset - consumed)?;
    }

    let gray_palette = palette.iter().all(|&(r, g, b)| r == g && g == b);
    let depth = if bits_per_pixel <= 8 && gray_palette {
        PixelDepth::Bit8
    } else {
        PixelDepth::Bit32
    };
    log::debug!(
        "bmp: {width}x{height} {bits_per_pixel} bpp, {} palette entries -> {} bpp",
        palette.len(),
        depth.bits()
    );

    // BMP rows are 4-byte aligned
    let row_stride = (u64::from(width) * u64::from(bits_per_pixel)).div_ceil(32) * 4;
    let raster_bytes = row_stride * u64::from(height);
    if raster_bytes > reader.len() as u64 {
        return Err(IoError::InvalidData(format!(
            "BMP raster needs {raster_bytes} bytes, {} left",
            reader.len()
        )));
    }

    let mut pix_mut = Pix::new(width, height, depth)?.to_mut();
    pix_mut.set_informat(ImageFormat::Bmp);

    let mut row_buffer = vec![0u8; row_stride as usize];

    let lookup = |index: u8| -> IoResult<(u8, u8, u8)> {
        palette.get(index as usize).copied().ok_or_else(|| {
            IoError::InvalidData(format!("BMP palette index {} out of range", index))
        })
    };

    for row in 0..height {
        reader.read_exact(&mut row_buffer)?;
        let y = if top_down { row } else { height - 1 - row };

        for x in 0..width {
            let xi = x as usize;
            let (r, g, b) = match bits_per_pixel {
                1 => lookup((row_buffer[xi / 8] >> (7 - (xi % 8))) & 1)?,
                4 => lookup((row_buffer[xi / 2] >> (4 * (1 - xi % 2))) & 0xF)?,
                8 => lookup(row_buffer[xi])?,
                24 => (row_buffer[xi * 3 + 2], row_buffer[xi * 3 + 1], row_buffer[xi * 3]),
                _ => (row_buffer[xi * 4 + 2], row_buffer[xi * 4 + 1], row_buffer[xi * 4]),
            };
            let pixel = match depth {
                PixelDepth::Bit8 => u32::from(r),
                PixelDepth::Bit32 => color::compose_rgb(r, g, b),
            };
            pix_mut.set_pixel_unchecked(x, y, pixel);
        }
    }

    Ok(pix_mut.into())
}

/// Write a BMP image
///
/// 8 bpp images get a 256-entry gray palette; 32 bpp images are written
/// as 24-bit BGR.
pub fn write_bmp<W: Write>(pix: &Pix, mut writer: W) -> IoResult<()> {
    let width = pix.width();
    let height = pix.height();
    let bits_per_pixel: u16 = match pix.depth() {
        PixelDepth::Bit8 => 8,
        PixelDepth::Bit32 => 24,
    };
    let palette_size = if bits_per_pixel == 8 { 256 * 4 } else { 0 };
    let row_stride = (width as usize * bits_per_pixel as usize).div_ceil(32) * 4;
    let image_size = row_stride * height as usize;
    let pixel_offset = BMP_FILE_HEADER_SIZE + BMP_INFO_HEADER_SIZE as usize + palette_size;
    let file_size = u32::try_from(pixel_offset + image_size)
        .map_err(|_| IoError::EncodeError("image too large for BMP".to_string()))?;

    let mut header = Vec::with_capacity(pixel_offset);
    header.extend_from_slice(b"BM");
    header.extend_from_slice(&file_size.to_le_bytes());
    header.extend_from_slice(&[0u8; 4]);
    header.extend_from_slice(&(pixel_offset as u32).to_le_bytes());

    header.extend_from_slice(&BMP_INFO_HEADER_SIZE.to_le_bytes());
    header.extend_from_slice(&(width as i32).to_le_bytes());
    header.extend_from_slice(&(height as i32).to_le_bytes());
    header.extend_from_slice(&1u16.to_le_bytes());
    header.extend_from_slice(&bits_per_pixel.to_le_bytes());
    header.extend_from_slice(&0u32.to_le_bytes());
    header.extend_from_slice(&(image_size as u32).to_le_bytes());
    // 72 dpi in pixels per meter
    header.extend_from_slice(&2835u32.to_le_bytes());
    header.extend_from_slice(&2835u32.to_le_bytes());
    header.extend_from_slice(&0u32.to_le_bytes());
    header.extend_from_slice(&0u32.to_le_bytes());

    if bits_per_pixel == 8 {
        for v in 0..=255u8 {
            header.extend_from_slice(&[v, v, v, 0]);
        }
    }
    writer.write_all(&header)?;

    let mut row = vec![0u8; row_stride];
    for y in (0..height).rev() {
        for x in 0..width {
            let pixel = pix.get_pixel_unchecked(x, y);
            let xi = x as usize;
            match pix.depth() {
                PixelDepth::Bit8 => row[xi] = pixel as u8,
                PixelDepth::Bit32 => {
                    let (r, g, b) = color::extract_rgb(pixel);
                    row[xi * 3..xi * 3 + 3].copy_from_slice(&[b, g, r]);
                }
            }
        }
        writer.write_all(&row)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Hand-built 4x2 bottom-up 4 bpp BMP with a two-color palette.
    fn four_bit_bmp(palette: [[u8; 4]; 2]) -> Vec<u8> {
        let mut v = Vec::new();
        let offset = 14 + 40 + 8;
        let stride = 4;
        v.extend_from_slice(b"BM");
        v.extend_from_slice(&((offset + stride * 2) as u32).to_le_bytes());
        v.extend_from_slice(&[0; 4]);
        v.extend_from_slice(&(offset as u32).to_le_bytes());
        v.extend_from_slice(&40u32.to_le_bytes());
        v.extend_from_slice(&4i32.to_le_bytes());
        v.extend_from_slice(&2i32.to_le_bytes());
        v.extend_from_slice(&1u16.to_le_bytes());
        v.extend_from_slice(&4u16.to_le_bytes());
        v.extend_from_slice(&[0; 16]);
        v.extend_from_slice(&2u32.to_le_bytes());
        v.extend_from_slice(&[0; 4]);
        v.extend_from_slice(&palette[0]);
        v.extend_from_slice(&palette[1]);
        // bottom row: 1 0 1 0 ; top row: 0 0 1 1
        v.extend_from_slice(&[0x10, 0x10, 0, 0]);
        v.extend_from_slice(&[0x00, 0x11, 0, 0]);
        v
    }

    #[test]
    fn test_gray_palette_gives_8bpp() {
        let data = four_bit_bmp([[0, 0, 0, 0], [200, 200, 200, 0]]);
        let pix = read_bmp(&data[..]).unwrap();
        assert_eq!(pix.depth(), PixelDepth::Bit8);
        assert_eq!(pix.informat(), ImageFormat::Bmp);
        assert_eq!(pix.samples().unwrap(), vec![0, 0, 200, 200, 200, 0, 200, 0]);
    }

    #[test]
    fn test_color_palette_gives_rgb() {
        // BGRA: entry 1 is pure red
        let data = four_bit_bmp([[0, 0, 0, 0], [0, 0, 255, 0]]);
        let pix = read_bmp(&data[..]).unwrap();
        assert_eq!(pix.depth(), PixelDepth::Bit32);
        assert_eq!(pix.get_rgb(2, 0), Some((255, 0, 0)));
        assert_eq!(pix.get_rgb(0, 0), Some((0, 0, 0)));
    }

    #[test]
    fn test_gray_roundtrip_with_padding() {
        let samples: Vec<u8> = (0..15).map(|v| v * 10).collect();
        let pix = Pix::from_samples(5, 3, &samples).unwrap();
        let mut buf = Vec::new();
        write_bmp(&pix, &mut buf).unwrap();
        let back = read_bmp(&buf[..]).unwrap();
        assert_eq!(back.samples().unwrap(), samples);
    }

    #[test]
    fn test_rgb_roundtrip() {
        let mut pm = Pix::new(3, 2, PixelDepth::Bit32).unwrap().to_mut();
        pm.set_rgb(2, 1, 1, 2, 3).unwrap();
        pm.set_rgb(0, 0, 250, 128, 7).unwrap();
        let pix: Pix = pm.into();
        let mut buf = Vec::new();
        write_bmp(&pix, &mut buf).unwrap();
        let back = read_bmp(&buf[..]).unwrap();
        assert_eq!(back.get_rgb(2, 1), Some((1, 2, 3)));
        assert_eq!(back.get_rgb(0, 0), Some((250, 128, 7)));
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(read_bmp(&b"XX"[..]).is_err());
        let data = four_bit_bmp([[0, 0, 0, 0], [1, 1, 1, 0]]);
        assert!(read_bmp(&data[..data.len() - 3]).is_err());
    }

    #[test]
    fn test_rejects_negative_width() {
        let mut data = four_bit_bmp([[0, 0, 0, 0], [1, 1, 1, 0]]);
        data[18..22].copy_from_slice(&(-4i32).to_le_bytes());
        assert!(matches!(read_bmp(&data), Err(IoError::InvalidData(_))));
    }

    #[test]
    fn test_rejects_raster_larger_than_file() {
        let mut data = four_bit_bmp([[0, 0, 0, 0], [1, 1, 1, 0]]);
        data[18..22].copy_from_slice(&i32::MAX.to_le_bytes());
        data[22..26].copy_from_slice(&(-i32::MAX).to_le_bytes());
        assert!(matches!(read_bmp(&data), Err(IoError::InvalidData(_))));
    }
}
