//! JPEG image format support
//!
//! Reads JPEG images using the `jpeg-decoder` crate. Writing is not
//! supported: the crate is decode-only.

use crate::{IoError, IoResult};
use jpeg_decoder::{Decoder, PixelFormat};
use pixstat_core::{ImageFormat, Pix, PixelDepth, color};
use std::io::Read;

/// Read a JPEG image from a reader.
///
/// Returns 8 bpp for grayscale input and 32 bpp for RGB or CMYK input.
pub fn read_jpeg<R: Read>(reader: R) -> IoResult<Pix> {
    let mut decoder = Decoder::new(reader);
    let data = decoder
        .decode()
        .map_err(|e| IoError::DecodeError(format!("JPEG decode error: {}", e)))?;
    let info = decoder
        .info()
        .ok_or_else(|| IoError::DecodeError("JPEG header missing".to_string()))?;

    let width = u32::from(info.width);
    let height = u32::from(info.height);
    let (depth, bytes_per_pixel) = match info.pixel_format {
        PixelFormat::L8 => (PixelDepth::Bit8, 1),
        PixelFormat::L16 => (PixelDepth::Bit8, 2),
        PixelFormat::RGB24 => (PixelDepth::Bit32, 3),
        PixelFormat::CMYK32 => (PixelDepth::Bit32, 4),
    };
    log::debug!(
        "jpeg: {width}x{height} {:?} -> {} bpp",
        info.pixel_format,
        depth.bits()
    );

    let expected = width as usize * height as usize * bytes_per_pixel;
    if data.len() < expected {
        return Err(IoError::InvalidData(format!(
            "JPEG data too short: {} < {}",
            data.len(),
            expected
        )));
    }

    let mut pix_mut = Pix::new(width, height, depth)?.to_mut();
    pix_mut.set_informat(ImageFormat::Jpeg);

    for (i, px) in data[..expected].chunks_exact(bytes_per_pixel).enumerate() {
        let x = (i % width as usize) as u32;
        let y = (i / width as usize) as u32;
        let pixel = match info.pixel_format {
            // 16-bit samples are big-endian; keep the high byte
            PixelFormat::L8 | PixelFormat::L16 => u32::from(px[0]),
            PixelFormat::RGB24 => color::compose_rgb(px[0], px[1], px[2]),
            PixelFormat::CMYK32 => {
                // Adobe CMYK is stored inverted
                let k = u32::from(px[3]);
                let ch = |c: u8| ((u32::from(c) * k) / 255) as u8;
                color::compose_rgb(ch(px[0]), ch(px[1]), ch(px[2]))
            }
        };
        pix_mut.set_pixel_unchecked(x, y, pixel);
    }

    Ok(pix_mut.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_garbage_is_decode_error() {
        let data = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x02, 0x00];
        assert!(matches!(
            read_jpeg(&data[..]),
            Err(IoError::DecodeError(_))
        ));
    }

    #[test]
    fn test_empty_input() {
        assert!(read_jpeg(&[][..]).is_err());
    }
}
