//! pixstat-io - Image decoding for pixstat
//!
//! Reads PNG, JPEG, BMP and PNM images into a [`Pix`]. The format is
//! detected from the file's magic bytes, not its extension.
//!
//! [`read_image_gray`] is the entry point the application uses: it
//! decodes whatever is on disk and flattens color to 8 bpp luminance.
//!
//! # Features
//!
//! - `png-format` (default), `jpeg` (default), `bmp` (default), `pnm` (default)

mod error;
pub mod format;

#[cfg(feature = "bmp")]
pub mod bmp;
#[cfg(feature = "jpeg")]
pub mod jpeg;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{detect_format, detect_format_from_bytes, format_from_extension};
pub use pixstat_core::ImageFormat;

use pixstat_core::{Pix, PixelDepth};
use std::fs::File;
use std::io::{BufWriter, Cursor, Write};
use std::path::Path;

/// Read an image from a file path.
///
/// Returns 8 bpp for grayscale sources and 32 bpp for color sources.
///
/// # Errors
///
/// [`IoError::Io`] if the file cannot be read, [`IoError::UnsupportedFormat`]
/// if the magic bytes match no enabled decoder, and a decode error if the
/// data is corrupt.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    let path = path.as_ref();
    let data = std::fs::read(path)?;
    log::debug!("read {} bytes from {}", data.len(), path.display());
    read_image_mem(&data)
}

/// Read an image from memory.
pub fn read_image_mem(data: &[u8]) -> IoResult<Pix> {
    let format = detect_format_from_bytes(data)?;
    read_image_format(data, format)
}

/// Read an image from a file path and convert it to 8 bpp grayscale.
pub fn read_image_gray<P: AsRef<Path>>(path: P) -> IoResult<Pix> {
    to_gray(read_image(path)?)
}

/// Read an image from memory and convert it to 8 bpp grayscale.
pub fn read_image_gray_mem(data: &[u8]) -> IoResult<Pix> {
    to_gray(read_image_mem(data)?)
}

fn to_gray(pix: Pix) -> IoResult<Pix> {
    if pix.depth() == PixelDepth::Bit8 {
        return Ok(pix);
    }
    log::debug!(
        "converting {}x{} {} bpp image to gray",
        pix.width(),
        pix.height(),
        pix.depth().bits()
    );
    Ok(pix.convert_to_8()?)
}

#[allow(unused_variables)]
fn read_image_format(data: &[u8], format: ImageFormat) -> IoResult<Pix> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(Cursor::new(data)),
        #[cfg(feature = "jpeg")]
        ImageFormat::Jpeg => jpeg::read_jpeg(data),
        #[cfg(feature = "bmp")]
        ImageFormat::Bmp => bmp::read_bmp(data),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(data),
        other => Err(IoError::UnsupportedFormat(format!(
            "no decoder enabled for {:?}",
            other
        ))),
    }
}

/// Write an image to a file.
///
/// Supports PNG, BMP and PNM output.
pub fn write_image<P: AsRef<Path>>(pix: &Pix, path: P, format: ImageFormat) -> IoResult<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);
    write_image_to(pix, &mut writer, format)?;
    writer.flush()?;
    log::debug!("wrote {:?} image to {}", format, path.display());
    Ok(())
}

/// Encode an image into memory.
pub fn write_image_mem(pix: &Pix, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buf = Vec::new();
    write_image_to(pix, &mut buf, format)?;
    Ok(buf)
}

#[allow(unused_variables)]
fn write_image_to<W: Write>(pix: &Pix, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(pix, writer),
        #[cfg(feature = "bmp")]
        ImageFormat::Bmp => bmp::write_bmp(pix, writer),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(pix, writer),
        other => Err(IoError::UnsupportedFormat(format!(
            "no encoder for {:?}",
            other
        ))),
    }
}
