//! pixstat-core - Image container and pixel statistics
//!
//! This crate provides the data structures and the numeric routines used
//! by the rest of the workspace:
//!
//! - [`Pix`] / [`PixMut`] - The image container (immutable / mutable)
//! - [`GrayHistogram`] - 256-bin intensity histogram of an 8 bpp image
//! - [`PixelStats`] - Mean, median, mode, variance and standard deviation
//! - [`BoxplotSummary`] - Quartiles, whiskers and outliers for a boxplot
//! - [`Box`] / [`Pta`] - Rectangles and point arrays used by the renderer

pub mod box_;
pub mod error;
pub mod pix;
pub mod pta;
pub mod stats;

pub use box_::Box;
pub use error::{Error, Result};
pub use pix::histogram;
pub use pix::{Color, GrayHistogram, ImageFormat, MAX_PIX_WORDS, Pix, PixMut, PixelDepth};
pub use pta::Pta;
pub use stats::boxplot;
pub use stats::{BoxplotSummary, PixelStats};

/// Color channel helpers for 32-bit RGB pixels.
///
/// # Pixel format
///
/// 32-bit pixels are stored as `0xRRGGBBAA` (red in MSB, alpha in LSB).
pub mod color {
    /// Shift amounts for extracting color channels
    pub const RED_SHIFT: u32 = 24;
    pub const GREEN_SHIFT: u32 = 16;
    pub const BLUE_SHIFT: u32 = 8;
    pub const ALPHA_SHIFT: u32 = 0;

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

    /// Compose a 32-bit RGB pixel (alpha = 255).
    #[inline]
    pub fn compose_rgb(r: u8, g: u8, b: u8) -> u32 {
        ((r as u32) << RED_SHIFT)
            | ((g as u32) << GREEN_SHIFT)
            | ((b as u32) << BLUE_SHIFT)
            | (255 << ALPHA_SHIFT)
    }

    /// Extract RGB values from a 32-bit pixel.
    #[inline]
    pub fn extract_rgb(pixel: u32) -> (u8, u8, u8) {
        (red(pixel), green(pixel), blue(pixel))
    }

}
