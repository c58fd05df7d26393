//! Synthetic test images
//!
//! Small grayscale images with known statistics, built in memory and
//! optionally written to the regression output directory as PNG.

use crate::error::{TestError, TestResult};
use crate::regout_dir;
use pixstat_core::{Color, ImageFormat, Pix, PixelDepth};
use std::path::PathBuf;

fn synthetic_err(name: &str, e: impl std::fmt::Display) -> TestError {
    TestError::Synthetic {
        name: name.to_string(),
        message: e.to_string(),
    }
}

/// Image where every pixel is `val`.
pub fn uniform(width: u32, height: u32, val: u8) -> TestResult<Pix> {
    let mut pm = Pix::new(width, height, PixelDepth::Bit8)
        .map_err(|e| synthetic_err("uniform", e))?
        .to_mut();
    pm.set_all_arbitrary(u32::from(val));
    Ok(pm.into())
}

/// Horizontal ramp: pixel value is `x * step`, saturating at 255.
pub fn gradient(width: u32, height: u32, step: u32) -> TestResult<Pix> {
    let mut pm = Pix::new(width, height, PixelDepth::Bit8)
        .map_err(|e| synthetic_err("gradient", e))?
        .to_mut();
    for y in 0..height {
        for x in 0..width {
            pm.set_pixel_unchecked(x, y, (x * step).min(255));
        }
    }
    Ok(pm.into())
}

/// Row-major image from explicit samples.
pub fn from_samples(width: u32, height: u32, samples: &[u8]) -> TestResult<Pix> {
    Pix::from_samples(width, height, samples).map_err(|e| synthetic_err("from_samples", e))
}

/// 32 bpp image filled with one color.
pub fn solid_rgb(width: u32, height: u32, color: Color) -> TestResult<Pix> {
    let mut pm = Pix::new(width, height, PixelDepth::Bit32)
        .map_err(|e| synthetic_err("solid_rgb", e))?
        .to_mut();
    pm.set_all_arbitrary(color.to_pixel32());
    Ok(pm.into())
}

/// Write `pix` as `<name>.png` into the regout directory and return its path.
pub fn write_fixture(pix: &Pix, name: &str) -> TestResult<PathBuf> {
    std::fs::create_dir_all(regout_dir())?;
    let path = regout_dir().join(format!("{name}.{}", ImageFormat::Png.extension()));
    pixstat_io::write_image(pix, &path, ImageFormat::Png).map_err(|e| TestError::ImageWrite {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform() {
        let pix = uniform(3, 2, 128).unwrap();
        assert!(pix.samples().unwrap().iter().all(|&v| v == 128));
    }

    #[test]
    fn test_gradient_saturates() {
        let pix = gradient(10, 1, 40).unwrap();
        assert_eq!(
            pix.samples().unwrap(),
            vec![0, 40, 80, 120, 160, 200, 240, 255, 255, 255]
        );
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(uniform(0, 2, 1).is_err());
        assert!(from_samples(2, 2, &[1, 2, 3]).is_err());
    }
}
