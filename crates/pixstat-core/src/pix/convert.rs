//! Depth conversion
//!
//! Decoders may hand back 32 bpp RGB; statistics always run on 8 bpp
//! luminance, so everything entering the calculator goes through
//! [`Pix::convert_to_8`].

use super::{Pix, PixelDepth};
use crate::color;
use crate::error::{Error, Result};

/// Luminance weight for red (ITU-R BT.601)
pub const RED_WEIGHT: f32 = 0.299;
/// Luminance weight for green (ITU-R BT.601)
pub const GREEN_WEIGHT: f32 = 0.587;
/// Luminance weight for blue (ITU-R BT.601)
pub const BLUE_WEIGHT: f32 = 0.114;

impl Pix {
    /// Convert to 8-bit grayscale.
    ///
    /// - **8 bpp**: returned as a shared clone (no copy)
    /// - **32 bpp**: luminance with the BT.601 weights
    pub fn convert_to_8(&self) -> Result<Pix> {
        match self.depth() {
            PixelDepth::Bit8 => Ok(self.clone()),
            PixelDepth::Bit32 => self.convert_rgb_to_luminance(),
        }
    }

    /// Convert 32 bpp RGB to 8 bpp luminance with the default weights.
    pub fn convert_rgb_to_luminance(&self) -> Result<Pix> {
        self.convert_rgb_to_gray(0.0, 0.0, 0.0)
    }

    /// Convert 32 bpp RGB to 8 bpp grayscale with custom weights.
    ///
    /// If all weights are 0.0, the default luminance weights are used.
    /// Weights are normalized to sum to 1.0 if they don't already.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedDepth`] if the image is not 32 bpp.
    /// Returns [`Error::InvalidParameter`] if any weight is negative.
    pub fn convert_rgb_to_gray(&self, rwt: f32, gwt: f32, bwt: f32) -> Result<Pix> {
        if self.depth() != PixelDepth::Bit32 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }
        if rwt < 0.0 || gwt < 0.0 || bwt < 0.0 {
            return Err(Error::InvalidParameter("weights must all be >= 0.0".into()));
        }

        let (rwt, gwt, bwt) = if rwt == 0.0 && gwt == 0.0 && bwt == 0.0 {
            (RED_WEIGHT, GREEN_WEIGHT, BLUE_WEIGHT)
        } else {
            let sum = rwt + gwt + bwt;
            if (sum - 1.0).abs() > 0.0001 {
                (rwt / sum, gwt / sum, bwt / sum)
            } else {
                (rwt, gwt, bwt)
            }
        };

        let w = self.width();
        let h = self.height();
        let mut result_mut = Pix::new(w, h, PixelDepth::Bit8)?.to_mut();
        result_mut.set_informat(self.informat());

        for y in 0..h {
            for x in 0..w {
                let pixel = self.get_pixel_unchecked(x, y);
                let r = color::red(pixel) as f32;
                let g = color::green(pixel) as f32;
                let b = color::blue(pixel) as f32;
                let gray = (rwt * r + gwt * g + bwt * b + 0.5) as u32;
                result_mut.set_pixel_unchecked(x, y, gray.min(255));
            }
        }

        Ok(result_mut.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgb_pix(r: u8, g: u8, b: u8) -> Pix {
        let mut pm = Pix::new(3, 2, PixelDepth::Bit32).unwrap().to_mut();
        pm.set_all_arbitrary(color::compose_rgb(r, g, b));
        pm.into()
    }

    #[test]
    fn test_gray_passthrough_shares_data() {
        let pix = Pix::from_samples(2, 1, &[3, 4]).unwrap();
        let out = pix.convert_to_8().unwrap();
        assert!(std::sync::Arc::ptr_eq(&pix.inner, &out.inner));
    }

    #[test]
    fn test_luminance_primaries() {
        let red = rgb_pix(255, 0, 0).convert_to_8().unwrap();
        assert_eq!(red.get_pixel(0, 0), Some(76));
        let green = rgb_pix(0, 255, 0).convert_to_8().unwrap();
        assert_eq!(green.get_pixel(0, 0), Some(150));
        let blue = rgb_pix(0, 0, 255).convert_to_8().unwrap();
        assert_eq!(blue.get_pixel(0, 0), Some(29));
    }

    #[test]
    fn test_neutral_gray_is_preserved() {
        let gray = rgb_pix(128, 128, 128).convert_to_8().unwrap();
        assert_eq!(gray.depth(), PixelDepth::Bit8);
        assert_eq!(gray.get_pixel(2, 1), Some(128));
    }

    #[test]
    fn test_custom_weights_normalized() {
        let pix = rgb_pix(100, 200, 0);
        let out = pix.convert_rgb_to_gray(1.0, 1.0, 0.0).unwrap();
        assert_eq!(out.get_pixel(0, 0), Some(150));
    }

    #[test]
    fn test_rejects_negative_weight_and_gray_input() {
        assert!(rgb_pix(1, 1, 1).convert_rgb_to_gray(-1.0, 0.5, 0.5).is_err());
        let gray = Pix::new(1, 1, PixelDepth::Bit8).unwrap();
        assert!(gray.convert_rgb_to_gray(0.3, 0.3, 0.4).is_err());
    }
}
