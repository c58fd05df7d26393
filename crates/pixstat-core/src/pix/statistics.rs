//! Image statistics operations
//!
//! Entry points from a [`Pix`] into [`crate::stats`]. Only 8 bpp images
//! are accepted; color input must go through [`Pix::convert_to_8`] first.

use super::Pix;
use crate::error::Result;
use crate::stats::{BoxplotSummary, PixelStats};

impl Pix {
    /// Compute mean, median, mode, variance and standard deviation of
    /// every pixel.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnsupportedDepth`] if the image is not 8 bpp.
    ///
    /// # Example
    ///
    /// ```
    /// use pixstat_core::Pix;
    ///
    /// let pix = Pix::from_samples(5, 1, &[0, 0, 0, 255, 255]).unwrap();
    /// let stats = pix.pixel_stats().unwrap();
    /// assert_eq!(stats.mean, 102.0);
    /// assert_eq!(stats.mode, 0);
    /// ```
    pub fn pixel_stats(&self) -> Result<PixelStats> {
        PixelStats::from_histogram(&self.gray_histogram(1)?)
    }

    /// Compute the boxplot summary of every pixel.
    pub fn boxplot_summary(&self, whisker_factor: f64) -> Result<BoxplotSummary> {
        BoxplotSummary::from_histogram(&self.gray_histogram(1)?, whisker_factor)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Error, Pix, PixelDepth};

    #[test]
    fn test_pixel_stats_matches_samples() {
        let samples: Vec<u8> = (0..48u32).map(|v| (v * 5 % 256) as u8).collect();
        let pix = Pix::from_samples(8, 6, &samples).unwrap();
        let from_pix = pix.pixel_stats().unwrap();
        let from_slice = crate::PixelStats::from_samples(&samples).unwrap();
        assert_eq!(from_pix, from_slice);
    }

    #[test]
    fn test_rejects_rgb() {
        let pix = Pix::new(3, 3, PixelDepth::Bit32).unwrap();
        assert!(matches!(pix.pixel_stats(), Err(Error::UnsupportedDepth(32))));
        assert!(pix.boxplot_summary(1.5).is_err());
    }

    #[test]
    fn test_boxplot_median_agrees() {
        let pix = Pix::from_samples(2, 2, &[10, 20, 30, 40]).unwrap();
        let stats = pix.pixel_stats().unwrap();
        let bp = pix.boxplot_summary(1.5).unwrap();
        assert_eq!(bp.median, stats.median);
    }
}
