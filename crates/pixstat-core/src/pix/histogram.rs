//! Histogram generation for Pix images
//!
//! Every statistic in this crate is computed from a 256-bin intensity
//! histogram rather than from the raw samples: sums stay exact in `u64`
//! and order statistics become a walk over cumulative counts.

use super::{Pix, PixelDepth, get_data_byte};
use crate::error::{Error, Result};

/// Number of intensity levels in an 8 bpp image
pub const GRAY_LEVELS: usize = 256;

/// Occurrence counts of every 8-bit intensity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrayHistogram {
    bins: [u64; GRAY_LEVELS],
    total: u64,
}

impl Default for GrayHistogram {
    fn default() -> Self {
        Self {
            bins: [0; GRAY_LEVELS],
            total: 0,
        }
    }
}

impl GrayHistogram {
    /// Build a histogram from a flat slice of samples.
    pub fn from_samples(samples: &[u8]) -> Self {
        let mut hist = Self::default();
        for &v in samples {
            hist.add(v, 1);
        }
        hist
    }

    /// Add `n` occurrences of `value`.
    #[inline]
    pub fn add(&mut self, value: u8, n: u64) {
        self.bins[value as usize] += n;
        self.total += n;
    }

    /// Occurrences of `value`.
    #[inline]
    pub fn count(&self, value: u8) -> u64 {
        self.bins[value as usize]
    }

    /// Number of samples counted.
    #[inline]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Check if no samples were counted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// All 256 bins, indexed by intensity.
    pub fn bins(&self) -> &[u64; GRAY_LEVELS] {
        &self.bins
    }

    /// Iterate over `(value, count)` for every value that occurs.
    pub fn occupied(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.bins
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c > 0)
            .map(|(v, &c)| (v as u8, c))
    }

    /// Smallest value present, or `None` if empty.
    pub fn min_value(&self) -> Option<u8> {
        self.occupied().next().map(|(v, _)| v)
    }

    /// Largest value present, or `None` if empty.
    pub fn max_value(&self) -> Option<u8> {
        self.bins.iter().rposition(|&c| c > 0).map(|v| v as u8)
    }

    /// The k-th smallest sample (0-based).
    ///
    /// Returns `None` if `k >= total()`.
    pub fn value_at_rank(&self, k: u64) -> Option<u8> {
        if k >= self.total {
            return None;
        }
        let mut seen = 0u64;
        for (v, &c) in self.bins.iter().enumerate() {
            seen += c;
            if seen > k {
                return Some(v as u8);
            }
        }
        None
    }

    /// Rank-interpolated value at fraction `p` of the sorted samples.
    ///
    /// The position is `p * (n - 1)`; fractional positions interpolate
    /// linearly between the two neighbouring ranks. `p` is clamped to [0, 1].
    pub fn quantile(&self, p: f64) -> Option<f64> {
        if self.total == 0 {
            return None;
        }
        let pos = p.clamp(0.0, 1.0) * (self.total - 1) as f64;
        let lo = pos.floor() as u64;
        let hi = pos.ceil() as u64;
        let v_lo = f64::from(self.value_at_rank(lo)?);
        if hi == lo {
            return Some(v_lo);
        }
        let v_hi = f64::from(self.value_at_rank(hi)?);
        Some(v_lo + (v_hi - v_lo) * (pos - lo as f64))
    }
}

impl Pix {
    /// Get the grayscale histogram of the image.
    ///
    /// # Arguments
    ///
    /// * `factor` - Subsampling factor. Use 1 to count all pixels,
    ///   2 to count every other pixel in each direction, etc.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if the factor is 0 and
    /// [`Error::UnsupportedDepth`] if the image is not 8 bpp.
    ///
    /// # Example
    ///
    /// ```
    /// use pixstat_core::Pix;
    ///
    /// let pix = Pix::from_samples(2, 2, &[1, 1, 7, 200]).unwrap();
    /// let hist = pix.gray_histogram(1).unwrap();
    /// assert_eq!(hist.count(1), 2);
    /// assert_eq!(hist.total(), 4);
    /// ```
    pub fn gray_histogram(&self, factor: u32) -> Result<GrayHistogram> {
        if factor == 0 {
            return Err(Error::InvalidParameter("factor must be >= 1".to_string()));
        }
        if self.depth() != PixelDepth::Bit8 {
            return Err(Error::UnsupportedDepth(self.depth().bits()));
        }

        let mut hist = GrayHistogram::default();
        for y in (0..self.height()).step_by(factor as usize) {
            let line = self.row_data(y);
            for x in (0..self.width()).step_by(factor as usize) {
                hist.add(get_data_byte(line, x) as u8, 1);
            }
        }
        Ok(hist)
    }
}
