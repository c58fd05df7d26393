//! Descriptive statistics of pixel intensities
//!
//! [`PixelStats`] summarises a non-empty set of 8-bit samples:
//!
//! | field      | definition                                        |
//! |------------|---------------------------------------------------|
//! | `mean`     | arithmetic mean                                   |
//! | `median`   | middle sample; mean of the two middle ones if even |
//! | `mode`     | most frequent value, smallest value on a tie      |
//! | `variance` | population variance (divides by N)                |
//! | `std_dev`  | square root of the population variance            |
//!
//! Everything is derived from a [`GrayHistogram`], so no sort is needed
//! and the sums are exact integers up to the final division.

pub mod boxplot;

pub use boxplot::BoxplotSummary;

use crate::error::{Error, Result};
use crate::pix::GrayHistogram;

/// Summary statistics of one image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PixelStats {
    /// Arithmetic mean
    pub mean: f64,
    /// Median of the sorted samples
    pub median: f64,
    /// Most frequent intensity
    pub mode: u8,
    /// Population variance
    pub variance: f64,
    /// Population standard deviation
    pub std_dev: f64,
    /// Number of samples
    pub count: u64,
    /// Occurrences of `mode`
    pub mode_count: u64,
}

impl PixelStats {
    /// Compute statistics over a flat slice of samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `samples` is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use pixstat_core::PixelStats;
    ///
    /// let stats = PixelStats::from_samples(&[10, 20, 30, 40]).unwrap();
    /// assert_eq!(stats.mean, 25.0);
    /// assert_eq!(stats.median, 25.0);
    /// ```
    pub fn from_samples(samples: &[u8]) -> Result<Self> {
        Self::from_histogram(&GrayHistogram::from_samples(samples))
    }

    /// Compute statistics over rows of samples.
    ///
    /// Rows may differ in length; all samples are pooled.
    pub fn from_grid<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self> {
        let mut hist = GrayHistogram::default();
        for row in rows {
            for &v in row.as_ref() {
                hist.add(v, 1);
            }
        }
        Self::from_histogram(&hist)
    }

    /// Compute statistics from a histogram.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the histogram is empty.
    pub fn from_histogram(hist: &GrayHistogram) -> Result<Self> {
        let n = hist.total();
        if n == 0 {
            return Err(Error::InvalidInput("no pixel samples"));
        }

        let mut sum = 0u128;
        let mut sum_sq = 0u128;
        let mut mode = 0u8;
        let mut mode_count = 0u64;
        for (v, c) in hist.occupied() {
            let (v128, c128) = (u128::from(v), u128::from(c));
            sum += v128 * c128;
            sum_sq += v128 * v128 * c128;
            // Strict comparison keeps the smallest value on a tie
            if c > mode_count {
                mode = v;
                mode_count = c;
            }
        }

        let n128 = u128::from(n);
        let mean = sum as f64 / n as f64;
        // N * sum(x^2) - sum(x)^2 is exact and never negative
        let variance = (n128 * sum_sq - sum * sum) as f64 / (n as f64 * n as f64);
        let std_dev = variance.sqrt();

        let median = if n % 2 == 1 {
            f64::from(rank(hist, n / 2)?)
        } else {
            let lo = f64::from(rank(hist, n / 2 - 1)?);
            let hi = f64::from(rank(hist, n / 2)?);
            (lo + hi) / 2.0
        };

        let stats = PixelStats {
            mean,
            median,
            mode,
            variance,
            std_dev,
            count: n,
            mode_count,
        };
        log::debug!(
            "pixel stats over {} samples: mean={:.4} median={} mode={} ({}x) var={:.4}",
            n,
            stats.mean,
            stats.median,
            stats.mode,
            stats.mode_count,
            stats.variance
        );
        Ok(stats)
    }
}

fn rank(hist: &GrayHistogram, k: u64) -> Result<u8> {
    hist.value_at_rank(k).ok_or(Error::IndexOutOfBounds {
        index: k as usize,
        len: hist.total() as usize,
    })
}
