//! Boxplot summary
//!
//! Quartiles use linear interpolation at position `p * (n - 1)` of the
//! sorted samples, so the box median equals [`super::PixelStats::median`].
//! Whiskers extend to the most extreme samples within
//! `whisker_factor * IQR` of the box; everything beyond is an outlier.

use crate::error::{Error, Result};
use crate::pix::GrayHistogram;

/// Default whisker reach in multiples of the IQR
pub const DEFAULT_WHISKER_FACTOR: f64 = 1.5;

/// Five-number summary plus outliers.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxplotSummary {
    /// First quartile
    pub q1: f64,
    /// Median
    pub median: f64,
    /// Third quartile
    pub q3: f64,
    /// Interquartile range (`q3 - q1`)
    pub iqr: f64,
    /// Lowest sample inside the lower fence
    pub whisker_low: u8,
    /// Highest sample inside the upper fence
    pub whisker_high: u8,
    /// Distinct values beyond the whiskers with their counts, ascending
    pub outliers: Vec<(u8, u64)>,
    /// Smallest sample
    pub min: u8,
    /// Largest sample
    pub max: u8,
}

impl BoxplotSummary {
    /// Summarise a histogram.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an empty histogram and
    /// [`Error::InvalidParameter`] if `whisker_factor` is negative or not finite.
    pub fn from_histogram(hist: &GrayHistogram, whisker_factor: f64) -> Result<Self> {
        if !whisker_factor.is_finite() || whisker_factor < 0.0 {
            return Err(Error::InvalidParameter(format!(
                "whisker factor must be finite and >= 0, got {whisker_factor}"
            )));
        }
        let (Some(min), Some(max)) = (hist.min_value(), hist.max_value()) else {
            return Err(Error::InvalidInput("no pixel samples"));
        };
        let quantile = |p| hist.quantile(p).ok_or(Error::InvalidInput("no pixel samples"));
        let q1 = quantile(0.25)?;
        let median = quantile(0.5)?;
        let q3 = quantile(0.75)?;
        let iqr = q3 - q1;

        let lo_fence = q1 - whisker_factor * iqr;
        let hi_fence = q3 + whisker_factor * iqr;
        let inside = |v: u8| {
            let v = f64::from(v);
            v >= lo_fence && v <= hi_fence
        };

        // The quartiles lie between min and max, so at least one sample
        // is always inside the fences.
        let whisker_low = hist
            .occupied()
            .map(|(v, _)| v)
            .find(|&v| inside(v))
            .unwrap_or(min);
        let whisker_high = hist
            .occupied()
            .map(|(v, _)| v)
            .filter(|&v| inside(v))
            .last()
            .unwrap_or(max);
        let outliers: Vec<(u8, u64)> = hist.occupied().filter(|&(v, _)| !inside(v)).collect();

        log::debug!(
            "boxplot: q1={q1} median={median} q3={q3} whiskers={whisker_low}..{whisker_high} outliers={}",
            outliers.len()
        );

        Ok(BoxplotSummary {
            q1,
            median,
            q3,
            iqr,
            whisker_low,
            whisker_high,
            outliers,
            min,
            max,
        })
    }

    /// Summarise a flat slice of samples.
    pub fn from_samples(samples: &[u8], whisker_factor: f64) -> Result<Self> {
        Self::from_histogram(&GrayHistogram::from_samples(samples), whisker_factor)
    }

    /// Total number of outlying samples.
    pub fn outlier_count(&self) -> u64 {
        self.outliers.iter().map(|&(_, c)| c).sum()
    }
}
