//! Presentation of computed statistics
//!
//! The application talks to a [`DisplaySurface`] only, so the load and
//! compute path runs headlessly under test with a [`RecordingSurface`]
//! while the binary uses the eframe-backed [`PopupSurface`].

mod dialog;
mod popup;
mod recording;

pub use dialog::ErrorDialog;
pub use popup::{PopupSurface, pix_to_color_image};
pub use recording::RecordingSurface;

use pixstat_core::{BoxplotSummary, PixelStats};
use std::path::{Path, PathBuf};

/// Something that can present statistics or an error to the user.
///
/// Both calls block until the user has dismissed what was shown.
pub trait DisplaySurface {
    /// Present the statistics of one image.
    fn show_statistics(&mut self, report: &StatsReport) -> anyhow::Result<()>;

    /// Present an error message with a title.
    fn show_error(&mut self, title: &str, message: &str) -> anyhow::Result<()>;
}

/// Everything shown for one image.
#[derive(Debug, Clone, PartialEq)]
pub struct StatsReport {
    pub path: PathBuf,
    pub stats: PixelStats,
    pub boxplot: BoxplotSummary,
}

impl StatsReport {
    pub fn new(path: impl Into<PathBuf>, stats: PixelStats, boxplot: BoxplotSummary) -> Self {
        Self {
            path: path.into(),
            stats,
            boxplot,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Text lines with `decimals` digits after the point.
    ///
    /// The mode is always printed as an integer.
    pub fn format_lines(&self, decimals: usize) -> Vec<String> {
        let s = &self.stats;
        vec![
            format!("Image path: {}", self.path.display()),
            format!("Mean: {:.decimals$}", s.mean),
            format!("Median: {:.decimals$}", s.median),
            format!("Mode: {}", s.mode),
            format!("Variance: {:.decimals$}", s.variance),
            format!("Standard deviation: {:.decimals$}", s.std_dev),
        ]
    }

    /// Text lines with two decimals.
    pub fn lines(&self) -> Vec<String> {
        self.format_lines(2)
    }
}

/// Window text and geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct PopupConfig {
    /// Window title
    pub title: String,
    /// Initial inner size in logical points
    pub inner_size: [f32; 2],
    /// Digits after the decimal point
    pub decimals: usize,
    pub close_label: String,
    pub figure_title: String,
    pub y_label: String,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            title: "Image Statistics".to_string(),
            inner_size: [600.0, 700.0],
            decimals: 2,
            close_label: "Close".to_string(),
            figure_title: "Pixel value boxplot".to_string(),
            y_label: "Intensity (0-255)".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pixstat_core::boxplot::DEFAULT_WHISKER_FACTOR;

    fn report(samples: &[u8]) -> StatsReport {
        StatsReport::new(
            "/tmp/two_level.png",
            PixelStats::from_samples(samples).unwrap(),
            BoxplotSummary::from_samples(samples, DEFAULT_WHISKER_FACTOR).unwrap(),
        )
    }

    #[test]
    fn test_report_lines() {
        let r = report(&[0, 0, 0, 255, 255]);
        assert_eq!(
            r.lines(),
            vec![
                "Image path: /tmp/two_level.png",
                "Mean: 102.00",
                "Median: 0.00",
                "Mode: 0",
                "Variance: 15606.00",
                "Standard deviation: 124.92",
            ]
        );
    }

    #[test]
    fn test_report_decimals() {
        let r = report(&[10, 20, 30, 41]);
        let lines = r.format_lines(0);
        assert_eq!(lines[1], "Mean: 25");
        assert_eq!(lines[3], "Mode: 10");
        let lines = r.format_lines(3);
        assert_eq!(lines[2], "Median: 25.000");
    }

    #[test]
    fn test_popup_defaults() {
        let c = PopupConfig::default();
        assert_eq!(c.title, "Image Statistics");
        assert_eq!(c.inner_size, [600.0, 700.0]);
        assert_eq!(c.decimals, 2);
        assert_eq!(c.close_label, "Close");
    }
}
