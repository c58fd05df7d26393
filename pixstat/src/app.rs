//! Command-line entry and application flow
//!
//! [`run`] parses the arguments, loads the image as 8 bpp gray, computes
//! its statistics and boxplot summary, and hands the result to a
//! [`DisplaySurface`]. It returns the process exit code instead of
//! exiting, so the whole flow can be driven from tests.

use crate::chart::ChartStyle;
use crate::display::{DisplaySurface, StatsReport};
use clap::Parser;
use pixstat_core::{BoxplotSummary, PixelStats};
use pixstat_io::IoError;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Printed to stdout when the argument count is wrong
pub const USAGE: &str = "Usage: pixstat <grayscale_image_path>";

/// Title of the dialog that reports load failures
pub const ERROR_TITLE: &str = "Error";

/// Show intensity statistics and a boxplot of a grayscale image
///
/// The single argument is always the image path, even when it starts
/// with a hyphen, so there are no `--help` or `--version` flags.
#[derive(Debug, Parser)]
#[command(
    name = "pixstat",
    about,
    disable_help_flag = true,
    disable_version_flag = true
)]
pub struct Cli {
    /// Image to analyse (PNG, JPEG, BMP or PNM; color is converted to gray)
    #[arg(allow_hyphen_values = true)]
    pub image: PathBuf,
}

/// Application-level failures.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Usage: pixstat <grayscale_image_path>")]
    Usage,

    #[error("Could not load the image:\n{}", .path.display())]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: IoError,
    },

    #[error("statistics failed: {0}")]
    Stats(#[from] pixstat_core::Error),

    #[error("display failed: {0}")]
    Display(String),
}

impl AppError {
    /// Process exit code for this failure.
    pub fn exit_code(&self) -> u8 {
        1
    }
}

/// Load an image and compute everything the display needs.
///
/// `whisker_factor` sets the boxplot whisker reach in IQRs.
///
/// # Errors
///
/// [`AppError::ImageLoad`] if the file cannot be read or decoded,
/// [`AppError::Stats`] if it holds no pixels.
pub fn load_report(path: &Path, whisker_factor: f64) -> Result<StatsReport, AppError> {
    let pix = pixstat_io::read_image_gray(path).map_err(|source| AppError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!(
        "loaded {} ({}x{}, {:?})",
        path.display(),
        pix.width(),
        pix.height(),
        pix.informat()
    );

    let hist = pix.gray_histogram(1)?;
    let stats = PixelStats::from_histogram(&hist)?;
    let boxplot = BoxplotSummary::from_histogram(&hist, whisker_factor)?;
    Ok(StatsReport::new(path, stats, boxplot))
}

/// Run the application and return its exit code.
///
/// `args` includes the program name, as from [`std::env::args_os`].
pub fn run<I, T>(args: I, surface: &mut dyn DisplaySurface) -> u8
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            log::debug!("argument error: {e}");
            println!("{USAGE}");
            return AppError::Usage.exit_code();
        }
    };

    match present(&cli.image, surface) {
        Ok(()) => 0,
        Err(err) => {
            log::error!("{err}");
            err.exit_code()
        }
    }
}

fn present(path: &Path, surface: &mut dyn DisplaySurface) -> Result<(), AppError> {
    let report = match load_report(path, ChartStyle::default().whisker_factor) {
        Ok(report) => report,
        Err(err) => {
            if let AppError::ImageLoad { source, .. } = &err {
                log::warn!("decode of {} failed: {source}", path.display());
            }
            report_error(surface, &err);
            return Err(err);
        }
    };

    log::debug!(
        "mean {:.4}, median {}, mode {}, variance {:.4}",
        report.stats.mean,
        report.stats.median,
        report.stats.mode,
        report.stats.variance
    );
    surface
        .show_statistics(&report)
        .map_err(|e| AppError::Display(format!("{e:#}")))?;
    log::info!("statistics window closed");
    Ok(())
}

fn report_error(surface: &mut dyn DisplaySurface, err: &AppError) {
    let message = err.to_string();
    if let Err(e) = surface.show_error(ERROR_TITLE, &message) {
        // No display available; fall back to the terminal
        log::warn!("could not show error dialog: {e:#}");
        eprintln!("{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::RecordingSurface;

    #[test]
    fn test_usage_on_wrong_argument_count() {
        let mut surface = RecordingSurface::new();
        assert_eq!(run(["pixstat"], &mut surface), 1);
        assert_eq!(run(["pixstat", "a.png", "b.png"], &mut surface), 1);
        assert!(surface.errors.is_empty());
        assert!(surface.reports.is_empty());
    }

    #[test]
    fn test_hyphen_prefixed_argument_is_a_path() {
        for arg in ["-scan.png", "--help", "--version", "-h"] {
            let mut surface = RecordingSurface::new();
            assert_eq!(run(["pixstat", arg], &mut surface), 1, "{arg}");
            assert!(surface.reports.is_empty());
            assert_eq!(surface.errors.len(), 1, "{arg}");
            assert_eq!(
                surface.errors[0].1,
                format!("Could not load the image:\n{arg}")
            );
        }
    }

    #[test]
    fn test_cli_takes_hyphen_path() {
        let cli = Cli::try_parse_from(["pixstat", "-scan.png"]).unwrap();
        assert_eq!(cli.image, PathBuf::from("-scan.png"));
        assert!(Cli::try_parse_from(["pixstat", "-a", "-b"]).is_err());
    }

    #[test]
    fn test_image_load_message() {
        let err = load_report(Path::new("/no/such/image.png"), 1.5).unwrap_err();
        assert!(matches!(err, AppError::ImageLoad { .. }));
        assert_eq!(
            err.to_string(),
            "Could not load the image:\n/no/such/image.png"
        );
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn test_usage_message() {
        assert_eq!(AppError::Usage.to_string(), USAGE);
    }
}
