//! pixstat-test - Regression test harness for pixstat
//!
//! Three modes, selected by the `REGTEST_MODE` environment variable:
//!
//! - **Generate**: write golden files
//! - **Compare**: compare results with golden files (default)
//! - **Display**: run without comparison
//!
//! # Usage
//!
//! ```ignore
//! use pixstat_test::RegParams;
//!
//! let mut rp = RegParams::new("pixel_stats");
//! rp.compare_values(102.0, stats.mean, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! Test images are generated in code by [`synthetic`] and written under
//! the regression output directory, so the repository carries no binary
//! fixtures.

mod error;
mod params;
pub mod synthetic;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

use std::path::PathBuf;

/// Load an image written into the regression output directory.
pub fn load_regout_image(name: &str) -> TestResult<pixstat_core::Pix> {
    let path = regout_dir().join(name);
    pixstat_io::read_image(&path).map_err(|e| TestError::ImageLoad {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Get the path to the workspace root
fn workspace_root() -> PathBuf {
    // pixstat-test lives at crates/pixstat-test
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../..")
}

/// Get the path to the golden files directory
pub fn golden_dir() -> PathBuf {
    workspace_root().join("tests/golden")
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> PathBuf {
    workspace_root().join("tests/regout")
}
