//! pixstat - Grayscale image statistics with a boxplot popup
//!
//! Re-exports the core and I/O crates and adds the application layer:
//!
//! - [`chart`] - Boxplot rendering into a [`Pix`]
//! - [`display`] - The [`display::DisplaySurface`] seam and its popup,
//!   dialog and recording implementations
//! - [`app`] - Command-line parsing and the load/compute/show flow
//!
//! # Example
//!
//! ```
//! use pixstat::PixelStats;
//!
//! let stats = PixelStats::from_samples(&[0, 0, 0, 255, 255]).unwrap();
//! assert_eq!(stats.mode, 0);
//! assert_eq!(stats.variance, 15606.0);
//! ```

pub use pixstat_core::*;
pub use pixstat_io as io;

pub mod app;
pub mod chart;
pub mod display;
