//! KDE Explorer - an interactive, terminal-based explorer for 2D kernel
//! density estimates.
//!
//! A Gaussian KDE is fitted to a set of samples (or any
//! [`kde::DensityEstimator`] is supplied), evaluated on a grid and drawn as
//! contours. Two clicks on the plot followed by a key press then extract a
//! density profile along a line, integrate the density over a box, or zoom.
//!
//! # Features
//!
//! - Gaussian KDE with Scott, Silverman or fixed bandwidth
//! - Filled or line contours with automatic "nice" levels
//! - Line profiles and box integrals from mouse clicks
//! - Zoom, unzoom and clear
//! - Gruvbox color themes and several color maps
//! - Clipboard export of profiles
//!
//! # Example
//!
//! ```no_run
//! use kde_explorer::data::read_samples;
//! use kde_explorer::kde::Bandwidth;
//! use kde_explorer::session::{ClickEvent, Explorer, ExplorerOptions};
//! use std::path::Path;
//!
//! let samples = read_samples(Path::new("samples.csv"), b',')?;
//! let mut explorer =
//!     Explorer::from_samples(samples, Bandwidth::Scott, ExplorerOptions::default())?;
//! let axis = kde_explorer::grid::linspace(-3.0, 3.0, 60);
//! explorer.contour(&axis, &axis)?;
//!
//! explorer.open_session(100)?;
//! explorer.click(ClickEvent::at(-1.0, -1.0))?;
//! explorer.click(ClickEvent::at(1.0, 1.0))?;
//! explorer.handle_key("i")?;
//! println!("integral: {:?}", explorer.last_integral());
//! # Ok::<(), kde_explorer::ExplorerError>(())
//! ```

#![warn(
    missing_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]
#![deny(unsafe_code)]

pub mod app;
pub mod clipboard;
pub mod contour;
pub mod data;
pub mod error;
pub mod figure;
pub mod grid;
pub mod kde;
pub mod session;
pub mod ui;
pub mod util;

pub use error::{ExplorerError, Result};
pub use session::{Explorer, ExplorerOptions, UpdateParams};
