//! Sample input.
//!
//! This module reads two-column sample files into [`Samples`], the raw
//! coordinates a Gaussian KDE is fitted from.

mod reader;
mod samples;

pub use reader::{read_samples, SampleReader};
pub use samples::Samples;
