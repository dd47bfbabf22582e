//! Paired x/y sample coordinates.

use crate::error::{ExplorerError, Result};
use crate::grid::extent;

/// Paired sample coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Samples {
    /// X coordinates.
    pub x: Vec<f64>,
    /// Y coordinates, same length as `x`.
    pub y: Vec<f64>,
}

impl Samples {
    /// Pair two coordinate sequences.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self> {
        if x.len() != y.len() {
            return Err(ExplorerError::SampleLengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        Ok(Self { x, y })
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Whether there are no samples.
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Samples as points.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.x.iter().zip(&self.y).map(|(&x, &y)| [x, y]).collect()
    }

    /// `((xmin, xmax), (ymin, ymax))`, or `None` when empty.
    pub fn extent(&self) -> Option<((f64, f64), (f64, f64))> {
        if self.is_empty() {
            return None;
        }
        Some((extent(&self.x), extent(&self.y)))
    }
}
