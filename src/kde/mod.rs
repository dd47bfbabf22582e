//! Kernel density estimation.
//!
//! This module defines the [`DensityEstimator`] seam the explorer works
//! against and the Gaussian estimator used when the explorer is built from
//! raw samples.

mod gaussian;
pub mod normal;

pub use gaussian::{Bandwidth, GaussianKde};

use std::fmt;

/// A density function over 2D continuous space.
pub trait DensityEstimator {
    /// Density at a single point.
    fn evaluate(&self, point: [f64; 2]) -> f64;

    /// Density at each of `points`, in order.
    fn evaluate_batch(&self, points: &[[f64; 2]]) -> Vec<f64> {
        points.iter().map(|&p| self.evaluate(p)).collect()
    }

    /// Integral of the density over the axis-aligned box spanned by two
    /// corners. The corners may be given in any order.
    fn integrate_box(&self, lower: [f64; 2], upper: [f64; 2]) -> f64;
}

impl<E: DensityEstimator + ?Sized> DensityEstimator for Box<E> {
    fn evaluate(&self, point: [f64; 2]) -> f64 {
        (**self).evaluate(point)
    }

    fn evaluate_batch(&self, points: &[[f64; 2]]) -> Vec<f64> {
        (**self).evaluate_batch(points)
    }

    fn integrate_box(&self, lower: [f64; 2], upper: [f64; 2]) -> f64 {
        (**self).integrate_box(lower, upper)
    }
}

/// Sort two box corners into `(min, max)` per axis.
pub fn normalize_box(a: [f64; 2], b: [f64; 2]) -> ([f64; 2], [f64; 2]) {
    (
        [a[0].min(b[0]), a[1].min(b[1])],
        [a[0].max(b[0]), a[1].max(b[1])],
    )
}

/// How the explorer's estimator was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Fitted from raw samples, which are kept for overlay plotting.
    Samples,
    /// Supplied pre-built by the caller.
    Estimator,
}

impl fmt::Display for InputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Samples => write!(f, "raw samples (KDE fitted on construction)"),
            Self::Estimator => write!(f, "pre-built estimator"),
        }
    }
}

/// Construction input for an explorer.
#[derive(Debug, Clone)]
pub enum ExplorerInput<E> {
    /// Raw sample coordinates; a Gaussian KDE is fitted from them.
    Samples {
        /// X coordinates.
        x: Vec<f64>,
        /// Y coordinates.
        y: Vec<f64>,
        /// Bandwidth rule.
        bandwidth: Bandwidth,
    },
    /// A pre-built estimator.
    Estimator(E),
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Uniform;

    impl DensityEstimator for Uniform {
        fn evaluate(&self, _point: [f64; 2]) -> f64 {
            0.25
        }

        fn integrate_box(&self, lower: [f64; 2], upper: [f64; 2]) -> f64 {
            let (lo, hi) = normalize_box(lower, upper);
            0.25 * (hi[0] - lo[0]) * (hi[1] - lo[1])
        }
    }

    #[test]
    fn test_normalize_box() {
        let (lo, hi) = normalize_box([3.0, 0.0], [1.0, 2.0]);
        assert_eq!(lo, [1.0, 0.0]);
        assert_eq!(hi, [3.0, 2.0]);
    }

    #[test]
    fn test_boxed_estimator_delegates() {
        let boxed: Box<dyn DensityEstimator> = Box::new(Uniform);
        assert_eq!(boxed.evaluate([9.0, 9.0]), 0.25);
        assert_eq!(boxed.evaluate_batch(&[[0.0, 0.0], [1.0, 1.0]]), vec![0.25, 0.25]);
        assert_eq!(boxed.integrate_box([2.0, 2.0], [0.0, 0.0]), 1.0);
    }
}
