//! Density profiles along a straight line.

use crate::grid::linspace;
use crate::kde::DensityEstimator;

/// Density sampled along the segment between two points.
#[derive(Debug, Clone, PartialEq)]
pub struct LineProfile {
    /// First clicked point.
    pub start: [f64; 2],
    /// Second clicked point.
    pub end: [f64; 2],
    /// Sample positions, evenly spaced from `start` to `end`.
    pub points: Vec<[f64; 2]>,
    /// Density at each sample position.
    pub densities: Vec<f64>,
}

impl LineProfile {
    /// Sample `n` points from `start` to `end` and evaluate the estimator.
    pub fn extract<E: DensityEstimator + ?Sized>(
        estimator: &E,
        start: [f64; 2],
        end: [f64; 2],
        n: usize,
    ) -> Self {
        let points = sample_segment(start, end, n);
        let densities = estimator.evaluate_batch(&points);
        Self {
            start,
            end,
            points,
            densities,
        }
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the profile holds no samples.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Tab-separated `index x y density` rows.
    pub fn to_tsv(&self) -> String {
        let mut out = String::from("index\tx\ty\tdensity\n");
        for (i, (p, d)) in self.points.iter().zip(&self.densities).enumerate() {
            out.push_str(&format!("{}\t{}\t{}\t{}\n", i, p[0], p[1], d));
        }
        out
    }
}

/// `n` points evenly spaced in parameter along the segment; the first is
/// `start` and the last is `end`.
pub fn sample_segment(start: [f64; 2], end: [f64; 2], n: usize) -> Vec<[f64; 2]> {
    linspace(start[0], end[0], n)
        .into_iter()
        .zip(linspace(start[1], end[1], n))
        .map(|(x, y)| [x, y])
        .collect()
}
