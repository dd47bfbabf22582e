//! Evaluation grids and density matrices.

use std::str::FromStr;

use ndarray::Array2;

use crate::error::{ExplorerError, Result};
use crate::kde::DensityEstimator;

/// Density evaluated over the cross product of two coordinate vectors.
///
/// `z[[i, j]]` is the density at `(x[i], y[j])`: rows follow x, columns
/// follow y. Renderers take [`DensityGrid::transposed`].
#[derive(Debug, Clone, PartialEq)]
pub struct DensityGrid {
    /// X coordinates (not necessarily evenly spaced).
    pub x: Vec<f64>,
    /// Y coordinates (not necessarily evenly spaced).
    pub y: Vec<f64>,
    /// Density matrix, shape `(x.len(), y.len())`.
    pub z: Array2<f64>,
}

impl DensityGrid {
    /// Density matrix with rows following y and columns following x.
    pub fn transposed(&self) -> Array2<f64> {
        self.z.t().to_owned()
    }

    /// `(min, max)` of the x vector.
    pub fn x_extent(&self) -> (f64, f64) {
        extent(&self.x)
    }

    /// `(min, max)` of the y vector.
    pub fn y_extent(&self) -> (f64, f64) {
        extent(&self.y)
    }
}

/// Evaluate `estimator` at every `(x[i], y[j])`.
pub fn evaluate_grid<E: DensityEstimator + ?Sized>(
    estimator: &E,
    x: &[f64],
    y: &[f64],
) -> Result<DensityGrid> {
    if x.is_empty() || y.is_empty() {
        return Err(ExplorerError::EmptyGrid);
    }

    let points: Vec<[f64; 2]> = x
        .iter()
        .flat_map(|&xi| y.iter().map(move |&yj| [xi, yj]))
        .collect();
    let values = estimator.evaluate_batch(&points);

    let z = Array2::from_shape_vec((x.len(), y.len()), values)
        .map_err(|e| ExplorerError::invalid_argument(format!("density reshape failed: {}", e)))?;

    tracing::debug!(nx = x.len(), ny = y.len(), "evaluated density grid");

    Ok(DensityGrid {
        x: x.to_vec(),
        y: y.to_vec(),
        z,
    })
}

/// `n` evenly spaced values from `start` to `end`, both included exactly.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let last = (n - 1) as f64;
            (0..n)
                .map(|i| {
                    if i == n - 1 {
                        end
                    } else {
                        start + (end - start) * (i as f64 / last)
                    }
                })
                .collect()
        },
    }
}

/// `(min, max)` of a slice, ignoring NaN.
pub fn extent(values: &[f64]) -> (f64, f64) {
    values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &v| {
            (min.min(v), max.max(v))
        })
}

/// An evenly spaced axis, written `MIN:MAX:N` on the command line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSpec {
    /// First value.
    pub min: f64,
    /// Last value.
    pub max: f64,
    /// Number of values.
    pub n: usize,
}

impl GridSpec {
    /// Axis spanning `(min, max)` padded by `pad` of the range on each side.
    pub fn padded(min: f64, max: f64, pad: f64, n: usize) -> Self {
        let span = max - min;
        let margin = if span > 0.0 { span * pad } else { 1.0 };
        Self {
            min: min - margin,
            max: max + margin,
            n,
        }
    }

    /// The axis values.
    pub fn values(&self) -> Vec<f64> {
        linspace(self.min, self.max, self.n)
    }
}

impl FromStr for GridSpec {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(':').map(str::trim).collect();
        let [min, max, n] = parts.as_slice() else {
            return Err(ExplorerError::invalid_argument(format!(
                "grid must be MIN:MAX:N, got '{}'",
                s
            )));
        };
        let parse = |v: &str| {
            v.parse::<f64>()
                .map_err(|_| ExplorerError::invalid_argument(format!("'{}' is not a number", v)))
        };
        let n: usize = n
            .parse()
            .map_err(|_| ExplorerError::invalid_argument(format!("'{}' is not a count", n)))?;
        if n < 2 {
            return Err(ExplorerError::invalid_argument("grid needs at least 2 points"));
        }
        Ok(Self {
            min: parse(*min)?,
            max: parse(*max)?,
            n,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kde::normalize_box;

    /// Density that encodes its coordinates so grid orientation is visible.
    struct Plane;

    impl DensityEstimator for Plane {
        fn evaluate(&self, p: [f64; 2]) -> f64 {
            10.0 * p[0] + p[1]
        }

        fn integrate_box(&self, lower: [f64; 2], upper: [f64; 2]) -> f64 {
            let (lo, hi) = normalize_box(lower, upper);
            (hi[0] - lo[0]) * (hi[1] - lo[1])
        }
    }

    #[test]
    fn test_matrix_shape_and_orientation() {
        let x = [0.0, 1.0, 2.0];
        let y = [0.0, 0.5, 3.0, 7.0];
        let grid = evaluate_grid(&Plane, &x, &y).unwrap();
        assert_eq!(grid.z.dim(), (3, 4));
        for (i, &xi) in x.iter().enumerate() {
            for (j, &yj) in y.iter().enumerate() {
                assert_eq!(grid.z[[i, j]], Plane.evaluate([xi, yj]));
            }
        }
        let t = grid.transposed();
        assert_eq!(t.dim(), (4, 3));
        assert_eq!(t[[3, 1]], grid.z[[1, 3]]);
    }

    #[test]
    fn test_empty_vector_rejected() {
        assert!(matches!(
            evaluate_grid(&Plane, &[], &[1.0]),
            Err(ExplorerError::EmptyGrid)
        ));
    }

    #[test]
    fn test_linspace_endpoints_exact() {
        let v = linspace(0.1, 0.7, 7);
        assert_eq!(v.len(), 7);
        assert_eq!(v[0], 0.1);
        assert_eq!(v[6], 0.7);
        assert_eq!(linspace(3.0, 0.0, 4), vec![3.0, 2.0, 1.0, 0.0]);
        assert_eq!(linspace(5.0, 9.0, 1), vec![5.0]);
        assert!(linspace(5.0, 9.0, 0).is_empty());
    }

    #[test]
    fn test_grid_spec_parsing() {
        let spec: GridSpec = "-1.5:2:5".parse().unwrap();
        assert_eq!(spec, GridSpec { min: -1.5, max: 2.0, n: 5 });
        assert_eq!(spec.values().len(), 5);
        assert!("1:2".parse::<GridSpec>().is_err());
        assert!("a:2:3".parse::<GridSpec>().is_err());
        assert!("0:1:1".parse::<GridSpec>().is_err());
    }

    #[test]
    fn test_padded_spec() {
        let spec = GridSpec::padded(0.0, 10.0, 0.2, 11);
        assert_eq!(spec.min, -2.0);
        assert_eq!(spec.max, 12.0);
        let flat = GridSpec::padded(3.0, 3.0, 0.2, 5);
        assert_eq!((flat.min, flat.max), (2.0, 4.0));
    }
}
