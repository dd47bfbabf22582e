//! Gaussian kernel density estimate over 2D samples.

use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;

use ndarray::{Array2, Axis};

use super::normal::bvn_rectangle;
use super::{normalize_box, DensityEstimator};
use crate::error::{ExplorerError, Result};

/// Relative ridge added to a singular kernel covariance.
const SINGULAR_RIDGE: f64 = 1e-6;

/// Bandwidth selection rule.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Bandwidth {
    /// Scott's rule: `n^(-1/(d+4))`.
    #[default]
    Scott,
    /// Silverman's rule: `(n (d+2) / 4)^(-1/(d+4))`.
    Silverman,
    /// Fixed scaling factor applied to the data covariance.
    Factor(f64),
}

impl Bandwidth {
    /// Kernel scaling factor for `n` samples in `d` dimensions.
    pub fn factor(self, n: usize, d: usize) -> f64 {
        let n = n as f64;
        let d = d as f64;
        match self {
            Self::Scott => n.powf(-1.0 / (d + 4.0)),
            Self::Silverman => (n * (d + 2.0) / 4.0).powf(-1.0 / (d + 4.0)),
            Self::Factor(f) => f,
        }
    }
}

impl fmt::Display for Bandwidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scott => write!(f, "scott"),
            Self::Silverman => write!(f, "silverman"),
            Self::Factor(v) => write!(f, "{}", v),
        }
    }
}

impl FromStr for Bandwidth {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scott" => Ok(Self::Scott),
            "silverman" => Ok(Self::Silverman),
            other => match other.parse::<f64>() {
                Ok(v) if v > 0.0 && v.is_finite() => Ok(Self::Factor(v)),
                _ => Err(ExplorerError::invalid_argument(format!(
                    "bandwidth must be 'scott', 'silverman' or a positive number, got '{}'",
                    s
                ))),
            },
        }
    }
}

/// Gaussian KDE fitted from two coordinate sequences.
#[derive(Debug, Clone)]
pub struct GaussianKde {
    /// Samples, shape (2, n).
    dataset: Array2<f64>,
    bandwidth: Bandwidth,
    factor: f64,
    /// Kernel covariance (data covariance scaled by `factor^2`).
    covariance: [[f64; 2]; 2],
    inv_cov: [[f64; 2]; 2],
    /// `1 / (2 pi sqrt(det))`, the kernel peak height.
    norm: f64,
}

impl GaussianKde {
    /// Fit a KDE with Scott's rule.
    pub fn new(x: &[f64], y: &[f64]) -> Result<Self> {
        Self::with_bandwidth(x, y, Bandwidth::Scott)
    }

    /// Fit a KDE with the given bandwidth rule.
    pub fn with_bandwidth(x: &[f64], y: &[f64], bandwidth: Bandwidth) -> Result<Self> {
        if x.len() != y.len() {
            return Err(ExplorerError::SampleLengthMismatch {
                x: x.len(),
                y: y.len(),
            });
        }
        let n = x.len();
        if n < 2 {
            return Err(ExplorerError::TooFewSamples(n));
        }

        let mut dataset = Array2::zeros((2, n));
        for (i, (&xi, &yi)) in x.iter().zip(y).enumerate() {
            dataset[[0, i]] = xi;
            dataset[[1, i]] = yi;
        }

        let data_cov = sample_covariance(&dataset);
        if data_cov.iter().flatten().any(|v| !v.is_finite()) {
            return Err(ExplorerError::NonFiniteCovariance);
        }

        let factor = bandwidth.factor(n, 2);
        let f2 = factor * factor;
        let mut covariance = [
            [data_cov[0][0] * f2, data_cov[0][1] * f2],
            [data_cov[1][0] * f2, data_cov[1][1] * f2],
        ];

        let scale = covariance[0][0].max(covariance[1][1]);
        let det = covariance[0][0] * covariance[1][1] - covariance[0][1] * covariance[1][0];
        if det <= scale * scale * f64::EPSILON * 16.0 {
            // Collinear or duplicated samples: widen the kernel slightly.
            let ridge = if scale > 0.0 { scale * SINGULAR_RIDGE } else { SINGULAR_RIDGE };
            tracing::warn!(det, ridge, "singular kernel covariance, adding ridge");
            covariance[0][0] += ridge;
            covariance[1][1] += ridge;
        }

        let det = covariance[0][0] * covariance[1][1] - covariance[0][1] * covariance[1][0];
        let inv_cov = [
            [covariance[1][1] / det, -covariance[0][1] / det],
            [-covariance[1][0] / det, covariance[0][0] / det],
        ];
        let norm = 1.0 / (2.0 * PI * det.sqrt());

        tracing::debug!(n, factor, ?covariance, "fitted gaussian kde");

        Ok(Self {
            dataset,
            bandwidth,
            factor,
            covariance,
            inv_cov,
            norm,
        })
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.dataset.len_of(Axis(1))
    }

    /// Whether the estimate holds no samples (never true for a fitted KDE).
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bandwidth rule used for fitting.
    pub fn bandwidth(&self) -> Bandwidth {
        self.bandwidth
    }

    /// Kernel scaling factor.
    pub fn factor(&self) -> f64 {
        self.factor
    }

    /// Kernel covariance matrix.
    pub fn covariance(&self) -> [[f64; 2]; 2] {
        self.covariance
    }

    /// Samples as a (2, n) array.
    pub fn dataset(&self) -> &Array2<f64> {
        &self.dataset
    }
}

impl DensityEstimator for GaussianKde {
    fn evaluate(&self, point: [f64; 2]) -> f64 {
        let [[a, b], [c, d]] = self.inv_cov;
        let sum: f64 = self
            .dataset
            .axis_iter(Axis(1))
            .map(|s| {
                let dx = point[0] - s[0];
                let dy = point[1] - s[1];
                let q = dx * (a * dx + b * dy) + dy * (c * dx + d * dy);
                (-0.5 * q).exp()
            })
            .sum();
        sum * self.norm / self.len() as f64
    }

    fn integrate_box(&self, lower: [f64; 2], upper: [f64; 2]) -> f64 {
        let (lower, upper) = normalize_box(lower, upper);
        let sx = self.covariance[0][0].sqrt();
        let sy = self.covariance[1][1].sqrt();
        let r = (self.covariance[0][1] / (sx * sy)).clamp(-1.0, 1.0);

        let total: f64 = self
            .dataset
            .axis_iter(Axis(1))
            .map(|s| {
                bvn_rectangle(
                    (lower[0] - s[0]) / sx,
                    (upper[0] - s[0]) / sx,
                    (lower[1] - s[1]) / sy,
                    (upper[1] - s[1]) / sy,
                    r,
                )
            })
            .sum();
        total / self.len() as f64
    }
}

/// Unbiased covariance of a (2, n) dataset.
fn sample_covariance(data: &Array2<f64>) -> [[f64; 2]; 2] {
    let n = data.len_of(Axis(1)) as f64;
    let mx = data.row(0).sum() / n;
    let my = data.row(1).sum() / n;
    let (mut sxx, mut sxy, mut syy) = (0.0, 0.0, 0.0);
    for s in data.axis_iter(Axis(1)) {
        let dx = s[0] - mx;
        let dy = s[1] - my;
        sxx += dx * dx;
        sxy += dx * dy;
        syy += dy * dy;
    }
    let denom = n - 1.0;
    [[sxx / denom, sxy / denom], [sxy / denom, syy / denom]]
}
