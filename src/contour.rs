//! Contour geometry: level selection, marching squares and filled bands.

use std::fmt;
use std::str::FromStr;

use ndarray::Array2;

use crate::error::{ExplorerError, Result};

/// Number of intervals the automatic level picker aims for.
pub const AUTO_LEVEL_TARGET: usize = 7;

/// Contour level selection.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Levels {
    /// Pick "nice" levels spanning the data.
    #[default]
    Auto,
    /// Use exactly these levels.
    Explicit(Vec<f64>),
}

impl Levels {
    /// Concrete levels for data spanning `zmin..=zmax`, ascending.
    pub fn resolve(&self, zmin: f64, zmax: f64) -> Vec<f64> {
        match self {
            Self::Auto => auto_levels(zmin, zmax, AUTO_LEVEL_TARGET),
            Self::Explicit(levels) => {
                let mut levels: Vec<f64> = levels.iter().copied().filter(|l| l.is_finite()).collect();
                levels.sort_by(f64::total_cmp);
                levels.dedup();
                levels
            },
        }
    }
}

impl fmt::Display for Levels {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => write!(f, "Automatic"),
            Self::Explicit(levels) => write!(f, "{:?}", levels),
        }
    }
}

impl FromStr for Levels {
    type Err = ExplorerError;

    fn from_str(s: &str) -> Result<Self> {
        if s.trim().eq_ignore_ascii_case("auto") {
            return Ok(Self::Auto);
        }
        s.split(',')
            .map(|v| {
                v.trim().parse::<f64>().map_err(|_| {
                    ExplorerError::invalid_argument(format!("'{}' is not a contour level", v))
                })
            })
            .collect::<Result<Vec<_>>>()
            .map(Self::Explicit)
    }
}

/// Evenly stepped levels with a step of 1, 2, 2.5 or 5 times a power of ten,
/// covering `zmin..=zmax` in about `target` intervals.
pub fn auto_levels(zmin: f64, zmax: f64, target: usize) -> Vec<f64> {
    if !zmin.is_finite() || !zmax.is_finite() {
        return vec![];
    }
    if zmax <= zmin {
        return vec![zmin];
    }

    let raw = (zmax - zmin) / target.max(1) as f64;
    let magnitude = 10f64.powf(raw.log10().floor());
    let step = [1.0, 2.0, 2.5, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw)
        .unwrap_or(10.0 * magnitude);

    let start = (zmin / step).floor() * step;
    let end = (zmax / step).ceil() * step;
    let count = ((end - start) / step).round() as usize;
    (0..=count).map(|i| start + i as f64 * step).collect()
}

/// One straight piece of a contour line, in data coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContourSegment {
    /// Index into [`ContourSet::levels`].
    pub level: usize,
    /// Segment start.
    pub start: [f64; 2],
    /// Segment end.
    pub end: [f64; 2],
}

/// Contours of a density matrix over a (possibly uneven) grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ContourSet {
    x: Vec<f64>,
    y: Vec<f64>,
    /// Rows follow y, columns follow x.
    z_t: Array2<f64>,
    levels: Vec<f64>,
    filled: bool,
}

impl ContourSet {
    /// Build a contour set. `z_t` must have shape `(y.len(), x.len())`.
    pub fn new(
        x: Vec<f64>,
        y: Vec<f64>,
        z_t: Array2<f64>,
        levels: &Levels,
        filled: bool,
    ) -> Result<Self> {
        if z_t.dim() != (y.len(), x.len()) {
            return Err(ExplorerError::invalid_argument(format!(
                "density matrix is {:?} but the grid is {}x{} (y by x)",
                z_t.dim(),
                y.len(),
                x.len()
            )));
        }

        let (zmin, zmax) = z_t
            .iter()
            .filter(|v| v.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &v| {
                (min.min(v), max.max(v))
            });
        let mut levels = levels.resolve(zmin, zmax);
        if !filled {
            levels.retain(|l| *l >= zmin && *l <= zmax);
        }

        Ok(Self {
            x,
            y,
            z_t,
            levels,
            filled,
        })
    }

    /// Resolved levels, ascending.
    pub fn levels(&self) -> &[f64] {
        &self.levels
    }

    /// Whether bands between levels are filled.
    pub fn filled(&self) -> bool {
        self.filled
    }

    /// Number of filled bands.
    pub fn band_count(&self) -> usize {
        self.levels.len().saturating_sub(1)
    }

    /// Grid x coordinates.
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Grid y coordinates.
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Density matrix as rendered (rows follow y).
    pub fn z_t(&self) -> &Array2<f64> {
        &self.z_t
    }

    /// Bilinearly interpolated density at `(x, y)`, or `None` off the grid.
    pub fn value_at(&self, x: f64, y: f64) -> Option<f64> {
        let (i, tx) = locate(&self.x, x)?;
        let (j, ty) = locate(&self.y, y)?;
        let i1 = (i + 1).min(self.x.len() - 1);
        let j1 = (j + 1).min(self.y.len() - 1);

        let z00 = self.z_t[[j, i]];
        let z10 = self.z_t[[j, i1]];
        let z01 = self.z_t[[j1, i]];
        let z11 = self.z_t[[j1, i1]];
        let bottom = z00 + (z10 - z00) * tx;
        let top = z01 + (z11 - z01) * tx;
        Some(bottom + (top - bottom) * ty)
    }

    /// Filled band containing the density at `(x, y)`. Band `k` spans
    /// `levels[k]..levels[k + 1]`; the top level belongs to the last band.
    pub fn band_at(&self, x: f64, y: f64) -> Option<usize> {
        let v = self.value_at(x, y)?;
        let n = self.levels.len();
        if n < 2 || !v.is_finite() || v < self.levels[0] || v > self.levels[n - 1] {
            return None;
        }
        let idx = self.levels.partition_point(|l| *l <= v);
        Some(idx.saturating_sub(1).min(n - 2))
    }

    /// Contour line segments for every level (marching squares).
    pub fn segments(&self) -> Vec<ContourSegment> {
        let mut out = Vec::new();
        for (level_idx, &level) in self.levels.iter().enumerate() {
            self.march_level(level_idx, level, &mut out);
        }
        out
    }

    fn march_level(&self, level_idx: usize, level: f64, out: &mut Vec<ContourSegment>) {
        let (ny, nx) = self.z_t.dim();
        if nx < 2 || ny < 2 {
            return;
        }

        for j in 0..ny - 1 {
            for i in 0..nx - 1 {
                // Corner naming follows the matrix: "top" is row j.
                let tl = self.z_t[[j, i]];
                let tr = self.z_t[[j, i + 1]];
                let br = self.z_t[[j + 1, i + 1]];
                let bl = self.z_t[[j + 1, i]];
                if tl.is_nan() || tr.is_nan() || br.is_nan() || bl.is_nan() {
                    continue;
                }

                let mut case = 0u8;
                if tl >= level {
                    case |= 1;
                }
                if tr >= level {
                    case |= 2;
                }
                if br >= level {
                    case |= 4;
                }
                if bl >= level {
                    case |= 8;
                }
                if case == 0 || case == 15 {
                    continue;
                }

                let (x0, x1) = (self.x[i], self.x[i + 1]);
                let (y0, y1) = (self.y[j], self.y[j + 1]);
                let frac = |a: f64, b: f64| {
                    if (b - a).abs() < f64::EPSILON {
                        0.5
                    } else {
                        (level - a) / (b - a)
                    }
                };
                let top = [x0 + (x1 - x0) * frac(tl, tr), y0];
                let right = [x1, y0 + (y1 - y0) * frac(tr, br)];
                let bottom = [x0 + (x1 - x0) * frac(bl, br), y1];
                let left = [x0, y0 + (y1 - y0) * frac(tl, bl)];
                let center_high = (tl + tr + br + bl) / 4.0 >= level;

                let mut push = |start: [f64; 2], end: [f64; 2]| {
                    out.push(ContourSegment {
                        level: level_idx,
                        start,
                        end,
                    })
                };

                match case {
                    1 | 14 => push(left, top),
                    2 | 13 => push(top, right),
                    3 | 12 => push(left, right),
                    4 | 11 => push(right, bottom),
                    6 | 9 => push(top, bottom),
                    7 | 8 => push(left, bottom),
                    5 => {
                        if center_high {
                            push(top, right);
                            push(left, bottom);
                        } else {
                            push(left, top);
                            push(right, bottom);
                        }
                    },
                    10 => {
                        if center_high {
                            push(left, top);
                            push(right, bottom);
                        } else {
                            push(top, right);
                            push(left, bottom);
                        }
                    },
                    _ => {},
                }
            }
        }
    }
}

/// Find the interval of `axis` containing `v`: returns the lower index and
/// the fractional position inside the interval. Works for ascending and
/// descending axes.
fn locate(axis: &[f64], v: f64) -> Option<(usize, f64)> {
    let n = axis.len();
    if n == 0 || !v.is_finite() {
        return None;
    }
    if n == 1 {
        return (v == axis[0]).then_some((0, 0.0));
    }

    let ascending = axis[0] <= axis[n - 1];
    let (lo, hi) = if ascending {
        (axis[0], axis[n - 1])
    } else {
        (axis[n - 1], axis[0])
    };
    if v < lo || v > hi {
        return None;
    }

    let i = if ascending {
        axis.partition_point(|a| *a <= v)
    } else {
        axis.partition_point(|a| *a >= v)
    }
    .saturating_sub(1)
    .min(n - 2);

    let span = axis[i + 1] - axis[i];
    let t = if span == 0.0 { 0.0 } else { (v - axis[i]) / span };
    Some((i, t.clamp(0.0, 1.0)))
}
