//! Figure and axes model.
//!
//! A [`Figure`] is a headless drawing surface: the session adds artists and
//! sets axis limits, and the terminal UI renders whatever the figure holds.

use ratatui::layout::Rect;

use crate::contour::ContourSet;

/// What an overlay artist represents; the UI maps each to a colour and
/// line style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ink {
    /// A recorded click (red dot).
    Click,
    /// A raw sample point (black dot).
    Sample,
    /// The extraction line (solid green).
    Profile,
    /// An integration box edge (dotted black).
    IntegrationBox,
}

impl Ink {
    /// Whether lines in this ink are drawn dotted.
    pub fn dotted(self) -> bool {
        matches!(self, Self::IntegrationBox)
    }
}

/// Something drawn on the axes.
#[derive(Debug, Clone, PartialEq)]
pub enum Artist {
    /// Filled or line contours.
    Contours(ContourSet),
    /// Unconnected markers.
    Markers {
        /// Marker positions.
        points: Vec<[f64; 2]>,
        /// Marker meaning.
        ink: Ink,
    },
    /// Connected line through the points.
    Polyline {
        /// Vertices.
        points: Vec<[f64; 2]>,
        /// Line meaning.
        ink: Ink,
    },
}

/// A single set of axes.
///
/// Limits are stored exactly as given; a pair with `lo > hi` displays that
/// axis inverted.
#[derive(Debug, Clone, PartialEq)]
pub struct Axes {
    xlim: (f64, f64),
    ylim: (f64, f64),
    artists: Vec<Artist>,
}

impl Axes {
    /// Empty axes with the given limits.
    pub fn new(xlim: (f64, f64), ylim: (f64, f64)) -> Self {
        Self {
            xlim,
            ylim,
            artists: Vec::new(),
        }
    }

    /// Remove every artist; limits are kept.
    pub fn clear(&mut self) {
        self.artists.clear();
    }

    /// Add an artist on top of the existing ones.
    pub fn add(&mut self, artist: Artist) {
        self.artists.push(artist);
    }

    /// Artists in drawing order.
    pub fn artists(&self) -> &[Artist] {
        &self.artists
    }

    /// The first contour artist, if any.
    pub fn contours(&self) -> Option<&ContourSet> {
        self.artists.iter().find_map(|a| match a {
            Artist::Contours(set) => Some(set),
            _ => None,
        })
    }

    /// Set the visible x range.
    pub fn set_xlim(&mut self, lo: f64, hi: f64) {
        self.xlim = (lo, hi);
    }

    /// Set the visible y range.
    pub fn set_ylim(&mut self, lo: f64, hi: f64) {
        self.ylim = (lo, hi);
    }

    /// Visible x range.
    pub fn xlim(&self) -> (f64, f64) {
        self.xlim
    }

    /// Visible y range.
    pub fn ylim(&self) -> (f64, f64) {
        self.ylim
    }
}

/// A figure window holding one set of axes.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    /// Window title.
    pub title: String,
    /// The axes.
    pub axes: Axes,
}

impl Figure {
    /// New figure with empty axes.
    pub fn new(title: impl Into<String>, xlim: (f64, f64), ylim: (f64, f64)) -> Self {
        Self {
            title: title.into(),
            axes: Axes::new(xlim, ylim),
        }
    }
}

/// Mapping between terminal cells of a plot area and data coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Terminal cells covered by the axes.
    pub area: Rect,
    /// Data x range, left to right.
    pub xlim: (f64, f64),
    /// Data y range, bottom to top.
    pub ylim: (f64, f64),
}

impl Viewport {
    /// Viewport of `axes` drawn into `area`.
    pub fn new(area: Rect, axes: &Axes) -> Self {
        Self {
            area,
            xlim: axes.xlim(),
            ylim: axes.ylim(),
        }
    }

    /// Whether the terminal cell is inside the plot area.
    pub fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.area.x
            && col < self.area.x.saturating_add(self.area.width)
            && row >= self.area.y
            && row < self.area.y.saturating_add(self.area.height)
    }

    /// Data coordinates at the centre of a terminal cell.
    pub fn cell_to_data(&self, col: u16, row: u16) -> Option<[f64; 2]> {
        if !self.contains(col, row) {
            return None;
        }
        let u = (f64::from(col - self.area.x) + 0.5) / f64::from(self.area.width);
        let v = (f64::from(self.area.y + self.area.height - 1 - row) + 0.5)
            / f64::from(self.area.height);
        Some([
            self.xlim.0 + u * (self.xlim.1 - self.xlim.0),
            self.ylim.0 + v * (self.ylim.1 - self.ylim.0),
        ])
    }

    /// Position of a data point in unit coordinates: `(0, 0)` is the
    /// bottom-left of the plot, `(1, 1)` the top-right.
    pub fn data_to_unit(&self, p: [f64; 2]) -> [f64; 2] {
        [unit(p[0], self.xlim), unit(p[1], self.ylim)]
    }
}

fn unit(v: f64, (lo, hi): (f64, f64)) -> f64 {
    let span = hi - lo;
    if span == 0.0 {
        0.5
    } else {
        (v - lo) / span
    }
}

/// Clip a segment in unit coordinates to the unit square (Liang-Barsky).
pub fn clip_segment(a: [f64; 2], b: [f64; 2]) -> Option<([f64; 2], [f64; 2])> {
    let dx = b[0] - a[0];
    let dy = b[1] - a[1];
    let mut t0 = 0.0f64;
    let mut t1 = 1.0f64;

    for (p, q) in [(-dx, a[0]), (dx, 1.0 - a[0]), (-dy, a[1]), (dy, 1.0 - a[1])] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            t0 = t0.max(r);
        } else {
            t1 = t1.min(r);
        }
        if t0 > t1 {
            return None;
        }
    }

    Some((
        [a[0] + t0 * dx, a[1] + t0 * dy],
        [a[0] + t1 * dx, a[1] + t1 * dy],
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(xlim: (f64, f64), ylim: (f64, f64)) -> Viewport {
        Viewport {
            area: Rect::new(10, 5, 20, 10),
            xlim,
            ylim,
        }
    }

    #[test]
    fn test_cell_to_data_corners() {
        let vp = viewport((0.0, 20.0), (0.0, 10.0));
        assert_eq!(vp.cell_to_data(10, 14), Some([0.5, 0.5]));
        assert_eq!(vp.cell_to_data(29, 5), Some([19.5, 9.5]));
        assert_eq!(vp.cell_to_data(9, 5), None);
        assert_eq!(vp.cell_to_data(10, 15), None);
    }

    #[test]
    fn test_inverted_axis_maps_left_to_high_values() {
        let vp = viewport((20.0, 0.0), (0.0, 10.0));
        assert_eq!(vp.cell_to_data(10, 14), Some([19.5, 0.5]));
        assert_eq!(vp.data_to_unit([20.0, 0.0]), [0.0, 0.0]);
    }

    #[test]
    fn test_clip_segment() {
        assert_eq!(
            clip_segment([0.25, 0.25], [0.75, 0.75]),
            Some(([0.25, 0.25], [0.75, 0.75]))
        );
        let (a, b) = clip_segment([-1.0, 0.5], [2.0, 0.5]).unwrap();
        assert_eq!(a, [0.0, 0.5]);
        assert_eq!(b, [1.0, 0.5]);
        assert_eq!(clip_segment([1.5, 0.0], [1.5, 1.0]), None);
    }

    #[test]
    fn test_clear_keeps_limits() {
        let mut axes = Axes::new((0.0, 1.0), (0.0, 2.0));
        axes.add(Artist::Markers {
            points: vec![[0.5, 0.5]],
            ink: Ink::Click,
        });
        axes.set_xlim(3.0, -3.0);
        axes.clear();
        assert!(axes.artists().is_empty());
        assert_eq!(axes.xlim(), (3.0, -3.0));
        assert!(axes.contours().is_none());
    }
}
