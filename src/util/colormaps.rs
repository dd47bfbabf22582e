//! Colour maps for filled contour bands and contour lines.

use ratatui::style::Color;

/// Colour map used for contour levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorPalette {
    /// Viridis (perceptually uniform, colour-blind friendly).
    #[default]
    Viridis,
    /// Plasma (perceptually uniform).
    Plasma,
    /// Rainbow (high contrast).
    Rainbow,
    /// Blue-white-red diverging map.
    BlueRed,
}

impl ColorPalette {
    /// The palette after this one.
    pub fn next(self) -> Self {
        match self {
            Self::Viridis => Self::Plasma,
            Self::Plasma => Self::Rainbow,
            Self::Rainbow => Self::BlueRed,
            Self::BlueRed => Self::Viridis,
        }
    }

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Viridis => "Viridis",
            Self::Plasma => "Plasma",
            Self::Rainbow => "Rainbow",
            Self::BlueRed => "Blue-Red",
        }
    }

    /// Colour at `t` in `0.0..=1.0`; values outside are clamped.
    pub fn color(self, t: f64) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };

        match self {
            Self::Viridis => viridis_color(t),
            Self::Plasma => plasma_color(t),
            Self::Rainbow => rainbow_color(t),
            Self::BlueRed => bluered_color(t),
        }
    }

    /// Colour of level or band `index` out of `count`, spread over the map.
    pub fn level_color(self, index: usize, count: usize) -> Color {
        if count < 2 {
            return self.color(0.5);
        }
        self.color(index as f64 / (count - 1) as f64)
    }
}

/// Linear blend between two channel values.
fn lerp(a: f64, b: f64, t: f64) -> u8 {
    (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
}

/// Piecewise-linear map through three RGB stops at 0, 0.5 and 1.
fn three_stop(t: f64, stops: [[f64; 3]; 3]) -> Color {
    let (from, to, u) = if t < 0.5 {
        (stops[0], stops[1], t * 2.0)
    } else {
        (stops[1], stops[2], (t - 0.5) * 2.0)
    };
    Color::Rgb(
        lerp(from[0], to[0], u),
        lerp(from[1], to[1], u),
        lerp(from[2], to[2], u),
    )
}

/// Viridis approximation.
fn viridis_color(t: f64) -> Color {
    three_stop(t, [[68.0, 1.0, 84.0], [33.0, 145.0, 140.0], [253.0, 231.0, 37.0]])
}

/// Plasma approximation.
fn plasma_color(t: f64) -> Color {
    three_stop(t, [[13.0, 8.0, 135.0], [204.0, 71.0, 120.0], [240.0, 249.0, 33.0]])
}

/// Rainbow/Spectral colormap.
fn rainbow_color(t: f64) -> Color {
    // HSV to RGB conversion with H varying from 240° (blue) to 0° (red)
    let h = (1.0 - t) * 240.0;
    let s = 1.0;
    let v = 1.0;

    let c = v * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = v - c;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    Color::Rgb(
        ((r + m) * 255.0) as u8,
        ((g + m) * 255.0) as u8,
        ((b + m) * 255.0) as u8,
    )
}

/// Blue-white-red diverging map.
fn bluered_color(t: f64) -> Color {
    three_stop(t, [[59.0, 76.0, 192.0], [245.0, 245.0, 245.0], [180.0, 4.0, 38.0]])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_palette_cycle_returns_to_start() {
        let mut p = ColorPalette::default();
        for _ in 0..4 {
            p = p.next();
        }
        assert_eq!(p, ColorPalette::Viridis);
    }

    #[test]
    fn test_endpoints_and_clamping() {
        assert_eq!(ColorPalette::Viridis.color(0.0), Color::Rgb(68, 1, 84));
        assert_eq!(ColorPalette::Viridis.color(1.0), Color::Rgb(253, 231, 37));
        assert_eq!(ColorPalette::Viridis.color(7.0), ColorPalette::Viridis.color(1.0));
        assert_eq!(ColorPalette::BlueRed.color(0.5), Color::Rgb(245, 245, 245));
        assert_eq!(ColorPalette::Rainbow.color(0.0), Color::Rgb(0, 0, 255));
        assert_eq!(ColorPalette::Plasma.level_color(0, 1), ColorPalette::Plasma.color(0.5));
        assert_eq!(ColorPalette::Plasma.level_color(3, 4), ColorPalette::Plasma.color(1.0));
    }
}
