//! Recorded clicks and the two-click precondition.

/// A pointer click on the contour axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClickEvent {
    /// Mouse button id (1 = left, 2 = middle, 3 = right).
    pub button: u8,
    /// Terminal cell `(column, row)`, absent for scripted clicks.
    pub pixel: Option<(u16, u16)>,
    /// Data x coordinate.
    pub x: f64,
    /// Data y coordinate.
    pub y: f64,
}

impl ClickEvent {
    /// A left click at data coordinates with no screen position.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            button: 1,
            pixel: None,
            x,
            y,
        }
    }

    /// Data coordinates as a point.
    pub fn point(&self) -> [f64; 2] {
        [self.x, self.y]
    }
}

/// Outcome of checking the click buffer before a two-click operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClickCheck {
    /// Exactly two clicks, in click order.
    Pair(ClickEvent, ClickEvent),
    /// Fewer than two clicks.
    TooFew,
    /// More than two clicks.
    TooMany,
}

/// Classify the buffer for extract, integrate and zoom.
pub fn check_clicks(clicks: &[ClickEvent]) -> ClickCheck {
    match clicks {
        [a, b] => ClickCheck::Pair(*a, *b),
        [] | [_] => ClickCheck::TooFew,
        _ => ClickCheck::TooMany,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_sizes() {
        let c = ClickEvent::at(1.0, 2.0);
        assert_eq!(check_clicks(&[]), ClickCheck::TooFew);
        assert_eq!(check_clicks(&[c]), ClickCheck::TooFew);
        assert_eq!(check_clicks(&[c, c, c]), ClickCheck::TooMany);
        assert_eq!(check_clicks(&[c; 7]), ClickCheck::TooMany);

        let d = ClickEvent::at(3.0, 4.0);
        assert_eq!(check_clicks(&[c, d]), ClickCheck::Pair(c, d));
    }
}
