//! Shared formatting utilities for UI components.

use unicode_width::UnicodeWidthStr;

/// Format a value with smart precision.
pub fn format_value(val: f64) -> String {
    if !val.is_finite() {
        return if val.is_nan() {
            "NaN".to_string()
        } else if val.is_sign_positive() {
            "+Inf".to_string()
        } else {
            "-Inf".to_string()
        };
    }
    let abs_val = val.abs();
    if abs_val == 0.0 {
        "0".to_string()
    } else if !(1e-3..1e6).contains(&abs_val) {
        format!("{:.3e}", val)
    } else if abs_val >= 100.0 {
        format!("{:.2}", val)
    } else if abs_val >= 1.0 {
        format!("{:.4}", val)
    } else {
        format!("{:.5}", val)
    }
}

/// Format an axis tick label compactly.
pub fn format_axis_label(val: f64) -> String {
    if !val.is_finite() {
        return "?".to_string();
    }
    let abs_val = val.abs();
    if abs_val == 0.0 {
        "0".to_string()
    } else if !(1e-2..1e5).contains(&abs_val) {
        format!("{:.1e}", val)
    } else if abs_val >= 100.0 {
        format!("{:.0}", val)
    } else if abs_val >= 1.0 {
        format!("{:.1}", val)
    } else {
        format!("{:.2}", val)
    }
}

/// Right-align `text` in `width` display columns, truncating from the left
/// when it does not fit.
pub fn right_align(text: &str, width: usize) -> String {
    let w = text.width();
    if w >= width {
        let skip = text.chars().count().saturating_sub(width);
        return text.chars().skip(skip).collect();
    }
    format!("{}{}", " ".repeat(width - w), text)
}

/// Display width of `text` in terminal columns.
pub fn display_width(text: &str) -> usize {
    text.width()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(0.0), "0");
        assert_eq!(format_value(f64::NAN), "NaN");
        assert_eq!(format_value(0.0213), "0.02130");
        assert_eq!(format_value(12.5), "12.5000");
        assert_eq!(format_value(2.5e-5), "2.500e-5");
    }

    #[test]
    fn test_format_axis_label() {
        assert_eq!(format_axis_label(-1.24), "-1.2");
        assert_eq!(format_axis_label(250.0), "250");
        assert_eq!(format_axis_label(0.5), "0.50");
        assert_eq!(format_axis_label(f64::INFINITY), "?");
    }

    #[test]
    fn test_right_align() {
        assert_eq!(right_align("1.5", 6), "   1.5");
        assert_eq!(right_align("123456", 4), "3456");
        assert_eq!(display_width("µ"), 1);
    }
}
