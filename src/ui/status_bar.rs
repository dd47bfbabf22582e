//! Status bar UI component.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::Style,
    widgets::Paragraph,
    Frame,
};

use super::formatters::display_width;
use super::ThemeColors;

/// Draw the status bar: a message on the left, session details on the right.
pub fn draw_status(f: &mut Frame<'_>, area: Rect, status: &str, details: &str, colors: &ThemeColors) {
    let style = Style::default().fg(colors.fg0).bg(colors.bg1);
    let width = (display_width(details) as u16 + 1).min(area.width);
    let [left, right] =
        Layout::horizontal([Constraint::Min(0), Constraint::Length(width)]).areas(area);

    f.render_widget(Paragraph::new(status).style(style), left);
    f.render_widget(
        Paragraph::new(details).style(style.fg(colors.aqua)),
        right,
    );
}
