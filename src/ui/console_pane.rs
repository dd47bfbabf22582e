//! Console pane: the tail of the session transcript.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::ThemeColors;
use crate::session::Console;

/// Draw the most recent console lines that fit in `area`.
pub fn draw_console(f: &mut Frame<'_>, area: Rect, console: &Console, colors: &ThemeColors) {
    let block = Block::default()
        .title(" Console ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.bg2))
        .title_style(Style::default().fg(colors.yellow))
        .style(Style::default().bg(colors.bg0));

    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line<'_>> = console
        .tail(visible)
        .iter()
        .map(|text| Line::styled(text.as_str(), line_style(text, colors)))
        .collect();

    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .style(Style::default().fg(colors.fg0)),
        area,
    );
}

fn line_style(text: &str, colors: &ThemeColors) -> Style {
    if text.starts_with("You did not click") || text.starts_with("You seem to have") {
        Style::default().fg(colors.orange)
    } else if text.starts_with("Is: ") {
        Style::default().fg(colors.aqua).add_modifier(Modifier::BOLD)
    } else if text.starts_with("You just pressed") || text.starts_with("You clicked") {
        Style::default().fg(colors.gray)
    } else {
        Style::default().fg(colors.fg0)
    }
}
