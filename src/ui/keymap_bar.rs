//! Keymap help bar UI component.

use ratatui::{layout::Rect, style::Style, widgets::Paragraph, Frame};

use super::ThemeColors;

/// Draw the keymap help bar.
pub fn draw_keymap(f: &mut Frame<'_>, area: Rect, profile_open: bool, colors: &ThemeColors) {
    let keymap_text = if profile_open {
        "click:point | e:extract | i:integrate | z/u:zoom/unzoom | n:close profile | y:copy profile | q:quit"
    } else {
        "click:point | e:extract | i:integrate | z/u:zoom/unzoom | n:new | c:clear | p:palette | t:theme | h:help | q:quit"
    };

    let paragraph =
        Paragraph::new(keymap_text).style(Style::default().fg(colors.gray).bg(colors.bg0));

    f.render_widget(paragraph, area);
}
