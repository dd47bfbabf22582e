//! User interface rendering.

mod console_pane;
mod contour_view;
mod formatters;
mod keymap_bar;
mod profile_view;
mod status_bar;
mod theme;

use ratatui::{
    layout::{Alignment, Constraint, Layout},
    style::Style,
    widgets::{Block, Paragraph},
    Frame,
};

use crate::app::App;

pub use formatters::{format_axis_label, format_value};
pub use theme::{Theme, ThemeColors};

/// Draw the UI and remember where the plot landed for mouse mapping.
pub fn draw(f: &mut Frame<'_>, app: &mut App) {
    let colors = ThemeColors::from_theme(app.theme);
    f.render_widget(Block::default().style(Style::default().bg(colors.bg0)), f.area());

    let [plot_row, console_area, status_area, keymap_area] = Layout::vertical([
        Constraint::Min(6),
        Constraint::Length(app.layout.console_height),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(f.area());

    let explorer = &app.explorer;
    let (figure_area, profile_area) = match explorer.profile() {
        Some(_) => {
            let right = app.layout.profile_width_percent.min(90);
            let [left, right] = Layout::horizontal([
                Constraint::Percentage(100 - right),
                Constraint::Percentage(right),
            ])
            .areas(plot_row);
            (left, Some(right))
        },
        None => (plot_row, None),
    };

    let viewport = match explorer.figure() {
        Some(figure) => contour_view::draw_contour_view(
            f,
            figure_area,
            figure,
            app.palette,
            &app.layout,
            &colors,
        ),
        None => {
            let para = Paragraph::new("No contour figure is open")
                .style(Style::default().fg(colors.gray))
                .alignment(Alignment::Center);
            f.render_widget(para, figure_area);
            None
        },
    };
    if let (Some(profile), Some(area)) = (explorer.profile(), profile_area) {
        profile_view::draw_profile_view(f, area, profile, &app.layout, &colors);
    }

    console_pane::draw_console(f, console_area, explorer.console(), &colors);
    let details = format!(
        "clicks: {} | {} | {} ",
        explorer.clicks().len(),
        explorer.state(),
        app.theme.name()
    );
    status_bar::draw_status(f, status_area, &app.status, &details, &colors);
    keymap_bar::draw_keymap(f, keymap_area, explorer.profile().is_some(), &colors);

    app.viewport = viewport;
}
