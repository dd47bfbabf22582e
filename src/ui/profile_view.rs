//! Line profile view.
//!
//! The density along the extracted line is plotted against the sample
//! index. The bottom axis is labelled with the x coordinate of the samples
//! and a row above the chart carries the matching y coordinates.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    symbols::Marker,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use super::formatters::{display_width, format_axis_label, format_value};
use super::ThemeColors;
use crate::session::LineProfile;
use crate::util::LayoutConfig;

/// Draw `profile` into `area`.
pub fn draw_profile_view(
    f: &mut Frame<'_>,
    area: Rect,
    profile: &LineProfile,
    layout: &LayoutConfig,
    colors: &ThemeColors,
) {
    let title = format!(
        " Profile ({}, {}) → ({}, {}) | {} points ",
        format_axis_label(profile.start[0]),
        format_axis_label(profile.start[1]),
        format_axis_label(profile.end[0]),
        format_axis_label(profile.end[1]),
        profile.len()
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.bg2))
        .title_style(Style::default().fg(colors.yellow))
        .style(Style::default().bg(colors.bg0));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let series: Vec<(f64, f64)> = profile
        .densities
        .iter()
        .enumerate()
        .filter(|(_, d)| d.is_finite())
        .map(|(i, d)| (i as f64, *d))
        .collect();
    if series.is_empty() || inner.height < 4 {
        let para = Paragraph::new("No valid densities to display")
            .style(Style::default().fg(colors.fg0))
            .alignment(Alignment::Center);
        f.render_widget(para, inner);
        return;
    }

    let (y_min, y_max) = padded_bounds(&series);
    let y_labels = [
        format_value(y_min),
        format_value((y_min + y_max) / 2.0),
        format_value(y_max),
    ];
    let ticks = tick_indices(profile.len(), layout.profile_ticks);
    let x_labels: Vec<String> = ticks
        .iter()
        .map(|&i| format_axis_label(profile.points[i][0]))
        .collect();

    let [top_row, chart_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(3)]).areas(inner);

    // Chart puts the graph right of the widest y label plus the axis line.
    let graph_left = y_labels.iter().map(|l| display_width(l)).max().unwrap_or(0) as u16 + 1;
    draw_y_coordinate_row(f, top_row, graph_left, profile, &ticks, colors);

    let last = (profile.len().max(2) - 1) as f64;
    let datasets = vec![Dataset::default()
        .name("density")
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(colors.red))
        .data(&series)];

    let chart = Chart::new(datasets)
        .x_axis(
            Axis::default()
                .title("X")
                .style(Style::default().fg(colors.fg0))
                .bounds([0.0, last])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .title("density")
                .style(Style::default().fg(colors.fg0))
                .bounds([y_min, y_max])
                .labels(y_labels.to_vec()),
        );
    f.render_widget(chart, chart_area);
}

/// Y coordinates at the tick positions, aligned with the chart's x labels.
fn draw_y_coordinate_row(
    f: &mut Frame<'_>,
    area: Rect,
    graph_left: u16,
    profile: &LineProfile,
    ticks: &[usize],
    colors: &ThemeColors,
) {
    let style = Style::default().fg(colors.aqua);
    let buf = f.buffer_mut();
    buf.set_string(area.x, area.y, "Y", style.fg(colors.fg0));

    let graph_width = area.width.saturating_sub(graph_left);
    if graph_width < 2 || ticks.len() < 2 {
        return;
    }
    let span = (ticks.len() - 1) as f64;
    let mut next_free = area.x + 2;
    for (k, &i) in ticks.iter().enumerate() {
        let label = format_axis_label(profile.points[i][1]);
        let width = display_width(&label) as u16;
        let centre = area.x + graph_left + ((k as f64 / span) * f64::from(graph_width - 1)).round() as u16;
        let x = centre
            .saturating_sub(width / 2)
            .max(next_free)
            .min(area.right().saturating_sub(width));
        if x < next_free {
            continue;
        }
        buf.set_string(x, area.y, &label, style);
        next_free = x + width + 1;
    }
}

/// `count` indices spread evenly over `0..len`, first and last included.
fn tick_indices(len: usize, count: usize) -> Vec<usize> {
    match (len, count) {
        (0, _) | (_, 0) => Vec::new(),
        (1, _) | (_, 1) => vec![0],
        _ => {
            let count = count.min(len);
            let mut ticks: Vec<usize> = (0..count)
                .map(|k| ((k * (len - 1)) as f64 / (count - 1) as f64).round() as usize)
                .collect();
            ticks.dedup();
            ticks
        },
    }
}

/// Density range with a 15% margin; flat profiles get a margin of their own.
fn padded_bounds(series: &[(f64, f64)]) -> (f64, f64) {
    let (min, max) = series
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &(_, v)| {
            (min.min(v), max.max(v))
        });
    let mut padding = (max - min) * 0.15;
    if padding <= 0.0 {
        padding = max.abs().max(1e-12) * 0.1;
    }
    (min - padding, max + padding)
}
