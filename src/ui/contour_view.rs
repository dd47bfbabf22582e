//! Contour figure view.
//!
//! Filled bands are painted as cell backgrounds straight from the retained
//! density; contour lines, markers and polylines go on a braille canvas in
//! unit coordinates so that inverted axis limits display correctly.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        canvas::{Canvas, Context, Line as CanvasLine, Points},
        Block, Borders, Paragraph,
    },
    Frame,
};

use super::formatters::{display_width, format_axis_label, right_align};
use super::ThemeColors;
use crate::contour::ContourSet;
use crate::figure::{clip_segment, Artist, Figure, Ink, Viewport};
use crate::util::{ColorPalette, LayoutConfig};

/// Draw the contour figure into `area`. Returns the viewport of the plot
/// area, or `None` when the area is too small to hold a plot.
pub fn draw_contour_view(
    f: &mut Frame<'_>,
    area: Rect,
    figure: &Figure,
    palette: ColorPalette,
    layout: &LayoutConfig,
    colors: &ThemeColors,
) -> Option<Viewport> {
    let contours = figure.axes.contours();
    let mode = match contours {
        Some(set) if set.filled() => "Filled",
        Some(_) => "Lines",
        None => "Empty",
    };
    let block = Block::default()
        .title(format!(" {} | {} | {} ", figure.title, mode, palette.name()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.bg2))
        .title_style(Style::default().fg(colors.yellow))
        .style(Style::default().bg(colors.bg0));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let reserved_rows = layout.legend_height + layout.x_label_height;
    if inner.width <= layout.y_label_width + 2 || inner.height <= reserved_rows + 2 {
        return None;
    }

    let plot = Rect {
        x: inner.x + layout.y_label_width,
        y: inner.y + layout.legend_height,
        width: inner.width - layout.y_label_width,
        height: inner.height - reserved_rows,
    };
    let viewport = Viewport::new(plot, &figure.axes);

    let canvas = Canvas::default()
        .background_color(colors.bg0)
        .marker(Marker::Braille)
        .x_bounds([0.0, 1.0])
        .y_bounds([0.0, 1.0])
        .paint(|ctx| paint_artists(ctx, figure, &viewport, palette, layout, colors));
    f.render_widget(canvas, plot);

    if let Some(set) = contours.filter(|set| set.filled()) {
        paint_bands(f, &viewport, set, palette);
    }
    if let Some(set) = contours {
        let legend = Rect {
            height: layout.legend_height,
            y: inner.y,
            ..plot
        };
        draw_legend(f, legend, set, palette, colors);
    }
    draw_axis_labels(f, &viewport, layout, colors);

    Some(viewport)
}

fn paint_artists(
    ctx: &mut Context<'_>,
    figure: &Figure,
    viewport: &Viewport,
    palette: ColorPalette,
    layout: &LayoutConfig,
    colors: &ThemeColors,
) {
    for artist in figure.axes.artists() {
        match artist {
            Artist::Contours(set) if !set.filled() => {
                let count = set.levels().len();
                for segment in set.segments() {
                    let color = palette.level_color(segment.level, count);
                    draw_segment(ctx, viewport, segment.start, segment.end, color, None);
                }
            },
            Artist::Contours(_) => {},
            Artist::Markers { points, ink } => {
                let inside: Vec<(f64, f64)> = points
                    .iter()
                    .map(|p| viewport.data_to_unit(*p))
                    .filter(|u| (0.0..=1.0).contains(&u[0]) && (0.0..=1.0).contains(&u[1]))
                    .map(|u| (u[0], u[1]))
                    .collect();
                match ink {
                    Ink::Click => {
                        ctx.layer();
                        for (x, y) in inside {
                            ctx.print(x, y, Span::styled("●", Style::default().fg(colors.red)));
                        }
                    },
                    _ => ctx.draw(&Points {
                        coords: &inside,
                        color: ink_color(*ink, colors),
                    }),
                }
            },
            Artist::Polyline { points, ink } => {
                let dashes = ink.dotted().then_some(layout.dash_density);
                for pair in points.windows(2) {
                    draw_segment(ctx, viewport, pair[0], pair[1], ink_color(*ink, colors), dashes);
                }
            },
        }
    }
}

fn ink_color(ink: Ink, colors: &ThemeColors) -> Color {
    match ink {
        Ink::Click => colors.red,
        Ink::Profile => colors.green,
        Ink::Sample | Ink::IntegrationBox => colors.ink,
    }
}

/// Draw a data-space segment clipped to the plot; `dashes` gives the number
/// of dashes per unit length for dotted lines.
fn draw_segment(
    ctx: &mut Context<'_>,
    viewport: &Viewport,
    a: [f64; 2],
    b: [f64; 2],
    color: Color,
    dashes: Option<f64>,
) {
    let Some((p, q)) = clip_segment(viewport.data_to_unit(a), viewport.data_to_unit(b)) else {
        return;
    };
    let at = |t: f64| [p[0] + (q[0] - p[0]) * t, p[1] + (q[1] - p[1]) * t];
    let line = |s: [f64; 2], e: [f64; 2]| CanvasLine {
        x1: s[0],
        y1: s[1],
        x2: e[0],
        y2: e[1],
        color,
    };

    match dashes {
        None => ctx.draw(&line(p, q)),
        Some(density) => {
            let length = (q[0] - p[0]).hypot(q[1] - p[1]);
            let pieces = 2 * ((length * density).ceil() as usize).max(1);
            for k in (0..pieces).step_by(2) {
                let t0 = k as f64 / pieces as f64;
                let t1 = (k + 1) as f64 / pieces as f64;
                ctx.draw(&line(at(t0), at(t1)));
            }
        },
    }
}

/// Colour each plot cell by the filled band under its centre. Only the
/// background is set so canvas glyphs stay visible on top.
fn paint_bands(f: &mut Frame<'_>, viewport: &Viewport, set: &ContourSet, palette: ColorPalette) {
    let area = viewport.area;
    let bands = set.band_count();
    let buf = f.buffer_mut();
    for row in area.top()..area.bottom() {
        for col in area.left()..area.right() {
            let Some([x, y]) = viewport.cell_to_data(col, row) else {
                continue;
            };
            let Some(band) = set.band_at(x, y) else {
                continue;
            };
            if let Some(cell) = buf.cell_mut((col, row)) {
                cell.set_bg(palette.level_color(band, bands));
            }
        }
    }
}

fn draw_legend(
    f: &mut Frame<'_>,
    area: Rect,
    set: &ContourSet,
    palette: ColorPalette,
    colors: &ThemeColors,
) {
    let levels = set.levels();
    let label = Style::default().fg(colors.green);
    let mut spans = Vec::new();

    match levels {
        [] => spans.push(Span::styled("no levels in range", Style::default().fg(colors.orange))),
        [first, .., last] if set.filled() => {
            let bands = set.band_count();
            spans.push(Span::styled(format!("{} ", format_axis_label(*first)), label));
            for band in 0..bands {
                spans.push(Span::styled(
                    "██",
                    Style::default().fg(palette.level_color(band, bands)),
                ));
            }
            spans.push(Span::styled(format!(" {}", format_axis_label(*last)), label));
        },
        _ => {
            spans.push(Span::styled("levels", label));
            for (i, level) in levels.iter().enumerate() {
                spans.push(Span::styled(
                    format!(" ─{}", format_axis_label(*level)),
                    Style::default().fg(palette.level_color(i, levels.len())),
                ));
            }
        },
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_axis_labels(
    f: &mut Frame<'_>,
    viewport: &Viewport,
    layout: &LayoutConfig,
    colors: &ThemeColors,
) {
    let plot = viewport.area;
    let style = Style::default().fg(colors.green);
    let label_width = layout.y_label_width.saturating_sub(1) as usize;
    let label_x = plot.x.saturating_sub(layout.y_label_width);
    let (y0, y1) = viewport.ylim;
    let (x0, x1) = viewport.xlim;
    let buf = f.buffer_mut();

    let bottom = plot.bottom() - 1;
    for (row, value) in [
        (plot.top(), y1),
        (plot.top() + plot.height / 2, (y0 + y1) / 2.0),
        (bottom, y0),
    ] {
        buf.set_string(label_x, row, right_align(&format_axis_label(value), label_width), style);
    }

    let row = plot.bottom();
    let left = format_axis_label(x0);
    let middle = format_axis_label((x0 + x1) / 2.0);
    let right = format_axis_label(x1);
    let right_x = plot.right().saturating_sub(display_width(&right) as u16);
    let middle_x = (plot.x + plot.width / 2).saturating_sub(display_width(&middle) as u16 / 2);

    buf.set_string(plot.x, row, &left, style);
    if middle_x > plot.x + display_width(&left) as u16 && middle_x + (display_width(&middle) as u16) < right_x
    {
        buf.set_string(middle_x, row, &middle, style);
    }
    buf.set_string(right_x, row, &right, style);
}
