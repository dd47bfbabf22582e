//! Application state and logic.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use crate::clipboard::copy_to_clipboard;
use crate::figure::Viewport;
use crate::session::{ClickEvent, Explorer, Outcome, SessionState};
use crate::ui::{format_value, Theme};
use crate::util::{ColorPalette, LayoutConfig};

/// Application state.
#[derive(Debug)]
pub struct App {
    /// The interactive session.
    pub explorer: Explorer,
    /// Current theme.
    pub theme: Theme,
    /// Colour map for contour levels.
    pub palette: ColorPalette,
    /// Pane sizes.
    pub layout: LayoutConfig,
    /// Where the plot was last drawn, for mapping mouse clicks.
    pub viewport: Option<Viewport>,
    /// Status message.
    pub status: String,
}

impl App {
    /// Create a new application around an explorer.
    pub fn new(explorer: Explorer) -> Self {
        Self {
            explorer,
            theme: Theme::default(),
            palette: ColorPalette::default(),
            layout: LayoutConfig::default(),
            viewport: None,
            status: "Click twice on the plot, then press a key. 'h' for help.".to_string(),
        }
    }

    /// Whether the session has ended.
    pub fn should_quit(&self) -> bool {
        self.explorer.state() == SessionState::Closed
    }

    /// Handle a mouse event. Only button presses inside the plot count.
    pub fn on_mouse(&mut self, event: MouseEvent) {
        let MouseEventKind::Down(button) = event.kind else {
            return;
        };
        let button_id = match button {
            MouseButton::Left => 1,
            MouseButton::Middle => 2,
            MouseButton::Right => 3,
        };

        let point = self
            .viewport
            .and_then(|vp| vp.cell_to_data(event.column, event.row));
        let Some([x, y]) = point else {
            tracing::debug!(col = event.column, row = event.row, "click outside the axes");
            self.status = "Click inside the plot to set a point.".to_string();
            return;
        };

        let click = ClickEvent {
            button: button_id,
            pixel: Some((event.column, event.row)),
            x,
            y,
        };
        match self.explorer.click(click) {
            Ok(()) => {
                self.status = format!(
                    "Point {} at ({}, {})",
                    self.explorer.clicks().len(),
                    format_value(x),
                    format_value(y)
                );
            },
            Err(e) => self.report(e),
        }
    }

    /// Handle a key press.
    pub fn on_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.explorer.quit();
            return;
        }

        let name = match key.code {
            KeyCode::Char(c) => c.to_string(),
            other => format!("{:?}", other),
        };
        match self.explorer.handle_key(&name) {
            Ok(outcome) => self.apply(outcome),
            Err(e) => self.report(e),
        }
    }

    fn apply(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Ignored => {},
            Outcome::Handled => {
                if let Some(last) = self.explorer.console().lines().last() {
                    self.status = last.clone();
                }
            },
            Outcome::Integral(value) => {
                self.status = format!("Integral: {}", format_value(value));
            },
            Outcome::CyclePalette => self.cycle_palette(),
            Outcome::CycleTheme => self.cycle_theme(),
            Outcome::CopyProfile(text) => match copy_to_clipboard(&text) {
                Ok(()) => self.status = "Profile copied!".to_string(),
                Err(e) => self.status = format!("Copy failed: {}", e),
            },
        }
    }

    fn report(&mut self, error: crate::error::ExplorerError) {
        tracing::error!("{}", error);
        self.explorer.console_mut().say(format!("Error: {}", error));
        self.status = format!("Error: {}", error);
    }

    /// Cycle to the next theme.
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next();
        self.status = format!("Theme: {}", self.theme.name());
    }

    /// Cycle to the next colour palette.
    pub fn cycle_palette(&mut self) {
        self.palette = self.palette.next();
        self.status = format!("Palette: {}", self.palette.name());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Samples;
    use crate::kde::Bandwidth;
    use crate::session::ExplorerOptions;
    use ratatui::layout::Rect;

    fn app() -> App {
        let samples = Samples::new(vec![0.0, 1.0, 2.0, 1.5], vec![0.0, 2.0, 1.0, 0.5]).unwrap();
        let mut explorer =
            Explorer::from_samples(samples, Bandwidth::Scott, ExplorerOptions::default()).unwrap();
        let axis = [0.0, 1.0, 2.0];
        explorer.contour(&axis, &axis).unwrap();
        explorer.open_session(10).unwrap();

        let mut app = App::new(explorer);
        let axes = &app.explorer.figure().unwrap().axes;
        app.viewport = Some(Viewport::new(Rect::new(10, 0, 20, 10), axes));
        app
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    #[test]
    fn test_click_maps_cell_to_data() {
        let mut app = app();
        app.on_mouse(mouse(MouseEventKind::Down(MouseButton::Right), 10, 9));
        let click = app.explorer.clicks()[0];
        assert_eq!(click.button, 3);
        assert_eq!(click.pixel, Some((10, 9)));
        assert!((click.x - 0.05).abs() < 1e-12);
        assert!((click.y - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_clicks_outside_plot_and_moves_are_ignored() {
        let mut app = app();
        app.on_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 2, 2));
        app.on_mouse(mouse(MouseEventKind::Moved, 12, 2));
        assert!(app.explorer.clicks().is_empty());
        assert_eq!(app.status, "Click inside the plot to set a point.");
    }

    #[test]
    fn test_integrate_through_keys() {
        let mut app = app();
        app.on_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 10, 9));
        app.on_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 29, 0));
        app.on_key(key('i'));
        assert!(app.status.starts_with("Integral: "));
        assert!(app.explorer.last_integral().unwrap() > 0.0);
        assert!(app.explorer.clicks().is_empty());
    }

    #[test]
    fn test_palette_theme_and_quit() {
        let mut app = app();
        app.on_key(key('p'));
        assert_eq!(app.palette, ColorPalette::Plasma);
        app.on_key(key('T'));
        assert_eq!(app.theme, Theme::GruvboxLight);

        app.on_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE));
        assert_eq!(app.status, "The key you pressed is inactive.");
        assert!(!app.should_quit());

        app.on_key(key('q'));
        assert!(app.should_quit());
        assert_eq!(app.status, "ByeBye");
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app();
        app.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
    }
}
