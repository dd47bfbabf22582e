//! Interactive session controller.
//!
//! [`Explorer`] owns everything an interactive KDE session needs: the
//! estimator, the retained density grid, the contour figure, the optional
//! profile figure, the click buffer and the console transcript. Front-ends
//! forward clicks and key presses to it and render whatever it holds.

mod clicks;
mod command;
mod console;
mod profile;

pub use clicks::{check_clicks, ClickCheck, ClickEvent};
pub use command::{Command, HELP_LINES};
pub use console::Console;
pub use profile::{sample_segment, LineProfile};

use std::fmt;

use ndarray::Array2;
use tracing::{debug, info};

use crate::contour::{ContourSet, Levels};
use crate::data::Samples;
use crate::error::{ExplorerError, Result};
use crate::figure::{Artist, Figure, Ink};
use crate::grid::{evaluate_grid, DensityGrid};
use crate::kde::{Bandwidth, DensityEstimator, ExplorerInput, GaussianKde, InputMode};

/// Title of the main contour figure.
pub const CONTOUR_TITLE: &str = "Kernel density";

/// Default number of points sampled along an extracted line.
pub const DEFAULT_SAMPLING: usize = 100;

/// Display options fixed at construction and changed through [`Explorer::update`].
#[derive(Debug, Clone, PartialEq)]
pub struct ExplorerOptions {
    /// Filled contours (`true`) or contour lines.
    pub filled: bool,
    /// Draw the raw samples on top of the contours.
    pub overlay_samples: bool,
    /// Contour levels.
    pub levels: Levels,
    /// Points sampled along an extracted line.
    pub sampling: usize,
}

impl Default for ExplorerOptions {
    fn default() -> Self {
        Self {
            filled: true,
            overlay_samples: false,
            levels: Levels::Auto,
            sampling: DEFAULT_SAMPLING,
        }
    }
}

/// Parameter changes for [`Explorer::update`]. `None` leaves a field alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateParams {
    /// New x grid vector.
    pub x_vec: Option<Vec<f64>>,
    /// New y grid vector.
    pub y_vec: Option<Vec<f64>>,
    /// New fill mode.
    pub filled: Option<bool>,
    /// New sample overlay mode.
    pub overlay_samples: Option<bool>,
    /// New contour levels.
    pub levels: Option<Levels>,
}

/// Everything needed to draw the contours elsewhere.
#[derive(Debug, Clone, PartialEq)]
pub struct ContourData {
    /// X grid vector.
    pub x: Vec<f64>,
    /// Y grid vector.
    pub y: Vec<f64>,
    /// Density matrix, rows following y.
    pub z_t: Array2<f64>,
    /// Configured levels.
    pub levels: Levels,
    /// Raw samples, absent when the explorer wraps a pre-built estimator.
    pub samples: Option<Samples>,
}

/// Lifecycle of the interactive session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No handlers attached.
    Idle,
    /// Clicks and keys are being processed.
    Listening,
    /// The user quit; figures are closed.
    Closed,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Listening => write!(f, "listening"),
            Self::Closed => write!(f, "closed"),
        }
    }
}

/// What the front-end should do after a key press.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The session handled the key.
    Handled,
    /// The session is not listening; nothing happened.
    Ignored,
    /// A box integral was computed.
    Integral(f64),
    /// Switch to the next colour palette.
    CyclePalette,
    /// Switch to the next UI theme.
    CycleTheme,
    /// Copy this text (the current profile) to the clipboard.
    CopyProfile(String),
}

/// Interactive KDE explorer.
#[derive(Debug)]
pub struct Explorer<E: DensityEstimator = GaussianKde> {
    estimator: E,
    mode: InputMode,
    samples: Option<Samples>,
    x_vec: Vec<f64>,
    y_vec: Vec<f64>,
    filled: bool,
    overlay_samples: bool,
    levels: Levels,
    grid: Option<DensityGrid>,
    figure: Option<Figure>,
    profile: Option<LineProfile>,
    clicks: Vec<ClickEvent>,
    sampling: usize,
    state: SessionState,
    last_integral: Option<f64>,
    console: Console,
}

impl Explorer<GaussianKde> {
    /// Build an explorer from raw samples or a fitted Gaussian KDE.
    pub fn new(input: ExplorerInput<GaussianKde>, options: ExplorerOptions) -> Result<Self> {
        match input {
            ExplorerInput::Samples { x, y, bandwidth } => {
                Self::from_samples(Samples::new(x, y)?, bandwidth, options)
            },
            ExplorerInput::Estimator(kde) => Ok(Self::from_estimator(kde, options)),
        }
    }

    /// Fit a Gaussian KDE to `samples` and keep them for overlay plotting.
    pub fn from_samples(
        samples: Samples,
        bandwidth: Bandwidth,
        options: ExplorerOptions,
    ) -> Result<Self> {
        let kde = GaussianKde::with_bandwidth(&samples.x, &samples.y, bandwidth)?;
        info!(
            samples = samples.len(),
            bandwidth = %bandwidth,
            factor = kde.factor(),
            "fitted gaussian kde"
        );
        let mut explorer = Self::with_parts(kde, InputMode::Samples, options);
        explorer.samples = Some(samples);
        Ok(explorer)
    }
}

impl<E: DensityEstimator> Explorer<E> {
    /// Wrap a pre-built estimator. There are no samples to overlay.
    pub fn from_estimator(estimator: E, options: ExplorerOptions) -> Self {
        Self::with_parts(estimator, InputMode::Estimator, options)
    }

    fn with_parts(estimator: E, mode: InputMode, options: ExplorerOptions) -> Self {
        Self {
            estimator,
            mode,
            samples: None,
            x_vec: Vec::new(),
            y_vec: Vec::new(),
            filled: options.filled,
            overlay_samples: options.overlay_samples,
            levels: options.levels,
            grid: None,
            figure: None,
            profile: None,
            clicks: Vec::new(),
            sampling: options.sampling,
            state: SessionState::Idle,
            last_integral: None,
            console: Console::new(),
        }
    }

    // ---- rendering -------------------------------------------------------

    /// Evaluate the density over `x` by `y`, retain it and return it
    /// without drawing.
    pub fn contour_data(&mut self, x: &[f64], y: &[f64]) -> Result<ContourData> {
        self.evaluate(x, y)?;
        let grid = self.grid.as_ref().ok_or(ExplorerError::NoContour)?;
        Ok(ContourData {
            x: grid.x.clone(),
            y: grid.y.clone(),
            z_t: grid.transposed(),
            levels: self.levels.clone(),
            samples: self.samples.clone(),
        })
    }

    /// Evaluate the density over `x` by `y`, retain it and draw it. The
    /// contour figure is created on first use and cleared afterwards.
    pub fn contour(&mut self, x: &[f64], y: &[f64]) -> Result<()> {
        self.evaluate(x, y)?;
        self.render()
    }

    /// Redraw the contour figure from the retained grid and display state.
    pub fn render(&mut self) -> Result<()> {
        let grid = self.grid.as_ref().ok_or(ExplorerError::NoContour)?;
        let set = ContourSet::new(
            grid.x.clone(),
            grid.y.clone(),
            grid.transposed(),
            &self.levels,
            self.filled,
        )?;
        let (xlim, ylim) = (grid.x_extent(), grid.y_extent());

        let figure = self
            .figure
            .get_or_insert_with(|| Figure::new(CONTOUR_TITLE, xlim, ylim));
        figure.axes.clear();
        figure.axes.set_xlim(xlim.0, xlim.1);
        figure.axes.set_ylim(ylim.0, ylim.1);
        figure.axes.add(Artist::Contours(set));

        if self.overlay_samples {
            if let Some(samples) = &self.samples {
                figure.axes.add(Artist::Markers {
                    points: samples.points(),
                    ink: Ink::Sample,
                });
            }
        }
        debug!(filled = self.filled, levels = %self.levels, "rendered contours");
        Ok(())
    }

    /// Close both figures and draw again with the current grid vectors.
    /// The session drops back to idle; open it again to keep exploring.
    pub fn replot(&mut self) -> Result<()> {
        self.figure = None;
        self.profile = None;
        self.clicks.clear();
        self.state = SessionState::Idle;

        let stale = self
            .grid
            .as_ref()
            .map_or(true, |g| g.x != self.x_vec || g.y != self.y_vec);
        if stale {
            let (x, y) = (self.x_vec.clone(), self.y_vec.clone());
            self.evaluate(&x, &y)?;
        } else {
            debug!("grid vectors unchanged, reusing retained density");
        }
        self.render()
    }

    fn evaluate(&mut self, x: &[f64], y: &[f64]) -> Result<()> {
        let grid = evaluate_grid(&self.estimator, x, y)?;
        self.x_vec = grid.x.clone();
        self.y_vec = grid.y.clone();
        self.grid = Some(grid);
        Ok(())
    }

    // ---- session ---------------------------------------------------------

    /// Start listening for clicks and keys. Needs a rendered contour.
    pub fn open_session(&mut self, sampling: usize) -> Result<()> {
        if self.figure.is_none() {
            return Err(ExplorerError::NoContour);
        }
        if sampling < 2 {
            return Err(ExplorerError::invalid_argument(format!(
                "sampling must be at least 2, got {}",
                sampling
            )));
        }
        self.console
            .say("--------------This is an interactive KDE Analyzer--------------");
        self.console
            .say("You can extract a vector or integrate over a rectangular box");
        self.console
            .say("Choose a vector or box by clicking on the KDE.");
        self.console.say("Press 'h' to see all options.");
        self.clicks.clear();
        self.sampling = sampling;
        self.state = SessionState::Listening;
        info!(sampling, "interactive session opened");
        Ok(())
    }

    /// Record a click and mark it on the contour figure.
    pub fn click(&mut self, event: ClickEvent) -> Result<()> {
        if self.state != SessionState::Listening {
            debug!(?event, "click outside an interactive session ignored");
            return Ok(());
        }
        let figure = self.figure.as_mut().ok_or(ExplorerError::NoContour)?;
        self.console.say(format!(
            "You clicked at x,y coordinates: {},{}",
            event.x, event.y
        ));
        figure.axes.add(Artist::Markers {
            points: vec![event.point()],
            ink: Ink::Click,
        });
        self.clicks.push(event);
        Ok(())
    }

    /// Handle a key press by name: a single character, or a named key such
    /// as `Esc`.
    pub fn handle_key(&mut self, key: &str) -> Result<Outcome> {
        if self.state != SessionState::Listening {
            debug!(key, "key outside an interactive session ignored");
            return Ok(Outcome::Ignored);
        }
        self.console.say(format!("You just pressed: {}", key));
        self.dispatch(Command::from_key(key))
    }

    /// Run a command.
    pub fn dispatch(&mut self, command: Command) -> Result<Outcome> {
        if self.state != SessionState::Listening {
            return Ok(Outcome::Ignored);
        }
        debug!(%command, clicks = self.clicks.len(), "dispatching");
        if command.needs_two_clicks() && self.click_pair().is_none() {
            return Ok(Outcome::Handled);
        }

        match command {
            Command::Quit => self.quit(),
            Command::Extract => self.extract()?,
            Command::NewVector => self.new_vector(),
            Command::Clear => self.clear_plot()?,
            Command::Integrate => {
                return Ok(self
                    .integrate()?
                    .map_or(Outcome::Handled, Outcome::Integral));
            },
            Command::Help => self.help(),
            Command::Zoom => self.zoom()?,
            Command::Unzoom => self.unzoom()?,
            Command::Palette => return Ok(Outcome::CyclePalette),
            Command::Theme => return Ok(Outcome::CycleTheme),
            Command::CopyProfile => match &self.profile {
                Some(profile) => {
                    self.console.say("Copied the profile to the clipboard.");
                    return Ok(Outcome::CopyProfile(profile.to_tsv()));
                },
                None => self.console.say("There is no profile to copy, press 'e' first."),
            },
            Command::Inactive(_) => self.console.say("The key you pressed is inactive."),
        }
        Ok(Outcome::Handled)
    }

    /// Take the two buffered clicks, or warn and flush the buffer.
    fn click_pair(&mut self) -> Option<(ClickEvent, ClickEvent)> {
        match check_clicks(&self.clicks) {
            ClickCheck::Pair(a, b) => Some((a, b)),
            ClickCheck::TooFew => {
                self.console.say("You did not click often enough, try again!");
                self.console.say("Flushing coordinates");
                self.clicks.clear();
                None
            },
            ClickCheck::TooMany => {
                self.console.say("You seem to have clicked too often.");
                self.console.say("Flushing coordinates....");
                self.clicks.clear();
                None
            },
        }
    }

    /// Sample the density along the line between the two buffered clicks.
    /// The clicks stay buffered.
    pub fn extract(&mut self) -> Result<()> {
        let Some((a, b)) = self.click_pair() else {
            return Ok(());
        };
        let figure = self.figure.as_mut().ok_or(ExplorerError::NoContour)?;
        figure.axes.add(Artist::Polyline {
            points: vec![a.point(), b.point()],
            ink: Ink::Profile,
        });

        self.console.say("Sampling along the following vector:");
        self.console.say(format!("Starting Point:{},{}", a.x, a.y));
        self.console.say(format!("End Point:{},{}", b.x, b.y));
        self.console.say(format!("Sampling is {}", self.sampling));

        let profile = LineProfile::extract(&self.estimator, a.point(), b.point(), self.sampling);
        debug!(points = profile.len(), "extracted profile");
        self.profile = Some(profile);

        self.console.say("There you go!");
        self.console
            .say("Press 'n' to close this plot and see another vector.");
        self.console.say("Press 'q' to stop extracting vectors!");
        Ok(())
    }

    /// Integrate the density over the box spanned by the two buffered
    /// clicks. Returns `None` when the buffer did not hold exactly two.
    pub fn integrate(&mut self) -> Result<Option<f64>> {
        let Some((a, b)) = self.click_pair() else {
            return Ok(None);
        };
        let figure = self.figure.as_mut().ok_or(ExplorerError::NoContour)?;
        figure.axes.add(Artist::Polyline {
            points: vec![
                [a.x, a.y],
                [b.x, a.y],
                [b.x, b.y],
                [a.x, b.y],
                [a.x, a.y],
            ],
            ink: Ink::IntegrationBox,
        });

        let result = self.estimator.integrate_box(a.point(), b.point()).abs();
        self.console.say("The integral over the following box:");
        self.console.say(format!(
            "startx,starty/endx,endy = [{}, {}],[{}, {}]",
            a.x, a.y, b.x, b.y
        ));
        self.console.say(format!("Is: {}", result));
        self.console.say("Flushing coordinates...");
        self.clicks.clear();
        self.last_integral = Some(result);
        Ok(Some(result))
    }

    /// Set the axis limits to the two buffered clicks, in click order.
    /// Clicking right-to-left or top-to-bottom inverts that axis.
    pub fn zoom(&mut self) -> Result<()> {
        let Some((a, b)) = self.click_pair() else {
            return Ok(());
        };
        let figure = self.figure.as_mut().ok_or(ExplorerError::NoContour)?;
        figure.axes.set_xlim(a.x, b.x);
        figure.axes.set_ylim(a.y, b.y);
        self.console.say("Zoomed, press 'u' to unzoom.");
        self.console.say("Flushing coordinates...");
        self.clicks.clear();
        Ok(())
    }

    /// Reset the axis limits to the extent of the grid vectors.
    pub fn unzoom(&mut self) -> Result<()> {
        let grid = self.grid.as_ref().ok_or(ExplorerError::NoContour)?;
        let figure = self.figure.as_mut().ok_or(ExplorerError::NoContour)?;
        let (x0, x1) = grid.x_extent();
        let (y0, y1) = grid.y_extent();
        figure.axes.set_xlim(x0, x1);
        figure.axes.set_ylim(y0, y1);
        self.console.say("Unzoomed.");
        Ok(())
    }

    /// Forget the buffered clicks and close the profile, if one is open.
    pub fn new_vector(&mut self) {
        self.console.say("You pressed 'n/N'");
        self.console.say("Define a new vector.");
        if self.profile.take().is_some() {
            debug!("closed profile");
        }
        self.clicks.clear();
    }

    /// Clear the contour axes and redraw them from retained state.
    pub fn clear_plot(&mut self) -> Result<()> {
        self.render()
    }

    /// Print the key bindings.
    pub fn help(&mut self) {
        for line in HELP_LINES {
            self.console.say(*line);
        }
    }

    /// End the session and close both figures.
    pub fn quit(&mut self) {
        self.state = SessionState::Closed;
        self.figure = None;
        self.profile = None;
        self.clicks.clear();
        self.console.say("ByeBye");
        info!("interactive session closed");
    }

    // ---- parameters ------------------------------------------------------

    /// Apply the fields that are set. Nothing is redrawn; call
    /// [`Explorer::replot`] afterwards.
    pub fn update(&mut self, params: UpdateParams) {
        let mut updated = false;
        if let Some(x) = params.x_vec {
            self.x_vec = x;
            self.console
                .say(format!("Updated x_vec to: {}", format_vector(&self.x_vec)));
            updated = true;
        }
        if let Some(y) = params.y_vec {
            self.y_vec = y;
            self.console
                .say(format!("Updated y_vec to: {}", format_vector(&self.y_vec)));
            updated = true;
        }
        if let Some(filled) = params.filled {
            self.filled = filled;
            self.console.say(format!("Updated filled to: {}", filled));
            updated = true;
        }
        if let Some(overlay) = params.overlay_samples {
            self.overlay_samples = overlay;
            self.console
                .say(format!("Updated overlay_samples to: {}", overlay));
            updated = true;
        }
        if let Some(levels) = params.levels {
            self.levels = levels;
            self.console
                .say(format!("Updated levels to: {}", self.levels));
            updated = true;
        }
        if !updated {
            self.console.say("Nothing updated.");
        }
    }

    /// Print the current parameters.
    pub fn info(&mut self) {
        let lines = [
            "-------Current explorer parameters-------".to_string(),
            format!("input mode: {}", self.mode),
            format!("filled contours: {}", self.filled),
            format!("overlay samples: {}", self.overlay_samples),
            format!("x_vec: {}", format_vector(&self.x_vec)),
            format!("y_vec: {}", format_vector(&self.y_vec)),
            format!("levels: {}", self.levels),
            format!("sampling: {}", self.sampling),
            format!("session: {}", self.state),
        ];
        for line in lines {
            self.console.say(line);
        }
    }

    // ---- accessors -------------------------------------------------------

    /// The density estimator.
    pub fn estimator(&self) -> &E {
        &self.estimator
    }

    /// How the estimator was obtained.
    pub fn mode(&self) -> InputMode {
        self.mode
    }

    /// Raw samples, when fitted from data.
    pub fn samples(&self) -> Option<&Samples> {
        self.samples.as_ref()
    }

    /// Pending x grid vector.
    pub fn x_vec(&self) -> &[f64] {
        &self.x_vec
    }

    /// Pending y grid vector.
    pub fn y_vec(&self) -> &[f64] {
        &self.y_vec
    }

    /// Whether contours are filled.
    pub fn filled(&self) -> bool {
        self.filled
    }

    /// Whether raw samples are overlaid.
    pub fn overlay_samples(&self) -> bool {
        self.overlay_samples
    }

    /// Configured contour levels.
    pub fn levels(&self) -> &Levels {
        &self.levels
    }

    /// Retained density grid.
    pub fn grid(&self) -> Option<&DensityGrid> {
        self.grid.as_ref()
    }

    /// The contour figure, while open.
    pub fn figure(&self) -> Option<&Figure> {
        self.figure.as_ref()
    }

    /// The extracted profile, while open.
    pub fn profile(&self) -> Option<&LineProfile> {
        self.profile.as_ref()
    }

    /// Buffered clicks.
    pub fn clicks(&self) -> &[ClickEvent] {
        &self.clicks
    }

    /// Points sampled per extracted line.
    pub fn sampling(&self) -> usize {
        self.sampling
    }

    /// Session lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Most recent box integral.
    pub fn last_integral(&self) -> Option<f64> {
        self.last_integral
    }

    /// Console transcript.
    pub fn console(&self) -> &Console {
        &self.console
    }

    /// Mutable console, for front-end notices.
    pub fn console_mut(&mut self) -> &mut Console {
        &mut self.console
    }
}

/// Short rendering of a grid vector for the console.
fn format_vector(values: &[f64]) -> String {
    const SHOWN: usize = 3;
    match values {
        [] => "(unset)".to_string(),
        v if v.len() <= 2 * SHOWN => format!("{:?}", v),
        v => {
            let head: Vec<String> = v[..SHOWN].iter().map(f64::to_string).collect();
            let tail: Vec<String> = v[v.len() - SHOWN..].iter().map(f64::to_string).collect();
            format!("[{}, ..., {}] ({} values)", head.join(", "), tail.join(", "), v.len())
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kde::normalize_box;

    /// Density `x + y` on the unit square, zero elsewhere.
    #[derive(Debug)]
    struct Ramp;

    impl DensityEstimator for Ramp {
        fn evaluate(&self, p: [f64; 2]) -> f64 {
            p[0] + p[1]
        }

        fn integrate_box(&self, lower: [f64; 2], upper: [f64; 2]) -> f64 {
            let (lo, hi) = normalize_box(lower, upper);
            let (w, h) = (hi[0] - lo[0], hi[1] - lo[1]);
            0.5 * (hi[0] * hi[0] - lo[0] * lo[0]) * h + 0.5 * (hi[1] * hi[1] - lo[1] * lo[1]) * w
        }
    }

    const AXIS: [f64; 4] = [0.0, 1.0, 2.0, 3.0];

    fn diagonal_explorer() -> Explorer {
        let samples = Samples::new(AXIS.to_vec(), AXIS.to_vec()).unwrap();
        let mut explorer =
            Explorer::from_samples(samples, Bandwidth::Scott, ExplorerOptions::default()).unwrap();
        explorer.contour(&AXIS, &AXIS).unwrap();
        explorer.open_session(4).unwrap();
        explorer
    }

    fn listening<E: DensityEstimator>(estimator: E) -> Explorer<E> {
        let mut explorer = Explorer::from_estimator(estimator, ExplorerOptions::default());
        explorer.contour(&[0.0, 1.0, 2.0], &[0.0, 1.0, 2.0]).unwrap();
        explorer.open_session(DEFAULT_SAMPLING).unwrap();
        explorer
    }

    fn click_at<E: DensityEstimator>(explorer: &mut Explorer<E>, points: &[[f64; 2]]) {
        for p in points {
            explorer.click(ClickEvent::at(p[0], p[1])).unwrap();
        }
    }

    #[test]
    fn test_end_to_end_extract() {
        let mut explorer = diagonal_explorer();
        click_at(&mut explorer, &[[0.0, 0.0], [3.0, 3.0]]);
        explorer.handle_key("e").unwrap();

        let profile = explorer.profile().unwrap();
        assert_eq!(
            profile.points,
            vec![[0.0, 0.0], [1.0, 1.0], [2.0, 2.0], [3.0, 3.0]]
        );
        assert_eq!(profile.densities.len(), 4);
        assert!(profile.densities.iter().all(|d| d.is_finite() && *d >= 0.0));
        for (p, d) in profile.points.iter().zip(&profile.densities) {
            assert_eq!(*d, explorer.estimator().evaluate(*p));
        }
        assert_eq!(explorer.clicks().len(), 2);
        assert!(explorer.console().lines().iter().any(|l| l == "Sampling is 4"));
    }

    #[test]
    fn test_end_to_end_integrate() {
        let mut explorer = diagonal_explorer();
        click_at(&mut explorer, &[[0.0, 0.0], [2.0, 2.0]]);
        let outcome = explorer.handle_key("i").unwrap();

        let value = match outcome {
            Outcome::Integral(value) => value,
            other => panic!("expected an integral, got {:?}", other),
        };
        assert!((0.0..=1.0).contains(&value));
        assert!(explorer.clicks().is_empty());
        assert_eq!(explorer.last_integral(), Some(value));
        assert!(explorer
            .console()
            .lines()
            .iter()
            .any(|l| l == &format!("Is: {}", value)));
    }

    #[test]
    fn test_end_to_end_update_fill_only() {
        let mut explorer = diagonal_explorer();
        let levels = explorer.levels().clone();
        let overlay = explorer.overlay_samples();
        let mark = explorer.console().mark();

        explorer.update(UpdateParams {
            filled: Some(false),
            ..Default::default()
        });

        assert!(!explorer.filled());
        assert_eq!(explorer.x_vec(), AXIS);
        assert_eq!(explorer.y_vec(), AXIS);
        assert_eq!(explorer.overlay_samples(), overlay);
        assert_eq!(explorer.levels(), &levels);
        assert_eq!(explorer.console().since(mark), ["Updated filled to: false"]);
        // Not redrawn until asked.
        assert!(explorer.figure().unwrap().axes.contours().unwrap().filled());
    }

    #[test]
    fn test_update_nothing() {
        let mut explorer = listening(Ramp);
        let mark = explorer.console().mark();
        explorer.update(UpdateParams::default());
        assert_eq!(explorer.console().since(mark), ["Nothing updated."]);
    }

    #[test]
    fn test_integrate_is_order_independent() {
        let mut explorer = listening(Ramp);
        let mut values = Vec::new();
        for (p, q) in [
            ([0.0, 0.0], [1.0, 2.0]),
            ([1.0, 0.0], [0.0, 2.0]),
            ([1.0, 2.0], [0.0, 0.0]),
            ([0.0, 2.0], [1.0, 0.0]),
        ] {
            click_at(&mut explorer, &[p, q]);
            values.push(explorer.integrate().unwrap().unwrap());
        }
        assert!((values[0] - 3.0).abs() < 1e-12);
        assert!(values.iter().all(|v| *v == values[0]));
    }

    #[test]
    fn test_click_buffer_precondition() {
        for command in [Command::Extract, Command::Integrate, Command::Zoom] {
            for n in [0usize, 1, 3, 5] {
                let mut explorer = listening(Ramp);
                let limits = explorer.figure().unwrap().axes.xlim();
                let points: Vec<[f64; 2]> = (0..n).map(|i| [i as f64 * 0.1, 0.5]).collect();
                click_at(&mut explorer, &points);

                let outcome = explorer.dispatch(command.clone()).unwrap();
                assert_eq!(outcome, Outcome::Handled);
                assert!(explorer.clicks().is_empty(), "{} with {} clicks", command, n);
                assert!(explorer.profile().is_none());
                assert_eq!(explorer.last_integral(), None);
                assert_eq!(explorer.figure().unwrap().axes.xlim(), limits);

                let warning = if n < 2 {
                    "You did not click often enough, try again!"
                } else {
                    "You seem to have clicked too often."
                };
                assert!(explorer.console().lines().iter().any(|l| l == warning));
            }
        }
    }

    #[test]
    fn test_click_warning_printed_once_per_command() {
        let mut explorer = listening(Ramp);
        click_at(&mut explorer, &[[0.5, 0.5]]);
        let mark = explorer.console().mark();
        explorer.handle_key("z").unwrap();

        let warnings = explorer
            .console()
            .since(mark)
            .iter()
            .filter(|l| l.starts_with("You did not click often enough"))
            .count();
        assert_eq!(warnings, 1);
        assert!(explorer.clicks().is_empty());
    }

    #[test]
    fn test_zoom_keeps_click_order() {
        let mut explorer = listening(Ramp);
        click_at(&mut explorer, &[[0.5, 0.25], [1.5, 1.75]]);
        explorer.zoom().unwrap();
        let axes = &explorer.figure().unwrap().axes;
        assert_eq!(axes.xlim(), (0.5, 1.5));
        assert_eq!(axes.ylim(), (0.25, 1.75));

        click_at(&mut explorer, &[[1.5, 1.75], [0.5, 0.25]]);
        explorer.handle_key("Z").unwrap();
        let axes = &explorer.figure().unwrap().axes;
        assert_eq!(axes.xlim(), (1.5, 0.5));
        assert_eq!(axes.ylim(), (1.75, 0.25));
        assert!(explorer.clicks().is_empty());
    }

    #[test]
    fn test_unzoom_restores_grid_extent() {
        let mut explorer = Explorer::from_estimator(Ramp, ExplorerOptions::default());
        explorer.contour(&[2.0, -1.0, 0.5], &[4.0, 3.0, 9.0]).unwrap();
        explorer.open_session(10).unwrap();
        click_at(&mut explorer, &[[1.0, 8.0], [0.0, 5.0]]);
        explorer.zoom().unwrap();
        explorer.handle_key("u").unwrap();
        let axes = &explorer.figure().unwrap().axes;
        assert_eq!(axes.xlim(), (-1.0, 2.0));
        assert_eq!(axes.ylim(), (3.0, 9.0));
    }

    #[test]
    fn test_click_draws_marker() {
        let mut explorer = listening(Ramp);
        explorer
            .click(ClickEvent {
                button: 3,
                pixel: Some((4, 2)),
                x: 0.5,
                y: 1.5,
            })
            .unwrap();
        let artists = explorer.figure().unwrap().axes.artists();
        assert_eq!(
            artists.last(),
            Some(&Artist::Markers {
                points: vec![[0.5, 1.5]],
                ink: Ink::Click
            })
        );
        assert_eq!(
            explorer.console().lines().last().unwrap(),
            "You clicked at x,y coordinates: 0.5,1.5"
        );
    }

    #[test]
    fn test_clear_redraws_without_overlays() {
        let mut explorer = listening(Ramp);
        click_at(&mut explorer, &[[0.0, 0.0], [1.0, 1.0]]);
        explorer.extract().unwrap();
        assert_eq!(explorer.figure().unwrap().axes.artists().len(), 4);

        explorer.handle_key("c").unwrap();
        let artists = explorer.figure().unwrap().axes.artists();
        assert_eq!(artists.len(), 1);
        assert!(matches!(artists[0], Artist::Contours(_)));
    }

    #[test]
    fn test_new_vector_closes_profile() {
        let mut explorer = listening(Ramp);
        explorer.new_vector();
        click_at(&mut explorer, &[[0.0, 0.0], [1.0, 1.0]]);
        explorer.extract().unwrap();
        assert!(explorer.profile().is_some());

        explorer.handle_key("N").unwrap();
        assert!(explorer.profile().is_none());
        assert!(explorer.clicks().is_empty());
    }

    #[test]
    fn test_overlay_samples_only_with_raw_data() {
        let options = ExplorerOptions {
            overlay_samples: true,
            ..Default::default()
        };
        let samples = Samples::new(vec![0.0, 1.0, 0.5], vec![0.0, 0.2, 1.0]).unwrap();
        let mut explorer = Explorer::from_samples(samples, Bandwidth::Scott, options.clone()).unwrap();
        explorer.contour(&[0.0, 1.0], &[0.0, 1.0]).unwrap();
        let markers = explorer.figure().unwrap().axes.artists().iter().any(|a| {
            matches!(a, Artist::Markers { ink: Ink::Sample, points } if points.len() == 3)
        });
        assert!(markers);

        let mut explorer = Explorer::from_estimator(Ramp, options);
        explorer.contour(&[0.0, 1.0], &[0.0, 1.0]).unwrap();
        assert_eq!(explorer.figure().unwrap().axes.artists().len(), 1);
    }

    #[test]
    fn test_contour_data_shapes() {
        let mut explorer = Explorer::from_estimator(Ramp, ExplorerOptions::default());
        let data = explorer.contour_data(&[0.0, 1.0, 2.0], &[0.0, 1.0]).unwrap();
        assert_eq!(data.z_t.dim(), (2, 3));
        assert_eq!(data.z_t[[1, 2]], 3.0);
        assert_eq!(data.samples, None);
        assert_eq!(data.levels, Levels::Auto);
        assert!(explorer.figure().is_none());
        assert!(explorer.grid().is_some());

        let mut explorer = diagonal_explorer();
        let data = explorer.contour_data(&AXIS, &AXIS).unwrap();
        assert_eq!(data.samples.unwrap().x, AXIS.to_vec());
    }

    #[test]
    fn test_operations_before_contour() {
        let mut explorer = Explorer::from_estimator(Ramp, ExplorerOptions::default());
        assert!(matches!(explorer.open_session(10), Err(ExplorerError::NoContour)));
        assert!(matches!(explorer.render(), Err(ExplorerError::NoContour)));
        assert!(matches!(explorer.unzoom(), Err(ExplorerError::NoContour)));
        assert_eq!(explorer.handle_key("e").unwrap(), Outcome::Ignored);
        assert!(explorer.console().lines().is_empty());
    }

    #[test]
    fn test_sampling_must_be_at_least_two() {
        let mut explorer = Explorer::from_estimator(Ramp, ExplorerOptions::default());
        explorer.contour(&[0.0, 1.0], &[0.0, 1.0]).unwrap();
        assert!(matches!(
            explorer.open_session(1),
            Err(ExplorerError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_quit_closes_everything() {
        let mut explorer = listening(Ramp);
        click_at(&mut explorer, &[[0.0, 0.0], [1.0, 1.0]]);
        explorer.extract().unwrap();
        explorer.handle_key("q").unwrap();

        assert_eq!(explorer.state(), SessionState::Closed);
        assert!(explorer.figure().is_none());
        assert!(explorer.profile().is_none());
        assert_eq!(explorer.console().lines().last().unwrap(), "ByeBye");

        let before = explorer.console().lines().len();
        assert_eq!(explorer.handle_key("h").unwrap(), Outcome::Ignored);
        explorer.click(ClickEvent::at(0.0, 0.0)).unwrap();
        assert_eq!(explorer.console().lines().len(), before);
    }

    #[test]
    fn test_help_and_inactive_keys() {
        let mut explorer = listening(Ramp);
        let mark = explorer.console().mark();
        explorer.handle_key("h").unwrap();
        assert_eq!(explorer.console().since(mark).len(), HELP_LINES.len() + 1);
        assert_eq!(explorer.console().since(mark)[0], "You just pressed: h");

        let mark = explorer.console().mark();
        assert_eq!(explorer.handle_key("x").unwrap(), Outcome::Handled);
        assert_eq!(
            explorer.console().since(mark),
            ["You just pressed: x", "The key you pressed is inactive."]
        );
    }

    #[test]
    fn test_front_end_commands() {
        let mut explorer = listening(Ramp);
        assert_eq!(explorer.handle_key("p").unwrap(), Outcome::CyclePalette);
        assert_eq!(explorer.handle_key("t").unwrap(), Outcome::CycleTheme);
        assert_eq!(explorer.handle_key("y").unwrap(), Outcome::Handled);

        click_at(&mut explorer, &[[0.0, 0.0], [1.0, 0.0]]);
        explorer.extract().unwrap();
        let Outcome::CopyProfile(text) = explorer.handle_key("y").unwrap() else {
            panic!("expected profile text");
        };
        assert_eq!(text.lines().count(), DEFAULT_SAMPLING + 1);
    }

    #[test]
    fn test_replot_reuses_or_reevaluates() {
        let mut explorer = listening(Ramp);
        explorer.replot().unwrap();
        assert_eq!(explorer.state(), SessionState::Idle);
        assert!(explorer.figure().is_some());
        assert_eq!(explorer.grid().unwrap().x, vec![0.0, 1.0, 2.0]);

        explorer.update(UpdateParams {
            x_vec: Some(vec![5.0, 6.0]),
            ..Default::default()
        });
        assert_eq!(explorer.grid().unwrap().x, vec![0.0, 1.0, 2.0]);
        explorer.replot().unwrap();
        assert_eq!(explorer.grid().unwrap().x, vec![5.0, 6.0]);
        assert_eq!(explorer.figure().unwrap().axes.xlim(), (5.0, 6.0));
    }

    #[test]
    fn test_info_reports_input_mode() {
        let mut explorer = diagonal_explorer();
        explorer.info();
        let lines = explorer.console().lines();
        assert!(lines.iter().any(|l| l == &format!("input mode: {}", InputMode::Samples)));
        assert!(lines.iter().any(|l| l == "x_vec: [0.0, 1.0, 2.0, 3.0]"));
        assert!(lines.iter().any(|l| l == "levels: Automatic"));

        let mut explorer = Explorer::from_estimator(Ramp, ExplorerOptions::default());
        explorer.info();
        assert!(explorer
            .console()
            .lines()
            .iter()
            .any(|l| l == &format!("input mode: {}", InputMode::Estimator)));
        assert!(explorer.console().lines().iter().any(|l| l == "x_vec: (unset)"));
    }

    #[test]
    fn test_new_from_input() {
        let explorer = Explorer::new(
            ExplorerInput::Samples {
                x: vec![0.0, 1.0, 3.0],
                y: vec![1.0, 0.0, 2.0],
                bandwidth: Bandwidth::Silverman,
            },
            ExplorerOptions::default(),
        )
        .unwrap();
        assert_eq!(explorer.mode(), InputMode::Samples);
        assert_eq!(explorer.samples().unwrap().len(), 3);

        let err = Explorer::new(
            ExplorerInput::Samples {
                x: vec![0.0, 1.0],
                y: vec![1.0],
                bandwidth: Bandwidth::Scott,
            },
            ExplorerOptions::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ExplorerError::SampleLengthMismatch { .. }));
    }

    #[test]
    fn test_format_vector() {
        assert_eq!(format_vector(&[]), "(unset)");
        assert_eq!(format_vector(&[1.0, 2.5]), "[1.0, 2.5]");
        let long: Vec<f64> = (0..10).map(f64::from).collect();
        assert_eq!(format_vector(&long), "[0, 1, 2, ..., 7, 8, 9] (10 values)");
    }
}
