//! KDE Explorer - an interactive 2D kernel density explorer for the terminal.

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use kde_explorer::{
    app::App,
    contour::Levels,
    data::read_samples,
    grid::GridSpec,
    kde::Bandwidth,
    session::{ClickEvent, Explorer, ExplorerOptions, DEFAULT_SAMPLING},
    ui,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Points per axis when the grid is derived from the samples.
const DEFAULT_GRID_POINTS: usize = 80;
/// Fraction of the sample range added on each side of the default grid.
const DEFAULT_GRID_PADDING: f64 = 0.2;

#[derive(Parser, Debug)]
#[command(name = "kde-explorer")]
#[command(
    about = "An interactive explorer for 2D kernel density estimates",
    long_about = None
)]
struct Args {
    /// Sample file with two numeric columns (x, y)
    file: PathBuf,

    /// Column delimiter of the sample file
    #[arg(long, default_value_t = ',')]
    delimiter: char,

    /// Grid along x as MIN:MAX:N (default: padded sample extent)
    #[arg(long, value_parser = parse_grid, allow_hyphen_values = true)]
    x_range: Option<GridSpec>,

    /// Grid along y as MIN:MAX:N (default: padded sample extent)
    #[arg(long, value_parser = parse_grid, allow_hyphen_values = true)]
    y_range: Option<GridSpec>,

    /// Draw contour lines instead of filled bands
    #[arg(long)]
    lines: bool,

    /// Overlay the raw samples on the contours
    #[arg(long)]
    overlay: bool,

    /// Contour levels as a comma separated list, or "auto"
    #[arg(long, value_parser = parse_levels, allow_hyphen_values = true)]
    levels: Option<Levels>,

    /// Number of points sampled along an extracted line
    #[arg(long, default_value_t = DEFAULT_SAMPLING)]
    sampling: usize,

    /// Bandwidth rule: scott, silverman or a positive factor
    #[arg(long, default_value = "scott", value_parser = parse_bandwidth)]
    bandwidth: Bandwidth,

    /// Enable logging to specified file
    #[arg(long)]
    log: Option<PathBuf>,

    /// Do not print the console transcript on exit
    #[arg(long)]
    quiet: bool,

    /// Print the explorer parameters and exit
    #[arg(long)]
    info: bool,

    /// Integrate over the box X0,Y0,X1,Y1 and exit
    #[arg(long, value_parser = parse_corners, allow_hyphen_values = true)]
    integrate: Option<[f64; 4]>,

    /// Print the density profile along X0,Y0,X1,Y1 as TSV and exit
    #[arg(long, value_parser = parse_corners, allow_hyphen_values = true)]
    profile: Option<[f64; 4]>,
}

impl Args {
    fn batch(&self) -> bool {
        self.info || self.integrate.is_some() || self.profile.is_some()
    }

    fn options(&self) -> ExplorerOptions {
        ExplorerOptions {
            filled: !self.lines,
            overlay_samples: self.overlay,
            levels: self.levels.clone().unwrap_or_default(),
            sampling: self.sampling,
        }
    }
}

fn parse_grid(s: &str) -> std::result::Result<GridSpec, String> {
    s.parse().map_err(|e: kde_explorer::ExplorerError| e.to_string())
}

fn parse_levels(s: &str) -> std::result::Result<Levels, String> {
    s.parse().map_err(|e: kde_explorer::ExplorerError| e.to_string())
}

fn parse_bandwidth(s: &str) -> std::result::Result<Bandwidth, String> {
    s.parse().map_err(|e: kde_explorer::ExplorerError| e.to_string())
}

fn parse_corners(s: &str) -> std::result::Result<[f64; 4], String> {
    let values = s
        .split(',')
        .map(|v| v.trim().parse::<f64>().map_err(|_| format!("'{}' is not a number", v)))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    <[f64; 4]>::try_from(values).map_err(|_| format!("expected X0,Y0,X1,Y1, got '{}'", s))
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_env("KDE_EXPLORER_LOG")
        .unwrap_or_else(|_| EnvFilter::new("debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;
    tracing::info!("Starting KDE Explorer");
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(log_path) = &args.log {
        init_logging(log_path)?;
    }

    if !args.delimiter.is_ascii() {
        anyhow::bail!("Delimiter must be a single ASCII character");
    }
    let samples = read_samples(&args.file, args.delimiter as u8)
        .with_context(|| format!("Failed to load {}", args.file.display()))?;
    let ((x_min, x_max), (y_min, y_max)) = samples
        .extent()
        .context("Sample file holds no finite samples")?;
    let x_spec = args
        .x_range
        .unwrap_or_else(|| GridSpec::padded(x_min, x_max, DEFAULT_GRID_PADDING, DEFAULT_GRID_POINTS));
    let y_spec = args
        .y_range
        .unwrap_or_else(|| GridSpec::padded(y_min, y_max, DEFAULT_GRID_PADDING, DEFAULT_GRID_POINTS));

    let mut explorer = Explorer::from_samples(samples, args.bandwidth, args.options())?;
    explorer.contour(&x_spec.values(), &y_spec.values())?;

    if args.batch() {
        return run_batch(&args, explorer);
    }

    explorer.open_session(args.sampling)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(explorer);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if !args.quiet {
        for line in app.explorer.console().lines() {
            println!("{}", line);
        }
    }
    res?;

    tracing::info!("KDE Explorer exited");
    Ok(())
}

/// Drive the session with scripted clicks and print the results.
fn run_batch(args: &Args, mut explorer: Explorer) -> Result<()> {
    if args.info {
        explorer.info();
    }
    if args.integrate.is_some() || args.profile.is_some() {
        explorer.open_session(args.sampling)?;
    }
    if let Some([x0, y0, x1, y1]) = args.integrate {
        explorer.click(ClickEvent::at(x0, y0))?;
        explorer.click(ClickEvent::at(x1, y1))?;
        explorer.handle_key("i")?;
    }
    if let Some([x0, y0, x1, y1]) = args.profile {
        explorer.click(ClickEvent::at(x0, y0))?;
        explorer.click(ClickEvent::at(x1, y1))?;
        explorer.handle_key("e")?;
    }

    if args.quiet {
        if let Some(value) = explorer.last_integral() {
            println!("{}", value);
        }
    } else {
        for line in explorer.console().lines() {
            println!("{}", line);
        }
    }
    if let Some(profile) = explorer.profile() {
        print!("{}", profile.to_tsv());
    }
    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    while !app.should_quit() {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.on_key(key),
                Event::Mouse(mouse) => app.on_mouse(mouse),
                _ => {},
            }
        }
    }
    Ok(())
}
