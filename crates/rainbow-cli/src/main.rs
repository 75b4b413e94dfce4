//! Headless host: step the sky-dome update loop and print where the sun,
//! moon, rainbow and moonbow are.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::Parser;
use hifitime::Epoch;
use log::{info, warn};
use thiserror::Error;

use rainbow_engine::{
    CommandQueue, Horizontal, SystemClock, TickOutcome, TrackerConfig, TrackerError, UpdateLoop,
};

#[derive(Error, Debug)]
enum CliError {
    #[error("Couldn't read config file {}: {source}", path.display())]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Couldn't set up logging: {0}")]
    Logging(#[from] log::SetLoggerError),

    #[error(transparent)]
    Tracker(#[from] TrackerError),
}

/// Print sun, moon, rainbow and moonbow positions for a place and time.
#[derive(Parser, Debug)]
#[command(name = "rainbow-cli", version, about)]
struct Args {
    /// Observer latitude in degrees, north positive.
    #[arg(long, allow_hyphen_values = true)]
    lat: Option<f64>,

    /// Observer longitude in degrees, east positive.
    #[arg(long, allow_hyphen_values = true)]
    lon: Option<f64>,

    /// Start instant in UTC, e.g. 2024-03-20T12:00:00Z. Defaults to now.
    #[arg(long, value_parser = parse_utc)]
    start: Option<Epoch>,

    /// Number of frames to run.
    #[arg(long, default_value_t = 1)]
    frames: u32,

    /// Real seconds between frames.
    #[arg(long, default_value_t = 1.0)]
    dt: f64,

    /// Start with the clock stopped.
    #[arg(long)]
    paused: bool,

    /// JSON tracker config. Flags override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    /// The verbosity of the program. Repeat for more.
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbosity: u8,
}

/// Parse an ISO-8601 UTC instant such as `2024-03-20T12:00:00Z`.
fn parse_utc(text: &str) -> Result<Epoch, String> {
    Epoch::from_str(text.trim())
        .map_err(|e| format!("'{text}' is not a UTC time like 2024-03-20T12:00:00Z: {e}"))
}

fn setup_logging(verbosity: u8) -> Result<(), log::SetLoggerError> {
    let mut builder = env_logger::Builder::from_default_env();
    builder.target(env_logger::Target::Stdout);
    builder.format_target(false);
    match verbosity {
        0 => builder.filter_level(log::LevelFilter::Info),
        1 => builder.filter_level(log::LevelFilter::Debug),
        _ => builder.filter_level(log::LevelFilter::Trace),
    };
    builder.try_init()
}

fn load_config(args: &Args) -> Result<TrackerConfig, CliError> {
    let mut config = match &args.config {
        Some(path) => read_config(path)?,
        None => TrackerConfig::default(),
    };
    if let Some(lat) = args.lat {
        config.latitude = lat;
    }
    if let Some(lon) = args.lon {
        config.longitude = lon;
    }
    if args.paused {
        config.start_running = false;
    }
    Ok(config)
}

fn read_config(path: &Path) -> Result<TrackerConfig, CliError> {
    let json = std::fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(TrackerConfig::from_json(&json)?)
}

fn describe(name: &str, point: Horizontal) -> String {
    format!("{name:>8}: alt {:>8.3}°  az {:>8.3}°", point.altitude, point.azimuth)
}

fn run(args: Args) -> Result<(), CliError> {
    setup_logging(args.verbosity)?;
    let config = load_config(&args)?;

    let mut tracker = match args.start {
        Some(start) => UpdateLoop::from_config_at(config, SystemClock, start)?,
        None => UpdateLoop::from_config(config, SystemClock)?,
    };

    let mut commands = CommandQueue::new();
    for _ in 0..args.frames {
        let report = tracker.tick(args.dt, &mut commands)?;
        info!("{}", report.status);
        if let TickOutcome::Stale(e) = &report.outcome {
            warn!("No new positions for frame {}: {e}", report.frame);
        }
    }

    match (tracker.sky(), tracker.bows()) {
        (Some(sky), Some(bows)) => {
            info!("{}  size {:.5}°", describe("sun", sky.sun.horizontal()), sky.sun.angular_size);
            info!("{}  size {:.5}°", describe("moon", sky.moon.horizontal()), sky.moon.angular_size);
            info!("{}", describe("rainbow", bows.rainbow));
            info!("{}", describe("moonbow", bows.moonbow));
        }
        _ => warn!("No frame could be resolved"),
    }
    Ok(())
}

fn main() {
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
