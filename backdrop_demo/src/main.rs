//! Headless backdrop demo
//!
//! Mounts the ambient backdrop against text-mode hosts, drives it for a
//! while, and prints the last frame plus a summary. Runs on simulated time by
//! default; pass `--realtime` to pace frames against the wall clock.
//!
//! ```text
//! backdrop_demo [--seconds 30] [--fps 60] [--width 1280] [--height 720]
//!               [--seed N] [--config backdrop.toml] [--realtime]
//! ```

mod hosts;

use std::time::Duration;

use ambient_engine::foundation::logging;
use ambient_engine::foundation::time::{Clock, FrameTimer, ManualClock, SystemClock};
use ambient_engine::{AmbientConfig, CompositionLayer, Config, ConfigError};
use ambient_engine::host::Viewport;
use log::{error, info};
use thiserror::Error;

use hosts::{AsciiSurface, TerminalSpriteLayer};

const GRID_COLS: usize = 96;
const GRID_ROWS: usize = 32;
const MAX_FPS: f32 = 1000.0;
const MAX_SECONDS: f32 = 24.0 * 60.0 * 60.0;

#[derive(Error, Debug)]
enum DemoError {
    #[error("failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("invalid value for {flag}: {value}")]
    InvalidArgument { flag: &'static str, value: String },
}

#[derive(Debug)]
struct Options {
    seconds: f32,
    fps: f32,
    viewport: Viewport,
    seed: Option<u64>,
    config: Option<String>,
    realtime: bool,
}

impl Options {
    fn parse(args: &[String]) -> Result<Self, DemoError> {
        let seconds: f32 = parse_arg(args, "--seconds")?.unwrap_or(30.0);
        if !(0.0..=MAX_SECONDS).contains(&seconds) {
            return Err(DemoError::InvalidArgument { flag: "--seconds", value: seconds.to_string() });
        }
        let fps: f32 = parse_arg(args, "--fps")?.unwrap_or(60.0);
        if !(1.0..=MAX_FPS).contains(&fps) {
            return Err(DemoError::InvalidArgument { flag: "--fps", value: fps.to_string() });
        }

        Ok(Self {
            seconds,
            fps,
            viewport: Viewport::new(
                parse_arg(args, "--width")?.unwrap_or(1280),
                parse_arg(args, "--height")?.unwrap_or(720),
            ),
            seed: parse_arg(args, "--seed")?,
            config: flag_value(args, "--config").map(str::to_owned),
            realtime: args.iter().any(|arg| arg == "--realtime"),
        })
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn parse_arg<T: std::str::FromStr>(args: &[String], flag: &'static str) -> Result<Option<T>, DemoError> {
    flag_value(args, flag)
        .map(|value| {
            value.parse().map_err(|_| DemoError::InvalidArgument {
                flag,
                value: value.to_owned(),
            })
        })
        .transpose()
}

fn load_config(options: &Options) -> Result<AmbientConfig, DemoError> {
    let mut config = match &options.config {
        Some(path) => AmbientConfig::load_from_file(path)?,
        None => AmbientConfig::default(),
    };
    if let Some(seed) = options.seed {
        config.seed = Some(seed);
    }
    config.validate()?;
    Ok(config)
}

fn run(options: &Options) -> Result<(), DemoError> {
    let config = load_config(options)?;

    let surface = AsciiSurface::new(GRID_COLS, GRID_ROWS);
    let sprites = TerminalSpriteLayer::new(options.viewport);

    let manual = ManualClock::new();
    let system = SystemClock::new();
    let clock: &dyn Clock = if options.realtime { &system } else { &manual };
    let frame_interval = Duration::from_secs_f32(1.0 / options.fps);
    let total = Duration::from_secs_f32(options.seconds);

    let mut backdrop = CompositionLayer::new(config);
    backdrop.mount(
        Some(Box::new(surface.clone())),
        Some(Box::new(sprites.clone())),
        options.viewport,
        clock.now(),
    );

    let mut timer = FrameTimer::new();
    let mut resized = false;
    while clock.now() < total {
        if options.realtime {
            std::thread::sleep(frame_interval);
        } else {
            manual.advance(frame_interval);
        }

        let now = clock.now();
        if !resized && now >= total / 2 {
            // Simulate the window being dragged narrower halfway through.
            let narrow = Viewport::new(options.viewport.width / 2, options.viewport.height);
            sprites.set_bounds(narrow);
            backdrop.resize(narrow.width, narrow.height);
            resized = true;
        }

        backdrop.frame(now);
        timer.update(now);
    }

    println!("{}", surface.render(&sprites));
    println!();
    let viewport = surface.viewport();
    println!(
        "viewport={}x{} frames={} avg_fps={:.1} ticks={} sprites: spawned={} expired={} active={}",
        viewport.width,
        viewport.height,
        timer.frame_count(),
        timer.average_fps(),
        backdrop.simulator().ticks(),
        backdrop.emitter().spawned(),
        backdrop.emitter().expired(),
        backdrop.emitter().active(),
    );

    backdrop.unmount();
    info!(
        "After unmount: surface detached={}, sprite elements left={}",
        surface.is_detached(),
        sprites.element_count()
    );
    Ok(())
}

fn main() {
    logging::init("info");

    let args: Vec<String> = std::env::args().collect();
    let result = Options::parse(&args).and_then(|options| run(&options));
    if let Err(err) = result {
        error!("{err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("backdrop_demo")
            .chain(list.iter().copied())
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn test_defaults() {
        let options = Options::parse(&args(&[])).unwrap();
        assert_eq!(options.seconds, 30.0);
        assert_eq!(options.fps, 60.0);
        assert_eq!(options.viewport, Viewport::new(1280, 720));
        assert!(!options.realtime);
    }

    #[test]
    fn test_rejects_frame_rates_that_stall_the_clock() {
        for fps in ["1e12", "inf", "NaN", "0", "-5"] {
            let result = Options::parse(&args(&["--fps", fps]));
            assert!(
                matches!(result, Err(DemoError::InvalidArgument { flag: "--fps", .. })),
                "--fps {fps} accepted"
            );
        }
    }

    #[test]
    fn test_rejects_unbounded_durations() {
        for seconds in ["inf", "NaN", "-1", "1e30"] {
            let result = Options::parse(&args(&["--seconds", seconds]));
            assert!(
                matches!(result, Err(DemoError::InvalidArgument { flag: "--seconds", .. })),
                "--seconds {seconds} accepted"
            );
        }
    }

    #[test]
    fn test_short_run_finishes_with_narrowed_hosts() {
        let options = Options::parse(&args(&["--seconds", "2", "--fps", "1000", "--seed", "3"])).unwrap();
        assert!(run(&options).is_ok());
    }
}
