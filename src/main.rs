/// Headless driver and frame loop.
///
/// Usage: `tapwalk [LEVELS] [--turbo] [--realtime] [--ticks N] [--tap FRAME:X,Y]...`
///
/// `LEVELS` is a level file, a pack file or a directory; without it the
/// configured `levels_dir` or the built-in levels are used. Taps are
/// replayed at the given frame number. `RUST_LOG=debug` traces every
/// transition.

use std::collections::HashMap;
use std::error::Error;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::{Duration, Instant};

use clap::Parser;

use tapwalk::config::GameConfig;
use tapwalk::domain::input::FrameInput;
use tapwalk::sim::event::GameEvent;
use tapwalk::sim::level::{load_levels, load_path};
use tapwalk::sim::step::{advance_level, run_frame};
use tapwalk::sim::world::{Phase, WorldState};

/// Drive the walker through a level set without a display.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Level file, pack file or directory of `.txt` levels.
    #[arg(value_name = "LEVELS")]
    levels: Option<PathBuf>,
    /// Run `turbo_factor` ticks per frame.
    #[arg(long)]
    turbo: bool,
    /// Pace frames at `tick_rate_ms` instead of running flat out.
    #[arg(long)]
    realtime: bool,
    /// Stop after this many ticks (overrides `max_ticks`).
    #[arg(long = "ticks", value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    max_ticks: Option<u64>,
    /// Tap at pixel (X, Y) on frame FRAME. May be repeated.
    #[arg(long = "tap", value_name = "FRAME:X,Y")]
    taps: Vec<TapArg>,
}

/// A scripted tap parsed from `FRAME:X,Y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct TapArg {
    frame: u64,
    x: i32,
    y: i32,
}

impl FromStr for TapArg {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (frame, pos) = value
            .split_once(':')
            .ok_or_else(|| "expected format FRAME:X,Y".to_string())?;
        let (x, y) = pos
            .split_once(',')
            .ok_or_else(|| "expected format FRAME:X,Y".to_string())?;

        let frame = frame
            .trim()
            .parse::<u64>()
            .map_err(|error| format!("invalid frame: {error}"))?;
        let x = x.trim().parse::<i32>().map_err(|error| format!("invalid x: {error}"))?;
        let y = y.trim().parse::<i32>().map_err(|error| format!("invalid y: {error}"))?;

        Ok(TapArg { frame, x, y })
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    if let Err(e) = run(GameConfig::load(), args) {
        log::error!("{e}");
        std::process::exit(1);
    }
}

fn run(config: GameConfig, args: Args) -> Result<(), Box<dyn Error>> {
    let levels = match &args.levels {
        Some(path) => load_path(path)?,
        None => load_levels(&config),
    };
    let mut world = WorldState::new(levels, config.start_level)?;

    let ticks_per_frame = if args.turbo { config.speed.turbo_factor } else { 1 };
    let max_ticks = args.max_ticks.unwrap_or(config.speed.max_ticks);
    let tick_rate = Duration::from_millis(config.speed.tick_rate_ms);

    let taps: HashMap<u64, (i32, i32)> = args.taps.iter().map(|t| (t.frame, (t.x, t.y))).collect();

    let mut frame: u64 = 0;
    let mut total_ticks: u64 = 0;
    let mut cleared = 0usize;

    while world.phase != Phase::GameComplete && total_ticks < max_ticks {
        let frame_start = Instant::now();

        let input = match taps.get(&frame) {
            Some(&(x, y)) => FrameInput::tap_at(x, y),
            None => FrameInput::idle(),
        };
        let before = world.tick;
        let events = run_frame(&mut world, &input, ticks_per_frame);
        total_ticks += world.tick - before;
        report(&events);

        if world.phase == Phase::LevelComplete {
            cleared += 1;
            log::info!("\"{}\" cleared at frame {frame}", world.level_name());
            report(&advance_level(&mut world)?);
        }

        frame += 1;
        if args.realtime {
            let elapsed = frame_start.elapsed();
            if elapsed < tick_rate {
                std::thread::sleep(tick_rate - elapsed);
            }
        }
    }

    let (x, y) = world.player.pixel_pos();
    println!(
        "cleared {cleared}/{} levels in {total_ticks} ticks; level \"{}\" walker at ({x}, {y}) facing {:?}",
        world.total_levels(),
        world.level_name(),
        world.player.facing(),
    );
    Ok(())
}

fn report(events: &[GameEvent]) {
    for e in events {
        match e {
            GameEvent::LevelLoaded { .. } | GameEvent::GameComplete | GameEvent::GoalReached => {
                log::info!("{e:?}")
            }
            _ => log::debug!("{e:?}"),
        }
    }
}
