//! Brick Breaker headless host
//!
//! Drives a session on an in-memory canvas with a virtual clock. The
//! autopilot launches every round and chases the ball with the paddle.

use std::path::PathBuf;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, ensure};
use clap::Parser;

use brick_breaker::audio::LogAudio;
use brick_breaker::consts::*;
use brick_breaker::platform::{Canvas, InputEvent};
use brick_breaker::renderer::build_frame;
use brick_breaker::sim::{Entity, GamePhase};
use brick_breaker::{Game, QualityPreset, Settings};

#[derive(Parser, Debug)]
#[command(about = "Run a headless Brick Breaker session", version)]
struct Args {
    /// RNG seed for particle bursts (defaults to the clock)
    #[arg(long)]
    seed: Option<u64>,
    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,
    /// Override the quality preset (low, medium, high)
    #[arg(long)]
    quality: Option<QualityPreset>,
    /// Write the effective settings to this path and exit
    #[arg(long)]
    write_settings: Option<PathBuf>,
    /// Stop after this many game ticks
    #[arg(long, default_value_t = 20_000)]
    max_ticks: u64,
    /// Comma-separated key names fed one per tick before the autopilot
    /// takes over (e.g. "left,left,space")
    #[arg(long, value_delimiter = ',')]
    script: Vec<String>,
    /// Print every game event to stdout as a JSON line
    #[arg(long)]
    events: bool,
    /// Launch rounds but leave the paddle where it is
    #[arg(long)]
    no_autopilot: bool,
    /// Sleep between ticks instead of running as fast as possible
    #[arg(long)]
    realtime: bool,
    /// Directory holding the sound files; missing files are reported once
    #[arg(long)]
    assets: Option<PathBuf>,
    #[arg(long, default_value_t = PLAYFIELD_WIDTH)]
    width: f32,
    #[arg(long, default_value_t = PLAYFIELD_HEIGHT)]
    height: f32,
}

/// Largest accepted playfield side; the brick layout walks the width in
/// fixed steps
const MAX_PLAYFIELD_SIDE: f32 = 10_000.0;

/// The paddle must fit across the width and sit above the floor
fn validate_playfield(width: f32, height: f32) -> Result<()> {
    ensure!(
        width.is_finite() && (PADDLE_WIDTH..=MAX_PLAYFIELD_SIDE).contains(&width),
        "--width must be between {} and {}, got {}",
        PADDLE_WIDTH,
        MAX_PLAYFIELD_SIDE,
        width
    );
    let min_height = PADDLE_Y + PADDLE_HEIGHT;
    ensure!(
        height.is_finite() && (min_height..=MAX_PLAYFIELD_SIDE).contains(&height),
        "--height must be between {} and {}, got {}",
        min_height,
        MAX_PLAYFIELD_SIDE,
        height
    );
    Ok(())
}

/// One input per tick at most: launch when waiting, otherwise steer
fn autopilot(game: &Game<Canvas, LogAudio>, steer: bool) -> Option<InputEvent> {
    let state = game.state();
    match state.phase {
        GamePhase::AwaitingLaunch => Some(InputEvent::Launch),
        GamePhase::Running if steer => {
            let ball = state.ball.as_ref().filter(|b| b.is_moving())?;
            let dx = ball.center().x - state.paddle.center().x;
            if dx > PADDLE_STEP / 2.0 {
                Some(InputEvent::Right)
            } else if dx < -PADDLE_STEP / 2.0 {
                Some(InputEvent::Left)
            } else {
                None
            }
        }
        _ => None,
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut settings = match &args.settings {
        Some(path) => Settings::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => Settings::default(),
    };
    if let Some(quality) = args.quality {
        settings.quality = quality;
    }
    if let Some(path) = &args.write_settings {
        settings
            .save(path)
            .with_context(|| format!("failed to write settings to {}", path.display()))?;
        return Ok(());
    }

    let seed = match args.seed {
        Some(seed) => seed,
        None => SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("system clock is before the epoch")?
            .as_nanos() as u64,
    };

    validate_playfield(args.width, args.height)?;
    let canvas = Canvas::new(args.width, args.height, BACKGROUND_COLOR);
    let mut game = Game::new(canvas, LogAudio::new(args.assets.clone()), &settings, seed);
    log::info!("Brick Breaker (headless) starting, seed {}", seed);

    let mut script = Vec::with_capacity(args.script.len());
    for key in &args.script {
        let input = InputEvent::from_key(key.trim())
            .with_context(|| format!("unknown key '{}' in --script", key))?;
        script.push(input);
    }
    let mut script = script.into_iter();

    while !game.is_over() && game.state().ticks < args.max_ticks {
        let input = match script.next() {
            Some(input) => Some(input),
            None => autopilot(&game, !args.no_autopilot),
        };
        if let Some(input) = input {
            game.handle_input(input);
        }
        if args.realtime {
            std::thread::sleep(Duration::from_millis(TICK_MS));
        }
        game.advance(TICK_MS);

        for event in game.drain_events() {
            if args.events {
                println!("{}", serde_json::to_string(&event)?);
            } else {
                log::debug!("{:?}", event);
            }
        }
    }

    let frame = build_frame(game.surface());
    println!(
        "{:?} after {} ticks ({} ms): lives {}, bricks left {}, particles {}, sounds {}",
        game.phase(),
        game.state().ticks,
        game.now_ms(),
        game.lives(),
        game.state().bricks_remaining(),
        game.state().particles.len(),
        game.audio().played(),
    );
    println!(
        "last frame: {} shapes, {} triangles, {} texts",
        game.surface().len(),
        frame.triangle_count(),
        frame.texts.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_playfield_is_valid() {
        assert!(validate_playfield(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT).is_ok());
        assert!(validate_playfield(PADDLE_WIDTH, PADDLE_Y + PADDLE_HEIGHT).is_ok());
        assert!(validate_playfield(MAX_PLAYFIELD_SIDE, MAX_PLAYFIELD_SIDE).is_ok());
    }

    #[test]
    fn test_rejects_bad_width() {
        for width in [f32::NAN, f32::INFINITY, -1.0, 0.0, PADDLE_WIDTH - 1.0, 1e30] {
            let err = validate_playfield(width, PLAYFIELD_HEIGHT).unwrap_err();
            assert!(err.to_string().starts_with("--width"), "{}", err);
        }
    }

    #[test]
    fn test_rejects_bad_height() {
        for height in [f32::NAN, f32::NEG_INFINITY, 0.0, PADDLE_Y, MAX_PLAYFIELD_SIDE + 1.0] {
            let err = validate_playfield(PLAYFIELD_WIDTH, height).unwrap_err();
            assert!(err.to_string().starts_with("--height"), "{}", err);
        }
    }

    #[test]
    fn test_args_parse_playfield() {
        let args = Args::try_parse_from(["brick-breaker", "--width", "800", "--height", "500"])
            .unwrap();
        assert_eq!((args.width, args.height), (800.0, 500.0));
    }
}
