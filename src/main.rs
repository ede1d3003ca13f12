//! Pong entry point
//!
//! Loads settings, sets up the terminal and runs the game loop.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use glam::Vec2;

use pong::Settings;
use pong::consts::{HEIGHT, WIDTH};
use pong::driver::Driver;
use pong::platform::{FixedRatePacer, KeyboardInput, TerminalCanvas, TerminalSession};
use pong::renderer::SceneRenderer;

/// Two-player Pong. Left: W/S, right: Up/Down, quit: Esc or Q.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// JSON settings file
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Points needed to win a match
    #[arg(long)]
    winning_score: Option<u32>,

    /// Ticks per second
    #[arg(long)]
    fps: Option<u32>,

    /// Print the effective settings as JSON and exit
    #[arg(long)]
    print_settings: bool,
}

fn load_settings(cli: &Cli) -> Result<Settings, pong::SettingsError> {
    let mut settings = match &cli.settings {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(score) = cli.winning_score {
        settings.winning_score = score;
    }
    if let Some(fps) = cli.fps {
        settings.fps = fps;
    }
    settings.validate()?;
    Ok(settings)
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();
    let cli = Cli::parse();

    let settings = load_settings(&cli).inspect_err(|e| log::error!("{e}"))?;
    if cli.print_settings {
        println!("{}", serde_json::to_string_pretty(&settings)?);
        return Ok(());
    }
    log::info!("Pong starting...");

    let session = TerminalSession::enter("Pong")?;
    let canvas = TerminalCanvas::stdout(Vec2::new(WIDTH, HEIGHT))?;
    let input = KeyboardInput::new(session.reports_key_release());
    let pacer = FixedRatePacer::new(settings.tick_interval());

    let mut driver = Driver::new(settings, SceneRenderer::new(canvas), input, pacer);
    let result = driver.run();

    // Restore the terminal before anything is printed
    drop(session);
    result?;

    let score = driver.state().score;
    println!("Final score: {} - {}", score.left_score, score.right_score);
    Ok(())
}
