//! Retro Arcade entry point
//!
//! Parses the command line, loads settings and runs the chosen game in the
//! terminal.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use glam::IVec2;

use retro_arcade::audio::{AudioManager, SilentSink, ToneSink};
use retro_arcade::frontend::TerminalBackend;
use retro_arcade::scheduler;
use retro_arcade::sim::breakout::BreakoutState;
use retro_arcade::sim::snake::SnakeState;
use retro_arcade::{Game, Settings};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum GameKind {
    /// Breakout with three lives and a title menu
    Classic,
    /// Breakout that never runs out of balls
    Endless,
    Snake,
}

#[derive(Debug, Parser)]
#[command(name = "retro-arcade", version, about = "Breakout and Snake in the terminal")]
struct Cli {
    #[arg(value_enum)]
    game: GameKind,

    /// JSON settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    mute: bool,

    /// Master volume (0.0 - 1.0)
    #[arg(long)]
    volume: Option<f32>,

    /// Snake moves per second
    #[arg(long)]
    snake_hz: Option<u32>,
}

fn load_settings(cli: &Cli) -> anyhow::Result<Settings> {
    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => Settings::default(),
    };

    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }
    if cli.mute {
        settings.audio.muted = true;
    }
    if let Some(volume) = cli.volume {
        settings.audio.master_volume = volume;
    }
    if let Some(hz) = cli.snake_hz {
        settings.snake.tick_hz = hz;
    }
    settings.validate().context("invalid settings")?;
    Ok(settings)
}

#[cfg(feature = "sound")]
fn tone_sink() -> Box<dyn ToneSink> {
    match retro_arcade::audio::DeviceSink::new() {
        Ok(sink) => Box::new(sink),
        Err(err) => {
            log::warn!("No audio device ({err}), playing silently");
            Box::new(SilentSink)
        }
    }
}

#[cfg(not(feature = "sound"))]
fn tone_sink() -> Box<dyn ToneSink> {
    log::info!("Built without sound support, playing silently");
    Box::new(SilentSink)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let settings = load_settings(&cli)?;

    let mut audio = AudioManager::new(tone_sink());
    audio.set_master_volume(settings.audio.master_volume);
    audio.set_muted(settings.audio.muted);

    let seed = settings.seed.unwrap_or_else(rand::random);
    log::info!("Retro Arcade starting {:?} (seed {})", cli.game, seed);

    let mut game: Box<dyn Game> = match cli.game {
        GameKind::Classic => Box::new(BreakoutState::new(settings.classic.clone())),
        GameKind::Endless => Box::new(BreakoutState::new(settings.endless.clone())),
        GameKind::Snake => Box::new(SnakeState::new(settings.snake.clone(), seed)),
    };

    let arena = match cli.game {
        GameKind::Classic => IVec2::new(settings.classic.arena_width, settings.classic.arena_height),
        GameKind::Endless => IVec2::new(settings.endless.arena_width, settings.endless.arena_height),
        GameKind::Snake => IVec2::new(settings.snake.arena_width, settings.snake.arena_height),
    };

    let mut backend = TerminalBackend::new(arena).context("setting up the terminal")?;
    scheduler::run(game.as_mut(), &mut backend, &audio)
}
