use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use grid_snake::audio::{AudioCue, Muted, TerminalBell};
use grid_snake::game::GameConfig;
use grid_snake::modes::PlayMode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "grid_snake")]
#[command(version, about = "Snake on a fixed grid, in the terminal")]
struct Cli {
    /// TOML file overriding the default game configuration
    #[arg(long)]
    config: Option<PathBuf>,

    /// Simulation ticks per second
    #[arg(long)]
    tick_rate: Option<u32>,

    /// Seed for reproducible fruit placement
    #[arg(long)]
    seed: Option<u64>,

    /// Do not ring the terminal bell when the snake eats
    #[arg(long)]
    mute: bool,

    /// Write logs here; the terminal itself is taken by the game
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "grid_snake=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Arc::new(file)),
        )
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let mut config = match &cli.config {
        Some(path) => GameConfig::from_toml_file(path)?,
        None => GameConfig::default(),
    };
    if let Some(rate) = cli.tick_rate {
        config.tick_rate_hz = rate;
    }
    config.validate().context("Invalid game configuration")?;

    tracing::info!(?config, seed = ?cli.seed, "starting");

    let audio: Box<dyn AudioCue> = if cli.mute {
        Box::new(Muted)
    } else {
        Box::new(TerminalBell)
    };

    let mut play_mode = PlayMode::new(config, audio, cli.seed);
    play_mode.run().await?;

    Ok(())
}
