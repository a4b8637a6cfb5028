mod app;

use std::{
    fs::{self, OpenOptions},
    path::PathBuf,
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::Parser;
use lettrus_core::{
    config::{self, AppConfig},
    Difficulty, FileWordStore, SessionController,
};
use tracing_subscriber::{prelude::*, EnvFilter};

/// Guess the hidden word in six tries, against the clock.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Directory holding the word lists
    #[arg(long)]
    words_dir: Option<PathBuf>,

    /// Word length (7, 8 or 9)
    #[arg(short = 'n', long = "letters")]
    letter_count: Option<usize>,

    /// Target pool: easy or hard
    #[arg(short, long)]
    difficulty: Option<Difficulty>,

    /// Disable the per-turn countdown
    #[arg(long)]
    no_timer: bool,

    /// Play the word of the day
    #[arg(long)]
    daily: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    config::ensure_default_config()?;
    let mut config = AppConfig::load()?;
    if let Some(words_dir) = cli.words_dir {
        config.words_dir = words_dir;
    }
    if let Some(letter_count) = cli.letter_count {
        config.letter_count = letter_count;
    }
    if let Some(difficulty) = cli.difficulty {
        config.difficulty = difficulty;
    }
    if cli.no_timer {
        config.timer_enabled = false;
    }
    config.validate()?;

    init_logging(&config)?;
    tracing::info!(words_dir = %config.words_dir.display(), "starting");

    let store = Arc::new(FileWordStore::new(config.words_dir.clone()));
    let controller = SessionController::new(store);

    let mut app = app::LettrusApp::new(controller, config, cli.daily);
    app.run().await
}

fn init_logging(config: &AppConfig) -> Result<()> {
    fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("failed to create {}", config.log_dir.display()))?;
    let log_path = config.log_dir.join("lettrus.log");

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(move || {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(&log_path)
                .expect("failed to open log file")
        });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
