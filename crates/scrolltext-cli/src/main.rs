use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use scrolltext_core::{AppConfig, Argb, Error, Orientation, ScrollTextConfig};

mod commands;

#[derive(Parser)]
#[command(name = "scrolltext")]
#[command(author, version, about = "Scroll a line of text across the terminal")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    run: RunArgs,

    /// Config file (defaults to ~/.config/scrolltext/config.toml)
    #[arg(short = 'c', long = "config", global = true)]
    config_path: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scroll text in the terminal (the default)
    Run(RunArgs),
    /// Print the effective configuration as TOML
    Config(RunArgs),
}

#[derive(Args, Clone, Default)]
struct RunArgs {
    /// Text to scroll
    text: Option<String>,

    /// Cells moved per tick (1-30)
    #[arg(short = 's', long)]
    speed: Option<u32>,

    /// Stop after this many loops
    #[arg(short = 't', long, allow_negative_numbers = true)]
    times: Option<i64>,

    /// Stop after this many seconds
    #[arg(short = 'd', long)]
    duration: Option<u64>,

    /// Scroll line by line, bottom to top
    #[arg(long)]
    vertical: bool,

    /// Keep scrolling after the loop count is reached
    #[arg(long)]
    forever: bool,

    /// Space toggles pause
    #[arg(long)]
    click: bool,

    /// Text color (#RGB, #RRGGBB or #AARRGGBB)
    #[arg(long)]
    color: Option<String>,

    /// Background color (#RGB, #RRGGBB or #AARRGGBB)
    #[arg(long)]
    background: Option<String>,
}

impl RunArgs {
    /// Layer command-line flags over the file configuration
    fn apply(&self, config: &mut ScrollTextConfig) -> Result<()> {
        if let Some(text) = &self.text {
            config.text = text.clone();
        }
        if let Some(speed) = self.speed {
            config.speed = speed;
        }
        if let Some(times) = self.times {
            let times = u32::try_from(times)
                .ok()
                .filter(|t| *t > 0)
                .ok_or(Error::InvalidLoopCount(times))?;
            config.loop_count = Some(times);
            config.duration_secs = None;
            config.scroll_forever = false;
        }
        if let Some(secs) = self.duration {
            // a duration replaces any loop limit
            config.duration_secs = Some(secs);
            config.loop_count = None;
        }
        if self.vertical {
            config.orientation = Orientation::Vertical;
        }
        if self.forever {
            config.scroll_forever = true;
        }
        if self.click {
            config.click_enable = true;
        }
        if let Some(color) = &self.color {
            config.text_color = color.parse::<Argb>()?;
        }
        if let Some(color) = &self.background {
            config.background_color = color.parse::<Argb>()?;
        }
        Ok(())
    }
}

/// Log to a file in the data directory; stdout belongs to the alternate screen
fn init_logging(config: &AppConfig) -> Result<()> {
    let log_path = config.log_path();
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = match &cli.config_path {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load()?,
    };

    init_logging(&config)?;

    match cli.command {
        Some(Commands::Run(args)) => {
            args.apply(&mut config.scroll)?;
            commands::run::run(config).await
        }
        Some(Commands::Config(args)) => {
            args.apply(&mut config.scroll)?;
            commands::config::run(config)
        }
        None => {
            cli.run.apply(&mut config.scroll)?;
            commands::run::run(config).await
        }
    }
}
