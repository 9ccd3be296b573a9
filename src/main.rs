//! chatcast CLI entry point

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "chatcast")]
#[command(about = "Compile scripted chat conversations into deterministic playback timelines")]
#[command(version)]
struct Cli {
    /// TOML file overriding the default timing constants.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a script into an absolute-timestamped timeline
    Compile {
        /// Script JSON file
        script: PathBuf,

        /// Write the timeline JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Play a script live in the terminal (Ctrl-C stops playback)
    Play {
        /// Script JSON file
        script: PathBuf,

        /// Resume at this event index; earlier events appear instantly
        #[arg(long, default_value = "0")]
        start_at: usize,

        /// Wall-clock speed multiplier
        #[arg(long, default_value = "1.0")]
        speed: f64,
    },

    /// Step the timeline at a fixed frame rate and emit the frame log
    /// the capture pipeline consumes
    Render {
        /// Script JSON file
        script: PathBuf,

        /// Frames per second of the external capture clock
        #[arg(long, default_value = "30")]
        fps: u32,

        /// Write the frame log JSON here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Timing configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the active timing constants as TOML
    Show,
}

#[cfg(not(tarpaulin_include))]
fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = commands::load_timing_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Compile { script, output } => {
            commands::compile::handle(&script, output.as_deref(), &config)
        }
        Commands::Play {
            script,
            start_at,
            speed,
        } => commands::play::handle(&script, start_at, speed, &config),
        Commands::Render {
            script,
            fps,
            output,
        } => commands::render::handle(&script, fps, output.as_deref(), &config),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::handle_show(&config),
        },
    }
}

#[cfg(not(tarpaulin_include))]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .try_init();
}
