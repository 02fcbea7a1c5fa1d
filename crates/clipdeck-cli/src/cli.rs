use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "clipdeck")]
#[command(about = "Replay input scripts against a clip list", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a config file (or set CLIPDECK_CONFIG env var)
    #[arg(long, global = true, value_name = "PATH", env = "CLIPDECK_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a script of input steps and print the resulting intents
    Replay(ReplayArgs),
    /// Print the effective configuration
    Config,
}

#[derive(Args)]
pub struct ReplayArgs {
    /// JSON file holding an array of steps
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,
    /// Number of synthetic clips in the backing store
    #[arg(long, default_value_t = 50)]
    pub items: usize,
    /// Override the configured page size
    #[arg(long)]
    pub page_size: Option<usize>,
    /// Main-axis size of the list before any resize step
    #[arg(long, default_value_t = 1000.0)]
    pub container_extent: f64,
}
