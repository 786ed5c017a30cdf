use clap::Parser;
use std::path::PathBuf;

/// Astrid - drive a remote assistant with locally-executed tools.
#[derive(Parser, Debug)]
#[command(name = "astrid")]
#[command(version = "0.1.0")]
#[command(about = "Terminal front-end for remote assistant runs.", long_about = None)]
pub struct Cli {
    /// Single message mode (don't enter interactive mode)
    #[arg(short, long)]
    pub message: Option<String>,

    /// Path to the TOML config file (default: ./astrid.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Seconds between run-status polls (clamped to 1-10)
    #[arg(long)]
    pub poll_interval: Option<u64>,

    /// Overall per-task timeout in seconds
    #[arg(long)]
    pub task_timeout: Option<u64>,
}
