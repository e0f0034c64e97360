use std::path::PathBuf;

use clap::Parser;
use tracing::level_filters::LevelFilter;

#[cfg(test)]
mod tests;

/// Interactive terminal client for the Rebrickable part/element search proxy.
#[derive(Debug, Parser)]
#[command(name = "bricklook", version, about)]
pub struct Args {
    /// Base URL of the search proxy
    #[arg(long, env = "BRICKLOOK_API", default_value = "http://127.0.0.1:5000")]
    pub api: String,

    /// File to append logs to
    #[arg(long, default_value = "bricklook.log")]
    pub log_file: PathBuf,

    /// Log verbosity (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,

    /// Log to stdout instead of the log file (garbles the TUI; debugging only)
    #[arg(long)]
    pub log_stdout: bool,
}
