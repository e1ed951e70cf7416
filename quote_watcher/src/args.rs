//! Command-line arguments for the quote watcher.
//!
//! This module defines the CLI interface using `clap`. See `main` for end-to-end usage.
use std::path::PathBuf;

use clap::Parser;

/// Parsed command-line arguments.
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Args {
    /// Path to a text file with symbols to watch.
    /// Symbols may be separated by commas, spaces, or new lines.
    #[clap(long, required_unless_present = "symbols")]
    pub watchlist: Option<PathBuf>,

    /// Comma-separated symbols given inline instead of a watchlist file.
    #[clap(long)]
    pub symbols: Option<String>,

    /// Path to a holdings file with one SYMBOL,QUANTITY,UNIT_COST line per lot.
    #[clap(long)]
    pub holdings: Option<PathBuf>,

    /// Refresh interval in seconds.
    #[clap(long, default_value_t = 5)]
    pub interval: u64,

    /// Initial sort key: alpha, change, dividend date, dividend yield, pb, pe,
    /// or value. Unknown names fall back to "change".
    #[clap(long, default_value = "change")]
    pub sort: String,

    /// Start with the sort order reversed.
    #[clap(long)]
    pub reverse: bool,

    /// Use a synthetic offline feed instead of the remote quote service.
    #[clap(long)]
    pub simulate: bool,

    /// Stop after this many refresh cycles (0 = run until interrupted).
    #[clap(long, default_value_t = 0)]
    pub iterations: u64,
}
