//! Quote watcher — a terminal watchlist that keeps a live ranking of quotes.
//!
//! Each refresh cycle fetches a raw batch for the watched symbols (or
//! synthesizes one in `--simulate` mode), derives the unified session view via
//! `quote_core::transform_batch`, orders it with the current `Sorter`, and
//! re-renders the whole table. Cycles are independent: the previous list is
//! replaced wholesale, and the only mutable cell is the local `Sorter` value,
//! replaced whole on every change.
//!
//! Interactive controls (read line-wise from stdin):
//! - empty line or `s` — cycle to the next sort key (keeps the reverse flag)
//! - `r` — toggle reverse
//! - `q` — quit
//!
//! Usage example (CLI):
//! ```bash
//! quote_watcher --watchlist ./watchlist.txt --holdings ./holdings.csv --sort value
//! quote_watcher --symbols AAPL,MSFT,TSLA --simulate --interval 2
//! ```
#![warn(missing_docs)]
mod args;
mod feed;
mod fetch;
mod render;

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::Path;
use std::thread;
use std::time::Duration;

use clap::Parser;
use crossbeam_channel::{Receiver, never, select, tick, unbounded};
use log::{info, warn};
use quote_common::position::position_map;
use quote_common::watchlist::{parse_holdings, parse_symbols};
use quote_common::{Position, QuoteError, Result};
use quote_core::quote::{Quote, RawQuote, transform_batch};
use quote_core::sorter::Sorter;

use crate::args::Args;
use crate::feed::SimulatedFeed;
use crate::fetch::QuoteFetcher;
use crate::render::render;

/// Where raw batches come from: the remote service or the offline generator.
enum FeedSource {
    Remote(QuoteFetcher),
    Simulated(SimulatedFeed),
}

impl FeedSource {
    fn next_batch(&mut self, symbols: &[String]) -> Vec<RawQuote> {
        match self {
            FeedSource::Remote(fetcher) => fetcher.fetch_raw_quotes(symbols),
            FeedSource::Simulated(feed) => feed.next_batch(),
        }
    }
}

/// Spawns a thread forwarding stdin lines into a channel so the main loop can
/// `select!` over refresh ticks and user commands at the same time.
fn start_stdin_reader() -> Receiver<String> {
    let (tx, rx) = unbounded::<String>();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line.trim().to_string()).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
    });
    rx
}

fn load_symbols(args: &Args) -> Result<Vec<String>> {
    if let Some(inline) = &args.symbols {
        return parse_symbols(Cursor::new(inline.as_str()));
    }
    // clap guarantees one of the two is present
    let path = args.watchlist.as_deref().ok_or_else(|| {
        QuoteError::ParseWatchlist("either --watchlist or --symbols is required".to_string())
    })?;
    parse_symbols(BufReader::new(File::open(path)?))
}

fn load_positions(path: Option<&Path>) -> Result<HashMap<String, Position>> {
    match path {
        Some(path) => {
            let positions = parse_holdings(BufReader::new(File::open(path)?))?;
            info!("Loaded {} positions from {}", positions.len(), path.display());
            Ok(position_map(positions))
        }
        None => Ok(HashMap::new()),
    }
}

fn main() -> Result<()> {
    init_logger();
    let args = Args::parse();

    let symbols = load_symbols(&args)?;
    let positions = load_positions(args.holdings.as_deref())?;
    info!("Watching {} symbols", symbols.len());

    let mut sorter = Sorter::new(&args.sort).with_reverse(args.reverse);
    if sorter.description != args.sort {
        warn!("Unknown sort key {:?}, using \"change\"", args.sort);
    }

    let mut source = if args.simulate {
        info!("Simulated feed enabled, no network access");
        FeedSource::Simulated(SimulatedFeed::new(&symbols))
    } else {
        FeedSource::Remote(QuoteFetcher::new()?)
    };

    let (quit_tx, quit_rx) = unbounded::<()>();
    ctrlc::set_handler(move || {
        let _ = quit_tx.send(());
    })
    .expect("Error setting Ctrl+C handler");

    let refresh = tick(Duration::from_secs(args.interval.max(1)));
    // Swapped for a never-ready channel once stdin closes (piped or detached
    // runs), so the loop keeps refreshing without interactive commands.
    let commands = start_stdin_reader();
    let dead_commands = never::<String>();
    let mut stdin_open = true;

    // First cycle immediately instead of waiting out the initial tick.
    let mut quotes: Vec<Quote> = transform_batch(source.next_batch(&symbols));
    render(&sorter.sort(&quotes, &positions), &positions, &sorter);

    let mut cycles: u64 = 1;
    loop {
        if args.iterations > 0 && cycles >= args.iterations {
            info!("Reached {} cycles, stopping", args.iterations);
            break;
        }
        let command_rx = if stdin_open { &commands } else { &dead_commands };

        select! {
            recv(refresh) -> _ => {
                quotes = transform_batch(source.next_batch(&symbols));
                render(&sorter.sort(&quotes, &positions), &positions, &sorter);
                cycles += 1;
            },
            recv(command_rx) -> line => match line {
                Ok(cmd) => {
                    match cmd.as_str() {
                        "q" => break,
                        "r" => sorter = sorter.with_reverse(!sorter.reverse),
                        "" | "s" => {
                            let keep_reverse = sorter.reverse;
                            sorter = sorter.next_sorter().with_reverse(keep_reverse);
                        }
                        other => {
                            warn!("Unknown command {:?} (use s, r, or q)", other);
                            continue;
                        }
                    }
                    render(&sorter.sort(&quotes, &positions), &positions, &sorter);
                },
                Err(_) => stdin_open = false,
            },
            recv(quit_rx) -> _ => {
                info!("Interrupted, shutting down");
                break;
            },
        }
    }
    Ok(())
}

fn init_logger() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();
}
