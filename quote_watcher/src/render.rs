//! Plain stdout table renderer.
//!
//! The whole table is re-rendered on every refresh cycle; the ordered list is
//! consumed read-only. A richer terminal UI would slot in here without
//! touching the core.

use std::collections::HashMap;

use quote_common::Position;
use quote_core::quote::{MarketState, Quote};
use quote_core::sorter::Sorter;

/// Short session marker shown next to each row.
fn session_marker(quote: &Quote) -> &'static str {
    if quote.is_regular_trading_session {
        return "REG";
    }
    match quote.raw.market_state {
        MarketState::Pre => "PRE",
        MarketState::Post => "POST",
        _ => "--",
    }
}

/// Prints the ordered quote table with the active sort description on top.
pub fn render(quotes: &[Quote], positions: &HashMap<String, Position>, sorter: &Sorter) {
    let direction = if sorter.reverse { " (reversed)" } else { "" };
    println!();
    println!("sort: {}{}", sorter.description, direction);
    println!(
        "{:<10} {:<24} {:>10} {:>9} {:>8} {:>5} {:>7} {:>7} {:>12}",
        "SYMBOL", "NAME", "PRICE", "CHANGE", "CHG%", "SESS", "YIELD%", "P/E", "VALUE"
    );

    for quote in quotes {
        let value = positions
            .get(&quote.raw.symbol)
            .map_or(0.0, Position::value);
        println!(
            "{:<10} {:<24} {:>10.2} {:>+9.2} {:>+8.2} {:>5} {:>7.2} {:>7.2} {:>12.2}",
            quote.raw.symbol,
            truncate(&quote.raw.short_name, 24),
            quote.price,
            quote.change,
            quote.change_percent,
            session_marker(quote),
            quote.raw.dividend_yield * 100.0,
            quote.raw.trailing_pe,
            value,
        );
    }
}

fn truncate(name: &str, max: usize) -> String {
    if name.chars().count() <= max {
        name.to_string()
    } else {
        name.chars().take(max - 1).collect::<String>() + "…"
    }
}
