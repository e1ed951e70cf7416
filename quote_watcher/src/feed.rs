//! Synthetic offline feed.
//!
//! `SimulatedFeed` produces one raw record per watched symbol without any
//! network access, walking each price by a small random step and rotating the
//! symbols through the pre/regular/post/closed session states so every sort
//! key has something to rank. Valuation fields are derived from the symbol's
//! position in the watchlist so the table stays readable across refreshes.

use std::collections::HashMap;

use chrono::Utc;
use quote_core::quote::{MarketState, RawQuote};
use rand::Rng;

const INITIAL_PRICE: f64 = 100.0;
const SECONDS_PER_DAY: i64 = 86_400;

/// Offline generator of raw quote batches.
pub struct SimulatedFeed {
    symbols: Vec<String>,
    last_prices: HashMap<String, f64>,
    cycle: u64,
}

impl SimulatedFeed {
    /// Creates a feed for `symbols`, all seeded at the same initial price.
    pub fn new(symbols: &[String]) -> Self {
        let last_prices = symbols
            .iter()
            .map(|s| (s.clone(), INITIAL_PRICE))
            .collect();
        SimulatedFeed {
            symbols: symbols.to_vec(),
            last_prices,
            cycle: 0,
        }
    }

    /// Walk one price by a step sampled uniformly from `[-1%, +1%]`, clamped
    /// to a minimum positive value.
    fn next_price(current_price: f64) -> f64 {
        let mut rng = rand::rng();
        let step: f64 = rng.random_range(-0.01..0.01);
        (current_price * (1.0 + step)).max(0.01)
    }

    /// Produces the next batch, one record per symbol in watchlist order.
    pub fn next_batch(&mut self) -> Vec<RawQuote> {
        self.cycle += 1;
        let cycle = self.cycle;
        let now_epoch = Utc::now().timestamp();

        let mut batch = Vec::with_capacity(self.symbols.len());
        for (index, symbol) in self.symbols.iter().enumerate() {
            let last = *self.last_prices.get(symbol).unwrap_or(&INITIAL_PRICE);
            let price = Self::next_price(last);
            self.last_prices.insert(symbol.clone(), price);

            let change = price - INITIAL_PRICE;
            let change_percent = change / INITIAL_PRICE * 100.0;

            // Rotate session states across the watchlist so active and
            // inactive partitions are both populated on every cycle.
            let state = match (index as u64 + cycle) % 4 {
                0 => MarketState::Pre,
                1 => MarketState::Regular,
                2 => MarketState::Post,
                _ => MarketState::Other,
            };

            let mut raw = RawQuote {
                symbol: symbol.clone(),
                short_name: format!("{} (simulated)", symbol),
                market_state: state,
                currency: "USD".to_string(),
                exchange_name: "SIM".to_string(),
                regular_market_previous_close: INITIAL_PRICE,
                price_to_book: 1.0 + index as f64,
                trailing_pe: 10.0 + 2.0 * index as f64,
                ..RawQuote::default()
            };

            match state {
                MarketState::Regular => {
                    raw.regular_market_price = price;
                    raw.regular_market_change = change;
                    raw.regular_market_change_percent = change_percent;
                }
                MarketState::Post => {
                    raw.regular_market_price = last;
                    raw.regular_market_change = change / 2.0;
                    raw.regular_market_change_percent = change_percent / 2.0;
                    raw.post_market_price = price;
                    raw.post_market_change = change / 2.0;
                    raw.post_market_change_percent = change_percent / 2.0;
                }
                MarketState::Pre => {
                    raw.regular_market_price = last;
                    raw.pre_market_price = price;
                    raw.pre_market_change = change;
                    raw.pre_market_change_percent = change_percent;
                }
                MarketState::Other => {
                    raw.regular_market_price = price;
                }
            }

            // Every third symbol pays a dividend, due a few days out.
            if index % 3 == 0 {
                raw.dividend_date = now_epoch + (index as i64 + 1) * SECONDS_PER_DAY;
                raw.annual_dividend = 1.0 + index as f64 * 0.5;
                raw.dividend_yield = raw.annual_dividend / price;
            }

            batch.push(raw);
        }
        batch
    }
}
