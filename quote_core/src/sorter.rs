//! Sort-key catalog and the ranking engine over derived quotes.
//!
//! A `Sorter` binds one named [`SortKey`] and a reverse flag. Sorting never
//! mutates its input: each call produces a fresh ordered copy. Several keys
//! partition the list (active vs. inactive instruments, dated vs. undated
//! dividends) before ordering, so a shared [`partition`] helper keeps the
//! per-key strategies down to their comparators.
//!
//! Ordering is stable everywhere: quotes refresh every cycle, and unstable
//! reordering of tied values shows up as visible jitter in the list.

use std::collections::HashMap;

use quote_common::Position;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

use crate::quote::Quote;

/// Named ranking criterion. The string forms are the selection surface; the
/// cycling order is the identifiers sorted lexicographically, recomputed on
/// demand so adding a key never requires touching an ordering table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString, EnumIter)]
pub enum SortKey {
    /// Ascending by symbol.
    #[strum(serialize = "alpha")]
    Alpha,
    /// Active quotes descending by change percent, inactive after.
    #[strum(serialize = "change")]
    Change,
    /// Dated quotes soonest-first, undated after.
    #[strum(serialize = "dividend date")]
    DividendDate,
    /// Descending by trailing annual dividend yield.
    #[strum(serialize = "dividend yield")]
    DividendYield,
    /// Descending by price-to-book ratio.
    #[strum(serialize = "pb")]
    PriceToBook,
    /// Descending by trailing price-to-earnings ratio.
    #[strum(serialize = "pe")]
    PriceToEarnings,
    /// Active and inactive partitions each descending by position value.
    #[strum(serialize = "value")]
    Value,
}

/// All sort keys in canonical cycling order (lexicographic by identifier).
fn sort_keys() -> Vec<SortKey> {
    let mut keys: Vec<SortKey> = SortKey::iter().collect();
    keys.sort_by_key(|key| key.to_string());
    keys
}

/// A bound sort selection: one key plus a reverse flag.
///
/// Immutable once constructed. Changing the key or the flag means replacing
/// the whole value ([`Sorter::next_sorter`], [`Sorter::with_reverse`]), so a
/// caller refreshing from another thread only ever swaps a reference.
#[derive(Debug, Clone)]
pub struct Sorter {
    key: SortKey,
    /// Whether to reverse the fully ordered sequence as the outermost step.
    pub reverse: bool,
    /// Human-readable name of the bound key.
    pub description: String,
}

impl Sorter {
    /// Binds `name` to its sort key. An unrecognized name silently falls back
    /// to `change`; this is a permissive default, not a reported failure.
    /// The reverse flag always starts false.
    pub fn new(name: &str) -> Self {
        let key = name.parse::<SortKey>().unwrap_or(SortKey::Change);
        Sorter {
            key,
            reverse: false,
            description: key.to_string(),
        }
    }

    /// Returns an ordered copy of `quotes` under the bound key.
    ///
    /// Reversal is the outermost step, applied after any partitioning and
    /// ordering. Ties keep their input order. The input is never mutated and
    /// the output is always a permutation of it.
    pub fn sort(&self, quotes: &[Quote], positions: &HashMap<String, Position>) -> Vec<Quote> {
        if quotes.is_empty() {
            return Vec::new();
        }

        let mut sorted = match self.key {
            SortKey::Alpha => sort_by_symbol(quotes),
            SortKey::Change => sort_by_change(quotes),
            SortKey::DividendDate => sort_by_dividend_date(quotes),
            SortKey::DividendYield => sort_by_dividend_yield(quotes),
            SortKey::PriceToBook => sort_by_price_to_book(quotes),
            SortKey::PriceToEarnings => sort_by_price_to_earnings(quotes),
            SortKey::Value => sort_by_value(quotes, positions),
        };

        if self.reverse {
            sorted.reverse();
        }
        sorted
    }

    /// Returns a new `Sorter` bound to the next key in canonical order,
    /// wrapping to the first key after the last. The reverse flag resets to
    /// false; a caller keeping it across the step copies it explicitly via
    /// [`Sorter::with_reverse`].
    pub fn next_sorter(&self) -> Sorter {
        let keys = sort_keys();
        match keys.iter().position(|key| *key == self.key) {
            Some(index) if index + 1 < keys.len() => Sorter::new(&keys[index + 1].to_string()),
            _ => Sorter::new(&keys[0].to_string()),
        }
    }

    /// Returns a copy of this sorter with the reverse flag set to `reverse`.
    pub fn with_reverse(&self, reverse: bool) -> Sorter {
        Sorter {
            reverse,
            ..self.clone()
        }
    }
}

/// Splits `quotes` into (matching, non-matching) copies, both keeping the
/// input's relative order.
fn partition<P>(quotes: &[Quote], predicate: P) -> (Vec<Quote>, Vec<Quote>)
where
    P: Fn(&Quote) -> bool,
{
    quotes.iter().cloned().partition(|quote| predicate(quote))
}

fn sort_by_symbol(quotes: &[Quote]) -> Vec<Quote> {
    let mut sorted = quotes.to_vec();
    sorted.sort_by(|a, b| a.raw.symbol.cmp(&b.raw.symbol));
    sorted
}

fn sort_by_change(quotes: &[Quote]) -> Vec<Quote> {
    let (mut active, inactive) = partition(quotes, |quote| quote.is_active);
    active.sort_by(|a, b| b.change_percent.total_cmp(&a.change_percent));
    active.extend(inactive);
    active
}

fn sort_by_dividend_date(quotes: &[Quote]) -> Vec<Quote> {
    let (mut dated, undated) = partition(quotes, |quote| quote.dividend_date.is_some());
    dated.sort_by(|a, b| a.dividend_date.cmp(&b.dividend_date));
    dated.extend(undated);
    dated
}

fn sort_by_dividend_yield(quotes: &[Quote]) -> Vec<Quote> {
    let mut sorted = quotes.to_vec();
    sorted.sort_by(|a, b| b.raw.dividend_yield.total_cmp(&a.raw.dividend_yield));
    sorted
}

fn sort_by_price_to_book(quotes: &[Quote]) -> Vec<Quote> {
    let mut sorted = quotes.to_vec();
    sorted.sort_by(|a, b| b.raw.price_to_book.total_cmp(&a.raw.price_to_book));
    sorted
}

fn sort_by_price_to_earnings(quotes: &[Quote]) -> Vec<Quote> {
    let mut sorted = quotes.to_vec();
    sorted.sort_by(|a, b| b.raw.trailing_pe.total_cmp(&a.raw.trailing_pe));
    sorted
}

fn sort_by_value(quotes: &[Quote], positions: &HashMap<String, Position>) -> Vec<Quote> {
    let (mut active, mut inactive) = partition(quotes, |quote| quote.is_active);
    let by_value_desc = |a: &Quote, b: &Quote| {
        position_value(positions, &b.raw.symbol).total_cmp(&position_value(positions, &a.raw.symbol))
    };
    active.sort_by(by_value_desc);
    inactive.sort_by(by_value_desc);
    active.extend(inactive);
    active
}

/// Market value of the position held in `symbol`, zero when none is held.
fn position_value(positions: &HashMap<String, Position>, symbol: &str) -> f64 {
    positions.get(symbol).map_or(0.0, Position::value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::{MarketState, RawQuote, transform};

    const ALL_KEYS: [&str; 7] = [
        "alpha",
        "change",
        "dividend date",
        "dividend yield",
        "pb",
        "pe",
        "value",
    ];

    fn quote(symbol: &str, state: MarketState) -> Quote {
        transform(RawQuote {
            symbol: symbol.to_string(),
            market_state: state,
            regular_market_price: 100.0,
            ..RawQuote::default()
        })
    }

    fn quote_with<F>(symbol: &str, state: MarketState, tweak: F) -> Quote
    where
        F: FnOnce(&mut RawQuote),
    {
        let mut raw = RawQuote {
            symbol: symbol.to_string(),
            market_state: state,
            regular_market_price: 100.0,
            ..RawQuote::default()
        };
        tweak(&mut raw);
        transform(raw)
    }

    fn symbols(quotes: &[Quote]) -> Vec<&str> {
        quotes.iter().map(|q| q.raw.symbol.as_str()).collect()
    }

    fn mixed_fixture() -> Vec<Quote> {
        vec![
            quote_with("CCC", MarketState::Regular, |r| {
                r.regular_market_change_percent = 2.0;
                r.dividend_date = 100;
                r.dividend_yield = 0.01;
                r.price_to_book = 3.0;
                r.trailing_pe = 15.0;
            }),
            quote_with("AAA", MarketState::Pre, |r| {
                r.pre_market_change_percent = 5.0;
                r.dividend_yield = 0.04;
                r.price_to_book = 1.0;
                r.trailing_pe = 30.0;
            }),
            quote_with("DDD", MarketState::Other, |r| {
                r.dividend_date = 50;
                r.dividend_yield = 0.02;
                r.price_to_book = 2.0;
                r.trailing_pe = 10.0;
            }),
            quote_with("BBB", MarketState::Post, |r| {
                r.post_market_change_percent = 1.0;
                r.regular_market_change_percent = 0.5;
            }),
        ]
    }

    fn no_positions() -> HashMap<String, Position> {
        HashMap::new()
    }

    #[test]
    fn unknown_key_falls_back_to_change() {
        let bogus = Sorter::new("bogus-key");
        assert_eq!(bogus.description, "change");
        assert!(!bogus.reverse);

        let quotes = mixed_fixture();
        let positions = no_positions();
        assert_eq!(
            bogus.sort(&quotes, &positions),
            Sorter::new("change").sort(&quotes, &positions)
        );
    }

    #[test]
    fn alpha_orders_all_quotes_by_symbol() {
        let sorted = Sorter::new("alpha").sort(&mixed_fixture(), &no_positions());
        assert_eq!(symbols(&sorted), vec!["AAA", "BBB", "CCC", "DDD"]);
    }

    #[test]
    fn change_puts_active_first_descending_then_inactive_in_input_order() {
        let quotes = vec![
            quote_with("A", MarketState::Regular, |r| {
                r.regular_market_change_percent = 2.0;
            }),
            quote_with("B", MarketState::Pre, |r| {
                r.pre_market_change_percent = 5.0;
            }),
            quote("C", MarketState::Other),
        ];
        let sorted = Sorter::new("change").sort(&quotes, &no_positions());
        assert_eq!(symbols(&sorted), vec!["B", "A", "C"]);
    }

    #[test]
    fn change_keeps_multiple_inactive_quotes_in_input_order() {
        let quotes = vec![
            quote("Z", MarketState::Other),
            quote_with("A", MarketState::Regular, |r| {
                r.regular_market_change_percent = 1.0;
            }),
            quote("M", MarketState::Other),
        ];
        let sorted = Sorter::new("change").sort(&quotes, &no_positions());
        assert_eq!(symbols(&sorted), vec!["A", "Z", "M"]);
    }

    #[test]
    fn dividend_date_orders_soonest_first_with_undated_last() {
        let quotes = vec![
            quote_with("LATE", MarketState::Regular, |r| r.dividend_date = 100),
            quote_with("SOON", MarketState::Regular, |r| r.dividend_date = 50),
            quote_with("NONE", MarketState::Regular, |r| r.dividend_date = 0),
        ];
        let sorted = Sorter::new("dividend date").sort(&quotes, &no_positions());
        assert_eq!(symbols(&sorted), vec!["SOON", "LATE", "NONE"]);
    }

    #[test]
    fn dividend_yield_orders_descending() {
        let sorted = Sorter::new("dividend yield").sort(&mixed_fixture(), &no_positions());
        assert_eq!(symbols(&sorted), vec!["AAA", "DDD", "CCC", "BBB"]);
    }

    #[test]
    fn pb_orders_descending() {
        let sorted = Sorter::new("pb").sort(&mixed_fixture(), &no_positions());
        assert_eq!(symbols(&sorted), vec!["CCC", "DDD", "AAA", "BBB"]);
    }

    #[test]
    fn pe_orders_descending() {
        let sorted = Sorter::new("pe").sort(&mixed_fixture(), &no_positions());
        assert_eq!(symbols(&sorted), vec!["AAA", "CCC", "DDD", "BBB"]);
    }

    #[test]
    fn value_orders_each_partition_by_position_value() {
        let quotes = vec![
            quote("SMALL", MarketState::Regular),
            quote("BIG", MarketState::Regular),
            quote("IDLE_BIG", MarketState::Other),
            quote("IDLE_NONE", MarketState::Other),
        ];
        let positions = quote_common::position::position_map(vec![
            Position::new("SMALL", 1.0, 10.0),
            Position::new("BIG", 1.0, 1000.0),
            Position::new("IDLE_BIG", 2.0, 100.0),
        ]);
        let sorted = Sorter::new("value").sort(&quotes, &positions);
        assert_eq!(
            symbols(&sorted),
            vec!["BIG", "SMALL", "IDLE_BIG", "IDLE_NONE"]
        );
    }

    #[test]
    fn missing_position_counts_as_zero_value() {
        let quotes = vec![
            quote("HELD", MarketState::Regular),
            quote("UNHELD", MarketState::Regular),
        ];
        let positions =
            quote_common::position::position_map(vec![Position::new("HELD", 1.0, 5.0)]);
        let sorted = Sorter::new("value").sort(&quotes, &positions);
        assert_eq!(symbols(&sorted), vec!["HELD", "UNHELD"]);
    }

    #[test]
    fn every_key_returns_a_permutation_of_its_input() {
        let quotes = mixed_fixture();
        let positions = no_positions();
        for key in ALL_KEYS {
            let sorted = Sorter::new(key).sort(&quotes, &positions);
            let mut expected = symbols(&quotes);
            let mut actual = symbols(&sorted);
            expected.sort_unstable();
            actual.sort_unstable();
            assert_eq!(actual, expected, "key {:?} lost or duplicated quotes", key);
        }
    }

    #[test]
    fn every_key_handles_empty_and_single_inputs() {
        let positions = no_positions();
        let one = vec![quote("ONLY", MarketState::Regular)];
        for key in ALL_KEYS {
            let sorter = Sorter::new(key);
            assert!(sorter.sort(&[], &positions).is_empty());
            assert_eq!(symbols(&sorter.sort(&one, &positions)), vec!["ONLY"]);
        }
    }

    #[test]
    fn sorting_is_idempotent_under_the_same_sorter() {
        let quotes = mixed_fixture();
        let positions = no_positions();
        for key in ALL_KEYS {
            let sorter = Sorter::new(key);
            let once = sorter.sort(&quotes, &positions);
            let twice = sorter.sort(&once, &positions);
            assert_eq!(symbols(&twice), symbols(&once), "key {:?} jittered", key);
        }
    }

    #[test]
    fn reverse_reverses_the_entire_final_sequence_for_every_key() {
        let quotes = mixed_fixture();
        let positions = no_positions();
        for key in ALL_KEYS {
            let forward = Sorter::new(key).sort(&quotes, &positions);
            let reversed = Sorter::new(key)
                .with_reverse(true)
                .sort(&quotes, &positions);
            let mut expected = forward;
            expected.reverse();
            assert_eq!(symbols(&reversed), symbols(&expected), "key {:?}", key);
        }
    }

    #[test]
    fn sort_does_not_mutate_its_input() {
        let quotes = mixed_fixture();
        let before = symbols(&quotes);
        let _ = Sorter::new("alpha").sort(&quotes, &no_positions());
        assert_eq!(symbols(&quotes), before);
    }

    #[test]
    fn ties_preserve_input_order() {
        let quotes = vec![
            quote_with("FIRST", MarketState::Regular, |r| {
                r.regular_market_change_percent = 1.0;
            }),
            quote_with("SECOND", MarketState::Regular, |r| {
                r.regular_market_change_percent = 1.0;
            }),
            quote_with("THIRD", MarketState::Regular, |r| {
                r.regular_market_change_percent = 1.0;
            }),
        ];
        let sorted = Sorter::new("change").sort(&quotes, &no_positions());
        assert_eq!(symbols(&sorted), vec!["FIRST", "SECOND", "THIRD"]);
    }

    #[test]
    fn next_sorter_cycles_canonical_order_and_wraps() {
        let mut sorter = Sorter::new("alpha");
        let mut seen = vec![sorter.description.clone()];
        for _ in 0..6 {
            sorter = sorter.next_sorter();
            seen.push(sorter.description.clone());
        }
        assert_eq!(seen, ALL_KEYS.to_vec());
        assert_eq!(sorter.next_sorter().description, "alpha");
    }

    #[test]
    fn seven_steps_return_to_the_starting_key() {
        for key in ALL_KEYS {
            let mut sorter = Sorter::new(key);
            for _ in 0..7 {
                sorter = sorter.next_sorter();
            }
            assert_eq!(sorter.description, key);
        }
    }

    #[test]
    fn next_sorter_resets_the_reverse_flag() {
        let sorter = Sorter::new("alpha").with_reverse(true);
        assert!(!sorter.next_sorter().reverse);
    }
}
