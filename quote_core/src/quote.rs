//! Quote data model and session-state derivation.
//!
//! The upstream quote service reports three overlapping price states per
//! instrument (pre-market, regular, post-market) plus a tag naming which
//! session the instrument is currently in. [`transform`] collapses those into
//! one coherent view: a single price, a change relative to the previous
//! regular close, and activity flags for the ranking engine.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Trading session an instrument is currently in, as tagged by the upstream
/// feed. Anything outside the three tracked sessions collapses to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum MarketState {
    /// Pre-market session.
    #[serde(rename = "PRE")]
    Pre,
    /// Regular trading session.
    #[serde(rename = "REGULAR")]
    Regular,
    /// Post-market session.
    #[serde(rename = "POST")]
    Post,
    /// Closed, halted, or any tag this system does not track.
    #[default]
    #[serde(rename = "OTHER")]
    Other,
}

impl From<String> for MarketState {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "PRE" => MarketState::Pre,
            "REGULAR" => MarketState::Regular,
            "POST" => MarketState::Post,
            _ => MarketState::Other,
        }
    }
}

/// One raw record per symbol, as returned by the upstream quote service.
///
/// Every field is defaulted because the upstream omits whatever does not apply
/// to the instrument (no post-market fields outside the session, no valuation
/// fields for indices, and so on). A `dividend_date` of `0` means the
/// instrument has no dividend date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawQuote {
    /// Symbol identifier.
    pub symbol: String,
    /// Short display name of the instrument.
    pub short_name: String,
    /// Current trading session tag.
    pub market_state: MarketState,
    /// Quoting currency code.
    pub currency: String,
    /// Exchange display name.
    #[serde(rename = "fullExchangeName")]
    pub exchange_name: String,
    /// Exchange data delay in minutes.
    #[serde(rename = "exchangeDataDelayedBy")]
    pub exchange_delay: f64,
    /// Regular-session change since previous close.
    pub regular_market_change: f64,
    /// Regular-session change percent since previous close.
    pub regular_market_change_percent: f64,
    /// Last regular-session price.
    pub regular_market_price: f64,
    /// Previous regular-session close.
    pub regular_market_previous_close: f64,
    /// Regular-session open.
    pub regular_market_open: f64,
    /// Regular-session day range, formatted by the upstream.
    pub regular_market_day_range: String,
    /// Post-market change relative to the regular-session close.
    pub post_market_change: f64,
    /// Post-market change percent relative to the regular-session close.
    pub post_market_change_percent: f64,
    /// Last post-market price.
    pub post_market_price: f64,
    /// Pre-market change since previous close.
    pub pre_market_change: f64,
    /// Pre-market change percent since previous close.
    pub pre_market_change_percent: f64,
    /// Last pre-market price.
    pub pre_market_price: f64,
    /// Price-to-book ratio.
    pub price_to_book: f64,
    /// Trailing price-to-earnings ratio.
    #[serde(rename = "trailingPE")]
    pub trailing_pe: f64,
    /// Next dividend date as a Unix epoch, `0` when there is none.
    pub dividend_date: i64,
    /// Trailing annual dividend rate.
    #[serde(rename = "trailingAnnualDividendRate")]
    pub annual_dividend: f64,
    /// Trailing annual dividend yield.
    #[serde(rename = "trailingAnnualDividendYield")]
    pub dividend_yield: f64,
}

/// Envelope around a batch of raw quotes, matching the upstream JSON shape.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuoteBatchResponse {
    /// The single top-level object the upstream wraps every batch in.
    pub quote_response: QuoteBatch,
}

/// Result list and error slot inside [`QuoteBatchResponse`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct QuoteBatch {
    /// One raw record per requested symbol.
    #[serde(rename = "result")]
    pub quotes: Vec<RawQuote>,
    /// Upstream error object, if any.
    pub error: Option<serde_json::Value>,
}

/// Derived quote with a unified price/change/activity view.
///
/// Created fresh on every fetch cycle and owned solely by the caller. The
/// derived fields are a pure function of the raw record's market state.
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    /// The raw record this quote was derived from.
    pub raw: RawQuote,
    /// Currently-relevant trading price for the tagged session.
    pub price: f64,
    /// Change since the previous regular close, composing the post-market and
    /// regular sessions when both apply.
    pub change: f64,
    /// Change percent since the previous regular close, composed like `change`.
    pub change_percent: f64,
    /// Whether the instrument is in a tracked session with live pricing.
    pub is_active: bool,
    /// Whether the instrument is in the regular session specifically.
    pub is_regular_trading_session: bool,
    /// Next dividend date, `None` when the raw epoch was `0`.
    pub dividend_date: Option<DateTime<Utc>>,
}

/// Derives the unified view for one raw record. Infallible: an absent
/// dividend date and an unrecognized session tag are data, not errors.
///
/// Post-market change is reported relative to the regular close, so it is
/// composed with the regular-session change to give change since the previous
/// close. Pre-market change is already relative to the previous close and
/// stands alone.
pub fn transform(raw: RawQuote) -> Quote {
    let dividend_date = match raw.dividend_date {
        0 => None,
        epoch => DateTime::from_timestamp(epoch, 0),
    };

    let (price, change, change_percent, is_active, is_regular_trading_session) =
        match raw.market_state {
            MarketState::Regular => (
                raw.regular_market_price,
                raw.regular_market_change,
                raw.regular_market_change_percent,
                true,
                true,
            ),
            MarketState::Post => (
                raw.post_market_price,
                raw.post_market_change + raw.regular_market_change,
                raw.post_market_change_percent + raw.regular_market_change_percent,
                true,
                false,
            ),
            MarketState::Pre => (
                raw.pre_market_price,
                raw.pre_market_change,
                raw.pre_market_change_percent,
                true,
                false,
            ),
            MarketState::Other => (raw.regular_market_price, 0.0, 0.0, false, false),
        };

    Quote {
        price,
        change,
        change_percent,
        is_active,
        is_regular_trading_session,
        dividend_date,
        raw,
    }
}

/// Derives a whole batch element-wise, preserving input order.
pub fn transform_batch(raws: Vec<RawQuote>) -> Vec<Quote> {
    raws.into_iter().map(transform).collect()
}
