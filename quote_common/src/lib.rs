//!
//! Common types and utilities shared by the quote core and the watcher binary.
//!
//! This crate aggregates:
//! - `error` — unified error type `QuoteError` used across the workspace.
//! - `result` — handy `Result<T, QuoteError>` alias.
//! - `position` — held lots and the symbol-indexed position map.
//! - `watchlist` — watchlist and holdings file parsing.
#![warn(missing_docs)]
pub mod error;
pub mod position;
pub mod result;
pub mod watchlist;

pub use error::QuoteError;
pub use position::Position;
pub use result::Result;
