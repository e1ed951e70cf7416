//!
//! Quote derivation and ranking core.
//!
//! This crate holds the two pieces of the watcher with real policy in them:
//! - `quote` — turns one upstream record with three overlapping session price
//!   states (pre-market, regular, post-market) into a single coherent `Quote`.
//! - `sorter` — a named catalog of sort keys and the engine that orders a
//!   quote list by the selected key, partitioning active and inactive
//!   instruments where the key calls for it.
//!
//! Everything here is pure and synchronous: no I/O, no shared mutable state.
//! Fetching, holdings files, and rendering live in the watcher binary.
#![warn(missing_docs)]
pub mod quote;
pub mod sorter;

pub use quote::{MarketState, Quote, QuoteBatchResponse, RawQuote, transform, transform_batch};
pub use sorter::{SortKey, Sorter};
