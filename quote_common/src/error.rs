//! Error types shared across the workspace.
//!
//! The `QuoteError` enum unifies common failure cases for I/O, serialization,
//! input-file parsing, and channel communication, allowing crates to propagate
//! a single error type.
use std::io;
use std::string::FromUtf8Error;

use thiserror::Error;

/// Unified error type shared by the core and the watcher binary.
#[derive(Error, Debug)]
pub enum QuoteError {
    /// I/O error originating from the standard library or sockets/files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Generic formatting/validation error with a human-readable message.
    #[error("Format error: {0}")]
    Format(String),

    /// UTF-8 conversion error when handling text content.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] FromUtf8Error),

    /// Error while parsing the watchlist file into symbols.
    #[error("Parse watchlist error: {0}")]
    ParseWatchlist(String),

    /// Error while parsing the holdings file into positions.
    #[error("Parse holdings error: {0}")]
    ParseHoldings(String),

    /// Failure while encoding/decoding JSON via serde_json.
    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// Channel send failed (e.g., receiver dropped); contains a short context string.
    #[error("Channel send failed: {0}")]
    ChannelSend(String),

    /// Channel receive failed (e.g., sender closed); contains a short context string.
    #[error("Channel receive failed: {0}")]
    ChannelRecv(String),
}
