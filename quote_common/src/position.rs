//! Holdings model shared between the core sorter and the watcher binary.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A held lot of a single instrument.
///
/// Only the market value matters to the ranking engine; quantity and unit cost
/// are kept so the renderer can show the lot itself.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Position {
    /// Symbol identifier the lot belongs to.
    pub symbol: String,
    /// Number of units held.
    pub quantity: f64,
    /// Cost per unit at acquisition time.
    pub unit_cost: f64,
}

impl Position {
    /// Creates a new position for `symbol`.
    pub fn new(symbol: &str, quantity: f64, unit_cost: f64) -> Self {
        Position {
            symbol: symbol.to_string(),
            quantity,
            unit_cost,
        }
    }

    /// Market value of the lot (quantity times unit cost).
    pub fn value(&self) -> f64 {
        self.quantity * self.unit_cost
    }
}

/// Index a list of positions by symbol for O(1) lookup during sorting.
///
/// Duplicate symbols keep the last occurrence.
pub fn position_map(positions: Vec<Position>) -> HashMap<String, Position> {
    positions.into_iter().map(|p| (p.symbol.clone(), p)).collect()
}
