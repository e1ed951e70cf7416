//! Watchlist and holdings file parsing shared by the watcher binary.
//!
//! The watchlist file contains symbols separated by commas, whitespace, or
//! new lines. The holdings file contains one `SYMBOL,QUANTITY,UNIT_COST` line
//! per lot; blank lines and `#` comments are skipped.

use std::io::BufRead;

use crate::error::QuoteError;
use crate::position::Position;

/// Parses watched symbols from a buffered reader.
///
/// Symbols are upper-cased and de-duplicated while preserving the first
/// occurrence's order, so the fetch request stays stable across refreshes.
pub fn parse_symbols<R: BufRead>(reader: R) -> Result<Vec<String>, QuoteError> {
    let mut symbols: Vec<String> = Vec::new();

    for line_result in reader.lines() {
        let line = line_result.map_err(QuoteError::Io)?;
        for token in line.split(|c: char| c == ',' || c.is_whitespace()) {
            let symbol = token.trim().to_uppercase();
            if symbol.is_empty() || symbols.contains(&symbol) {
                continue;
            }
            symbols.push(symbol);
        }
    }

    if symbols.is_empty() {
        return Err(QuoteError::ParseWatchlist(
            "no symbols found in watchlist".to_string(),
        ));
    }
    Ok(symbols)
}

/// Parses holdings from a buffered reader.
///
/// Each non-empty, non-comment line must hold exactly three comma-separated
/// fields: symbol, quantity, unit cost. Returns an error naming the offending
/// line if any field is missing or fails to parse as a number.
pub fn parse_holdings<R: BufRead>(reader: R) -> Result<Vec<Position>, QuoteError> {
    let mut positions = Vec::new();

    for (index, line_result) in reader.lines().enumerate() {
        let line = line_result.map_err(QuoteError::Io)?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        if fields.len() != 3 {
            return Err(QuoteError::ParseHoldings(format!(
                "line {}: expected SYMBOL,QUANTITY,UNIT_COST, got {:?}",
                index + 1,
                trimmed
            )));
        }

        let quantity: f64 = fields[1].parse().map_err(|e| {
            QuoteError::ParseHoldings(format!("line {}: bad quantity: {}", index + 1, e))
        })?;
        let unit_cost: f64 = fields[2].parse().map_err(|e| {
            QuoteError::ParseHoldings(format!("line {}: bad unit cost: {}", index + 1, e))
        })?;

        positions.push(Position::new(&fields[0].to_uppercase(), quantity, unit_cost));
    }
    Ok(positions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn parses_symbols_split_by_commas_spaces_and_newlines() {
        let input = "aapl, msft\ntsla googl";
        let symbols = parse_symbols(Cursor::new(input)).unwrap();
        assert_eq!(symbols, vec!["AAPL", "MSFT", "TSLA", "GOOGL"]);
    }

    #[test]
    fn drops_duplicate_symbols_keeping_first_order() {
        let symbols = parse_symbols(Cursor::new("AAPL,MSFT,aapl")).unwrap();
        assert_eq!(symbols, vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn empty_watchlist_is_an_error() {
        let err = parse_symbols(Cursor::new("  \n, ,\n")).unwrap_err();
        assert!(matches!(err, QuoteError::ParseWatchlist(_)));
    }

    #[test]
    fn parses_holdings_lines() {
        let input = "# my lots\nAAPL, 10, 150.5\n\nmsft,2,300\n";
        let positions = parse_holdings(Cursor::new(input)).unwrap();
        assert_eq!(positions.len(), 2);
        assert_eq!(positions[0].symbol, "AAPL");
        assert_eq!(positions[0].value(), 1505.0);
        assert_eq!(positions[1].symbol, "MSFT");
    }

    #[test]
    fn malformed_holdings_line_is_an_error() {
        let err = parse_holdings(Cursor::new("AAPL,ten,150")).unwrap_err();
        assert!(matches!(err, QuoteError::ParseHoldings(_)));
    }
}
