//! HTTP fetch collaborator for the remote quote service.
//!
//! The core only needs "a batch of raw records for these symbols"; any
//! transport, HTTP-status, or decode failure is logged here and surfaces to
//! the caller as an empty batch, so the refresh loop keeps running.

use std::time::Duration;

use log::{debug, error};
use quote_common::QuoteError;
use quote_core::quote::{QuoteBatchResponse, RawQuote};

const QUOTE_ENDPOINT: &str = "https://query1.finance.yahoo.com/v7/finance/quote";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Blocking HTTP client for the upstream quote endpoint.
pub struct QuoteFetcher {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl QuoteFetcher {
    /// Builds a fetcher against the default upstream endpoint.
    pub fn new() -> Result<Self, QuoteError> {
        Self::with_endpoint(QUOTE_ENDPOINT)
    }

    /// Builds a fetcher against a custom endpoint (used by tests).
    fn with_endpoint(endpoint: &str) -> Result<Self, QuoteError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| QuoteError::Format(format!("failed to build HTTP client: {}", e)))?;
        Ok(QuoteFetcher {
            client,
            endpoint: endpoint.to_string(),
        })
    }

    /// Fetches one raw record per requested symbol.
    ///
    /// Failures yield an empty batch; deciding whether to render the empty
    /// batch or keep the previous one is the caller's policy.
    pub fn fetch_raw_quotes(&self, symbols: &[String]) -> Vec<RawQuote> {
        let joined = symbols.join(",");
        debug!("Fetching quotes for: {}", joined);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("lang", "en-US"),
                ("region", "US"),
                ("corsDomain", "finance.yahoo.com"),
                ("symbols", joined.as_str()),
            ])
            .send()
            .and_then(|res| res.error_for_status())
            .and_then(|res| res.json::<QuoteBatchResponse>());

        match response {
            Ok(body) => {
                if let Some(err) = body.quote_response.error {
                    error!("Quote service reported an error: {}", err);
                }
                body.quote_response.quotes
            }
            Err(e) => {
                error!("Quote fetch failed: {}", e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    /// Serves exactly one canned HTTP response on a loopback port and returns
    /// the endpoint URL to aim the fetcher at.
    fn serve_once(status_line: &'static str, body: &'static str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut buf = [0u8; 4096];
            let mut request = Vec::new();
            loop {
                let n = stream.read(&mut buf).unwrap();
                request.extend_from_slice(&buf[..n]);
                if n == 0 || request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let response = format!(
                "{}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
        });
        format!("http://{}", addr)
    }

    #[test]
    fn parses_a_successful_batch() {
        let endpoint = serve_once(
            "HTTP/1.1 200 OK",
            r#"{"quoteResponse":{"result":[{"symbol":"AAPL","marketState":"REGULAR","regularMarketPrice":187.5}],"error":null}}"#,
        );
        let fetcher = QuoteFetcher::with_endpoint(&endpoint).unwrap();
        let batch = fetcher.fetch_raw_quotes(&["AAPL".to_string()]);
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].symbol, "AAPL");
        assert_eq!(batch[0].regular_market_price, 187.5);
    }

    #[test]
    fn http_error_status_yields_an_empty_batch() {
        let endpoint = serve_once("HTTP/1.1 500 Internal Server Error", "{}");
        let fetcher = QuoteFetcher::with_endpoint(&endpoint).unwrap();
        assert!(fetcher.fetch_raw_quotes(&["AAPL".to_string()]).is_empty());
    }

    #[test]
    fn malformed_body_yields_an_empty_batch() {
        let endpoint = serve_once("HTTP/1.1 200 OK", "not json at all");
        let fetcher = QuoteFetcher::with_endpoint(&endpoint).unwrap();
        assert!(fetcher.fetch_raw_quotes(&["AAPL".to_string()]).is_empty());
    }
}
