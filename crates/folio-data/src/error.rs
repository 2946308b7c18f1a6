//! Error types for data acquisition

use thiserror::Error;

/// Result type for data acquisition
pub type DataResult<T> = Result<T, DataError>;

/// Errors raised while fetching or decoding external data
#[derive(Error, Debug)]
pub enum DataError {
    #[cfg(not(target_arch = "wasm32"))]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Fetch error: {0}")]
    Fetch(String),

    #[error("Request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed response from {url}: {source}")]
    Schema {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("ABI decode error: {0}")]
    Abi(#[from] alloy_sol_types::Error),

    #[error("Ledger error: {0}")]
    Ledger(String),

    #[error("Config error: {0}")]
    Config(#[from] serde_json::Error),
}
