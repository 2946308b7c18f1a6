//! Site configuration: API base URLs and the catalog location.
//!
//! Values come from, lowest precedence first: built-in defaults, variables
//! injected at build time, the runtime environment, and an optional JSON
//! file.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::DataResult;

pub const BACKEND_URL_VAR: &str = "FOLIO_BACKEND_URL";
pub const MARKET_URL_VAR: &str = "FOLIO_MARKET_URL";
pub const CATALOG_URL_VAR: &str = "FOLIO_CATALOG_URL";
pub const LEDGER_RPC_URL_VAR: &str = "FOLIO_LEDGER_RPC_URL";
pub const LEDGER_ADDRESS_VAR: &str = "FOLIO_LEDGER_ADDRESS";

const DEFAULT_BACKEND_URL: &str = "http://localhost:3000";
const DEFAULT_MARKET_URL: &str = "https://api.coingecko.com/api/v3";
const DEFAULT_CATALOG_URL: &str = "/stars.csv";
const DEFAULT_LEDGER_RPC_URL: &str = "http://localhost:8545";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default = "SiteConfig::from_env")]
pub struct SiteConfig {
    /// Homepage backend serving activity and place search
    pub backend_url: String,
    /// Token market API (CoinGecko v3 compatible)
    pub market_url: String,
    /// Star catalog resource, absolute URL or path on the hosting origin
    pub catalog_url: String,
    /// Ethereum JSON-RPC endpoint used for contract reads
    pub ledger_rpc_url: String,
    /// Destination ledger contract address; no address means no destinations
    pub ledger_address: Option<String>,
    pub user_agent: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            backend_url: option_env!("FOLIO_BACKEND_URL")
                .unwrap_or(DEFAULT_BACKEND_URL)
                .to_string(),
            market_url: option_env!("FOLIO_MARKET_URL")
                .unwrap_or(DEFAULT_MARKET_URL)
                .to_string(),
            catalog_url: option_env!("FOLIO_CATALOG_URL")
                .unwrap_or(DEFAULT_CATALOG_URL)
                .to_string(),
            ledger_rpc_url: option_env!("FOLIO_LEDGER_RPC_URL")
                .unwrap_or(DEFAULT_LEDGER_RPC_URL)
                .to_string(),
            ledger_address: option_env!("FOLIO_LEDGER_ADDRESS").map(str::to_string),
            user_agent: concat!("folio/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl SiteConfig {
    /// Defaults overridden by the process environment
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup; empty values are ignored
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(url) = get(BACKEND_URL_VAR) {
            self.backend_url = url;
        }
        if let Some(url) = get(MARKET_URL_VAR) {
            self.market_url = url;
        }
        if let Some(url) = get(CATALOG_URL_VAR) {
            self.catalog_url = url;
        }
        if let Some(url) = get(LEDGER_RPC_URL_VAR) {
            self.ledger_rpc_url = url;
        }
        if let Some(address) = get(LEDGER_ADDRESS_VAR) {
            self.ledger_address = Some(address);
        }
        self
    }

    /// Load from a JSON file; missing keys fall back to [`SiteConfig::from_env`]
    pub fn load(path: &Path) -> DataResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save(&self, path: &Path) -> DataResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_replace_defaults() {
        let config = SiteConfig::default().with_overrides(|key| match key {
            BACKEND_URL_VAR => Some("https://api.example.org".to_string()),
            CATALOG_URL_VAR => Some("   ".to_string()),
            _ => None,
        });

        assert_eq!(config.backend_url, "https://api.example.org");
        assert_eq!(config.catalog_url, SiteConfig::default().catalog_url);
        assert_eq!(config.market_url, SiteConfig::default().market_url);
    }

    #[test]
    fn test_ledger_overrides() {
        let address = "0x5FbDB2315678afecb367f032d93F642f64180aa3";
        let config = SiteConfig::default().with_overrides(|key| match key {
            LEDGER_ADDRESS_VAR => Some(address.to_string()),
            LEDGER_RPC_URL_VAR => Some("https://rpc.example.org".to_string()),
            _ => None,
        });

        assert_eq!(config.ledger_address.as_deref(), Some(address));
        assert_eq!(config.ledger_rpc_url, "https://rpc.example.org");
    }

    #[test]
    fn test_load_partial_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.json");
        std::fs::write(&path, r#"{ "market_url": "http://127.0.0.1:9000" }"#).unwrap();

        let config = SiteConfig::load(&path).unwrap();
        assert_eq!(config.market_url, "http://127.0.0.1:9000");
        assert!(!config.backend_url.is_empty());
        assert!(config.user_agent.starts_with("folio/"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.json");

        let mut config = SiteConfig::default();
        config.catalog_url = "https://cdn.example.org/stars.csv".to_string();
        config.save(&path).unwrap();

        assert_eq!(SiteConfig::load(&path).unwrap(), config);
    }
}
