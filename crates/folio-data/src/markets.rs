//! Token market prices (CoinGecko v3 compatible API)
//!
//! Prices are fetched once and then searched, filtered into price tiers
//! and sorted client-side. Per-coin price history comes from
//! `/coins/{id}/market_chart`.

use folio_core::round_half_away;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::error::DataResult;
use crate::http_adapter::ApiClient;

/// One row of `/coins/markets`; only the fields the explorer reads
#[derive(Clone, Debug, Deserialize)]
pub struct CoinMarketData {
    pub id: String,
    pub symbol: String,
    pub current_price: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TokenPrice {
    pub id: String,
    /// Upper-cased ticker
    pub symbol: String,
    pub usd_value: Option<f64>,
}

impl TokenPrice {
    /// Price used for filtering and sorting; missing counts as zero
    pub fn value(&self) -> f64 {
        self.usd_value.unwrap_or(0.0)
    }
}

impl From<CoinMarketData> for TokenPrice {
    fn from(coin: CoinMarketData) -> Self {
        Self {
            id: coin.id,
            symbol: coin.symbol.to_uppercase(),
            usd_value: coin.current_price,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PriceTier {
    #[default]
    All,
    /// $100 and up
    Major,
    /// $1 to $100
    Mid,
    /// Under $1
    Small,
}

impl PriceTier {
    pub fn includes(&self, value: f64) -> bool {
        match self {
            Self::All => true,
            Self::Major => value >= 100.0,
            Self::Mid => (1.0..100.0).contains(&value),
            Self::Small => value < 1.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    #[default]
    ValueDesc,
    ValueAsc,
    SymbolAsc,
    SymbolDesc,
}

impl SortOrder {
    fn compare(&self, a: &TokenPrice, b: &TokenPrice) -> Ordering {
        match self {
            Self::ValueDesc => b.value().partial_cmp(&a.value()).unwrap_or(Ordering::Equal),
            Self::ValueAsc => a.value().partial_cmp(&b.value()).unwrap_or(Ordering::Equal),
            Self::SymbolAsc => a.symbol.cmp(&b.symbol),
            Self::SymbolDesc => b.symbol.cmp(&a.symbol),
        }
    }
}

/// Search, tier filter, sort order and display limit
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceQuery {
    pub search: String,
    pub tier: PriceTier,
    pub sort: SortOrder,
    pub limit: usize,
}

impl Default for PriceQuery {
    fn default() -> Self {
        Self {
            search: String::new(),
            tier: PriceTier::All,
            sort: SortOrder::ValueDesc,
            limit: 20,
        }
    }
}

/// Result of applying a [`PriceQuery`]
#[derive(Clone, Debug, PartialEq)]
pub struct PriceView {
    /// Rows to display, at most `limit`
    pub rows: Vec<TokenPrice>,
    /// Rows matching search and tier before the limit
    pub matched: usize,
    pub total: usize,
}

impl PriceView {
    pub fn summary(&self) -> String {
        format!("Viewing {} of {} tokens", self.matched, self.total)
    }
}

impl PriceQuery {
    pub fn apply(&self, prices: &[TokenPrice]) -> PriceView {
        let needle = self.search.to_lowercase();

        let mut rows: Vec<TokenPrice> = prices
            .iter()
            .filter(|p| needle.is_empty() || p.symbol.to_lowercase().contains(&needle))
            .filter(|p| self.tier.includes(p.value()))
            .cloned()
            .collect();

        rows.sort_by(|a, b| self.sort.compare(a, b));

        let matched = rows.len();
        rows.truncate(self.limit);

        PriceView {
            rows,
            matched,
            total: prices.len(),
        }
    }
}

/// Days of history the chart shows by default
pub const DEFAULT_HISTORY_DAYS: u32 = 90;

/// `/coins/{id}/market_chart`; caps and volumes are ignored
#[derive(Clone, Debug, Deserialize)]
struct MarketChart {
    /// `[timestamp_ms, price]` pairs, oldest first
    prices: Vec<(f64, f64)>,
}

/// One point of a price chart, in USD rounded to cents
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Unix time in milliseconds
    pub timestamp_ms: i64,
    pub price: f64,
}

impl From<(f64, f64)> for PricePoint {
    fn from((timestamp, price): (f64, f64)) -> Self {
        Self {
            timestamp_ms: timestamp as i64,
            price: round_half_away(price, 2),
        }
    }
}

pub struct MarketClient<'a> {
    client: &'a ApiClient,
}

impl<'a> MarketClient<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Top 250 coins by market cap, priced in USD
    pub async fn top_markets(&self) -> DataResult<Vec<TokenPrice>> {
        let url = self.client.market_endpoint(
            "/coins/markets",
            &[
                ("vs_currency", "usd".to_string()),
                ("order", "market_cap_desc".to_string()),
                ("per_page", "250".to_string()),
                ("page", "1".to_string()),
                ("sparkline", "false".to_string()),
            ],
        )?;

        let markets: Vec<CoinMarketData> = self.client.get_json(&url).await?;
        tracing::info!("Loaded {} market rows", markets.len());

        Ok(markets.into_iter().map(TokenPrice::from).collect())
    }

    /// Daily-ish USD prices for one coin over the last `days` days
    pub async fn price_history(&self, id: &str, days: u32) -> DataResult<Vec<PricePoint>> {
        let url = self.client.market_endpoint(
            &format!("/coins/{}/market_chart", id),
            &[
                ("vs_currency", "usd".to_string()),
                ("days", days.to_string()),
            ],
        )?;

        let chart: MarketChart = self.client.get_json(&url).await?;
        tracing::info!("Loaded {} price points for {}", chart.prices.len(), id);

        Ok(chart.prices.into_iter().map(PricePoint::from).collect())
    }
}
