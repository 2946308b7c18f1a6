//! Data acquisition for the homepage: the star catalog and the read-only
//! JSON sources (activity feed, token markets, place search), plus the
//! destination ledger contract.
//!
//! Every source goes through one shared [`ApiClient`], and every response
//! is decoded into explicit types at the boundary.

pub mod activity;
pub mod catalog;
pub mod config;
pub mod error;
pub mod http_adapter;
pub mod ledger;
pub mod markets;
pub mod places;

pub use activity::{ActivityClient, ListItem, RecentLists};
pub use catalog::{sample_in_order, Delimiter, StarCatalog};
pub use config::SiteConfig;
pub use error::{DataError, DataResult};
pub use http_adapter::ApiClient;
pub use ledger::{GeoCoordinate, LedgerClient, MapMarker};
pub use markets::{
    MarketClient, PricePoint, PriceQuery, PriceTier, PriceView, SortOrder, TokenPrice,
    DEFAULT_HISTORY_DAYS,
};
pub use places::{Place, PlacesClient, ATTRACTION_CATEGORIES, DEFAULT_RADIUS_M};
