//! Catalog loading into a shared star map
//!
//! The fetch runs without holding the map lock. When two loads race, the
//! one that resolves last wins.

use folio_data::{ApiClient, DataResult, Delimiter, StarCatalog};
use parking_lot::RwLock;
use std::sync::Arc;

use crate::star_map::StarMap;

pub type SharedStarMap = Arc<RwLock<StarMap>>;

pub fn shared(map: StarMap) -> SharedStarMap {
    Arc::new(RwLock::new(map))
}

/// Fetch `url` and install it as the map's catalog.
///
/// Failures are logged and leave the map as it was (empty on first load);
/// the error is returned for callers that want to report it elsewhere.
pub async fn load_catalog(map: &SharedStarMap, client: &ApiClient, url: &str) -> DataResult<usize> {
    match StarCatalog::fetch(client, url, Delimiter::Auto).await {
        Ok(catalog) => {
            let count = catalog.len();
            let mut guard = map.write();
            guard.set_catalog(catalog.into_stars(), &mut rand::thread_rng());
            tracing::info!("Star map ready: {}", guard.status_line());
            Ok(count)
        }
        Err(e) => {
            tracing::error!("Failed to load star catalog from {}: {}", url, e);
            Err(e)
        }
    }
}
