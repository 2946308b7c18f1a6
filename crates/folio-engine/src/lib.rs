//! Star map widget shared by the native tools and the web page.
//!
//! The widget owns the loaded catalog and the displayed subset, answers
//! pointer hover queries and redraws on demand. Browser glue lives in
//! [`wasm`] and only builds for wasm32.

#![cfg_attr(target_arch = "wasm32", allow(clippy::unused_unit))]

pub mod loader;
pub mod star_map;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use loader::{load_catalog, shared, SharedStarMap};
pub use star_map::{StarMap, StarMapConfig};
