//! WASM bindings for the browser star map widget

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
use crate::loader::{load_catalog, shared, SharedStarMap};
#[cfg(target_arch = "wasm32")]
use crate::star_map::{StarMap, StarMapConfig};

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub struct WasmStarMap {
    map: SharedStarMap,
    client: folio_data::ApiClient,
    renderer: folio_render::StarFieldRenderer,
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
impl WasmStarMap {
    /// `sample_size` of 0 shows the whole catalog
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, sample_size: usize) -> Result<WasmStarMap, JsValue> {
        let config = StarMapConfig {
            surface: folio_core::Surface::new(width, height),
            sample_size: (sample_size > 0).then_some(sample_size),
            ..StarMapConfig::default()
        };
        let map = StarMap::new(config);
        let renderer = map.renderer();
        let client = folio_data::ApiClient::new(folio_data::SiteConfig::default())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(Self {
            map: shared(map),
            client,
            renderer,
        })
    }

    /// Fetch the catalog; resolves to the number of stars loaded.
    /// Failures go to the console and resolve to 0; the map stays empty.
    pub fn load(&self, url: Option<String>) -> js_sys::Promise {
        let map = self.map.clone();
        let client = self.client.clone();
        let url = url.unwrap_or_else(|| client.config().catalog_url.clone());

        wasm_bindgen_futures::future_to_promise(async move {
            let count = match load_catalog(&map, &client, &url).await {
                Ok(count) => count,
                Err(e) => {
                    web_sys::console::error_1(&format!("Failed to load CSV: {}", e).into());
                    0
                }
            };
            Ok(JsValue::from(count as u32))
        })
    }

    pub fn resample(&self) -> usize {
        self.map.write().resample(&mut rand::thread_rng())
    }

    /// Tooltip text for the star under the pointer, if any
    pub fn pointer_move(&self, x: f64, y: f64) -> Option<String> {
        let mut map = self.map.write();
        map.pointer_move(x, y);
        map.tooltip().map(|t| t.text())
    }

    pub fn pointer_leave(&self) {
        self.map.write().pointer_leave();
    }

    pub fn status(&self) -> String {
        self.map.read().status_line()
    }

    /// Changes whenever the displayed set does; compare before redrawing
    pub fn revision(&self) -> u64 {
        self.map.read().revision()
    }

    /// RGBA pixels for `ImageData`, row-major
    pub fn pixels(&self) -> Vec<u8> {
        self.map.read().draw(&self.renderer).into_raw()
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.renderer.surface().width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.renderer.surface().height
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}
