//! Shared HTTP client
//!
//! Native builds go through reqwest. The wasm32 build uses the browser's
//! `window.fetch`, so the same clients work inside the page.
//!
//! One `ApiClient` is built per process and handed to every consumer by
//! reference; it is cheap to clone (the underlying connection pool is
//! shared).

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use url::Url;

use crate::config::SiteConfig;
use crate::error::{DataError, DataResult};

#[derive(Clone)]
pub struct ApiClient {
    config: Arc<SiteConfig>,
    /// Base for relative resource paths such as `/stars.csv`
    origin: Option<Url>,
    #[cfg(not(target_arch = "wasm32"))]
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: SiteConfig) -> DataResult<Self> {
        #[cfg(not(target_arch = "wasm32"))]
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            config: Arc::new(config),
            origin: None,
            #[cfg(not(target_arch = "wasm32"))]
            http,
        })
    }

    /// Origin used to resolve relative resource paths
    pub fn with_origin(mut self, origin: &str) -> DataResult<Self> {
        self.origin = Some(Url::parse(origin)?);
        Ok(self)
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Absolute URL for `resource`; relative paths are joined onto the origin.
    ///
    /// In the browser a relative path is left as is and fetch resolves it
    /// against the page.
    pub fn resolve(&self, resource: &str) -> DataResult<String> {
        match Url::parse(resource) {
            Ok(url) => Ok(url.into()),
            Err(url::ParseError::RelativeUrlWithoutBase) => match &self.origin {
                Some(origin) => Ok(origin.join(resource)?.into()),
                None if cfg!(target_arch = "wasm32") => Ok(resource.to_string()),
                None => Err(url::ParseError::RelativeUrlWithoutBase.into()),
            },
            Err(e) => Err(e.into()),
        }
    }

    /// Join `path` onto a base URL and append query pairs
    pub fn endpoint(base: &str, path: &str, query: &[(&str, String)]) -> DataResult<String> {
        let base = base.trim_end_matches('/');
        let mut url = Url::parse(&format!("{}{}", base, path))?;
        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }
        Ok(url.into())
    }

    pub fn backend_endpoint(&self, path: &str, query: &[(&str, String)]) -> DataResult<String> {
        Self::endpoint(&self.config.backend_url, path, query)
    }

    pub fn market_endpoint(&self, path: &str, query: &[(&str, String)]) -> DataResult<String> {
        Self::endpoint(&self.config.market_url, path, query)
    }

    /// GET `url` and decode the body as JSON into `T`.
    ///
    /// Shape mismatches become [`DataError::Schema`] instead of surfacing later.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> DataResult<T> {
        let text = self.get_text(url).await?;
        decode_json(url, &text)
    }

    /// POST `body` as JSON and decode the JSON reply
    pub async fn post_json<B, T>(&self, url: &str, body: &B) -> DataResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let payload = serde_json::to_string(body)?;
        let text = self.post_text(url, payload).await?;
        decode_json(url, &text)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub async fn get_text(&self, url: &str) -> DataResult<String> {
        let response = self.http.get(url).send().await?;
        read_body(url, response).await
    }

    #[cfg(not(target_arch = "wasm32"))]
    async fn post_text(&self, url: &str, payload: String) -> DataResult<String> {
        let response = self
            .http
            .post(url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(payload)
            .send()
            .await?;
        read_body(url, response).await
    }

    #[cfg(target_arch = "wasm32")]
    pub async fn get_text(&self, url: &str) -> DataResult<String> {
        let win = web_sys::window().ok_or_else(|| DataError::Fetch("no window".to_string()))?;
        read_body(url, win.fetch_with_str(url)).await
    }

    #[cfg(target_arch = "wasm32")]
    async fn post_text(&self, url: &str, payload: String) -> DataResult<String> {
        let win = web_sys::window().ok_or_else(|| DataError::Fetch("no window".to_string()))?;

        let init = web_sys::RequestInit::new();
        init.set_method("POST");
        init.set_body(&wasm_bindgen::JsValue::from_str(&payload));
        let request = web_sys::Request::new_with_str_and_init(url, &init).map_err(js_err)?;
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(js_err)?;

        read_body(url, win.fetch_with_request(&request)).await
    }
}

fn decode_json<T: DeserializeOwned>(url: &str, text: &str) -> DataResult<T> {
    serde_json::from_str(text).map_err(|source| DataError::Schema {
        url: url.to_string(),
        source,
    })
}

#[cfg(not(target_arch = "wasm32"))]
async fn read_body(url: &str, response: reqwest::Response) -> DataResult<String> {
    if !response.status().is_success() {
        return Err(DataError::Status {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }

    Ok(response.text().await?)
}

#[cfg(target_arch = "wasm32")]
async fn read_body(url: &str, pending: js_sys::Promise) -> DataResult<String> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;

    let resp_val = JsFuture::from(pending).await.map_err(js_err)?;
    let resp: web_sys::Response = resp_val.dyn_into().map_err(js_err)?;

    if !resp.ok() {
        return Err(DataError::Status {
            url: url.to_string(),
            status: resp.status(),
        });
    }

    let text_promise = resp.text().map_err(js_err)?;
    let text_val = JsFuture::from(text_promise).await.map_err(js_err)?;
    text_val
        .as_string()
        .ok_or_else(|| DataError::Fetch("response.text() was not a string".to_string()))
}

#[cfg(target_arch = "wasm32")]
fn js_err(e: wasm_bindgen::JsValue) -> DataError {
    DataError::Fetch(format!("{:?}", e))
}
