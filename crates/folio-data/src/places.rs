//! Place search around a coordinate, proxied by the homepage backend

use serde::{Deserialize, Serialize};

use crate::error::DataResult;
use crate::http_adapter::ApiClient;

/// Search radius used when the caller does not give one, in meters
pub const DEFAULT_RADIUS_M: u32 = 5000;

/// Categories treated as tourist attractions
pub const ATTRACTION_CATEGORIES: &[&str] = &[
    "entertainment.aquarium",
    "entertainment.museum",
    "entertainment.theme_park",
    "entertainment.zoo",
    "leisure.park.nature_reserve",
    "national_park",
    "tourism.sights.memorial.monument",
];

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlaceProperties {
    #[serde(default)]
    pub name: Option<String>,
    pub formatted: String,
    pub lat: f64,
    pub lon: f64,
    /// Meters from the search center
    #[serde(default)]
    pub distance: Option<f64>,
    pub place_id: String,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub housenumber: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    /// GeoJSON order: longitude, latitude
    pub coordinates: [f64; 2],
}

/// GeoJSON feature for one place
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Place {
    #[serde(rename = "type")]
    pub kind: String,
    pub geometry: Geometry,
    pub properties: PlaceProperties,
}

impl Place {
    /// Name, falling back to the formatted address
    pub fn display_name(&self) -> &str {
        self.properties
            .name
            .as_deref()
            .unwrap_or(&self.properties.formatted)
    }

    /// Distance in kilometers with two decimals, e.g. `"1.25 km"`
    pub fn distance_km(&self) -> Option<String> {
        self.properties
            .distance
            .map(|m| format!("{:.2} km", m / 1000.0))
    }
}

#[derive(Clone, Debug, Deserialize)]
struct PlacesResponse {
    features: Vec<Place>,
}

pub struct PlacesClient<'a> {
    client: &'a ApiClient,
}

impl<'a> PlacesClient<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Places of the given categories within `radius_m` of (lat, lon)
    pub async fn search(
        &self,
        categories: &[&str],
        lon: f64,
        lat: f64,
        radius_m: u32,
    ) -> DataResult<Vec<Place>> {
        let url = self.client.backend_endpoint(
            "/places/search",
            &[
                ("categories", categories.join(",")),
                ("lon", lon.to_string()),
                ("lat", lat.to_string()),
                ("radius", radius_m.to_string()),
            ],
        )?;

        let response: PlacesResponse = self.client.get_json(&url).await?;
        tracing::info!("Found {} places near ({}, {})", response.features.len(), lat, lon);
        Ok(response.features)
    }

    pub async fn search_attractions(&self, lon: f64, lat: f64, radius_m: u32) -> DataResult<Vec<Place>> {
        self.search(ATTRACTION_CATEGORIES, lon, lat, radius_m).await
    }
}
