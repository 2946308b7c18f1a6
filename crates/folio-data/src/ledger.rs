//! Visited destinations read from the DestinationLedger contract
//!
//! One `eth_call` of `getAllLocations()` over JSON-RPC; the contract stores
//! coordinates as decimal strings next to a free-text description.

use alloy_primitives::{hex, Address, Bytes};
use alloy_sol_types::{sol, SolCall};
use serde::{Deserialize, Serialize};

use crate::error::{DataError, DataResult};
use crate::http_adapter::ApiClient;

sol! {
    struct LocationVisited {
        string latitude;
        string longitude;
        string description;
    }

    function getAllLocations() external view returns (LocationVisited[] memory);
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// A pin on the destinations map
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapMarker {
    pub coordinates: GeoCoordinate,
    pub description: String,
}

impl MapMarker {
    /// `None` when either coordinate is not a finite number
    fn from_location(location: &LocationVisited) -> Option<Self> {
        let parse = |text: &str| text.trim().parse::<f64>().ok().filter(|v| v.is_finite());

        Some(Self {
            coordinates: GeoCoordinate {
                latitude: parse(&location.latitude)?,
                longitude: parse(&location.longitude)?,
            },
            description: location.description.clone(),
        })
    }
}

#[derive(Serialize)]
struct RpcRequest {
    jsonrpc: &'static str,
    id: u64,
    method: &'static str,
    params: (CallParams, &'static str),
}

#[derive(Serialize)]
struct CallParams {
    to: String,
    data: String,
}

#[derive(Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Bytes>,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

#[derive(Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

pub struct LedgerClient<'a> {
    client: &'a ApiClient,
}

impl<'a> LedgerClient<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    fn contract_address(&self) -> DataResult<Address> {
        let configured = self
            .client
            .config()
            .ledger_address
            .as_deref()
            .ok_or_else(|| DataError::Ledger("no contract address configured".to_string()))?;

        configured
            .trim()
            .parse::<Address>()
            .map_err(|e| DataError::Ledger(format!("invalid contract address {configured:?}: {e}")))
    }

    /// Every stored location with parseable coordinates, in contract order
    pub async fn try_locations(&self) -> DataResult<Vec<MapMarker>> {
        let address = self.contract_address()?;
        let rpc_url = &self.client.config().ledger_rpc_url;

        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method: "eth_call",
            params: (
                CallParams {
                    to: address.to_string(),
                    data: hex::encode_prefixed(getAllLocationsCall {}.abi_encode()),
                },
                "latest",
            ),
        };

        let response: RpcResponse = self.client.post_json(rpc_url, &request).await?;
        if let Some(err) = response.error {
            return Err(DataError::Rpc {
                code: err.code,
                message: err.message,
            });
        }
        let data = response
            .result
            .ok_or_else(|| DataError::Ledger("eth_call returned no result".to_string()))?;

        let locations = getAllLocationsCall::abi_decode_returns(&data, true)?._0;

        let markers: Vec<MapMarker> = locations.iter().filter_map(MapMarker::from_location).collect();
        if markers.len() < locations.len() {
            tracing::warn!(
                "Skipped {} ledger locations with invalid coordinates",
                locations.len() - markers.len()
            );
        }
        tracing::info!("Loaded {} destinations from ledger {}", markers.len(), address);
        Ok(markers)
    }

    /// Like [`LedgerClient::try_locations`], but failures are logged and
    /// read as an empty ledger
    pub async fn locations(&self) -> Vec<MapMarker> {
        match self.try_locations().await {
            Ok(markers) => markers,
            Err(e) => {
                tracing::error!("Error reading destination ledger: {}", e);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    const ADDRESS: &str = "0x5FbDB2315678afecb367f032d93F642f64180aa3";

    fn client_for(server: &mockito::Server, address: Option<&str>) -> ApiClient {
        let config = SiteConfig {
            ledger_rpc_url: server.url(),
            ledger_address: address.map(str::to_string),
            ..SiteConfig::default()
        };
        ApiClient::new(config).unwrap()
    }

    fn location(lat: &str, lon: &str, description: &str) -> LocationVisited {
        LocationVisited {
            latitude: lat.to_string(),
            longitude: lon.to_string(),
            description: description.to_string(),
        }
    }

    fn rpc_result(locations: Vec<LocationVisited>) -> String {
        let encoded = getAllLocationsCall::abi_encode_returns(&(locations,));
        format!(
            r#"{{"jsonrpc":"2.0","id":1,"result":"{}"}}"#,
            hex::encode_prefixed(encoded)
        )
    }

    #[tokio::test]
    async fn test_locations_decoded_in_order() {
        let mut server = mockito::Server::new_async().await;
        let selector = hex::encode_prefixed(getAllLocationsCall::SELECTOR);
        let mock = server
            .mock("POST", "/")
            .match_body(mockito::Matcher::AllOf(vec![
                mockito::Matcher::PartialJson(serde_json::json!({ "method": "eth_call" })),
                mockito::Matcher::Regex(selector),
            ]))
            .with_status(200)
            .with_body(rpc_result(vec![
                location("39.2905", "-76.6104", "Baltimore"),
                location("north", "0", "Nowhere"),
                location(" 48.8566 ", "2.3522", "Paris"),
            ]))
            .create_async()
            .await;

        let client = client_for(&server, Some(ADDRESS));
        let markers = LedgerClient::new(&client).try_locations().await.unwrap();

        assert_eq!(
            markers,
            vec![
                MapMarker {
                    coordinates: GeoCoordinate { latitude: 39.2905, longitude: -76.6104 },
                    description: "Baltimore".to_string(),
                },
                MapMarker {
                    coordinates: GeoCoordinate { latitude: 48.8566, longitude: 2.3522 },
                    description: "Paris".to_string(),
                },
            ]
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_rpc_error_reads_as_empty() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body(r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32000,"message":"execution reverted"}}"#)
            .create_async()
            .await;

        let client = client_for(&server, Some(ADDRESS));
        let ledger = LedgerClient::new(&client);

        let err = ledger.try_locations().await.unwrap_err();
        assert!(matches!(err, DataError::Rpc { code: -32000, .. }));
        assert!(ledger.locations().await.is_empty());
    }

    #[tokio::test]
    async fn test_garbage_result_is_abi_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body(r#"{"jsonrpc":"2.0","id":1,"result":"0x1234"}"#)
            .create_async()
            .await;

        let client = client_for(&server, Some(ADDRESS));
        let err = LedgerClient::new(&client).try_locations().await.unwrap_err();
        assert!(matches!(err, DataError::Abi(_)));
    }

    #[tokio::test]
    async fn test_missing_address_skips_the_call() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .expect(0)
            .create_async()
            .await;

        let client = client_for(&server, None);
        assert!(LedgerClient::new(&client).locations().await.is_empty());

        let bad = client_for(&server, Some("0xnot-an-address"));
        assert!(matches!(
            LedgerClient::new(&bad).try_locations().await,
            Err(DataError::Ledger(_))
        ));
        mock.assert_async().await;
    }
}
