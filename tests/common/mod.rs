//! Common test utilities for integration tests
//!
//! Provides a `wiremock` stand-in for the blockchain database, JSON builders
//! for its records, and a test application wired against it.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::util::ServiceExt;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use blockchain_network_discovery::infrastructure::driven_adapters::config::{
    AppConfig, BlockchainDbConfig, DiscoveryConfig, LoggingConfig, ServerConfig,
};
use blockchain_network_discovery::infrastructure::driven_adapters::{BlockchainDb, BlockchainDbClient};
use blockchain_network_discovery::infrastructure::driving_adapters::api_rest::{self, AppState};

/// Test configuration pointing at `base_url`
pub fn create_test_config(base_url: &str, address_chunk_size: usize) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        blockchain_db: BlockchainDbConfig {
            base_url: base_url.to_string(),
            api_token: None,
            timeout_secs: 5,
            connect_timeout_secs: 1,
        },
        discovery: DiscoveryConfig {
            mainnet: true,
            address_chunk_size,
        },
        logging: LoggingConfig::default(),
    }
}

/// A `BlockchainDb` talking to the mock server
pub fn blockchain_db(server: &MockServer) -> BlockchainDb {
    let client = BlockchainDbClient::new(reqwest::Client::new(), &server.uri(), None).expect("valid mock server uri");
    BlockchainDb::new(client)
}

/// Test application context
pub struct TestApp {
    pub router: Router,
    pub server: MockServer,
}

impl TestApp {
    /// Create a test application backed by a fresh mock blockchain database
    pub async fn new() -> Self {
        Self::with_chunk_size(50).await
    }

    pub async fn with_chunk_size(address_chunk_size: usize) -> Self {
        let server = MockServer::start().await;
        let config = create_test_config(&server.uri(), address_chunk_size);
        let state = AppState::new(config, Arc::new(blockchain_db(&server)));

        Self {
            router: api_rest::router(state),
            server,
        }
    }

    /// Send a request through the router, returning the status and JSON body
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(body) => {
                request = request.header(header::CONTENT_TYPE, "application/json");
                Body::from(body.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into()))
        };
        (status, json)
    }
}

/// HAL collection envelope
pub fn embedded(key: &str, items: Vec<Value>, next: Option<String>) -> Value {
    let mut body = json!({ "_embedded": { key: items } });
    if let Some(next) = next {
        body["_links"] = json!({ "next": { "href": next } });
    }
    body
}

pub fn blockchain_json(id: &str, native_currency_id: &str, is_mainnet: bool, fees: &[(&str, &str)]) -> Value {
    json!({
        "id": id,
        "name": id,
        "network": if is_mainnet { "mainnet" } else { "testnet" },
        "is_mainnet": is_mainnet,
        "native_currency_id": native_currency_id,
        "block_height": 800_000,
        "fee_estimates": fees
            .iter()
            .map(|(tier, amount)| json!({
                "fee": { "amount": amount, "currency_id": native_currency_id },
                "tier": tier,
                "estimated_confirmation_in": 600_000
            }))
            .collect::<Vec<_>>(),
        "confirmations_until_final": 6
    })
}

pub fn currency_json(id: &str, blockchain_id: &str, code: &str, denominations: &[(u8, &str)]) -> Value {
    json!({
        "currency_id": id,
        "blockchain_id": blockchain_id,
        "name": code.to_uppercase(),
        "code": code,
        "type": "native",
        "denominations": denominations
            .iter()
            .map(|(decimals, short_name)| json!({
                "name": short_name,
                "short_name": short_name,
                "decimals": decimals
            }))
            .collect::<Vec<_>>()
    })
}

pub fn token_json(blockchain_id: &str, code: &str, address: &str) -> Value {
    json!({
        "currency_id": format!("{blockchain_id}:{address}"),
        "blockchain_id": blockchain_id,
        "name": code.to_uppercase(),
        "code": code,
        "type": "erc20",
        "address": address,
        "denominations": [
            { "name": code.to_uppercase(), "short_name": code, "decimals": 18 }
        ]
    })
}

pub fn transaction_json(id: &str, blockchain_id: &str) -> Value {
    json!({
        "transaction_id": id,
        "blockchain_id": blockchain_id,
        "hash": format!("hash-{id}"),
        "status": "confirmed",
        "block_height": 100,
        "confirmations": 6,
        "timestamp": "2020-01-01T00:00:00Z"
    })
}

/// Mount `GET /blockchains` for the given network flavour
pub async fn mount_blockchains(server: &MockServer, mainnet: bool, blockchains: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/blockchains"))
        .and(query_param("testnet", (!mainnet).to_string()))
        .respond_with(ResponseTemplate::new(200).set_body_json(embedded("blockchains", blockchains, None)))
        .mount(server)
        .await;
}

/// Mount the root-array `GET /currencies?type=erc20` token list
pub async fn mount_tokens(server: &MockServer, tokens: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/currencies"))
        .and(query_param("type", "erc20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(Value::Array(tokens)))
        .mount(server)
        .await;
}

/// Mount `GET /currencies` for one blockchain
pub async fn mount_currencies(server: &MockServer, blockchain_id: &str, currencies: Vec<Value>) {
    Mock::given(method("GET"))
        .and(path("/currencies"))
        .and(query_param("blockchain_id", blockchain_id))
        .respond_with(ResponseTemplate::new(200).set_body_json(embedded("currencies", currencies, None)))
        .mount(server)
        .await;
}
