//! End-to-end tests for network discovery
//!
//! `DiscoverNetworksUseCase` runs against a `wiremock` blockchain database
//! through the real HTTP adapter.

mod common;

use std::sync::Arc;

use blockchain_network_discovery::application::use_cases::networks::DiscoverNetworksUseCase;
use blockchain_network_discovery::domain::Network;
use blockchain_network_discovery::infrastructure::driven_adapters::{BlockchainDb, BlockchainDbClient};
use wiremock::MockServer;

use common::{blockchain_db, blockchain_json, currency_json};

async fn discover(server: &MockServer, mainnet: bool) -> Vec<Network> {
    DiscoverNetworksUseCase::new(Arc::new(blockchain_db(server)))
        .execute(mainnet)
        .await
}

fn find<'a>(networks: &'a [Network], uids: &str) -> Option<&'a Network> {
    networks.iter().find(|n| n.uids() == uids)
}

#[tokio::test]
async fn test_single_remote_blockchain_yields_network() {
    let server = MockServer::start().await;
    common::mount_blockchains(&server, true, vec![blockchain_json("btc-mainnet", "btc", true, &[("10m", "5")])]).await;
    common::mount_currencies(
        &server,
        "btc-mainnet",
        vec![currency_json("btc", "btc-mainnet", "btc", &[(0, "SAT"), (8, "BTC")])],
    )
    .await;

    let networks = discover(&server, true).await;

    let network = find(&networks, "btc-mainnet").unwrap();
    assert_eq!(network.currency().code(), "btc");
    assert_eq!(network.default_association().unwrap().default_unit().decimals(), 8);
    assert_eq!(network.fees().len(), 1);
    assert_eq!(network.fees()[0].time_interval_ms(), 600_000);
    assert_eq!(network.height(), 800_000);
}

#[tokio::test]
async fn test_blockchain_without_matching_currency_is_dropped() {
    let server = MockServer::start().await;
    common::mount_blockchains(&server, true, vec![blockchain_json("doge-mainnet", "doge", true, &[("10m", "5")])]).await;
    common::mount_currencies(
        &server,
        "doge-mainnet",
        vec![currency_json("btc", "doge-mainnet", "btc", &[(0, "SAT")])],
    )
    .await;

    let networks = discover(&server, true).await;

    assert!(find(&networks, "doge-mainnet").is_none());
    assert_eq!(networks.len(), 3);
}

#[tokio::test]
async fn test_blockchain_without_parsable_fee_is_dropped() {
    let server = MockServer::start().await;
    common::mount_blockchains(
        &server,
        true,
        vec![blockchain_json("btc-mainnet", "btc", true, &[("soon", "5"), ("10m", "lots")])],
    )
    .await;
    common::mount_currencies(
        &server,
        "btc-mainnet",
        vec![currency_json("btc", "btc-mainnet", "btc", &[(0, "SAT"), (8, "BTC")])],
    )
    .await;

    let networks = discover(&server, true).await;

    assert!(find(&networks, "btc-mainnet").is_none());
}

#[tokio::test]
async fn test_unreachable_database_yields_defaults() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let client = BlockchainDbClient::new(reqwest::Client::new(), &uri, None).unwrap();
    let db = BlockchainDb::new(client);
    let networks = DiscoverNetworksUseCase::new(Arc::new(db)).execute(false).await;

    let mut ids: Vec<&str> = networks.iter().map(Network::uids).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec!["bitcoin-cash-testnet", "bitcoin-testnet", "ethereum-ropsten"]);
}

#[tokio::test]
async fn test_remote_currency_overrides_default_by_id() {
    let server = MockServer::start().await;
    common::mount_currencies(
        &server,
        "bitcoin-mainnet",
        vec![currency_json(
            "bitcoin-mainnet:__native__",
            "bitcoin-mainnet",
            "btc",
            &[(0, "sat"), (2, "bits"), (8, "btc")],
        )],
    )
    .await;

    let networks = discover(&server, true).await;

    let bitcoin = find(&networks, "bitcoin-mainnet").unwrap();
    let association = bitcoin.default_association().unwrap();
    assert_eq!(association.units().len(), 3);
    assert_eq!(association.default_unit().decimals(), 8);
}
