//! Discover Networks Use Case
//!
//! Fetches blockchains and, per blockchain, currencies; merges both with the
//! built-in defaults and assembles a `Network` per complete blockchain. The
//! whole pass runs under one `CompletionCoordinator` and delivers its result
//! once, after every sub-query has settled.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::oneshot;

use crate::application::coordination::{merge_with_defaults, CompletionCoordinator};
use crate::application::use_cases::networks::assembler::assemble_network;
use crate::domain::gateways::BlockchainQuery;
use crate::domain::models::defaults::{default_blockchains, default_currencies};
use crate::domain::models::network::Network;

/// Use case for discovering the current network catalog
pub struct DiscoverNetworksUseCase {
    blockchain_query: Arc<dyn BlockchainQuery>,
}

impl DiscoverNetworksUseCase {
    /// Create a new DiscoverNetworksUseCase
    #[must_use]
    pub fn new(blockchain_query: Arc<dyn BlockchainQuery>) -> Self {
        Self { blockchain_query }
    }

    /// Execute the use case
    ///
    /// Never fails: failed remote list queries degrade to the built-in
    /// defaults and incomplete blockchains are left out. The returned list is
    /// possibly empty and in no particular order.
    pub async fn execute(&self, mainnet: bool) -> Vec<Network> {
        tracing::info!(mainnet, "Discovering networks");

        let (tx, rx) = oneshot::channel();
        let networks = Arc::new(Mutex::new(Vec::new()));

        let collected = networks.clone();
        let coordinator = Arc::new(CompletionCoordinator::new(move || {
            let discovered = std::mem::take(&mut *collected.lock().unwrap_or_else(PoisonError::into_inner));
            let _ = tx.send(discovered);
        }));

        let query = self.blockchain_query.clone();
        let inner = coordinator.clone();
        coordinator.spawn(async move {
            let remote = query.list_blockchains(mainnet).await;
            let blockchains = merge_with_defaults(default_blockchains(mainnet), remote, |b| b.id.clone());
            tracing::debug!(count = blockchains.len(), "Blockchains merged");

            for blockchain in blockchains.into_values() {
                let query = query.clone();
                let networks = networks.clone();
                inner.spawn(async move {
                    let remote = query.list_currencies(&blockchain.id).await;
                    let currencies =
                        merge_with_defaults(default_currencies(&blockchain.id), remote, |c| c.id.clone());

                    if let Some(network) = assemble_network(&blockchain, currencies.into_values()) {
                        tracing::debug!(network = %network.uids(), "Network assembled");
                        networks
                            .lock()
                            .unwrap_or_else(PoisonError::into_inner)
                            .push(network);
                    }
                });
            }
        });

        let discovered = rx.await.unwrap_or_else(|_| {
            tracing::error!("Discovery completed without delivering a result");
            Vec::new()
        });

        tracing::info!(count = discovered.len(), "Networks discovered");
        discovered
    }
}
