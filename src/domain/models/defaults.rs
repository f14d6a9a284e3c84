//! Built-in Defaults
//!
//! Blockchains and currencies known without asking the blockchain database.
//! Remote records override these by id; when a remote list query fails,
//! discovery falls back to them.

use once_cell::sync::Lazy;

use super::blockchain::{BlockchainDescriptor, BlockchainFee};
use super::currency::{CurrencyDescriptor, Denomination};

/// Default blockchains, mainnet and testnet
pub static DEFAULT_BLOCKCHAINS: Lazy<Vec<BlockchainDescriptor>> = Lazy::new(|| {
    vec![
        blockchain("bitcoin-mainnet", "Bitcoin", "mainnet", true, "btc", 654_321, "30", 6),
        blockchain("bitcoin-cash-mainnet", "Bitcoin Cash", "mainnet", true, "bch", 1_000_000, "30", 6),
        blockchain("ethereum-mainnet", "Ethereum", "mainnet", true, "eth", 8_570_000, "2000000000", 6),
        blockchain("bitcoin-testnet", "Bitcoin Testnet", "testnet", false, "btc", 1_575_000, "30", 6),
        blockchain("bitcoin-cash-testnet", "Bitcoin Cash Testnet", "testnet", false, "bch", 1_575_000, "30", 6),
        blockchain("ethereum-ropsten", "Ethereum Ropsten", "testnet", false, "eth", 6_000_000, "2000000000", 6),
    ]
});

/// Default currencies, the native currency of each default blockchain
pub static DEFAULT_CURRENCIES: Lazy<Vec<CurrencyDescriptor>> = Lazy::new(|| {
    vec![
        bitcoin_like("bitcoin-mainnet", "Bitcoin", "btc", "₿"),
        bitcoin_like("bitcoin-cash-mainnet", "Bitcoin Cash", "bch", "BCH"),
        ether("ethereum-mainnet"),
        bitcoin_like("bitcoin-testnet", "Bitcoin Testnet", "btc", "₿"),
        bitcoin_like("bitcoin-cash-testnet", "Bitcoin Cash Testnet", "bch", "BCH"),
        ether("ethereum-ropsten"),
    ]
});

/// Default blockchains for the requested network flavour
#[must_use]
pub fn default_blockchains(mainnet: bool) -> Vec<BlockchainDescriptor> {
    DEFAULT_BLOCKCHAINS
        .iter()
        .filter(|b| b.is_mainnet == mainnet)
        .cloned()
        .collect()
}

/// Default currencies belonging to one blockchain
#[must_use]
pub fn default_currencies(blockchain_id: &str) -> Vec<CurrencyDescriptor> {
    DEFAULT_CURRENCIES
        .iter()
        .filter(|c| c.blockchain_id == blockchain_id)
        .cloned()
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn blockchain(
    id: &str,
    name: &str,
    network: &str,
    is_mainnet: bool,
    currency: &str,
    block_height: u64,
    fee_amount: &str,
    confirmations_until_final: u32,
) -> BlockchainDescriptor {
    BlockchainDescriptor {
        id: id.to_string(),
        name: name.to_string(),
        network: network.to_string(),
        is_mainnet,
        currency: currency.to_string(),
        block_height,
        fee_estimates: vec![BlockchainFee::new(fee_amount, "10m")],
        confirmations_until_final,
    }
}

fn bitcoin_like(blockchain_id: &str, name: &str, code: &str, symbol: &str) -> CurrencyDescriptor {
    let upper = code.to_uppercase();
    CurrencyDescriptor {
        id: format!("{blockchain_id}:__native__"),
        blockchain_id: blockchain_id.to_string(),
        name: name.to_string(),
        code: code.to_string(),
        kind: "native".to_string(),
        address: None,
        denominations: vec![
            Denomination::new(format!("{upper} Satoshi"), "sat", "sat", 0),
            Denomination::new(name, code, symbol, 8),
        ],
    }
}

fn ether(blockchain_id: &str) -> CurrencyDescriptor {
    CurrencyDescriptor {
        id: format!("{blockchain_id}:__native__"),
        blockchain_id: blockchain_id.to_string(),
        name: "Ethereum".to_string(),
        code: "eth".to_string(),
        kind: "native".to_string(),
        address: None,
        denominations: vec![
            Denomination::new("Wei", "wei", "wei", 0),
            Denomination::new("Gwei", "gwei", "gwei", 9),
            Denomination::new("Ether", "eth", "Ξ", 18),
        ],
    }
}
