//! Blockchain Database Wire Models
//!
//! JSON records of the blockchain database and their conversion into domain
//! descriptors. Only the consumed fields are modeled.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::models::blockchain::{BlockchainDescriptor, BlockchainFee};
use crate::domain::models::currency::{CurrencyDescriptor, Denomination};
use crate::domain::models::transaction::Transaction;
use crate::shared::errors::QueryError;

#[derive(Debug, Deserialize)]
pub struct BdbAmount {
    pub amount: String,
    #[serde(default)]
    pub currency_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BdbFeeEstimate {
    pub fee: BdbAmount,
    pub tier: String,
}

#[derive(Debug, Deserialize)]
pub struct BdbBlockchain {
    pub id: String,
    pub name: String,
    pub network: String,
    pub is_mainnet: bool,
    pub native_currency_id: String,
    #[serde(default)]
    pub block_height: Option<u64>,
    #[serde(default)]
    pub fee_estimates: Vec<BdbFeeEstimate>,
    #[serde(default)]
    pub confirmations_until_final: u32,
}

impl From<BdbBlockchain> for BlockchainDescriptor {
    fn from(bdb: BdbBlockchain) -> Self {
        Self {
            id: bdb.id,
            name: bdb.name,
            network: bdb.network,
            is_mainnet: bdb.is_mainnet,
            currency: bdb.native_currency_id,
            block_height: bdb.block_height.unwrap_or(0),
            fee_estimates: bdb
                .fee_estimates
                .into_iter()
                .map(|estimate| BlockchainFee::new(estimate.fee.amount, estimate.tier))
                .collect(),
            confirmations_until_final: bdb.confirmations_until_final,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BdbDenomination {
    pub name: String,
    pub short_name: String,
    pub decimals: u8,
    #[serde(default)]
    pub symbol: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BdbCurrency {
    pub currency_id: String,
    pub blockchain_id: String,
    pub name: String,
    pub code: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub denominations: Vec<BdbDenomination>,
}

impl From<BdbCurrency> for CurrencyDescriptor {
    fn from(bdb: BdbCurrency) -> Self {
        Self {
            id: bdb.currency_id,
            blockchain_id: bdb.blockchain_id,
            name: bdb.name,
            code: bdb.code,
            kind: bdb.kind,
            address: bdb.address,
            denominations: bdb
                .denominations
                .into_iter()
                .map(|d| {
                    let symbol = d.symbol.unwrap_or_else(|| d.short_name.clone());
                    Denomination::new(d.name, d.short_name, symbol, d.decimals)
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct BdbTransaction {
    pub transaction_id: String,
    pub blockchain_id: String,
    pub hash: String,
    pub status: String,
    #[serde(default)]
    pub block_height: Option<u64>,
    #[serde(default)]
    pub confirmations: Option<u64>,
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Base64 encoded raw transaction
    #[serde(default)]
    pub raw: Option<String>,
    #[serde(default)]
    pub proof: Option<String>,
}

impl TryFrom<BdbTransaction> for Transaction {
    type Error = QueryError;

    fn try_from(bdb: BdbTransaction) -> Result<Self, Self::Error> {
        let raw = bdb
            .raw
            .map(|encoded| STANDARD.decode(encoded))
            .transpose()
            .map_err(|e| QueryError::Model(format!("'raw' is not valid base64: {e}")))?;

        Ok(Self {
            id: bdb.transaction_id,
            blockchain_id: bdb.blockchain_id,
            hash: bdb.hash,
            status: bdb.status,
            block_height: bdb.block_height,
            confirmations: bdb.confirmations,
            timestamp: bdb.timestamp,
            raw,
            proof: bdb.proof,
        })
    }
}

/// Deserialize one JSON value into a wire model
///
/// # Errors
///
/// Returns `QueryError::Model` when required fields are missing or ill-typed.
pub fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, QueryError> {
    serde_json::from_value(value).map_err(|e| QueryError::Model(e.to_string()))
}

/// Deserialize every item of a collection
///
/// # Errors
///
/// Returns `QueryError::Model` for the first item that does not match.
pub fn from_values<T: DeserializeOwned>(values: Vec<Value>) -> Result<Vec<T>, QueryError> {
    values.into_iter().map(from_value).collect()
}
