//! Blockchain Database Query Adapter
//!
//! Implements the `BlockchainQuery` port over the blockchain database REST
//! API.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::Method;
use serde_json::{json, Value};

use super::client::{BlockchainDbClient, Payload, ResponseShape};
use super::models::{from_value, from_values, BdbBlockchain, BdbCurrency, BdbTransaction};
use crate::domain::gateways::BlockchainQuery;
use crate::domain::models::blockchain::BlockchainDescriptor;
use crate::domain::models::currency::CurrencyDescriptor;
use crate::domain::models::transaction::{Page, Transaction, TransactionQuery};
use crate::infrastructure::driven_adapters::config::BlockchainDbConfig;
use crate::shared::errors::QueryError;

/// `BlockchainQuery` backed by the blockchain database
#[derive(Debug, Clone)]
pub struct BlockchainDb {
    client: BlockchainDbClient,
}

impl BlockchainDb {
    #[must_use]
    pub fn new(client: BlockchainDbClient) -> Self {
        Self { client }
    }

    /// Create the adapter from configuration
    ///
    /// # Errors
    ///
    /// Returns `QueryError::Submission` if the HTTP client cannot be built.
    pub fn from_config(config: &BlockchainDbConfig) -> Result<Self, QueryError> {
        Ok(Self::new(BlockchainDbClient::from_config(config)?))
    }
}

fn into_array(payload: Payload) -> Result<(Vec<Value>, Option<String>), QueryError> {
    match payload {
        Payload::Array { items, next } => Ok((items, next)),
        _ => Err(QueryError::Model("collection expected".to_string())),
    }
}

fn into_object(payload: Payload) -> Result<Value, QueryError> {
    match payload {
        Payload::Object(object) => Ok(Value::Object(object)),
        _ => Err(QueryError::Model("object expected".to_string())),
    }
}

fn transaction_page(payload: Payload) -> Result<Page<Transaction>, QueryError> {
    let (items, next) = into_array(payload)?;
    let items = from_values::<BdbTransaction>(items)?
        .into_iter()
        .map(Transaction::try_from)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Page { items, next })
}

fn transaction_params(query: &TransactionQuery) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("blockchain_id", query.blockchain_id.clone()),
        ("include_proof", query.include_proof.to_string()),
        ("include_raw", query.include_raw.to_string()),
        ("start_height", query.start_height.to_string()),
        ("end_height", query.end_height.to_string()),
    ];
    if let Some(max_page_size) = query.max_page_size {
        params.push(("max_page_size", max_page_size.to_string()));
    }
    params.extend(query.addresses.iter().map(|address| ("address", address.clone())));
    params
}

#[async_trait]
impl BlockchainQuery for BlockchainDb {
    async fn list_blockchains(&self, mainnet_only: bool) -> Result<Vec<BlockchainDescriptor>, QueryError> {
        let payload = self
            .client
            .issue(
                Method::GET,
                &["blockchains"],
                &[("testnet", (!mainnet_only).to_string())],
                None,
                ResponseShape::Embedded("blockchains"),
            )
            .await?;

        let (items, _) = into_array(payload)?;
        Ok(from_values::<BdbBlockchain>(items)?
            .into_iter()
            .map(BlockchainDescriptor::from)
            .collect())
    }

    async fn list_currencies(&self, blockchain_id: &str) -> Result<Vec<CurrencyDescriptor>, QueryError> {
        let payload = self
            .client
            .issue(
                Method::GET,
                &["currencies"],
                &[("blockchain_id", blockchain_id.to_string())],
                None,
                ResponseShape::Embedded("currencies"),
            )
            .await?;

        let (items, _) = into_array(payload)?;
        Ok(from_values::<BdbCurrency>(items)?
            .into_iter()
            .map(CurrencyDescriptor::from)
            .collect())
    }

    async fn list_tokens(&self) -> Result<Vec<CurrencyDescriptor>, QueryError> {
        let payload = self
            .client
            .issue(
                Method::GET,
                &["currencies"],
                &[("type", "erc20".to_string())],
                None,
                ResponseShape::RootArray,
            )
            .await?;

        let (items, _) = into_array(payload)?;
        Ok(from_values::<BdbCurrency>(items)?
            .into_iter()
            .map(CurrencyDescriptor::from)
            .collect())
    }

    async fn list_transactions(&self, query: &TransactionQuery) -> Result<Page<Transaction>, QueryError> {
        let payload = self
            .client
            .issue(
                Method::GET,
                &["transactions"],
                &transaction_params(query),
                None,
                ResponseShape::Embedded("transactions"),
            )
            .await?;

        transaction_page(payload)
    }

    async fn next_transactions(&self, locator: &str) -> Result<Page<Transaction>, QueryError> {
        let payload = self
            .client
            .issue_url(locator, ResponseShape::Embedded("transactions"))
            .await?;

        transaction_page(payload)
    }

    async fn get_transaction(
        &self,
        blockchain_id: &str,
        transaction_id: &str,
        include_raw: bool,
        include_proof: bool,
    ) -> Result<Transaction, QueryError> {
        let payload = self
            .client
            .issue(
                Method::GET,
                &["transactions", transaction_id],
                &[
                    ("include_raw", include_raw.to_string()),
                    ("include_proof", include_proof.to_string()),
                ],
                None,
                ResponseShape::Object,
            )
            .await?;

        let transaction = Transaction::try_from(from_value::<BdbTransaction>(into_object(payload)?)?)?;
        if transaction.blockchain_id != blockchain_id {
            return Err(QueryError::Model(format!(
                "transaction '{transaction_id}' belongs to '{}', not '{blockchain_id}'",
                transaction.blockchain_id
            )));
        }
        Ok(transaction)
    }

    async fn submit_transaction(
        &self,
        blockchain_id: &str,
        transaction_id: &str,
        raw: &[u8],
    ) -> Result<(), QueryError> {
        let body = json!({
            "blockchain_id": blockchain_id,
            "transaction_id": transaction_id,
            "data": STANDARD.encode(raw),
        });

        self.client
            .issue(Method::POST, &["transactions"], &[], Some(&body), ResponseShape::Empty)
            .await?;

        tracing::info!(blockchain_id, transaction_id, "Transaction submitted");
        Ok(())
    }
}
