//! Blockchain Query Gateway
//!
//! Abstract trait defining the contract for remote blockchain database lookups.

use async_trait::async_trait;

use crate::domain::models::blockchain::BlockchainDescriptor;
use crate::domain::models::currency::CurrencyDescriptor;
use crate::domain::models::transaction::{Page, Transaction, TransactionQuery};
use crate::shared::errors::QueryError;

/// Query trait for the remote blockchain database
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlockchainQuery: Send + Sync {
    /// List known blockchains, restricted to mainnets or testnets
    async fn list_blockchains(&self, mainnet_only: bool) -> Result<Vec<BlockchainDescriptor>, QueryError>;

    /// List the currencies of one blockchain
    async fn list_currencies(&self, blockchain_id: &str) -> Result<Vec<CurrencyDescriptor>, QueryError>;

    /// List the ERC-20 token currencies known across all blockchains
    async fn list_tokens(&self) -> Result<Vec<CurrencyDescriptor>, QueryError>;

    /// First page of transactions touching the query's addresses
    async fn list_transactions(&self, query: &TransactionQuery) -> Result<Page<Transaction>, QueryError>;

    /// Follow a continuation locator returned by a previous page
    async fn next_transactions(&self, locator: &str) -> Result<Page<Transaction>, QueryError>;

    /// Look up a single transaction
    async fn get_transaction(
        &self,
        blockchain_id: &str,
        transaction_id: &str,
        include_raw: bool,
        include_proof: bool,
    ) -> Result<Transaction, QueryError>;

    /// Submit a signed transaction
    async fn submit_transaction(
        &self,
        blockchain_id: &str,
        transaction_id: &str,
        raw: &[u8],
    ) -> Result<(), QueryError>;
}
