//! Get Transaction Use Case
//!
//! Retrieves a single transaction. There is no default to fall back to, so
//! query errors are passed through unchanged.

use std::sync::Arc;

use crate::domain::gateways::BlockchainQuery;
use crate::domain::models::transaction::Transaction;
use crate::shared::errors::QueryError;

/// Use case for getting one transaction by id
pub struct GetTransactionUseCase {
    blockchain_query: Arc<dyn BlockchainQuery>,
}

impl GetTransactionUseCase {
    /// Create a new GetTransactionUseCase
    #[must_use]
    pub fn new(blockchain_query: Arc<dyn BlockchainQuery>) -> Self {
        Self { blockchain_query }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns the `QueryError` reported by the blockchain database.
    pub async fn execute(
        &self,
        blockchain_id: &str,
        transaction_id: &str,
        include_raw: bool,
        include_proof: bool,
    ) -> Result<Transaction, QueryError> {
        tracing::debug!(blockchain_id, transaction_id, "Getting transaction");

        let transaction = self
            .blockchain_query
            .get_transaction(blockchain_id, transaction_id, include_raw, include_proof)
            .await
            .inspect_err(|error| {
                tracing::warn!(transaction_id, error = %error, "Transaction lookup failed");
            })?;

        tracing::debug!(transaction_id, status = %transaction.status, "Transaction found");
        Ok(transaction)
    }
}
