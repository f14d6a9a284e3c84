//! Submit Transaction Use Case
//!
//! Submits a signed transaction to the blockchain database.

use std::sync::Arc;

use crate::domain::gateways::BlockchainQuery;
use crate::shared::errors::{QueryError, UseCaseError};

/// Use case for submitting a signed transaction
pub struct SubmitTransactionUseCase {
    blockchain_query: Arc<dyn BlockchainQuery>,
}

impl SubmitTransactionUseCase {
    /// Create a new SubmitTransactionUseCase
    #[must_use]
    pub fn new(blockchain_query: Arc<dyn BlockchainQuery>) -> Self {
        Self { blockchain_query }
    }

    /// Execute the use case
    ///
    /// # Errors
    ///
    /// Returns `UseCaseError::Validation` for an empty payload.
    /// Returns `UseCaseError::Query` with the blockchain database error otherwise.
    pub async fn execute(&self, blockchain_id: &str, transaction_id: &str, raw: &[u8]) -> Result<(), UseCaseError> {
        tracing::info!(blockchain_id, transaction_id, bytes = raw.len(), "Submitting transaction");

        if raw.is_empty() {
            return Err(UseCaseError::Validation(vec!["data: transaction data must not be empty".to_string()]));
        }

        self.blockchain_query
            .submit_transaction(blockchain_id, transaction_id, raw)
            .await
            .map_err(|error: QueryError| {
                tracing::warn!(transaction_id, error = %error, "Transaction submission failed");
                UseCaseError::Query(error)
            })?;

        tracing::info!(transaction_id, "Transaction submitted");
        Ok(())
    }
}
