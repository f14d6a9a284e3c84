//! List Tokens Use Case
//!
//! Retrieves the ERC-20 token catalog, optionally narrowed to one blockchain.
//! Tokens have no built-in defaults, so query errors are passed through.

use std::sync::Arc;

use crate::domain::gateways::BlockchainQuery;
use crate::domain::models::currency::CurrencyDescriptor;
use crate::shared::errors::QueryError;

/// Use case for listing token currencies
pub struct ListTokensUseCase {
    blockchain_query: Arc<dyn BlockchainQuery>,
}

impl ListTokensUseCase {
    /// Create a new ListTokensUseCase
    #[must_use]
    pub fn new(blockchain_query: Arc<dyn BlockchainQuery>) -> Self {
        Self { blockchain_query }
    }

    /// Execute the use case
    ///
    /// Tokens are returned sorted by id, restricted to `blockchain_id` when given.
    ///
    /// # Errors
    ///
    /// Returns the `QueryError` reported by the blockchain database.
    pub async fn execute(&self, blockchain_id: Option<&str>) -> Result<Vec<CurrencyDescriptor>, QueryError> {
        let mut tokens = self.blockchain_query.list_tokens().await.inspect_err(|error| {
            tracing::warn!(kind = error.kind(), error = %error, "Token lookup failed");
        })?;

        if let Some(blockchain_id) = blockchain_id {
            tokens.retain(|token| token.blockchain_id == blockchain_id);
        }
        tokens.sort_by(|a, b| a.id.cmp(&b.id));

        tracing::debug!(count = tokens.len(), blockchain_id, "Tokens listed");
        Ok(tokens)
    }
}
