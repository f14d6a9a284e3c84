//! Transaction Models
//!
//! Transaction records returned by the blockchain database, the paginated
//! page wrapper, and the bulk lookup request.

/// A transaction as reported by the blockchain database
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub id: String,
    pub blockchain_id: String,
    pub hash: String,
    pub status: String,
    pub block_height: Option<u64>,
    pub confirmations: Option<u64>,
    pub timestamp: Option<String>,
    pub raw: Option<Vec<u8>>,
    pub proof: Option<String>,
}

/// One page of a paginated query.
///
/// `next` is an opaque continuation locator; `None` means the last page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub next: Option<String>,
}

impl<T> Page<T> {
    #[must_use]
    pub fn last(items: Vec<T>) -> Self {
        Self { items, next: None }
    }

    #[must_use]
    pub fn with_next(items: Vec<T>, next: impl Into<String>) -> Self {
        Self {
            items,
            next: Some(next.into()),
        }
    }
}

/// Bulk transaction lookup keyed by address
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionQuery {
    pub blockchain_id: String,
    pub addresses: Vec<String>,
    pub start_height: u64,
    pub end_height: u64,
    pub include_raw: bool,
    pub include_proof: bool,
    pub max_page_size: Option<u32>,
}

impl TransactionQuery {
    /// Copy of this query restricted to one address chunk
    #[must_use]
    pub fn for_addresses(&self, addresses: &[String]) -> Self {
        Self {
            blockchain_id: self.blockchain_id.clone(),
            addresses: addresses.to_vec(),
            start_height: self.start_height,
            end_height: self.end_height,
            include_raw: self.include_raw,
            include_proof: self.include_proof,
            max_page_size: self.max_page_size,
        }
    }
}
