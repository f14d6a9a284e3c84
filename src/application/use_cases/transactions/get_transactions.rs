//! Get Transactions Use Case
//!
//! Bulk transaction lookup by address. The address list is split into
//! bounded chunks, one query is issued per chunk, each chunk follows its
//! pagination continuations, and all chunk results are joined into one list.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::oneshot;

use crate::application::coordination::CompletionCoordinator;
use crate::domain::gateways::BlockchainQuery;
use crate::domain::models::transaction::{Transaction, TransactionQuery};
use crate::shared::errors::QueryError;

/// Maximum number of addresses sent in a single query
pub const DEFAULT_ADDRESS_CHUNK_SIZE: usize = 50;

/// Per-chunk results, kept in chunk order; the first failure poisons the whole fetch
struct ChunkResults {
    chunks: Vec<Vec<Transaction>>,
    error: Option<QueryError>,
}

/// Use case for fetching all transactions of a set of addresses
pub struct GetTransactionsUseCase {
    blockchain_query: Arc<dyn BlockchainQuery>,
    chunk_size: usize,
}

impl GetTransactionsUseCase {
    /// Create a new GetTransactionsUseCase with the default chunk size
    #[must_use]
    pub fn new(blockchain_query: Arc<dyn BlockchainQuery>) -> Self {
        Self::with_chunk_size(blockchain_query, DEFAULT_ADDRESS_CHUNK_SIZE)
    }

    /// Create a GetTransactionsUseCase with a custom chunk size (at least 1)
    #[must_use]
    pub fn with_chunk_size(blockchain_query: Arc<dyn BlockchainQuery>, chunk_size: usize) -> Self {
        Self {
            blockchain_query,
            chunk_size: chunk_size.max(1),
        }
    }

    /// Execute the use case
    ///
    /// Results are concatenated in chunk order; within a chunk, in page order.
    ///
    /// # Errors
    ///
    /// Returns the first `QueryError` raised by any chunk or pagination step.
    /// Results of the other chunks are then discarded, but their queries still
    /// run to completion.
    pub async fn execute(&self, query: TransactionQuery) -> Result<Vec<Transaction>, QueryError> {
        let chunks = chunk_addresses(&query.addresses, self.chunk_size);
        tracing::info!(
            blockchain_id = %query.blockchain_id,
            addresses = query.addresses.len(),
            chunks = chunks.len(),
            "Fetching transactions"
        );

        if chunks.is_empty() {
            return Ok(Vec::new());
        }

        let (tx, rx) = oneshot::channel::<Result<Vec<Transaction>, QueryError>>();
        let results = Arc::new(Mutex::new(ChunkResults {
            chunks: vec![Vec::new(); chunks.len()],
            error: None,
        }));

        let collected = results.clone();
        let coordinator = Arc::new(CompletionCoordinator::new(move || {
            let mut results = collected.lock().unwrap_or_else(PoisonError::into_inner);
            let outcome = match results.error.take() {
                Some(error) => Err(error),
                None => Ok(std::mem::take(&mut results.chunks).into_iter().flatten().collect::<Vec<_>>()),
            };
            let _ = tx.send(outcome);
        }));

        {
            let _root = coordinator.guard();
            for (index, addresses) in chunks.iter().enumerate() {
                let chunk_query = query.for_addresses(addresses);
                let blockchain_query = self.blockchain_query.clone();
                let results = results.clone();
                coordinator.spawn(async move {
                    let outcome = fetch_all_pages(blockchain_query.as_ref(), &chunk_query).await;
                    let mut results = results.lock().unwrap_or_else(PoisonError::into_inner);
                    match outcome {
                        Ok(transactions) => results.chunks[index] = transactions,
                        Err(error) => {
                            tracing::warn!(chunk = index, error = %error, "Transaction chunk failed");
                            results.error.get_or_insert(error);
                        }
                    }
                });
            }
        }

        let outcome = rx.await.unwrap_or_else(|_| {
            Err(QueryError::Submission("transaction fetch ended without a result".to_string()))
        });

        match &outcome {
            Ok(transactions) => tracing::info!(count = transactions.len(), "Transactions fetched"),
            Err(error) => tracing::warn!(error = %error, "Transaction fetch failed"),
        }
        outcome
    }
}

/// Split `addresses` into consecutive chunks of at most `chunk_size`
#[must_use]
pub fn chunk_addresses(addresses: &[String], chunk_size: usize) -> Vec<Vec<String>> {
    addresses.chunks(chunk_size.max(1)).map(<[String]>::to_vec).collect()
}

/// Follow continuation locators until the last page, accumulating results
///
/// A locator seen twice fails the chunk with `QueryError::Model`, since the
/// upstream would otherwise keep the chunk paging forever.
async fn fetch_all_pages(
    blockchain_query: &dyn BlockchainQuery,
    query: &TransactionQuery,
) -> Result<Vec<Transaction>, QueryError> {
    let mut page = blockchain_query.list_transactions(query).await?;
    let mut transactions = std::mem::take(&mut page.items);
    let mut visited = HashSet::new();

    while let Some(locator) = page.next.take() {
        if !visited.insert(locator.clone()) {
            tracing::warn!(locator = %locator, "Transaction pagination revisits a page");
            return Err(QueryError::Model(format!("pagination cycle at '{locator}'")));
        }
        tracing::debug!(locator = %locator, "Following transaction page");
        page = blockchain_query.next_transactions(&locator).await?;
        transactions.append(&mut page.items);
    }

    Ok(transactions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::blockchain::BlockchainDescriptor;
    use crate::domain::models::currency::CurrencyDescriptor;
    use crate::domain::models::transaction::Page;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn transaction(id: &str) -> Transaction {
        Transaction {
            id: id.to_string(),
            blockchain_id: "bitcoin-mainnet".to_string(),
            hash: format!("hash-{id}"),
            status: "confirmed".to_string(),
            block_height: Some(1),
            confirmations: Some(6),
            timestamp: None,
            raw: None,
            proof: None,
        }
    }

    /// Returns one transaction per address, split over two pages for chunks
    /// whose first address is in `paged`, and fails chunks starting at `failing`.
    struct MockBlockchainQuery {
        paged: Vec<String>,
        failing: Option<String>,
        cyclic: Option<String>,
        page_requests: AtomicUsize,
        pending_pages: Mutex<HashMap<String, Vec<Transaction>>>,
        chunk_sizes: Mutex<Vec<usize>>,
    }

    impl MockBlockchainQuery {
        fn new() -> Self {
            Self {
                paged: Vec::new(),
                failing: None,
                cyclic: None,
                page_requests: AtomicUsize::new(0),
                pending_pages: Mutex::new(HashMap::new()),
                chunk_sizes: Mutex::new(Vec::new()),
            }
        }

        fn with_paged(mut self, first_address: &str) -> Self {
            self.paged.push(first_address.to_string());
            self
        }

        fn with_failing(mut self, first_address: &str) -> Self {
            self.failing = Some(first_address.to_string());
            self
        }

        /// Chunks starting at `first_address` page through `page:a` and `page:b` forever
        fn with_cycle(mut self, first_address: &str) -> Self {
            self.cyclic = Some(first_address.to_string());
            self
        }
    }

    #[async_trait]
    impl BlockchainQuery for MockBlockchainQuery {
        async fn list_blockchains(&self, _mainnet_only: bool) -> Result<Vec<BlockchainDescriptor>, QueryError> {
            Ok(vec![])
        }

        async fn list_currencies(&self, _blockchain_id: &str) -> Result<Vec<CurrencyDescriptor>, QueryError> {
            Ok(vec![])
        }

        async fn list_tokens(&self) -> Result<Vec<CurrencyDescriptor>, QueryError> {
            Ok(vec![])
        }

        async fn list_transactions(&self, query: &TransactionQuery) -> Result<Page<Transaction>, QueryError> {
            self.chunk_sizes.lock().unwrap().push(query.addresses.len());
            tokio::time::sleep(Duration::from_millis(2)).await;

            let first = query.addresses[0].clone();
            if self.failing.as_ref() == Some(&first) {
                return Err(QueryError::Response(500));
            }

            let mut transactions: Vec<Transaction> = query.addresses.iter().map(|a| transaction(a)).collect();
            if self.cyclic.as_ref() == Some(&first) {
                return Ok(Page::with_next(transactions, "page:a".to_string()));
            }
            if self.paged.contains(&first) {
                let rest = transactions.split_off(transactions.len() / 2);
                let locator = format!("next:{first}");
                self.pending_pages.lock().unwrap().insert(locator.clone(), rest);
                return Ok(Page::with_next(transactions, locator));
            }
            Ok(Page::last(transactions))
        }

        async fn next_transactions(&self, locator: &str) -> Result<Page<Transaction>, QueryError> {
            self.page_requests.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(2)).await;
            match locator {
                "page:a" => return Ok(Page::with_next(vec![], "page:b".to_string())),
                "page:b" => return Ok(Page::with_next(vec![], "page:a".to_string())),
                _ => {}
            }
            self.pending_pages
                .lock()
                .unwrap()
                .remove(locator)
                .map(Page::last)
                .ok_or(QueryError::Response(404))
        }

        async fn get_transaction(
            &self,
            _blockchain_id: &str,
            _transaction_id: &str,
            _include_raw: bool,
            _include_proof: bool,
        ) -> Result<Transaction, QueryError> {
            Err(QueryError::NoData)
        }

        async fn submit_transaction(
            &self,
            _blockchain_id: &str,
            _transaction_id: &str,
            _raw: &[u8],
        ) -> Result<(), QueryError> {
            Ok(())
        }
    }

    fn addresses(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("addr-{i}")).collect()
    }

    fn query(addresses: Vec<String>) -> TransactionQuery {
        TransactionQuery {
            blockchain_id: "bitcoin-mainnet".to_string(),
            addresses,
            start_height: 0,
            end_height: 900_000,
            include_raw: false,
            include_proof: false,
            max_page_size: None,
        }
    }

    #[test]
    fn test_chunk_addresses_preserves_order_and_bounds() {
        let chunks = chunk_addresses(&addresses(130), 50);

        let sizes: Vec<usize> = chunks.iter().map(Vec::len).collect();
        assert_eq!(sizes, vec![50, 50, 30]);
        assert_eq!(chunks[1][0], "addr-50");
        assert_eq!(chunks[2][29], "addr-129");
    }

    #[test]
    fn test_chunk_addresses_empty() {
        assert!(chunk_addresses(&[], 50).is_empty());
    }

    #[tokio::test]
    async fn should_join_all_chunks() {
        let mock = Arc::new(MockBlockchainQuery::new());
        let use_case = GetTransactionsUseCase::with_chunk_size(mock.clone(), 50);

        let transactions = use_case.execute(query(addresses(130))).await.unwrap();

        assert_eq!(transactions.len(), 130);
        let ids: Vec<String> = transactions.iter().map(|t| t.id.clone()).collect();
        assert_eq!(ids, addresses(130));

        let mut sizes = mock.chunk_sizes.lock().unwrap().clone();
        sizes.sort_unstable();
        assert_eq!(sizes, vec![30, 50, 50]);
    }

    #[tokio::test]
    async fn should_follow_pagination_per_chunk() {
        let mock = Arc::new(MockBlockchainQuery::new().with_paged("addr-50").with_paged("addr-100"));
        let use_case = GetTransactionsUseCase::with_chunk_size(mock, 50);

        let transactions = use_case.execute(query(addresses(130))).await.unwrap();

        let ids: Vec<String> = transactions.iter().map(|t| t.id.clone()).collect();
        assert_eq!(ids, addresses(130));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn should_fail_whole_fetch_when_one_chunk_fails() {
        let mock = Arc::new(MockBlockchainQuery::new().with_failing("addr-50").with_paged("addr-0"));
        let use_case = GetTransactionsUseCase::with_chunk_size(mock.clone(), 50);

        let result = use_case.execute(query(addresses(130))).await;

        assert_eq!(result.unwrap_err(), QueryError::Response(500));
        // sibling chunks were still issued
        assert_eq!(mock.chunk_sizes.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn should_fail_chunk_on_pagination_cycle() {
        let mock = Arc::new(MockBlockchainQuery::new().with_cycle("addr-50"));
        let use_case = GetTransactionsUseCase::with_chunk_size(mock.clone(), 50);

        let result = tokio::time::timeout(Duration::from_secs(5), use_case.execute(query(addresses(130))))
            .await
            .expect("fetch settles");

        assert!(matches!(result, Err(QueryError::Model(_))));
        // page:a, page:b, then page:a again is refused before being fetched
        assert_eq!(mock.page_requests.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn should_return_empty_for_no_addresses() {
        let mock = Arc::new(MockBlockchainQuery::new());
        let use_case = GetTransactionsUseCase::new(mock.clone());

        let transactions = use_case.execute(query(vec![])).await.unwrap();

        assert!(transactions.is_empty());
        assert!(mock.chunk_sizes.lock().unwrap().is_empty());
    }

    #[test]
    fn test_chunk_size_is_at_least_one() {
        let use_case = GetTransactionsUseCase::with_chunk_size(Arc::new(MockBlockchainQuery::new()), 0);
        assert_eq!(use_case.chunk_size, 1);
    }
}
