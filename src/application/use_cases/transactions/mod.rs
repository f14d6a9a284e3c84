//! Transaction Use Cases
//!
//! Bulk lookup, single lookup and submission of transactions.

mod get_transaction;
mod get_transactions;
mod submit_transaction;

pub use get_transaction::GetTransactionUseCase;
pub use get_transactions::{chunk_addresses, GetTransactionsUseCase, DEFAULT_ADDRESS_CHUNK_SIZE};
pub use submit_transaction::SubmitTransactionUseCase;
