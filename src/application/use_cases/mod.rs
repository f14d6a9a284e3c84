//! Use Cases
//!
//! Application-specific business rules.
//! Each use case is a single-purpose struct with an execute() method.

pub mod networks;
pub mod tokens;
pub mod transactions;

pub use networks::DiscoverNetworksUseCase;
pub use tokens::ListTokensUseCase;
pub use transactions::{GetTransactionUseCase, GetTransactionsUseCase, SubmitTransactionUseCase};
