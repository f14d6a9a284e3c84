//! Token Use Cases
//!
//! Catalog of ERC-20 token currencies.

mod list_tokens;

pub use list_tokens::ListTokensUseCase;
