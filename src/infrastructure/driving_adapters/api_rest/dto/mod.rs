//! Data Transfer Objects
//!
//! Request and response DTOs for the REST API.

pub mod network;
pub mod token;
pub mod transaction;

pub use network::{NetworkResponseDto, NetworksParams};
pub use token::{TokenResponseDto, TokensParams};
pub use transaction::{GetTransactionParams, SubmitTransactionDto, TransactionQueryDto, TransactionResponseDto};
