//! Blockchain database adapter: HTTP transport, wire models and the
//! `BlockchainQuery` implementation.

pub mod client;
pub mod models;
mod query;

pub use client::BlockchainDbClient;
pub use query::BlockchainDb;
