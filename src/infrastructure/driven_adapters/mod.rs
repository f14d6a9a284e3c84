//! Driven Adapters
//!
//! Implementations of gateway traits for external systems:
//! - Blockchain database client
//! - Configuration

pub mod blockchain_db;
pub mod config;

pub use blockchain_db::{BlockchainDb, BlockchainDbClient};
pub use config::AppConfig;
