//! Domain Layer
//!
//! Contains the domain models and gateway traits (ports).
//! This layer has no dependencies on infrastructure.

pub mod gateways;
pub mod models;

pub use gateways::blockchain_query::BlockchainQuery;
pub use models::network::{Currency, Network, NetworkAssociation, NetworkFee, Unit};
