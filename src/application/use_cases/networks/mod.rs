//! Network Use Cases
//!
//! Discovery and assembly of blockchain networks.

pub mod assembler;
mod discover_networks;

pub use discover_networks::DiscoverNetworksUseCase;
