//! Blockchain Network Discovery
//!
//! Discovers the blockchain networks, currencies, units and fee tiers known to
//! a remote blockchain database, merged with built-in defaults, and exposes
//! bulk transaction lookup and submission over REST. Follows
//! Clean/Hexagonal Architecture principles.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;
