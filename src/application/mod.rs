//! Application Layer
//!
//! Contains the coordination primitives and the use cases that orchestrate
//! business logic. Use cases depend on domain gateways (abstractions), not
//! concrete implementations.

pub mod coordination;
pub mod use_cases;
