//! HTTP Handlers
//!
//! One router per resource, nested by the application router.

pub mod networks;
pub mod tokens;
pub mod transactions;
