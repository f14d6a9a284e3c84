//! Coordination Primitives
//!
//! Building blocks shared by the use cases: the fan-in completion coordinator
//! and the defaults-vs-remote dataset merge.

pub mod completion;
pub mod merge;

pub use completion::{CompletionCoordinator, ExitGuard};
pub use merge::merge_with_defaults;
