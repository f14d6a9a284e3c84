//! Completion Coordinator
//!
//! Counted rendezvous that runs a completion callback exactly once, when the
//! number of outstanding units of work drops back to zero.

use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

type Completion = Box<dyn FnOnce() + Send>;

/// Fan-in primitive for dynamically growing groups of async work.
///
/// Every `enter()` must be paired with exactly one later `exit()`. New work may
/// be entered from inside running work (before that work exits), so groups can
/// grow while they are being drained.
pub struct CompletionCoordinator {
    outstanding: AtomicUsize,
    on_complete: Mutex<Option<Completion>>,
}

impl CompletionCoordinator {
    /// Create a coordinator with no outstanding work
    #[must_use]
    pub fn new(on_complete: impl FnOnce() + Send + 'static) -> Self {
        Self {
            outstanding: AtomicUsize::new(0),
            on_complete: Mutex::new(Some(Box::new(on_complete))),
        }
    }

    /// Register one unit of outstanding work
    pub fn enter(&self) {
        self.outstanding.fetch_add(1, Ordering::AcqRel);
    }

    /// Settle one unit of work; the decrement that reaches zero runs the callback
    pub fn exit(&self) {
        let previous = self.outstanding.fetch_sub(1, Ordering::AcqRel);
        debug_assert!(previous > 0, "exit() without matching enter()");
        if previous == 1 {
            let completion = self
                .on_complete
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .take();
            if let Some(completion) = completion {
                completion();
            }
        }
    }

    /// Number of units of work not yet settled
    #[must_use]
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::Acquire)
    }

    /// Enter, then run `work` on the runtime; exit once it finishes.
    ///
    /// The enter happens before this returns, so callers can chain nested
    /// `spawn`s without the count touching zero in between. The exit also runs
    /// if `work` panics.
    pub fn spawn<F>(self: &Arc<Self>, work: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let guard = self.guard();
        tokio::spawn(async move {
            let _guard = guard;
            work.await;
        });
    }

    /// Enter and return a guard that exits on drop
    #[must_use]
    pub fn guard(self: &Arc<Self>) -> ExitGuard {
        self.enter();
        ExitGuard {
            coordinator: Arc::clone(self),
        }
    }
}

/// Exits its coordinator when dropped
pub struct ExitGuard {
    coordinator: Arc<CompletionCoordinator>,
}

impl Drop for ExitGuard {
    fn drop(&mut self) {
        self.coordinator.exit();
    }
}
