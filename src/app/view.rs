//! View scopes.
//!
//! Every dispatch starts a new view. Tasks spawned for a view are aborted
//! when the next view starts, and anything they render after that is
//! dropped, so a slow response for an old page never lands on a new one.

use std::future::Future;
use std::sync::{Mutex, MutexGuard, PoisonError};

use tokio::task::{AbortHandle, JoinHandle};
use tracing::{debug, warn};

#[derive(Debug, Default)]
struct Scope {
    generation: u64,
    tasks: Vec<AbortHandle>,
}

/// Tracks the current view and the tasks spawned for it.
#[derive(Debug, Default)]
pub(crate) struct ViewTracker {
    scope: Mutex<Scope>,
    pending: Mutex<Vec<JoinHandle<()>>>,
}

impl ViewTracker {
    /// Start a new view, aborting the tasks of the previous one.
    ///
    /// With `expected` set, the view only starts if `expected` is still the
    /// current generation.
    pub(crate) fn begin(&self, expected: Option<u64>) -> Option<u64> {
        let mut scope = self.scope();
        if let Some(expected) = expected {
            if expected != scope.generation {
                debug!(expected, current = scope.generation, "stale view, not dispatching");
                return None;
            }
        }
        let aborted = scope.tasks.len();
        for task in scope.tasks.drain(..) {
            task.abort();
        }
        scope.generation += 1;
        debug!(generation = scope.generation, aborted, "view started");
        Some(scope.generation)
    }

    /// The current generation.
    pub(crate) fn current(&self) -> u64 {
        self.scope().generation
    }

    /// Spawn a task belonging to view `generation`.
    pub(crate) fn spawn<F>(&self, generation: u64, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(task);
        {
            let mut scope = self.scope();
            if scope.generation == generation {
                scope.tasks.push(handle.abort_handle());
            } else {
                handle.abort();
            }
        }
        let mut pending = self.pending();
        pending.retain(|h| !h.is_finished());
        pending.push(handle);
    }

    /// Run `f` if `generation` is current, holding the scope lock meanwhile.
    pub(crate) fn if_current<R>(&self, generation: u64, f: impl FnOnce() -> R) -> Option<R> {
        let scope = self.scope();
        (scope.generation == generation).then(f)
    }

    /// Wait until every spawned task, including ones spawned while waiting,
    /// has finished or been aborted.
    pub(crate) async fn settle(&self) {
        loop {
            let batch: Vec<JoinHandle<()>> = std::mem::take(&mut *self.pending());
            if batch.is_empty() {
                break;
            }
            for handle in batch {
                if let Err(e) = handle.await {
                    if e.is_panic() {
                        warn!(error = %e, "view task panicked");
                    }
                }
            }
        }
        let mut scope = self.scope();
        scope.tasks.retain(|t| !t.is_finished());
    }

    #[cfg(test)]
    fn pending_len(&self) -> usize {
        self.pending().len()
    }

    fn scope(&self) -> MutexGuard<'_, Scope> {
        self.scope.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn pending(&self) -> MutexGuard<'_, Vec<JoinHandle<()>>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
