//! # Background Resolution
//!
//! Runs one resolution on a tokio task, scoped to the handle that started it.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ResolveTask::spawn(resolver, code)                                    │
//! │       │                                                                 │
//! │       ├──► tokio::spawn ──► select! { cancel_rx, try_resolve(code) }   │
//! │       │                                  │                              │
//! │       ▼                                  ▼ result_tx (oneshot)          │
//! │  ResolveHandle ◄─────────────────────────┘                             │
//! │       │                                                                 │
//! │       ├── outcome().await  → Some(result)                              │
//! │       ├── cancel()         → outcome() yields None                     │
//! │       └── drop             → task aborted, result discarded            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::error::ResolverResult;
use crate::protocol::ProductRecord;
use crate::resolver::ProductResolver;

/// Starts background resolutions.
pub struct ResolveTask;

impl ResolveTask {
    /// Spawns a resolution of `code`. Must be called inside a tokio runtime.
    pub fn spawn(resolver: ProductResolver, code: impl Into<String>) -> ResolveHandle {
        let code = code.into();
        let (cancel_tx, cancel_rx) = oneshot::channel::<()>();
        let (result_tx, result_rx) = oneshot::channel();

        let task_code = code.clone();
        let join = tokio::spawn(async move {
            tokio::select! {
                _ = cancel_rx => {
                    debug!(code = %task_code, "Resolution cancelled");
                }
                outcome = resolver.try_resolve(&task_code) => {
                    // Receiver gone means the handle was torn down.
                    let _ = result_tx.send(outcome);
                }
            }
        });

        ResolveHandle {
            code,
            cancel_tx: Some(cancel_tx),
            result_rx,
            join,
        }
    }
}

/// Owner of a running resolution.
///
/// Dropping the handle aborts the task.
#[derive(Debug)]
pub struct ResolveHandle {
    code: String,
    cancel_tx: Option<oneshot::Sender<()>>,
    result_rx: oneshot::Receiver<ResolverResult<ProductRecord>>,
    join: JoinHandle<()>,
}

impl ResolveHandle {
    /// The code being resolved.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// True once the task has stopped, for any reason.
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }

    /// Stops the resolution. Any result, even one already produced, is dropped.
    pub fn cancel(&mut self) {
        if let Some(cancel_tx) = self.cancel_tx.take() {
            let _ = cancel_tx.send(());
            debug!(code = %self.code, "Cancel requested");
        }
    }

    /// True after [`cancel`](Self::cancel).
    pub fn is_cancelled(&self) -> bool {
        self.cancel_tx.is_none()
    }

    /// Waits for the result. `None` if the handle was cancelled or the task
    /// died without producing one.
    pub async fn outcome(mut self) -> Option<ResolverResult<ProductRecord>> {
        if self.is_cancelled() {
            return None;
        }
        (&mut self.result_rx).await.ok()
    }
}

impl Drop for ResolveHandle {
    fn drop(&mut self) {
        self.join.abort();
    }
}
