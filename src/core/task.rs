//! Remote fetches run as background tasks with an observable state.

use anyhow::{Result, anyhow};
use std::future::Future;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum TaskState<T> {
    Pending,
    Ready(T),
    Failed(String),
}

impl<T> TaskState<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, TaskState::Pending)
    }
}

/// A spawned fetch whose progress can be polled without blocking.
pub struct FetchTask<T> {
    name: &'static str,
    state: watch::Receiver<TaskState<T>>,
    handle: JoinHandle<()>,
}

impl<T> FetchTask<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Spawns `future` on the current tokio runtime.
    pub fn spawn<F>(name: &'static str, future: F) -> Self
    where
        F: Future<Output = Result<T>> + Send + 'static,
    {
        let (tx, rx) = watch::channel(TaskState::Pending);
        let handle = tokio::spawn(async move {
            let state = match future.await {
                Ok(value) => {
                    debug!(task = name, "Fetch ready");
                    TaskState::Ready(value)
                }
                Err(e) => {
                    debug!(task = name, error = %e, "Fetch failed");
                    TaskState::Failed(format!("{e:#}"))
                }
            };
            tx.send_replace(state);
        });

        Self {
            name,
            state: rx,
            handle,
        }
    }

    /// Current state, without waiting.
    pub fn state(&self) -> TaskState<T> {
        self.state.borrow().clone()
    }

    /// Waits for the task to finish. A panicked or aborted task is reported as failed.
    pub async fn wait(self) -> Result<T> {
        if let Err(e) = self.handle.await {
            debug!(task = self.name, error = %e, "Fetch task did not complete");
            return Err(anyhow!("{} task did not complete: {e}", self.name));
        }

        match self.state.borrow().clone() {
            TaskState::Ready(value) => Ok(value),
            TaskState::Failed(message) => Err(anyhow!(message)),
            TaskState::Pending => Err(anyhow!("{} task finished without a result", self.name)),
        }
    }
}
