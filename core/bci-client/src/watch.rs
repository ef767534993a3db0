//! Long-lived read subscriptions.

use crate::result::QueryResult;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

/// Live view of one read, kept current by a background task.
///
/// Dropping the watcher stops the task.
pub struct QueryWatcher<T> {
    rx: watch::Receiver<QueryResult<T>>,
    refetch: mpsc::UnboundedSender<()>,
    task: JoinHandle<()>,
}

impl<T: Clone> QueryWatcher<T> {
    pub(crate) fn new(
        rx: watch::Receiver<QueryResult<T>>,
        refetch: mpsc::UnboundedSender<()>,
        task: JoinHandle<()>,
    ) -> Self {
        Self { rx, refetch, task }
    }

    /// The latest published state.
    pub fn current(&self) -> QueryResult<T> {
        self.rx.borrow().clone()
    }

    /// Waits for the next published state.
    ///
    /// Returns `None` once the background task has stopped.
    pub async fn changed(&mut self) -> Option<QueryResult<T>> {
        self.rx.changed().await.ok()?;
        Some(self.rx.borrow_and_update().clone())
    }

    /// Waits until the state is settled, returning immediately if it already is.
    pub async fn settled(&mut self) -> Option<QueryResult<T>> {
        loop {
            {
                let state = self.rx.borrow_and_update();
                if state.is_settled() {
                    return Some(state.clone());
                }
            }
            self.rx.changed().await.ok()?;
        }
    }

    /// Waits for a settled state published after this call, e.g. the result
    /// of a [`QueryWatcher::refetch`] or the next poll.
    pub async fn next_settled(&mut self) -> Option<QueryResult<T>> {
        loop {
            self.rx.changed().await.ok()?;
            let state = self.rx.borrow_and_update();
            if state.is_settled() {
                return Some(state.clone());
            }
        }
    }

    /// Requests a fresh network round. Returns false if the watcher has stopped.
    pub fn refetch(&self) -> bool {
        self.refetch.send(()).is_ok()
    }
}

impl<T> Drop for QueryWatcher<T> {
    fn drop(&mut self) {
        self.task.abort();
    }
}
