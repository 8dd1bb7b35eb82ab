//! Live queries over the document store.
//!
//! A [`LiveQuery`] runs in its own tokio task. It listens to the store's
//! change feed and, whenever a relevant collection changes, re-runs its
//! query and pushes the full result set to the subscriber. There is no
//! incremental patching: every snapshot replaces the previous one.

use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, error, warn};

use chatroom_shared::ChannelId;

use crate::error::Result;

/// Snapshot buffer per subscription.
const SNAPSHOT_BUFFER: usize = 16;

/// Which collection a write touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Channels,
    Messages(ChannelId),
}

/// Handle to a running live query. Dropping it unsubscribes.
#[derive(Debug)]
pub struct LiveQuery<T> {
    rx: mpsc::Receiver<Vec<T>>,
    task: Option<JoinHandle<()>>,
}

impl<T: Send + 'static> LiveQuery<T> {
    /// Start a live query. `changes` must be subscribed before the call so
    /// that no write between the initial fetch and the first `recv` is lost.
    pub(crate) fn spawn<M, F>(
        name: &'static str,
        mut changes: broadcast::Receiver<Change>,
        matches: M,
        fetch: F,
    ) -> Self
    where
        M: Fn(&Change) -> bool + Send + 'static,
        F: Fn() -> Result<Vec<T>> + Send + Sync + 'static,
    {
        let (tx, rx) = mpsc::channel(SNAPSHOT_BUFFER);

        let task = tokio::spawn(async move {
            if !deliver(name, &tx, &fetch).await {
                return;
            }
            loop {
                match changes.recv().await {
                    Ok(change) if matches(&change) => {}
                    Ok(_) => continue,
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        warn!(query = name, skipped, "Change feed lagged, re-querying");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
                if !deliver(name, &tx, &fetch).await {
                    break;
                }
            }
            debug!(query = name, "Live query finished");
        });

        Self {
            rx,
            task: Some(task),
        }
    }

    /// Wait for the next snapshot. `None` once unsubscribed or the store is gone.
    pub async fn next(&mut self) -> Option<Vec<T>> {
        self.rx.recv().await
    }

    /// Stop the query. Snapshots already buffered are discarded, so `next`
    /// returns `None` straight away. Calling this more than once is harmless.
    pub fn unsubscribe(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
            self.rx.close();
            while self.rx.try_recv().is_ok() {}
        }
    }
}

impl<T> Drop for LiveQuery<T> {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// Run the query and push the result. Returns `false` once nobody listens.
async fn deliver<T, F>(name: &'static str, tx: &mpsc::Sender<Vec<T>>, fetch: &F) -> bool
where
    F: Fn() -> Result<Vec<T>>,
{
    match fetch() {
        Ok(rows) => tx.send(rows).await.is_ok(),
        Err(e) => {
            // keep listening; the next change re-queries
            error!(query = name, error = %e, "Live query fetch failed");
            true
        }
    }
}
