//! Per-path request serialization.
//!
//! A process-wide map from resolved target path to that path's queue state.
//! Exactly one replacement sequence runs per path at a time; waiters are
//! admitted strictly in arrival order. Distinct paths never block each other.
//!
//! State machine per path:
//! - no map entry        => Idle: acquire admits immediately and inserts.
//! - entry, no waiters   => Running: acquire appends a waiter and suspends.
//! - entry with waiters  => Pending: same, behind the earlier waiters.
//! - release             => wake the next waiter FIFO, or remove the entry.
//!
//! The map mutex is plain std::sync::Mutex and is never held across an
//! await, so enqueue/dequeue bookkeeping can't interleave with itself.
//! Release is the guard's Drop, which also runs on error and panic paths.

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex};

use tokio::sync::oneshot;
use tracing::trace;

static QUEUES: LazyLock<Mutex<HashMap<PathBuf, QueueState>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

struct QueueState {
    waiters: VecDeque<oneshot::Sender<()>>,
}

/// Admission for one path. Dropping it admits the next waiter.
pub(super) struct PathGuard {
    path: PathBuf,
}

impl Drop for PathGuard {
    fn drop(&mut self) {
        let mut queues = match QUEUES.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        let Some(state) = queues.get_mut(&self.path) else {
            return;
        };
        // A waiter whose future was dropped is skipped over.
        while let Some(tx) = state.waiters.pop_front() {
            if tx.send(()).is_ok() {
                return;
            }
        }
        queues.remove(&self.path);
        trace!(path = %self.path.display(), "path queue drained");
    }
}

/// Wait for this path's slot. Returns immediately when the path is idle.
pub(super) async fn acquire(path: &Path) -> PathGuard {
    let rx = {
        let mut queues = match QUEUES.lock() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        match queues.get_mut(path) {
            None => {
                queues.insert(
                    path.to_path_buf(),
                    QueueState {
                        waiters: VecDeque::new(),
                    },
                );
                None
            }
            Some(state) => {
                let (tx, rx) = oneshot::channel();
                state.waiters.push_back(tx);
                Some(rx)
            }
        }
    };

    if let Some(rx) = rx {
        trace!(path = %path.display(), "waiting behind an in-flight replacement");
        // The sender is only dropped if the holder skipped us while our
        // future was being cancelled; proceeding is then moot anyway.
        let _ = rx.await;
    }

    PathGuard {
        path: path.to_path_buf(),
    }
}
