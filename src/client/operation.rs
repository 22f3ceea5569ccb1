//! Observable state for one asynchronous API call.
//!
//! An [`AsyncOperation`] runs futures that resolve to `Result<T, ClientError>`
//! and publishes a [`Snapshot`] after every transition. Overlapping runs are
//! resolved last-started-wins: each run takes a token, and only the run
//! holding the newest token may write its outcome. Older runs still return
//! their own outcome to their caller. Nothing is cancelled or retried.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_stream::wrappers::WatchStream;

use super::ClientError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationState<T> {
    Idle,
    Pending,
    Ok(T),
    Err(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot<T> {
    pub state: OperationState<T>,
    /// Last successful value; survives later failures and reloads
    pub data: Option<T>,
}

impl<T> Snapshot<T> {
    pub fn loading(&self) -> bool {
        matches!(self.state, OperationState::Pending)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            OperationState::Err(message) => Some(message),
            _ => None,
        }
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }
}

struct Inner<T> {
    state: watch::Sender<Snapshot<T>>,
    /// Token of the newest run; only advanced while holding the watch lock
    generation: AtomicU64,
    fallback: &'static str,
}

pub struct AsyncOperation<T> {
    inner: Arc<Inner<T>>,
}

impl<T> Clone for AsyncOperation<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone> AsyncOperation<T> {
    /// `fallback` is shown when a failure carries no usable message
    pub fn new(fallback: &'static str) -> Self {
        let (tx, _) = watch::channel(Snapshot {
            state: OperationState::Idle,
            data: None,
        });
        Self {
            inner: Arc::new(Inner {
                state: tx,
                generation: AtomicU64::new(0),
                fallback,
            }),
        }
    }

    pub fn snapshot(&self) -> Snapshot<T> {
        self.inner.state.borrow().clone()
    }

    pub fn loading(&self) -> bool {
        self.inner.state.borrow().loading()
    }

    pub fn error(&self) -> Option<String> {
        self.inner.state.borrow().error().map(str::to_owned)
    }

    pub fn data(&self) -> Option<T> {
        self.inner.state.borrow().data.clone()
    }

    /// Run `call`, publishing `Pending` and then its outcome.
    ///
    /// Returns the value on success. On failure the display message is stored
    /// and `None` is returned.
    pub async fn run<F>(&self, call: F) -> Option<T>
    where
        F: Future<Output = Result<T, ClientError>>,
    {
        let token = self.begin();
        self.complete(token, call.await)
    }

    /// Take a token for a new run and publish `Pending`
    fn begin(&self) -> u64 {
        let mut token = 0;
        self.inner.state.send_modify(|snapshot| {
            token = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
            snapshot.state = OperationState::Pending;
        });
        token
    }

    fn complete(&self, token: u64, outcome: Result<T, ClientError>) -> Option<T> {
        match outcome {
            Ok(value) => {
                let published = self.publish(token, |snapshot| {
                    snapshot.state = OperationState::Ok(value.clone());
                    snapshot.data = Some(value.clone());
                });
                if !published {
                    tracing::debug!(token, "Discarding stale response");
                }
                Some(value)
            }
            Err(e) => {
                let message = e.display_message(self.inner.fallback);
                tracing::debug!(token, error = %e, "Operation failed");
                self.publish(token, |snapshot| {
                    snapshot.state = OperationState::Err(message);
                });
                None
            }
        }
    }

    /// Apply `update` only if `token` belongs to the newest run
    fn publish(&self, token: u64, update: impl FnOnce(&mut Snapshot<T>)) -> bool {
        self.inner.state.send_if_modified(|snapshot| {
            if self.inner.generation.load(Ordering::SeqCst) != token {
                return false;
            }
            update(snapshot);
            true
        })
    }

    /// Drop a stored error, returning to `Idle`. Keeps `data`.
    pub fn clear_error(&self) {
        self.inner.state.send_if_modified(|snapshot| {
            if matches!(snapshot.state, OperationState::Err(_)) {
                snapshot.state = OperationState::Idle;
                true
            } else {
                false
            }
        });
    }

    /// Back to `Idle` with no data; in-flight runs become stale
    pub fn reset(&self) {
        self.inner.state.send_modify(|snapshot| {
            self.inner.generation.fetch_add(1, Ordering::SeqCst);
            snapshot.state = OperationState::Idle;
            snapshot.data = None;
        });
    }

    /// Wait until no run is in flight and return the resulting snapshot
    pub async fn settled(&self) -> Snapshot<T> {
        let mut rx = self.inner.state.subscribe();
        let settled = match rx.wait_for(|snapshot| !snapshot.loading()).await {
            Ok(snapshot) => snapshot.clone(),
            Err(_) => self.snapshot(),
        };
        settled
    }
}

impl<T: Clone + Send + Sync + 'static> AsyncOperation<T> {
    /// Stream of snapshots, starting with the current one
    pub fn subscribe(&self) -> WatchStream<Snapshot<T>> {
        WatchStream::new(self.inner.state.subscribe())
    }

    /// Like [`Self::run`], but on a background task. `Pending` is published
    /// before this returns, so the run is ordered by when it was spawned.
    pub fn spawn<F>(&self, call: F) -> JoinHandle<Option<T>>
    where
        F: Future<Output = Result<T, ClientError>> + Send + 'static,
    {
        let token = self.begin();
        let operation = self.clone();
        tokio::spawn(async move { operation.complete(token, call.await) })
    }
}
