//! Bounded update dispatch: a fixed worker pool behind an mpsc queue.
//!
//! Both transports enqueue core updates here instead of spawning a task per
//! update, so the number of in-flight handlers is capped and queue pressure
//! is observable at the transport boundary.

use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, error, info};

use crate::core::Update;
use crate::handlers::CommandRouter;

/// Errors surfaced to the enqueueing transport.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("dispatch queue is full")]
    QueueFull,
    #[error("dispatch queue is closed")]
    Closed,
}

/// Hands updates to a fixed pool of workers over a bounded channel.
#[derive(Clone)]
pub struct UpdateDispatcher {
    tx: mpsc::Sender<Update>,
}

impl UpdateDispatcher {
    /// Starts `workers` consumer tasks sharing one bounded queue.
    pub fn start(router: Arc<CommandRouter>, workers: usize, capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel::<Update>(capacity);
        let rx = Arc::new(Mutex::new(rx));

        for worker_id in 0..workers {
            let rx = Arc::clone(&rx);
            let router = Arc::clone(&router);
            tokio::spawn(async move {
                loop {
                    let update = { rx.lock().await.recv().await };
                    match update {
                        Some(update) => {
                            debug!(worker_id = worker_id, "Worker picked up update");
                            if let Err(e) = router.handle_update(&update).await {
                                error!(worker_id = worker_id, error = %e, "Handler failed");
                            }
                        }
                        None => {
                            info!(worker_id = worker_id, "Dispatch queue closed, worker exiting");
                            break;
                        }
                    }
                }
            });
        }

        info!(workers = workers, capacity = capacity, "Update dispatcher started");
        Self { tx }
    }

    /// Enqueues an update, waiting for queue space. Used by the polling
    /// transport, which tolerates backpressure.
    pub async fn dispatch(&self, update: Update) -> Result<(), DispatchError> {
        self.tx.send(update).await.map_err(|_| DispatchError::Closed)
    }

    /// Enqueues an update without waiting. Used by the webhook transport so
    /// the request path returns immediately; a full queue is reported
    /// instead of growing unbounded.
    pub fn try_dispatch(&self, update: Update) -> Result<(), DispatchError> {
        self.tx.try_send(update).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => DispatchError::QueueFull,
            mpsc::error::TrySendError::Closed(_) => DispatchError::Closed,
        })
    }
}
