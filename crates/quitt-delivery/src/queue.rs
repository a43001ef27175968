//! In-process background queue for deferred event processing.
//!
//! A multi-producer FIFO of pending order events paired with a single
//! worker task. Enqueueing never blocks the caller (the channel is
//! unbounded, an acknowledged resource-exhaustion trade-off). The
//! worker waits on the channel with a select against a cancellation
//! token, so `stop` interrupts an idle wait promptly but never cancels
//! an in-flight handler invocation.
//!
//! Handler failures are logged and swallowed: no dead-letter queue, no
//! per-item retry bookkeeping. Items enqueued while the worker is
//! stopped stay buffered and are processed after the next `start`.

use std::sync::Arc;

use async_trait::async_trait;
use quitt_core::OrderEvent;
use tokio::{
    sync::{mpsc, Mutex},
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Handler invoked by the queue worker for each dequeued event.
#[async_trait]
pub trait EventProcessor: Send + Sync {
    /// Processes one dequeued event. Errors are logged by the worker
    /// and the item is dropped.
    async fn process(&self, event: OrderEvent) -> anyhow::Result<()>;
}

struct WorkerState {
    token: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

/// FIFO queue of pending order events with one background worker.
///
/// `start` and `stop` are both idempotent. The queue itself outlives
/// worker restarts; the channel receiver is shared with the worker task
/// through a mutex it holds for the duration of a run.
pub struct EventQueue {
    tx: mpsc::UnboundedSender<OrderEvent>,
    rx: Arc<Mutex<mpsc::UnboundedReceiver<OrderEvent>>>,
    state: Mutex<WorkerState>,
}

impl EventQueue {
    /// Creates an empty, stopped queue.
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx: Arc::new(Mutex::new(rx)),
            state: Mutex::new(WorkerState { token: CancellationToken::new(), handle: None }),
        }
    }

    /// Appends an event to the tail of the queue. Never blocks.
    pub fn enqueue(&self, event: OrderEvent) {
        let order_id = event.payload.id.clone();
        if self.tx.send(event).is_err() {
            // Receiver is held for the queue's lifetime; this only
            // happens during teardown.
            warn!(order_id = %order_id, "queue receiver dropped, event discarded");
            return;
        }
        info!(order_id = %order_id, "event enqueued");
    }

    /// Starts the background worker. No-op when already running.
    pub async fn start(&self, processor: Arc<dyn EventProcessor>) {
        let mut state = self.state.lock().await;
        if state.handle.is_some() {
            return;
        }

        let token = CancellationToken::new();
        state.token = token.clone();
        let rx = Arc::clone(&self.rx);

        state.handle = Some(tokio::spawn(worker_loop(rx, processor, token)));
        info!("queue worker started");
    }

    /// Stops the background worker and awaits its termination.
    ///
    /// Cancels the worker's wait-for-item immediately; an in-flight
    /// handler invocation is awaited, not cancelled. No-op when
    /// already stopped.
    pub async fn stop(&self) {
        let mut state = self.state.lock().await;
        let Some(handle) = state.handle.take() else {
            return;
        };

        state.token.cancel();
        if let Err(e) = handle.await {
            error!(error = %e, "queue worker task panicked");
        }
        info!("queue worker stopped");
    }

    /// Whether the worker is currently running.
    pub async fn is_running(&self) -> bool {
        self.state.lock().await.handle.is_some()
    }
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

/// Worker loop: dequeue, process, repeat until stopped.
async fn worker_loop(
    rx: Arc<Mutex<mpsc::UnboundedReceiver<OrderEvent>>>,
    processor: Arc<dyn EventProcessor>,
    token: CancellationToken,
) {
    let mut rx = rx.lock().await;

    loop {
        let event = tokio::select! {
            () = token.cancelled() => break,
            item = rx.recv() => match item {
                Some(event) => event,
                // All senders gone; nothing further can arrive.
                None => break,
            },
        };

        let order_id = event.payload.id.clone();
        let event_name = event.name.clone();
        if let Err(e) = processor.process(event).await {
            error!(
                order_id = %order_id,
                event = %event_name,
                error = %e,
                "failed to process queued event"
            );
        }
    }
}
