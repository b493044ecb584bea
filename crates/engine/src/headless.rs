// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Headless dispatch: fetch handlers with no foreground listener attached
//!
//! The scheduling primitive's invocation thread must return quickly or the
//! OS kills the process, so handler execution happens on a bounded worker
//! pool. Dispatch never blocks: a saturated pool answers `FinishNow` and
//! the run completes immediately instead of waiting on a queue slot.

use async_trait::async_trait;
use bgfetch_core::FetchEvent;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Default number of pool workers
pub const DEFAULT_WORKERS: usize = 2;
/// Default dispatch queue capacity
pub const DEFAULT_QUEUE_CAPACITY: usize = 8;

/// Handler for fetch events that arrive while no foreground listener is
/// attached (eg the process was launched headlessly).
///
/// Registered explicitly at startup. The handler owns the completion
/// contract exactly like a foreground listener: it must call `finish` for
/// the event's task id when its work is done.
#[async_trait]
pub trait HeadlessTask: Send + Sync + 'static {
    async fn on_fetch(&self, event: FetchEvent);
}

/// What the caller must do after a dispatch attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Handler queued; it owns the completion signal now
    Queued,
    /// Handler was not and will not be invoked; the caller must finish the
    /// run immediately
    FinishNow,
}

/// Bounded worker pool that runs the headless handler off the scheduling
/// primitive's invocation thread
pub struct HeadlessDispatcher {
    tx: mpsc::Sender<FetchEvent>,
    workers: Vec<JoinHandle<()>>,
}

impl HeadlessDispatcher {
    /// Pool with default sizing
    pub fn new(handler: Arc<dyn HeadlessTask>) -> Self {
        Self::with_pool(handler, DEFAULT_WORKERS, DEFAULT_QUEUE_CAPACITY)
    }

    /// Pool with explicit worker count and queue capacity (both floored
    /// at 1)
    pub fn with_pool(handler: Arc<dyn HeadlessTask>, workers: usize, capacity: usize) -> Self {
        let (tx, rx) = mpsc::channel::<FetchEvent>(capacity.max(1));
        let rx = Arc::new(tokio::sync::Mutex::new(rx));

        let workers = (0..workers.max(1))
            .map(|worker| {
                let rx = Arc::clone(&rx);
                let handler = Arc::clone(&handler);
                tokio::spawn(async move {
                    loop {
                        // Hold the receiver lock only while dequeuing so
                        // other workers can pull the next event
                        let event = { rx.lock().await.recv().await };
                        let Some(event) = event else { break };
                        tracing::debug!(
                            worker,
                            task_id = %event.task_id,
                            "headless handler starting"
                        );
                        handler.on_fetch(event).await;
                    }
                })
            })
            .collect();

        Self { tx, workers }
    }

    /// Route an event to the pool.
    ///
    /// Timeout events never reach the handler: the budget is already
    /// exhausted, so the only valid response is immediate completion.
    pub fn dispatch(&self, event: FetchEvent) -> DispatchOutcome {
        if event.timeout {
            tracing::info!(
                task_id = %event.task_id,
                "headless timeout, finishing without invoking handler"
            );
            return DispatchOutcome::FinishNow;
        }
        match self.tx.try_send(event) {
            Ok(()) => DispatchOutcome::Queued,
            Err(mpsc::error::TrySendError::Full(event)) => {
                tracing::warn!(
                    task_id = %event.task_id,
                    "headless queue full, finishing without invoking handler"
                );
                DispatchOutcome::FinishNow
            }
            Err(mpsc::error::TrySendError::Closed(event)) => {
                tracing::warn!(
                    task_id = %event.task_id,
                    "headless pool stopped, finishing without invoking handler"
                );
                DispatchOutcome::FinishNow
            }
        }
    }

    /// Stop accepting events and wait for queued handlers to drain
    pub async fn shutdown(self) {
        drop(self.tx);
        for handle in self.workers {
            let _ = handle.await;
        }
    }
}

#[cfg(test)]
#[path = "headless_tests.rs"]
mod tests;
