// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Foreground fetch/timeout listener
//!
//! The two-operation listener registered at configure time. Whichever
//! operation fires, the receiver owns the completion contract: it must
//! eventually call `finish` for the event's task id.

use bgfetch_core::FetchEvent;

type EventFn = Box<dyn Fn(FetchEvent) + Send + Sync>;

/// Listener invoked for fetch and timeout events.
///
/// `on_fetch` receives normal wakes. `on_timeout` fires when the OS
/// signals the execution budget is exhausted; the only valid response is
/// to abort any work in progress and finish.
pub struct FetchCallback {
    on_fetch: EventFn,
    on_timeout: EventFn,
    handles_timeout: bool,
}

impl FetchCallback {
    pub fn new<F, T>(on_fetch: F, on_timeout: T) -> Self
    where
        F: Fn(FetchEvent) + Send + Sync + 'static,
        T: Fn(FetchEvent) + Send + Sync + 'static,
    {
        Self {
            on_fetch: Box::new(on_fetch),
            on_timeout: Box::new(on_timeout),
            handles_timeout: true,
        }
    }

    /// Listener with no timeout handling of its own.
    ///
    /// Timeout events are logged and the manager finishes the run on the
    /// listener's behalf, so the OS budget is still released promptly.
    pub fn with_default_timeout<F>(on_fetch: F) -> Self
    where
        F: Fn(FetchEvent) + Send + Sync + 'static,
    {
        Self {
            on_fetch: Box::new(on_fetch),
            on_timeout: Box::new(|event: FetchEvent| {
                tracing::warn!(
                    task_id = %event.task_id,
                    "timeout with no timeout listener; finishing on the caller's behalf"
                );
            }),
            handles_timeout: false,
        }
    }

    pub(crate) fn fetch(&self, event: FetchEvent) {
        (self.on_fetch)(event);
    }

    pub(crate) fn timeout(&self, event: FetchEvent) {
        (self.on_timeout)(event);
    }

    /// Whether the listener takes responsibility for finishing timed-out
    /// runs itself
    pub(crate) fn handles_timeout(&self) -> bool {
        self.handles_timeout
    }
}

#[cfg(test)]
#[path = "callback_tests.rs"]
mod tests;
