// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Diagnostics event sink
//!
//! Persisted event logs are an external collaborator's concern. The core
//! makes a fire-and-forget record call per fetch event; what happens to it
//! is up to the sink.

use async_trait::async_trait;
use bgfetch_core::FetchEvent;

/// Sink for fetch-event diagnostics
#[async_trait]
pub trait EventRecorder: Clone + Send + Sync + 'static {
    /// Record an event. Must not block the caller meaningfully and must
    /// not fail it at all.
    async fn record(&self, event: &FetchEvent);
}

/// Recorder that drops everything
#[derive(Clone, Debug, Default)]
pub struct NoOpRecorder;

#[async_trait]
impl EventRecorder for NoOpRecorder {
    async fn record(&self, _event: &FetchEvent) {}
}

#[cfg(any(test, feature = "test-support"))]
pub use memory::{MemoryRecorder, RecordedFetch};

#[cfg(any(test, feature = "test-support"))]
mod memory {
    #![cfg_attr(coverage_nightly, coverage(off))]

    use super::*;
    use std::sync::{Arc, Mutex};

    /// A recorded event with its arrival time
    #[derive(Debug, Clone)]
    pub struct RecordedFetch {
        pub event: FetchEvent,
        pub at: chrono::DateTime<chrono::Utc>,
    }

    /// In-memory recorder for assertions in tests
    #[derive(Clone, Default)]
    pub struct MemoryRecorder {
        events: Arc<Mutex<Vec<RecordedFetch>>>,
    }

    impl MemoryRecorder {
        pub fn new() -> Self {
            Self::default()
        }

        /// All events recorded so far
        pub fn events(&self) -> Vec<RecordedFetch> {
            self.events
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .clone()
        }
    }

    #[async_trait]
    impl EventRecorder for MemoryRecorder {
        async fn record(&self, event: &FetchEvent) {
            self.events
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push(RecordedFetch {
                    event: event.clone(),
                    at: chrono::Utc::now(),
                });
        }
    }
}

#[cfg(test)]
#[path = "record_tests.rs"]
mod tests;
