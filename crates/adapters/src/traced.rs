// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced platform wrapper for consistent observability

use crate::platform::{PlatformAdapter, PlatformError};
use async_trait::async_trait;
use bgfetch_core::{AvailabilityStatus, TaskConfig, TaskId};

/// Wrapper that adds tracing to any PlatformAdapter
#[derive(Clone)]
pub struct TracedPlatform<P> {
    inner: P,
}

impl<P> TracedPlatform<P> {
    pub fn new(inner: P) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<P: PlatformAdapter> PlatformAdapter for TracedPlatform<P> {
    async fn register(&self, config: &TaskConfig) -> Result<(), PlatformError> {
        let span = tracing::info_span!("platform.register", task_id = %config.task_id);
        let _guard = span.enter();

        tracing::info!(
            periodic = config.periodic,
            delay = ?config.delay,
            interval = ?config.minimum_fetch_interval,
            "registering"
        );

        let start = std::time::Instant::now();
        let result = self.inner.register(config).await;
        let elapsed = start.elapsed();

        match &result {
            Ok(()) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "registered"),
            Err(e) => tracing::error!(
                elapsed_ms = elapsed.as_millis() as u64,
                error = %e,
                "register failed"
            ),
        }

        result
    }

    async fn unregister(&self, task_id: &TaskId) -> Result<(), PlatformError> {
        let span = tracing::info_span!("platform.unregister", task_id = %task_id);
        let _guard = span.enter();

        let result = self.inner.unregister(task_id).await;
        // unregister() failing is often acceptable (schedule already gone)
        match &result {
            Ok(()) => tracing::info!("unregistered"),
            Err(e) => tracing::warn!(error = %e, "unregister failed (may be expected)"),
        }

        result
    }

    async fn task_completed(&self, task_id: &TaskId) {
        tracing::debug!(task_id = %task_id, "signalling completion");
        self.inner.task_completed(task_id).await;
    }

    async fn availability(&self) -> AvailabilityStatus {
        let status = self.inner.availability().await;
        tracing::trace!(status = %status, "availability checked");
        status
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
