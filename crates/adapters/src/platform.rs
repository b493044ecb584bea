// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Platform scheduling-primitive adapter
//!
//! The OS job scheduler owns wake timing entirely: it may defer, batch, or
//! skip wakes based on network, battery, and charging constraints. The
//! lifecycle manager only hands tasks over, takes them back, and signals
//! completion so the scheduler can reclaim its execution budget.

use async_trait::async_trait;
use bgfetch_core::{AvailabilityStatus, TaskConfig, TaskId};
use thiserror::Error;

/// Errors from the scheduling primitive
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("failed to register task {task_id}: {reason}")]
    RegistrationFailed { task_id: TaskId, reason: String },
    #[error("failed to unregister task {task_id}: {reason}")]
    UnregistrationFailed { task_id: TaskId, reason: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Adapter for the OS scheduling primitive
#[async_trait]
pub trait PlatformAdapter: Clone + Send + Sync + 'static {
    /// Hand a task to the scheduler. Wake timing from here on is
    /// best-effort and entirely the scheduler's decision.
    async fn register(&self, config: &TaskConfig) -> Result<(), PlatformError>;

    /// Remove a task's pending schedule. An invocation already in flight
    /// is unaffected.
    async fn unregister(&self, task_id: &TaskId) -> Result<(), PlatformError>;

    /// Signal that work for the current invocation is complete, releasing
    /// the keep-process-alive resource and the scheduler's budget for the
    /// run. Fire-and-forget: completion must never fail the caller.
    async fn task_completed(&self, task_id: &TaskId);

    /// Current background-execution permission state. Never cached.
    async fn availability(&self) -> AvailabilityStatus;
}

/// Platform that accepts every registration and never wakes anyone.
///
/// For composition roots that run without OS scheduling, eg dry runs
/// driven purely by simulated invocations.
#[derive(Clone, Debug, Default)]
pub struct NoOpPlatform;

#[async_trait]
impl PlatformAdapter for NoOpPlatform {
    async fn register(&self, config: &TaskConfig) -> Result<(), PlatformError> {
        tracing::debug!(task_id = %config.task_id, "no-op register");
        Ok(())
    }

    async fn unregister(&self, task_id: &TaskId) -> Result<(), PlatformError> {
        tracing::debug!(task_id = %task_id, "no-op unregister");
        Ok(())
    }

    async fn task_completed(&self, task_id: &TaskId) {
        tracing::debug!(task_id = %task_id, "no-op task_completed");
    }

    async fn availability(&self) -> AvailabilityStatus {
        AvailabilityStatus::Available
    }
}
