// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the fetch engine

use bgfetch_adapters::PlatformError;
use bgfetch_core::{ConfigError, TaskId};
use thiserror::Error;

/// Errors that can occur in the lifecycle manager.
///
/// Availability conditions are never errors: the OS denying background
/// execution is reported through the status value so callers can degrade
/// without exception machinery. Nothing here is fatal to the process; a
/// failed registration simply leaves a task unscheduled.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("task already registered: {0}")]
    DuplicateTask(TaskId),
    #[error("unknown task: {0}")]
    UnknownTask(TaskId),
    #[error("platform error: {0}")]
    Platform(#[from] PlatformError),
}
