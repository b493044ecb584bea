// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fetch event payload
//!
//! The single event shape delivered to foreground listeners and headless
//! handlers alike. Normal wakes and budget-exhausted timeouts travel the
//! same channel, distinguished by the `timeout` flag.

use crate::task::TaskId;
use serde::{Deserialize, Serialize};

/// A fetch or timeout event for one task invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FetchEvent {
    pub task_id: TaskId,
    /// True when the OS signalled that the execution budget for this run is
    /// exhausted. The only valid response is to finish immediately.
    pub timeout: bool,
}

impl FetchEvent {
    pub fn new(task_id: impl Into<TaskId>, timeout: bool) -> Self {
        Self {
            task_id: task_id.into(),
            timeout,
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
