// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task identity and per-run state
//!
//! A task is a unit of background work the OS wakes on a best-effort
//! schedule. A `TaskRun` tracks a single wake of that task, from the
//! scheduler's invocation until the application signals completion.

use crate::clock::Clock;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Unique identifier for a task
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(pub String);

impl TaskId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for TaskId {
    fn from(s: String) -> Self {
        TaskId(s)
    }
}

impl From<&str> for TaskId {
    fn from(s: &str) -> Self {
        TaskId(s.to_string())
    }
}

/// One in-flight execution of a task.
///
/// Created when the scheduling primitive invokes the task and destroyed as
/// soon as the run is finished. `finished` flips exactly once; repeat
/// completion signals are tolerated by the registry, not by the run itself.
#[derive(Debug, Clone)]
pub struct TaskRun {
    pub task_id: TaskId,
    pub started_at: Instant,
    /// True when the OS invoked this run with its budget already exhausted.
    pub timed_out: bool,
    finished: bool,
}

impl TaskRun {
    /// Create a run for a task the scheduler just invoked
    pub fn new(task_id: TaskId, timed_out: bool, clock: &impl Clock) -> Self {
        Self {
            task_id,
            started_at: clock.now(),
            timed_out,
            finished: false,
        }
    }

    /// Mark the run finished. Returns false if it already was.
    pub fn finish(&mut self) -> bool {
        if self.finished {
            return false;
        }
        self.finished = true;
        true
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Wall time since the scheduler invoked this run
    pub fn elapsed(&self, clock: &impl Clock) -> Duration {
        clock.now().saturating_duration_since(self.started_at)
    }
}

#[cfg(test)]
#[path = "task_tests.rs"]
mod tests;
