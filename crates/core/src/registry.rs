// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Live-run registry
//!
//! The registry maps task ids to their in-flight runs and is the single
//! piece of mutable shared state in the system. Invariant: at most one live
//! run per task id. The registry itself is a plain map; the engine wraps it
//! in a mutex and holds the lock only for map access.

use crate::clock::Clock;
use crate::task::{TaskId, TaskRun};
use std::collections::HashMap;

/// Result of recording a task invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BeginOutcome {
    /// A new run was created
    Started,
    /// A run for this id is already live; the invocation coalesces into it
    Coalesced,
}

/// Map of task id to in-flight run
#[derive(Debug, Default)]
pub struct TaskRegistry {
    runs: HashMap<TaskId, TaskRun>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an invocation from the scheduling primitive.
    ///
    /// A second invocation for an id with a live run coalesces into the
    /// existing run: the run keeps its original start time and timeout
    /// flag, and the caller should drop the duplicate.
    pub fn begin(
        &mut self,
        task_id: &TaskId,
        timed_out: bool,
        clock: &impl Clock,
    ) -> BeginOutcome {
        if self.runs.contains_key(task_id) {
            return BeginOutcome::Coalesced;
        }
        self.runs.insert(
            task_id.clone(),
            TaskRun::new(task_id.clone(), timed_out, clock),
        );
        BeginOutcome::Started
    }

    /// Remove and return the live run for a task.
    ///
    /// Returns `None` for unknown ids; callers treat that as a duplicate
    /// completion signal and do nothing. Idempotent by construction: the
    /// entry is gone after the first call.
    pub fn finish(&mut self, task_id: &TaskId) -> Option<TaskRun> {
        self.runs.remove(task_id).map(|mut run| {
            run.finish();
            run
        })
    }

    pub fn get(&self, task_id: &TaskId) -> Option<&TaskRun> {
        self.runs.get(task_id)
    }

    pub fn is_running(&self, task_id: &TaskId) -> bool {
        self.runs.contains_key(task_id)
    }

    pub fn len(&self) -> usize {
        self.runs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Ids of all runs currently in flight
    pub fn active_ids(&self) -> Vec<TaskId> {
        self.runs.keys().cloned().collect()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
