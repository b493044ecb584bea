// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake platform adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use crate::platform::{PlatformAdapter, PlatformError};
use async_trait::async_trait;
use bgfetch_core::{AvailabilityStatus, TaskConfig, TaskId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Recorded call to the platform adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlatformCall {
    Register { task_id: TaskId, periodic: bool },
    Unregister { task_id: TaskId },
    TaskCompleted { task_id: TaskId },
    Availability,
}

/// Shared state for the fake platform
struct FakeState {
    calls: Vec<PlatformCall>,
    registered: HashMap<TaskId, TaskConfig>,
    availability: AvailabilityStatus,
    // Configurable failure modes
    register_fails: bool,
}

impl Default for FakeState {
    fn default() -> Self {
        Self {
            calls: Vec::new(),
            registered: HashMap::new(),
            availability: AvailabilityStatus::Available,
            register_fails: false,
        }
    }
}

/// Fake platform with call recording for testing
#[derive(Clone, Default)]
pub struct FakePlatform {
    state: Arc<Mutex<FakeState>>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<PlatformCall> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clone()
    }

    /// Clear recorded calls
    pub fn clear_calls(&self) {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .calls
            .clear();
    }

    /// Set what `availability` reports
    pub fn set_availability(&self, status: AvailabilityStatus) {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .availability = status;
    }

    /// Make `register` fail
    pub fn fail_register(&self, fail: bool) {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .register_fails = fail;
    }

    pub fn is_registered(&self, task_id: &TaskId) -> bool {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .registered
            .contains_key(task_id)
    }

    /// The config currently registered for a task, if any
    pub fn registered_config(&self, task_id: &TaskId) -> Option<TaskConfig> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .registered
            .get(task_id)
            .cloned()
    }

    /// Ids of all currently registered tasks
    pub fn registered(&self) -> Vec<TaskId> {
        self.state
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .registered
            .keys()
            .cloned()
            .collect()
    }
}

#[async_trait]
impl PlatformAdapter for FakePlatform {
    async fn register(&self, config: &TaskConfig) -> Result<(), PlatformError> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.calls.push(PlatformCall::Register {
            task_id: config.task_id.clone(),
            periodic: config.periodic,
        });
        if state.register_fails {
            return Err(PlatformError::RegistrationFailed {
                task_id: config.task_id.clone(),
                reason: "simulated failure".to_string(),
            });
        }
        state.registered.insert(config.task_id.clone(), config.clone());
        Ok(())
    }

    async fn unregister(&self, task_id: &TaskId) -> Result<(), PlatformError> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.calls.push(PlatformCall::Unregister {
            task_id: task_id.clone(),
        });
        state.registered.remove(task_id);
        Ok(())
    }

    async fn task_completed(&self, task_id: &TaskId) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.calls.push(PlatformCall::TaskCompleted {
            task_id: task_id.clone(),
        });
    }

    async fn availability(&self) -> AvailabilityStatus {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.calls.push(PlatformCall::Availability);
        state.availability
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
