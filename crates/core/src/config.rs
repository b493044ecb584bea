// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Task configuration
//!
//! A `TaskConfig` is the validated, immutable description of a background
//! task: its identity, its scheduling constraints, and how events for it
//! are delivered. Configurations are value objects; once built they are
//! shared by read and never mutated.

use crate::task::TaskId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// Platform floor for the periodic fetch interval.
///
/// OS schedulers throttle anything more frequent, so sub-floor intervals
/// are clamped up rather than rejected.
pub const MINIMUM_FETCH_INTERVAL: Duration = Duration::from_secs(15 * 60);

/// Network constraint a task requires before the scheduler will run it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NetworkType {
    /// No network constraint
    #[default]
    None,
    /// Any network connectivity
    Any,
    /// Unmetered connectivity
    Unmetered,
    /// Connectivity that is not roaming
    NotRoaming,
    /// Cellular connectivity
    Cellular,
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkType::None => write!(f, "none"),
            NetworkType::Any => write!(f, "any"),
            NetworkType::Unmetered => write!(f, "unmetered"),
            NetworkType::NotRoaming => write!(f, "not-roaming"),
            NetworkType::Cellular => write!(f, "cellular"),
        }
    }
}

impl std::str::FromStr for NetworkType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(NetworkType::None),
            "any" => Ok(NetworkType::Any),
            "unmetered" => Ok(NetworkType::Unmetered),
            "not-roaming" => Ok(NetworkType::NotRoaming),
            "cellular" => Ok(NetworkType::Cellular),
            _ => Err(format!("unknown network type: {}", s)),
        }
    }
}

/// Errors from configuration validation
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("task id must not be empty")]
    EmptyTaskId,
    #[error("task {0} has no delay; ad-hoc scheduled tasks require one")]
    MissingDelay(TaskId),
}

/// Validated, immutable description of a background task.
///
/// Every optional field carries a serde default so a configuration can be
/// deserialized from a plain field mapping; omitted fields take the
/// documented defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TaskConfig {
    pub task_id: TaskId,

    /// Interval between wakes of the default periodic fetch task.
    /// Clamped to [`MINIMUM_FETCH_INTERVAL`].
    #[serde(with = "humantime_serde", default = "default_fetch_interval")]
    pub minimum_fetch_interval: Duration,

    /// Interval of an ad-hoc scheduled task (one-shot delay, or the period
    /// when `periodic` is set). Required by `scheduleTask`-style
    /// registration, unused by the default fetch task.
    #[serde(with = "humantime_serde", default)]
    pub delay: Option<Duration>,

    /// Stop firing events once the user terminates the app
    #[serde(default = "default_true")]
    pub stop_on_terminate: bool,

    /// Begin firing events again after device reboot
    #[serde(default)]
    pub start_on_boot: bool,

    /// Force the low-level alarm scheduler for more exact timing. The
    /// criteria fields below do not apply under that scheduler.
    #[serde(default)]
    pub force_alarm_manager: bool,

    #[serde(default)]
    pub required_network_type: NetworkType,

    #[serde(default)]
    pub requires_battery_not_low: bool,

    #[serde(default)]
    pub requires_charging: bool,

    #[serde(default)]
    pub requires_device_idle: bool,

    #[serde(default)]
    pub requires_storage_not_low: bool,

    /// Keep firing, or fire once and be consumed
    #[serde(default)]
    pub periodic: bool,

    /// Allow headless dispatch when no foreground listener is attached
    #[serde(default)]
    pub enable_headless: bool,

    /// Marks the implicit default periodic fetch task, as opposed to an
    /// ad-hoc scheduled one
    #[serde(default)]
    pub is_fetch_task: bool,
}

fn default_fetch_interval() -> Duration {
    MINIMUM_FETCH_INTERVAL
}

fn default_true() -> bool {
    true
}

impl TaskConfig {
    /// Start building a configuration for the given task id
    pub fn builder(task_id: impl Into<TaskId>) -> TaskConfigBuilder {
        TaskConfigBuilder::new(task_id)
    }

    /// Re-check a configuration that bypassed the builder (eg one
    /// deserialized from a field mapping)
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.task_id.as_str().is_empty() {
            return Err(ConfigError::EmptyTaskId);
        }
        Ok(())
    }

    /// Clamp the fetch interval up to the platform floor
    pub fn normalized(mut self) -> Self {
        if self.minimum_fetch_interval < MINIMUM_FETCH_INTERVAL {
            tracing::debug!(
                task_id = %self.task_id,
                requested = ?self.minimum_fetch_interval,
                "fetch interval below platform floor, clamping"
            );
            self.minimum_fetch_interval = MINIMUM_FETCH_INTERVAL;
        }
        self
    }

    /// Rewrite this configuration as the default periodic fetch task.
    ///
    /// The reserved id is forced regardless of what the caller supplied,
    /// and the task is marked periodic.
    pub fn into_fetch_task(mut self, reserved_id: impl Into<TaskId>) -> Self {
        self.task_id = reserved_id.into();
        self.is_fetch_task = true;
        self.periodic = true;
        self.normalized()
    }
}

/// Builder for [`TaskConfig`]
#[derive(Debug, Clone)]
pub struct TaskConfigBuilder {
    config: TaskConfig,
}

impl TaskConfigBuilder {
    fn new(task_id: impl Into<TaskId>) -> Self {
        Self {
            config: TaskConfig {
                task_id: task_id.into(),
                minimum_fetch_interval: default_fetch_interval(),
                delay: None,
                stop_on_terminate: true,
                start_on_boot: false,
                force_alarm_manager: false,
                required_network_type: NetworkType::None,
                requires_battery_not_low: false,
                requires_charging: false,
                requires_device_idle: false,
                requires_storage_not_low: false,
                periodic: false,
                enable_headless: false,
                is_fetch_task: false,
            },
        }
    }

    pub fn minimum_fetch_interval(mut self, interval: Duration) -> Self {
        self.config.minimum_fetch_interval = interval;
        self
    }

    pub fn delay(mut self, delay: Duration) -> Self {
        self.config.delay = Some(delay);
        self
    }

    pub fn stop_on_terminate(mut self, stop: bool) -> Self {
        self.config.stop_on_terminate = stop;
        self
    }

    pub fn start_on_boot(mut self, start: bool) -> Self {
        self.config.start_on_boot = start;
        self
    }

    pub fn force_alarm_manager(mut self, force: bool) -> Self {
        self.config.force_alarm_manager = force;
        self
    }

    pub fn required_network_type(mut self, network: NetworkType) -> Self {
        self.config.required_network_type = network;
        self
    }

    pub fn requires_battery_not_low(mut self, requires: bool) -> Self {
        self.config.requires_battery_not_low = requires;
        self
    }

    pub fn requires_charging(mut self, requires: bool) -> Self {
        self.config.requires_charging = requires;
        self
    }

    pub fn requires_device_idle(mut self, requires: bool) -> Self {
        self.config.requires_device_idle = requires;
        self
    }

    pub fn requires_storage_not_low(mut self, requires: bool) -> Self {
        self.config.requires_storage_not_low = requires;
        self
    }

    pub fn periodic(mut self, periodic: bool) -> Self {
        self.config.periodic = periodic;
        self
    }

    pub fn enable_headless(mut self, enable: bool) -> Self {
        self.config.enable_headless = enable;
        self
    }

    /// Validate and produce the configuration
    pub fn build(self) -> Result<TaskConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config.normalized())
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
