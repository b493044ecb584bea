// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! FetchManager: the execution adapter between application code and the
//! platform scheduling primitive
//!
//! One explicit instance, owned by the application's composition root and
//! passed by handle to call sites; lifecycle = process lifetime. The
//! manager registers tasks with the scheduler, converts its callbacks into
//! typed fetch/timeout events, enforces one live run per task id, and
//! exposes the `finish` completion signal.

use crate::callback::FetchCallback;
use crate::error::FetchError;
use crate::headless::{DispatchOutcome, HeadlessDispatcher};
use bgfetch_adapters::{EventRecorder, PlatformAdapter};
use bgfetch_core::{
    AvailabilityStatus, BeginOutcome, Clock, ConfigError, FetchEvent, TaskConfig, TaskId,
    TaskRegistry,
};
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::Mutex as AsyncMutex;

/// Reserved id of the default periodic fetch task owned by `configure`
pub const FETCH_TASK_ID: &str = "bgfetch.fetch";

/// A task known to the manager: its configuration, whether delivery is
/// active, and a replacement parked while a run is in flight
#[derive(Debug, Clone)]
struct Registration {
    config: TaskConfig,
    active: bool,
    pending: Option<TaskConfig>,
}

impl Registration {
    fn new(config: TaskConfig) -> Self {
        Self {
            config,
            active: true,
            pending: None,
        }
    }
}

/// Task lifecycle manager over a platform scheduling primitive
pub struct FetchManager<P, R, C> {
    platform: P,
    recorder: R,
    clock: C,
    /// Live runs; the lock is held only for map access, never across await
    registry: Mutex<TaskRegistry>,
    tasks: AsyncMutex<HashMap<TaskId, Registration>>,
    callback: AsyncMutex<Option<FetchCallback>>,
    headless: Option<HeadlessDispatcher>,
}

impl<P, R, C> FetchManager<P, R, C>
where
    P: PlatformAdapter,
    R: EventRecorder,
    C: Clock,
{
    pub fn new(platform: P, recorder: R, clock: C) -> Self {
        Self {
            platform,
            recorder,
            clock,
            registry: Mutex::new(TaskRegistry::new()),
            tasks: AsyncMutex::new(HashMap::new()),
            callback: AsyncMutex::new(None),
            headless: None,
        }
    }

    /// Attach a headless dispatcher for events that arrive while no
    /// foreground listener is registered
    pub fn with_headless(mut self, dispatcher: HeadlessDispatcher) -> Self {
        self.headless = Some(dispatcher);
        self
    }

    /// Register the default periodic fetch task and the foreground
    /// listener, and activate delivery.
    ///
    /// Idempotent: a second call replaces both the configuration and the
    /// listener. The caller's task id is ignored; the reserved
    /// [`FETCH_TASK_ID`] is forced. Platform denial is reported through
    /// the returned status, never thrown: a denied configure stores the
    /// listener but leaves the task unscheduled.
    pub async fn configure(
        &self,
        config: TaskConfig,
        callback: FetchCallback,
    ) -> Result<AvailabilityStatus, FetchError> {
        let config = config.into_fetch_task(FETCH_TASK_ID);
        let task_id = config.task_id.clone();

        *self.callback.lock().await = Some(callback);

        let status = self.platform.availability().await;
        if !status.is_available() {
            tracing::warn!(
                status = %status,
                "background execution unavailable, fetch task left unscheduled"
            );
            return Ok(status);
        }

        let mut tasks = self.tasks.lock().await;
        if let Some(existing) = tasks.get(&task_id) {
            if existing.active {
                self.platform.unregister(&task_id).await?;
            }
        }
        self.platform.register(&config).await?;
        tracing::info!(
            task_id = %task_id,
            interval = ?config.minimum_fetch_interval,
            "fetch task configured"
        );
        tasks.insert(task_id, Registration::new(config));
        Ok(status)
    }

    /// Register an additional, independently-identified task.
    ///
    /// A new call for an id that is already registered replaces the prior
    /// scheduling intent. A replacement never orphans an in-flight run:
    /// with a run live for the id, the new configuration is parked and
    /// takes effect when the run finishes.
    pub async fn schedule_task(&self, config: TaskConfig) -> Result<(), FetchError> {
        config.validate()?;
        if config.task_id.as_str() == FETCH_TASK_ID {
            // The default fetch task is owned by configure
            return Err(FetchError::DuplicateTask(config.task_id));
        }
        if config.delay.is_none() {
            return Err(FetchError::Config(ConfigError::MissingDelay(
                config.task_id,
            )));
        }
        let config = config.normalized();
        let task_id = config.task_id.clone();

        let mut tasks = self.tasks.lock().await;
        let in_flight = self.with_registry(|r| r.is_running(&task_id));
        match tasks.get_mut(&task_id) {
            Some(registration) if in_flight => {
                tracing::info!(task_id = %task_id, "run in flight, parking replacement");
                registration.pending = Some(config);
            }
            Some(registration) => {
                // Unregister-then-reregister, atomic with respect to the
                // task table
                self.platform.unregister(&task_id).await?;
                self.platform.register(&config).await?;
                *registration = Registration::new(config);
                tracing::info!(task_id = %task_id, "task rescheduled");
            }
            None => {
                self.platform.register(&config).await?;
                tasks.insert(task_id.clone(), Registration::new(config));
                tracing::info!(task_id = %task_id, "task scheduled");
            }
        }
        Ok(())
    }

    /// (Re)activate event delivery for an already-configured task.
    ///
    /// Defaults to the reserved fetch task. No-op if delivery is already
    /// active; `UnknownTask` for ids that were never configured.
    pub async fn start(
        &self,
        task_id: Option<&TaskId>,
    ) -> Result<AvailabilityStatus, FetchError> {
        let default_id = TaskId::from(FETCH_TASK_ID);
        let task_id = task_id.unwrap_or(&default_id);

        let mut tasks = self.tasks.lock().await;
        let registration = tasks
            .get_mut(task_id)
            .ok_or_else(|| FetchError::UnknownTask(task_id.clone()))?;
        if !registration.active {
            self.platform.register(&registration.config).await?;
            registration.active = true;
            tracing::info!(task_id = %task_id, "task started");
        }
        drop(tasks);

        Ok(self.platform.availability().await)
    }

    /// Deactivate a task and remove its pending schedule.
    ///
    /// Defaults to the reserved fetch task. A run currently in flight is
    /// allowed to complete, but no further wakes are scheduled. Unknown
    /// ids are tolerated silently.
    pub async fn stop(&self, task_id: Option<&TaskId>) -> Result<(), FetchError> {
        let default_id = TaskId::from(FETCH_TASK_ID);
        let task_id = task_id.unwrap_or(&default_id);

        let mut tasks = self.tasks.lock().await;
        let Some(registration) = tasks.get_mut(task_id) else {
            tracing::debug!(task_id = %task_id, "stop for unknown task ignored");
            return Ok(());
        };
        if registration.active {
            self.platform.unregister(task_id).await?;
            registration.active = false;
        }
        registration.pending = None;
        tracing::info!(task_id = %task_id, "task stopped");
        Ok(())
    }

    /// Complete the current run for a task.
    ///
    /// Removes the run, releases the keep-process-alive resource by
    /// notifying the scheduler, and applies any parked reschedule. Safe to
    /// call repeatedly or for ids with no live run; duplicate completion
    /// signals from different callers are expected.
    pub async fn finish(&self, task_id: &TaskId) {
        let Some(run) = self.with_registry(|r| r.finish(task_id)) else {
            tracing::debug!(task_id = %task_id, "finish with no live run ignored");
            return;
        };
        tracing::info!(
            task_id = %task_id,
            timed_out = run.timed_out,
            elapsed = ?run.elapsed(&self.clock),
            "run finished"
        );
        self.platform.task_completed(task_id).await;

        let mut tasks = self.tasks.lock().await;
        let Some(registration) = tasks.get_mut(task_id) else {
            return;
        };
        if let Some(replacement) = registration.pending.take() {
            if registration.active {
                if let Err(e) = self.platform.unregister(task_id).await {
                    tracing::warn!(
                        task_id = %task_id,
                        error = %e,
                        "unregister before parked reschedule failed"
                    );
                }
            }
            match self.platform.register(&replacement).await {
                Ok(()) => {
                    *registration = Registration::new(replacement);
                    tracing::info!(task_id = %task_id, "parked reschedule applied");
                }
                Err(e) => {
                    registration.active = false;
                    tracing::error!(
                        task_id = %task_id,
                        error = %e,
                        "parked reschedule failed, task left unscheduled"
                    );
                }
            }
        }
    }

    /// Current availability, straight from the platform. Never cached.
    pub async fn status(&self) -> AvailabilityStatus {
        self.platform.availability().await
    }

    /// Inbound invocation from the scheduling primitive.
    ///
    /// Creates the run, records the event, and delivers it: to the
    /// foreground listener when one is registered, otherwise to the
    /// headless dispatcher for tasks that enable it. Events nobody can
    /// receive are finished immediately so the scheduler's budget is never
    /// stranded.
    pub async fn on_invoke(&self, task_id: &TaskId, timed_out: bool) {
        let outcome = self.with_registry(|r| r.begin(task_id, timed_out, &self.clock));
        if outcome == BeginOutcome::Coalesced {
            tracing::warn!(
                task_id = %task_id,
                timed_out,
                "duplicate invocation for live run dropped"
            );
            return;
        }

        let event = FetchEvent::new(task_id.clone(), timed_out);
        self.recorder.record(&event).await;
        tracing::info!(task_id = %task_id, timeout = timed_out, "fetch event received");

        let enable_headless = {
            let mut tasks = self.tasks.lock().await;
            match tasks.get_mut(task_id) {
                Some(registration) => {
                    if !registration.config.periodic && !registration.config.is_fetch_task {
                        // One-shot schedules are consumed by the wake;
                        // start() re-arms them
                        registration.active = false;
                    }
                    registration.config.enable_headless
                }
                None => {
                    tracing::warn!(task_id = %task_id, "invocation for unconfigured task");
                    false
                }
            }
        };

        let callback = self.callback.lock().await;
        if let Some(cb) = callback.as_ref() {
            let auto_finish = timed_out && !cb.handles_timeout();
            if timed_out {
                cb.timeout(event);
            } else {
                cb.fetch(event);
            }
            drop(callback);
            if auto_finish {
                self.finish(task_id).await;
            }
            return;
        }
        drop(callback);

        if enable_headless {
            if let Some(dispatcher) = &self.headless {
                if dispatcher.dispatch(event) == DispatchOutcome::FinishNow {
                    self.finish(task_id).await;
                }
                return;
            }
            tracing::warn!(task_id = %task_id, "headless enabled but no dispatcher attached");
        } else {
            tracing::warn!(task_id = %task_id, "no listener for event");
        }
        self.finish(task_id).await;
    }

    /// Whether a run is currently in flight for the task
    pub fn is_running(&self, task_id: &TaskId) -> bool {
        self.with_registry(|r| r.is_running(task_id))
    }

    /// Number of runs currently in flight
    pub fn active_runs(&self) -> usize {
        self.with_registry(|r| r.len())
    }

    /// Whether the task is configured and delivery is active
    pub async fn is_active(&self, task_id: &TaskId) -> bool {
        self.tasks
            .lock()
            .await
            .get(task_id)
            .is_some_and(|registration| registration.active)
    }

    fn with_registry<T>(&self, f: impl FnOnce(&mut TaskRegistry) -> T) -> T {
        let mut registry = self.registry.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut registry)
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
