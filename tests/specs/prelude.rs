//! Shared helpers for behavioral specs

use bgfetch_adapters::{FakePlatform, MemoryRecorder};
use bgfetch_core::{FakeClock, FetchEvent, TaskConfig};
use bgfetch_engine::{FetchCallback, FetchManager};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub type SpecManager = FetchManager<FakePlatform, MemoryRecorder, FakeClock>;

pub fn manager(platform: &FakePlatform) -> SpecManager {
    FetchManager::new(platform.clone(), MemoryRecorder::new(), FakeClock::new())
}

/// The configure-time configuration from the common scenario:
/// a 15-minute interval that stops when the user terminates the app
pub fn fetch_config() -> TaskConfig {
    TaskConfig::builder("app-supplied-id")
        .minimum_fetch_interval(Duration::from_secs(15 * 60))
        .stop_on_terminate(true)
        .build()
        .unwrap()
}

/// An ad-hoc one-shot task
pub fn one_shot(id: &str, delay_ms: u64) -> TaskConfig {
    TaskConfig::builder(id)
        .delay(Duration::from_millis(delay_ms))
        .build()
        .unwrap()
}

/// Listener that records which operation fired with which event
#[derive(Clone, Default)]
pub struct Captured {
    events: Arc<Mutex<Vec<(&'static str, FetchEvent)>>>,
}

impl Captured {
    pub fn callback(&self) -> FetchCallback {
        let fetches = Arc::clone(&self.events);
        let timeouts = Arc::clone(&self.events);
        FetchCallback::new(
            move |event| fetches.lock().unwrap().push(("fetch", event)),
            move |event| timeouts.lock().unwrap().push(("timeout", event)),
        )
    }

    pub fn events(&self) -> Vec<(&'static str, FetchEvent)> {
        self.events.lock().unwrap().clone()
    }
}
