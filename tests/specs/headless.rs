//! Headless dispatch: events that arrive while no foreground listener is
//! attached

use crate::prelude::*;
use async_trait::async_trait;
use bgfetch_adapters::{FakePlatform, PlatformCall};
use bgfetch_core::{FetchEvent, TaskConfig, TaskId};
use bgfetch_engine::{HeadlessDispatcher, HeadlessTask};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::timeout;

/// Handler that forwards every event to the test, which plays the role of
/// the application work and calls finish itself
struct ForwardingHandler {
    tx: mpsc::UnboundedSender<FetchEvent>,
}

#[async_trait]
impl HeadlessTask for ForwardingHandler {
    async fn on_fetch(&self, event: FetchEvent) {
        let _ = self.tx.send(event);
    }
}

fn headless_config(id: &str) -> TaskConfig {
    TaskConfig::builder(id)
        .delay(Duration::from_millis(5000))
        .enable_headless(true)
        .build()
        .unwrap()
}

#[tokio::test]
async fn headless_event_reaches_the_handler_and_awaits_finish() {
    let platform = FakePlatform::new();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let dispatcher = HeadlessDispatcher::new(Arc::new(ForwardingHandler { tx }));
    let mgr = manager(&platform).with_headless(dispatcher);
    let id = TaskId::from("custom-1");

    // No configure: the process is running headlessly
    mgr.schedule_task(headless_config("custom-1")).await.unwrap();
    mgr.on_invoke(&id, false).await;

    let event = timeout(Duration::from_secs(5), rx.recv())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(event, FetchEvent::new("custom-1", false));

    // The handler owns the completion signal; until it finishes, the run
    // stays live
    assert!(mgr.is_running(&id));
    mgr.finish(&id).await;
    assert_eq!(mgr.active_runs(), 0);
}

#[tokio::test]
async fn headless_timeout_is_finished_without_invoking_the_handler() {
    let platform = FakePlatform::new();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let dispatcher = HeadlessDispatcher::new(Arc::new(ForwardingHandler { tx }));
    let mgr = manager(&platform).with_headless(dispatcher);
    let id = TaskId::from("custom-1");

    mgr.schedule_task(headless_config("custom-1")).await.unwrap();
    mgr.on_invoke(&id, true).await;

    // Finished immediately, handler never saw the event
    assert_eq!(mgr.active_runs(), 0);
    assert!(platform.calls().contains(&PlatformCall::TaskCompleted {
        task_id: id
    }));
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn task_without_headless_opt_in_is_finished_immediately() {
    let platform = FakePlatform::new();
    let (tx, mut rx) = mpsc::unbounded_channel();
    let dispatcher = HeadlessDispatcher::new(Arc::new(ForwardingHandler { tx }));
    let mgr = manager(&platform).with_headless(dispatcher);
    let id = TaskId::from("custom-1");

    // enable_headless not set: the event has no valid receiver
    mgr.schedule_task(one_shot("custom-1", 5000)).await.unwrap();
    mgr.on_invoke(&id, false).await;

    assert_eq!(mgr.active_runs(), 0);
    assert!(rx.try_recv().is_err());
}
