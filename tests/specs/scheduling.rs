//! Ad-hoc scheduled tasks alongside the default fetch task

use crate::prelude::*;
use bgfetch_adapters::FakePlatform;
use bgfetch_core::{FetchEvent, TaskId};

#[tokio::test]
async fn scheduled_task_timeout_fires_only_the_timeout_path() {
    let platform = FakePlatform::new();
    let mgr = manager(&platform);
    let captured = Captured::default();
    let id = TaskId::from("custom-1");

    mgr.configure(fetch_config(), captured.callback()).await.unwrap();
    mgr.schedule_task(one_shot("custom-1", 5000)).await.unwrap();

    mgr.on_invoke(&id, true).await;

    // The timeout operation fired with the flag set; the normal-fetch
    // path saw nothing
    assert_eq!(
        captured.events(),
        vec![("timeout", FetchEvent::new("custom-1", true))]
    );

    mgr.finish(&id).await;
    assert_eq!(mgr.active_runs(), 0);
}

#[tokio::test]
async fn rescheduling_a_live_task_takes_effect_after_finish() {
    let platform = FakePlatform::new();
    let mgr = manager(&platform);
    let captured = Captured::default();
    let id = TaskId::from("custom-1");

    mgr.configure(fetch_config(), captured.callback()).await.unwrap();
    let first = one_shot("custom-1", 5000);
    mgr.schedule_task(first.clone()).await.unwrap();
    mgr.on_invoke(&id, false).await;

    // Second registration for the same id while the run is in flight
    let second = one_shot("custom-1", 250);
    mgr.schedule_task(second.clone()).await.unwrap();

    // The first run completes undisturbed and the registry shows one entry
    assert_eq!(mgr.active_runs(), 1);
    assert_eq!(platform.registered_config(&id), Some(first));

    mgr.finish(&id).await;

    // Only now does the second registration take effect
    assert_eq!(platform.registered_config(&id), Some(second));
    assert_eq!(mgr.active_runs(), 0);
}

#[tokio::test]
async fn fetch_and_scheduled_tasks_run_concurrently() {
    let platform = FakePlatform::new();
    let mgr = manager(&platform);
    let captured = Captured::default();
    let fetch_id = TaskId::from(bgfetch_engine::FETCH_TASK_ID);
    let custom_id = TaskId::from("custom-1");

    mgr.configure(fetch_config(), captured.callback()).await.unwrap();
    mgr.schedule_task(one_shot("custom-1", 5000)).await.unwrap();

    mgr.on_invoke(&fetch_id, false).await;
    mgr.on_invoke(&custom_id, false).await;
    assert_eq!(mgr.active_runs(), 2);

    // Finishing one id leaves the other run untouched
    mgr.finish(&custom_id).await;
    assert!(mgr.is_running(&fetch_id));
    assert!(!mgr.is_running(&custom_id));

    mgr.finish(&fetch_id).await;
    assert_eq!(mgr.active_runs(), 0);
}
