//! Configure/start/stop/finish lifecycle of the default fetch task

use crate::prelude::*;
use bgfetch_adapters::{FakePlatform, PlatformCall};
use bgfetch_core::{AvailabilityStatus, FetchEvent, TaskId};
use bgfetch_engine::FETCH_TASK_ID;

#[tokio::test]
async fn configure_invoke_finish_round_trip() {
    let platform = FakePlatform::new();
    let mgr = manager(&platform);
    let captured = Captured::default();
    let id = TaskId::from(FETCH_TASK_ID);

    // configure registers the reserved task and activates delivery
    let status = mgr.configure(fetch_config(), captured.callback()).await.unwrap();
    assert_eq!(status, AvailabilityStatus::Available);
    assert_eq!(mgr.status().await, AvailabilityStatus::Available);

    // a simulated wake delivers a fetch event for the reserved id
    mgr.on_invoke(&id, false).await;
    assert_eq!(
        captured.events(),
        vec![("fetch", FetchEvent::new(FETCH_TASK_ID, false))]
    );
    assert!(mgr.is_running(&id));

    // finish clears the registry entry and tells the platform
    mgr.finish(&id).await;
    assert_eq!(mgr.active_runs(), 0);
    assert!(platform
        .calls()
        .contains(&PlatformCall::TaskCompleted { task_id: id }));
}

#[tokio::test]
async fn status_is_consistent_with_the_platform_report() {
    for reported in [
        AvailabilityStatus::Restricted,
        AvailabilityStatus::Denied,
        AvailabilityStatus::Available,
    ] {
        let platform = FakePlatform::new();
        platform.set_availability(reported);
        let mgr = manager(&platform);

        let configured = mgr
            .configure(fetch_config(), Captured::default().callback())
            .await
            .unwrap();

        assert_eq!(configured, reported);
        assert_eq!(mgr.status().await, reported);
    }
}

#[tokio::test]
async fn finish_never_fails_however_often_it_is_called() {
    let platform = FakePlatform::new();
    let mgr = manager(&platform);
    let captured = Captured::default();
    let id = TaskId::from(FETCH_TASK_ID);

    mgr.configure(fetch_config(), captured.callback()).await.unwrap();
    mgr.on_invoke(&id, false).await;

    mgr.finish(&id).await;
    mgr.finish(&id).await;
    mgr.finish(&TaskId::from("no-such-task")).await;

    assert_eq!(mgr.active_runs(), 0);
}

#[tokio::test]
async fn stop_without_an_id_stops_the_default_fetch_task() {
    let platform = FakePlatform::new();
    let mgr = manager(&platform);
    let id = TaskId::from(FETCH_TASK_ID);

    mgr.configure(fetch_config(), Captured::default().callback())
        .await
        .unwrap();
    mgr.stop(None).await.unwrap();

    assert!(!platform.is_registered(&id));

    // start without an id re-arms it
    mgr.start(None).await.unwrap();
    assert!(platform.is_registered(&id));
}
