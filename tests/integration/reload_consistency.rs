//! Reload-after-mutation consistency against a shared server.
//!
//! The collection is never speculatively mutated: it only changes when
//! a fetch lands. These tests verify that successful mutations pick up
//! concurrent external writes through their follow-up reload, that
//! failed mutations leave the collection frozen, and that view state
//! (sort key) survives reloads.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::time::Duration;

use taskdeck::store::{HttpStore, RemoteStore, StoreError};
use taskdeck::tasks::{SortKey, TaskController};
use taskdeck_proto::task::{NewTask, TaskId, TaskPatch};

const NOTICE_TIMEOUT: Duration = Duration::from_secs(6);

async fn start_store() -> (String, tokio::task::JoinHandle<()>) {
    let (addr, handle) = taskdeck_server::http::start_server("127.0.0.1:0")
        .await
        .expect("failed to start task store server");
    (format!("http://{addr}"), handle)
}

async fn create_direct(url: &str, title: &str) -> Result<(), StoreError> {
    HttpStore::new(url, None)
        .create(&NewTask {
            title: title.to_string(),
            description: String::new(),
            pinned: false,
        })
        .await
        .map(|_| ())
}

#[tokio::test]
async fn successful_mutations_pull_in_external_writes() {
    let (url, _handle) = start_store().await;
    let mut controller = TaskController::new(HttpStore::new(url.as_str(), None), NOTICE_TIMEOUT);
    controller.load().await;

    // Someone else writes to the same store.
    create_direct(&url, "external").await.expect("create");
    assert!(controller.tasks().is_empty(), "no reload has happened yet");

    // Our own mutation reloads, so the external task becomes visible.
    assert!(controller.create("mine", "").await);
    let mut titles: Vec<_> = controller.tasks().iter().map(|t| t.title.clone()).collect();
    titles.sort();
    assert_eq!(titles, vec!["external", "mine"]);
}

#[tokio::test]
async fn failed_mutations_do_not_reload() {
    let (url, _handle) = start_store().await;
    let mut controller = TaskController::new(HttpStore::new(url.as_str(), None), NOTICE_TIMEOUT);
    controller.load().await;

    create_direct(&url, "invisible").await.expect("create");

    // The update fails (unknown id), so no follow-up reload runs and
    // the external write stays invisible.
    assert!(
        !controller
            .update(&TaskId::new(), &TaskPatch::set_status(true))
            .await
    );
    assert!(controller.tasks().is_empty());

    // An explicit reload picks it up.
    assert!(controller.load().await);
    assert_eq!(controller.tasks().len(), 1);
}

#[tokio::test]
async fn sort_key_and_view_survive_reloads() {
    let (url, _handle) = start_store().await;
    let mut controller = TaskController::new(HttpStore::new(url.as_str(), None), NOTICE_TIMEOUT);

    controller.set_sort_key(SortKey::Title);
    controller.create("zebra", "").await;
    controller.create("apple", "").await;

    assert_eq!(controller.sort_key(), SortKey::Title);
    let titles: Vec<_> = controller
        .visible_tasks()
        .iter()
        .map(|t| t.title.clone())
        .collect();
    assert_eq!(titles, vec!["apple", "zebra"]);

    // Another reload changes nothing the user can see.
    assert!(controller.load().await);
    let titles_after: Vec<_> = controller
        .visible_tasks()
        .iter()
        .map(|t| t.title.clone())
        .collect();
    assert_eq!(titles_after, titles);
}

#[tokio::test]
async fn every_reload_replaces_rather_than_merges() {
    let (url, _handle) = start_store().await;
    let direct = HttpStore::new(url.as_str(), None);
    let mut controller = TaskController::new(HttpStore::new(url.as_str(), None), NOTICE_TIMEOUT);

    controller.create("doomed", "").await;
    let id = controller.tasks()[0].id.clone();

    // The task disappears server-side behind the controller's back.
    direct.delete(&id).await.expect("delete");

    assert!(controller.load().await);
    assert!(
        controller.tasks().is_empty(),
        "a reload must drop tasks the server no longer has"
    );
}

#[tokio::test]
async fn concurrent_reloads_settle_on_the_latest_issued() {
    let (url, _handle) = start_store().await;
    let mut controller = TaskController::new(HttpStore::new(url.as_str(), None), NOTICE_TIMEOUT);

    // Serialized here (the controller needs &mut self), but each load
    // bumps the issue sequence; the final state must match the final
    // server state no matter how many loads ran.
    for i in 0..5 {
        create_direct(&url, &format!("task-{i}")).await.expect("create");
        assert!(controller.load().await);
    }
    assert_eq!(controller.tasks().len(), 5);
}
