//! End-to-end CRUD flow against an in-process task store server.
//!
//! Drives a `TaskController<HttpStore>` through the full lifecycle:
//! load, create, toggle, edit, pin, delete. Verifies the
//! mutate-then-reload contract: every successful mutation pushes a
//! notice and the collection always reflects the server's state.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::time::Duration;

use taskdeck::store::HttpStore;
use taskdeck::tasks::{EditDraft, Severity, SortKey, TaskController};
use taskdeck_proto::task::TaskPatch;

const NOTICE_TIMEOUT: Duration = Duration::from_secs(6);

/// Start the task store server in-process and return an http:// URL.
async fn start_store() -> (String, tokio::task::JoinHandle<()>) {
    let (addr, handle) = taskdeck_server::http::start_server("127.0.0.1:0")
        .await
        .expect("failed to start task store server");
    (format!("http://{addr}"), handle)
}

fn severity<S: taskdeck::store::RemoteStore>(controller: &TaskController<S>) -> Option<Severity> {
    controller.notice().map(|n| n.severity)
}

#[tokio::test]
async fn initial_load_of_an_empty_store() {
    let (url, _handle) = start_store().await;
    let mut controller = TaskController::new(HttpStore::new(url.as_str(), None), NOTICE_TIMEOUT);

    assert!(controller.load().await);
    assert!(controller.tasks().is_empty());
    assert!(controller.notice().is_none());
}

#[tokio::test]
async fn create_toggle_edit_pin_delete_round_trip() {
    let (url, _handle) = start_store().await;
    let mut controller = TaskController::new(HttpStore::new(url.as_str(), None), NOTICE_TIMEOUT);
    controller.load().await;

    // Create.
    assert!(controller.create("Write report", "quarterly numbers").await);
    assert_eq!(severity(&controller), Some(Severity::Success));
    assert_eq!(controller.tasks().len(), 1);
    let task = controller.tasks()[0].clone();
    assert_eq!(task.title, "Write report");
    assert_eq!(task.description, "quarterly numbers");
    assert!(!task.status);
    assert!(!task.pinned);
    assert!(task.created_at > 0);

    // Toggle completion.
    assert!(controller.update(&task.id, &TaskPatch::set_status(true)).await);
    assert!(controller.tasks()[0].status);

    // Edit through a draft (full-content patch).
    let mut draft = EditDraft::new(&controller.tasks()[0]);
    draft.title = "Write the report".to_string();
    draft.description = "final numbers".to_string();
    let patch = draft.commit().expect("draft should be valid");
    assert!(controller.update(&task.id, &patch).await);
    let edited = &controller.tasks()[0];
    assert_eq!(edited.title, "Write the report");
    assert_eq!(edited.description, "final numbers");
    // The edit's full-content patch carried the completed status.
    assert!(edited.status);

    // Pin.
    assert!(controller.update(&task.id, &TaskPatch::set_pinned(true)).await);
    assert!(controller.tasks()[0].pinned);

    // Identity is preserved across every mutation.
    assert_eq!(controller.tasks()[0].id, task.id);
    assert_eq!(controller.tasks()[0].created_at, task.created_at);

    // Delete.
    assert!(controller.remove(&task.id).await);
    assert!(controller.tasks().is_empty());
    assert_eq!(severity(&controller), Some(Severity::Success));
}

#[tokio::test]
async fn created_titles_are_trimmed_by_the_server() {
    let (url, _handle) = start_store().await;
    let mut controller = TaskController::new(HttpStore::new(url.as_str(), None), NOTICE_TIMEOUT);

    assert!(controller.create("  padded title  ", "").await);
    assert_eq!(controller.tasks()[0].title, "padded title");
}

#[tokio::test]
async fn pinned_tasks_lead_the_visible_sequence() {
    let (url, _handle) = start_store().await;
    let mut controller = TaskController::new(HttpStore::new(url.as_str(), None), NOTICE_TIMEOUT);

    controller.create("B", "").await;
    controller.create("A", "").await;
    let a_id = controller
        .tasks()
        .iter()
        .find(|t| t.title == "A")
        .unwrap()
        .id
        .clone();
    controller.update(&a_id, &TaskPatch::set_pinned(true)).await;

    controller.set_sort_key(SortKey::Title);
    let visible = controller.visible_tasks();
    let titles: Vec<_> = visible.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["A", "B"]);
    assert!(visible[0].pinned);

    // The canonical collection is untouched by the view ordering.
    assert_eq!(controller.tasks().len(), 2);
}

#[tokio::test]
async fn two_clients_converge_through_reloads() {
    let (url, _handle) = start_store().await;
    let mut alice = TaskController::new(HttpStore::new(url.as_str(), None), NOTICE_TIMEOUT);
    let mut bob = TaskController::new(HttpStore::new(url.as_str(), None), NOTICE_TIMEOUT);

    alice.create("shared task", "").await;
    assert!(bob.load().await);
    assert_eq!(bob.tasks().len(), 1);
    assert_eq!(bob.tasks()[0].title, "shared task");

    bob.remove(&bob.tasks()[0].id.clone()).await;
    assert!(alice.load().await);
    assert!(alice.tasks().is_empty());
}
