//! Server-side rejection paths: bearer auth, validation, unknown ids.
//!
//! Exercises the raw `HttpStore` for exact status codes, and the
//! controller for the user-visible consequence: an error notice and an
//! unchanged collection.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::sync::Arc;
use std::time::Duration;

use taskdeck::store::{HttpStore, RemoteStore, StoreError};
use taskdeck::tasks::{Severity, TaskController};
use taskdeck_proto::task::{NewTask, TaskId, TaskPatch};
use taskdeck_server::http::{ServerState, start_server_with_state};

const NOTICE_TIMEOUT: Duration = Duration::from_secs(6);

/// Start a server requiring the given bearer token (or none).
async fn start_store(token: Option<&str>) -> (String, tokio::task::JoinHandle<()>) {
    let state = Arc::new(ServerState::with_auth(token.map(String::from)));
    let (addr, handle) = start_server_with_state("127.0.0.1:0", state)
        .await
        .expect("failed to start task store server");
    (format!("http://{addr}"), handle)
}

fn new_task(title: &str) -> NewTask {
    NewTask {
        title: title.to_string(),
        description: String::new(),
        pinned: false,
    }
}

#[tokio::test]
async fn requests_without_the_token_are_unauthorized() {
    let (url, _handle) = start_store(Some("s3cret")).await;
    let store = HttpStore::new(url.as_str(), None);

    match store.list().await {
        Err(StoreError::Rejected { status, .. }) => assert_eq!(status, 401),
        other => panic!("expected 401 rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn a_wrong_token_is_also_unauthorized() {
    let (url, _handle) = start_store(Some("s3cret")).await;
    let store = HttpStore::new(url.as_str(), Some("nope".to_string()));

    match store.create(&new_task("x")).await {
        Err(StoreError::Rejected { status, .. }) => assert_eq!(status, 401),
        other => panic!("expected 401 rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn the_right_token_grants_full_access() {
    let (url, _handle) = start_store(Some("s3cret")).await;
    let store = HttpStore::new(url.as_str(), Some("s3cret".to_string()));

    let task = store.create(&new_task("secured")).await.expect("create");
    let listed = store.list().await.expect("list");
    assert_eq!(listed.len(), 1);
    store.delete(&task.id).await.expect("delete");
    assert!(store.list().await.expect("list").is_empty());
}

#[tokio::test]
async fn blank_titles_are_rejected_with_422() {
    let (url, _handle) = start_store(None).await;
    let store = HttpStore::new(url.as_str(), None);

    match store.create(&new_task("   ")).await {
        Err(StoreError::Rejected { status, message }) => {
            assert_eq!(status, 422);
            assert!(!message.is_empty());
        }
        other => panic!("expected 422 rejection, got {other:?}"),
    }
    assert!(store.list().await.expect("list").is_empty());
}

#[tokio::test]
async fn unknown_ids_are_rejected_with_404() {
    let (url, _handle) = start_store(None).await;
    let store = HttpStore::new(url.as_str(), None);
    let unknown = TaskId::new();

    match store.update(&unknown, &TaskPatch::set_status(true)).await {
        Err(StoreError::Rejected { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected 404 rejection, got {other:?}"),
    }
    match store.delete(&unknown).await {
        Err(StoreError::Rejected { status, .. }) => assert_eq!(status, 404),
        other => panic!("expected 404 rejection, got {other:?}"),
    }
}

#[tokio::test]
async fn controller_surfaces_rejections_as_error_notices() {
    let (url, _handle) = start_store(None).await;
    let mut controller = TaskController::new(HttpStore::new(url.as_str(), None), NOTICE_TIMEOUT);

    controller.create("keep me", "").await;
    let before = controller.tasks().to_vec();

    // Remote failure: unknown id.
    assert!(
        !controller
            .update(&TaskId::new(), &TaskPatch::set_status(true))
            .await
    );
    assert_eq!(
        controller.notice().map(|n| n.severity),
        Some(Severity::Error)
    );
    assert_eq!(controller.tasks(), &before[..]);

    // Failed delete leaves the collection alone too.
    assert!(!controller.remove(&TaskId::new()).await);
    assert_eq!(controller.tasks(), &before[..]);
}

#[tokio::test]
async fn controller_reports_unreachable_servers() {
    // Nothing listens here.
    let mut controller = TaskController::new(
        HttpStore::new("http://127.0.0.1:1", None),
        NOTICE_TIMEOUT,
    );

    assert!(!controller.load().await);
    let notice = controller.notice().expect("an error notice");
    assert_eq!(notice.severity, Severity::Error);
    assert!(notice.message.starts_with("Could not load tasks"));
}
