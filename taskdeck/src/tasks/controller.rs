//! Task store controller: owns the canonical in-memory collection.
//!
//! Every mutation goes to the remote store first; the local collection
//! is never speculatively mutated. On success the controller pushes a
//! success notice and refetches the whole collection; on failure it
//! pushes an error notice and leaves everything as it was. The source
//! of truth is always the most recent fetch.
//!
//! Fetches are tagged with a monotonically increasing sequence number
//! at issue time, and a result is applied only if its sequence exceeds
//! the highest applied so far. With overlapping in-flight reloads this
//! turns "last-resolved-wins" into "latest-issued-wins"; stale results
//! are discarded and logged.

use std::time::Instant;

use taskdeck_proto::task::{NewTask, Task, TaskId, TaskPatch};

use crate::store::RemoteStore;

use super::notify::{Notice, Notifier, Severity};
use super::ordering::{SortKey, order_tasks};

/// Owns the task collection and reconciles it with a remote store.
pub struct TaskController<S> {
    store: S,
    tasks: Vec<Task>,
    sort_key: SortKey,
    notifier: Notifier,
    loading: bool,
    issued_seq: u64,
    applied_seq: u64,
}

impl<S: RemoteStore> TaskController<S> {
    /// Creates a controller with an empty collection.
    pub fn new(store: S, notice_timeout: std::time::Duration) -> Self {
        Self {
            store,
            tasks: Vec::new(),
            sort_key: SortKey::default(),
            notifier: Notifier::new(notice_timeout),
            loading: false,
            issued_seq: 0,
            applied_seq: 0,
        }
    }

    /// The canonical collection, in store order.
    #[must_use]
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// The visible sequence: pinned-first, sorted by the active key.
    #[must_use]
    pub fn visible_tasks(&self) -> Vec<Task> {
        order_tasks(&self.tasks, self.sort_key)
    }

    /// The active sort key.
    #[must_use]
    pub const fn sort_key(&self) -> SortKey {
        self.sort_key
    }

    /// Sets the active sort key; the visible sequence is re-derived on
    /// the next [`Self::visible_tasks`] call.
    pub const fn set_sort_key(&mut self, key: SortKey) {
        self.sort_key = key;
    }

    /// Whether a fetch is currently in flight.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// The currently visible notice, if any.
    #[must_use]
    pub fn notice(&self) -> Option<&Notice> {
        self.notifier.current()
    }

    /// Explicitly dismisses the current notice.
    pub fn dismiss_notice(&mut self) {
        self.notifier.dismiss();
    }

    /// Expires the current notice if its deadline has passed. Returns
    /// `true` when a notice was dismissed by this call.
    pub fn tick(&mut self, now: Instant) -> bool {
        self.notifier.expire_due(now)
    }

    /// Fetches the full collection and replaces the local one.
    ///
    /// On failure the previous collection is left intact and an error
    /// notice is pushed; there is no retry. Success is silent so a
    /// preceding mutation's notice stays visible. Returns whether the
    /// fetch result was applied.
    pub async fn load(&mut self) -> bool {
        self.issued_seq += 1;
        let seq = self.issued_seq;
        self.loading = true;
        let result = self.store.list().await;
        self.loading = false;
        match result {
            Ok(tasks) => self.apply_fetch(seq, tasks),
            Err(e) => {
                tracing::warn!(error = %e, "task reload failed");
                self.push_error(format!("Could not load tasks: {e}"));
                false
            }
        }
    }

    /// Creates a task from the input draft content.
    ///
    /// A blank title fails fast with a validation notice and never
    /// reaches the store. On success the collection is reloaded; the
    /// caller clears its input draft. On remote failure the caller's
    /// draft stays untouched so the user can retry. Returns whether the
    /// task was created.
    pub async fn create(&mut self, title: &str, description: &str) -> bool {
        let title = title.trim();
        if title.is_empty() {
            self.push_error("Task title is required");
            return false;
        }
        let new = NewTask {
            title: title.to_string(),
            description: description.to_string(),
            pinned: false,
        };
        match self.store.create(&new).await {
            Ok(task) => {
                tracing::debug!(id = %task.id, "task created");
                self.push_success("Task created");
                self.load().await;
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "task create failed");
                self.push_error(format!("Could not create task: {e}"));
                false
            }
        }
    }

    /// Applies a partial change (status toggle, pin toggle, edit-save)
    /// against the remote store.
    ///
    /// A patch carrying a blank title fails fast with a validation
    /// notice and never reaches the store. The local collection is not
    /// speculatively mutated: the UI reflects old state until the
    /// follow-up reload succeeds, or stays unchanged on failure.
    /// Returns whether the update was applied remotely.
    pub async fn update(&mut self, id: &TaskId, patch: &TaskPatch) -> bool {
        if let Some(title) = &patch.title
            && title.trim().is_empty()
        {
            self.push_error("Task title is required");
            return false;
        }
        match self.store.update(id, patch).await {
            Ok(task) => {
                tracing::debug!(id = %task.id, "task updated");
                self.push_success("Task updated");
                self.load().await;
                true
            }
            Err(e) => {
                tracing::warn!(id = %id, error = %e, "task update failed");
                self.push_error(format!("Could not update task: {e}"));
                false
            }
        }
    }

    /// Deletes a task by id; same notice-and-reload pattern as update.
    /// Returns whether the task was deleted remotely.
    pub async fn remove(&mut self, id: &TaskId) -> bool {
        match self.store.delete(id).await {
            Ok(()) => {
                tracing::debug!(id = %id, "task deleted");
                self.push_success("Task deleted");
                self.load().await;
                true
            }
            Err(e) => {
                tracing::warn!(id = %id, error = %e, "task delete failed");
                self.push_error(format!("Could not delete task: {e}"));
                false
            }
        }
    }

    /// Replaces the collection if the fetch is the newest applied so far.
    fn apply_fetch(&mut self, seq: u64, tasks: Vec<Task>) -> bool {
        if seq <= self.applied_seq {
            tracing::debug!(seq, applied = self.applied_seq, "discarding stale fetch");
            return false;
        }
        self.applied_seq = seq;
        self.tasks = tasks;
        true
    }

    fn push_success(&mut self, message: impl Into<String>) {
        self.notifier.push(message, Severity::Success, Instant::now());
    }

    fn push_error(&mut self, message: impl Into<String>) {
        self.notifier.push(message, Severity::Error, Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::store::MemoryStore;

    const TIMEOUT: Duration = Duration::from_secs(6);

    fn make_controller() -> (TaskController<MemoryStore>, MemoryStore) {
        let store = MemoryStore::new();
        (TaskController::new(store.clone(), TIMEOUT), store)
    }

    fn severity(controller: &TaskController<MemoryStore>) -> Option<Severity> {
        controller.notice().map(|n| n.severity)
    }

    #[tokio::test]
    async fn load_replaces_collection() {
        let (mut controller, store) = make_controller();
        store
            .create(&NewTask {
                title: "seeded".to_string(),
                description: String::new(),
                pinned: false,
            })
            .await
            .unwrap();

        assert!(controller.load().await);
        assert_eq!(controller.tasks().len(), 1);
        assert_eq!(controller.tasks()[0].title, "seeded");
        // A successful load is silent.
        assert!(controller.notice().is_none());
    }

    #[tokio::test]
    async fn failed_load_keeps_previous_collection() {
        let (mut controller, store) = make_controller();
        controller.create("survivor", "").await;
        assert_eq!(controller.tasks().len(), 1);

        store.set_failing(true);
        assert!(!controller.load().await);
        assert_eq!(controller.tasks().len(), 1);
        assert_eq!(controller.tasks()[0].title, "survivor");
        assert_eq!(severity(&controller), Some(Severity::Error));
    }

    #[tokio::test]
    async fn create_blank_title_never_calls_the_store() {
        let (mut controller, store) = make_controller();
        assert!(!controller.create("", "some description").await);
        assert_eq!(store.call_count(), 0);
        assert_eq!(severity(&controller), Some(Severity::Error));
    }

    #[tokio::test]
    async fn create_whitespace_title_never_calls_the_store() {
        let (mut controller, store) = make_controller();
        assert!(!controller.create("   ", "x").await);
        assert_eq!(store.call_count(), 0);
        assert_eq!(severity(&controller), Some(Severity::Error));
    }

    #[tokio::test]
    async fn create_success_notifies_and_reloads() {
        let (mut controller, store) = make_controller();
        assert!(controller.create("  Buy milk  ", "2 liters").await);
        // create + the follow-up list.
        assert_eq!(store.call_count(), 2);
        assert_eq!(controller.tasks().len(), 1);
        assert_eq!(controller.tasks()[0].title, "Buy milk");
        assert_eq!(severity(&controller), Some(Severity::Success));
    }

    #[tokio::test]
    async fn create_remote_failure_is_an_error_notice() {
        let (mut controller, store) = make_controller();
        store.set_failing(true);
        assert!(!controller.create("valid title", "").await);
        assert_eq!(severity(&controller), Some(Severity::Error));
        assert!(controller.tasks().is_empty());
    }

    #[tokio::test]
    async fn update_success_notifies_then_reloads() {
        let (mut controller, _store) = make_controller();
        controller.create("toggle me", "").await;
        let id = controller.tasks()[0].id.clone();

        assert!(controller.update(&id, &TaskPatch::set_status(true)).await);
        assert_eq!(severity(&controller), Some(Severity::Success));
        // The new state is visible only through the reload.
        assert!(controller.tasks()[0].status);
    }

    #[tokio::test]
    async fn failed_update_leaves_collection_unchanged() {
        let (mut controller, _store) = make_controller();
        controller.create("stable", "").await;
        let before = controller.tasks().to_vec();

        let unknown = TaskId::new();
        assert!(
            !controller
                .update(&unknown, &TaskPatch::set_status(true))
                .await
        );
        assert_eq!(controller.tasks(), &before[..]);
        assert_eq!(severity(&controller), Some(Severity::Error));
    }

    #[tokio::test]
    async fn update_blank_title_patch_never_calls_the_store() {
        let (mut controller, store) = make_controller();
        controller.create("keep", "").await;
        let id = controller.tasks()[0].id.clone();
        let calls_before = store.call_count();

        let patch = TaskPatch {
            title: Some("   ".to_string()),
            ..TaskPatch::default()
        };
        assert!(!controller.update(&id, &patch).await);
        assert_eq!(store.call_count(), calls_before);
        assert_eq!(severity(&controller), Some(Severity::Error));
        assert_eq!(controller.tasks()[0].title, "keep");
    }

    #[tokio::test]
    async fn remove_success_notifies_and_reloads() {
        let (mut controller, _store) = make_controller();
        controller.create("doomed", "").await;
        let id = controller.tasks()[0].id.clone();

        assert!(controller.remove(&id).await);
        assert!(controller.tasks().is_empty());
        assert_eq!(severity(&controller), Some(Severity::Success));
    }

    #[tokio::test]
    async fn remove_unknown_id_is_an_error_notice() {
        let (mut controller, _store) = make_controller();
        assert!(!controller.remove(&TaskId::new()).await);
        assert_eq!(severity(&controller), Some(Severity::Error));
    }

    #[tokio::test]
    async fn stale_fetch_results_are_discarded() {
        let (mut controller, store) = make_controller();
        controller.create("current", "").await;
        let current = controller.tasks().to_vec();

        // A fetch issued earlier (lower seq) resolving after a newer one
        // must not clobber the collection.
        let stale_seq = controller.applied_seq - 1;
        let applied = controller.apply_fetch(stale_seq, Vec::new());
        assert!(!applied);
        assert_eq!(controller.tasks(), &current[..]);

        // A genuinely newer fetch still applies.
        let newer = store.snapshot();
        assert!(controller.apply_fetch(controller.applied_seq + 1, newer));
    }

    #[tokio::test]
    async fn visible_tasks_follow_the_sort_key() {
        let (mut controller, store) = make_controller();
        controller.create("B", "").await;
        controller.create("A", "").await;
        let pinned_id = store.snapshot()[1].id.clone();
        controller
            .update(&pinned_id, &TaskPatch::set_pinned(true))
            .await;

        controller.set_sort_key(SortKey::Title);
        let visible = controller.visible_tasks();
        let titles: Vec<_> = visible.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
        assert!(visible[0].pinned);
    }

    #[tokio::test]
    async fn sort_key_survives_reloads() {
        let (mut controller, _store) = make_controller();
        controller.set_sort_key(SortKey::Date);
        controller.create("a task", "").await;
        assert_eq!(controller.sort_key(), SortKey::Date);
    }

    #[tokio::test]
    async fn dismiss_and_tick_clear_notices() {
        let (mut controller, _store) = make_controller();
        controller.create("", "").await;
        assert!(controller.notice().is_some());
        controller.dismiss_notice();
        assert!(controller.notice().is_none());

        controller.create("", "").await;
        assert!(controller.tick(Instant::now() + TIMEOUT));
        assert!(controller.notice().is_none());
    }
}
