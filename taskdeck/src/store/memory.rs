//! In-memory implementation of [`RemoteStore`].
//!
//! Backs the offline demo mode and the controller's unit tests. Shares
//! the server's semantics: ids and timestamps are assigned here, blank
//! titles are rejected, unknown ids answer "not found". Handles are
//! cheap clones over shared state, so a test can keep one handle to
//! inspect or fail the store while the controller owns another.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use parking_lot::RwLock;
use taskdeck_proto::task::{NewTask, Task, TaskId, TaskPatch};

use super::{RemoteStore, StoreError};

/// In-memory remote store with failure injection for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tasks: Arc<RwLock<Vec<Task>>>,
    calls: Arc<AtomicUsize>,
    failing: Arc<AtomicBool>,
}

impl MemoryStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with a few demo tasks, for running
    /// the TUI without a server.
    #[must_use]
    pub fn with_demo_tasks() -> Self {
        let store = Self::new();
        let now = Self::now_ms();
        let demo = [
            ("Review the quarterly report", "Due Friday", true, false),
            ("Book dentist appointment", "", false, false),
            ("Reply to Sam's email", "About the offsite", false, true),
        ];
        let mut tasks = store.tasks.write();
        for (i, (title, description, pinned, status)) in demo.into_iter().enumerate() {
            tasks.push(Task {
                id: TaskId::new(),
                title: title.to_string(),
                description: description.to_string(),
                status,
                pinned,
                created_at: now.saturating_sub((demo.len() - i) as u64 * 60_000),
            });
        }
        drop(tasks);
        store
    }

    fn now_ms() -> u64 {
        u64::try_from(
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_millis(),
        )
        .unwrap_or(u64::MAX)
    }

    /// Makes every subsequent call fail with a transport error (or stop
    /// failing when `failing` is false).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of store calls observed so far, including failed ones.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Snapshot of the stored tasks, in insertion order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.read().clone()
    }

    fn record_call(&self) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Transport("injected failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        self.record_call()?;
        Ok(self.tasks.read().clone())
    }

    async fn create(&self, new: &NewTask) -> Result<Task, StoreError> {
        self.record_call()?;
        let title = new.title.trim();
        if title.is_empty() {
            return Err(StoreError::Rejected {
                status: 422,
                message: "task title must not be empty".to_string(),
            });
        }
        let task = Task {
            id: TaskId::new(),
            title: title.to_string(),
            description: new.description.clone(),
            status: false,
            pinned: new.pinned,
            created_at: Self::now_ms(),
        };
        self.tasks.write().push(task.clone());
        Ok(task)
    }

    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> Result<Task, StoreError> {
        self.record_call()?;
        if let Some(title) = &patch.title
            && title.trim().is_empty()
        {
            return Err(StoreError::Rejected {
                status: 422,
                message: "task title must not be empty".to_string(),
            });
        }
        let mut tasks = self.tasks.write();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == *id)
            .ok_or_else(|| StoreError::Rejected {
                status: 404,
                message: format!("task not found: {id}"),
            })?;
        patch.apply_to(task);
        if patch.title.is_some() {
            // Titles are persisted trimmed, like the server does.
            task.title = task.title.trim().to_string();
        }
        Ok(task.clone())
    }

    async fn delete(&self, id: &TaskId) -> Result<(), StoreError> {
        self.record_call()?;
        let mut tasks = self.tasks.write();
        let before = tasks.len();
        tasks.retain(|t| t.id != *id);
        if tasks.len() == before {
            return Err(StoreError::Rejected {
                status: 404,
                message: format!("task not found: {id}"),
            });
        }
        Ok(())
    }
}
