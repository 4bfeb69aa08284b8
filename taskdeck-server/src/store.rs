//! In-memory task table backing the HTTP endpoints.
//!
//! Tasks are kept in insertion order; the server assigns ids (UUID v7)
//! and creation timestamps. Thread-safe via [`parking_lot::RwLock`] so
//! concurrent handlers never observe a partially applied mutation.

use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::RwLock;
use taskdeck_proto::task::{NewTask, Task, TaskId, TaskPatch};
use thiserror::Error;

/// Errors produced by task table operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TableError {
    /// No task with the given id exists.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// The request carried a blank title.
    #[error("task title must not be empty")]
    BlankTitle,
}

/// In-memory task table with server-side id and timestamp assignment.
#[derive(Debug, Default)]
pub struct TaskTable {
    tasks: RwLock<Vec<Task>>,
}

impl TaskTable {
    /// Creates an empty task table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current timestamp in milliseconds since epoch.
    fn now_ms() -> u64 {
        u64::try_from(
            SystemTime::now()
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_millis(),
        )
        .unwrap_or(u64::MAX)
    }

    /// Returns all tasks in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<Task> {
        self.tasks.read().clone()
    }

    /// Inserts a new task, assigning its id and creation time.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::BlankTitle`] if the trimmed title is empty.
    pub fn create(&self, new: &NewTask) -> Result<Task, TableError> {
        let title = new.title.trim();
        if title.is_empty() {
            return Err(TableError::BlankTitle);
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

    /// Applies a partial update to the task with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::NotFound`] if the id is unknown, or
    /// [`TableError::BlankTitle`] if the patch carries a blank title.
    pub fn update(&self, id: &TaskId, patch: &TaskPatch) -> Result<Task, TableError> {
        if let Some(title) = &patch.title
            && title.trim().is_empty()
        {
            return Err(TableError::BlankTitle);
        }

        let mut tasks = self.tasks.write();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == *id)
            .ok_or_else(|| TableError::NotFound(id.clone()))?;
        patch.apply_to(task);
        if let Some(title) = &patch.title {
            // Persist the trimmed form, same as create.
            task.title = title.trim().to_string();
        }
        Ok(task.clone())
    }

    /// Removes the task with the given id.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::NotFound`] if the id is unknown.
    pub fn delete(&self, id: &TaskId) -> Result<(), TableError> {
        let mut tasks = self.tasks.write();
        let before = tasks.len();
        tasks.retain(|t| t.id != *id);
        if tasks.len() == before {
            return Err(TableError::NotFound(id.clone()));
        }
        Ok(())
    }
}
