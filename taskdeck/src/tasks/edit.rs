//! Scoped, transient copy of a task under edit.
//!
//! The draft exists only while the edit dialog is open: committing
//! validates and yields a full-content patch for the controller's
//! `update`; cancelling is simply dropping the draft — no remote call,
//! no side effects.

use taskdeck_proto::task::{Task, TaskId, TaskPatch};

use super::TaskError;

/// Uncommitted copy of a task being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditDraft {
    /// Id of the task under edit (immutable).
    pub id: TaskId,
    /// Editable title.
    pub title: String,
    /// Editable description.
    pub description: String,
    /// Completion flag carried through the full-content patch.
    pub status: bool,
    /// Pinned flag carried through the full-content patch.
    pub pinned: bool,
}

impl EditDraft {
    /// Begins an edit by copying the task into a draft.
    #[must_use]
    pub fn new(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            description: task.description.clone(),
            status: task.status,
            pinned: task.pinned,
        }
    }

    /// Validates the draft and produces the full-content patch to send.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::TitleEmpty`] when the trimmed title is empty;
    /// the caller keeps the dialog open and no remote call is made.
    pub fn commit(&self) -> Result<TaskPatch, TaskError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(TaskError::TitleEmpty);
        }
        Ok(TaskPatch {
            title: Some(title.to_string()),
            description: Some(self.description.clone()),
            status: Some(self.status),
            pinned: Some(self.pinned),
        })
    }
}
