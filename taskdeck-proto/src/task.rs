//! Task record and request body types for the remote store API.
//!
//! All types serialize as camelCase JSON, matching the HTTP contract:
//! `GET/POST /tasks`, `PATCH/DELETE /tasks/{id}`. The server assigns
//! `id` and `createdAt` at creation time; both are immutable afterwards.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a task, based on UUID v7 for time-ordering.
///
/// Assigned by the remote store at creation; clients never mint task ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(Uuid);

impl TaskId {
    /// Creates a new time-ordered task identifier (UUID v7).
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Creates a `TaskId` from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the inner UUID value.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TaskId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A persisted task record as returned by the remote store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task identifier (UUID v7, server-assigned).
    pub id: TaskId,
    /// Task title. Never empty once persisted.
    pub title: String,
    /// Free-text description. May be empty.
    #[serde(default)]
    pub description: String,
    /// Completion flag. `false` = incomplete.
    #[serde(default)]
    pub status: bool,
    /// Pinned tasks always sort ahead of unpinned ones.
    #[serde(default)]
    pub pinned: bool,
    /// Creation time in milliseconds since epoch (server-assigned).
    pub created_at: u64,
}

/// Request body for `POST /tasks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    /// Task title. Must be non-blank; the server rejects blank titles.
    pub title: String,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Whether the task starts out pinned.
    #[serde(default)]
    pub pinned: bool,
}

/// Partial update body for `PATCH /tasks/{id}`.
///
/// Absent fields are omitted from the JSON entirely and left unchanged
/// by the server. A present-but-blank title is a validation error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskPatch {
    /// New title, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New completion flag, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
    /// New pinned flag, if changing.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pinned: Option<bool>,
}

impl TaskPatch {
    /// A patch that only flips the completion flag.
    #[must_use]
    pub fn set_status(status: bool) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// A patch that only flips the pinned flag.
    #[must_use]
    pub fn set_pinned(pinned: bool) -> Self {
        Self {
            pinned: Some(pinned),
            ..Self::default()
        }
    }

    /// Returns `true` if the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.pinned.is_none()
    }

    /// Applies the patch to a task in place.
    ///
    /// `id` and `created_at` are immutable and never touched.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            task.description.clone_from(description);
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(pinned) = self.pinned {
            task.pinned = pinned;
        }
    }
}
