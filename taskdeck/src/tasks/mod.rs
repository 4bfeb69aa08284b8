//! Task collection core: controller, ordering, notifications, edit drafts.
//!
//! The controller owns the canonical in-memory task list and reconciles
//! it with the remote store; ordering derives the visible sequence;
//! the notifier reports every operation outcome through a single
//! transient slot.

pub mod controller;
pub mod edit;
pub mod notify;
pub mod ordering;

pub use controller::TaskController;
pub use edit::EditDraft;
pub use notify::{Notice, Notifier, Severity};
pub use ordering::{SortKey, order_tasks};

use thiserror::Error;

/// Errors that can occur during task operations.
///
/// Validation errors are caught client-side and never reach the remote
/// store; store failures are wrapped so the controller can convert any
/// outcome into a single notification.
#[derive(Debug, Error)]
pub enum TaskError {
    /// Task title cannot be empty.
    #[error("task title cannot be empty")]
    TitleEmpty,
    /// A remote store call failed.
    #[error(transparent)]
    Store(#[from] crate::store::StoreError),
}
