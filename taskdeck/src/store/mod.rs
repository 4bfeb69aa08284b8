//! Remote task store abstraction.
//!
//! The controller talks to the store through the [`RemoteStore`] trait so
//! that production code uses the HTTP implementation while tests and the
//! offline demo mode use the in-memory one. Every method is a suspension
//! point; a call that has been issued cannot be cancelled.

pub mod http;
pub mod memory;

pub use http::HttpStore;
pub use memory::MemoryStore;

use async_trait::async_trait;
use taskdeck_proto::task::{NewTask, Task, TaskId, TaskPatch};
use thiserror::Error;

/// Errors produced by remote store calls.
///
/// Validation failures never appear here: the controller rejects blank
/// titles before any store method is called.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The request never produced an HTTP response (connect, I/O, timeout).
    #[error("request failed: {0}")]
    Transport(String),
    /// The server answered with a non-success status.
    #[error("server rejected request ({status}): {message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Server-provided failure description.
        message: String,
    },
    /// The response body could not be decoded.
    #[error("invalid response body: {0}")]
    Decode(String),
}

/// Asynchronous CRUD interface over the remote task collection.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetches the full task collection.
    async fn list(&self) -> Result<Vec<Task>, StoreError>;

    /// Creates a task; the store assigns id and creation time.
    async fn create(&self, new: &NewTask) -> Result<Task, StoreError>;

    /// Applies a partial update to the task with the given id.
    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> Result<Task, StoreError>;

    /// Deletes the task with the given id.
    async fn delete(&self, id: &TaskId) -> Result<(), StoreError>;
}
