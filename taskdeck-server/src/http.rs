//! HTTP surface: router, handlers, error mapping, and server startup.
//!
//! The server exposes the CRUD contract the client consumes:
//!
//! - `GET /tasks` → 200, JSON array of tasks
//! - `POST /tasks` → 201 with the created task, 422 on blank title
//! - `PATCH /tasks/{id}` → 200 with the updated task, 404 unknown id
//! - `DELETE /tasks/{id}` → 204, 404 unknown id
//!
//! When an auth token is configured, every endpoint requires
//! `Authorization: Bearer <token>` and answers 401 otherwise.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch};
use taskdeck_proto::api::ErrorBody;
use taskdeck_proto::task::{NewTask, Task, TaskId, TaskPatch};
use uuid::Uuid;

use crate::store::{TableError, TaskTable};

/// Errors surfaced to HTTP clients.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// No task with the given id.
    #[error("task not found: {0}")]
    NotFound(TaskId),
    /// Request body failed validation.
    #[error("{0}")]
    Validation(String),
    /// Missing or wrong bearer token.
    #[error("invalid or missing bearer token")]
    Unauthorized,
}

impl From<TableError> for ApiError {
    fn from(err: TableError) -> Self {
        match err {
            TableError::NotFound(id) => Self::NotFound(id),
            TableError::BlankTitle => Self::Validation(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
        };
        (status, Json(ErrorBody::new(self.to_string()))).into_response()
    }
}

/// Shared server state: the task table and the optional auth token.
#[derive(Debug, Default)]
pub struct ServerState {
    /// All persisted tasks.
    pub table: TaskTable,
    auth_token: Option<String>,
}

impl ServerState {
    /// Creates server state with no auth requirement.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates server state that requires the given bearer token,
    /// or none if `auth_token` is `None`.
    #[must_use]
    pub fn with_auth(auth_token: Option<String>) -> Self {
        Self {
            table: TaskTable::new(),
            auth_token,
        }
    }

    /// Checks the `Authorization` header against the configured token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Unauthorized`] if a token is configured and the
    /// header is missing or does not match.
    fn authorize(&self, headers: &HeaderMap) -> Result<(), ApiError> {
        let Some(expected) = &self.auth_token else {
            return Ok(());
        };
        let presented = headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "));
        if presented == Some(expected.as_str()) {
            Ok(())
        } else {
            Err(ApiError::Unauthorized)
        }
    }
}

/// Builds the task store router over the given state.
pub fn router(state: Arc<ServerState>) -> axum::Router {
    axum::Router::new()
        .route("/tasks", get(list_tasks).post(create_task))
        .route("/tasks/{id}", patch(update_task).delete(delete_task))
        .with_state(state)
}

async fn list_tasks(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Task>>, ApiError> {
    state.authorize(&headers)?;
    Ok(Json(state.table.list()))
}

async fn create_task(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
    Json(new): Json<NewTask>,
) -> Result<(StatusCode, Json<Task>), ApiError> {
    state.authorize(&headers)?;
    let task = state.table.create(&new)?;
    tracing::info!(id = %task.id, title = %task.title, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

async fn update_task(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
    Json(patch): Json<TaskPatch>,
) -> Result<Json<Task>, ApiError> {
    state.authorize(&headers)?;
    let id = TaskId::from_uuid(id);
    let task = state.table.update(&id, &patch)?;
    tracing::info!(id = %task.id, "task updated");
    Ok(Json(task))
}

async fn delete_task(
    State(state): State<Arc<ServerState>>,
    Path(id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    state.authorize(&headers)?;
    let id = TaskId::from_uuid(id);
    state.table.delete(&id)?;
    tracing::info!(id = %id, "task deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Starts the task store server on the given address with default state.
///
/// Returns the bound address (useful with port `0`) and the serve task's
/// [`tokio::task::JoinHandle`].
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server(
    addr: &str,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    start_server_with_state(addr, Arc::new(ServerState::new())).await
}

/// Starts the task store server with a pre-configured [`ServerState`].
///
/// # Errors
///
/// Returns an error if the TCP listener cannot bind to the given address.
pub async fn start_server_with_state(
    addr: &str,
    state: Arc<ServerState>,
) -> Result<
    (std::net::SocketAddr, tokio::task::JoinHandle<()>),
    Box<dyn std::error::Error + Send + Sync>,
> {
    let app = router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    let bound_addr = listener.local_addr()?;

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "task store server error");
        }
    });

    Ok((bound_addr, handle))
}
