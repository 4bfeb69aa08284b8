//! HTTP implementation of [`RemoteStore`] over the task store API.
//!
//! Wire format and status codes match `taskdeck-server`. An optional
//! opaque bearer credential is attached to every request; an auth
//! failure surfaces as an ordinary [`StoreError::Rejected`] — no
//! refresh or redirect happens at this layer.

use async_trait::async_trait;
use taskdeck_proto::api::ErrorBody;
use taskdeck_proto::task::{NewTask, Task, TaskId, TaskPatch};

use super::{RemoteStore, StoreError};

/// Remote store client speaking JSON over HTTP.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: reqwest::Client,
    base_url: String,
    auth_token: Option<String>,
}

impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl HttpStore {
    /// Creates a store client for the given base URL (e.g.
    /// `http://127.0.0.1:9400`), attaching `auth_token` as a bearer
    /// credential when present.
    #[must_use]
    pub fn new(base_url: impl Into<String>, auth_token: Option<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            client: reqwest::Client::new(),
            base_url,
            auth_token,
        }
    }

    fn tasks_url(&self) -> String {
        format!("{}/tasks", self.base_url)
    }

    fn task_url(&self, id: &TaskId) -> String {
        format!("{}/tasks/{id}", self.base_url)
    }

    fn apply_auth(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.auth_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    /// Converts a non-success response into [`StoreError::Rejected`],
    /// preferring the server's JSON error body over the raw status text.
    async fn reject(response: reqwest::Response) -> StoreError {
        let status = response.status();
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unknown error")
                .to_string(),
        };
        StoreError::Rejected {
            status: status.as_u16(),
            message,
        }
    }
}

#[async_trait]
impl RemoteStore for HttpStore {
    async fn list(&self) -> Result<Vec<Task>, StoreError> {
        let response = self.apply_auth(self.client.get(self.tasks_url())).send().await?;
        if !response.status().is_success() {
            return Err(Self::reject(response).await);
        }
        response
            .json::<Vec<Task>>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn create(&self, new: &NewTask) -> Result<Task, StoreError> {
        let response = self
            .apply_auth(self.client.post(self.tasks_url()).json(new))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::reject(response).await);
        }
        response
            .json::<Task>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn update(&self, id: &TaskId, patch: &TaskPatch) -> Result<Task, StoreError> {
        let response = self
            .apply_auth(self.client.patch(self.task_url(id)).json(patch))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::reject(response).await);
        }
        response
            .json::<Task>()
            .await
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    async fn delete(&self, id: &TaskId) -> Result<(), StoreError> {
        let response = self
            .apply_auth(self.client.delete(self.task_url(id)))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::reject(response).await);
        }
        Ok(())
    }
}
