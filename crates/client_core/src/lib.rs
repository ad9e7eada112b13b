//! Async client for the user-directory REST service.
//!
//! Stateless request shaping plus uniform error normalization: every failure
//! surfaces as a [`ClientError`], never a raw transport error. The client
//! performs no retries, no timeouts, and no cancellation; a request in
//! flight always runs to completion.

use async_trait::async_trait;
use reqwest::{header::ACCEPT, Client, Response};
use shared::domain::{UserDraft, UserId, UserRecord};
use tracing::{debug, warn};

pub mod error;

pub use error::ClientError;

/// The five CRUD operations against the user collection endpoint. A trait
/// seam so the orchestrator can be driven by a scripted fake in tests.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn list_all(&self) -> Result<Vec<UserRecord>, ClientError>;
    async fn get_by_id(&self, id: UserId) -> Result<UserRecord, ClientError>;
    async fn create(&self, draft: &UserDraft) -> Result<UserRecord, ClientError>;
    async fn update(&self, id: UserId, draft: &UserDraft) -> Result<UserRecord, ClientError>;
    async fn delete(&self, id: UserId) -> Result<(), ClientError>;
}

pub struct UserDirectoryClient {
    http: Client,
    users_endpoint: String,
}

impl UserDirectoryClient {
    /// `base_url` is the service root including any path prefix, e.g.
    /// `http://127.0.0.1:8080/sgu-api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        let users_endpoint = format!("{}/usuarios", base_url.trim_end_matches('/'));
        Self {
            http: Client::new(),
            users_endpoint,
        }
    }

    fn resource_url(&self, id: UserId) -> String {
        format!("{}/{}", self.users_endpoint, id.0)
    }
}

/// Rejects non-success responses, discarding the body.
async fn ok_or_status(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    warn!(%status, "user service returned error status");
    Err(ClientError::from_status(status, None))
}

/// Rejects non-success responses, preserving the raw body text so callers
/// can classify server-side conflicts from its wording.
async fn ok_or_status_with_body(response: Response) -> Result<Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.ok();
    warn!(%status, "user service rejected the write");
    Err(ClientError::from_status(status, body))
}

#[async_trait]
impl UserDirectory for UserDirectoryClient {
    async fn list_all(&self) -> Result<Vec<UserRecord>, ClientError> {
        debug!("listing users");
        let response = self
            .http
            .get(&self.users_endpoint)
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let users = ok_or_status(response).await?.json().await?;
        Ok(users)
    }

    async fn get_by_id(&self, id: UserId) -> Result<UserRecord, ClientError> {
        debug!(user_id = id.0, "fetching user");
        let response = self
            .http
            .get(self.resource_url(id))
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        let user = ok_or_status(response).await?.json().await?;
        Ok(user)
    }

    async fn create(&self, draft: &UserDraft) -> Result<UserRecord, ClientError> {
        debug!("creating user");
        let response = self
            .http
            .post(&self.users_endpoint)
            .header(ACCEPT, "application/json")
            .json(draft)
            .send()
            .await?;
        let created = ok_or_status_with_body(response).await?.json().await?;
        Ok(created)
    }

    async fn update(&self, id: UserId, draft: &UserDraft) -> Result<UserRecord, ClientError> {
        debug!(user_id = id.0, "updating user");
        let response = self
            .http
            .put(self.resource_url(id))
            .header(ACCEPT, "application/json")
            .json(draft)
            .send()
            .await?;
        let updated = ok_or_status_with_body(response).await?.json().await?;
        Ok(updated)
    }

    async fn delete(&self, id: UserId) -> Result<(), ClientError> {
        debug!(user_id = id.0, "deleting user");
        let response = self
            .http
            .delete(self.resource_url(id))
            .header(ACCEPT, "application/json")
            .send()
            .await?;
        ok_or_status(response).await?;
        Ok(())
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
