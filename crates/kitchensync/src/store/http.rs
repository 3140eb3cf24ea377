//! HTTP adapter for the remote document store.
//!
//! Speaks the document service's REST surface: records live in a `recipes`
//! collection keyed by id, and listing filters by the owning user via a
//! `userId` query parameter.

use std::time::Duration;

use tracing::debug;

use super::{RecipeStore, RemoteError, Result};
use crate::recipe::{OwnerId, Recipe, RecipeId};

/// A [`RecipeStore`] backed by the remote document service.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl HttpStore {
    /// Build an adapter for the service at `base_url`.
    ///
    /// `api_key`, when present, is sent as a bearer token on every request.
    /// `timeout` bounds each request; an exceeded bound surfaces as
    /// [`RemoteError::Timeout`].
    ///
    /// # Errors
    ///
    /// Returns [`RemoteError::Unknown`] if the underlying HTTP client cannot
    /// be constructed.
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::Unknown(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    fn record_url(&self, id: RecipeId) -> String {
        format!("{}/recipes/{id}", self.base_url)
    }

    fn collection_url(&self) -> String {
        format!("{}/recipes", self.base_url)
    }

    fn authorize(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.api_key {
            Some(key) => request.header("Authorization", format!("Bearer {key}")),
            None => request,
        }
    }
}

/// Map a transport-level failure onto the adapter error taxonomy.
fn classify(context: &str, err: &reqwest::Error) -> RemoteError {
    if err.is_timeout() {
        RemoteError::Timeout(context.to_string())
    } else if err.is_connect() {
        RemoteError::Network(format!("{context}: {err}"))
    } else {
        RemoteError::Unknown(format!("{context}: {err}"))
    }
}

/// Map a non-success HTTP status onto the adapter error taxonomy.
fn status_error(context: &str, status: reqwest::StatusCode) -> RemoteError {
    if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
        RemoteError::PermissionDenied(format!("{context}: status {status}"))
    } else {
        RemoteError::Unknown(format!("{context}: status {status}"))
    }
}

#[async_trait::async_trait]
impl RecipeStore for HttpStore {
    async fn put(&self, record: &Recipe) -> Result<()> {
        let url = self.record_url(record.id);
        debug!(id = %record.id, "Upserting record");

        let response = self
            .authorize(self.client.put(&url).json(record))
            .send()
            .await
            .map_err(|e| classify("put", &e))?;

        if !response.status().is_success() {
            return Err(status_error("put", response.status()));
        }
        Ok(())
    }

    async fn list_by_owner(&self, owner: &OwnerId) -> Result<Vec<Recipe>> {
        let url = self.collection_url();
        debug!(owner = %owner, "Listing records");

        let response = self
            .authorize(self.client.get(&url).query(&[("userId", owner.as_str())]))
            .send()
            .await
            .map_err(|e| classify("list", &e))?;

        if !response.status().is_success() {
            return Err(status_error("list", response.status()));
        }

        response.json().await.map_err(|e| classify("list", &e))
    }

    async fn delete(&self, id: RecipeId) -> Result<()> {
        let url = self.record_url(id);
        debug!(id = %id, "Deleting record");

        let response = self
            .authorize(self.client.delete(&url))
            .send()
            .await
            .map_err(|e| classify("delete", &e))?;

        let status = response.status();
        // Deleting an id the remote no longer has still satisfies the
        // contract's idempotency clause.
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(());
        }
        if !status.is_success() {
            return Err(status_error("delete", status));
        }
        Ok(())
    }
}
