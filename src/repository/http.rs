//! REST client for the content API.

use crate::config::ApiConfig;
use crate::error::{ApiError, RepositoryError};
use crate::navigation::{FilterSpec, FolderRef};
use crate::repository::contract::{FileRepository, FolderRepository};
use crate::types::{FileMeta, FolderId, FolderMeta, User};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP implementation of the folder and file repositories
#[derive(Clone)]
pub struct HttpContentClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpContentClient {
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone().filter(|t| !t.trim().is_empty()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let request = self.client.get(format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send_json<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        what: &str,
    ) -> Result<T, RepositoryError> {
        let response = request
            .send()
            .await
            .map_err(|e| RepositoryError::Network(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| RepositoryError::Decode(format!("{}: {}", what, e)));
        }

        let body = response.text().await.unwrap_or_default();
        Err(error_for_status(status.as_u16(), &body, what))
    }

    /// Fetch the user the configured token belongs to
    pub async fn get_me(&self) -> Result<User, RepositoryError> {
        self.send_json(self.get("/users/me"), "Loading current user")
            .await
    }
}

#[async_trait]
impl FolderRepository for HttpContentClient {
    async fn get_details(&self, folder_id: &FolderId) -> Result<FolderMeta, RepositoryError> {
        debug!(folder_id = %folder_id, "Fetching folder details");
        self.send_json(
            self.get(&format!("/folders/{}", folder_id)),
            "Loading folder details",
        )
        .await
    }

    async fn list(&self, parent: &FolderRef) -> Result<Vec<FolderMeta>, RepositoryError> {
        debug!(parent = %parent, "Listing folders");
        let request = match parent {
            FolderRef::Root => self.get("/folders"),
            FolderRef::Folder(id) => self.get("/folders").query(&[("parentFolder", id.as_str())]),
        };
        self.send_json(request, "Listing folders").await
    }
}

#[async_trait]
impl FileRepository for HttpContentClient {
    async fn list(
        &self,
        folder_id: &FolderId,
        filters: &FilterSpec,
    ) -> Result<Vec<FileMeta>, RepositoryError> {
        let query = filters.to_query(folder_id);
        debug!(folder_id = %folder_id, query = ?query, "Listing files");
        self.send_json(self.get("/files").query(&query), "Listing files")
            .await
    }
}

fn backend_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value.get("message")?.as_str().map(str::to_string)
}

/// Map a non-success response onto a repository error
pub(crate) fn error_for_status(status: u16, body: &str, what: &str) -> RepositoryError {
    let message = backend_message(body)
        .unwrap_or_else(|| format!("{} failed with status {}", what, status));

    match status {
        404 => RepositoryError::NotFound(message),
        401 | 403 => {
            if status == 401 {
                warn!(status, "Request rejected, session token is missing or expired");
            }
            RepositoryError::Unauthorized(message)
        }
        _ => RepositoryError::Status { status, message },
    }
}
