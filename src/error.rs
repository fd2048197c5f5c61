//! Error types
//!
//! `RepositoryError` is what the content collaborators report, `FetchError` is the
//! loader's own taxonomy, and `ApiError` covers everything at the crate surface
//! (configuration, logging setup, CLI).

use crate::types::FolderId;
use thiserror::Error;

/// Failure reported by a folder, file or user lookup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Unexpected response ({status}): {message}")]
    Status { status: u16, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),
}

impl RepositoryError {
    /// Message suitable for showing next to partially loaded content.
    ///
    /// Backend messages are passed through as-is; transport failures keep their
    /// prefix so the user can tell a dead network from a rejected request.
    pub fn user_message(&self) -> String {
        match self {
            RepositoryError::NotFound(msg)
            | RepositoryError::Unauthorized(msg)
            | RepositoryError::Status { message: msg, .. } => msg.clone(),
            other => other.to_string(),
        }
    }
}

/// Errors the content loader records against a snapshot.
///
/// Superseded operations are not represented here: a stale result is not a
/// failure and never reaches observable state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The folder itself could not be resolved, so nothing beneath it is shown.
    #[error("Failed to load folder {folder_id}: {source}")]
    FatalFolderLookup {
        folder_id: FolderId,
        #[source]
        source: RepositoryError,
    },

    #[error("Failed to load subfolders: {0}")]
    PartialSubfolder(#[source] RepositoryError),

    #[error("Failed to load files: {0}")]
    PartialFile(#[source] RepositoryError),
}

/// Crate-level error
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("Not authenticated")]
    NotAuthenticated,

    /// The requested location could not be loaded
    #[error("{0}")]
    LoadFailed(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
