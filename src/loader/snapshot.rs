//! Snapshot and view types.

use crate::concurrency::OperationId;
use crate::error::{FetchError, RepositoryError};
use crate::types::{FileMeta, FolderMeta};
use serde::Serialize;
use std::fmt;

/// Which independent lookup a partial error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PartialSource {
    Subfolders,
    Files,
}

impl fmt::Display for PartialSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartialSource::Subfolders => f.write_str("subfolders"),
            PartialSource::Files => f.write_str("files"),
        }
    }
}

/// A failure confined to one lookup; the other lookups' data is still shown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PartialError {
    pub source: PartialSource,
    pub message: String,
}

impl PartialError {
    pub fn new(source: PartialSource, error: &RepositoryError) -> Self {
        Self {
            source,
            message: error.user_message(),
        }
    }
}

impl PartialError {
    /// Partial error for a loader error, if it is confined to one lookup
    pub fn from_fetch(error: &FetchError) -> Option<Self> {
        match error {
            FetchError::PartialSubfolder(e) => Some(Self::new(PartialSource::Subfolders, e)),
            FetchError::PartialFile(e) => Some(Self::new(PartialSource::Files, e)),
            FetchError::FatalFolderLookup { .. } => None,
        }
    }
}

/// Complete result of one operation, committed whole or not at all
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub operation_id: OperationId,
    /// None at the root, and when the folder lookup failed
    pub folder: Option<FolderMeta>,
    pub subfolders: Vec<FolderMeta>,
    pub files: Vec<FileMeta>,
    pub errors: Vec<PartialError>,
    /// Set when the folder itself could not be resolved
    pub fatal: Option<FetchError>,
}

impl Snapshot {
    pub fn empty(operation_id: OperationId) -> Self {
        Self {
            operation_id,
            folder: None,
            subfolders: Vec::new(),
            files: Vec::new(),
            errors: Vec::new(),
            fatal: None,
        }
    }

    /// Snapshot for an unresolvable folder: no content, one top-level error
    pub fn fatal(operation_id: OperationId, error: FetchError) -> Self {
        Self {
            fatal: Some(error),
            ..Self::empty(operation_id)
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.fatal.is_some()
    }
}

/// Read-only projection of the loader state handed to the UI
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LoaderView {
    pub folder: Option<FolderMeta>,
    pub subfolders: Vec<FolderMeta>,
    pub files: Vec<FileMeta>,
    pub is_loading: bool,
    /// Error that replaces the content entirely
    pub blocking_error: Option<String>,
    pub errors: Vec<PartialError>,
    /// Operation whose snapshot is shown; 0 when nothing has been committed
    pub operation_id: OperationId,
}

impl LoaderView {
    pub(crate) fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            folder: snapshot.folder,
            subfolders: snapshot.subfolders,
            files: snapshot.files,
            is_loading: false,
            blocking_error: snapshot.fatal.map(|e| e.to_string()),
            errors: snapshot.errors,
            operation_id: snapshot.operation_id,
        }
    }

    /// Non-blocking message listing the lookups that failed, one per line
    pub fn error_summary(&self) -> Option<String> {
        if self.errors.is_empty() {
            return None;
        }
        Some(
            self.errors
                .iter()
                .map(|e| format!("Failed to load {}: {}", e.source, e.message))
                .collect::<Vec<_>>()
                .join("\n"),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.folder.is_none() && self.subfolders.is_empty() && self.files.is_empty()
    }
}

/// How a `navigate` or `refresh` call ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The operation's snapshot is now the observable state
    Committed(OperationId),
    /// A newer operation started first; the result was dropped
    Superseded(OperationId),
    /// Session resolution finished without a user
    NotAuthenticated,
    /// Session resolution is still running; the key is kept for `start`
    Deferred,
}

impl LoadOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, LoadOutcome::Committed(_))
    }
}
