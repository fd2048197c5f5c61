//! Content Fetcher
//!
//! Resolves one operation into a snapshot. The folder lookup, the subfolder
//! listing and the file listing run concurrently and each settles on its own:
//! a failed branch is recorded and defaulted to empty instead of aborting the
//! others. Only a failed folder lookup is fatal for the snapshot.

use crate::concurrency::{Operation, OperationId, OperationSequencer};
use crate::error::{FetchError, RepositoryError};
use crate::loader::snapshot::{PartialError, Snapshot};
use crate::repository::contract::{FileRepository, FolderRepository};
use std::sync::Arc;
use tracing::{debug, warn};

/// Result of fetching one operation
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Ready(Snapshot),
    /// A newer operation became current; nothing from this one may be used
    Superseded,
}

pub struct ContentFetcher {
    folders: Arc<dyn FolderRepository>,
    files: Arc<dyn FileRepository>,
    sequencer: Arc<OperationSequencer>,
}

impl ContentFetcher {
    pub fn new(
        folders: Arc<dyn FolderRepository>,
        files: Arc<dyn FileRepository>,
        sequencer: Arc<OperationSequencer>,
    ) -> Self {
        Self {
            folders,
            files,
            sequencer,
        }
    }

    pub async fn fetch(&self, operation: &Operation) -> FetchOutcome {
        if !self.sequencer.is_current(operation.id) {
            debug!(operation_id = operation.id, "Operation superseded before fetch");
            return FetchOutcome::Superseded;
        }

        let location = &operation.key.folder;
        let folder_id = location.folder_id();

        let details = async {
            match folder_id {
                Some(id) => Some(self.folders.get_details(id).await),
                None => None,
            }
        };
        let subfolders = self.folders.list(location);
        let files = async {
            match folder_id {
                Some(id) => Some(self.files.list(id, &operation.key.filters).await),
                // Files are folder-scoped; the root never lists any
                None => None,
            }
        };

        let (details, subfolders, files) = futures::join!(details, subfolders, files);

        if !self.sequencer.is_current(operation.id) {
            debug!(operation_id = operation.id, "Operation superseded during fetch");
            return FetchOutcome::Superseded;
        }

        let folder = match (folder_id, details) {
            (Some(id), Some(Err(source))) => {
                let error = FetchError::FatalFolderLookup {
                    folder_id: id.clone(),
                    source,
                };
                warn!(operation_id = operation.id, error = %error, "Folder lookup failed");
                return FetchOutcome::Ready(Snapshot::fatal(operation.id, error));
            }
            (_, Some(Ok(folder))) => Some(folder),
            _ => None,
        };

        let mut errors = Vec::new();
        let subfolders = settle(
            subfolders,
            FetchError::PartialSubfolder,
            operation.id,
            &mut errors,
        );
        let files = match files {
            Some(result) => settle(result, FetchError::PartialFile, operation.id, &mut errors),
            None => Vec::new(),
        };

        debug!(
            operation_id = operation.id,
            location = %location,
            subfolders = subfolders.len(),
            files = files.len(),
            errors = errors.len(),
            "Fetched snapshot"
        );

        FetchOutcome::Ready(Snapshot {
            operation_id: operation.id,
            folder,
            subfolders,
            files,
            errors,
            fatal: None,
        })
    }
}

/// Unwrap one branch, recording its failure as a partial error
fn settle<T>(
    result: Result<Vec<T>, RepositoryError>,
    wrap: fn(RepositoryError) -> FetchError,
    operation_id: OperationId,
    errors: &mut Vec<PartialError>,
) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(e) => {
            let error = wrap(e);
            warn!(operation_id, error = %error, "Partial load failure");
            errors.extend(PartialError::from_fetch(&error));
            Vec::new()
        }
    }
}
