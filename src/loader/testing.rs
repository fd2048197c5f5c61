//! In-memory repository for loader unit tests.

use crate::error::RepositoryError;
use crate::navigation::{FilterSpec, FolderRef};
use crate::repository::contract::{FileRepository, FolderRepository};
use crate::types::{FileId, FileMeta, FileType, FolderId, FolderMeta};
use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

pub(crate) fn folder(id: &str, parent: Option<&str>) -> FolderMeta {
    FolderMeta {
        id: FolderId::new(id),
        name: format!("Folder {}", id),
        parent_folder: parent.map(FolderId::new),
        assigned_group: None,
        created_at: None,
    }
}

pub(crate) fn file(id: &str, folder: &str) -> FileMeta {
    FileMeta {
        id: FileId::new(id),
        filename: format!("{}.pdf", id),
        file_type: FileType::Pdf,
        description: None,
        secure_url: Some(format!("https://cdn.example.com/{}.pdf", id)),
        tags: vec![],
        folder: Some(FolderId::new(folder)),
        assigned_group: None,
        created_at: None,
    }
}

/// Answers immediately: root holds `a` and `b`, `a` holds `a1` and one file.
pub(crate) struct StaticRepository {
    fail_files: bool,
    detail_calls: AtomicUsize,
    file_calls: AtomicUsize,
    last_filters: Mutex<Option<FilterSpec>>,
}

impl StaticRepository {
    pub(crate) fn sample() -> Self {
        Self {
            fail_files: false,
            detail_calls: AtomicUsize::new(0),
            file_calls: AtomicUsize::new(0),
            last_filters: Mutex::new(None),
        }
    }

    pub(crate) fn failing_files(mut self) -> Self {
        self.fail_files = true;
        self
    }

    pub(crate) fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn file_calls(&self) -> usize {
        self.file_calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_filters(&self) -> Option<FilterSpec> {
        self.last_filters.lock().clone()
    }
}

#[async_trait]
impl FolderRepository for StaticRepository {
    async fn get_details(&self, folder_id: &FolderId) -> Result<FolderMeta, RepositoryError> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        match folder_id.as_str() {
            "a" | "b" => Ok(folder(folder_id.as_str(), None)),
            "a1" => Ok(folder("a1", Some("a"))),
            other => Err(RepositoryError::NotFound(format!("Folder {} not found", other))),
        }
    }

    async fn list(&self, parent: &FolderRef) -> Result<Vec<FolderMeta>, RepositoryError> {
        Ok(match parent.folder_id().map(FolderId::as_str) {
            None => vec![folder("a", None), folder("b", None)],
            Some("a") => vec![folder("a1", Some("a"))],
            Some(_) => vec![],
        })
    }
}

#[async_trait]
impl FileRepository for StaticRepository {
    async fn list(
        &self,
        folder_id: &FolderId,
        filters: &FilterSpec,
    ) -> Result<Vec<FileMeta>, RepositoryError> {
        self.file_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_filters.lock() = Some(filters.clone());
        if self.fail_files {
            return Err(RepositoryError::Status {
                status: 500,
                message: "File index unavailable".to_string(),
            });
        }
        Ok(match folder_id.as_str() {
            "a" => vec![file("report", "a")],
            _ => vec![],
        })
    }
}
