use crate::error::RepositoryError;
use crate::navigation::{FilterSpec, FolderRef};
use crate::types::{FileMeta, FolderId, FolderMeta, User, UserId};
use async_trait::async_trait;

#[async_trait]
pub trait FolderRepository: Send + Sync {
    /// Fails with `NotFound` when the folder does not exist or is not visible.
    async fn get_details(&self, folder_id: &FolderId) -> Result<FolderMeta, RepositoryError>;

    /// Children of `parent`; an empty list is a valid answer.
    async fn list(&self, parent: &FolderRef) -> Result<Vec<FolderMeta>, RepositoryError>;
}

#[async_trait]
pub trait FileRepository: Send + Sync {
    async fn list(
        &self,
        folder_id: &FolderId,
        filters: &FilterSpec,
    ) -> Result<Vec<FileMeta>, RepositoryError>;
}

/// Read-only view of session resolution.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    fn is_resolved(&self) -> bool;

    fn current_user(&self) -> Option<User>;

    /// Wait until resolution has finished and return the user it produced.
    async fn resolved(&self) -> Option<User>;

    /// Wait until the session is resolved to a user other than `current`
    /// (None meaning nobody signed in) and return the new user.
    ///
    /// Returns immediately when the session already differs from `current`.
    async fn user_changed(&self, current: Option<&UserId>) -> Option<User>;
}
