//! Folio: navigation-keyed content loading
//!
//! Loads the folder, subfolders and files for whatever location the user is
//! looking at, and guarantees that only the most recently requested location
//! ever reaches the observable state.

pub mod auth;
pub mod concurrency;
pub mod config;
pub mod error;
pub mod loader;
pub mod logging;
pub mod navigation;
pub mod repository;
pub mod tooling;
pub mod types;

pub use auth::SessionAuth;
pub use concurrency::{Operation, OperationId, OperationSequencer};
pub use error::{ApiError, FetchError, RepositoryError};
pub use loader::{ContentLoader, LoadOutcome, LoaderView, PartialError, PartialSource, PendingLoad};
pub use navigation::{FilterSpec, FolderRef, NavigationKey, SortBy, SortOrder};
pub use repository::{AuthProvider, FileRepository, FolderRepository, HttpContentClient};
