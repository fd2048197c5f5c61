//! Content Loader
//!
//! Loads the folder, subfolders and files for the current navigation key and
//! publishes exactly one consistent result, no matter how many navigations
//! overlap or in which order their network calls finish.
//!
//! The pieces are kept separate so each contract can be tested on its own:
//! the [`OperationSequencer`](crate::concurrency::OperationSequencer) decides
//! which operation is current, the [`ContentFetcher`] turns an operation into a
//! [`Snapshot`], and the [`SnapshotCommitter`] is the only code that writes the
//! observable [`LoaderView`].

mod committer;
mod fetcher;
mod service;
mod snapshot;

#[cfg(test)]
pub(crate) mod testing;

pub use committer::SnapshotCommitter;
pub use fetcher::{ContentFetcher, FetchOutcome};
pub use service::{ContentLoader, PendingLoad};
pub use snapshot::{LoadOutcome, LoaderView, PartialError, PartialSource, Snapshot};
