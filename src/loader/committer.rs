//! Snapshot Committer
//!
//! Owns the observable [`LoaderView`]. Beginning an operation and committing a
//! snapshot both run under the same lock, so a currency check and the write it
//! guards can never be split by a concurrent `begin`.

use crate::concurrency::{Operation, OperationSequencer};
use crate::loader::snapshot::{LoaderView, Snapshot};
use crate::navigation::NavigationKey;
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::debug;

struct CommitState {
    /// Key the UI asked for last, whether or not it could be loaded yet
    requested: NavigationKey,
    /// Key of the most recently begun operation; None once the view was reset
    begun: Option<NavigationKey>,
}

pub struct SnapshotCommitter {
    sequencer: Arc<OperationSequencer>,
    state: Mutex<CommitState>,
    view: watch::Sender<LoaderView>,
}

impl SnapshotCommitter {
    pub fn new(sequencer: Arc<OperationSequencer>) -> Self {
        let (view, _) = watch::channel(LoaderView {
            is_loading: true,
            ..LoaderView::default()
        });
        Self {
            sequencer,
            state: Mutex::new(CommitState {
                requested: NavigationKey::root(),
                begun: None,
            }),
            view,
        }
    }

    /// Remember `key` without beginning an operation for it
    pub fn request(&self, key: NavigationKey) {
        self.state.lock().requested = key;
    }

    pub fn requested(&self) -> NavigationKey {
        self.state.lock().requested.clone()
    }

    /// Begin a new operation and mark the view as loading
    ///
    /// When the folder changes, the previous folder's content is cleared right
    /// away so it can never be shown under the new folder. A filter or sort
    /// change on the same folder keeps the current content until the new
    /// snapshot lands.
    pub fn begin(&self, key: NavigationKey) -> Operation {
        let mut state = self.state.lock();
        self.begin_locked(&mut state, key)
    }

    /// Begin a new operation for the most recently requested key
    pub fn begin_requested(&self) -> Operation {
        let mut state = self.state.lock();
        let key = state.requested.clone();
        self.begin_locked(&mut state, key)
    }

    fn begin_locked(&self, state: &mut CommitState, key: NavigationKey) -> Operation {
        let folder_changed = state
            .begun
            .as_ref()
            .map_or(true, |previous| previous.changes_folder(&key));
        let operation = self.sequencer.begin(key);
        state.requested = operation.key.clone();
        state.begun = Some(operation.key.clone());

        self.view.send_modify(|view| {
            if folder_changed {
                view.folder = None;
                view.subfolders.clear();
                view.files.clear();
            }
            view.blocking_error = None;
            view.errors.clear();
            view.is_loading = true;
        });

        debug!(
            operation_id = operation.id,
            folder = %operation.key.folder,
            folder_changed,
            "Began load operation"
        );
        operation
    }

    /// Publish `snapshot` if its operation is still current
    ///
    /// Returns false when the snapshot was superseded and dropped.
    pub fn commit(&self, snapshot: Snapshot) -> bool {
        let _state = self.state.lock();
        if !self.sequencer.is_current(snapshot.operation_id) {
            debug!(
                operation_id = snapshot.operation_id,
                current = self.sequencer.current(),
                "Dropped superseded snapshot"
            );
            return false;
        }

        let operation_id = snapshot.operation_id;
        self.view.send_replace(LoaderView::from_snapshot(snapshot));
        debug!(operation_id, "Committed snapshot");
        true
    }

    /// Hold the loading flag while session resolution is pending
    pub fn hold_loading(&self) {
        let _state = self.state.lock();
        self.view.send_if_modified(|view| {
            let changed = !view.is_loading;
            view.is_loading = true;
            changed
        });
    }

    /// Empty, idle view for a session without a user
    ///
    /// Any operation still in flight is retired so it cannot commit afterwards.
    /// The requested key is kept for when a user signs in.
    pub fn clear_unauthenticated(&self) {
        let mut state = self.state.lock();
        self.sequencer.revoke();
        state.begun = None;
        self.view.send_replace(LoaderView::default());
        debug!("Cleared view for unauthenticated session");
    }

    pub fn view(&self) -> LoaderView {
        self.view.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<LoaderView> {
        self.view.subscribe()
    }
}
