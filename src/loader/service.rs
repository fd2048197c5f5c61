//! ContentLoader: the surface the UI drives.

use crate::concurrency::{Operation, OperationSequencer};
use crate::loader::committer::SnapshotCommitter;
use crate::loader::fetcher::{ContentFetcher, FetchOutcome};
use crate::loader::snapshot::{LoadOutcome, LoaderView};
use crate::navigation::NavigationKey;
use crate::repository::contract::{AuthProvider, FileRepository, FolderRepository};
use crate::types::UserId;
use futures::future::{self, BoxFuture, FutureExt};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

/// Completion of one `navigate` or `refresh` call
///
/// The operation is already begun when this is returned; awaiting (or spawning)
/// it only drives the fetch and the commit.
pub type PendingLoad = BoxFuture<'static, LoadOutcome>;

pub struct ContentLoader {
    fetcher: Arc<ContentFetcher>,
    committer: Arc<SnapshotCommitter>,
    auth: Arc<dyn AuthProvider>,
    /// Task reacting to sign-in and sign-out, spawned by `start`
    session: Mutex<Option<JoinHandle<()>>>,
}

impl ContentLoader {
    pub fn new(
        folders: Arc<dyn FolderRepository>,
        files: Arc<dyn FileRepository>,
        auth: Arc<dyn AuthProvider>,
    ) -> Self {
        let sequencer = Arc::new(OperationSequencer::new());
        Self {
            fetcher: Arc::new(ContentFetcher::new(folders, files, sequencer.clone())),
            committer: Arc::new(SnapshotCommitter::new(sequencer)),
            auth,
            session: Mutex::new(None),
        }
    }

    /// Current observable state
    pub fn observe(&self) -> LoaderView {
        self.committer.view()
    }

    /// Receiver notified on every change of the observable state
    pub fn subscribe(&self) -> watch::Receiver<LoaderView> {
        self.committer.subscribe()
    }

    /// Key the UI asked for last; reused by `refresh` and `start`
    pub fn current_key(&self) -> NavigationKey {
        self.committer.requested()
    }

    /// Wait for session resolution, then load the most recently requested key
    ///
    /// Until resolution finishes the view stays in its loading state and no
    /// operation is begun. Without a user the view is emptied and nothing is
    /// loaded. Afterwards the loader follows the session: signing out empties
    /// the view and retires any load in flight, signing in (or switching user)
    /// reloads the requested key.
    pub async fn start(&self) -> LoadOutcome {
        if !self.auth.is_resolved() {
            self.committer.hold_loading();
        }

        let user = self.auth.resolved().await;
        let outcome = match &user {
            Some(user) => {
                info!(user = %user.username, "Session resolved, loading content");
                self.refresh().await
            }
            None => {
                info!("Session resolved without a user");
                self.committer.clear_unauthenticated();
                LoadOutcome::NotAuthenticated
            }
        };

        let mut session = self.session.lock();
        if session.is_none() {
            *session = Some(tokio::spawn(follow_session(
                self.fetcher.clone(),
                self.committer.clone(),
                self.auth.clone(),
                user.map(|u| u.id),
            )));
        }
        outcome
    }

    /// Show `key`, superseding whatever load is in flight
    pub fn navigate(&self, key: NavigationKey) -> PendingLoad {
        match self.gate() {
            Ok(user) => {
                let operation = self.committer.begin(key);
                self.pending(operation, user)
            }
            Err(outcome) => {
                self.committer.request(key);
                future::ready(outcome).boxed()
            }
        }
    }

    /// Reload the most recently requested key as a fresh operation
    pub fn refresh(&self) -> PendingLoad {
        match self.gate() {
            Ok(user) => {
                let operation = self.committer.begin_requested();
                self.pending(operation, user)
            }
            Err(outcome) => future::ready(outcome).boxed(),
        }
    }

    /// User a new operation may load for, or the outcome when there is none
    fn gate(&self) -> Result<UserId, LoadOutcome> {
        if !self.auth.is_resolved() {
            debug!("Session unresolved, deferring load");
            self.committer.hold_loading();
            return Err(LoadOutcome::Deferred);
        }
        match self.auth.current_user() {
            Some(user) => Ok(user.id),
            None => {
                self.committer.clear_unauthenticated();
                Err(LoadOutcome::NotAuthenticated)
            }
        }
    }

    fn pending(&self, operation: Operation, user: UserId) -> PendingLoad {
        load(
            self.fetcher.clone(),
            self.committer.clone(),
            self.auth.clone(),
            operation,
            user,
        )
        .boxed()
    }
}

impl Drop for ContentLoader {
    fn drop(&mut self) {
        if let Some(session) = self.session.lock().take() {
            session.abort();
        }
    }
}

async fn load(
    fetcher: Arc<ContentFetcher>,
    committer: Arc<SnapshotCommitter>,
    auth: Arc<dyn AuthProvider>,
    operation: Operation,
    user: UserId,
) -> LoadOutcome {
    let outcome = fetcher.fetch(&operation).await;
    // Content fetched for one user is never shown to another
    let same_user = auth.current_user().is_some_and(|u| u.id == user);
    let committed = match outcome {
        FetchOutcome::Ready(snapshot) if same_user => committer.commit(snapshot),
        FetchOutcome::Ready(_) | FetchOutcome::Superseded => false,
    };

    if committed {
        LoadOutcome::Committed(operation.id)
    } else {
        debug!(operation_id = operation.id, "Load superseded");
        LoadOutcome::Superseded(operation.id)
    }
}

async fn follow_session(
    fetcher: Arc<ContentFetcher>,
    committer: Arc<SnapshotCommitter>,
    auth: Arc<dyn AuthProvider>,
    mut current: Option<UserId>,
) {
    loop {
        let changed = auth.user_changed(current.as_ref()).await;
        match changed {
            Some(user) => {
                info!(user = %user.username, "Signed in, reloading content");
                let operation = committer.begin_requested();
                tokio::spawn(load(
                    fetcher.clone(),
                    committer.clone(),
                    auth.clone(),
                    operation,
                    user.id.clone(),
                ));
                current = Some(user.id);
            }
            None => {
                info!("Signed out, clearing content");
                committer.clear_unauthenticated();
                current = None;
            }
        }
    }
}
