//! Operation sequencing
//!
//! Every load request gets a strictly increasing operation id. Only the most
//! recently issued id is current; results produced for any older id are computed
//! but never observed. In-flight requests are not cancelled, they are abandoned.

use crate::navigation::NavigationKey;
use std::sync::atomic::{AtomicU64, Ordering};

/// Operation identifier. The first operation is 1; 0 means "none issued yet".
pub type OperationId = u64;

/// One load attempt for one navigation key
#[derive(Debug, Clone)]
pub struct Operation {
    pub id: OperationId,
    pub key: NavigationKey,
}

impl PartialEq for Operation {
    /// Operations are identified by id alone
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Operation {}

/// Issues operation ids and answers whether an id is still current
///
/// Safe to share across tasks and threads; `begin` may be called from inside the
/// continuation of an operation it is about to supersede.
#[derive(Debug, Default)]
pub struct OperationSequencer {
    current: AtomicU64,
}

impl OperationSequencer {
    pub fn new() -> Self {
        Self {
            current: AtomicU64::new(0),
        }
    }

    /// Start a new operation for `key`, retiring whichever operation was current
    pub fn begin(&self, key: NavigationKey) -> Operation {
        let id = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        Operation { id, key }
    }

    /// True iff `id` is the most recently issued operation id
    pub fn is_current(&self, id: OperationId) -> bool {
        id != 0 && self.current.load(Ordering::SeqCst) == id
    }

    /// Retire the current operation without starting a new one
    pub fn revoke(&self) {
        self.current.fetch_add(1, Ordering::SeqCst);
    }

    /// Most recently issued id, or 0 before the first `begin`
    pub fn current(&self) -> OperationId {
        self.current.load(Ordering::SeqCst)
    }
}
