//! Per-repository refresh serialization.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Lock registry keyed by repository id.
///
/// Two refreshes of the same repository interleaving their fetch and
/// reconcile steps would race on `first_seen_at`; holding the repository's
/// lock across the whole refresh rules that out. Different repositories
/// never block each other.
#[derive(Clone, Default)]
pub struct RepoLocks {
    locks: Arc<Mutex<HashMap<i32, Arc<AsyncMutex<()>>>>>,
}

impl RepoLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for one repository, waiting if a refresh of the
    /// same repository is in flight.
    pub async fn acquire(&self, repository_id: i32) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().expect("lock registry poisoned");
            Arc::clone(locks.entry(repository_id).or_default())
        };
        lock.lock_owned().await
    }
}
