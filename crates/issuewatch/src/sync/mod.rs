//! Synchronization engine: fetch open issues, reconcile them into storage,
//! and orchestrate batches across tracked repositories.

mod engine;
mod locks;
mod progress;
mod reconcile;
mod types;

pub use engine::Refresher;
pub use locks::RepoLocks;
pub use progress::{emit, ProgressCallback, RefreshProgress};
pub use reconcile::{reconcile, ReconcileStats};
pub use types::{
    BatchStats, RefreshError, RefreshOptions, RefreshOutcome, DEFAULT_INTER_REPO_DELAY,
};
