//! Merge fetched issues into storage.

use sea_orm::DatabaseConnection;

use crate::model::NormalizedIssue;
use crate::store::{self, UpsertOutcome};

/// Counts produced by one reconciliation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileStats {
    /// Issues inserted for the first time.
    pub new_count: usize,
    /// Issues already present and refreshed.
    pub updated_count: usize,
}

/// Merge one repository's fetched issues into storage.
///
/// Every fetched issue is upserted without diffing; an unchanged issue
/// still counts as updated and gets a fresh `last_updated_at`. The caller
/// stamps the repository's refresh metadata afterwards, including for an
/// empty list.
pub async fn reconcile(
    db: &DatabaseConnection,
    repository_id: i32,
    fetched: &[NormalizedIssue],
) -> store::Result<ReconcileStats> {
    let mut stats = ReconcileStats::default();
    for issue in fetched {
        match store::upsert_issue(db, repository_id, issue).await? {
            UpsertOutcome::New => stats.new_count += 1,
            UpsertOutcome::Updated => stats.updated_count += 1,
        }
    }
    Ok(stats)
}
