//! Result and configuration types for the refresh engine.

use std::time::Duration;

use thiserror::Error;

use crate::github::GithubError;
use crate::store::StoreError;

/// Pause inserted between repositories in a batch, in addition to the
/// client's own request pacing.
pub const DEFAULT_INTER_REPO_DELAY: Duration = Duration::from_millis(500);

/// Configuration for a [`Refresher`](super::Refresher).
#[derive(Debug, Clone)]
pub struct RefreshOptions {
    /// Delay after every repository attempt in a batch.
    pub inter_repo_delay: Duration,
    /// Stop a batch early when a repository fails with an authorization
    /// error. The same credential serves every repository, so later
    /// attempts would fail the same way. Off by default: a batch then
    /// records the failures per repository and keeps going.
    pub halt_on_auth_failure: bool,
}

impl Default for RefreshOptions {
    fn default() -> Self {
        Self {
            inter_repo_delay: DEFAULT_INTER_REPO_DELAY,
            halt_on_auth_failure: false,
        }
    }
}

/// Result of refreshing a single repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshOutcome {
    /// Issues seen for the first time.
    pub new: usize,
    /// Issues already tracked and refreshed in place.
    pub updated: usize,
    /// Open issues observed remotely (after pull-request filtering).
    pub total: usize,
    /// `owner/name` of the refreshed repository.
    pub repo_name: String,
}

/// Aggregate result of a batch refresh.
///
/// A batch never aborts on a per-repository failure; `details` carries one
/// line per failed repository.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchStats {
    pub total_new: usize,
    pub total_updated: usize,
    pub repos_processed: usize,
    pub repos_failed: usize,
    /// One `owner/name: error` line per failure.
    pub details: Vec<String>,
}

/// Errors from refreshing a repository.
#[derive(Debug, Error)]
pub enum RefreshError {
    /// The repository id is not tracked locally.
    #[error("repository id {id} is not tracked")]
    RepositoryMissing { id: i32 },

    /// The remote fetch failed. Stored state is untouched.
    #[error("fetch failed for {repo}: {source}")]
    Fetch {
        repo: String,
        #[source]
        source: GithubError,
    },

    /// A store operation failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl RefreshError {
    /// Whether this failure was an authorization rejection, which a batch
    /// may treat as fatal for the whole credential.
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            Self::Fetch {
                source: GithubError::AuthFailed { .. },
                ..
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_keep_batches_running_on_auth_failure() {
        let options = RefreshOptions::default();
        assert!(!options.halt_on_auth_failure);
        assert_eq!(options.inter_repo_delay, DEFAULT_INTER_REPO_DELAY);
    }

    #[test]
    fn auth_failure_detection_matches_only_auth_fetch_errors() {
        let auth = RefreshError::Fetch {
            repo: "octo/private".to_string(),
            source: GithubError::AuthFailed {
                message: "bad credentials".to_string(),
            },
        };
        assert!(auth.is_auth_failure());

        let rate = RefreshError::Fetch {
            repo: "octo/busy".to_string(),
            source: GithubError::RateLimited,
        };
        assert!(!rate.is_auth_failure());

        let missing = RefreshError::RepositoryMissing { id: 9 };
        assert!(!missing.is_auth_failure());
    }
}
