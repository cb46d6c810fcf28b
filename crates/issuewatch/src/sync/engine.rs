//! Batch refresh orchestration.

use sea_orm::DatabaseConnection;
use tracing::{info, warn};

use crate::entity::repository;
use crate::github::{short_error_message, GithubClient};
use crate::store;

use super::locks::RepoLocks;
use super::progress::{emit, ProgressCallback, RefreshProgress};
use super::reconcile::reconcile;
use super::types::{BatchStats, RefreshError, RefreshOptions, RefreshOutcome};

/// Drives repository refreshes: fetch, reconcile, stamp.
///
/// Holds its collaborators explicitly; nothing is resolved from ambient
/// state. Batches run sequentially on purpose: the single shared
/// credential makes concurrent fetches counterproductive under the API
/// rate limit.
pub struct Refresher {
    db: DatabaseConnection,
    client: GithubClient,
    options: RefreshOptions,
    locks: RepoLocks,
}

impl Refresher {
    pub fn new(db: DatabaseConnection, client: GithubClient, options: RefreshOptions) -> Self {
        Self {
            db,
            client,
            options,
            locks: RepoLocks::new(),
        }
    }

    /// Refresh one repository: fetch its open issues, merge them into
    /// storage, and stamp the refresh metadata.
    ///
    /// The repository's lock is held across the whole sequence, so two
    /// concurrent refreshes of the same repository serialize. On any hard
    /// failure stored state is left untouched.
    pub async fn refresh_repository(&self, repo_id: i32) -> Result<RefreshOutcome, RefreshError> {
        let _guard = self.locks.acquire(repo_id).await;

        let repo = store::get_repository(&self.db, repo_id)
            .await?
            .ok_or(RefreshError::RepositoryMissing { id: repo_id })?;

        let fetched = self
            .client
            .fetch_open_issues(&repo.owner, &repo.name)
            .await
            .map_err(|source| RefreshError::Fetch {
                repo: repo.full_name.clone(),
                source,
            })?;

        let stats = reconcile(&self.db, repo.id, &fetched).await?;
        // Stamp even for an empty result: the absence of issues is itself
        // fresh information.
        store::update_refresh_stamp(&self.db, repo.id, fetched.len() as i32).await?;

        info!(
            repo = %repo.full_name,
            new = stats.new_count,
            updated = stats.updated_count,
            total = fetched.len(),
            "repository refreshed"
        );

        Ok(RefreshOutcome {
            new: stats.new_count,
            updated: stats.updated_count,
            total: fetched.len(),
            repo_name: repo.full_name,
        })
    }

    /// Refresh every active repository in one category, in listing order.
    pub async fn refresh_category(
        &self,
        category_id: i32,
        on_progress: Option<&ProgressCallback>,
    ) -> Result<BatchStats, RefreshError> {
        let repos = store::get_repositories(&self.db, Some(category_id), true).await?;
        Ok(self.refresh_batch(repos, on_progress).await)
    }

    /// Refresh every active repository.
    pub async fn refresh_all(
        &self,
        on_progress: Option<&ProgressCallback>,
    ) -> Result<BatchStats, RefreshError> {
        let repos = store::get_repositories(&self.db, None, true).await?;
        Ok(self.refresh_batch(repos, on_progress).await)
    }

    async fn refresh_batch(
        &self,
        repos: Vec<repository::Model>,
        on_progress: Option<&ProgressCallback>,
    ) -> BatchStats {
        let total = repos.len();
        let mut stats = BatchStats::default();

        for (current, repo) in repos.iter().enumerate() {
            emit(
                on_progress,
                RefreshProgress {
                    current,
                    total,
                    message: format!("Refreshing {}", repo.full_name),
                },
            );

            match self.refresh_repository(repo.id).await {
                Ok(outcome) => {
                    stats.total_new += outcome.new;
                    stats.total_updated += outcome.updated;
                    stats.repos_processed += 1;
                }
                Err(err) => {
                    warn!(repo = %repo.full_name, error = %err, "repository refresh failed");
                    stats.repos_failed += 1;
                    let detail = match &err {
                        RefreshError::Fetch { source, .. } => short_error_message(source),
                        other => other.to_string(),
                    };
                    stats.details.push(format!("{}: {}", repo.full_name, detail));

                    if self.options.halt_on_auth_failure && err.is_auth_failure() {
                        warn!("halting batch after authorization failure");
                        break;
                    }
                }
            }

            tokio::time::sleep(self.options.inter_repo_delay).await;
        }

        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_and_migrate;
    use crate::http::{HttpResponse, MockTransport};
    use crate::store::{add_category, add_repository, count_issues, get_repository};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    const HOST: &str = "https://api.test";

    fn issues_url(owner: &str, repo: &str) -> String {
        format!("{HOST}/repos/{owner}/{repo}/issues?state=open&per_page=100&sort=created&direction=desc")
    }

    fn json_response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.as_bytes().to_vec(),
        }
    }

    fn issue_payload(numbers: &[i64]) -> String {
        let items: Vec<String> = numbers
            .iter()
            .map(|n| {
                format!(
                    r#"{{
                        "number": {n},
                        "html_url": "https://github.com/x/y/issues/{n}",
                        "title": "Issue {n}",
                        "state": "open",
                        "labels": [],
                        "assignees": [],
                        "comments": 0,
                        "created_at": "2026-08-10T00:00:00Z",
                        "body": "text"
                    }}"#
                )
            })
            .collect();
        format!("[{}]", items.join(","))
    }

    fn refresher(db: sea_orm::DatabaseConnection, transport: &MockTransport) -> Refresher {
        let client =
            GithubClient::with_transport(HOST, "test-token", None, Arc::new(transport.clone()));
        let options = RefreshOptions {
            inter_repo_delay: Duration::ZERO,
            ..RefreshOptions::default()
        };
        Refresher::new(db, client, options)
    }

    #[tokio::test]
    async fn refresh_repository_fetches_reconciles_and_stamps() {
        let db = connect_and_migrate("sqlite::memory:")
            .await
            .expect("test db should migrate");
        let repo = add_repository(&db, "octo", "alpha", None)
            .await
            .expect("repo should insert");

        let transport = MockTransport::new();
        transport.push_response(
            issues_url("octo", "alpha"),
            json_response(200, &issue_payload(&[1, 2])),
        );

        let outcome = refresher(db.clone(), &transport)
            .refresh_repository(repo.id)
            .await
            .expect("refresh should succeed");

        assert_eq!(outcome.new, 2);
        assert_eq!(outcome.updated, 0);
        assert_eq!(outcome.total, 2);
        assert_eq!(outcome.repo_name, "octo/alpha");

        let stamped = get_repository(&db, repo.id)
            .await
            .expect("lookup should succeed")
            .expect("repository should exist");
        assert_eq!(stamped.total_open_issues, 2);
        assert!(stamped.last_refreshed_at.is_some());
        assert_eq!(count_issues(&db, repo.id).await.expect("count"), 2);
    }

    #[tokio::test]
    async fn missing_repository_is_a_typed_error() {
        let db = connect_and_migrate("sqlite::memory:")
            .await
            .expect("test db should migrate");
        let transport = MockTransport::new();

        let err = refresher(db, &transport)
            .refresh_repository(42)
            .await
            .expect_err("unknown id should fail");
        assert!(matches!(err, RefreshError::RepositoryMissing { id: 42 }));
    }

    #[tokio::test]
    async fn vanished_repository_refreshes_to_zero_not_error() {
        let db = connect_and_migrate("sqlite::memory:")
            .await
            .expect("test db should migrate");
        let repo = add_repository(&db, "octo", "gone", None)
            .await
            .expect("repo should insert");

        let transport = MockTransport::new();
        transport.push_response(
            issues_url("octo", "gone"),
            json_response(404, r#"{"message": "Not Found"}"#),
        );

        let outcome = refresher(db.clone(), &transport)
            .refresh_repository(repo.id)
            .await
            .expect("404 upstream should be recoverable");

        assert_eq!(outcome.new, 0);
        assert_eq!(outcome.updated, 0);
        assert_eq!(outcome.total, 0);

        // Freshness is stamped even for an empty result.
        let stamped = get_repository(&db, repo.id)
            .await
            .expect("lookup should succeed")
            .expect("repository should exist");
        assert!(stamped.last_refreshed_at.is_some());
        assert_eq!(stamped.total_open_issues, 0);
    }

    #[tokio::test]
    async fn fetch_failure_leaves_stored_state_untouched() {
        let db = connect_and_migrate("sqlite::memory:")
            .await
            .expect("test db should migrate");
        let repo = add_repository(&db, "octo", "flaky", None)
            .await
            .expect("repo should insert");

        let transport = MockTransport::new();
        transport.push_response(issues_url("octo", "flaky"), json_response(502, "bad gateway"));

        let err = refresher(db.clone(), &transport)
            .refresh_repository(repo.id)
            .await
            .expect_err("5xx should fail the refresh");
        assert!(matches!(err, RefreshError::Fetch { .. }));

        let untouched = get_repository(&db, repo.id)
            .await
            .expect("lookup should succeed")
            .expect("repository should exist");
        assert!(untouched.last_refreshed_at.is_none());
        assert_eq!(untouched.total_open_issues, 0);
        assert_eq!(count_issues(&db, repo.id).await.expect("count"), 0);
    }

    #[tokio::test]
    async fn batch_isolates_per_repository_failures() {
        let db = connect_and_migrate("sqlite::memory:")
            .await
            .expect("test db should migrate");
        add_repository(&db, "octo", "first", None)
            .await
            .expect("repo should insert");
        add_repository(&db, "octo", "private", None)
            .await
            .expect("repo should insert");
        add_repository(&db, "octo", "third", None)
            .await
            .expect("repo should insert");

        let transport = MockTransport::new();
        transport.push_response(
            issues_url("octo", "first"),
            json_response(200, &issue_payload(&[1])),
        );
        transport.push_response(
            issues_url("octo", "private"),
            json_response(403, r#"{"message": "Resource not accessible"}"#),
        );
        transport.push_response(
            issues_url("octo", "third"),
            json_response(200, &issue_payload(&[5, 6])),
        );

        let stats = refresher(db, &transport)
            .refresh_all(None)
            .await
            .expect("batch should run");

        assert_eq!(stats.repos_processed, 2);
        assert_eq!(stats.repos_failed, 1);
        assert_eq!(stats.total_new, 3);
        assert_eq!(stats.details.len(), 1);
        assert!(stats.details[0].starts_with("octo/private:"));

        // The third repository was still attempted.
        assert_eq!(transport.requests().len(), 3);
    }

    #[tokio::test]
    async fn halt_on_auth_failure_stops_the_batch() {
        let db = connect_and_migrate("sqlite::memory:")
            .await
            .expect("test db should migrate");
        add_repository(&db, "octo", "private", None)
            .await
            .expect("repo should insert");
        add_repository(&db, "octo", "after", None)
            .await
            .expect("repo should insert");

        let transport = MockTransport::new();
        transport.push_response(
            issues_url("octo", "private"),
            json_response(403, r#"{"message": "Bad credentials"}"#),
        );
        transport.push_response(
            issues_url("octo", "after"),
            json_response(200, &issue_payload(&[1])),
        );

        let client =
            GithubClient::with_transport(HOST, "test-token", None, Arc::new(transport.clone()));
        let options = RefreshOptions {
            inter_repo_delay: Duration::ZERO,
            halt_on_auth_failure: true,
        };
        let stats = Refresher::new(db, client, options)
            .refresh_all(None)
            .await
            .expect("batch should run");

        assert_eq!(stats.repos_processed, 0);
        assert_eq!(stats.repos_failed, 1);
        // The second repository was never attempted.
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn refresh_category_only_touches_its_repositories() {
        let db = connect_and_migrate("sqlite::memory:")
            .await
            .expect("test db should migrate");
        let ml = add_category(&db, "Machine Learning", None)
            .await
            .expect("category should insert");
        let nlp = add_category(&db, "NLP", None)
            .await
            .expect("category should insert");
        add_repository(&db, "pytorch", "pytorch", Some(ml.id))
            .await
            .expect("repo should insert");
        add_repository(&db, "explosion", "spaCy", Some(nlp.id))
            .await
            .expect("repo should insert");

        let transport = MockTransport::new();
        transport.push_response(
            issues_url("pytorch", "pytorch"),
            json_response(200, &issue_payload(&[1])),
        );

        let stats = refresher(db, &transport)
            .refresh_category(ml.id, None)
            .await
            .expect("batch should run");

        assert_eq!(stats.repos_processed, 1);
        assert_eq!(stats.repos_failed, 0);
        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert!(requests[0].url.contains("/repos/pytorch/pytorch/"));
    }

    #[tokio::test]
    async fn progress_reports_each_repository_in_order() {
        let db = connect_and_migrate("sqlite::memory:")
            .await
            .expect("test db should migrate");
        add_repository(&db, "octo", "one", None)
            .await
            .expect("repo should insert");
        add_repository(&db, "octo", "two", None)
            .await
            .expect("repo should insert");

        let transport = MockTransport::new();
        transport.push_response(
            issues_url("octo", "one"),
            json_response(200, &issue_payload(&[])),
        );
        transport.push_response(
            issues_url("octo", "two"),
            json_response(200, &issue_payload(&[])),
        );

        let events = Arc::new(Mutex::new(Vec::new()));
        let events_clone = Arc::clone(&events);
        let callback: ProgressCallback = Box::new(move |event| {
            events_clone
                .lock()
                .unwrap()
                .push((event.current, event.total, event.message));
        });

        refresher(db, &transport)
            .refresh_all(Some(&callback))
            .await
            .expect("batch should run");

        let recorded = events.lock().unwrap();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].0, 0);
        assert_eq!(recorded[1].0, 1);
        assert!(recorded.iter().all(|(_, total, _)| *total == 2));
        assert!(recorded[0].2.contains("octo/one"));
        assert!(recorded[1].2.contains("octo/two"));
    }
}
