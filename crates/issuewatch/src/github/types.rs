//! GitHub API wire types.

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One item from the list-issues endpoint - fields we need from the API
/// response.
///
/// We define only the fields we need, which makes the code resilient to API
/// changes. Note that this endpoint conflates issues and pull requests: PRs
/// carry a `pull_request` key that plain issues lack.
///
/// API docs: https://docs.github.com/en/rest/issues/issues#list-repository-issues
#[derive(Debug, Clone, Deserialize)]
pub struct RawIssue {
    /// Issue number (unique per repository).
    pub number: i64,
    /// Canonical HTML URL.
    pub html_url: String,
    /// Issue title.
    pub title: String,
    /// Lifecycle state ("open"/"closed").
    pub state: String,
    /// Labels attached to the issue.
    #[serde(default)]
    pub labels: Vec<RawLabel>,
    /// Assigned users (may be empty).
    #[serde(default)]
    pub assignees: Vec<RawUser>,
    /// Comment count.
    pub comments: i32,
    /// When the issue was opened.
    pub created_at: DateTime<Utc>,
    /// Issue body (may be null).
    pub body: Option<String>,
    /// Present if and only if this item is a pull request.
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

impl RawIssue {
    /// Whether this item is a pull request rather than an issue.
    #[must_use]
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

/// A label on an issue.
#[derive(Debug, Clone, Deserialize)]
pub struct RawLabel {
    /// Label name.
    pub name: String,
}

/// A GitHub user reference.
#[derive(Debug, Clone, Deserialize)]
pub struct RawUser {
    /// Username/login.
    pub login: String,
}
