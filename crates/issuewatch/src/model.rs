//! Normalized issue representation shared by the fetcher, reconciler, and
//! store.

use chrono::{DateTime, Utc};

/// One remote issue, normalized from the GitHub wire format.
///
/// This is the unit the reconciler merges into storage. Identity within a
/// repository is `number`; everything else is overwritten on every
/// reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedIssue {
    /// Issue number assigned by GitHub (unique per repository).
    pub number: i64,
    /// Canonical HTML URL.
    pub url: String,
    /// Issue title.
    pub title: String,
    /// Lifecycle state as reported remotely ("open"/"closed").
    pub state: String,
    /// Comma-joined label names.
    pub labels: String,
    /// Whether the assignee list is non-empty.
    pub is_assigned: bool,
    /// Login of the first assignee, if any.
    pub assignee_login: Option<String>,
    /// Comment count.
    pub comments_count: i32,
    /// Creation timestamp reported by GitHub. Immutable once stored.
    pub created_at: DateTime<Utc>,
    /// First 200 characters of the body, empty if the body is absent.
    pub body_preview: String,
    /// Classification result. Informational only: storage re-derives
    /// beginner-friendliness from labels at query time.
    pub is_beginner_friendly: bool,
}
