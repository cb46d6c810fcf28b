//! GitHub API client for fetching open issues.

mod client;
mod convert;
mod error;
mod types;

pub use client::{GithubClient, GITHUB_API_HOST, PAGE_SIZE};
pub use convert::{normalize_issue, BODY_PREVIEW_CHARS};
pub use error::{short_error_message, GithubError};
pub use types::{RawIssue, RawLabel, RawUser};
