//! Error types for GitHub API operations.

use thiserror::Error;

use crate::http::HttpError;

/// Errors that can occur when fetching issues from the GitHub API.
///
/// Not-found and timeout conditions never surface here: the fetcher treats
/// both as a recoverable empty result for the affected repository.
#[derive(Debug, Error)]
pub enum GithubError {
    /// HTTP request failed before a response was received.
    #[error("HTTP error: {0}")]
    Transport(#[from] HttpError),

    /// Response body could not be parsed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The API rate limit was exhausted (403 with a rate-limit body or a
    /// zeroed remaining-quota header). Callers can back off and retry a
    /// whole refresh cycle later.
    #[error("GitHub API rate limit exceeded")]
    RateLimited,

    /// Access forbidden for a reason other than rate limiting. Almost
    /// always a bad or under-scoped token.
    #[error("access forbidden: {message}")]
    AuthFailed { message: String },

    /// Any other non-success response.
    #[error("GitHub API error ({status}): {message}")]
    Api { status: u16, message: String },
}

/// Get a short error message suitable for display in batch details.
pub fn short_error_message(err: &GithubError) -> String {
    match err {
        GithubError::Transport(e) => e.to_string(),
        GithubError::Json(_) => "JSON parse error".to_string(),
        GithubError::RateLimited => "Rate limited".to_string(),
        GithubError::AuthFailed { .. } => "Access forbidden".to_string(),
        GithubError::Api { status, message } => {
            if message.chars().count() > 50 {
                let truncated: String = message.chars().take(47).collect();
                format!("HTTP {}: {}...", status, truncated)
            } else {
                format!("HTTP {}: {}", status, message)
            }
        }
    }
}
