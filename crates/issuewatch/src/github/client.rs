//! GitHub API client creation and issue fetching.

use std::sync::Arc;
use std::time::Duration as StdDuration;

use tracing::warn;

use crate::http::reqwest_transport::ReqwestTransport;
use crate::http::{HttpError, HttpRequest, HttpResponse, HttpTransport};
use crate::model::NormalizedIssue;
use crate::rate_limit::{ApiRateLimiter, GITHUB_DEFAULT_RPS};

use super::convert::normalize_issue;
use super::error::GithubError;
use super::types::RawIssue;

/// Default GitHub API host.
pub const GITHUB_API_HOST: &str = "https://api.github.com";

/// Page size for the list-issues call. Only the first page is consumed.
pub const PAGE_SIZE: u32 = 100;

/// Per-request deadline. A repository that exceeds it yields an empty
/// result rather than a hard failure.
const REQUEST_TIMEOUT: StdDuration = StdDuration::from_secs(10);

/// GitHub API client.
///
/// Holds the single bearer token for all calls; credential resolution is
/// the caller's concern. All HTTP I/O goes through the `HttpTransport`
/// seam, and an optional rate limiter paces every outbound request.
#[derive(Clone)]
pub struct GithubClient {
    transport: Arc<dyn HttpTransport>,
    host: String,
    token: String,
    rate_limiter: Option<ApiRateLimiter>,
}

impl GithubClient {
    /// Create a client against api.github.com with default pacing.
    pub fn new(token: &str) -> Result<Self, GithubError> {
        Self::with_pacing(token, GITHUB_DEFAULT_RPS)
    }

    /// Create a client against api.github.com with an explicit pacing rate.
    pub fn with_pacing(token: &str, requests_per_second: u32) -> Result<Self, GithubError> {
        let transport = ReqwestTransport::with_timeout(REQUEST_TIMEOUT)?;
        Ok(Self::with_transport(
            GITHUB_API_HOST,
            token,
            Some(ApiRateLimiter::new(requests_per_second)),
            Arc::new(transport),
        ))
    }

    /// Create a client with an explicit host, pacing policy, and transport.
    pub fn with_transport(
        host: &str,
        token: &str,
        rate_limiter: Option<ApiRateLimiter>,
        transport: Arc<dyn HttpTransport>,
    ) -> Self {
        Self {
            transport,
            host: host.trim_end_matches('/').to_string(),
            token: token.to_string(),
            rate_limiter,
        }
    }

    /// Get the host URL.
    pub fn host(&self) -> &str {
        &self.host
    }

    async fn wait_for_rate_limit(&self) {
        if let Some(ref limiter) = self.rate_limiter {
            limiter.wait().await;
        }
    }

    /// Fetch the open issues of one repository, newest first.
    ///
    /// Pull requests are filtered out before normalization: the remote
    /// endpoint returns them interleaved with issues.
    ///
    /// A repository that is missing upstream (404) or times out yields
    /// `Ok` with an empty list; rate-limit, authorization, and other API
    /// failures are returned as typed errors for the orchestrator to
    /// record. No retry happens here.
    pub async fn fetch_open_issues(
        &self,
        owner: &str,
        repo: &str,
    ) -> Result<Vec<NormalizedIssue>, GithubError> {
        self.wait_for_rate_limit().await;

        let url = format!(
            "{}/repos/{}/{}/issues?state=open&per_page={}&sort=created&direction=desc",
            self.host, owner, repo, PAGE_SIZE
        );
        let request = HttpRequest {
            url,
            headers: vec![
                (
                    "Accept".to_string(),
                    "application/vnd.github.v3+json".to_string(),
                ),
                ("User-Agent".to_string(), "issuewatch".to_string()),
                ("Authorization".to_string(), format!("token {}", self.token)),
            ],
        };

        let response = match self.transport.send(request).await {
            Ok(response) => response,
            Err(HttpError::Timeout(message)) => {
                warn!(owner, repo, error = %message, "timeout fetching issues, returning empty result");
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        match response.status {
            200..=299 => {
                let items: Vec<RawIssue> = serde_json::from_slice(&response.body)?;
                Ok(items
                    .iter()
                    .filter(|item| !item.is_pull_request())
                    .map(normalize_issue)
                    .collect())
            }
            403 => Err(classify_forbidden(&response)),
            404 => {
                warn!(owner, repo, "repository not found upstream, returning empty result");
                Ok(Vec::new())
            }
            status => Err(GithubError::Api {
                status,
                message: String::from_utf8_lossy(&response.body).to_string(),
            }),
        }
    }
}

/// Distinguish a rate-limit 403 from a genuine authorization failure.
///
/// GitHub reports primary and secondary rate limits as 403 with a
/// "rate limit" phrase in the body and a zeroed remaining-quota header.
fn classify_forbidden(response: &HttpResponse) -> GithubError {
    let body = String::from_utf8_lossy(&response.body).to_string();
    let quota_exhausted = response.header("x-ratelimit-remaining") == Some("0");

    if quota_exhausted || body.to_lowercase().contains("rate limit") {
        GithubError::RateLimited
    } else {
        GithubError::AuthFailed { message: body }
    }
}
