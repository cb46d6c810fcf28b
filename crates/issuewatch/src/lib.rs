//! Issuewatch - a tracker for open GitHub issues across curated repositories.
//!
//! The library keeps a local SQLite database of categories, repositories,
//! and their open issues, and refreshes it from the GitHub API on demand.
//! Refreshing never loses local-only state: the first-sighting timestamp
//! and user acknowledgment of an issue survive every synchronization.
//!
//! # Example
//!
//! ```ignore
//! use issuewatch::{connect_and_migrate, GithubClient, RefreshOptions, Refresher};
//!
//! let db = connect_and_migrate("sqlite://issuewatch.db?mode=rwc").await?;
//! let client = GithubClient::new(&token)?;
//! let refresher = Refresher::new(db, client, RefreshOptions::default());
//!
//! let stats = refresher.refresh_all(None).await?;
//! println!("{} new issues", stats.total_new);
//! ```

pub mod classify;
pub mod db;
pub mod entity;
pub mod github;
pub mod http;
pub mod migration;
pub mod model;
pub mod rate_limit;
pub mod store;
pub mod sync;

pub use classify::is_beginner_friendly;
pub use db::{connect, connect_and_migrate};
pub use github::{GithubClient, GithubError};
pub use model::NormalizedIssue;
pub use rate_limit::ApiRateLimiter;
pub use store::StoreError;
pub use sync::{BatchStats, RefreshError, RefreshOptions, RefreshOutcome, Refresher};
