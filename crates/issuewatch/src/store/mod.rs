//! Data-access layer for categories, repositories, and issues.

mod categories;
mod errors;
mod issues;
mod repositories;
mod seed;

pub use categories::{add_category, get_categories};
pub use errors::{Result, StoreError};
pub use issues::{count_issues, get_issues, mark_issue_seen, upsert_issue, UpsertOutcome};
pub use repositories::{
    add_repository, delete_repository, get_repositories, get_repository, update_refresh_stamp,
};
pub use seed::seed_data;
