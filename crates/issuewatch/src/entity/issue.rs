//! Issue entity - the durable representation of one tracked remote issue.

use chrono::{DateTime, Duration, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// How long after first sighting an issue counts as "new".
pub const NEW_ISSUE_WINDOW_HOURS: i64 = 24;

/// Issue model.
///
/// Identity is `(repository_id, number)` and never changes once created.
/// `first_seen_at` is immutable and is the sole basis for the "new"
/// classification; `last_updated_at` reflects synchronization recency, not
/// remote mutation recency. `seen_at` records local user acknowledgment
/// and is never touched by synchronization.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "issues")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Owning tracked repository.
    pub repository_id: i32,
    /// Issue number assigned by GitHub, unique within the repository.
    pub number: i64,

    /// Canonical HTML URL.
    pub url: String,
    /// Issue title.
    pub title: String,
    /// Lifecycle state as reported remotely.
    pub state: String,
    /// Comma-joined label names.
    pub labels: String,
    /// Whether the remote assignee list was non-empty.
    pub is_assigned: bool,
    /// Login of the first assignee, if any.
    pub assignee_login: Option<String>,
    /// Comment count.
    pub comments_count: i32,
    /// First 200 characters of the body.
    pub body_preview: String,

    /// Creation timestamp reported by GitHub. Immutable once set.
    pub created_at_remote: DateTimeUtc,
    /// When this issue was first observed locally. Set exactly once.
    pub first_seen_at: DateTimeUtc,
    /// When the last reconciliation touched this issue, changed or not.
    pub last_updated_at: DateTimeUtc,
    /// When the user acknowledged this issue. Null until acknowledged.
    pub seen_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// An issue belongs to a repository.
    #[sea_orm(
        belongs_to = "super::repository::Entity",
        from = "Column::RepositoryId",
        to = "super::repository::Column::Id"
    )]
    Repository,
}

impl Related<super::repository::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Repository.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Whether this issue was first seen within the last 24 hours.
    #[must_use]
    pub fn is_new(&self, now: DateTime<Utc>) -> bool {
        now - self.first_seen_at < Duration::hours(NEW_ISSUE_WINDOW_HOURS)
    }
}
