use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entity::issue::{self, Entity as Issue};
use crate::model::NormalizedIssue;

use super::errors::{Result, StoreError};

/// What an upsert did.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// The issue was seen for the first time and inserted.
    New,
    /// An existing record was refreshed.
    Updated,
}

/// Merge one fetched issue into storage.
///
/// Lookup is by `(repository_id, number)`. On an existing record the
/// remote-derived fields are overwritten and `last_updated_at` is stamped;
/// `first_seen_at` and `seen_at` are never touched. A missing record is
/// inserted with `first_seen_at` set to now and `seen_at` unset.
pub async fn upsert_issue(
    db: &DatabaseConnection,
    repository_id: i32,
    fetched: &NormalizedIssue,
) -> Result<UpsertOutcome> {
    let existing = Issue::find()
        .filter(issue::Column::RepositoryId.eq(repository_id))
        .filter(issue::Column::Number.eq(fetched.number))
        .one(db)
        .await?;

    let now = Utc::now();
    match existing {
        Some(record) => {
            let update = issue::ActiveModel {
                id: Set(record.id),
                url: Set(fetched.url.clone()),
                title: Set(fetched.title.clone()),
                state: Set(fetched.state.clone()),
                labels: Set(fetched.labels.clone()),
                is_assigned: Set(fetched.is_assigned),
                assignee_login: Set(fetched.assignee_login.clone()),
                comments_count: Set(fetched.comments_count),
                body_preview: Set(fetched.body_preview.clone()),
                created_at_remote: Set(fetched.created_at),
                last_updated_at: Set(now),
                ..Default::default()
            };
            update.update(db).await?;
            Ok(UpsertOutcome::Updated)
        }
        None => {
            let insert = issue::ActiveModel {
                repository_id: Set(repository_id),
                number: Set(fetched.number),
                url: Set(fetched.url.clone()),
                title: Set(fetched.title.clone()),
                state: Set(fetched.state.clone()),
                labels: Set(fetched.labels.clone()),
                is_assigned: Set(fetched.is_assigned),
                assignee_login: Set(fetched.assignee_login.clone()),
                comments_count: Set(fetched.comments_count),
                body_preview: Set(fetched.body_preview.clone()),
                created_at_remote: Set(fetched.created_at),
                first_seen_at: Set(now),
                last_updated_at: Set(now),
                seen_at: Set(None),
                ..Default::default()
            };
            insert.insert(db).await?;
            Ok(UpsertOutcome::New)
        }
    }
}

/// Mark an issue as acknowledged by the user. This is the only writer of
/// `seen_at`.
pub async fn mark_issue_seen(db: &DatabaseConnection, issue_id: i32) -> Result<issue::Model> {
    let record = Issue::find_by_id(issue_id)
        .one(db)
        .await?
        .ok_or_else(|| StoreError::not_found(format!("issue id {issue_id}")))?;

    let update = issue::ActiveModel {
        id: Set(record.id),
        seen_at: Set(Some(Utc::now())),
        ..Default::default()
    };
    Ok(update.update(db).await?)
}

/// List one repository's stored issues, newest first by remote creation
/// time.
pub async fn get_issues(
    db: &DatabaseConnection,
    repository_id: i32,
) -> Result<Vec<issue::Model>> {
    Ok(Issue::find()
        .filter(issue::Column::RepositoryId.eq(repository_id))
        .order_by_desc(issue::Column::CreatedAtRemote)
        .all(db)
        .await?)
}

/// Count stored issues for one repository.
pub async fn count_issues(db: &DatabaseConnection, repository_id: i32) -> Result<u64> {
    Ok(Issue::find()
        .filter(issue::Column::RepositoryId.eq(repository_id))
        .count(db)
        .await?)
}
