use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::entity::issue::{self, Entity as Issue};
use crate::entity::repository::{self, Entity as Repository, Model};

use super::errors::{Result, StoreError};

/// Register a repository for tracking.
///
/// The `owner/name` pair must be unique; re-adding a tracked repository
/// returns [`StoreError::Duplicate`].
pub async fn add_repository(
    db: &DatabaseConnection,
    owner: &str,
    name: &str,
    category_id: Option<i32>,
) -> Result<Model> {
    let full_name = format!("{owner}/{name}");

    let existing = Repository::find()
        .filter(repository::Column::FullName.eq(&full_name))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(StoreError::duplicate(format!("repository {full_name}")));
    }

    let model = repository::ActiveModel {
        owner: Set(owner.to_string()),
        name: Set(name.to_string()),
        full_name: Set(full_name),
        category_id: Set(category_id),
        is_active: Set(true),
        last_refreshed_at: Set(None),
        total_open_issues: Set(0),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    Ok(model.insert(db).await?)
}

/// Look up a repository by id.
pub async fn get_repository(db: &DatabaseConnection, id: i32) -> Result<Option<Model>> {
    Ok(Repository::find_by_id(id).one(db).await?)
}

/// List repositories, optionally restricted to one category and/or to
/// active repositories only. Ordered by id for stable listings.
pub async fn get_repositories(
    db: &DatabaseConnection,
    category_id: Option<i32>,
    active_only: bool,
) -> Result<Vec<Model>> {
    let mut query = Repository::find();
    if let Some(cat) = category_id {
        query = query.filter(repository::Column::CategoryId.eq(cat));
    }
    if active_only {
        query = query.filter(repository::Column::IsActive.eq(true));
    }
    Ok(query.order_by_asc(repository::Column::Id).all(db).await?)
}

/// Remove a repository and all of its tracked issues.
pub async fn delete_repository(db: &DatabaseConnection, id: i32) -> Result<()> {
    let repo = Repository::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| StoreError::not_found(format!("repository id {id}")))?;

    // Issues first, there is no ON DELETE CASCADE on the FK.
    Issue::delete_many()
        .filter(issue::Column::RepositoryId.eq(id))
        .exec(db)
        .await?;
    repo.delete(db).await?;
    Ok(())
}

/// Record a completed refresh: stamp `last_refreshed_at` and store the
/// observed open-issue count.
pub async fn update_refresh_stamp(
    db: &DatabaseConnection,
    id: i32,
    open_issue_count: i32,
) -> Result<Model> {
    let model = repository::ActiveModel {
        id: Set(id),
        last_refreshed_at: Set(Some(Utc::now())),
        total_open_issues: Set(open_issue_count),
        ..Default::default()
    };
    Ok(model.update(db).await?)
}
