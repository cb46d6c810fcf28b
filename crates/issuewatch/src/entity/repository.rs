//! Repository entity - one tracked external repository.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Repository model.
///
/// Created by administrative actions; the sync engine only reads it and
/// stamps `last_refreshed_at` / `total_open_issues` after each refresh.
/// Two refreshes never mutate the same row concurrently - the orchestrator
/// serializes per repository.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "repositories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Owner login (user or organization).
    pub owner: String,
    /// Repository name.
    pub name: String,
    /// Composite owner/name, unique across tracked repositories.
    #[sea_orm(unique)]
    pub full_name: String,

    /// Assigned category, if any.
    pub category_id: Option<i32>,
    /// Inactive repositories are skipped by batch refreshes.
    pub is_active: bool,

    /// When the last successful refresh completed. Null until the first
    /// refresh.
    pub last_refreshed_at: Option<DateTimeUtc>,
    /// Open-issue count observed by the last refresh.
    pub total_open_issues: i32,

    /// When this record was created locally.
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A repository may belong to a category.
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,

    /// A repository owns many issues.
    #[sea_orm(has_many = "super::issue::Entity")]
    Issue,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::issue::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Issue.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
