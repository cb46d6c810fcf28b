//! Category entity - a named grouping of repositories.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Category model. Used only for batch scoping and display; the only
/// invariant is name uniqueness.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "categories")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Display name, unique across categories.
    #[sea_orm(unique)]
    pub name: String,
    /// Free-text description.
    pub description: Option<String>,

    /// When this record was created locally.
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A category groups many repositories.
    #[sea_orm(has_many = "super::repository::Entity")]
    Repository,
}

impl Related<super::repository::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Repository.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
