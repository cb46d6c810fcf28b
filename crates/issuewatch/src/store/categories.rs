use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

use crate::entity::category::{self, Entity as Category, Model};

use super::errors::{Result, StoreError};

/// Add a category, rejecting duplicates by name.
pub async fn add_category(
    db: &DatabaseConnection,
    name: &str,
    description: Option<&str>,
) -> Result<Model> {
    let existing = Category::find()
        .filter(category::Column::Name.eq(name))
        .one(db)
        .await?;
    if existing.is_some() {
        return Err(StoreError::duplicate(format!("category {name}")));
    }

    let model = category::ActiveModel {
        name: Set(name.to_string()),
        description: Set(description.map(str::to_string)),
        created_at: Set(Utc::now()),
        ..Default::default()
    };
    Ok(model.insert(db).await?)
}

/// List all categories in id order.
pub async fn get_categories(db: &DatabaseConnection) -> Result<Vec<Model>> {
    Ok(Category::find()
        .order_by_asc(category::Column::Id)
        .all(db)
        .await?)
}
