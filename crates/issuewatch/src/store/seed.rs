use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait};

use crate::entity::category::Entity as Category;

use super::categories::add_category;
use super::errors::Result;
use super::repositories::add_repository;

/// Populate an empty database with the starter categories and repositories.
///
/// A no-op when any category already exists, so it is safe to call on every
/// startup.
pub async fn seed_data(db: &DatabaseConnection) -> Result<()> {
    if Category::find().count(db).await? > 0 {
        return Ok(());
    }

    tracing::info!("seeding initial categories and repositories");

    let categories = [
        ("Machine Learning", "ML frameworks and tools"),
        ("Computer Vision", "Image and video processing"),
        ("NLP", "Natural language processing"),
        ("LLM", "Large Language Models"),
    ];
    let mut ids = std::collections::HashMap::new();
    for (name, description) in categories {
        let cat = add_category(db, name, Some(description)).await?;
        ids.insert(name, cat.id);
    }

    let repositories = [
        ("huggingface", "transformers", "Machine Learning"),
        ("pytorch", "pytorch", "Machine Learning"),
        ("scikit-learn", "scikit-learn", "Machine Learning"),
        ("openai", "CLIP", "Computer Vision"),
        ("ultralytics", "ultralytics", "Computer Vision"),
        ("explosion", "spaCy", "NLP"),
        ("langchain-ai", "langchain", "LLM"),
    ];
    for (owner, name, category) in repositories {
        add_repository(db, owner, name, ids.get(category).copied()).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::connect_and_migrate;
    use crate::store::{get_categories, get_repositories};

    #[tokio::test]
    async fn seeds_starter_data_once() {
        let db = connect_and_migrate("sqlite::memory:")
            .await
            .expect("test db should migrate");

        seed_data(&db).await.expect("seed should succeed");

        let cats = get_categories(&db).await.expect("list should succeed");
        assert_eq!(cats.len(), 4);
        let repos = get_repositories(&db, None, false)
            .await
            .expect("list should succeed");
        assert_eq!(repos.len(), 7);
        assert!(repos.iter().any(|r| r.full_name == "explosion/spaCy"));

        // A second call must not duplicate anything.
        seed_data(&db).await.expect("second seed should succeed");
        assert_eq!(
            get_categories(&db).await.expect("list").len(),
            4,
            "seed must be idempotent"
        );
    }

    #[tokio::test]
    async fn seed_is_skipped_when_categories_exist() {
        let db = connect_and_migrate("sqlite::memory:")
            .await
            .expect("test db should migrate");

        crate::store::add_category(&db, "Custom", None)
            .await
            .expect("category should insert");
        seed_data(&db).await.expect("seed should succeed");

        let cats = get_categories(&db).await.expect("list should succeed");
        assert_eq!(cats.len(), 1);
        assert!(get_repositories(&db, None, false)
            .await
            .expect("list")
            .is_empty());
    }
}
