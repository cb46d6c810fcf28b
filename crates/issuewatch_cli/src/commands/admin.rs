//! Database administration: migrations, seed data, categories,
//! repositories, and issue listing.

use anyhow::{bail, Context, Result};
use chrono::Utc;
use console::style;
use issuewatch::store;
use sea_orm::DatabaseConnection;

pub async fn handle_init(database_url: &str) -> Result<()> {
    issuewatch::connect_and_migrate(database_url)
        .await
        .context("failed to initialize the database")?;
    println!("{} Database ready", style("✓").green());
    Ok(())
}

pub async fn handle_seed(db: &DatabaseConnection) -> Result<()> {
    store::seed_data(db)
        .await
        .context("failed to seed starter data")?;
    println!("{} Starter categories and repositories in place", style("✓").green());
    Ok(())
}

pub async fn handle_category_add(
    db: &DatabaseConnection,
    name: &str,
    description: Option<&str>,
) -> Result<()> {
    let category = store::add_category(db, name, description)
        .await
        .with_context(|| format!("failed to add category '{name}'"))?;
    println!(
        "{} Added category {} (id {})",
        style("✓").green(),
        style(&category.name).bold(),
        category.id
    );
    Ok(())
}

pub async fn handle_category_list(db: &DatabaseConnection) -> Result<()> {
    let categories = store::get_categories(db).await?;
    if categories.is_empty() {
        println!("No categories yet. Try `issuewatch seed` or `issuewatch category add`.");
        return Ok(());
    }

    for category in categories {
        let repos = store::get_repositories(db, Some(category.id), false).await?;
        println!(
            "{:>4}  {}  {}",
            category.id,
            style(&category.name).bold(),
            style(format!("({} repos)", repos.len())).dim()
        );
        if let Some(description) = category.description {
            println!("      {}", style(description).dim());
        }
    }
    Ok(())
}

pub async fn handle_repo_add(
    db: &DatabaseConnection,
    slug: &str,
    category_id: Option<i32>,
) -> Result<()> {
    let (owner, name) = match slug.split_once('/') {
        Some((owner, name)) if !owner.is_empty() && !name.is_empty() => (owner, name),
        _ => bail!("expected owner/name, got '{slug}'"),
    };

    let repo = store::add_repository(db, owner, name, category_id)
        .await
        .with_context(|| format!("failed to add repository '{slug}'"))?;
    println!(
        "{} Tracking {} (id {})",
        style("✓").green(),
        style(&repo.full_name).bold(),
        repo.id
    );
    Ok(())
}

pub async fn handle_repo_remove(db: &DatabaseConnection, id: i32) -> Result<()> {
    let repo = store::get_repository(db, id)
        .await?
        .with_context(|| format!("no repository with id {id}"))?;
    store::delete_repository(db, id).await?;
    println!(
        "{} Removed {} and its tracked issues",
        style("✓").green(),
        style(&repo.full_name).bold()
    );
    Ok(())
}

pub async fn handle_repo_list(
    db: &DatabaseConnection,
    category_id: Option<i32>,
    include_inactive: bool,
) -> Result<()> {
    let repos = store::get_repositories(db, category_id, !include_inactive).await?;
    if repos.is_empty() {
        println!("No repositories tracked. Try `issuewatch repo add owner/name`.");
        return Ok(());
    }

    for repo in repos {
        let refreshed = repo
            .last_refreshed_at
            .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
            .unwrap_or_else(|| "never".to_string());
        let inactive = if repo.is_active { "" } else { " [inactive]" };
        println!(
            "{:>4}  {:<40} {:>4} open  refreshed {}{}",
            repo.id,
            style(&repo.full_name).bold(),
            repo.total_open_issues,
            style(refreshed).dim(),
            style(inactive).red()
        );
    }
    Ok(())
}

pub async fn handle_issue_list(db: &DatabaseConnection, repo_id: i32) -> Result<()> {
    let repo = store::get_repository(db, repo_id)
        .await?
        .with_context(|| format!("no repository with id {repo_id}"))?;
    let issues = store::get_issues(db, repo_id).await?;

    println!("{} ({} issues)", style(&repo.full_name).bold(), issues.len());
    let now = Utc::now();
    for issue in issues {
        let mut badges = String::new();
        if issue.is_new(now) {
            badges.push_str(&format!(" {}", style("NEW").green().bold()));
        }
        if issue.seen_at.is_none() {
            badges.push_str(&format!(" {}", style("unseen").yellow()));
        }
        if issuewatch::is_beginner_friendly(issue.labels.split(',')) {
            badges.push_str(&format!(" {}", style("beginner-friendly").cyan()));
        }
        println!(
            "{:>6}  #{:<6} {}{}",
            issue.id,
            issue.number,
            issue.title,
            badges
        );
        println!("        {}", style(&issue.url).dim());
    }
    Ok(())
}

pub async fn handle_issue_seen(db: &DatabaseConnection, issue_id: i32) -> Result<()> {
    let issue = store::mark_issue_seen(db, issue_id)
        .await
        .with_context(|| format!("failed to mark issue {issue_id} as seen"))?;
    println!(
        "{} Marked #{} ({}) as seen",
        style("✓").green(),
        issue.number,
        issue.title
    );
    Ok(())
}
