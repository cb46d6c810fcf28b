//! Refresh command: drive the sync engine and render the results.

use anyhow::{Context, Result};
use console::style;
use issuewatch::{BatchStats, GithubClient, Refresher};
use sea_orm::DatabaseConnection;

use crate::config::Config;
use crate::progress;

pub async fn handle_refresh(
    db: DatabaseConnection,
    config: &Config,
    repo_id: Option<i32>,
    category_id: Option<i32>,
) -> Result<()> {
    let token = config
        .github_token()
        .context("no GitHub token configured; set ISSUEWATCH_GITHUB_TOKEN or [github] token")?;
    let client = GithubClient::with_pacing(&token, config.sync.requests_per_second)
        .context("failed to build the GitHub client")?;
    let refresher = Refresher::new(db, client, config.refresh_options());

    if let Some(id) = repo_id {
        let outcome = refresher
            .refresh_repository(id)
            .await
            .context("refresh failed")?;
        println!(
            "{} {}: {} new, {} updated, {} open",
            style("✓").green(),
            style(&outcome.repo_name).bold(),
            outcome.new,
            outcome.updated,
            outcome.total
        );
        return Ok(());
    }

    let reporter = progress::reporter();
    let stats = match category_id {
        Some(id) => refresher.refresh_category(id, Some(&reporter)).await?,
        None => refresher.refresh_all(Some(&reporter)).await?,
    };
    print_batch_summary(&stats);
    Ok(())
}

fn print_batch_summary(stats: &BatchStats) {
    println!(
        "{} {} repos refreshed, {} new issues, {} updated",
        style("✓").green(),
        stats.repos_processed,
        stats.total_new,
        stats.total_updated
    );
    if stats.repos_failed > 0 {
        println!(
            "{} {} repos failed:",
            style("✗").red(),
            stats.repos_failed
        );
        for line in &stats.details {
            println!("    {}", style(line).red());
        }
    }
}
