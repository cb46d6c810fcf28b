//! Issuewatch CLI - command-line interface for the open-issue tracker.

mod commands;
mod config;
mod progress;

use clap::{Parser, Subcommand};
use console::Term;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "issuewatch")]
#[command(version)]
#[command(about = "Track open GitHub issues across curated repositories")]
#[command(
    long_about = "Issuewatch keeps a local database of repositories grouped into \
categories and synchronizes their open GitHub issues on demand. Issues keep \
their first-sighting timestamp and seen/unseen state across refreshes."
)]
#[command(after_long_help = r#"EXAMPLES
    Initialize the database and load the starter repositories:
        $ issuewatch init
        $ issuewatch seed

    Track a repository:
        $ issuewatch repo add rust-lang/rust --category 1

    Refresh everything:
        $ issuewatch refresh

    Refresh one category, or one repository:
        $ issuewatch refresh --category 2
        $ issuewatch refresh --repo 5

CONFIGURATION
    Issuewatch reads configuration from:
      1. ~/.config/issuewatch/config.toml (or $XDG_CONFIG_HOME/issuewatch/config.toml)
      2. ./issuewatch.toml
      3. Environment variables (ISSUEWATCH_* prefix)
      4. .env file in current directory

ENVIRONMENT VARIABLES
    ISSUEWATCH_DATABASE_URL    Database connection string (default: ~/.local/state/issuewatch/issuewatch.db)
    ISSUEWATCH_GITHUB_TOKEN    GitHub personal access token
"#)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or migrate the database
    Init,
    /// Load the starter categories and repositories (no-op if data exists)
    Seed,
    /// Manage categories
    Category {
        #[command(subcommand)]
        action: CategoryAction,
    },
    /// Manage tracked repositories
    Repo {
        #[command(subcommand)]
        action: RepoAction,
    },
    /// Browse tracked issues
    Issue {
        #[command(subcommand)]
        action: IssueAction,
    },
    /// Fetch open issues from GitHub and reconcile them into the database
    Refresh {
        /// Refresh only this repository id
        #[arg(short, long, conflicts_with = "category")]
        repo: Option<i32>,

        /// Refresh only the active repositories in this category id
        #[arg(short, long)]
        category: Option<i32>,
    },
}

#[derive(Subcommand)]
enum CategoryAction {
    /// Add a category
    Add {
        /// Category name (unique)
        name: String,

        /// Optional description
        #[arg(short, long)]
        description: Option<String>,
    },
    /// List categories
    List,
}

#[derive(Subcommand)]
enum RepoAction {
    /// Track a repository
    Add {
        /// Repository as owner/name
        slug: String,

        /// Category id to file it under
        #[arg(short, long)]
        category: Option<i32>,
    },
    /// Stop tracking a repository and delete its issues
    Remove {
        /// Repository id
        id: i32,
    },
    /// List tracked repositories
    List {
        /// Only list repositories in this category id
        #[arg(short, long)]
        category: Option<i32>,

        /// Include inactive repositories
        #[arg(short, long)]
        all: bool,
    },
}

#[derive(Subcommand)]
enum IssueAction {
    /// List one repository's tracked issues, newest first
    List {
        /// Repository id
        repo: i32,
    },
    /// Mark an issue as seen
    Seen {
        /// Issue id
        id: i32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Structured logging for non-TTY runs; interactive runs render
    // progress bars instead.
    if !Term::stdout().is_term() {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("issuewatch=info,issuewatch_cli=info"));
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .init();
    }

    let config = config::Config::load();
    let cli = Cli::parse();

    let database_url = config
        .database_url()
        .ok_or_else(|| anyhow::anyhow!("could not determine a database URL"))?;

    // Ensure the database directory exists for SQLite.
    if database_url.starts_with("sqlite://") {
        let db_path = database_url.trim_start_matches("sqlite://");
        let db_path = db_path.split('?').next().unwrap_or(db_path);
        let db_path = std::path::Path::new(db_path);
        if let Some(parent) = db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    if let Commands::Init = cli.command {
        return commands::admin::handle_init(&database_url).await;
    }

    let db = issuewatch::connect_and_migrate(&database_url).await?;

    match cli.command {
        Commands::Init => unreachable!("handled above"),
        Commands::Seed => commands::admin::handle_seed(&db).await?,
        Commands::Category { action } => match action {
            CategoryAction::Add { name, description } => {
                commands::admin::handle_category_add(&db, &name, description.as_deref()).await?;
            }
            CategoryAction::List => commands::admin::handle_category_list(&db).await?,
        },
        Commands::Repo { action } => match action {
            RepoAction::Add { slug, category } => {
                commands::admin::handle_repo_add(&db, &slug, category).await?;
            }
            RepoAction::Remove { id } => commands::admin::handle_repo_remove(&db, id).await?,
            RepoAction::List { category, all } => {
                commands::admin::handle_repo_list(&db, category, all).await?;
            }
        },
        Commands::Issue { action } => match action {
            IssueAction::List { repo } => commands::admin::handle_issue_list(&db, repo).await?,
            IssueAction::Seen { id } => commands::admin::handle_issue_seen(&db, id).await?,
        },
        Commands::Refresh { repo, category } => {
            commands::refresh::handle_refresh(db, &config, repo, category).await?;
        }
    }

    Ok(())
}
