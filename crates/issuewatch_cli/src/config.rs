//! Configuration file support for issuewatch.
//!
//! Configuration is loaded with the following precedence (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (prefixed with `ISSUEWATCH_`, e.g., `ISSUEWATCH_GITHUB_TOKEN`)
//! 3. Config file (~/.config/issuewatch/config.toml or ./issuewatch.toml)
//! 4. Built-in defaults
//!
//! The database URL defaults to `sqlite://~/.local/state/issuewatch/issuewatch.db`
//! on Linux (using the XDG state directory) if not explicitly configured.
//!
//! Example config file:
//! ```toml
//! [database]
//! url = "sqlite://~/.local/state/issuewatch/issuewatch.db"  # optional, this is the default
//!
//! [github]
//! token = "ghp_..."  # or use ISSUEWATCH_GITHUB_TOKEN env var
//!
//! [sync]
//! inter_repo_delay_ms = 500
//! requests_per_second = 1
//! halt_on_auth_failure = false
//! ```

use std::path::PathBuf;
use std::time::Duration;

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use directories::ProjectDirs;
use issuewatch::RefreshOptions;
use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Database configuration.
    pub database: DatabaseConfig,
    /// GitHub configuration.
    pub github: GitHubConfig,
    /// Default sync options.
    pub sync: SyncConfig,
}

/// Database configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Database connection URL.
    /// Defaults to `sqlite://~/.local/state/issuewatch/issuewatch.db` if not specified.
    pub url: Option<String>,
}

/// GitHub configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct GitHubConfig {
    /// GitHub API token.
    /// Can also be set via ISSUEWATCH_GITHUB_TOKEN environment variable.
    pub token: Option<String>,
}

/// Default sync options.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Pause between repositories in a batch refresh, in milliseconds.
    pub inter_repo_delay_ms: u64,
    /// Proactive pacing of outbound API requests.
    pub requests_per_second: u32,
    /// Stop a batch refresh after the first authorization failure.
    pub halt_on_auth_failure: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            inter_repo_delay_ms: 500,
            requests_per_second: 1,
            halt_on_auth_failure: false,
        }
    }
}

impl Config {
    /// Load configuration using the config crate's layered approach.
    ///
    /// Sources are loaded in order (later sources override earlier):
    /// 1. Built-in defaults
    /// 2. XDG config file (~/.config/issuewatch/config.toml)
    /// 3. Local config file (./issuewatch.toml)
    /// 4. Environment variables with ISSUEWATCH_ prefix
    pub fn load() -> Self {
        let mut builder = ConfigBuilder::builder();

        if let Some(proj_dirs) = ProjectDirs::from("", "", "issuewatch") {
            let xdg_config = proj_dirs.config_dir().join("config.toml");
            if xdg_config.exists() {
                tracing::debug!("Loading config from {:?}", xdg_config);
                builder = builder.add_source(
                    File::from(xdg_config)
                        .format(FileFormat::Toml)
                        .required(false),
                );
            }
        }

        let local_config = PathBuf::from("issuewatch.toml");
        if local_config.exists() {
            tracing::debug!("Loading config from ./issuewatch.toml");
            builder = builder.add_source(
                File::from(local_config)
                    .format(FileFormat::Toml)
                    .required(false),
            );
        }

        // e.g. ISSUEWATCH_DATABASE_URL -> database.url
        builder = builder.add_source(
            Environment::with_prefix("ISSUEWATCH")
                .separator("_")
                .try_parsing(true),
        );

        match builder.build() {
            Ok(settings) => match settings.try_deserialize::<Config>() {
                Ok(config) => config,
                Err(e) => {
                    tracing::warn!("Failed to deserialize config: {}", e);
                    Config::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to build config: {}", e);
                Config::default()
            }
        }
    }

    /// Get the database URL, falling back to the default state directory path.
    ///
    /// The `mode=rwc` parameter enables read-write access and creates the
    /// file if it doesn't exist.
    pub fn database_url(&self) -> Option<String> {
        self.database.url.clone().or_else(|| {
            Self::default_state_dir().map(|state_dir| {
                let db_path = state_dir.join("issuewatch.db");
                format!("sqlite://{}?mode=rwc", db_path.display())
            })
        })
    }

    /// Get the GitHub token.
    pub fn github_token(&self) -> Option<String> {
        self.github.token.clone()
    }

    /// Build engine options from the sync section.
    pub fn refresh_options(&self) -> RefreshOptions {
        RefreshOptions {
            inter_repo_delay: Duration::from_millis(self.sync.inter_repo_delay_ms),
            halt_on_auth_failure: self.sync.halt_on_auth_failure,
        }
    }

    /// Get the default state directory path.
    ///
    /// On Linux, this is `$XDG_STATE_HOME/issuewatch` or `~/.local/state/issuewatch`.
    /// On macOS/Windows, falls back to the data directory.
    pub fn default_state_dir() -> Option<PathBuf> {
        ProjectDirs::from("", "", "issuewatch").map(|dirs| {
            dirs.state_dir()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| dirs.data_dir().to_path_buf())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let config = Config::default();
        assert!(config.database.url.is_none());
        assert!(config.github.token.is_none());
        assert_eq!(config.sync.inter_repo_delay_ms, 500);
        assert_eq!(config.sync.requests_per_second, 1);
        assert!(!config.sync.halt_on_auth_failure);
    }

    #[test]
    fn database_url_defaults_to_state_dir() {
        let config = Config::default();
        let url = config.database_url().expect("default URL should exist");
        assert!(url.starts_with("sqlite://"));
        assert!(url.contains("issuewatch.db"));
        assert!(url.ends_with("?mode=rwc"));
    }

    #[test]
    fn database_url_respects_configured_value() {
        let toml_content = r#"
            [database]
            url = "sqlite:///tmp/elsewhere.db"
        "#;

        let settings = ConfigBuilder::builder()
            .add_source(config::File::from_str(toml_content, FileFormat::Toml))
            .build()
            .unwrap();
        let config: Config = settings.try_deserialize().unwrap();

        assert_eq!(
            config.database_url(),
            Some("sqlite:///tmp/elsewhere.db".to_string())
        );
    }

    #[test]
    fn sync_section_parses_and_maps_to_options() {
        let toml_content = r#"
            [sync]
            inter_repo_delay_ms = 100
            requests_per_second = 3
            halt_on_auth_failure = true
        "#;

        let settings = ConfigBuilder::builder()
            .add_source(config::File::from_str(toml_content, FileFormat::Toml))
            .build()
            .unwrap();
        let config: Config = settings.try_deserialize().unwrap();

        let options = config.refresh_options();
        assert_eq!(options.inter_repo_delay, Duration::from_millis(100));
        assert!(options.halt_on_auth_failure);
        assert_eq!(config.sync.requests_per_second, 3);
    }

    #[test]
    fn partial_sync_section_keeps_other_defaults() {
        let toml_content = r#"
            [sync]
            inter_repo_delay_ms = 50
        "#;

        let settings = ConfigBuilder::builder()
            .add_source(config::File::from_str(toml_content, FileFormat::Toml))
            .build()
            .unwrap();
        let config: Config = settings.try_deserialize().unwrap();

        assert_eq!(config.sync.inter_repo_delay_ms, 50);
        assert_eq!(config.sync.requests_per_second, 1);
        assert!(!config.sync.halt_on_auth_failure);
    }

    #[test]
    fn github_token_from_config_file() {
        let toml_content = r#"
            [github]
            token = "ghp_test123"
        "#;

        let settings = ConfigBuilder::builder()
            .add_source(config::File::from_str(toml_content, FileFormat::Toml))
            .build()
            .unwrap();
        let config: Config = settings.try_deserialize().unwrap();

        assert_eq!(config.github_token(), Some("ghp_test123".to_string()));
    }
}
